// Copyright 2026 the Shelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Section-keyed snapshots and list reconciliation.
//!
//! `shelf_core` describes a list UI as an ordered collection of typed
//! sections, each holding typed items, and turns a change of desired state
//! into an ordered list of update operations that a renderer can apply to a
//! live list. It is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   application data
//!       │
//!       ▼
//!   Snapshot::build() ──► Snapshot ──► Reconciler::apply_snapshot()
//!                                               │
//!                 ┌─────────────────────────────┘
//!                 ▼
//!   Changeset (ordered Operations) ──► Renderer::apply()
//! ```
//!
//! **[`section`]**: the [`SectionKind`](section::SectionKind) trait for
//! closed sets of section kinds, and their header metadata.
//!
//! **[`item`]**: [`ItemId`](item::ItemId) identity tokens, kept separate
//! from item content, and the [`Item`](item::Item) trait.
//!
//! **[`snapshot`]**: immutable [`Snapshot`](snapshot::Snapshot) values.
//! Construction rejects duplicate sections and duplicate item identities, so
//! every snapshot in existence satisfies the reconciler's preconditions.
//!
//! **[`reconcile`]**: the [`diff`](reconcile::diff) function and the
//! stateful [`Reconciler`](reconcile::Reconciler) that remembers the last
//! applied snapshot.
//!
//! **[`backend`]**: the [`Renderer`](backend::Renderer) trait that list
//! views implement to apply a [`Changeset`](reconcile::Changeset).
//!
//! **[`layout`]**: declarative per-section layout descriptions resolved
//! against a container size.
//!
//! **[`app`]**: the app-store listing: section kinds, item types, and their
//! layouts.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! reconciliation instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-operation
//!   records.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod app;
pub mod backend;
pub mod item;
pub mod layout;
pub mod reconcile;
pub mod section;
pub mod snapshot;
pub mod trace;
