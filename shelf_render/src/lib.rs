// Copyright 2026 the Shelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reference list-view renderer for shelf changesets.
//!
//! This crate provides an in-memory stand-in for a platform list view that
//! implements [`shelf_core::backend::Renderer`]. It defines:
//!
//! - [`ListView`]: sections of cells, updated by applying a changeset
//! - [`ApplyError`]: the contract violation that stopped a changeset
//! - [`CellHandle`] and [`ReusePool`]: recycled view handles, so that
//!   identity stability is observable
//!
//! A changeset is applied atomically: if any operation fails, the view is
//! left exactly as it was before.

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod error;
mod list;
mod reuse;

pub use error::ApplyError;
pub use list::{Cell, ListSection, ListStats, ListView};
pub use reuse::{CellHandle, ReusePool};
