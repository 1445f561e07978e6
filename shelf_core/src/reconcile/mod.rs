// Copyright 2026 the Shelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapshot reconciliation.
//!
//! [`diff`] is the pure comparison of two snapshots. [`Reconciler`] owns the
//! most recently applied snapshot and turns each new one into a
//! [`Changeset`].

mod diff;
mod ops;
mod reconciler;

pub use diff::diff;
pub use ops::{ChangeSummary, Changeset, Operation, OperationKind};
pub use reconciler::Reconciler;
