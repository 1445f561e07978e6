// Copyright 2026 the Shelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renderer contract for list views.
//!
//! Shelf splits view work into *renderer* implementations. The core owns the
//! data model, snapshot validation, and reconciliation; a renderer owns the
//! visible entries and applies each [`Changeset`] to them.
//!
//! A renderer is expected to:
//!
//! - apply operations strictly in changeset order;
//! - treat `MoveItem` and `ReloadItem` as operations on an existing entry,
//!   keeping whatever per-entry view state it holds;
//! - create entries only for `InsertItem` and discard them only for
//!   `RemoveItem` and `RemoveSection`;
//! - derive section headers from the `InsertSection` metadata.
//!
//! # Crate boundaries
//!
//! `shelf_core` owns the data model, reconciliation, and this contract
//! module. Renderer crates depend on `shelf_core` and provide view glue.
//! Application code depends on both and wires them together through
//! [`Reconciler::apply_to`].
//!
//! [`Reconciler::apply_to`]: crate::reconcile::Reconciler::apply_to

use crate::item::Item;
use crate::reconcile::Changeset;
use crate::section::SectionKind;

/// Applies reconciliation output to a live list of views.
///
/// List views and test doubles both implement this trait, enabling generic
/// update loops.
///
/// # Update loop pseudocode
///
/// ```rust,ignore
/// fn on_data_changed(data: &Catalog) {
///     // Build: group the data by section, rejecting duplicate ids.
///     let snapshot = Snapshot::build(data.sections())?;
///
///     // Diff and render: the reconciler keeps the previous snapshot only
///     // if the renderer accepted the changeset.
///     let summary = reconciler.apply_to(snapshot, &mut list_view)?;
/// }
/// ```
pub trait Renderer<S: SectionKind, I: Item> {
    /// Error reported when a changeset cannot be applied.
    type Error;

    /// Applies the given [`Changeset`] to the backing list.
    ///
    /// # Errors
    ///
    /// Returns an error when an operation does not fit the list's current
    /// state. What remains applied after an error is implementation defined.
    fn apply(&mut self, changes: &Changeset<S, I>) -> Result<(), Self::Error>;
}
