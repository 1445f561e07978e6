// Copyright 2026 the Shelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reconciliation output: operations, changesets, and summaries.

use alloc::vec::Vec;

use crate::item::{Item, ItemId};
use crate::section::{SectionKind, SectionMetadata};

/// Discriminant of an [`Operation`], for counting and tracing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OperationKind {
    /// [`Operation::RemoveItem`].
    RemoveItem,
    /// [`Operation::RemoveSection`].
    RemoveSection,
    /// [`Operation::MoveSection`].
    MoveSection,
    /// [`Operation::MoveItem`].
    MoveItem,
    /// [`Operation::InsertSection`].
    InsertSection,
    /// [`Operation::InsertItem`].
    InsertItem,
    /// [`Operation::ReloadItem`].
    ReloadItem,
}

/// A single update to a live list.
///
/// Operations are applied in changeset order. Item operations address their
/// section by kind; every index is valid at the moment the operation is
/// applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation<S, I> {
    /// Remove the entry at `index` of `section`.
    RemoveItem {
        /// Section holding the entry.
        section: S,
        /// Current index of the entry.
        index: usize,
        /// Identity of the removed item, for view teardown.
        id: ItemId,
    },
    /// Remove the section at `index`, together with all of its entries.
    RemoveSection {
        /// The removed kind.
        section: S,
        /// Current index of the section.
        index: usize,
    },
    /// Move a section from `from` to `to`.
    MoveSection {
        /// The moved kind.
        section: S,
        /// Current index.
        from: usize,
        /// Index after the move.
        to: usize,
    },
    /// Move an entry within its section from `from` to `to`. Content is
    /// unchanged.
    MoveItem {
        /// Section holding the entry.
        section: S,
        /// Identity of the moved item.
        id: ItemId,
        /// Current index.
        from: usize,
        /// Index after the move.
        to: usize,
    },
    /// Create an empty section at `index`.
    InsertSection {
        /// The inserted kind.
        section: S,
        /// Final index of the section.
        index: usize,
        /// Header metadata for the new section.
        metadata: SectionMetadata,
    },
    /// Create an entry for `item` at `index` of `section`.
    InsertItem {
        /// Section receiving the entry.
        section: S,
        /// Final index of the entry.
        index: usize,
        /// Full item data for view creation.
        item: I,
    },
    /// Reconfigure the existing entry at `index` with new content. Identity
    /// is unchanged.
    ReloadItem {
        /// Section holding the entry.
        section: S,
        /// Final index of the entry.
        index: usize,
        /// Updated item data.
        item: I,
    },
}

impl<S: SectionKind, I: Item> Operation<S, I> {
    /// Returns the discriminant.
    #[must_use]
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::RemoveItem { .. } => OperationKind::RemoveItem,
            Self::RemoveSection { .. } => OperationKind::RemoveSection,
            Self::MoveSection { .. } => OperationKind::MoveSection,
            Self::MoveItem { .. } => OperationKind::MoveItem,
            Self::InsertSection { .. } => OperationKind::InsertSection,
            Self::InsertItem { .. } => OperationKind::InsertItem,
            Self::ReloadItem { .. } => OperationKind::ReloadItem,
        }
    }

    /// Returns the section this operation touches.
    #[must_use]
    pub fn section(&self) -> S {
        match self {
            Self::RemoveItem { section, .. }
            | Self::RemoveSection { section, .. }
            | Self::MoveSection { section, .. }
            | Self::MoveItem { section, .. }
            | Self::InsertSection { section, .. }
            | Self::InsertItem { section, .. }
            | Self::ReloadItem { section, .. } => *section,
        }
    }

    /// Returns the identity of the item this operation touches, if it is an
    /// item operation.
    #[must_use]
    pub fn item_id(&self) -> Option<ItemId> {
        match self {
            Self::RemoveItem { id, .. } | Self::MoveItem { id, .. } => Some(*id),
            Self::InsertItem { item, .. } | Self::ReloadItem { item, .. } => Some(item.id()),
            Self::RemoveSection { .. } | Self::MoveSection { .. } | Self::InsertSection { .. } => {
                None
            }
        }
    }

    /// Returns the index the operation leaves its subject at (the removal
    /// index for removals).
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::RemoveItem { index, .. }
            | Self::RemoveSection { index, .. }
            | Self::InsertSection { index, .. }
            | Self::InsertItem { index, .. }
            | Self::ReloadItem { index, .. } => *index,
            Self::MoveSection { to, .. } | Self::MoveItem { to, .. } => *to,
        }
    }
}

/// Per-kind operation counts for one changeset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChangeSummary {
    /// Number of [`Operation::RemoveItem`]s.
    pub removed_items: u32,
    /// Number of [`Operation::RemoveSection`]s.
    pub removed_sections: u32,
    /// Number of [`Operation::MoveSection`]s.
    pub moved_sections: u32,
    /// Number of [`Operation::MoveItem`]s.
    pub moved_items: u32,
    /// Number of [`Operation::InsertSection`]s.
    pub inserted_sections: u32,
    /// Number of [`Operation::InsertItem`]s.
    pub inserted_items: u32,
    /// Number of [`Operation::ReloadItem`]s.
    pub reloaded_items: u32,
}

impl ChangeSummary {
    /// Returns the total number of operations.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.removed_items
            + self.removed_sections
            + self.moved_sections
            + self.moved_items
            + self.inserted_sections
            + self.inserted_items
            + self.reloaded_items
    }

    /// Returns `true` if no operation was counted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Counts one operation of the given kind.
    pub fn record(&mut self, kind: OperationKind) {
        let counter = match kind {
            OperationKind::RemoveItem => &mut self.removed_items,
            OperationKind::RemoveSection => &mut self.removed_sections,
            OperationKind::MoveSection => &mut self.moved_sections,
            OperationKind::MoveItem => &mut self.moved_items,
            OperationKind::InsertSection => &mut self.inserted_sections,
            OperationKind::InsertItem => &mut self.inserted_items,
            OperationKind::ReloadItem => &mut self.reloaded_items,
        };
        *counter = counter.saturating_add(1);
    }
}

/// The ordered operations produced by one reconciliation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Changeset<S, I> {
    operations: Vec<Operation<S, I>>,
}

impl<S, I> Default for Changeset<S, I> {
    fn default() -> Self {
        Self {
            operations: Vec::new(),
        }
    }
}

impl<S: SectionKind, I: Item> Changeset<S, I> {
    pub(crate) fn from_operations(operations: Vec<Operation<S, I>>) -> Self {
        Self { operations }
    }

    /// Returns the operations in application order.
    #[inline]
    #[must_use]
    pub fn operations(&self) -> &[Operation<S, I>] {
        &self.operations
    }

    /// Returns an iterator over the operations in application order.
    pub fn iter(&self) -> core::slice::Iter<'_, Operation<S, I>> {
        self.operations.iter()
    }

    /// Returns the number of operations.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if applying this changeset is a no-op.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Returns the number of operations of the given kind.
    #[must_use]
    pub fn count(&self, kind: OperationKind) -> usize {
        self.operations.iter().filter(|op| op.kind() == kind).count()
    }

    /// Returns per-kind operation counts.
    #[must_use]
    pub fn summary(&self) -> ChangeSummary {
        let mut summary = ChangeSummary::default();
        for op in &self.operations {
            summary.record(op.kind());
        }
        summary
    }

    /// Consumes the changeset and returns the operations.
    #[must_use]
    pub fn into_operations(self) -> Vec<Operation<S, I>> {
        self.operations
    }
}

impl<S, I> IntoIterator for Changeset<S, I> {
    type Item = Operation<S, I>;
    type IntoIter = alloc::vec::IntoIter<Operation<S, I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.into_iter()
    }
}

impl<'a, S, I> IntoIterator for &'a Changeset<S, I> {
    type Item = &'a Operation<S, I>;
    type IntoIter = core::slice::Iter<'a, Operation<S, I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_by_kind() {
        let mut summary = ChangeSummary::default();
        summary.record(OperationKind::InsertItem);
        summary.record(OperationKind::InsertItem);
        summary.record(OperationKind::RemoveSection);
        assert_eq!(summary.inserted_items, 2);
        assert_eq!(summary.removed_sections, 1);
        assert_eq!(summary.total(), 3);
        assert!(!summary.is_empty());
        assert!(ChangeSummary::default().is_empty());
    }
}
