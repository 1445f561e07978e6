// Copyright 2026 the Shelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable list snapshots.
//!
//! A [`Snapshot`] is one complete description of the desired list: an ordered
//! sequence of [`Section`]s, each an ordered sequence of items. Snapshots are
//! built fresh whenever backing data changes and are never mutated afterwards.
//!
//! Construction is the only place where the reconciler's preconditions are
//! checked. [`Snapshot::build`] and [`SnapshotBuilder::finish`] reject a
//! section kind that appears twice and an [`ItemId`] that appears twice
//! anywhere in the snapshot; there is no way to obtain a snapshot that
//! violates either rule.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;

use crate::item::{Item, ItemId};
use crate::section::SectionKind;

/// Errors from snapshot construction.
///
/// Both variants indicate a programming error in the code assembling the
/// snapshot. No partial snapshot is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstructionError<S> {
    /// The same section kind was supplied more than once.
    DuplicateSection {
        /// The repeated kind.
        section: S,
    },
    /// The same item identity was supplied more than once.
    DuplicateItem {
        /// The repeated identity.
        id: ItemId,
        /// Section holding the first occurrence.
        first: S,
        /// Section holding the second occurrence.
        second: S,
    },
}

impl<S: fmt::Debug + PartialEq> fmt::Display for ConstructionError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSection { section } => {
                write!(f, "section {section:?} appears more than once")
            }
            Self::DuplicateItem { id, first, second } if first == second => {
                write!(f, "item {id} appears more than once in section {first:?}")
            }
            Self::DuplicateItem { id, first, second } => {
                write!(f, "item {id} appears in both {first:?} and {second:?}")
            }
        }
    }
}

impl<S: fmt::Debug + PartialEq> core::error::Error for ConstructionError<S> {}

/// A section kind paired with its ordered items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section<S, I> {
    kind: S,
    items: Vec<I>,
}

impl<S: SectionKind, I: Item> Section<S, I> {
    /// Returns the section kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> S {
        self.kind
    }

    /// Returns the items in display order.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Returns the number of items.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the section holds no items.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the index of the item with the given id.
    #[must_use]
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Returns an iterator over the item ids in display order.
    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().map(Item::id)
    }
}

/// An immutable, validated description of list state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot<S, I> {
    sections: Vec<Section<S, I>>,
}

impl<S, I> Default for Snapshot<S, I> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S, I> Snapshot<S, I> {
    /// Returns the snapshot with no sections.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            sections: Vec::new(),
        }
    }
}

impl<S: SectionKind, I: Item> Snapshot<S, I> {
    /// Builds a snapshot from `(kind, items)` pairs in display order.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::DuplicateSection`] if a kind appears more
    /// than once, or [`ConstructionError::DuplicateItem`] if an item id
    /// appears more than once anywhere in the snapshot.
    pub fn build<T, V>(ordered_sections: T) -> Result<Self, ConstructionError<S>>
    where
        T: IntoIterator<Item = (S, V)>,
        V: IntoIterator<Item = I>,
    {
        let sections = ordered_sections
            .into_iter()
            .map(|(kind, items)| Section {
                kind,
                items: items.into_iter().collect(),
            })
            .collect();
        Self::validated(sections)
    }

    /// Checks uniqueness of kinds and ids, then wraps the sections.
    fn validated(sections: Vec<Section<S, I>>) -> Result<Self, ConstructionError<S>> {
        let mut owners: BTreeMap<ItemId, S> = BTreeMap::new();
        for (index, section) in sections.iter().enumerate() {
            if sections[..index].iter().any(|s| s.kind == section.kind) {
                return Err(ConstructionError::DuplicateSection {
                    section: section.kind,
                });
            }
            for item in &section.items {
                if let Some(&first) = owners.get(&item.id()) {
                    return Err(ConstructionError::DuplicateItem {
                        id: item.id(),
                        first,
                        second: section.kind,
                    });
                }
                owners.insert(item.id(), section.kind);
            }
        }
        Ok(Self { sections })
    }

    /// Returns the sections in display order.
    #[inline]
    #[must_use]
    pub fn sections(&self) -> &[Section<S, I>] {
        &self.sections
    }

    /// Returns an iterator over the section kinds in display order.
    pub fn kinds(&self) -> impl Iterator<Item = S> + '_ {
        self.sections.iter().map(|s| s.kind)
    }

    /// Returns the section of the given kind, if present.
    #[must_use]
    pub fn section(&self, kind: S) -> Option<&Section<S, I>> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Returns the display index of the section of the given kind.
    #[must_use]
    pub fn section_index(&self, kind: S) -> Option<usize> {
        self.sections.iter().position(|s| s.kind == kind)
    }

    /// Returns the items of the given kind (empty if the section is absent).
    #[must_use]
    pub fn items(&self, kind: S) -> &[I] {
        match self.section(kind) {
            Some(section) => section.items(),
            None => &[],
        }
    }

    /// Returns the section and index holding the item with `id`.
    #[must_use]
    pub fn locate(&self, id: ItemId) -> Option<(S, usize)> {
        self.sections
            .iter()
            .find_map(|s| s.position(id).map(|index| (s.kind, index)))
    }

    /// Returns the item with `id`, if present.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&I> {
        self.sections
            .iter()
            .flat_map(|s| s.items.iter())
            .find(|item| item.id() == id)
    }

    /// Returns the number of sections.
    #[inline]
    #[must_use]
    pub fn number_of_sections(&self) -> usize {
        self.sections.len()
    }

    /// Returns the total number of items across all sections.
    #[must_use]
    pub fn number_of_items(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    /// Returns `true` if the snapshot has no sections.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Incrementally assembles a [`Snapshot`].
///
/// Validation is deferred to [`finish`](Self::finish), so appending never
/// fails.
#[derive(Clone, Debug)]
pub struct SnapshotBuilder<S, I> {
    sections: Vec<Section<S, I>>,
}

impl<S, I> Default for SnapshotBuilder<S, I> {
    fn default() -> Self {
        Self {
            sections: Vec::new(),
        }
    }
}

impl<S: SectionKind, I: Item> SnapshotBuilder<S, I> {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a section with the given items.
    ///
    /// Appending the same kind twice is reported by [`finish`](Self::finish).
    #[must_use]
    pub fn append_section(mut self, kind: S, items: impl IntoIterator<Item = I>) -> Self {
        self.sections.push(Section {
            kind,
            items: items.into_iter().collect(),
        });
        self
    }

    /// Appends items to the most recently appended section of `kind`, or
    /// appends a new section if none exists yet.
    #[must_use]
    pub fn append_items(mut self, kind: S, items: impl IntoIterator<Item = I>) -> Self {
        if let Some(section) = self.sections.iter_mut().rev().find(|s| s.kind == kind) {
            section.items.extend(items);
            self
        } else {
            self.append_section(kind, items)
        }
    }

    /// Validates and returns the snapshot, keeping sections in append order.
    ///
    /// # Errors
    ///
    /// See [`Snapshot::build`].
    pub fn finish(self) -> Result<Snapshot<S, I>, ConstructionError<S>> {
        Snapshot::validated(self.sections)
    }

    /// Validates and returns the snapshot with sections in default display
    /// order (by [`SectionKind::ordinal`]).
    ///
    /// # Errors
    ///
    /// See [`Snapshot::build`].
    pub fn finish_in_default_order(mut self) -> Result<Snapshot<S, I>, ConstructionError<S>> {
        self.sections.sort_by_key(|s| s.kind.ordinal());
        Snapshot::validated(self.sections)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use alloc::vec;

    use super::*;
    use crate::section::SectionMetadata;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub(crate) enum Kind {
        A,
        B,
        C,
    }

    impl SectionKind for Kind {
        const ALL: &'static [Self] = &[Self::A, Self::B, Self::C];

        fn metadata(self) -> SectionMetadata {
            SectionMetadata::NONE
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub(crate) struct Row {
        pub(crate) id: ItemId,
        pub(crate) title: &'static str,
    }

    impl Item for Row {
        fn id(&self) -> ItemId {
            self.id
        }
    }

    pub(crate) fn row(id: u64, title: &'static str) -> Row {
        Row {
            id: ItemId::new(id),
            title,
        }
    }

    #[test]
    fn build_preserves_order() {
        let snapshot =
            Snapshot::build([(Kind::B, vec![row(1, "x")]), (Kind::A, vec![row(2, "y")])]).unwrap();
        assert_eq!(snapshot.kinds().collect::<Vec<_>>(), vec![Kind::B, Kind::A]);
        assert_eq!(snapshot.number_of_sections(), 2);
        assert_eq!(snapshot.number_of_items(), 2);
        assert_eq!(snapshot.section_index(Kind::A), Some(1));
        assert_eq!(snapshot.locate(ItemId::new(2)), Some((Kind::A, 0)));
        assert_eq!(snapshot.item(ItemId::new(1)).map(|r| r.title), Some("x"));
        assert!(snapshot.items(Kind::C).is_empty());
    }

    #[test]
    fn duplicate_item_in_one_section_fails() {
        let err = Snapshot::build([(Kind::A, vec![row(9, "x"), row(9, "x")])]).unwrap_err();
        assert_eq!(
            err,
            ConstructionError::DuplicateItem {
                id: ItemId::new(9),
                first: Kind::A,
                second: Kind::A,
            }
        );
    }

    #[test]
    fn duplicate_item_across_sections_fails() {
        let err = Snapshot::build([(Kind::A, vec![row(1, "x")]), (Kind::B, vec![row(1, "y")])])
            .unwrap_err();
        assert_eq!(
            err,
            ConstructionError::DuplicateItem {
                id: ItemId::new(1),
                first: Kind::A,
                second: Kind::B,
            }
        );
        assert_eq!(alloc::format!("{err}"), "item #1 appears in both A and B");
    }

    #[test]
    fn duplicate_section_fails() {
        let err = Snapshot::build([(Kind::A, vec![row(1, "x")]), (Kind::A, vec![row(2, "y")])])
            .unwrap_err();
        assert_eq!(err, ConstructionError::DuplicateSection { section: Kind::A });
    }

    #[test]
    fn empty_sections_are_allowed() {
        let snapshot = Snapshot::<Kind, Row>::build([(Kind::A, vec![])]).unwrap();
        assert_eq!(snapshot.number_of_sections(), 1);
        assert!(snapshot.sections()[0].is_empty());
        assert!(Snapshot::<Kind, Row>::empty().is_empty());
    }

    #[test]
    fn builder_extends_existing_section() {
        let snapshot = SnapshotBuilder::new()
            .append_section(Kind::A, [row(1, "a")])
            .append_section(Kind::B, [row(2, "b")])
            .append_items(Kind::A, [row(3, "c")])
            .finish()
            .unwrap();
        let ids: Vec<_> = snapshot.sections()[0].ids().collect();
        assert_eq!(ids, vec![ItemId::new(1), ItemId::new(3)]);
    }

    #[test]
    fn builder_default_order_sorts_by_ordinal() {
        let snapshot = SnapshotBuilder::new()
            .append_section(Kind::C, [row(1, "c")])
            .append_section(Kind::A, [row(2, "a")])
            .finish_in_default_order()
            .unwrap();
        assert_eq!(snapshot.kinds().collect::<Vec<_>>(), vec![Kind::A, Kind::C]);
    }

    #[test]
    fn builder_reports_duplicate_section() {
        let err = SnapshotBuilder::new()
            .append_section(Kind::B, [row(1, "a")])
            .append_section(Kind::B, [row(2, "b")])
            .finish()
            .unwrap_err();
        assert_eq!(err, ConstructionError::DuplicateSection { section: Kind::B });
    }
}
