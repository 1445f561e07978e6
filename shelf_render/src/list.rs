// Copyright 2026 the Shelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory list view.

use alloc::vec::Vec;

use shelf_core::backend::Renderer;
use shelf_core::item::{Item, ItemId};
use shelf_core::reconcile::{Changeset, Operation};
use shelf_core::section::{SectionKind, SectionMetadata};
use shelf_core::snapshot::Snapshot;

use crate::error::ApplyError;
use crate::reuse::{CellHandle, ReusePool};

/// A configured cell view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell<I> {
    handle: CellHandle,
    item: I,
    configurations: u32,
}

impl<I> Cell<I> {
    /// The view backing this cell.
    #[inline]
    #[must_use]
    pub fn handle(&self) -> CellHandle {
        self.handle
    }

    /// The item the cell was last configured with.
    #[inline]
    #[must_use]
    pub fn item(&self) -> &I {
        &self.item
    }

    /// How many times the cell was configured: once on insertion, plus once
    /// per reload.
    #[inline]
    #[must_use]
    pub fn configurations(&self) -> u32 {
        self.configurations
    }
}

/// A section of the list: header metadata and cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListSection<S, I> {
    kind: S,
    metadata: SectionMetadata,
    cells: Vec<Cell<I>>,
}

impl<S: Copy, I> ListSection<S, I> {
    /// The section kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> S {
        self.kind
    }

    /// Header metadata received on insertion.
    #[inline]
    #[must_use]
    pub fn metadata(&self) -> SectionMetadata {
        self.metadata
    }

    /// Cells in display order.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[Cell<I>] {
        &self.cells
    }

    /// Number of cells.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the section has no cells.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Counters describing how a [`ListView`] used its cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListStats {
    /// Changesets applied successfully.
    pub changesets: u64,
    /// Cells backed by a newly created handle.
    pub cells_created: u64,
    /// Cells backed by a recycled handle.
    pub cells_reused: u64,
    /// Cells discarded and returned to the pool.
    pub cells_discarded: u64,
    /// Cell configurations, including reloads.
    pub configurations: u64,
}

/// An in-memory list view that applies changesets and validates every
/// operation against its current state.
#[derive(Clone, Debug)]
pub struct ListView<S, I> {
    sections: Vec<ListSection<S, I>>,
    pool: ReusePool,
    stats: ListStats,
}

impl<S, I> Default for ListView<S, I> {
    fn default() -> Self {
        Self {
            sections: Vec::new(),
            pool: ReusePool::new(),
            stats: ListStats::default(),
        }
    }
}

impl<S: SectionKind, I: Item> ListView<S, I> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sections in display order.
    #[must_use]
    pub fn sections(&self) -> &[ListSection<S, I>] {
        &self.sections
    }

    /// Returns the section of the given kind.
    #[must_use]
    pub fn section(&self, kind: S) -> Option<&ListSection<S, I>> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Returns the handle of the cell showing `id`, if any.
    #[must_use]
    pub fn handle_of(&self, id: ItemId) -> Option<CellHandle> {
        self.cell_of(id).map(Cell::handle)
    }

    /// Returns the cell showing `id`, if any.
    #[must_use]
    pub fn cell_of(&self, id: ItemId) -> Option<&Cell<I>> {
        self.sections
            .iter()
            .flat_map(|s| &s.cells)
            .find(|c| c.item.id() == id)
    }

    /// Usage counters.
    #[must_use]
    pub fn stats(&self) -> ListStats {
        self.stats
    }

    /// Number of discarded handles waiting for reuse.
    #[must_use]
    pub fn idle_cells(&self) -> usize {
        self.pool.idle()
    }

    /// Returns `true` if the list shows exactly `snapshot`: same sections in
    /// the same order, each with equal items in the same order.
    #[must_use]
    pub fn matches(&self, snapshot: &Snapshot<S, I>) -> bool {
        self.sections.len() == snapshot.number_of_sections()
            && self
                .sections
                .iter()
                .zip(snapshot.sections())
                .all(|(shown, wanted)| {
                    shown.kind == wanted.kind()
                        && shown.cells.len() == wanted.len()
                        && shown
                            .cells
                            .iter()
                            .zip(wanted.items())
                            .all(|(cell, item)| cell.item == *item)
                })
    }

    /// Applies every operation of `changes` in order.
    ///
    /// # Errors
    ///
    /// Returns the first contract violation. The list is then restored to
    /// its state before the call.
    pub fn apply_changeset(&mut self, changes: &Changeset<S, I>) -> Result<(), ApplyError<S>> {
        let checkpoint = self.clone();
        for op in changes {
            if let Err(err) = self.apply_operation(op) {
                *self = checkpoint;
                return Err(err);
            }
        }
        self.stats.changesets += 1;
        Ok(())
    }

    fn apply_operation(&mut self, op: &Operation<S, I>) -> Result<(), ApplyError<S>> {
        match op {
            Operation::RemoveItem { section, index, id } => {
                let cells = self.cells_mut(*section)?;
                check_identity(*section, cells, *index, *id)?;
                let cell = cells.remove(*index);
                self.pool.release(cell.handle);
                self.stats.cells_discarded += 1;
            }
            Operation::RemoveSection { section, index } => {
                self.check_section_at(*section, *index)?;
                let removed = self.sections.remove(*index);
                for cell in removed.cells {
                    self.pool.release(cell.handle);
                    self.stats.cells_discarded += 1;
                }
            }
            Operation::MoveSection { section, from, to } => {
                self.check_section_at(*section, *from)?;
                let moved = self.sections.remove(*from);
                check_insert_index(None, *to, self.sections.len())?;
                self.sections.insert(*to, moved);
            }
            Operation::MoveItem {
                section,
                id,
                from,
                to,
            } => {
                let cells = self.cells_mut(*section)?;
                check_identity(*section, cells, *from, *id)?;
                let cell = cells.remove(*from);
                check_insert_index(Some(*section), *to, cells.len())?;
                cells.insert(*to, cell);
            }
            Operation::InsertSection {
                section,
                index,
                metadata,
            } => {
                if self.section(*section).is_some() {
                    return Err(ApplyError::DuplicateSection { section: *section });
                }
                check_insert_index(None, *index, self.sections.len())?;
                self.sections.insert(
                    *index,
                    ListSection {
                        kind: *section,
                        metadata: *metadata,
                        cells: Vec::new(),
                    },
                );
            }
            Operation::InsertItem {
                section,
                index,
                item,
            } => {
                let len = self.cells_mut(*section)?.len();
                check_insert_index(Some(*section), *index, len)?;
                let (handle, reused) = self.pool.acquire();
                if reused {
                    self.stats.cells_reused += 1;
                } else {
                    self.stats.cells_created += 1;
                }
                self.stats.configurations += 1;
                self.cells_mut(*section)?.insert(
                    *index,
                    Cell {
                        handle,
                        item: item.clone(),
                        configurations: 1,
                    },
                );
            }
            Operation::ReloadItem {
                section,
                index,
                item,
            } => {
                let cells = self.cells_mut(*section)?;
                check_identity(*section, cells, *index, item.id())?;
                let cell = &mut cells[*index];
                cell.item = item.clone();
                cell.configurations += 1;
                self.stats.configurations += 1;
            }
        }
        Ok(())
    }

    fn cells_mut(&mut self, kind: S) -> Result<&mut Vec<Cell<I>>, ApplyError<S>> {
        self.sections
            .iter_mut()
            .find(|s| s.kind == kind)
            .map(|s| &mut s.cells)
            .ok_or(ApplyError::UnknownSection { section: kind })
    }

    fn check_section_at(&self, kind: S, index: usize) -> Result<(), ApplyError<S>> {
        let Some(found) = self.sections.get(index) else {
            return Err(ApplyError::IndexOutOfRange {
                section: None,
                index,
                len: self.sections.len(),
            });
        };
        if found.kind == kind {
            Ok(())
        } else {
            Err(ApplyError::SectionMismatch {
                expected: kind,
                found: found.kind,
                index,
            })
        }
    }
}

/// Checks that `cells[index]` exists and shows `id`.
fn check_identity<S, I: Item>(
    section: S,
    cells: &[Cell<I>],
    index: usize,
    id: ItemId,
) -> Result<(), ApplyError<S>> {
    let Some(cell) = cells.get(index) else {
        return Err(ApplyError::IndexOutOfRange {
            section: Some(section),
            index,
            len: cells.len(),
        });
    };
    let found = cell.item.id();
    if found == id {
        Ok(())
    } else {
        Err(ApplyError::IdentityMismatch {
            section,
            index,
            expected: id,
            found,
        })
    }
}

/// Checks that `index` is a valid insertion point for a sequence of `len`.
fn check_insert_index<S>(section: Option<S>, index: usize, len: usize) -> Result<(), ApplyError<S>> {
    if index <= len {
        Ok(())
    } else {
        Err(ApplyError::IndexOutOfRange {
            section,
            index,
            len,
        })
    }
}

impl<S: SectionKind, I: Item> Renderer<S, I> for ListView<S, I> {
    type Error = ApplyError<S>;

    fn apply(&mut self, changes: &Changeset<S, I>) -> Result<(), Self::Error> {
        self.apply_changeset(changes)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use alloc::format;

    use shelf_core::app::{AppItem, AppSection, AppSnapshot, Feature, RankingFeature, ThemeFeature};
    use shelf_core::item::ItemIdAllocator;
    use shelf_core::reconcile::{Reconciler, diff};

    use super::*;

    fn themes(items: &[AppItem]) -> AppSnapshot {
        Snapshot::build([(AppSection::ThemeFeature, items.to_vec())]).unwrap()
    }

    fn features(ids: &mut ItemIdAllocator) -> Vec<AppItem> {
        (1..=5)
            .map(|n| Feature::new(ids.allocate(), "지금 이용 가능", format!("앱 {n}"), "").into())
            .collect()
    }

    /// Five highlights followed by six rankings.
    fn listing(ids: &mut ItemIdAllocator) -> AppSnapshot {
        let rankings: Vec<AppItem> = (1..=6)
            .map(|n| RankingFeature::new(ids.allocate(), format!("순위 {n}"), "", false).into())
            .collect();
        Snapshot::build([
            (AppSection::Feature, features(ids)),
            (AppSection::RankingFeature, rankings),
        ])
        .unwrap()
    }

    #[test]
    fn first_load_shows_the_snapshot() {
        let mut ids = ItemIdAllocator::new();
        let snapshot = listing(&mut ids);
        let mut view = ListView::new();
        let mut reconciler = Reconciler::new();

        reconciler.apply_to(snapshot.clone(), &mut view).unwrap();

        assert!(view.matches(&snapshot));
        let ranking = view.section(AppSection::RankingFeature).unwrap();
        assert_eq!(ranking.metadata().header_title, Some("지금 주목해야 할 앱"));
        assert_eq!(view.stats().cells_created, 11);
        assert_eq!(view.stats().changesets, 1);
    }

    #[test]
    fn moves_and_reloads_keep_the_cell() {
        let mut ids = ItemIdAllocator::new();
        let a = AppItem::from(ThemeFeature::new(ids.allocate(), "A"));
        let b = AppItem::from(ThemeFeature::new(ids.allocate(), "B"));
        let c = AppItem::from(ThemeFeature::new(ids.allocate(), "C"));
        let mut view = ListView::new();
        let mut reconciler = Reconciler::new();
        reconciler
            .apply_to(themes(&[a.clone(), b.clone(), c.clone()]), &mut view)
            .unwrap();
        let handle_a = view.handle_of(a.id()).unwrap();

        let mut edited_a = a.clone();
        if let AppItem::ThemeFeature(t) = &mut edited_a {
            t.title = "A!".into();
        }
        let target = themes(&[c, b, edited_a.clone()]);
        reconciler.apply_to(target.clone(), &mut view).unwrap();

        assert!(view.matches(&target));
        let cell = view.cell_of(a.id()).unwrap();
        assert_eq!(cell.handle(), handle_a);
        assert_eq!(cell.item(), &edited_a);
        assert_eq!(cell.configurations(), 2);
        assert_eq!(view.stats().cells_created, 3);
        assert_eq!(view.stats().cells_discarded, 0);
    }

    #[test]
    fn discarded_cells_are_recycled() {
        let mut ids = ItemIdAllocator::new();
        let old = AppItem::from(ThemeFeature::new(ids.allocate(), "old"));
        let new = AppItem::from(ThemeFeature::new(ids.allocate(), "new"));
        let mut view = ListView::new();
        let mut reconciler = Reconciler::new();
        reconciler.apply_to(themes(&[old.clone()]), &mut view).unwrap();
        let recycled = view.handle_of(old.id()).unwrap();

        reconciler.apply_to(themes(&[new.clone()]), &mut view).unwrap();

        assert_eq!(view.handle_of(new.id()), Some(recycled));
        assert_eq!(view.handle_of(old.id()), None);
        assert_eq!(view.stats().cells_reused, 1);
        assert_eq!(view.idle_cells(), 0);
    }

    #[test]
    fn removing_a_section_discards_its_cells() {
        let mut ids = ItemIdAllocator::new();
        let snapshot = listing(&mut ids);
        let features_only: AppSnapshot =
            Snapshot::build([(AppSection::Feature, snapshot.items(AppSection::Feature).to_vec())])
                .unwrap();
        let mut view = ListView::new();
        let mut reconciler = Reconciler::new();
        reconciler.apply_to(snapshot, &mut view).unwrap();

        let summary = reconciler.apply_to(features_only.clone(), &mut view).unwrap();

        assert_eq!(summary.removed_sections, 1);
        assert_eq!(summary.removed_items, 0);
        assert!(view.matches(&features_only));
        assert_eq!(view.idle_cells(), 6);
    }

    #[test]
    fn stale_changeset_is_rejected_atomically() {
        let mut ids = ItemIdAllocator::new();
        let rows: Vec<AppItem> = (0..3)
            .map(|n| RankingFeature::new(ids.allocate(), "row", "", n % 2 == 0).into())
            .collect();
        let shown: AppSnapshot =
            Snapshot::build([(AppSection::RankingFeature, rows[..1].to_vec())]).unwrap();
        let assumed: AppSnapshot =
            Snapshot::build([(AppSection::RankingFeature, rows.clone())]).unwrap();
        let target: AppSnapshot =
            Snapshot::build([(AppSection::RankingFeature, vec![rows[1].clone()])]).unwrap();

        let mut view = ListView::new();
        view.apply_changeset(&diff(None, &shown)).unwrap();
        let before = view.clone();

        // Diffed against a state the view never showed.
        let err = view.apply_changeset(&diff(Some(&assumed), &target)).unwrap_err();

        assert_eq!(
            err,
            ApplyError::IndexOutOfRange {
                section: Some(AppSection::RankingFeature),
                index: 2,
                len: 1,
            }
        );
        assert_eq!(view.sections(), before.sections());
        assert_eq!(view.stats(), before.stats());
        assert!(view.matches(&shown));
    }

    #[test]
    fn unknown_and_duplicate_sections_are_errors() {
        let mut ids = ItemIdAllocator::new();
        let item = AppItem::from(ThemeFeature::new(ids.allocate(), "t"));
        let with_theme = themes(&[item]);
        let mut view = ListView::new();
        view.apply_changeset(&diff(None, &with_theme)).unwrap();

        assert_eq!(
            view.apply_changeset(&diff(None, &with_theme)),
            Err(ApplyError::DuplicateSection {
                section: AppSection::ThemeFeature,
            })
        );

        let feature: AppSnapshot =
            Snapshot::build([(AppSection::Feature, Vec::<AppItem>::new())]).unwrap();
        let other = features(&mut ids);
        let feature_filled: AppSnapshot =
            Snapshot::build([(AppSection::Feature, other)]).unwrap();
        assert_eq!(
            view.apply_changeset(&diff(Some(&feature), &feature_filled)),
            Err(ApplyError::UnknownSection {
                section: AppSection::Feature,
            })
        );
    }
}
