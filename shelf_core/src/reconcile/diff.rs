// Copyright 2026 the Shelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapshot diffing.
//!
//! [`diff`] compares two snapshots and emits operations in an order that can
//! be applied one by one to a live list:
//!
//! 1. **Item removals**: for every section present in both snapshots, ids
//!    missing from the new section are removed, highest index first.
//! 2. **Section removals**: kinds missing from the new snapshot, highest
//!    index first. Their items are not removed individually.
//! 3. **Insertions**: walking the new snapshot in order, an `InsertSection`
//!    for each new kind, then the section's new items as `InsertItem`s in
//!    ascending final index.
//! 4. **Moves**: surviving sections, then the surviving items of each
//!    section, are moved straight to their final index.
//! 5. **Reloads**: surviving items whose content changed, at their final
//!    index.
//!
//! Inserting at ascending final indices leaves every new entry at its final
//! index, with the surviving entries filling the remaining slots in their old
//! order. Moves then only reposition survivors.
//!
//! Moves are settled in two sweeps. First, survivors that have to pass a new
//! entry towards the front are moved to their final index, lowest first.
//! These moves only shift entries towards the back, so every new entry stays
//! at or behind its final index. Then target positions are settled from the
//! tail: walking from last to first, whenever the wrong key occupies a
//! position the wanted key (which must sit earlier) is pulled into it.
//! Positions above the one being settled are never touched again. After the
//! first sweep no survivor sits behind a new entry it should precede, so
//! whenever the tail reaches a new entry's position that entry is already
//! there.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use super::ops::{Changeset, Operation};
use crate::item::{Item, ItemId};
use crate::section::SectionKind;
use crate::snapshot::{Section, Snapshot};

/// Computes the operations that turn `old` into `new`.
///
/// `None` stands for "nothing rendered yet" and yields only insertions, in
/// snapshot order. Diffing a snapshot against an equal one yields an empty
/// changeset.
///
/// Every `MoveSection` and `MoveItem` carries the final index in the new
/// snapshot as `to`. An item that is both moved and edited produces a
/// `MoveItem` followed (later in the changeset) by a `ReloadItem` at its
/// final index. An item that changes section is removed from the old section
/// and inserted into the new one.
#[must_use]
pub fn diff<S: SectionKind, I: Item>(
    old: Option<&Snapshot<S, I>>,
    new: &Snapshot<S, I>,
) -> Changeset<S, I> {
    let empty = Snapshot::empty();
    let old = old.unwrap_or(&empty);
    let mut ops = Vec::new();

    // Pass 1: item removals inside surviving sections.
    for new_section in new.sections() {
        let Some(old_section) = old.section(new_section.kind()) else {
            continue;
        };
        let kept: BTreeSet<ItemId> = new_section.ids().collect();
        for (index, item) in old_section.items().iter().enumerate().rev() {
            if !kept.contains(&item.id()) {
                ops.push(Operation::RemoveItem {
                    section: new_section.kind(),
                    index,
                    id: item.id(),
                });
            }
        }
    }

    // Pass 2: section removals.
    for (index, old_section) in old.sections().iter().enumerate().rev() {
        if new.section(old_section.kind()).is_none() {
            ops.push(Operation::RemoveSection {
                section: old_section.kind(),
                index,
            });
        }
    }

    // Pass 3: insertions, section by section in new order.
    for (section_index, new_section) in new.sections().iter().enumerate() {
        let kind = new_section.kind();
        let old_section = old.section(kind);
        if old_section.is_none() {
            ops.push(Operation::InsertSection {
                section: kind,
                index: section_index,
                metadata: kind.metadata(),
            });
        }
        for (index, item) in new_section.items().iter().enumerate() {
            if old_section.is_none_or(|s| s.position(item.id()).is_none()) {
                ops.push(Operation::InsertItem {
                    section: kind,
                    index,
                    item: item.clone(),
                });
            }
        }
    }

    // Pass 4: section moves, then item moves inside surviving sections.
    let inserted = |kind: S| old.section(kind).is_none();
    let (current, target) = after_insertion(
        old.kinds().filter(|kind| new.section(*kind).is_some()),
        new.kinds(),
        inserted,
    );
    for (section, from, to) in settle_moves(current, &target, inserted) {
        ops.push(Operation::MoveSection { section, from, to });
    }
    for new_section in new.sections() {
        let Some(old_section) = old.section(new_section.kind()) else {
            continue;
        };
        let (current, target) = surviving_ids(old_section, new_section);
        let inserted = |id: ItemId| old_section.position(id).is_none();
        for (id, from, to) in settle_moves(current, &target, inserted) {
            ops.push(Operation::MoveItem {
                section: new_section.kind(),
                id,
                from,
                to,
            });
        }
    }

    // Pass 5: reloads at final indices.
    for new_section in new.sections() {
        let Some(old_section) = old.section(new_section.kind()) else {
            continue;
        };
        let previous: BTreeMap<ItemId, &I> = old_section
            .items()
            .iter()
            .map(|item| (item.id(), item))
            .collect();
        for (index, item) in new_section.items().iter().enumerate() {
            if previous.get(&item.id()).is_some_and(|prev| *prev != item) {
                ops.push(Operation::ReloadItem {
                    section: new_section.kind(),
                    index,
                    item: item.clone(),
                });
            }
        }
    }

    Changeset::from_operations(ops)
}

/// Returns the ids of `new` as they sit after pass 3 (survivors in old
/// order, inserted ids at their final index) and in new order.
fn surviving_ids<S: SectionKind, I: Item>(
    old: &Section<S, I>,
    new: &Section<S, I>,
) -> (Vec<ItemId>, Vec<ItemId>) {
    let new_ids: BTreeSet<ItemId> = new.ids().collect();
    after_insertion(
        old.ids().filter(|id| new_ids.contains(id)),
        new.ids(),
        |id| old.position(id).is_none(),
    )
}

/// Lays out `survivors` with every inserted key of `target` placed at its
/// final index, and returns that sequence alongside `target`.
fn after_insertion<K: Copy>(
    survivors: impl Iterator<Item = K>,
    target: impl Iterator<Item = K>,
    inserted: impl Fn(K) -> bool,
) -> (Vec<K>, Vec<K>) {
    let mut current: Vec<K> = survivors.collect();
    let target: Vec<K> = target.collect();
    for (index, key) in target.iter().enumerate() {
        if inserted(*key) {
            current.insert(index, *key);
        }
    }
    (current, target)
}

/// Returns `(key, from, to)` moves that permute `current` into `target`
/// when applied in order as remove-at-`from`, insert-at-`to`. Every `to` is
/// the key's index in `target`.
///
/// Both sequences must hold the same distinct keys, and every key for which
/// `inserted` holds must already sit at its index in `target`. Those keys
/// are never moved.
fn settle_moves<K: Copy + Eq>(
    mut current: Vec<K>,
    target: &[K],
    inserted: impl Fn(K) -> bool,
) -> Vec<(K, usize, usize)> {
    debug_assert_eq!(
        current.len(),
        target.len(),
        "move settling needs equal key sets"
    );
    let inserted_before =
        |keys: &[K], index: usize| keys[..index].iter().filter(|key| inserted(**key)).count();
    let mut moves = Vec::new();

    let sinking: Vec<(usize, K)> = target
        .iter()
        .enumerate()
        .filter(|&(to, key)| {
            !inserted(*key)
                && inserted_before(&current, index_of(&current, *key))
                    > inserted_before(target, to)
        })
        .map(|(to, key)| (to, *key))
        .collect();
    for (to, key) in sinking {
        let from = index_of(&current, key);
        current.remove(from);
        current.insert(to, key);
        moves.push((key, from, to));
    }

    for to in (0..target.len()).rev() {
        let wanted = target[to];
        if current[to] == wanted {
            continue;
        }
        debug_assert!(!inserted(wanted), "inserted keys never move");
        let Some(from) = current[..to].iter().position(|key| *key == wanted) else {
            unreachable!("unsettled key must sit below the settled tail");
        };
        let key = current.remove(from);
        current.insert(to, key);
        moves.push((key, from, to));
    }
    moves
}

fn index_of<K: Copy + Eq>(keys: &[K], key: K) -> usize {
    let Some(index) = keys.iter().position(|k| *k == key) else {
        unreachable!("settled keys are a permutation of each other");
    };
    index
}
