// Copyright 2026 the Shelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for reconciliation applied to a [`ListView`].
//!
//! Snapshots are generated from a fixed pool of ids. Each id lands in one of
//! the three app sections or is left out, gets one of a few titles, and a
//! random sort key that fixes its position. Section order is a random
//! permutation and each section may be absent.

use std::collections::BTreeMap;

use proptest::prelude::*;
use shelf_core::app::{AppItem, AppSection, AppSnapshot, ThemeFeature};
use shelf_core::item::{Item, ItemId};
use shelf_core::reconcile::{Operation, OperationKind, diff};
use shelf_core::section::SectionKind;
use shelf_core::snapshot::Snapshot;
use shelf_render::ListView;

const POOL: u64 = 12;
const TITLES: [&str; 3] = ["필수 금융 앱 10", "필수 사진 앱 10", "edited"];

fn arb_snapshot() -> impl Strategy<Value = AppSnapshot> {
    (
        proptest::collection::vec((0..4_usize, 0..3_usize, any::<u16>()), POOL as usize),
        Just(AppSection::ALL.to_vec()).prop_shuffle(),
        proptest::collection::vec(any::<bool>(), 3),
    )
        .prop_map(|(placements, order, present)| {
            let sections = order
                .into_iter()
                .filter(|kind| present[kind.ordinal()])
                .map(|kind| {
                    let mut entries: Vec<(u16, u64, usize)> = placements
                        .iter()
                        .zip(0..POOL)
                        .filter(|((slot, _, _), _)| *slot == kind.ordinal())
                        .map(|((_, title, key), id)| (*key, id, *title))
                        .collect();
                    entries.sort_unstable();
                    let items: Vec<AppItem> = entries
                        .into_iter()
                        .map(|(_, id, title)| ThemeFeature::new(ItemId::new(id), TITLES[title]).into())
                        .collect();
                    (kind, items)
                });
            Snapshot::build(sections).expect("generated ids are unique")
        })
}

/// Maps each id to the section holding it.
fn homes(snapshot: &AppSnapshot) -> BTreeMap<ItemId, AppSection> {
    snapshot
        .sections()
        .iter()
        .flat_map(|s| s.items().iter().map(move |item| (item.id(), s.kind())))
        .collect()
}

fn shown(snapshot: &AppSnapshot) -> ListView<AppSection, AppItem> {
    let mut view = ListView::new();
    view.apply_changeset(&diff(None, snapshot))
        .expect("first load applies to an empty view");
    view
}

proptest! {
    /// Property: diffing a snapshot against itself is empty
    #[test]
    fn prop_self_diff_is_empty(s in arb_snapshot()) {
        prop_assert!(diff(Some(&s), &s).is_empty());
    }

    /// Property: a first load reproduces the snapshot in order
    #[test]
    fn prop_first_load_preserves_order(s in arb_snapshot()) {
        let view = shown(&s);
        prop_assert!(view.matches(&s));
        let changes = diff(None, &s);
        prop_assert_eq!(changes.count(OperationKind::InsertSection), s.number_of_sections());
        prop_assert_eq!(changes.count(OperationKind::InsertItem), s.number_of_items());
    }

    /// Property: applying diff(old, new) to a view of old yields a view of new
    #[test]
    fn prop_changeset_is_complete(old in arb_snapshot(), new in arb_snapshot()) {
        let mut view = shown(&old);
        let changes = diff(Some(&old), &new);
        prop_assert!(view.apply_changeset(&changes).is_ok(), "changeset must apply cleanly");
        prop_assert!(view.matches(&new), "view must show the new snapshot");
    }

    /// Property: items that stay in their section keep their cell
    #[test]
    fn prop_identity_is_stable(old in arb_snapshot(), new in arb_snapshot()) {
        let old_homes = homes(&old);
        let new_homes = homes(&new);
        let staying: Vec<ItemId> = new_homes
            .iter()
            .filter(|&(id, kind)| old_homes.get(id) == Some(kind))
            .map(|(id, _)| *id)
            .collect();

        let changes = diff(Some(&old), &new);
        for op in &changes {
            if matches!(op, Operation::RemoveItem { .. } | Operation::InsertItem { .. }) {
                let id = op.item_id().expect("item operation carries an id");
                prop_assert!(!staying.contains(&id), "{id} was recreated");
            }
        }

        let mut view = shown(&old);
        let before: Vec<_> = staying.iter().map(|id| view.handle_of(*id)).collect();
        view.apply_changeset(&changes).expect("changeset applies");
        let after: Vec<_> = staying.iter().map(|id| view.handle_of(*id)).collect();
        prop_assert_eq!(before, after);
    }

    /// Property: removals and insertions touch exactly the ids that left or
    /// arrived in each section
    #[test]
    fn prop_counts_are_minimal(old in arb_snapshot(), new in arb_snapshot()) {
        let old_homes = homes(&old);
        let new_homes = homes(&new);
        let surviving_section = |kind: &AppSection| {
            old.section(*kind).is_some() && new.section(*kind).is_some()
        };

        let expected_removed = old_homes
            .iter()
            .filter(|&(id, kind)| surviving_section(kind) && new_homes.get(id) != Some(kind))
            .count();
        let expected_inserted = new_homes
            .iter()
            .filter(|&(id, kind)| old_homes.get(id) != Some(kind) || !surviving_section(kind))
            .count();

        let changes = diff(Some(&old), &new);
        prop_assert_eq!(changes.count(OperationKind::RemoveItem), expected_removed);
        prop_assert_eq!(changes.count(OperationKind::InsertItem), expected_inserted);
    }
}
