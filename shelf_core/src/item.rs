// Copyright 2026 the Shelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item identity.
//!
//! Every item carries an explicit [`ItemId`] that names its slot across
//! snapshots. The id is never derived from content: editing an item's fields
//! keeps its id, which is what lets the reconciler tell a reload apart from a
//! removal followed by an insertion.

use core::fmt;

/// Identity token for an item.
///
/// Two items are the *same item* iff their ids are equal, regardless of
/// content.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u64);

impl ItemId {
    /// Creates an id from a raw value.
    ///
    /// Useful for ids that come from an external data source. Ids produced by
    /// an [`ItemIdAllocator`] never collide with each other, but may collide
    /// with raw ids created here.
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value (for diagnostics and serialization).
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out fresh, never repeating [`ItemId`]s.
#[derive(Clone, Debug, Default)]
pub struct ItemIdAllocator {
    next: u64,
}

impl ItemIdAllocator {
    /// Creates an allocator whose first id is `ItemId(0)`.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Creates an allocator whose first id is `ItemId(first)`.
    #[must_use]
    pub const fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    /// Returns a fresh id.
    ///
    /// # Panics
    ///
    /// Panics if the id space is exhausted.
    pub fn allocate(&mut self) -> ItemId {
        let id = ItemId(self.next);
        let Some(next) = self.next.checked_add(1) else {
            panic!("ItemId space exhausted");
        };
        self.next = next;
        id
    }
}

/// A value that can be placed in a [`Snapshot`](crate::snapshot::Snapshot).
///
/// `PartialEq` must compare content: the reconciler only compares items whose
/// ids already match, and reports a reload when they are unequal.
pub trait Item: Clone + PartialEq {
    /// Returns this item's identity token.
    fn id(&self) -> ItemId;
}
