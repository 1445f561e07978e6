// Copyright 2026 the Shelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Section kinds and their header metadata.
//!
//! A list is split into sections drawn from a closed, compile-time set of
//! kinds. Each kind has a stable ordinal (its position in
//! [`SectionKind::ALL`]) that defines the default display order, and static
//! [`SectionMetadata`] that renderers use for headers and footers.

use core::fmt;
use core::hash::Hash;

/// Header metadata for a section kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SectionMetadata {
    /// Title shown in the section header, if the section has one.
    pub header_title: Option<&'static str>,
    /// Secondary line shown under the title, if any.
    pub description: Option<&'static str>,
}

impl SectionMetadata {
    /// Metadata for a section without a header.
    pub const NONE: Self = Self {
        header_title: None,
        description: None,
    };

    /// Returns `true` if a header should be rendered for this section.
    #[inline]
    #[must_use]
    pub const fn has_header(&self) -> bool {
        self.header_title.is_some() || self.description.is_some()
    }
}

/// A closed set of section kinds.
///
/// Implemented by plain enums. `ALL` must list every variant exactly once, in
/// default display order, and [`metadata`](Self::metadata) must be a total,
/// side-effect free function (an exhaustive `match`).
pub trait SectionKind: Copy + Eq + Ord + Hash + fmt::Debug + 'static {
    /// Every kind, in default display order.
    const ALL: &'static [Self];

    /// Returns the header metadata for this kind.
    fn metadata(self) -> SectionMetadata;

    /// Returns the stable ordinal of this kind (its index in [`ALL`](Self::ALL)).
    ///
    /// # Panics
    ///
    /// Panics if `ALL` does not contain `self`, which means the implementation
    /// is incomplete.
    fn ordinal(self) -> usize {
        match Self::ALL.iter().position(|kind| *kind == self) {
            Some(ordinal) => ordinal,
            None => panic!("section kind {self:?} missing from SectionKind::ALL"),
        }
    }
}

/// Returns every kind of `S` in default display order.
#[inline]
#[must_use]
pub fn all_kinds<S: SectionKind>() -> &'static [S] {
    S::ALL
}
