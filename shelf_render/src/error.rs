// Copyright 2026 the Shelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use shelf_core::item::ItemId;

/// A changeset operation that does not fit the list's current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyError<S> {
    /// An operation named a section that is not in the list.
    UnknownSection {
        /// The missing kind.
        section: S,
    },
    /// A section operation's index points at a different section.
    SectionMismatch {
        /// Kind named by the operation.
        expected: S,
        /// Kind found at the index.
        found: S,
        /// The index.
        index: usize,
    },
    /// A section was inserted while already present.
    DuplicateSection {
        /// The repeated kind.
        section: S,
    },
    /// An index is beyond the end of a section (or of the section list, if
    /// `section` is `None`).
    IndexOutOfRange {
        /// Section holding the entries, `None` for section indices.
        section: Option<S>,
        /// The offending index.
        index: usize,
        /// Length at the time of the operation.
        len: usize,
    },
    /// An item operation's index points at a different item.
    IdentityMismatch {
        /// Section holding the entry.
        section: S,
        /// The index.
        index: usize,
        /// Identity named by the operation.
        expected: ItemId,
        /// Identity found at the index.
        found: ItemId,
    },
}

impl<S: fmt::Debug> fmt::Display for ApplyError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSection { section } => write!(f, "section {section:?} is not in the list"),
            Self::SectionMismatch {
                expected,
                found,
                index,
            } => write!(
                f,
                "expected section {expected:?} at index {index}, found {found:?}"
            ),
            Self::DuplicateSection { section } => {
                write!(f, "section {section:?} is already in the list")
            }
            Self::IndexOutOfRange {
                section: Some(section),
                index,
                len,
            } => write!(
                f,
                "index {index} out of range for section {section:?} of length {len}"
            ),
            Self::IndexOutOfRange {
                section: None,
                index,
                len,
            } => write!(f, "section index {index} out of range for {len} sections"),
            Self::IdentityMismatch {
                section,
                index,
                expected,
                found,
            } => write!(
                f,
                "expected item {expected} at {section:?}[{index}], found {found}"
            ),
        }
    }
}

impl<S: fmt::Debug> core::error::Error for ApplyError<S> {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn display_names_the_location() {
        let err = ApplyError::IdentityMismatch {
            section: "Ranking",
            index: 2,
            expected: ItemId::new(4),
            found: ItemId::new(9),
        };
        assert_eq!(err.to_string(), "expected item #4 at \"Ranking\"[2], found #9");

        let err: ApplyError<u8> = ApplyError::IndexOutOfRange {
            section: None,
            index: 3,
            len: 2,
        };
        assert_eq!(err.to_string(), "section index 3 out of range for 2 sections");
    }
}
