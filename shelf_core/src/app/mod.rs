// Copyright 2026 the Shelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The app-store listing.
//!
//! Three section kinds, each with its own item type and layout:
//!
//! | Section          | Header                                       | Layout                      |
//! |------------------|----------------------------------------------|-----------------------------|
//! | `Feature`        | none                                         | centered paging carousel    |
//! | `RankingFeature` | "지금 주목해야 할 앱" / "새로 나온 앱과 업데이트" | pages of three stacked rows |
//! | `ThemeFeature`   | "테마별 필수 앱"                               | paging carousel             |
//!
//! Items carry their [`ItemId`] explicitly; two entries with the same text
//! are still distinct items.

use alloc::string::String;

use kurbo::Insets;

use crate::item::{Item, ItemId};
use crate::layout::{Dimension, GroupOrientation, LayoutSize, ScrollingBehavior, SectionLayout};
use crate::section::{SectionKind, SectionMetadata};
use crate::snapshot::Snapshot;

/// A snapshot of the app-store listing.
pub type AppSnapshot = Snapshot<AppSection, AppItem>;

/// Section kinds of the app-store listing, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AppSection {
    /// Editorial highlights.
    Feature,
    /// Ranked list of trending apps.
    RankingFeature,
    /// Themed collections.
    ThemeFeature,
}

impl SectionKind for AppSection {
    const ALL: &'static [Self] = &[Self::Feature, Self::RankingFeature, Self::ThemeFeature];

    fn metadata(self) -> SectionMetadata {
        match self {
            Self::Feature => SectionMetadata::NONE,
            Self::RankingFeature => SectionMetadata {
                header_title: Some("지금 주목해야 할 앱"),
                description: Some("새로 나온 앱과 업데이트"),
            },
            Self::ThemeFeature => SectionMetadata {
                header_title: Some("테마별 필수 앱"),
                description: None,
            },
        }
    }
}

const ITEM_INSETS: Insets = Insets::new(8.0, 12.0, 8.0, 12.0);

const FOOTER: LayoutSize = LayoutSize::new(Dimension::Fractional(1.0), Dimension::Absolute(1.0));

const HEADER: LayoutSize =
    LayoutSize::new(Dimension::Fractional(1.0), Dimension::Estimated(50.0));

impl AppSection {
    /// Returns the layout of this section.
    #[must_use]
    pub const fn layout(self) -> SectionLayout {
        let full_item = LayoutSize::new(Dimension::Fractional(1.0), Dimension::Fractional(1.0));
        match self {
            Self::Feature => SectionLayout {
                item_size: full_item,
                item_insets: ITEM_INSETS,
                group_size: LayoutSize::new(
                    Dimension::Fractional(0.9),
                    Dimension::Fractional(0.3),
                ),
                orientation: GroupOrientation::Horizontal,
                scrolling: ScrollingBehavior::GroupPagingCentered,
                header: None,
                footer: Some(FOOTER),
            },
            Self::RankingFeature => SectionLayout {
                item_size: full_item,
                item_insets: ITEM_INSETS,
                group_size: LayoutSize::new(
                    Dimension::Fractional(0.9),
                    Dimension::Fractional(1.0 / 3.0),
                ),
                orientation: GroupOrientation::Vertical { count: 3 },
                scrolling: ScrollingBehavior::GroupPagingCentered,
                header: Some(HEADER),
                footer: Some(FOOTER),
            },
            Self::ThemeFeature => SectionLayout {
                item_size: LayoutSize::new(
                    Dimension::Fractional(0.7),
                    Dimension::Fractional(1.0),
                ),
                item_insets: ITEM_INSETS,
                group_size: LayoutSize::new(
                    Dimension::Fractional(0.9),
                    Dimension::Fractional(0.3),
                ),
                orientation: GroupOrientation::Horizontal,
                scrolling: ScrollingBehavior::GroupPaging,
                header: None,
                footer: None,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// An editorial highlight card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feature {
    /// Identity.
    pub id: ItemId,
    /// Short label above the title, such as an availability note.
    pub kind_label: String,
    /// App or service name.
    pub title: String,
    /// Headline of the highlighted content.
    pub description: String,
}

impl Feature {
    /// Creates a feature card.
    #[must_use]
    pub fn new(
        id: ItemId,
        kind_label: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind_label: kind_label.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}

/// A row in the ranking list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankingFeature {
    /// Identity.
    pub id: ItemId,
    /// App name.
    pub title: String,
    /// One-line pitch.
    pub description: String,
    /// Whether the app offers in-app purchases.
    pub in_app_purchase: bool,
}

impl RankingFeature {
    /// Creates a ranking row.
    #[must_use]
    pub fn new(
        id: ItemId,
        title: impl Into<String>,
        description: impl Into<String>,
        in_app_purchase: bool,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            in_app_purchase,
        }
    }
}

/// A themed collection tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeFeature {
    /// Identity.
    pub id: ItemId,
    /// Collection name.
    pub title: String,
}

impl ThemeFeature {
    /// Creates a theme tile.
    #[must_use]
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// Any item of the app-store listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppItem {
    /// See [`Feature`].
    Feature(Feature),
    /// See [`RankingFeature`].
    RankingFeature(RankingFeature),
    /// See [`ThemeFeature`].
    ThemeFeature(ThemeFeature),
}

impl AppItem {
    /// Returns the section this kind of item is displayed in.
    #[must_use]
    pub fn home_section(&self) -> AppSection {
        match self {
            Self::Feature(_) => AppSection::Feature,
            Self::RankingFeature(_) => AppSection::RankingFeature,
            Self::ThemeFeature(_) => AppSection::ThemeFeature,
        }
    }

    /// Returns the item's main title.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Feature(f) => &f.title,
            Self::RankingFeature(f) => &f.title,
            Self::ThemeFeature(f) => &f.title,
        }
    }
}

impl Item for AppItem {
    fn id(&self) -> ItemId {
        match self {
            Self::Feature(f) => f.id,
            Self::RankingFeature(f) => f.id,
            Self::ThemeFeature(f) => f.id,
        }
    }
}

impl From<Feature> for AppItem {
    fn from(f: Feature) -> Self {
        Self::Feature(f)
    }
}

impl From<RankingFeature> for AppItem {
    fn from(f: RankingFeature) -> Self {
        Self::RankingFeature(f)
    }
}

impl From<ThemeFeature> for AppItem {
    fn from(f: ThemeFeature) -> Self {
        Self::ThemeFeature(f)
    }
}
