// Copyright 2026 the Shelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative section layouts.
//!
//! A [`SectionLayout`] describes how one section arranges its items: the size
//! of each item relative to its group, the size of each group relative to the
//! list's visible container, how groups scroll, and which supplementary views
//! (header, footer) bound the section. Layouts are plain values; resolving
//! one against a container [`Size`] yields concrete rectangles.
//!
//! Resolved frames are in section-local coordinates: the origin is the
//! section's top-left corner, the header (if any) occupies the top, and the
//! footer (if any) the bottom. Groups that scroll orthogonally are laid out
//! left to right along one row; otherwise they stack top to bottom.

use alloc::vec::Vec;

use kurbo::{Insets, Point, Rect, Size};

/// One axis of a layout size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Dimension {
    /// A fraction of the same axis of the enclosing container.
    Fractional(f64),
    /// A fixed length in points.
    Absolute(f64),
    /// A length in points that the view may grow or shrink after measuring
    /// its content. Layout uses the estimate.
    Estimated(f64),
}

impl Dimension {
    /// Resolves this dimension against a container length.
    #[inline]
    #[must_use]
    pub fn resolve(self, container: f64) -> f64 {
        match self {
            Self::Fractional(fraction) => fraction * container,
            Self::Absolute(length) | Self::Estimated(length) => length,
        }
    }
}

/// A width and a height, each a [`Dimension`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutSize {
    /// Horizontal dimension.
    pub width: Dimension,
    /// Vertical dimension.
    pub height: Dimension,
}

impl LayoutSize {
    /// Creates a layout size from two dimensions.
    #[must_use]
    pub const fn new(width: Dimension, height: Dimension) -> Self {
        Self { width, height }
    }

    /// Resolves both dimensions against a container size.
    #[must_use]
    pub fn resolve(&self, container: Size) -> Size {
        Size::new(
            self.width.resolve(container.width),
            self.height.resolve(container.height),
        )
    }
}

/// How items are arranged inside a group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupOrientation {
    /// Items side by side, as many as fit the group width.
    Horizontal,
    /// Exactly `count` items stacked top to bottom, splitting the group
    /// height evenly.
    Vertical {
        /// Number of items per group.
        count: usize,
    },
}

/// How a section scrolls perpendicular to the list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollingBehavior {
    /// The section does not scroll on its own; groups stack vertically.
    #[default]
    None,
    /// Groups form one horizontal row that pages group by group, starting
    /// at the leading edge.
    GroupPaging,
    /// Like [`GroupPaging`](Self::GroupPaging), with each page centered in
    /// the container.
    GroupPagingCentered,
}

impl ScrollingBehavior {
    /// Returns `true` if groups are laid out in one horizontal row.
    #[inline]
    #[must_use]
    pub const fn is_orthogonal(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Layout of one section.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionLayout {
    /// Item size, relative to the group.
    pub item_size: LayoutSize,
    /// Insets applied to each item's content inside its slot.
    pub item_insets: Insets,
    /// Group size, relative to the container.
    pub group_size: LayoutSize,
    /// Arrangement of items in a group.
    pub orientation: GroupOrientation,
    /// Orthogonal scrolling behavior.
    pub scrolling: ScrollingBehavior,
    /// Header size, if the section has a header.
    pub header: Option<LayoutSize>,
    /// Footer size, if the section has a footer.
    pub footer: Option<LayoutSize>,
}

impl SectionLayout {
    /// Resolves the group rectangle size for a container.
    #[must_use]
    pub fn group_frame(&self, container: Size) -> Size {
        self.group_size.resolve(container)
    }

    /// Returns how many items one group holds in a container.
    #[must_use]
    pub fn items_per_group(&self, container: Size) -> usize {
        match self.orientation {
            GroupOrientation::Vertical { count } => count.max(1),
            GroupOrientation::Horizontal => {
                let group = self.group_frame(container);
                let item = self.item_size.resolve(group);
                if item.width <= 0.0 {
                    return 1;
                }
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "truncating a positive ratio floors it"
                )]
                let fit = (group.width / item.width + 1e-9) as usize;
                fit.max(1)
            }
        }
    }

    /// Resolves the header height (0 without a header).
    #[must_use]
    pub fn header_height(&self, container: Size) -> f64 {
        self.header
            .map_or(0.0, |header| header.resolve(container).height)
    }

    /// Resolves the footer height (0 without a footer).
    #[must_use]
    pub fn footer_height(&self, container: Size) -> f64 {
        self.footer
            .map_or(0.0, |footer| footer.resolve(container).height)
    }

    /// Returns the total section height for `count` items.
    #[must_use]
    pub fn section_height(&self, container: Size, count: usize) -> f64 {
        let group = self.group_frame(container);
        let rows = if count == 0 {
            0
        } else if self.scrolling.is_orthogonal() {
            1
        } else {
            count.div_ceil(self.items_per_group(container))
        };
        self.header_height(container) + group.height * rows as f64 + self.footer_height(container)
    }

    /// Resolves content frames for `count` items, in item order.
    ///
    /// Each frame is the item's slot shrunk by [`item_insets`](Self::item_insets).
    #[must_use]
    pub fn item_frames(&self, container: Size, count: usize) -> Vec<Rect> {
        let group = self.group_frame(container);
        let slot = match self.orientation {
            GroupOrientation::Horizontal => self.item_size.resolve(group),
            GroupOrientation::Vertical { count } => {
                let width = self.item_size.width.resolve(group.width);
                Size::new(width, group.height / count.max(1) as f64)
            }
        };
        let per_group = self.items_per_group(container);
        let top = self.header_height(container);
        let leading = match self.scrolling {
            ScrollingBehavior::GroupPagingCentered => (container.width - group.width) / 2.0,
            ScrollingBehavior::None | ScrollingBehavior::GroupPaging => 0.0,
        };

        (0..count)
            .map(|index| {
                let group_index = (index / per_group) as f64;
                let within = (index % per_group) as f64;
                let group_origin = if self.scrolling.is_orthogonal() {
                    Point::new(leading + group_index * group.width, top)
                } else {
                    Point::new(leading, top + group_index * group.height)
                };
                let origin = match self.orientation {
                    GroupOrientation::Horizontal => {
                        Point::new(group_origin.x + within * slot.width, group_origin.y)
                    }
                    GroupOrientation::Vertical { .. } => {
                        Point::new(group_origin.x, group_origin.y + within * slot.height)
                    }
                };
                shrink(Rect::from_origin_size(origin, slot), self.item_insets)
            })
            .collect()
    }
}

/// Shrinks `rect` by `insets` on each side.
fn shrink(rect: Rect, insets: Insets) -> Rect {
    Rect::new(
        rect.x0 + insets.x0,
        rect.y0 + insets.y0,
        rect.x1 - insets.x1,
        rect.y1 - insets.y1,
    )
}
