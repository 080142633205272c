// SPDX-License-Identifier: GPL-3.0-only

//! Pixel geometry shared by the preview popup and its overlays.
//!
//! Screen coordinates are whole pixels. Positions may be negative when a
//! preview hangs off the left or top edge of its parent view.

use serde::{Deserialize, Serialize};

/// A point in pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Creates a new point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this point translated by `other`.
    #[must_use]
    pub const fn offset(self, other: Point) -> Self {
        Self::new(self.x.saturating_add(other.x), self.y.saturating_add(other.y))
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Creates a new size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Component-wise maximum of two sizes.
    #[must_use]
    pub fn max(self, other: Size) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Grows this size by the horizontal and vertical totals of `insets`.
    #[must_use]
    pub fn expand(self, insets: Insets) -> Self {
        Self::new(
            self.width.saturating_add(insets.horizontal()),
            self.height.saturating_add(insets.vertical()),
        )
    }
}

/// Padding on each side of a box, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insets {
    #[serde(default)]
    pub left: i32,
    #[serde(default)]
    pub top: i32,
    #[serde(default)]
    pub right: i32,
    #[serde(default)]
    pub bottom: i32,
}

impl Insets {
    /// Creates insets from explicit side values.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Same padding on every side.
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Left plus right.
    pub const fn horizontal(&self) -> i32 {
        self.left.saturating_add(self.right)
    }

    /// Top plus bottom.
    pub const fn vertical(&self) -> i32 {
        self.top.saturating_add(self.bottom)
    }
}

impl std::ops::Add for Insets {
    type Output = Insets;

    fn add(self, rhs: Insets) -> Insets {
        Insets::new(
            self.left.saturating_add(rhs.left),
            self.top.saturating_add(rhs.top),
            self.right.saturating_add(rhs.right),
            self.bottom.saturating_add(rhs.bottom),
        )
    }
}

/// Screen frame of a popup: top-left corner plus size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Frame {
    pub origin: Point,
    pub size: Size,
}

impl Frame {
    /// Creates a new frame.
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Places a frame of `size` centered horizontally on `anchor`, with its
    /// bottom edge resting on the anchor.
    pub fn above(anchor: Point, size: Size) -> Self {
        Self::new(
            Point::new(
                anchor.x.saturating_sub(size.width / 2),
                anchor.y.saturating_sub(size.height),
            ),
            size,
        )
    }

    /// Returns the center X coordinate.
    pub fn center_x(&self) -> i32 {
        self.origin.x.saturating_add(self.size.width / 2)
    }

    /// Returns the bottom edge Y coordinate.
    pub fn bottom(&self) -> i32 {
        self.origin.y.saturating_add(self.size.height)
    }
}
