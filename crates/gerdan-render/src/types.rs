//! Basic geometry types for page drawing.
//!
//! All coordinates are in print units (points) with the origin at the top
//! left corner of the page and `y` growing downwards.

use serde::{Deserialize, Serialize};

pub use gerdan_core::Color;

/// A position on the page.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Position at `x`, `y` from the top left corner of the page.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Top left corner of the page.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

/// Extent of a page, bead or canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Extent of `width` by `height` points.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// No extent at all.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Whether nothing can be drawn inside this extent.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// An axis-aligned area of the page: a bead cell, swatch or canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Area with its top left corner at `x`, `y`.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// `x` of the left edge.
    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    /// `y` of the top edge.
    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    /// `x` of the right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    /// `y` of the bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Horizontal extent.
    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    /// Vertical extent.
    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Shrink the rectangle by `amount` on the right and bottom edges.
    ///
    /// Beads are drawn this way so that neighbouring outlines do not overlap.
    #[inline]
    pub fn inset_trailing(&self, amount: f32) -> Self {
        Self::new(
            self.origin.x,
            self.origin.y,
            (self.size.width - amount).max(0.0),
            (self.size.height - amount).max(0.0),
        )
    }

    /// This rectangle cut down to `bounds`.
    ///
    /// Returned unchanged when it already lies inside `bounds`; `None` when
    /// nothing of it is left.
    pub fn clip_to(&self, bounds: &Rect) -> Option<Rect> {
        let inside = self.left() >= bounds.left()
            && self.top() >= bounds.top()
            && self.right() <= bounds.right()
            && self.bottom() <= bounds.bottom();
        if inside { Some(*self) } else { self.intersect(bounds) }
    }

    /// Intersection of two rectangles, if they overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        (right > left && bottom > top).then(|| Rect::new(left, top, right - left, bottom - top))
    }
}
