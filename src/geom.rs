//! Geometry primitives shared by the engines.
//!
//! `Point` and `Rect` are used in screen space (CSS pixels after the surface
//! transform). `Geometry` is always in virtual slide space. `Delta` carries a
//! pointer displacement in whichever space the caller is working in.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

/// A point in either screen or virtual space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Displacement from `origin` to `self`.
    #[must_use]
    pub fn delta_from(self, origin: Point) -> Delta {
        Delta { dx: self.x - origin.x, dy: self.y - origin.y }
    }
}

/// A displacement between two pointer positions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Delta {
    pub dx: f64,
    pub dy: f64,
}

impl Delta {
    #[must_use]
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// An axis-aligned rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    /// Whether `pt` lies inside the rectangle, edges inclusive.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.left && pt.x <= self.right() && pt.y >= self.top && pt.y <= self.bottom()
    }

    /// Grow the rectangle by `amount` on every side.
    #[must_use]
    pub fn inflate(&self, amount: f64) -> Self {
        Self {
            left: self.left - amount,
            top: self.top - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
        }
    }
}

/// Position and size of a block in virtual slide pixels.
///
/// These four values are written verbatim as the block's inline
/// `left/top/width/height` styles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Right edge (`left + width`).
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge (`top + height`).
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// `width / height`, or `None` when the height is not positive.
    #[must_use]
    pub fn aspect_ratio(&self) -> Option<f64> {
        (self.height > 0.0 && self.width > 0.0).then(|| self.width / self.height)
    }

    /// Derive virtual geometry from a rendered screen rectangle.
    ///
    /// `origin` is the screen position of the containing element's top-left
    /// corner.
    #[must_use]
    pub fn from_screen_rect(rect: Rect, origin: Point, scale: f64) -> Self {
        let scale = crate::transform::sanitize_scale(scale);
        Self {
            left: (rect.left - origin.x) / scale,
            top: (rect.top - origin.y) / scale,
            width: rect.width / scale,
            height: rect.height / scale,
        }
    }

    /// Whether all four values are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.left.is_finite() && self.top.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}
