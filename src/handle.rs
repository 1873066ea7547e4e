//! Hit regions of the selection overlay: the eight compass resize handles
//! and the move region, with their cursors and anchor points.

use serde::{Deserialize, Serialize};

use crate::geom::{Point, Rect};

#[cfg(test)]
#[path = "handle_test.rs"]
mod handle_test;

/// Which part of the selection overlay a pointer landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type", content = "handle")]
pub enum HitRegion {
    /// One of the eight resize handles.
    Handle(ResizeHandle),
    /// The central move region.
    Move,
}

/// Compass position of a resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    Nw,
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
}

/// Visual shape of a handle. Purely an affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleShape {
    Square,
    Round,
}

impl ResizeHandle {
    /// All eight handles, clockwise from the top-left corner.
    pub const ALL: [ResizeHandle; 8] = [Self::Nw, Self::N, Self::Ne, Self::E, Self::Se, Self::S, Self::Sw, Self::W];

    /// Drags the top edge.
    #[must_use]
    pub fn affects_top(self) -> bool {
        matches!(self, Self::Nw | Self::N | Self::Ne)
    }

    /// Drags the bottom edge.
    #[must_use]
    pub fn affects_bottom(self) -> bool {
        matches!(self, Self::Sw | Self::S | Self::Se)
    }

    /// Drags the left edge.
    #[must_use]
    pub fn affects_left(self) -> bool {
        matches!(self, Self::Nw | Self::W | Self::Sw)
    }

    /// Drags the right edge.
    #[must_use]
    pub fn affects_right(self) -> bool {
        matches!(self, Self::Ne | Self::E | Self::Se)
    }

    #[must_use]
    pub fn is_corner(self) -> bool {
        matches!(self, Self::Nw | Self::Ne | Self::Se | Self::Sw)
    }

    #[must_use]
    pub fn shape(self) -> HandleShape {
        if self.is_corner() { HandleShape::Square } else { HandleShape::Round }
    }

    /// CSS cursor shown while hovering or dragging this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Nw | Self::Se => "nwse-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
        }
    }

    /// Screen-space center of this handle on the given bounds.
    #[must_use]
    pub fn anchor_point(self, bounds: &Rect) -> Point {
        let x = if self.affects_left() {
            bounds.left
        } else if self.affects_right() {
            bounds.right()
        } else {
            bounds.left + bounds.width * 0.5
        };
        let y = if self.affects_top() {
            bounds.top
        } else if self.affects_bottom() {
            bounds.bottom()
        } else {
            bounds.top + bounds.height * 0.5
        };
        Point::new(x, y)
    }
}
