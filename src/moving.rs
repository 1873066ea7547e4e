//! Move gesture: free translation of a block via the central move region.
//!
//! Movement is deliberately unbounded; a block may be dragged partly or fully
//! off the virtual canvas.

use crate::geom::{Geometry, Point};
use crate::transform::screen_delta_to_virtual;

#[cfg(test)]
#[path = "moving_test.rs"]
mod moving_test;

/// Snapshot captured when a move session starts.
#[derive(Debug, Clone)]
pub struct MoveDrag {
    /// Screen-space pointer position at pointer-down.
    pub pointer_start: Point,
    /// Target geometry at pointer-down, in virtual pixels.
    pub start: Geometry,
}

impl MoveDrag {
    #[must_use]
    pub fn begin(pointer_start: Point, start: Geometry) -> Self {
        Self { pointer_start, start }
    }

    /// Geometry for the pointer at `pointer` under the current `scale`.
    /// Width and height are carried over untouched.
    #[must_use]
    pub fn geometry_at(&self, pointer: Point, scale: f64) -> Geometry {
        let delta = screen_delta_to_virtual(pointer.delta_from(self.pointer_start), scale);
        Geometry { left: self.start.left + delta.dx, top: self.start.top + delta.dy, ..self.start }
    }
}
