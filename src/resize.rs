//! Resize gesture: eight-handle edge math with minimum clamps and aspect lock.
//!
//! The drag snapshot is taken once at pointer-down; every tick recomputes the
//! geometry from that snapshot and the total pointer displacement, so the
//! result never accumulates rounding drift and is independent of how many
//! move events arrived.

use crate::config::MinSize;
use crate::geom::{Delta, Geometry, Point};
use crate::handle::ResizeHandle;
use crate::transform::screen_delta_to_virtual;

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

/// Snapshot captured when a resize session starts.
#[derive(Debug, Clone)]
pub struct ResizeDrag {
    /// Handle being dragged.
    pub handle: ResizeHandle,
    /// Screen-space pointer position at pointer-down.
    pub pointer_start: Point,
    /// Target geometry at pointer-down, in virtual pixels.
    pub start: Geometry,
    /// `width / height` at pointer-down, if the start size is non-degenerate.
    pub aspect: Option<f64>,
    /// Minimum size for this target.
    pub min: MinSize,
}

impl ResizeDrag {
    #[must_use]
    pub fn begin(handle: ResizeHandle, pointer_start: Point, start: Geometry, min: MinSize) -> Self {
        Self { handle, pointer_start, start, aspect: start.aspect_ratio(), min }
    }

    /// Geometry for the pointer at `pointer` under the current `scale`.
    #[must_use]
    pub fn geometry_at(&self, pointer: Point, scale: f64, lock_aspect: bool) -> Geometry {
        let delta = screen_delta_to_virtual(pointer.delta_from(self.pointer_start), scale);
        let aspect = if lock_aspect { self.aspect } else { None };
        resize_geometry(self.handle, self.start, delta, self.min, aspect)
    }
}

/// Compute resized geometry for `handle` dragged by a virtual `delta`.
///
/// Edges opposite the dragged ones stay anchored. Width and height never drop
/// below `min`. With `aspect` set, corner handles derive height from width
/// using that ratio; edge handles ignore it.
#[must_use]
pub fn resize_geometry(
    handle: ResizeHandle,
    start: Geometry,
    delta: Delta,
    min: MinSize,
    aspect: Option<f64>,
) -> Geometry {
    let mut width = start.width;
    let mut height = start.height;

    if handle.affects_right() {
        width = (start.width + delta.dx).max(min.width);
    } else if handle.affects_left() {
        width = (start.width - delta.dx).max(min.width);
    }

    if handle.affects_bottom() {
        height = (start.height + delta.dy).max(min.height);
    } else if handle.affects_top() {
        height = (start.height - delta.dy).max(min.height);
    }

    if let Some(ratio) = aspect.filter(|r| r.is_finite() && *r > 0.0) {
        if handle.is_corner() {
            height = width / ratio;
            if height < min.height {
                height = min.height;
                width = height * ratio;
            }
        }
    }

    let left = if handle.affects_left() { start.left + (start.width - width) } else { start.left };
    let top = if handle.affects_top() { start.top + (start.height - height) } else { start.top };

    Geometry { left, top, width, height }
}
