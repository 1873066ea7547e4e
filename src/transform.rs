//! Screen-to-virtual coordinate conversion.
//!
//! Block geometry is authored in virtual slide pixels and painted through the
//! surface's uniform scale transform, so only deltas ever need converting
//! during a drag. Every function here guards against a non-positive or
//! non-finite scale by substituting [`DEFAULT_SCALE`].

use crate::consts::DEFAULT_SCALE;
use crate::geom::Delta;

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

/// Replace an unusable scale (zero, negative, NaN, infinite) with the default.
#[must_use]
pub fn sanitize_scale(scale: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 { scale } else { DEFAULT_SCALE }
}

/// Convert a screen-pixel pointer delta into virtual slide pixels.
#[must_use]
pub fn screen_delta_to_virtual(delta: Delta, scale: f64) -> Delta {
    let scale = sanitize_scale(scale);
    Delta { dx: delta.dx / scale, dy: delta.dy / scale }
}
