//! Resolving the visually applied scale of the presentation surface.
//!
//! DESIGN
//! ======
//! The host deck reports its own scale, but the transform it actually applies
//! to the slide container can differ (independent rounding and recentering,
//! e.g. 1.05 reported against 0.98 applied). Drag math must follow what the
//! user sees, so the computed CSS transform is the primary source and the
//! host's number only a fallback. Resolution never fails; it bottoms out at
//! [`DEFAULT_SCALE`].

use crate::consts::DEFAULT_SCALE;

#[cfg(test)]
#[path = "scale_test.rs"]
mod scale_test;

/// Why a computed transform string could not yield a scale.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    #[error("no transform applied")]
    Empty,
    #[error("unsupported transform function: {0}")]
    Unsupported(String),
    #[error("malformed transform: {0}")]
    Malformed(String),
    #[error("non-positive scale component: {0}")]
    NonPositive(f64),
}

/// Extract the horizontal scale component from a computed CSS transform.
///
/// Accepts the two forms browsers report from `getComputedStyle`:
/// `matrix(sx, b, c, sy, tx, ty)` and `matrix3d(sx, ...)` (16 values).
///
/// # Errors
///
/// Returns `Empty` for `none`/blank, `Unsupported` for any other function,
/// `Malformed` when the argument list is wrong, and `NonPositive` when the
/// scale component is not a positive finite number.
pub fn parse_matrix_scale(transform: &str) -> Result<f64, TransformError> {
    let raw = transform.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
        return Err(TransformError::Empty);
    }

    let (name, rest) = raw
        .split_once('(')
        .ok_or_else(|| TransformError::Malformed(raw.to_owned()))?;
    let args = rest
        .strip_suffix(')')
        .ok_or_else(|| TransformError::Malformed(raw.to_owned()))?;

    let expected = match name.trim() {
        "matrix" => 6,
        "matrix3d" => 16,
        other => return Err(TransformError::Unsupported(other.to_owned())),
    };

    let mut values = Vec::with_capacity(expected);
    for part in args.split(',') {
        let value = part
            .trim()
            .parse::<f64>()
            .map_err(|_| TransformError::Malformed(raw.to_owned()))?;
        values.push(value);
    }
    if values.len() != expected {
        return Err(TransformError::Malformed(raw.to_owned()));
    }

    let sx = values[0];
    if !sx.is_finite() || sx <= 0.0 {
        return Err(TransformError::NonPositive(sx));
    }
    Ok(sx)
}

/// Resolve the scale from the applied transform, then the host's report, then 1.
#[must_use]
pub fn resolve_scale(transform: Option<&str>, host_scale: Option<f64>) -> f64 {
    if let Some(raw) = transform {
        match parse_matrix_scale(raw) {
            Ok(scale) => return scale,
            Err(e) => tracing::trace!(error = %e, "applied transform unusable, falling back"),
        }
    }
    match host_scale {
        Some(scale) if scale.is_finite() && scale > 0.0 => scale,
        Some(scale) => {
            tracing::debug!(scale, "host reported unusable scale, using default");
            DEFAULT_SCALE
        }
        None => DEFAULT_SCALE,
    }
}
