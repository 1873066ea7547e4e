//! Shared numeric constants for the block editor.

// ── Virtual canvas ──────────────────────────────────────────────

/// Width of the virtual slide canvas in un-scaled pixels.
pub const CANVAS_WIDTH: f64 = 960.0;

/// Height of the virtual slide canvas in un-scaled pixels.
pub const CANVAS_HEIGHT: f64 = 700.0;

// ── Minimum sizes ───────────────────────────────────────────────

/// Minimum block width in virtual pixels.
pub const MIN_WIDTH: f64 = 50.0;

/// Minimum block height in virtual pixels.
pub const MIN_HEIGHT: f64 = 30.0;

/// Minimum width of an image element inside an image block.
pub const IMAGE_MIN_WIDTH: f64 = 20.0;

/// Minimum height of an image element inside an image block.
pub const IMAGE_MIN_HEIGHT: f64 = 20.0;

// ── Overlay ─────────────────────────────────────────────────────

/// Edge length of a resize handle in screen pixels.
pub const HANDLE_SIZE_PX: f64 = 10.0;

/// Extra screen-space slop around a handle for hit-testing.
pub const HANDLE_SLOP_PX: f64 = 4.0;

// ── Reconciliation ──────────────────────────────────────────────

/// Animation frames to wait for the host layout pass to settle.
///
/// One for the host to schedule its layout, one for it to run, one for
/// dependent re-renders to flush.
pub const SETTLE_FRAMES: u32 = 3;

/// Scale used whenever no valid scale can be determined.
pub const DEFAULT_SCALE: f64 = 1.0;
