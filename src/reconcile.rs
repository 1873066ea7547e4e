//! Post-drag reconciliation.
//!
//! DESIGN
//! ======
//! The host recenters its slides vertically whenever content changes. Blocks
//! are positioned relative to the slide, so that recentering shifts every
//! block on screen even though its own `top` is unchanged. After a drag we
//! snapshot the slide's top offset, ask the host to relayout, wait for the
//! layout to settle, re-measure, and counter-shift the dragged block by the
//! slide's movement.
//!
//! Reconciliation is best-effort: any missing measurement degrades to
//! restoring the saved geometry verbatim, and a target that disappeared
//! while we waited aborts without painting.

use crate::block::{SelectionTarget, TargetPart};
use crate::geom::Geometry;
use crate::session::SessionId;
use crate::surface::{LayoutSettler, SurfaceInspector};

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod reconcile_test;

/// Snapshot taken at pointer-up, before the host is told anything changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingReconcile {
    /// Session whose pointer-up produced this snapshot.
    pub session: SessionId,
    pub target: SelectionTarget,
    /// Final geometry computed by the drag engine.
    pub saved: Geometry,
    /// Slide top offset before the host relayout.
    pub slide_top_before: Option<f64>,
}

impl PendingReconcile {
    /// Snapshot the slide offset for a drag that ended at `saved`.
    #[must_use]
    pub fn capture<S: SurfaceInspector + ?Sized>(
        surface: &S,
        session: SessionId,
        target: SelectionTarget,
        saved: Geometry,
    ) -> Self {
        Self { session, target, saved, slide_top_before: surface.current_slide_top_offset() }
    }
}

/// Result of one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReconcileOutcome {
    /// The slide moved by `slide_delta`; `geometry.top` was counter-shifted.
    Compensated { target: SelectionTarget, geometry: Geometry, slide_delta: f64 },
    /// No compensation possible or needed; saved geometry restored as-is.
    Restored { target: SelectionTarget, geometry: Geometry },
    /// The target left the document during the wait. Nothing to paint.
    Aborted { target: SelectionTarget },
}

impl ReconcileOutcome {
    /// Geometry to paint, if any.
    #[must_use]
    pub fn geometry(&self) -> Option<(SelectionTarget, Geometry)> {
        match *self {
            Self::Compensated { target, geometry, .. } | Self::Restored { target, geometry } => {
                Some((target, geometry))
            }
            Self::Aborted { .. } => None,
        }
    }
}

/// Counter-shift `saved.top` by the slide's movement.
///
/// `top = saved.top - (after - before)`; left, width, and height are kept.
/// Returns the geometry and the slide delta, or `None` for the delta when
/// either measurement is missing (geometry is then `saved` verbatim).
#[must_use]
pub fn compensate(saved: Geometry, before: Option<f64>, after: Option<f64>) -> (Geometry, Option<f64>) {
    match (before, after) {
        (Some(before), Some(after)) if before.is_finite() && after.is_finite() => {
            let slide_delta = after - before;
            (Geometry { top: saved.top - slide_delta, ..saved }, Some(slide_delta))
        }
        _ => (saved, None),
    }
}

/// Run the relayout, wait for it to settle, and compute the corrected geometry.
pub async fn reconcile<S, W>(pending: PendingReconcile, surface: &S, settler: &W) -> ReconcileOutcome
where
    S: SurfaceInspector + ?Sized,
    W: LayoutSettler + ?Sized,
{
    let target = pending.target;
    surface.request_relayout();
    settler.wait_for_layout_settled().await;

    if !surface.is_attached(target) {
        tracing::debug!(block = %target.block, "target detached before reconciliation, skipping");
        return ReconcileOutcome::Aborted { target };
    }

    if target.part != TargetPart::Block {
        return ReconcileOutcome::Restored { target, geometry: pending.saved };
    }

    let after = surface.current_slide_top_offset();
    match compensate(pending.saved, pending.slide_top_before, after) {
        (geometry, Some(slide_delta)) => {
            tracing::debug!(block = %target.block, slide_delta, top = geometry.top, "compensated slide recenter");
            ReconcileOutcome::Compensated { target, geometry, slide_delta }
        }
        (geometry, None) => {
            tracing::debug!(block = %target.block, "slide offset unavailable, restoring saved geometry");
            ReconcileOutcome::Restored { target, geometry }
        }
    }
}
