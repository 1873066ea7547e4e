//! Host collaborator traits.
//!
//! The engines never touch the DOM or the deck framework directly. Everything
//! they need from the presentation surface goes through [`SurfaceInspector`];
//! the layout-settling wait is a [`LayoutSettler`]; painting goes to a
//! [`RenderSink`]. The browser implementations live in [`crate::web`]; tests
//! use in-memory fakes.

use async_trait::async_trait;

use crate::block::{BlockId, SelectionTarget};
use crate::geom::{Geometry, Rect};
use crate::scale::resolve_scale;

#[cfg(test)]
#[path = "surface_test.rs"]
pub(crate) mod surface_test;

/// Read-only view of the presentation surface plus the relayout trigger.
pub trait SurfaceInspector {
    /// Computed CSS transform of the scaled slide container, verbatim.
    fn applied_transform(&self) -> Option<String>;

    /// Scale the deck framework reports for itself.
    fn host_scale(&self) -> Option<f64>;

    /// Computed top offset of the current slide, in virtual pixels.
    fn current_slide_top_offset(&self) -> Option<f64>;

    /// Notify the host that content changed. The host is expected to run its
    /// layout/recentering pass asynchronously afterwards.
    fn request_relayout(&self);

    /// Rendered screen rectangle of `target`, or `None` if it is no longer in
    /// the document.
    fn element_rect(&self, target: SelectionTarget) -> Option<Rect>;

    /// Scale to use for drag math right now.
    fn current_scale(&self) -> f64 {
        resolve_scale(self.applied_transform().as_deref(), self.host_scale())
    }

    /// Whether `target` is still attached to the document.
    fn is_attached(&self, target: SelectionTarget) -> bool {
        self.element_rect(target).is_some()
    }
}

/// Waits until the host's layout pass triggered by
/// [`SurfaceInspector::request_relayout`] has settled.
#[async_trait(?Send)]
pub trait LayoutSettler {
    async fn wait_for_layout_settled(&self);
}

/// Receives geometry to paint. Performs no computation of its own.
pub trait RenderSink {
    /// Write `geometry` as the target's inline `left/top/width/height`.
    fn paint(&mut self, target: SelectionTarget, geometry: Geometry);

    /// Enable or disable pointer events on embedded frames and media inside
    /// `block`, so a drag keeps receiving document-level events.
    fn set_embedded_pointer_events(&mut self, block: BlockId, enabled: bool);
}
