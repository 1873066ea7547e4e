//! Selection bounds tracking.
//!
//! Keeps a cached screen rectangle for the current selection and republishes
//! it whenever it changes. Window resizes and ancestor scrolls re-measure
//! immediately; DOM mutations inside the surface are coalesced into a single
//! re-measure on the next animation frame, since the host can fire long
//! bursts of them (e.g. re-applying classes during slide transitions).
//!
//! The cached value is never authoritative. Consumers must tolerate it being
//! one tick stale.

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};

use crate::block::SelectionTarget;
use crate::geom::Rect;
use crate::surface::SurfaceInspector;

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;

/// Screen-space rectangle of the current selection.
pub type SelectionBounds = Rect;

/// What prompted a re-measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invalidation {
    WindowResize,
    Scroll,
    Mutation,
}

#[derive(Default)]
pub struct SelectionBoundsTracker {
    target: Option<SelectionTarget>,
    bounds: Option<SelectionBounds>,
    frame_pending: bool,
    subscribers: Vec<UnboundedSender<Option<SelectionBounds>>>,
}

impl SelectionBoundsTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stream of bounds updates. The current value is delivered first.
    pub fn subscribe(&mut self) -> UnboundedReceiver<Option<SelectionBounds>> {
        let (tx, rx) = unbounded();
        if tx.unbounded_send(self.bounds).is_ok() {
            self.subscribers.push(tx);
        }
        rx
    }

    /// Start tracking `target`, measuring it immediately. An ineligible or
    /// absent target publishes empty bounds.
    pub fn observe<S: SurfaceInspector + ?Sized>(&mut self, target: Option<SelectionTarget>, eligible: bool, surface: &S) {
        self.target = target.filter(|_| eligible);
        self.frame_pending = false;
        let measured = self.target.and_then(|t| surface.element_rect(t));
        self.set_bounds(measured);
    }

    /// Stop tracking and publish empty bounds.
    pub fn stop(&mut self) {
        self.target = None;
        self.frame_pending = false;
        self.set_bounds(None);
    }

    /// Record an invalidation. Returns `true` when the caller must schedule an
    /// animation frame and then call [`Self::on_frame`].
    pub fn invalidate<S: SurfaceInspector + ?Sized>(&mut self, cause: Invalidation, surface: &S) -> bool {
        if self.target.is_none() {
            return false;
        }
        match cause {
            Invalidation::WindowResize | Invalidation::Scroll => {
                self.remeasure(surface);
                false
            }
            Invalidation::Mutation => {
                if self.frame_pending {
                    return false;
                }
                self.frame_pending = true;
                true
            }
        }
    }

    /// Run the re-measure deferred by a mutation burst.
    pub fn on_frame<S: SurfaceInspector + ?Sized>(&mut self, surface: &S) {
        if !self.frame_pending {
            return;
        }
        self.frame_pending = false;
        self.remeasure(surface);
    }

    /// Latest measured bounds.
    #[must_use]
    pub fn current(&self) -> Option<SelectionBounds> {
        self.bounds
    }

    #[must_use]
    pub fn target(&self) -> Option<SelectionTarget> {
        self.target
    }

    #[must_use]
    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    fn remeasure<S: SurfaceInspector + ?Sized>(&mut self, surface: &S) {
        let Some(target) = self.target else {
            return;
        };
        match surface.element_rect(target) {
            Some(rect) => self.set_bounds(Some(rect)),
            None => tracing::trace!(block = %target.block, "selection detached, skipping re-measure"),
        }
    }

    fn set_bounds(&mut self, bounds: Option<SelectionBounds>) {
        if self.bounds == bounds {
            return;
        }
        self.bounds = bounds;
        self.subscribers.retain(|tx| tx.unbounded_send(bounds).is_ok());
    }
}
