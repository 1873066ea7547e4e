//! Selection overlay view model.
//!
//! The overlay holds no geometry truth. It is rebuilt from the tracker's
//! latest bounds plus the live values of the active drag, and the host paints
//! it however it likes (the `web` layer serializes it to JSON).

use std::fmt;

use serde::Serialize;

use crate::consts::HANDLE_SLOP_PX;
use crate::geom::{Point, Rect};
use crate::handle::{HandleShape, HitRegion, ResizeHandle};
use crate::session::{DragState, SessionKind};

#[cfg(test)]
#[path = "overlay_test.rs"]
mod overlay_test;

/// One resize handle as drawn on screen.
#[derive(Debug, Clone, Serialize)]
pub struct HandleView {
    pub handle: ResizeHandle,
    pub rect: Rect,
    pub shape: HandleShape,
    pub cursor: &'static str,
    /// False for every handle except the active one while a drag is running.
    pub interactive: bool,
}

/// Transient numeric readout shown while dragging, in virtual pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase", tag = "type")]
pub enum Readout {
    Size { width: f64, height: f64 },
    Position { left: f64, top: f64 },
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Size { width, height } => write!(f, "{} × {}", width.round(), height.round()),
            Self::Position { left, top } => write!(f, "x: {}  y: {}", left.round(), top.round()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OverlayModel {
    /// Selection border, sized to the tracked bounds.
    pub border: Rect,
    pub handles: Vec<HandleView>,
    /// Central move hit-region; absent while the block is in edit mode.
    pub move_region: Option<Rect>,
    pub readout: Option<Readout>,
    pub readout_text: Option<String>,
}

impl OverlayModel {
    /// Build the overlay for `bounds`. Returns `None` when nothing is selected.
    #[must_use]
    pub fn build(bounds: Option<Rect>, drag: &DragState, editing: bool, handle_size: f64) -> Option<Self> {
        let border = bounds?;
        let active = drag.kind();
        let half = handle_size * 0.5;

        let handles = ResizeHandle::ALL
            .iter()
            .map(|&handle| {
                let center = handle.anchor_point(&border);
                HandleView {
                    handle,
                    rect: Rect::new(center.x - half, center.y - half, handle_size, handle_size),
                    shape: handle.shape(),
                    cursor: handle.cursor(),
                    interactive: active.is_none_or(|k| k == SessionKind::Resize(handle)),
                }
            })
            .collect();

        let readout = match (drag.kind(), drag.current()) {
            (Some(SessionKind::Move), Some(g)) => Some(Readout::Position { left: g.left, top: g.top }),
            (Some(SessionKind::Resize(_)), Some(g)) => Some(Readout::Size { width: g.width, height: g.height }),
            _ => None,
        };

        Some(Self {
            border,
            handles,
            move_region: (!editing).then_some(border),
            readout,
            readout_text: readout.map(|r| r.to_string()),
        })
    }

    /// Resolve a screen point to a hit region. Handles win over the move
    /// region; non-interactive handles are ignored.
    #[must_use]
    pub fn hit(&self, pt: Point) -> Option<HitRegion> {
        let handle = self
            .handles
            .iter()
            .filter(|h| h.interactive)
            .find(|h| h.rect.inflate(HANDLE_SLOP_PX).contains(pt));
        if let Some(h) = handle {
            return Some(HitRegion::Handle(h.handle));
        }
        self.move_region
            .filter(|r| r.contains(pt))
            .map(|_| HitRegion::Move)
    }
}
