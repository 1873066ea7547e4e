#![allow(clippy::float_cmp)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use super::*;

// =============================================================
// Fakes shared with other test modules
// =============================================================

/// In-memory presentation surface.
#[derive(Default)]
pub(crate) struct FakeSurface {
    pub transform: Option<String>,
    pub host_scale: Option<f64>,
    pub slide_top: Cell<Option<f64>>,
    /// Slide top offset the "host" applies once a relayout is requested.
    pub slide_top_after_relayout: Option<f64>,
    pub rects: RefCell<HashMap<SelectionTarget, Rect>>,
    pub detached: RefCell<HashSet<BlockId>>,
    pub relayouts: Cell<usize>,
}

impl FakeSurface {
    /// Surface at scale `s` (reported via the applied transform).
    pub fn scaled(s: f64) -> Self {
        Self {
            transform: Some(format!("matrix({s}, 0, 0, {s}, 0, 0)")),
            ..Default::default()
        }
    }

    pub fn set_rect(&self, target: SelectionTarget, rect: Rect) {
        self.rects.borrow_mut().insert(target, rect);
    }

    pub fn detach(&self, block: BlockId) {
        self.detached.borrow_mut().insert(block);
    }
}

impl SurfaceInspector for FakeSurface {
    fn applied_transform(&self) -> Option<String> {
        self.transform.clone()
    }

    fn host_scale(&self) -> Option<f64> {
        self.host_scale
    }

    fn current_slide_top_offset(&self) -> Option<f64> {
        self.slide_top.get()
    }

    fn request_relayout(&self) {
        self.relayouts.set(self.relayouts.get() + 1);
        if let Some(top) = self.slide_top_after_relayout {
            self.slide_top.set(Some(top));
        }
    }

    fn element_rect(&self, target: SelectionTarget) -> Option<Rect> {
        if self.detached.borrow().contains(&target.block) {
            return None;
        }
        self.rects.borrow().get(&target).copied()
    }
}

/// Settler that resolves immediately and counts waits.
#[derive(Default)]
pub(crate) struct ImmediateSettler {
    pub waits: Cell<usize>,
}

#[async_trait(?Send)]
impl LayoutSettler for ImmediateSettler {
    async fn wait_for_layout_settled(&self) {
        self.waits.set(self.waits.get() + 1);
    }
}

/// Sink that records everything it is told to do.
#[derive(Default)]
pub(crate) struct RecordingSink {
    pub paints: Vec<(SelectionTarget, Geometry)>,
    pub embedded: Vec<(BlockId, bool)>,
}

impl RenderSink for RecordingSink {
    fn paint(&mut self, target: SelectionTarget, geometry: Geometry) {
        self.paints.push((target, geometry));
    }

    fn set_embedded_pointer_events(&mut self, block: BlockId, enabled: bool) {
        self.embedded.push((block, enabled));
    }
}

// =============================================================
// SurfaceInspector provided methods
// =============================================================

#[test]
fn current_scale_prefers_applied_transform() {
    let s = FakeSurface { host_scale: Some(1.05), ..FakeSurface::scaled(0.98) };
    assert_eq!(s.current_scale(), 0.98);
}

#[test]
fn current_scale_falls_back_to_host() {
    let s = FakeSurface { transform: Some("none".into()), host_scale: Some(1.05), ..Default::default() };
    assert_eq!(s.current_scale(), 1.05);
}

#[test]
fn current_scale_defaults_to_one() {
    assert_eq!(FakeSurface::default().current_scale(), 1.0);
}

#[test]
fn is_attached_follows_element_rect() {
    let s = FakeSurface::default();
    let target = SelectionTarget::block(uuid::Uuid::new_v4());
    assert!(!s.is_attached(target));
    s.set_rect(target, Rect::new(0.0, 0.0, 10.0, 10.0));
    assert!(s.is_attached(target));
    s.detach(target.block);
    assert!(!s.is_attached(target));
}
