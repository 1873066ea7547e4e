#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::block::SelectionTarget;
use crate::config::MinSize;
use crate::geom::Geometry;
use crate::moving::MoveDrag;
use crate::resize::ResizeDrag;

fn bounds() -> Rect {
    Rect::new(100.0, 100.0, 200.0, 100.0)
}

fn resizing(handle: ResizeHandle, current: Geometry) -> DragState {
    DragState::Resizing {
        target: SelectionTarget::block(Uuid::new_v4()),
        drag: ResizeDrag::begin(handle, Point::default(), current, MinSize { width: 50.0, height: 30.0 }),
        current,
    }
}

fn moving(current: Geometry) -> DragState {
    DragState::Moving {
        target: SelectionTarget::block(Uuid::new_v4()),
        drag: MoveDrag::begin(Point::default(), current),
        current,
    }
}

// =============================================================
// build
// =============================================================

#[test]
fn nothing_selected_builds_nothing() {
    assert!(OverlayModel::build(None, &DragState::Idle, false, 10.0).is_none());
}

#[test]
fn idle_overlay_has_eight_interactive_handles() {
    let o = OverlayModel::build(Some(bounds()), &DragState::Idle, false, 10.0).unwrap();
    assert_eq!(o.border, bounds());
    assert_eq!(o.handles.len(), 8);
    assert!(o.handles.iter().all(|h| h.interactive));
    assert_eq!(o.move_region, Some(bounds()));
    assert!(o.readout.is_none());
}

#[test]
fn handles_centered_on_anchor_points() {
    let o = OverlayModel::build(Some(bounds()), &DragState::Idle, false, 10.0).unwrap();
    let se = o.handles.iter().find(|h| h.handle == ResizeHandle::Se).unwrap();
    assert_eq!(se.rect, Rect::new(295.0, 195.0, 10.0, 10.0));
    assert_eq!(se.shape, HandleShape::Square);
    let n = o.handles.iter().find(|h| h.handle == ResizeHandle::N).unwrap();
    assert_eq!(n.rect, Rect::new(195.0, 95.0, 10.0, 10.0));
    assert_eq!(n.shape, HandleShape::Round);
}

#[test]
fn edit_mode_suppresses_move_region() {
    let o = OverlayModel::build(Some(bounds()), &DragState::Idle, true, 10.0).unwrap();
    assert!(o.move_region.is_none());
}

#[test]
fn resize_drag_disables_other_handles_and_shows_size() {
    let drag = resizing(ResizeHandle::E, Geometry::new(100.0, 100.0, 249.6, 120.2));
    let o = OverlayModel::build(Some(bounds()), &drag, false, 10.0).unwrap();
    let live: Vec<_> = o.handles.iter().filter(|h| h.interactive).map(|h| h.handle).collect();
    assert_eq!(live, vec![ResizeHandle::E]);
    assert_eq!(o.readout, Some(Readout::Size { width: 249.6, height: 120.2 }));
    assert_eq!(o.readout_text.as_deref(), Some("250 × 120"));
}

#[test]
fn move_drag_shows_position() {
    let o = OverlayModel::build(Some(bounds()), &moving(Geometry::new(250.0, 130.0, 10.0, 10.0)), false, 10.0).unwrap();
    assert_eq!(o.readout, Some(Readout::Position { left: 250.0, top: 130.0 }));
    assert_eq!(o.readout_text.as_deref(), Some("x: 250  y: 130"));
    assert!(o.handles.iter().all(|h| !h.interactive));
}

#[test]
fn readout_serializes_tagged() {
    let v = serde_json::to_value(Readout::Size { width: 1.0, height: 2.0 }).unwrap();
    assert_eq!(v["type"], "size");
    assert_eq!(v["width"], 1.0);
}

// =============================================================
// hit
// =============================================================

#[test]
fn hit_handle_before_move_region() {
    let o = OverlayModel::build(Some(bounds()), &DragState::Idle, false, 10.0).unwrap();
    assert_eq!(o.hit(Point::new(298.0, 198.0)), Some(HitRegion::Handle(ResizeHandle::Se)));
    assert_eq!(o.hit(Point::new(100.0, 150.0)), Some(HitRegion::Handle(ResizeHandle::W)));
}

#[test]
fn hit_includes_slop() {
    let o = OverlayModel::build(Some(bounds()), &DragState::Idle, false, 10.0).unwrap();
    assert_eq!(o.hit(Point::new(308.0, 208.0)), Some(HitRegion::Handle(ResizeHandle::Se)));
    assert_eq!(o.hit(Point::new(310.0, 210.0)), None);
}

#[test]
fn hit_interior_is_move() {
    let o = OverlayModel::build(Some(bounds()), &DragState::Idle, false, 10.0).unwrap();
    assert_eq!(o.hit(Point::new(200.0, 150.0)), Some(HitRegion::Move));
}

#[test]
fn hit_outside_is_none() {
    let o = OverlayModel::build(Some(bounds()), &DragState::Idle, false, 10.0).unwrap();
    assert_eq!(o.hit(Point::new(500.0, 500.0)), None);
}

#[test]
fn hit_in_edit_mode_only_reaches_handles() {
    let o = OverlayModel::build(Some(bounds()), &DragState::Idle, true, 10.0).unwrap();
    assert_eq!(o.hit(Point::new(200.0, 150.0)), None);
    assert_eq!(o.hit(Point::new(300.0, 100.0)), Some(HitRegion::Handle(ResizeHandle::Ne)));
}
