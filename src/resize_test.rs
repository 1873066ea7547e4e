#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn min() -> MinSize {
    MinSize { width: 50.0, height: 30.0 }
}

fn start() -> Geometry {
    Geometry::new(100.0, 100.0, 200.0, 100.0)
}

fn resize(handle: ResizeHandle, dx: f64, dy: f64) -> Geometry {
    resize_geometry(handle, start(), Delta::new(dx, dy), min(), None)
}

// =============================================================
// Single edges
// =============================================================

#[test]
fn east_grows_width_only() {
    let g = resize(ResizeHandle::E, 40.0, 999.0);
    assert_eq!(g, Geometry::new(100.0, 100.0, 240.0, 100.0));
}

#[test]
fn south_grows_height_only() {
    let g = resize(ResizeHandle::S, 999.0, 25.0);
    assert_eq!(g, Geometry::new(100.0, 100.0, 200.0, 125.0));
}

#[test]
fn west_moves_left_edge_and_anchors_right() {
    let g = resize(ResizeHandle::W, 30.0, 0.0);
    assert_eq!(g.width, 170.0);
    assert_eq!(g.left, 130.0);
    assert_eq!(g.right(), start().right());
}

#[test]
fn west_left_changes_by_width_difference() {
    for dx in [-80.0, -10.0, 0.0, 15.5, 120.0] {
        let g = resize(ResizeHandle::W, dx, 0.0);
        assert!(approx_eq(g.left - start().left, start().width - g.width));
        assert!(approx_eq(g.right(), start().right()), "right edge moved for dx {dx}");
    }
}

#[test]
fn north_moves_top_edge_and_anchors_bottom() {
    let g = resize(ResizeHandle::N, 0.0, -20.0);
    assert_eq!(g.height, 120.0);
    assert_eq!(g.top, 80.0);
    assert_eq!(g.bottom(), start().bottom());
}

// =============================================================
// Corners
// =============================================================

#[test]
fn se_combines_east_and_south() {
    let g = resize(ResizeHandle::Se, 50.0, 20.0);
    assert_eq!(g, Geometry::new(100.0, 100.0, 250.0, 120.0));
}

#[test]
fn nw_anchors_bottom_right() {
    let g = resize(ResizeHandle::Nw, -20.0, -10.0);
    assert_eq!(g, Geometry::new(80.0, 90.0, 220.0, 110.0));
    assert_eq!(g.right(), start().right());
    assert_eq!(g.bottom(), start().bottom());
}

#[test]
fn ne_anchors_bottom_left() {
    let g = resize(ResizeHandle::Ne, 10.0, 10.0);
    assert_eq!(g, Geometry::new(100.0, 110.0, 210.0, 90.0));
}

#[test]
fn sw_anchors_top_right() {
    let g = resize(ResizeHandle::Sw, 10.0, 10.0);
    assert_eq!(g, Geometry::new(110.0, 100.0, 190.0, 110.0));
}

// =============================================================
// Minimum clamps
// =============================================================

#[test]
fn east_clamps_to_min_width_never_negative() {
    let g = resize(ResizeHandle::E, -500.0, 0.0);
    assert_eq!(g.width, 50.0);
    assert_eq!(g.left, 100.0);
}

#[test]
fn north_clamps_to_min_height_and_anchors_bottom() {
    let g = resize(ResizeHandle::N, 0.0, 400.0);
    assert_eq!(g.height, 30.0);
    assert_eq!(g.bottom(), start().bottom());
}

#[test]
fn west_clamp_shifts_left_by_difference() {
    let s = Geometry::new(100.0, 100.0, 60.0, 100.0);
    let g = resize_geometry(ResizeHandle::W, s, Delta::new(30.0, 0.0), min(), None);
    assert_eq!(g.width, 50.0);
    assert_eq!(g.left, 110.0);
}

#[test]
fn every_handle_respects_minimums() {
    for h in ResizeHandle::ALL {
        for (dx, dy) in [(-1000.0, -1000.0), (1000.0, 1000.0), (-1000.0, 1000.0), (1000.0, -1000.0)] {
            let g = resize_geometry(h, start(), Delta::new(dx, dy), min(), None);
            assert!(g.width >= 50.0 && g.height >= 30.0, "{h:?} ({dx}, {dy}) -> {g:?}");
            let locked = resize_geometry(h, start(), Delta::new(dx, dy), min(), Some(2.0));
            assert!(locked.width >= 50.0 && locked.height >= 30.0, "locked {h:?} ({dx}, {dy}) -> {locked:?}");
        }
    }
}

// =============================================================
// Aspect lock
// =============================================================

#[test]
fn se_locked_keeps_ratio() {
    for dw in [-120.0, -30.0, 0.0, 17.0, 260.0] {
        let g = resize_geometry(ResizeHandle::Se, start(), Delta::new(dw, 3.0), min(), Some(2.0));
        assert!(approx_eq(g.height / g.width, 0.5), "ratio broken for dw {dw}: {g:?}");
    }
}

#[test]
fn locked_height_derives_from_width_on_every_corner() {
    for h in [ResizeHandle::Nw, ResizeHandle::Ne, ResizeHandle::Se, ResizeHandle::Sw] {
        let g = resize_geometry(h, start(), Delta::new(40.0, -5.0), min(), Some(2.0));
        assert!(approx_eq(g.width / g.height, 2.0), "{h:?} -> {g:?}");
    }
}

#[test]
fn locked_nw_keeps_bottom_right_anchored() {
    let g = resize_geometry(ResizeHandle::Nw, start(), Delta::new(-100.0, 0.0), min(), Some(2.0));
    assert_eq!(g.width, 300.0);
    assert_eq!(g.height, 150.0);
    assert_eq!(g.right(), start().right());
    assert_eq!(g.bottom(), start().bottom());
}

#[test]
fn locked_min_height_widens_to_keep_ratio() {
    // 200x100 shrunk hard: width clamps to 50, derived height 25 < 30.
    let g = resize_geometry(ResizeHandle::Se, start(), Delta::new(-500.0, 0.0), min(), Some(2.0));
    assert_eq!(g.height, 30.0);
    assert_eq!(g.width, 60.0);
}

#[test]
fn lock_ignored_on_edge_handles() {
    let g = resize_geometry(ResizeHandle::E, start(), Delta::new(100.0, 0.0), min(), Some(2.0));
    assert_eq!(g, Geometry::new(100.0, 100.0, 300.0, 100.0));
}

#[test]
fn unusable_ratio_is_ignored() {
    let g = resize_geometry(ResizeHandle::Se, start(), Delta::new(50.0, 20.0), min(), Some(f64::NAN));
    assert_eq!(g, Geometry::new(100.0, 100.0, 250.0, 120.0));
}

// =============================================================
// ResizeDrag
// =============================================================

#[test]
fn drag_captures_start_aspect() {
    let d = ResizeDrag::begin(ResizeHandle::Se, Point::new(0.0, 0.0), start(), min());
    assert_eq!(d.aspect, Some(2.0));
}

#[test]
fn drag_basic_resize_scenario() {
    let d = ResizeDrag::begin(ResizeHandle::Se, Point::new(300.0, 200.0), start(), min());
    let g = d.geometry_at(Point::new(350.0, 220.0), 1.0, false);
    assert_eq!(g, Geometry::new(100.0, 100.0, 250.0, 120.0));
}

#[test]
fn drag_converts_screen_delta_by_scale() {
    let d = ResizeDrag::begin(ResizeHandle::E, Point::new(0.0, 0.0), start(), min());
    let g = d.geometry_at(Point::new(25.0, 0.0), 0.5, false);
    assert_eq!(g.width, 250.0);
}

#[test]
fn drag_uses_latest_scale_each_tick() {
    let d = ResizeDrag::begin(ResizeHandle::E, Point::new(0.0, 0.0), start(), min());
    let a = d.geometry_at(Point::new(40.0, 0.0), 1.0, false);
    let b = d.geometry_at(Point::new(40.0, 0.0), 2.0, false);
    assert_eq!(a.width, 240.0);
    assert_eq!(b.width, 220.0);
}

#[test]
fn drag_with_zero_scale_treats_as_one() {
    let d = ResizeDrag::begin(ResizeHandle::S, Point::new(0.0, 0.0), start(), min());
    let g = d.geometry_at(Point::new(0.0, 10.0), 0.0, false);
    assert_eq!(g.height, 110.0);
}

#[test]
fn drag_lock_toggles_per_tick() {
    let d = ResizeDrag::begin(ResizeHandle::Se, Point::new(0.0, 0.0), start(), min());
    let free = d.geometry_at(Point::new(100.0, 0.0), 1.0, false);
    let locked = d.geometry_at(Point::new(100.0, 0.0), 1.0, true);
    assert_eq!(free.height, 100.0);
    assert_eq!(locked.height, 150.0);
}
