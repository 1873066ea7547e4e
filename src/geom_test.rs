#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// --- Point ---

#[test]
fn point_delta_from_origin() {
    let d = Point::new(150.0, 40.0).delta_from(Point::new(100.0, 60.0));
    assert_eq!(d, Delta::new(50.0, -20.0));
}

// --- Rect ---

#[test]
fn rect_edges_and_center() {
    let r = Rect::new(10.0, 20.0, 100.0, 50.0);
    assert_eq!(r.right(), 110.0);
    assert_eq!(r.bottom(), 70.0);
    assert_eq!(r.center(), Point::new(60.0, 45.0));
}

#[test]
fn rect_contains_is_edge_inclusive() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(r.contains(Point::new(0.0, 0.0)));
    assert!(r.contains(Point::new(10.0, 10.0)));
    assert!(!r.contains(Point::new(10.1, 5.0)));
    assert!(!r.contains(Point::new(5.0, -0.1)));
}

#[test]
fn rect_inflate_grows_every_side() {
    let r = Rect::new(10.0, 10.0, 20.0, 20.0).inflate(5.0);
    assert_eq!(r, Rect::new(5.0, 5.0, 30.0, 30.0));
}

// --- Geometry ---

#[test]
fn geometry_aspect_ratio() {
    let g = Geometry::new(0.0, 0.0, 200.0, 100.0);
    assert_eq!(g.aspect_ratio(), Some(2.0));
}

#[test]
fn geometry_aspect_ratio_none_for_degenerate_height() {
    assert_eq!(Geometry::new(0.0, 0.0, 200.0, 0.0).aspect_ratio(), None);
    assert_eq!(Geometry::new(0.0, 0.0, 0.0, 10.0).aspect_ratio(), None);
}

#[test]
fn geometry_from_screen_rect_divides_by_scale() {
    let rect = Rect::new(60.0, 35.0, 100.0, 50.0);
    let g = Geometry::from_screen_rect(rect, Point::new(10.0, 10.0), 0.5);
    assert!(approx_eq(g.left, 100.0));
    assert!(approx_eq(g.top, 50.0));
    assert!(approx_eq(g.width, 200.0));
    assert!(approx_eq(g.height, 100.0));
}

#[test]
fn geometry_from_screen_rect_guards_zero_scale() {
    let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    let g = Geometry::from_screen_rect(rect, Point::default(), 0.0);
    assert_eq!(g.width, 100.0);
    assert_eq!(g.height, 50.0);
}

#[test]
fn geometry_serializes_as_style_fields() {
    let g = Geometry::new(1.0, 2.0, 3.0, 4.0);
    let v = serde_json::to_value(g).unwrap();
    assert_eq!(v["left"], 1.0);
    assert_eq!(v["top"], 2.0);
    assert_eq!(v["width"], 3.0);
    assert_eq!(v["height"], 4.0);
}
