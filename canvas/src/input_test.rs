#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn default_selection_is_empty() {
    let sel = Selection::default();
    assert!(sel.selected_point.is_none());
    assert!(sel.current_image.is_none());
}

#[test]
fn display_point_subtracts_canvas_origin() {
    let ev = PointerDown::new(Point::new(130.0, 95.0), Point::new(30.0, 15.0));
    assert_eq!(ev.display_point(), Point::new(100.0, 80.0));
}

#[test]
fn display_point_at_origin_is_zero() {
    let ev = PointerDown::new(Point::new(12.5, 7.5), Point::new(12.5, 7.5));
    assert_eq!(ev.display_point(), Point::new(0.0, 0.0));
}

#[test]
fn display_point_can_be_negative_outside_canvas() {
    let ev = PointerDown::new(Point::new(5.0, 5.0), Point::new(10.0, 20.0));
    assert_eq!(ev.display_point(), Point::new(-5.0, -15.0));
}
