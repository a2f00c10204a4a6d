#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Size ---

#[test]
fn max_side_picks_larger_dimension() {
    assert_eq!(Size::new(400.0, 300.0).max_side(), 400.0);
    assert_eq!(Size::new(300.0, 400.0).max_side(), 400.0);
}

#[test]
fn zero_sized_image_is_not_drawable() {
    assert!(!Size::new(0.0, 300.0).is_drawable());
    assert!(!Size::default().is_drawable());
    assert!(Size::new(1.0, 1.0).is_drawable());
}

// --- construction ---

#[test]
fn new_rejects_zero_scale() {
    let err = Transform::new(Size::new(400.0, 300.0), 0.0).unwrap_err();
    assert!(matches!(err, TransformError::Degenerate { .. }));
}

#[test]
fn new_rejects_nan_scale() {
    assert!(Transform::new(Size::new(400.0, 300.0), f64::NAN).is_err());
}

#[test]
fn new_rejects_empty_image() {
    assert!(Transform::new(Size::new(0.0, 0.0), 1.0).is_err());
}

#[test]
fn fit_uses_limiting_dimension() {
    // 800/400 = 2.0, 600/300 = 2.0
    let t = Transform::fit(Size::new(400.0, 300.0), Size::new(800.0, 600.0)).unwrap();
    assert_eq!(t.scale(), 2.0);

    // Tall image: height limits.
    let t = Transform::fit(Size::new(100.0, 400.0), Size::new(800.0, 600.0)).unwrap();
    assert_eq!(t.scale(), 1.5);

    // Wide image: width limits.
    let t = Transform::fit(Size::new(1600.0, 300.0), Size::new(800.0, 600.0)).unwrap();
    assert_eq!(t.scale(), 0.5);
}

#[test]
fn fit_into_empty_canvas_is_degenerate() {
    assert!(Transform::fit(Size::new(400.0, 300.0), Size::new(0.0, 600.0)).is_err());
}

#[test]
fn display_size_scales_image() {
    let t = Transform::new(Size::new(400.0, 300.0), 2.0).unwrap();
    assert_eq!(t.display_size(), Size::new(800.0, 600.0));
}

// --- forward ---

#[test]
fn center_maps_to_scaled_image_center() {
    let t = Transform::new(Size::new(400.0, 300.0), 2.0).unwrap();
    assert!(point_approx_eq(t.to_display(Point::new(0.0, 0.0)), Point::new(400.0, 300.0)));
}

#[test]
fn normalized_unit_is_larger_side() {
    let t = Transform::new(Size::new(400.0, 300.0), 1.0).unwrap();
    // x: 200 + 0.5 * 400 = 400; y: 150 - 0.25 * 400 = 50
    assert!(point_approx_eq(t.to_display(Point::new(0.5, -0.25)), Point::new(400.0, 50.0)));
}

#[test]
fn to_display_matches_formula() {
    let t = Transform::new(Size::new(400.0, 300.0), 2.0).unwrap();
    // (200 + 0.1 * 400) * 2 = 480; (150 - 0.2 * 400) * 2 = 140
    assert!(point_approx_eq(t.to_display(Point::new(0.1, -0.2)), Point::new(480.0, 140.0)));
}

#[test]
fn normalized_to_image_ignores_scale() {
    let t = Transform::new(Size::new(400.0, 300.0), 3.0).unwrap();
    assert!(point_approx_eq(t.normalized_to_image(Point::new(0.1, -0.2)), Point::new(240.0, 70.0)));
}

// --- inverse ---

#[test]
fn to_normalized_inverts_known_point() {
    let t = Transform::new(Size::new(400.0, 300.0), 2.0).unwrap();
    assert!(point_approx_eq(t.to_normalized(Point::new(480.0, 140.0)), Point::new(0.1, -0.2)));
}

#[test]
fn top_left_corner_of_landscape_image() {
    let t = Transform::new(Size::new(400.0, 300.0), 1.0).unwrap();
    // x: (0 - 200) / 400 = -0.5; y: (0 - 150) / 400 = -0.375
    assert!(point_approx_eq(t.to_normalized(Point::new(0.0, 0.0)), Point::new(-0.5, -0.375)));
}

#[test]
fn round_trip_law_holds_across_sizes_and_scales() {
    let sizes = [
        Size::new(400.0, 300.0),
        Size::new(300.0, 400.0),
        Size::new(1.0, 1.0),
        Size::new(4032.0, 3024.0),
        Size::new(17.0, 9001.0),
    ];
    let scales = [0.01, 0.25, 1.0, 1.7, 12.0];
    let coords = [-0.5, -0.33, 0.0, 0.123_456, 0.5];

    for image in sizes {
        for scale in scales {
            let t = Transform::new(image, scale).unwrap();
            for x in coords {
                for y in coords {
                    let norm = Point::new(x, y);
                    let back = t.to_normalized(t.to_display(norm));
                    assert!(
                        (back.x - norm.x).abs() < 1e-9 && (back.y - norm.y).abs() < 1e-9,
                        "round trip failed for {norm:?} on {image:?} at {scale}: {back:?}"
                    );
                }
            }
        }
    }
}

// --- free functions ---

#[test]
fn free_functions_fail_without_scale() {
    let image = Size::new(400.0, 300.0);
    assert_eq!(to_display(Point::new(0.0, 0.0), image, None), Err(TransformError::NoImageLoaded));
    assert_eq!(to_normalized(Point::new(0.0, 0.0), image, None), Err(TransformError::NoImageLoaded));
}

#[test]
fn free_functions_agree_with_transform() {
    let image = Size::new(400.0, 300.0);
    let display = to_display(Point::new(0.1, -0.2), image, Some(2.0)).unwrap();
    assert!(point_approx_eq(display, Point::new(480.0, 140.0)));
    let norm = to_normalized(display, image, Some(2.0)).unwrap();
    assert!(point_approx_eq(norm, Point::new(0.1, -0.2)));
}

#[test]
fn free_functions_reject_bad_scale() {
    let image = Size::new(400.0, 300.0);
    assert!(matches!(
        to_display(Point::new(0.0, 0.0), image, Some(-1.0)),
        Err(TransformError::Degenerate { .. })
    ));
}

#[test]
fn error_messages_are_readable() {
    assert_eq!(TransformError::NoImageLoaded.to_string(), "no image loaded");
}
