// Integration tests for the geometry primitives

use gearsynth_core::geometry::{angle_between, IntPath, Point, Polygon};
use proptest::prelude::*;
use std::f64::consts::TAU;

#[test]
fn test_fixed_point_round_trip_precision() {
    let polygon = Polygon::new(vec![
        Point::new(12.345678, -0.000004),
        Point::new(-200.0, 50.123456),
        Point::new(0.5, 199.999996),
    ]);
    let scale = 100000.0;
    let back = IntPath::from_polygon(&polygon, scale)
        .unwrap()
        .to_polygon(scale);

    for (a, b) in polygon.vertices.iter().zip(&back.vertices) {
        assert!(a.distance_to(b) <= 0.5 / scale * 2f64.sqrt() + 1e-12);
    }
}

#[test]
fn test_fixed_point_area_matches_real_area() {
    let polygon = Polygon::regular(100.0, 10f64.to_radians());
    let scale = 100000.0;
    let path = IntPath::from_polygon(&polygon, scale).unwrap();
    let real = path.signed_area() / (scale * scale);
    assert!((real - polygon.signed_area()).abs() < 0.01);
}

#[test]
fn test_mean_and_max_radius() {
    let polygon = Polygon::new(vec![
        Point::new(3.0, 4.0),
        Point::new(-1.0, 0.0),
        Point::new(0.0, -2.0),
    ]);
    assert!((polygon.mean_radius() - 8.0 / 3.0).abs() < 1e-12);
    assert!((polygon.max_radius() - 5.0).abs() < 1e-12);

    let bounds = polygon.bounds();
    assert!(bounds.is_valid());
    assert_eq!(bounds.width(), 4.0);
    assert_eq!(bounds.height(), 6.0);
}

proptest! {
    #[test]
    fn angle_between_is_normalized(
        ax in -100.0f64..100.0, ay in -100.0f64..100.0,
        bx in -100.0f64..100.0, by in -100.0f64..100.0,
    ) {
        let angle = angle_between(&Point::new(ax, ay), &Point::new(bx, by));
        prop_assert!((0.0..TAU).contains(&angle));
    }

    #[test]
    fn rotation_preserves_radius(x in -500.0f64..500.0, y in -500.0f64..500.0, a in -10.0f64..10.0) {
        let p = Point::new(x, y);
        prop_assert!((p.rotated(a).length() - p.length()).abs() < 1e-9);
    }

    #[test]
    fn rotating_by_angle_between_aligns_vectors(
        ax in 1.0f64..100.0, ay in -100.0f64..100.0,
        bx in -100.0f64..100.0, by in 1.0f64..100.0,
    ) {
        let a = Point::new(ax, ay);
        let b = Point::new(bx, by);
        let turned = a.rotated(angle_between(&a, &b));
        prop_assert!(turned.cross(&b).abs() < 1e-6 * a.length() * b.length());
        prop_assert!(turned.dot(&b) > 0.0);
    }
}
