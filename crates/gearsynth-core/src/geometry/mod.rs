//! Geometry primitives shared by every synthesis stage.
//!
//! Real-valued points, segments and closed polygons, axis-aligned bounds,
//! fixed-point integer paths for the polygon boolean step, and a few angle
//! helpers.

mod bounds;
mod fixed;
mod point;
mod polygon;

pub use bounds::Bounds;
pub use fixed::{IntPath, IntPoint, MAX_COORDINATE};
pub use point::{angle_between, Point, Segment};
pub use polygon::Polygon;

/// Convert radians to degrees.
#[inline]
pub fn to_degrees(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Convert degrees to radians.
#[inline]
pub fn to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Wraps an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(std::f64::consts::TAU);
    // rem_euclid can return TAU itself for tiny negative inputs
    if wrapped >= std::f64::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
        assert!((normalize_angle(5.0 * PI) - PI).abs() < 1e-12);
        assert_eq!(normalize_angle(-1e-18), 0.0);
        assert!(normalize_angle(TAU) < 1e-12);
    }

    #[test]
    fn test_degree_conversions() {
        assert!((to_degrees(PI) - 180.0).abs() < 1e-12);
        assert!((to_radians(90.0) - PI / 2.0).abs() < 1e-12);
    }
}
