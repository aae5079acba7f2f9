//! Fixed-point integer paths.
//!
//! Polygon booleans run in an integer coordinate space. Real coordinates are
//! multiplied by a scale factor `M` and rounded on the way in, and divided by
//! `M` on the way out.

use super::{Point, Polygon};
use crate::error::GeometryError;
use nalgebra::{Point2, Rotation2};
use serde::{Deserialize, Serialize};

/// Largest magnitude accepted for a scaled coordinate. Leaves headroom so that
/// rotations and `i128` cross products cannot overflow.
pub const MAX_COORDINATE: f64 = (1u64 << 52) as f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct IntPoint {
    pub x: i64,
    pub y: i64,
}

impl IntPoint {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Scales a real point into integer space, rounding to nearest.
    pub fn from_point(p: &Point, scale: f64) -> Result<Self, GeometryError> {
        Ok(Self {
            x: scale_coordinate(p.x, scale)?,
            y: scale_coordinate(p.y, scale)?,
        })
    }

    pub fn to_point(self, scale: f64) -> Point {
        Point::new(self.x as f64 / scale, self.y as f64 / scale)
    }
}

fn scale_coordinate(value: f64, scale: f64) -> Result<i64, GeometryError> {
    let scaled = (value * scale).round();
    if !scaled.is_finite() || scaled.abs() > MAX_COORDINATE {
        return Err(GeometryError::CoordinateOverflow { value, scale });
    }
    Ok(scaled as i64)
}

/// Closed path in fixed-point integer coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IntPath {
    pub points: Vec<IntPoint>,
}

impl IntPath {
    pub fn new(points: Vec<IntPoint>) -> Self {
        Self { points }
    }

    pub fn from_polygon(polygon: &Polygon, scale: f64) -> Result<Self, GeometryError> {
        let points = polygon
            .vertices
            .iter()
            .map(|p| IntPoint::from_point(p, scale))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { points })
    }

    pub fn to_polygon(&self, scale: f64) -> Polygon {
        self.points.iter().map(|p| p.to_point(scale)).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Rotates about the origin, rounding each coordinate to the nearest integer.
    pub fn rotated(&self, angle: f64) -> IntPath {
        let rotation = Rotation2::new(angle);
        let points = self
            .points
            .iter()
            .map(|p| {
                let r = rotation * Point2::new(p.x as f64, p.y as f64);
                IntPoint::new(r.x.round() as i64, r.y.round() as i64)
            })
            .collect();
        IntPath { points }
    }

    pub fn translated(&self, dx: i64, dy: i64) -> IntPath {
        let points = self
            .points
            .iter()
            .map(|p| IntPoint::new(p.x + dx, p.y + dy))
            .collect();
        IntPath { points }
    }

    /// Twice the signed shoelace area, exact in `i128`.
    pub fn doubled_signed_area(&self) -> i128 {
        let n = self.points.len();
        (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                a.x as i128 * b.y as i128 - b.x as i128 * a.y as i128
            })
            .sum()
    }

    /// Signed area in squared integer units; positive for counter-clockwise paths.
    pub fn signed_area(&self) -> f64 {
        self.doubled_signed_area() as f64 * 0.5
    }

    /// Largest vertex distance from the origin, in integer units.
    pub fn max_radius(&self) -> f64 {
        self.points
            .iter()
            .map(|p| (p.x as f64).hypot(p.y as f64))
            .fold(0.0, f64::max)
    }
}
