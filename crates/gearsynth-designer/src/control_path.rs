//! Control path
//!
//! The ordered loop of user-placed control points. Points are kept sorted by
//! polar angle about the path origin, so iterating the path walks the loop
//! counter-clockwise and the last point connects back to the first.

use gearsynth_core::Point;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A user-placed point on the control loop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub position: Point,
    /// Polar angle about the path origin, in `[0, 2π)`
    pub angle: f64,
    /// Arc length of the curve segment starting at this point, once measured
    pub segment_length: Option<f64>,
}

/// Angle-sorted closed loop of control points
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlPath {
    points: Vec<ControlPoint>,
    origin: Point,
}

impl ControlPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path whose angles are measured about `origin` instead of (0, 0).
    pub fn with_origin(origin: Point) -> Self {
        Self {
            points: Vec::new(),
            origin,
        }
    }

    /// Builds a path by adding each point in turn. Coincident points are dropped.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        let mut path = Self::new();
        for p in points {
            path.add_point(p);
        }
        path
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Inserts `p` in angular order.
    ///
    /// Returns `false` and leaves the path unchanged when a point already sits
    /// at exactly the same position.
    pub fn add_point(&mut self, p: Point) -> bool {
        if let Some((_, nearest)) = self.nearest(&p) {
            if nearest.position.distance_to(&p) == 0.0 {
                debug!("Ignoring coincident control point ({}, {})", p.x, p.y);
                return false;
            }
        }

        let angle = (p - self.origin).polar_angle();
        self.points.push(ControlPoint {
            position: p,
            angle,
            segment_length: None,
        });
        self.points.sort_by(|a, b| a.angle.total_cmp(&b.angle));
        self.invalidate();

        debug!(
            "Added control point ({}, {}) at {:.3} rad, {} points",
            p.x,
            p.y,
            angle,
            self.points.len()
        );
        true
    }

    /// Removes the point nearest to `p`, if any.
    pub fn remove_point(&mut self, p: &Point) -> Option<ControlPoint> {
        let (index, _) = self.nearest(p)?;
        let removed = self.points.remove(index);
        self.invalidate();
        debug!(
            "Removed control point ({}, {}), {} points left",
            removed.position.x,
            removed.position.y,
            self.points.len()
        );
        Some(removed)
    }

    /// Linear scan for the point closest to `p`.
    pub fn nearest(&self, p: &Point) -> Option<(usize, &ControlPoint)> {
        self.points
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                a.position
                    .distance_to(p)
                    .total_cmp(&b.position.distance_to(p))
            })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn positions(&self) -> Vec<Point> {
        self.points.iter().map(|c| c.position).collect()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Stores measured segment lengths, one per point in path order.
    pub fn record_segment_lengths(&mut self, lengths: &[f64]) {
        for (point, length) in self.points.iter_mut().zip(lengths) {
            point.segment_length = Some(*length);
        }
    }

    fn invalidate(&mut self) {
        for point in &mut self.points {
            point.segment_length = None;
        }
    }
}
