//! Closed centripetal spline through the control points.
//!
//! Each segment is a cubic Hermite patch between control points `i` and
//! `i + 1`, with tangents blended from the neighbors `i - 1` and `i + 2`
//! using knot spacing `distance^alpha` (Kochanek-Bartels style tension).
//! Neighbor indices wrap, so the tangent direction is continuous all the way
//! around the loop.
//!
//! The global parameter `t` runs over `[0, N)` for `N` control points: the
//! integer part selects the segment and the fractional part is the local
//! parameter.

use crate::control_path::ControlPath;
use gearsynth_core::{Point, SynthesisError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum number of control points for a closed curve.
pub const MIN_CURVE_POINTS: usize = 3;

/// Curve shape and integration parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplineParams {
    /// Knot exponent: 0 uniform, 0.5 centripetal, 1 chordal.
    pub alpha: f64,
    /// Tangent tension in `[0, 1]`; 1 collapses the tangents.
    pub tension: f64,
    /// Parameter step for arc-length integration.
    pub step: f64,
}

impl Default for SplineParams {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            tension: 0.0,
            step: 0.0005,
        }
    }
}

impl SplineParams {
    pub fn new(alpha: f64, tension: f64) -> Self {
        Self {
            alpha,
            tension,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SynthesisError> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(SynthesisError::invalid_parameter(
                "alpha",
                format!("{} is outside [0, 1]", self.alpha),
            ));
        }
        if !(0.0..=1.0).contains(&self.tension) {
            return Err(SynthesisError::invalid_parameter(
                "tension",
                format!("{} is outside [0, 1]", self.tension),
            ));
        }
        if !(self.step > 0.0 && self.step <= 1.0) {
            return Err(SynthesisError::invalid_parameter(
                "step",
                format!("{} is outside (0, 1]", self.step),
            ));
        }
        Ok(())
    }
}

/// Position and tangent of the curve at a global parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    pub t: f64,
    pub position: Point,
    pub tangent: Point,
}

/// Cubic coefficients of one segment: `a·u³ + b·u² + c·u + d`.
#[derive(Debug, Clone, Copy)]
struct Cubic {
    a: Point,
    b: Point,
    c: Point,
    d: Point,
}

impl Cubic {
    fn position(&self, u: f64) -> Point {
        ((self.a * u + self.b) * u + self.c) * u + self.d
    }

    fn derivative(&self, u: f64) -> Point {
        (self.a * (3.0 * u) + self.b * 2.0) * u + self.c
    }
}

/// Evaluates the closed spline and its arc length.
///
/// The evaluator snapshots the control positions and measures the curve on
/// construction, so the length tables always belong to the points and
/// parameters it was built from. Rebuild it after any change.
#[derive(Debug, Clone)]
pub struct SplineEvaluator {
    points: Vec<Point>,
    params: SplineParams,
    segments: Vec<Cubic>,
    segment_lengths: Vec<f64>,
    total_length: f64,
}

impl SplineEvaluator {
    pub fn new(path: &ControlPath, params: SplineParams) -> Result<Self, SynthesisError> {
        Self::from_positions(path.positions(), params)
    }

    pub fn from_positions(points: Vec<Point>, params: SplineParams) -> Result<Self, SynthesisError> {
        params.validate()?;
        if points.len() < MIN_CURVE_POINTS {
            return Err(SynthesisError::InsufficientPoints {
                required: MIN_CURVE_POINTS,
                available: points.len(),
            });
        }

        let segments = (0..points.len())
            .map(|i| segment_cubic(&points, i, &params))
            .collect();
        let mut evaluator = Self {
            segment_lengths: vec![0.0; points.len()],
            points,
            params,
            segments,
            total_length: 0.0,
        };
        evaluator.measure();

        debug!(
            "Spline through {} points: length {:.4} (alpha {}, tension {})",
            evaluator.points.len(),
            evaluator.total_length,
            params.alpha,
            params.tension
        );
        Ok(evaluator)
    }

    pub fn params(&self) -> &SplineParams {
        &self.params
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Parameter domain end, equal to the number of control points.
    pub fn domain(&self) -> f64 {
        self.points.len() as f64
    }

    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Arc length of each segment, indexed by its starting control point.
    pub fn segment_lengths(&self) -> &[f64] {
        &self.segment_lengths
    }

    pub fn position(&self, t: f64) -> Point {
        let (segment, u) = self.locate(t);
        self.segments[segment].position(u)
    }

    /// Derivative of the position with respect to the local parameter.
    pub fn tangent(&self, t: f64) -> Point {
        let (segment, u) = self.locate(t);
        self.segments[segment].derivative(u)
    }

    pub fn sample(&self, t: f64) -> CurveSample {
        let (segment, u) = self.locate(t);
        let cubic = &self.segments[segment];
        CurveSample {
            t,
            position: cubic.position(u),
            tangent: cubic.derivative(u),
        }
    }

    /// Parameter at which the arc length measured from `t = 0` reaches `distance`.
    ///
    /// Skips whole segments using the measured segment lengths, then walks the
    /// containing segment with the integration step. Returns `None` only when
    /// the distance lies beyond the end of the curve; a distance of exactly
    /// the total length maps to the end of the domain.
    pub fn parameter_at_distance(&self, distance: f64) -> Option<f64> {
        if self.total_length <= 0.0 || distance > self.total_length {
            return None;
        }
        if distance <= 0.0 {
            return Some(0.0);
        }

        let mut remaining = distance;
        for (i, length) in self.segment_lengths.iter().enumerate() {
            if remaining > *length {
                remaining -= length;
                continue;
            }
            return Some(self.walk(i as f64, remaining));
        }
        // Rounding left a sliver past the last segment
        Some(self.domain())
    }

    /// Walks forward from `start` until `remaining` arc length is consumed.
    /// Chord-sum drift at the very end clamps to the domain end.
    fn walk(&self, start: f64, mut remaining: f64) -> f64 {
        if remaining <= 0.0 {
            return start;
        }

        let end = self.domain();
        let mut prev = self.position(start);
        let mut k = 1usize;
        loop {
            let t = (start + k as f64 * self.params.step).min(end);
            let p = self.position(t);
            remaining -= prev.distance_to(&p);
            if remaining <= 0.0 || t >= end {
                return t;
            }
            prev = p;
            k += 1;
        }
    }

    fn locate(&self, t: f64) -> (usize, f64) {
        let n = self.points.len();
        let t = t.rem_euclid(n as f64);
        let segment = (t.floor() as usize).min(n - 1);
        (segment, t - segment as f64)
    }

    /// Chord-sums the curve at the integration step, attributing each chord to
    /// the segment containing its midpoint parameter.
    fn measure(&mut self) {
        let n = self.points.len();
        let end = n as f64;
        let steps = ((end / self.params.step).round() as usize).max(1);

        self.segment_lengths = vec![0.0; n];
        self.total_length = 0.0;

        let mut prev = self.position(0.0);
        for k in 1..=steps {
            let t = if k == steps {
                end
            } else {
                k as f64 * self.params.step
            };
            let p = self.position(t);
            let chord = prev.distance_to(&p);
            let segment = (((k as f64 - 0.5) * self.params.step).floor() as usize).min(n - 1);
            self.segment_lengths[segment] += chord;
            self.total_length += chord;
            prev = p;
        }
    }
}

fn segment_cubic(points: &[Point], segment: usize, params: &SplineParams) -> Cubic {
    let n = points.len();
    let i1 = segment;
    let i2 = (i1 + 1) % n;
    let i3 = (i2 + 1) % n;
    let i0 = if i1 >= 1 { i1 - 1 } else { n - 1 };
    let (p0, p1, p2, p3) = (points[i0], points[i1], points[i2], points[i3]);

    let t0 = 0.0;
    let t1 = t0 + p0.distance_to(&p1).powf(params.alpha);
    let t2 = t1 + p1.distance_to(&p2).powf(params.alpha);
    let t3 = t2 + p2.distance_to(&p3).powf(params.alpha);

    let weight = (1.0 - params.tension) * (t2 - t1);
    let m1 = ((p1 - p0) / (t1 - t0) - (p2 - p0) / (t2 - t0) + (p2 - p1) / (t2 - t1)) * weight;
    let m2 = ((p2 - p1) / (t2 - t1) - (p3 - p1) / (t3 - t1) + (p3 - p2) / (t3 - t2)) * weight;

    Cubic {
        a: (p1 - p2) * 2.0 + m1 + m2,
        b: (p1 - p2) * -3.0 - m1 * 2.0 - m2,
        c: m1,
        d: p1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> ControlPath {
        ControlPath::from_points([
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(-10.0, 0.0),
            Point::new(0.0, -10.0),
        ])
    }

    #[test]
    fn test_curve_interpolates_control_points() {
        let spline = SplineEvaluator::new(&square(), SplineParams::default()).unwrap();
        for (i, p) in spline.points().iter().enumerate() {
            assert!(spline.position(i as f64).distance_to(p) < 1e-9);
        }
        // wraps at the end of the domain
        assert!(spline.position(4.0).distance_to(&Point::new(10.0, 0.0)) < 1e-9);
        assert!(spline.position(-1.0).distance_to(&Point::new(0.0, -10.0)) < 1e-9);
    }

    #[test]
    fn test_tangent_is_continuous_across_segments() {
        let spline = SplineEvaluator::new(&square(), SplineParams::default()).unwrap();
        let before = spline.tangent(1.0 - 1e-9);
        let after = spline.tangent(1.0);
        assert!(before.distance_to(&after) < 1e-6);
    }

    #[test]
    fn test_full_tension_collapses_tangents() {
        let params = SplineParams::new(0.5, 1.0);
        let spline = SplineEvaluator::new(&square(), params).unwrap();
        assert!(spline.tangent(0.0).length() < 1e-12);
        // straight chords between control points
        let mid = spline.position(0.5);
        assert!(mid.distance_to(&Point::new(5.0, 5.0)) < 1e-9);
    }

    #[test]
    fn test_segment_lengths_sum_to_total() {
        let spline = SplineEvaluator::new(&square(), SplineParams::default()).unwrap();
        let sum: f64 = spline.segment_lengths().iter().sum();
        assert!((sum - spline.total_length()).abs() < 1e-9);
        // symmetric shape, symmetric segments
        for length in spline.segment_lengths() {
            assert!((length - spline.total_length() / 4.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_full_length_maps_to_domain_end() {
        let spline = SplineEvaluator::new(&square(), SplineParams::default()).unwrap();
        let total = spline.total_length();
        assert_eq!(spline.parameter_at_distance(total), Some(spline.domain()));
        assert!(spline.parameter_at_distance(total + 1e-6).is_none());
    }

    #[test]
    fn test_invalid_params_are_rejected() {
        let params = SplineParams::new(1.5, 0.0);
        assert!(matches!(
            SplineEvaluator::new(&square(), params),
            Err(SynthesisError::InvalidParameter { .. })
        ));
    }
}
