//! Tooth profile generation
//!
//! Walks the pitch curve at equal arc-length steps and pushes each sample
//! along the outward normal by a periodic half-circle scallop. One scallop
//! period is one tooth: the first half bulges outward (addendum), the second
//! half dips inward (dedendum).

use crate::spline::SplineEvaluator;
use gearsynth_core::{GeometryError, Point, Polygon, SynthesisError};
pub use gearsynth_core::ProfileKind;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Tooth count and sampling density
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToothParams {
    pub teeth: usize,
    pub samples_per_tooth: usize,
}

impl Default for ToothParams {
    fn default() -> Self {
        Self {
            teeth: 12,
            samples_per_tooth: 8,
        }
    }
}

impl ToothParams {
    pub fn new(teeth: usize, samples_per_tooth: usize) -> Self {
        Self {
            teeth,
            samples_per_tooth,
        }
    }

    pub fn validate(&self) -> Result<(), SynthesisError> {
        if self.teeth == 0 {
            return Err(SynthesisError::invalid_parameter("teeth", "must be at least 1"));
        }
        if self.samples_per_tooth == 0 {
            return Err(SynthesisError::invalid_parameter(
                "samples_per_tooth",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    pub fn sample_count(&self) -> usize {
        self.teeth * self.samples_per_tooth
    }
}

/// Half-circle scallop over one tooth period.
///
/// `normalized` is the position within the period in `[0, 1)`. Returns a value
/// in `[-1, 1]`: positive on the first half, negative on the second.
pub fn radial_modulation(normalized: f64) -> f64 {
    let half_circle = |x: f64| (1.0 - (4.0 * x - 1.0).powi(2)).max(0.0).sqrt();
    if normalized < 0.5 {
        half_circle(normalized)
    } else {
        -half_circle(normalized - 0.5)
    }
}

/// One sample of the driving profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileVertex {
    /// Displaced point on the toothed outline
    pub tooth: Point,
    /// Undisplaced point on the pitch curve
    pub pitch: Point,
    /// Distance of the pitch point from the rotation axis
    pub radius: f64,
    /// Arc length from the start of the curve
    pub distance: f64,
    /// Curve parameter of the sample
    pub t: f64,
}

/// Driving body outline sampled along the pitch curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrivingProfile {
    pub vertices: Vec<ProfileVertex>,
    pub total_length: f64,
    pub tooth_width: f64,
    /// Samples dropped because their distance fell past the end of the curve
    pub skipped_samples: usize,
}

impl DrivingProfile {
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Toothed outline.
    pub fn tooth_polygon(&self) -> Polygon {
        self.vertices.iter().map(|v| v.tooth).collect()
    }

    /// Pure spline outline at the same samples.
    pub fn pitch_polygon(&self) -> Polygon {
        self.vertices.iter().map(|v| v.pitch).collect()
    }

    /// Outline that cuts the mating blank and is exported for the driver.
    pub fn cutter_polygon(&self, kind: ProfileKind) -> Polygon {
        match kind {
            ProfileKind::Toothed => self.tooth_polygon(),
            ProfileKind::FrictionDisc => self.pitch_polygon(),
        }
    }
}

/// Builds the driving profile from a measured spline
#[derive(Debug, Clone, Default)]
pub struct ToothProfileGenerator {
    params: ToothParams,
}

impl ToothProfileGenerator {
    pub fn new(params: ToothParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ToothParams {
        &self.params
    }

    pub fn generate(&self, spline: &SplineEvaluator) -> Result<DrivingProfile, SynthesisError> {
        self.params.validate()?;

        let total_length = spline.total_length();
        if !total_length.is_finite() {
            return Err(GeometryError::NonFinite {
                context: "curve length".to_string(),
            }
            .into());
        }
        if total_length <= 0.0 {
            return Err(SynthesisError::invalid_parameter(
                "control_points",
                "curve has zero length",
            ));
        }

        let tooth_width = total_length / self.params.teeth as f64;
        let sampling_step = tooth_width / self.params.samples_per_tooth as f64;
        let depth = tooth_width / 4.0;

        let mut vertices = Vec::with_capacity(self.params.sample_count());
        let mut skipped_samples = 0;

        // The sample at exactly `total_length` would repeat the first one.
        for k in 0..self.params.sample_count() {
            let distance = k as f64 * sampling_step;
            let Some(t) = spline.parameter_at_distance(distance) else {
                skipped_samples += 1;
                continue;
            };

            let normalized = (distance / tooth_width).rem_euclid(1.0);
            let modulation = radial_modulation(normalized);

            let sample = spline.sample(t);
            let normal_angle = (-sample.tangent.y).atan2(sample.tangent.x);
            let outward = Point::new(-normal_angle.sin(), -normal_angle.cos());
            let tooth = sample.position + outward * (depth * modulation);

            vertices.push(ProfileVertex {
                tooth,
                pitch: sample.position,
                radius: sample.position.length(),
                distance,
                t,
            });
        }

        if skipped_samples > 0 {
            warn!(
                "Skipped {} samples beyond the end of the curve",
                skipped_samples
            );
        }
        if vertices.is_empty() {
            return Err(GeometryError::EmptyPolygon.into());
        }

        info!(
            "Generated driving profile: {} vertices, {} teeth, tooth width {:.4}",
            vertices.len(),
            self.params.teeth,
            tooth_width
        );

        Ok(DrivingProfile {
            vertices,
            total_length,
            tooth_width,
            skipped_samples,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radial_modulation_shape() {
        assert!(radial_modulation(0.0).abs() < 1e-12);
        assert!((radial_modulation(0.25) - 1.0).abs() < 1e-12);
        assert!(radial_modulation(0.5).abs() < 1e-12);
        assert!((radial_modulation(0.75) + 1.0).abs() < 1e-12);
        assert!(radial_modulation(0.999).abs() < 0.1);
    }

    #[test]
    fn test_radial_modulation_is_bounded() {
        for k in 0..1000 {
            let m = radial_modulation(k as f64 / 1000.0);
            assert!((-1.0..=1.0).contains(&m));
        }
    }

    #[test]
    fn test_params_validation() {
        assert!(ToothParams::new(0, 8).validate().is_err());
        assert!(ToothParams::new(12, 0).validate().is_err());
        assert!(ToothParams::new(1, 1).validate().is_ok());
        assert_eq!(ToothParams::default().sample_count(), 96);
    }
}
