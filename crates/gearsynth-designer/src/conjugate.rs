//! Conjugate profile synthesis by virtual hobbing
//!
//! The mating body starts as an uncut circular blank of radius `D` centered on
//! the origin, with the driving body's axis at `(-D, 0)`. For every segment of
//! the driving profile the driver turns clockwise by the angle the segment
//! subtends and the blank turns counter-clockwise by the conjugate angle. The
//! driver outline is then subtracted from the blank. After one revolution
//! what is left of the blank is the mating profile.
//!
//! The blank lives in fixed-point integer coordinates so the boolean engine
//! sees exact input; the driver stays in floating point and is converted
//! afresh at every step.

use crate::center_distance::CenterDistance;
use crate::clipper::{select_main_body, CsgClipper, FillRule, PolygonClipper};
use crate::tooth_profile::DrivingProfile;
use gearsynth_core::{
    angle_between, CancelToken, EventCallback, GeometryError, IntPath, IntPoint, Point, Polygon,
    ProfileKind, SynthesisError,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Fixed-point scale and blank resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SynthesisSettings {
    /// Factor applied to real coordinates before the boolean step
    pub scale: f64,
    /// Angular spacing of the blank vertices in degrees
    pub blank_step_deg: f64,
    /// Which driving outline cuts the blank
    pub kind: ProfileKind,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            scale: 100000.0,
            blank_step_deg: 10.0,
            kind: ProfileKind::Toothed,
        }
    }
}

impl SynthesisSettings {
    pub fn validate(&self) -> Result<(), SynthesisError> {
        if !(self.scale > 0.0 && self.scale.is_finite()) {
            return Err(SynthesisError::invalid_parameter("scale", "must be > 0"));
        }
        if !(self.blank_step_deg > 0.0 && self.blank_step_deg <= 120.0) {
            return Err(SynthesisError::invalid_parameter(
                "blank_step_deg",
                "must be within (0, 120]",
            ));
        }
        Ok(())
    }
}

/// Snapshot delivered after each hobbing step
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisProgress {
    /// Zero-based index of the segment just processed
    pub step: usize,
    pub total_steps: usize,
    /// Driver rotation of this step, radians
    pub driver_angle: f64,
    /// Mating rotation of this step, radians
    pub conjugate_angle: f64,
    /// Accumulated driver rotation, radians
    pub driver_rotation: f64,
    /// Accumulated mating rotation, radians
    pub conjugate_rotation: f64,
    /// Blank area before the cut, real units
    pub area_before: f64,
    /// Blank area after the cut, real units
    pub area_after: f64,
    /// Cutter outline in the driver frame at this step, real units
    pub driver: Polygon,
    /// Remaining blank, fixed-point units
    pub accumulator: IntPath,
    pub scale: f64,
    pub center_distance: f64,
}

/// Synthesized mating body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatingProfile {
    /// Outline in fixed-point units, centered on the mating axis
    pub path: IntPath,
    pub scale: f64,
    pub center_distance: f64,
    /// Rotation applied to the driving profile to put its first vertex on +X
    pub alignment: f64,
    /// Total driver rotation over the run, radians
    pub driver_rotation: f64,
    /// Total mating rotation over the run, radians
    pub conjugate_rotation: f64,
    pub steps: usize,
}

impl MatingProfile {
    /// Outline in real units.
    pub fn polygon(&self) -> Polygon {
        self.path.to_polygon(self.scale)
    }

    /// Largest distance of the outline from the mating axis, real units.
    pub fn bounding_radius(&self) -> f64 {
        self.path.max_radius() / self.scale
    }

    pub fn area(&self) -> f64 {
        self.path.signed_area().abs() / (self.scale * self.scale)
    }
}

/// Carves the mating profile out of a circular blank
#[derive(Debug, Clone, Default)]
pub struct ConjugateProfileSynthesizer<C = CsgClipper> {
    settings: SynthesisSettings,
    clipper: C,
}

impl<C: PolygonClipper> ConjugateProfileSynthesizer<C> {
    pub fn new(settings: SynthesisSettings, clipper: C) -> Self {
        Self { settings, clipper }
    }

    pub fn settings(&self) -> &SynthesisSettings {
        &self.settings
    }

    /// Runs one full revolution.
    ///
    /// `progress` is called after every segment. `cancel` is polled before
    /// every segment; a cancelled run returns `Cancelled` with the number of
    /// completed segments.
    pub fn synthesize(
        &self,
        profile: &DrivingProfile,
        center: &CenterDistance,
        progress: EventCallback<'_, SynthesisProgress>,
        cancel: &CancelToken,
    ) -> Result<MatingProfile, SynthesisError> {
        self.settings.validate()?;

        let pitch = profile.pitch_polygon();
        let cutter = profile.cutter_polygon(self.settings.kind);
        let first = pitch.first().copied().ok_or(GeometryError::EmptyPolygon)?;
        let n = pitch.len();

        let scale = self.settings.scale;
        let d = center.distance;
        if !(d > 0.0 && d.is_finite()) {
            return Err(SynthesisError::invalid_parameter(
                "center_distance",
                format!("{} is not a positive distance", d),
            ));
        }

        let alignment = angle_between(&first, &Point::new(1.0, 0.0));
        let pitch = pitch.rotated(alignment);
        let cutter = cutter.rotated(alignment);

        let blank = Polygon::regular(d, self.settings.blank_step_deg.to_radians());
        let mut accumulator = IntPath::from_polygon(&blank, scale)?;
        let offset = IntPoint::from_point(&Point::new(-d, 0.0), scale)?;
        let area_scale = scale * scale;

        debug!(
            "Hobbing {} segments at center distance {:.6}, blank of {} vertices",
            n,
            d,
            accumulator.len()
        );

        let mut driver_rotation = 0.0;
        let mut conjugate_rotation = 0.0;

        for i in 0..n {
            if cancel.is_cancelled() {
                info!("Synthesis cancelled after {} of {} segments", i, n);
                return Err(SynthesisError::Cancelled { step: i });
            }

            let vertex = pitch.vertices[i];
            let next = pitch.vertices[(i + 1) % n];
            let r1 = vertex.length();
            let r2 = d - r1;
            if r2 <= 0.0 {
                return Err(SynthesisError::DegenerateRadius {
                    index: i,
                    radius: r1,
                    center_distance: d,
                });
            }
            let driver_angle = angle_between(&vertex, &next);
            let conjugate_angle = driver_angle * r1 / r2;

            driver_rotation += driver_angle;
            conjugate_rotation += conjugate_angle;

            // Driver turns clockwise, the blank counter-clockwise.
            let driver = cutter.rotated(-driver_rotation);
            accumulator = accumulator.rotated(conjugate_angle);
            let clip = IntPath::from_polygon(&driver, scale)?.translated(offset.x, offset.y);

            let area_before = accumulator.signed_area().abs() / area_scale;
            let pieces =
                self.clipper
                    .difference(&accumulator, &clip, FillRule::NonZero, FillRule::NonZero);
            let piece_count = pieces.len();
            accumulator =
                select_main_body(pieces).ok_or(SynthesisError::EmptyClipResult { step: i })?;
            let area_after = accumulator.signed_area().abs() / area_scale;

            debug!(
                "Step {}/{}: driver {:.4}°, conjugate {:.4}°, {} pieces, area {:.3} -> {:.3}",
                i + 1,
                n,
                driver_angle.to_degrees(),
                conjugate_angle.to_degrees(),
                piece_count,
                area_before,
                area_after
            );

            progress(&SynthesisProgress {
                step: i,
                total_steps: n,
                driver_angle,
                conjugate_angle,
                driver_rotation,
                conjugate_rotation,
                area_before,
                area_after,
                driver,
                accumulator: accumulator.clone(),
                scale,
                center_distance: d,
            });
        }

        info!(
            "Synthesized mating profile: {} vertices, driver turned {:.4}°, mating turned {:.4}°",
            accumulator.len(),
            driver_rotation.to_degrees(),
            conjugate_rotation.to_degrees()
        );

        Ok(MatingProfile {
            path: accumulator,
            scale,
            center_distance: d,
            alignment,
            driver_rotation,
            conjugate_rotation,
            steps: n,
        })
    }
}
