//! Synthesis pipeline state machine
//!
//! Owns the control path, every stage's parameters and the last successful
//! output of every stage. Stages run in order:
//!
//! `Empty → PathDefined → CurveReady → ProfileReady → DistanceSolved → ProfileSynthesized`
//!
//! Editing the path or any parameter drops the state back to `PathDefined`
//! (or `Empty`). Outputs are only replaced by a successful stage, so a failing
//! stage leaves the previous results in place.

use crate::center_distance::{CenterDistance, CenterDistanceSolver, SolverSettings};
use crate::clipper::CsgClipper;
use crate::conjugate::{
    ConjugateProfileSynthesizer, MatingProfile, SynthesisProgress, SynthesisSettings,
};
use crate::control_path::{ControlPath, ControlPoint};
use crate::spline::{SplineEvaluator, SplineParams, MIN_CURVE_POINTS};
use crate::tooth_profile::{DrivingProfile, ProfileKind, ToothParams, ToothProfileGenerator};
use gearsynth_core::{CancelToken, EventCallback, Point, SynthesisError};
use gearsynth_settings::Config;
use tracing::{debug, info};

/// Minimum number of control points for gear synthesis.
pub const MIN_SYNTHESIS_POINTS: usize = 4;

/// Pipeline progress, ordered by stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum PipelineState {
    #[default]
    Empty,
    PathDefined,
    CurveReady,
    ProfileReady,
    DistanceSolved,
    ProfileSynthesized,
}

impl PipelineState {
    /// Returns the name of the state.
    pub fn name(&self) -> &'static str {
        match self {
            PipelineState::Empty => "Empty",
            PipelineState::PathDefined => "PathDefined",
            PipelineState::CurveReady => "CurveReady",
            PipelineState::ProfileReady => "ProfileReady",
            PipelineState::DistanceSolved => "DistanceSolved",
            PipelineState::ProfileSynthesized => "ProfileSynthesized",
        }
    }
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Control path, parameters and stage outputs of one gear pair
#[derive(Debug, Clone, Default)]
pub struct GearPipeline {
    path: ControlPath,
    spline_params: SplineParams,
    tooth_params: ToothParams,
    solver_settings: SolverSettings,
    synthesis_settings: SynthesisSettings,
    state: PipelineState,
    curve: Option<SplineEvaluator>,
    profile: Option<DrivingProfile>,
    center_distance: Option<CenterDistance>,
    mating: Option<MatingProfile>,
}

impl GearPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a pipeline from validated configuration.
    pub fn from_config(config: &Config) -> Result<Self, SynthesisError> {
        let mut pipeline = Self::new();
        pipeline.set_spline_params(SplineParams {
            alpha: config.curve.alpha,
            tension: config.curve.tension,
            step: config.curve.integration_step,
        })?;
        pipeline.set_tooth_params(ToothParams::new(
            config.profile.teeth,
            config.profile.samples_per_tooth,
        ))?;
        pipeline.set_solver_settings(SolverSettings {
            kp: config.solver.kp,
            kd: config.solver.kd,
            tolerance_deg: config.solver.tolerance_deg,
            max_iterations: config.solver.max_iterations,
        })?;
        pipeline.set_synthesis_settings(SynthesisSettings {
            scale: config.synthesis.scale,
            blank_step_deg: config.synthesis.blank_step_deg,
            kind: config.profile.kind,
        })?;
        for [x, y] in &config.control_points {
            pipeline.add_point(Point::new(*x, *y));
        }
        Ok(pipeline)
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn path(&self) -> &ControlPath {
        &self.path
    }

    pub fn spline_params(&self) -> &SplineParams {
        &self.spline_params
    }

    pub fn tooth_params(&self) -> &ToothParams {
        &self.tooth_params
    }

    pub fn solver_settings(&self) -> &SolverSettings {
        &self.solver_settings
    }

    pub fn synthesis_settings(&self) -> &SynthesisSettings {
        &self.synthesis_settings
    }

    pub fn profile_kind(&self) -> ProfileKind {
        self.synthesis_settings.kind
    }

    /// Last successfully built curve.
    pub fn curve(&self) -> Option<&SplineEvaluator> {
        self.curve.as_ref()
    }

    /// Last successfully generated driving profile.
    pub fn profile(&self) -> Option<&DrivingProfile> {
        self.profile.as_ref()
    }

    /// Last successfully solved center distance.
    pub fn center_distance(&self) -> Option<&CenterDistance> {
        self.center_distance.as_ref()
    }

    /// Last successfully synthesized mating profile.
    pub fn mating(&self) -> Option<&MatingProfile> {
        self.mating.as_ref()
    }

    /// Adds a control point. Returns `false` for a coincident point.
    pub fn add_point(&mut self, p: Point) -> bool {
        let added = self.path.add_point(p);
        if added {
            self.reset();
        }
        added
    }

    pub fn remove_point(&mut self, p: &Point) -> Option<ControlPoint> {
        let removed = self.path.remove_point(p)?;
        self.reset();
        Some(removed)
    }

    pub fn clear_points(&mut self) {
        self.path.clear();
        self.reset();
    }

    pub fn set_spline_params(&mut self, params: SplineParams) -> Result<(), SynthesisError> {
        params.validate()?;
        self.spline_params = params;
        self.reset();
        Ok(())
    }

    pub fn set_tooth_params(&mut self, params: ToothParams) -> Result<(), SynthesisError> {
        params.validate()?;
        self.tooth_params = params;
        self.reset();
        Ok(())
    }

    pub fn set_solver_settings(&mut self, settings: SolverSettings) -> Result<(), SynthesisError> {
        settings.validate()?;
        self.solver_settings = settings;
        self.reset();
        Ok(())
    }

    pub fn set_synthesis_settings(
        &mut self,
        settings: SynthesisSettings,
    ) -> Result<(), SynthesisError> {
        settings.validate()?;
        self.synthesis_settings = settings;
        self.reset();
        Ok(())
    }

    pub fn set_profile_kind(&mut self, kind: ProfileKind) {
        self.synthesis_settings.kind = kind;
        self.reset();
    }

    /// Fits and measures the curve through the control points.
    pub fn build_curve(&mut self) -> Result<&SplineEvaluator, SynthesisError> {
        self.require(PipelineState::PathDefined)?;
        let curve = SplineEvaluator::new(&self.path, self.spline_params)?;
        self.path.record_segment_lengths(curve.segment_lengths());
        self.state = PipelineState::CurveReady;
        Ok(&*self.curve.insert(curve))
    }

    pub fn build_profile(&mut self) -> Result<&DrivingProfile, SynthesisError> {
        self.require(PipelineState::CurveReady)?;
        let curve = self.curve.as_ref().ok_or_else(|| self.not_ready(PipelineState::CurveReady))?;
        let profile = ToothProfileGenerator::new(self.tooth_params).generate(curve)?;
        self.state = PipelineState::ProfileReady;
        Ok(&*self.profile.insert(profile))
    }

    /// Solves the center distance over the pitch outline.
    pub fn solve_center_distance(&mut self) -> Result<&CenterDistance, SynthesisError> {
        self.require(PipelineState::ProfileReady)?;
        let profile = self
            .profile
            .as_ref()
            .ok_or_else(|| self.not_ready(PipelineState::ProfileReady))?;
        let solved = CenterDistanceSolver::new(self.solver_settings).solve(&profile.pitch_polygon())?;
        self.state = PipelineState::DistanceSolved;
        Ok(&*self.center_distance.insert(solved))
    }

    pub fn synthesize(
        &mut self,
        progress: EventCallback<'_, SynthesisProgress>,
        cancel: &CancelToken,
    ) -> Result<&MatingProfile, SynthesisError> {
        self.require(PipelineState::DistanceSolved)?;
        if self.path.len() < MIN_SYNTHESIS_POINTS {
            return Err(SynthesisError::InsufficientPoints {
                required: MIN_SYNTHESIS_POINTS,
                available: self.path.len(),
            });
        }
        let (Some(profile), Some(center)) = (&self.profile, &self.center_distance) else {
            return Err(self.not_ready(PipelineState::DistanceSolved));
        };

        let synthesizer = ConjugateProfileSynthesizer::new(self.synthesis_settings, CsgClipper);
        let mating = synthesizer.synthesize(profile, center, progress, cancel)?;
        self.state = PipelineState::ProfileSynthesized;
        Ok(&*self.mating.insert(mating))
    }

    /// Runs every stage from the curve to the mating profile.
    pub fn run(
        &mut self,
        progress: EventCallback<'_, SynthesisProgress>,
        cancel: &CancelToken,
    ) -> Result<&MatingProfile, SynthesisError> {
        info!(
            "Running pipeline: {} control points, {} teeth, {} samples per tooth, {}",
            self.path.len(),
            self.tooth_params.teeth,
            self.tooth_params.samples_per_tooth,
            self.synthesis_settings.kind
        );
        self.build_curve()?;
        self.build_profile()?;
        self.solve_center_distance()?;
        self.synthesize(progress, cancel)
    }

    fn reset(&mut self) {
        let state = if self.path.is_empty() {
            PipelineState::Empty
        } else {
            PipelineState::PathDefined
        };
        if state != self.state {
            debug!("Pipeline state {} -> {}", self.state, state);
        }
        self.state = state;
    }

    fn require(&self, required: PipelineState) -> Result<(), SynthesisError> {
        if required == PipelineState::PathDefined && self.path.len() < MIN_CURVE_POINTS {
            return Err(SynthesisError::InsufficientPoints {
                required: MIN_CURVE_POINTS,
                available: self.path.len(),
            });
        }
        if self.state < required {
            return Err(self.not_ready(required));
        }
        Ok(())
    }

    fn not_ready(&self, required: PipelineState) -> SynthesisError {
        SynthesisError::StageNotReady {
            required: required.name().to_string(),
            current: self.state.name().to_string(),
        }
    }
}
