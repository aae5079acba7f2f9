//! # GearSynth Designer
//!
//! This crate turns a handful of control points into a pair of conjugate
//! profiles: a driving gear (or friction disc) and the mating body it rolls
//! against without slipping.
//!
//! ## Core Components
//!
//! ### Curve
//! - **Control Path**: Angle-sorted closed loop of user points
//! - **Spline**: Centripetal Kochanek-Bartels curve with arc-length tables
//!
//! ### Profiles
//! - **Tooth Profile**: Scalloped teeth pushed along the curve normal
//! - **Center Distance**: PD solver closing the mating rotation at 360°
//! - **Conjugate Synthesis**: Virtual hobbing of a circular blank
//!
//! ### Collaborators
//! - **Clipper**: Polygon difference behind a trait, `csgrs` by default
//! - **Scene**: Segment batches for a host renderer
//! - **Export**: DXF line lists
//!
//! ## Architecture
//!
//! ```text
//! ControlPath
//!   └── SplineEvaluator (position, tangent, arc length)
//!         └── ToothProfileGenerator (driving profile + pitch polygon)
//!               └── CenterDistanceSolver (center distance)
//!                     └── ConjugateProfileSynthesizer (mating profile)
//!
//! GearPipeline (state machine over the stages above)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gearsynth_designer::{GearPipeline, Point};
//! use gearsynth_core::CancelToken;
//!
//! let mut pipeline = GearPipeline::new();
//! for (x, y) in [(0.0, -200.0), (0.0, 200.0), (50.0, 0.0), (-50.0, 0.0)] {
//!     pipeline.add_point(Point::new(x, y));
//! }
//! let mating = pipeline.run(&mut |_| {}, &CancelToken::new())?;
//! println!("{} vertices", mating.path.len());
//! ```

pub mod center_distance;
pub mod clipper;
pub mod conjugate;
pub mod control_path;
pub mod export;
pub mod pipeline;
pub mod scene;
pub mod spline;
pub mod tooth_profile;

pub use gearsynth_core::{Point, Polygon};

pub use center_distance::{
    conjugate_angle, CenterDistance, CenterDistanceSolver, PdController, SolverSettings,
};
pub use clipper::{select_main_body, CsgClipper, FillRule, PolygonClipper};
pub use conjugate::{
    ConjugateProfileSynthesizer, MatingProfile, SynthesisProgress, SynthesisSettings,
};
pub use control_path::{ControlPath, ControlPoint};
pub use export::DxfExporter;
pub use pipeline::{GearPipeline, PipelineState, MIN_SYNTHESIS_POINTS};
pub use scene::{
    render_pipeline, render_progress, DrawMode, RecordingRenderer, Rgba, SceneRenderer,
    SegmentBatch,
};
pub use spline::{CurveSample, SplineEvaluator, SplineParams, MIN_CURVE_POINTS};
pub use tooth_profile::{
    radial_modulation, DrivingProfile, ProfileKind, ProfileVertex, ToothParams,
    ToothProfileGenerator,
};
