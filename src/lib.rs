//! # GearSynth
//!
//! Synthesizes a pair of conjugate profiles from a closed loop of control
//! points:
//! - A driving gear (or friction disc) traced along a centripetal spline
//! - The mating body carved from a circular blank by virtual hobbing
//!
//! ## Architecture
//!
//! GearSynth is organized as a workspace with multiple crates:
//!
//! 1. **gearsynth-core** - Geometry primitives, fixed-point paths, errors, callbacks
//! 2. **gearsynth-settings** - Configuration file loading and validation
//! 3. **gearsynth-designer** - Spline, teeth, center distance, hobbing, scene and DXF export
//! 4. **gearsynth** - Command line binary that runs the pipeline and writes DXF files

pub use gearsynth_designer as designer;
pub use gearsynth_settings as settings;

pub use gearsynth_core::{
    CancelToken, Error, ExportError, GeometryError, IntPath, IntPoint, Point, Polygon,
    ProfileKind, Result, SynthesisError,
};

pub use gearsynth_designer::{
    CenterDistance, CenterDistanceSolver, ConjugateProfileSynthesizer, ControlPath, CsgClipper,
    DrivingProfile, DxfExporter, GearPipeline, MatingProfile, PipelineState, SplineEvaluator,
    SplineParams, SynthesisProgress, SynthesisSettings, ToothParams, ToothProfileGenerator,
};

pub use gearsynth_settings::{Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr, so stdout stays free for reports
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
