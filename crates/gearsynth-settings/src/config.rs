//! Configuration and settings management for GearSynth
//!
//! Provides configuration file handling, defaults, and validation.
//! Supports JSON and TOML file formats; the default file lives in the
//! platform-specific configuration directory.
//!
//! Configuration is organized into logical sections:
//! - Curve settings (spline shape and arc-length integration)
//! - Profile settings (teeth, sampling, toothed or friction disc)
//! - Solver settings (PD gains, tolerance, iteration cap)
//! - Synthesis settings (fixed-point scale, blank resolution)
//! - Export settings (output directory and file names)

use crate::error::{ConfigError, SettingsError, SettingsResult};
pub use gearsynth_core::ProfileKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Control points of the reference shape loaded when nothing else is given.
pub const DEFAULT_CONTROL_POINTS: [[f64; 2]; 4] =
    [[0.0, -200.0], [0.0, 200.0], [50.0, 0.0], [-50.0, 0.0]];

/// Spline shape and arc-length integration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveSection {
    /// Knot parametrization exponent (0 uniform, 0.5 centripetal, 1 chordal)
    pub alpha: f64,
    /// Tangent tension in [0, 1]
    pub tension: f64,
    /// Parameter step used when integrating arc length, within (0, 1]
    pub integration_step: f64,
}

impl Default for CurveSection {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            tension: 0.0,
            integration_step: 0.0005,
        }
    }
}

/// Driving profile settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSection {
    /// Number of teeth around the curve
    pub teeth: usize,
    /// Samples taken per tooth period
    pub samples_per_tooth: usize,
    /// Toothed gear or plain friction disc
    pub kind: ProfileKind,
}

impl Default for ProfileSection {
    fn default() -> Self {
        Self {
            teeth: 12,
            samples_per_tooth: 8,
            kind: ProfileKind::Toothed,
        }
    }
}

/// Center distance solver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSection {
    /// Proportional gain
    pub kp: f64,
    /// Derivative gain
    pub kd: f64,
    /// Closure tolerance in degrees
    pub tolerance_deg: f64,
    /// Iteration cap before giving up
    pub max_iterations: usize,
}

impl Default for SolverSection {
    fn default() -> Self {
        Self {
            kp: 0.1,
            kd: 0.02,
            tolerance_deg: 0.005,
            max_iterations: 1000,
        }
    }
}

/// Mating profile synthesis settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisSection {
    /// Fixed-point scale factor applied before polygon booleans
    pub scale: f64,
    /// Angular spacing of the uncut blank vertices, in degrees
    pub blank_step_deg: f64,
}

impl Default for SynthesisSection {
    fn default() -> Self {
        Self {
            scale: 100000.0,
            blank_step_deg: 10.0,
        }
    }
}

/// DXF export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// Directory receiving the exported files
    pub output_directory: PathBuf,
    /// File name of the driving profile
    pub driver_file: String,
    /// File name of the mating profile
    pub mating_file: String,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("."),
            driver_file: "gear1.dxf".to_string(),
            mating_file: "gear2.dxf".to_string(),
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Control points as `[x, y]` pairs
    pub control_points: Vec<[f64; 2]>,
    /// Curve settings
    pub curve: CurveSection,
    /// Profile settings
    pub profile: ProfileSection,
    /// Solver settings
    pub solver: SolverSection,
    /// Synthesis settings
    pub synthesis: SynthesisSection,
    /// Export settings
    pub export: ExportSection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            control_points: DEFAULT_CONTROL_POINTS.to_vec(),
            curve: CurveSection::default(),
            profile: ProfileSection::default(),
            solver: SolverSection::default(),
            synthesis: SynthesisSection::default(),
            export: ExportSection::default(),
        }
    }
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("<none>").to_string()).into()),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location: `<config dir>/gearsynth/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
        })?;
        Ok(dir.join("gearsynth").join("config.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::ConfigDirectory(e.to_string()))?;
        }
        std::fs::write(path, content)?;
        debug!("Saved config to {}", path.display());

        Ok(())
    }

    /// Path of the exported driving profile
    pub fn driver_path(&self) -> PathBuf {
        self.export.output_directory.join(&self.export.driver_file)
    }

    /// Path of the exported mating profile
    pub fn mating_path(&self) -> PathBuf {
        self.export.output_directory.join(&self.export.mating_file)
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        // Curve
        if !(0.0..=1.0).contains(&self.curve.alpha) {
            return Err(SettingsError::invalid("curve.alpha", "must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.curve.tension) {
            return Err(SettingsError::invalid("curve.tension", "must be within [0, 1]"));
        }
        if !(self.curve.integration_step > 0.0 && self.curve.integration_step <= 1.0) {
            return Err(SettingsError::invalid(
                "curve.integration_step",
                "must be within (0, 1]",
            ));
        }

        // Profile
        if self.profile.teeth == 0 {
            return Err(SettingsError::invalid("profile.teeth", "must be at least 1"));
        }
        if self.profile.samples_per_tooth == 0 {
            return Err(SettingsError::invalid(
                "profile.samples_per_tooth",
                "must be at least 1",
            ));
        }

        // Solver
        for (key, value) in [
            ("solver.kp", self.solver.kp),
            ("solver.kd", self.solver.kd),
            ("solver.tolerance_deg", self.solver.tolerance_deg),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(SettingsError::invalid(key, "must be > 0"));
            }
        }
        if self.solver.max_iterations == 0 {
            return Err(SettingsError::invalid("solver.max_iterations", "must be > 0"));
        }

        // Synthesis
        if !(self.synthesis.scale > 0.0 && self.synthesis.scale.is_finite()) {
            return Err(SettingsError::invalid("synthesis.scale", "must be > 0"));
        }
        if !(self.synthesis.blank_step_deg > 0.0 && self.synthesis.blank_step_deg <= 120.0) {
            return Err(SettingsError::invalid(
                "synthesis.blank_step_deg",
                "must be within (0, 120]",
            ));
        }

        if self
            .control_points
            .iter()
            .any(|p| !p[0].is_finite() || !p[1].is_finite())
        {
            return Err(SettingsError::invalid(
                "control_points",
                "coordinates must be finite",
            ));
        }

        Ok(())
    }
}
