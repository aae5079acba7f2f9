//! GearSynth Settings Crate
//!
//! Handles application configuration: defaults, validation and persistence
//! as TOML or JSON.

pub mod config;
pub mod error;

pub use config::{
    Config, CurveSection, ExportSection, ProfileKind, ProfileSection, SolverSection,
    SynthesisSection, DEFAULT_CONTROL_POINTS,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
