//! # GearSynth Core
//!
//! Core types and utilities for GearSynth.
//! Provides the geometry primitives, fixed-point paths, the error taxonomy
//! and the callback aliases used by the synthesis pipeline.

pub mod error;
pub mod geometry;
pub mod types;

pub use error::{Error, ExportError, GeometryError, Result, SynthesisError};

pub use geometry::{
    angle_between, normalize_angle, to_degrees, to_radians, Bounds, IntPath, IntPoint, Point,
    Polygon, Segment,
};

// Re-export type aliases for convenience
pub use types::{CancelToken, EventCallback, ProfileKind, ProgressCallback};
