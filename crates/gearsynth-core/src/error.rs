//! Error handling for GearSynth
//!
//! Provides the error types for every stage of the synthesis pipeline:
//! - Geometry errors (degenerate input, fixed-point conversion)
//! - Synthesis errors (control path, solver, clipping, cancellation)
//! - Export errors (DXF serialization and file output)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised by the primitives in [`crate::geometry`] when an input cannot be
/// represented or processed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The polygon has no vertices
    #[error("Polygon has no vertices")]
    EmptyPolygon,

    /// A coordinate does not fit the fixed-point integer space
    #[error("Coordinate {value} cannot be represented at scale {scale}")]
    CoordinateOverflow {
        /// The offending real-valued coordinate.
        value: f64,
        /// The fixed-point scale factor in use.
        scale: f64,
    },

    /// A computation produced NaN or infinity
    #[error("Non-finite value in {context}")]
    NonFinite {
        /// Where the value was produced.
        context: String,
    },
}

/// Synthesis error type
///
/// Represents the failures a pipeline stage can report. Every variant is local
/// to the stage that detects it; none of them is fatal to the process.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SynthesisError {
    /// Not enough control points for the requested operation
    #[error("Insufficient control points: {required} required, {available} available")]
    InsufficientPoints {
        /// Minimum number of points the operation needs.
        required: usize,
        /// Number of points currently on the path.
        available: usize,
    },

    /// The center distance solver did not reach tolerance
    #[error(
        "Center distance did not converge after {iterations} iterations \
         (error {last_error_deg}°, distance {center_distance})"
    )]
    ConvergenceFailure {
        /// Number of iterations performed.
        iterations: usize,
        /// Closure error of the last iteration in degrees.
        last_error_deg: f64,
        /// Center distance estimate of the last iteration.
        center_distance: f64,
    },

    /// The polygon boolean step produced no polygons
    #[error("Boolean difference produced no polygons at step {step}")]
    EmptyClipResult {
        /// Index of the driving-profile segment being processed.
        step: usize,
    },

    /// A driving radius reached or exceeded the center distance
    #[error("Vertex {index} has radius {radius} >= center distance {center_distance}")]
    DegenerateRadius {
        /// Index of the offending vertex.
        index: usize,
        /// Radius of the vertex from the driving axis.
        radius: f64,
        /// Center distance estimate at the time of the check.
        center_distance: f64,
    },

    /// A pipeline parameter is outside its valid range
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Synthesis was cancelled between segments
    #[error("Synthesis cancelled at step {step}")]
    Cancelled {
        /// Number of segments completed before cancellation.
        step: usize,
    },

    /// A stage was invoked before the stage it depends on
    #[error("Pipeline stage requires {required}, current state is {current}")]
    StageNotReady {
        /// The state the stage needs.
        required: String,
        /// The state the pipeline was in.
        current: String,
    },

    /// Geometry failure inside a stage
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

impl SynthesisError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        SynthesisError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Export error type
///
/// Represents errors raised while serializing profiles for CAD tools.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Nothing to export
    #[error("Cannot export an empty path")]
    EmptyPath,

    /// The DXF writer failed
    #[error("DXF error: {0}")]
    Dxf(String),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Geometry failure while preparing the export
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Main error type for GearSynth
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Synthesis error
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    /// Export error
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Synthesis(SynthesisError::Cancelled { .. }))
    }

    /// Check if this is a synthesis error
    pub fn is_synthesis_error(&self) -> bool {
        matches!(self, Error::Synthesis(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
