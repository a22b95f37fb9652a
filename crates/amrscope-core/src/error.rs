//! Error types for amrscope.

use glam::{IVec3, UVec3};
use thiserror::Error;

/// Which sequence of transfer function stops was empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopKind {
    /// Color control points.
    Color,
    /// Opacity control points.
    Opacity,
}

impl std::fmt::Display for StopKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Color => f.write_str("color"),
            Self::Opacity => f.write_str("opacity"),
        }
    }
}

/// The main error type for amrscope construction and encoding.
///
/// Every variant is a validation failure detected synchronously; the call
/// that returned it left its receiver unchanged.
#[derive(Error, Debug)]
pub enum AmrError {
    /// Block values do not match the cell count implied by its dims.
    #[error("block shape mismatch: dims imply {expected} values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// A block has a zero-sized extent along some axis.
    #[error("block dims must be at least 1 along every axis, got {0}")]
    DegenerateDims(UVec3),

    /// A block's last cell index does not fit in `i32`.
    #[error("block at {origin} with dims {dims} extends past the i32 index range")]
    BoundsOverflow { origin: IVec3, dims: UVec3 },

    /// A refinement ratio smaller than 1 was supplied.
    #[error("invalid refinement ratio {ratio} for level {level}: must be >= 1")]
    InvalidRatio { level: u32, ratio: u32 },

    /// A block references a level with no registered refinement ratio.
    #[error("no refinement ratio registered for level {0}")]
    UnknownLevel(u32),

    /// Encoding was requested on a catalog without blocks.
    #[error("cannot encode an empty block catalog")]
    EmptyCatalog,

    /// A transfer function was built without any stops of one kind.
    #[error("transfer function needs at least one {0} stop")]
    EmptyStops(StopKind),

    /// The value range is empty, inverted, or not a number.
    #[error("invalid value range [{min}, {max}]: min must be strictly less than max")]
    InvalidRange { min: f32, max: f32 },

    /// Scene assembly was requested without any volume.
    #[error("scene needs at least one volume")]
    NoVolume,

    /// A named color map preset does not exist.
    #[error("color map '{0}' not found")]
    UnknownColorMap(String),

    /// The shared catalog lock was poisoned by a panicking writer.
    #[error("block catalog lock poisoned")]
    LockPoisoned,

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for amrscope operations.
pub type Result<T> = std::result::Result<T, AmrError>;
