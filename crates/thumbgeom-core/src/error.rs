//! Error type shared by every transform.

use thiserror::Error;

/// Errors that can occur while resolving or applying a geometric transform.
///
/// All failures are reported at the point of detection; no transform ever
/// returns a partially written buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// A parameter is malformed (angle off the 90 degree grid on the fast
    /// path, non-positive region size, pixel data of the wrong length, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested region does not intersect the source image.
    #[error(
        "Region at ({x}, {y}) sized {width}x{height} lies outside the {source_width}x{source_height} source"
    )]
    OutOfBounds {
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        source_width: u32,
        source_height: u32,
    },

    /// The rotated canvas could not be computed (non-finite angle, empty or
    /// oversized bounding box).
    #[error("Geometry error: {0}")]
    Geometry(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TransformError>;
