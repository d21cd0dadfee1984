//! Thumbgeom Core - geometric transforms for thumbnail generation
//!
//! This crate provides the pixel-exact geometry used by a thumbnail
//! pipeline: rotating an image onto a canvas that holds all of the rotated
//! content, and extracting a requested region clamped to the image bounds.
//!
//! Decoding, encoding and resizing are handled elsewhere; this crate only
//! consumes and produces [`PixelBuffer`]s.

pub mod buffer;
pub mod error;
pub mod geometry;
pub mod transform;

pub use buffer::{PixelBuffer, PixelFormat};
pub use error::{Result, TransformError};
pub use geometry::{rotated_bounds, Point2D};
pub use transform::{
    apply_all, crop_to_region, extract_region, resolve_region, rotate, rotate_quarter,
    ClampedRegion, Position, Region, Rotator, Transform, LEFT_90, RIGHT_90, ROTATE_180,
};
