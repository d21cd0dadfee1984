//! Point math for rotated rectangles.
//!
//! Coordinates follow the raster convention: origin at the top-left, x to
//! the right, y down. With y pointing down a positive angle turns content
//! clockwise on screen.

use crate::error::{Result, TransformError};

/// A real-valued point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotate this point about the origin.
    ///
    /// ```text
    /// nx = cos(θ) * x - sin(θ) * y
    /// ny = sin(θ) * x + cos(θ) * y
    /// ```
    #[inline]
    pub fn rotate(self, angle_radians: f64) -> Self {
        let (sin, cos) = angle_radians.sin_cos();
        Self {
            x: cos * self.x - sin * self.y,
            y: sin * self.x + cos * self.y,
        }
    }
}

/// Corners of a `width` x `height` rectangle rotated about the origin.
///
/// The corners are returned in the order `(0,0)`, `(w,0)`, `(0,h)`, `(w,h)`.
pub fn rotated_corners(width: u32, height: u32, angle_degrees: f64) -> [Point2D; 4] {
    let theta = angle_degrees.to_radians();
    let (w, h) = (width as f64, height as f64);
    [
        Point2D::new(0.0, 0.0).rotate(theta),
        Point2D::new(w, 0.0).rotate(theta),
        Point2D::new(0.0, h).rotate(theta),
        Point2D::new(w, h).rotate(theta),
    ]
}

/// Canvas size needed to hold a `width` x `height` rectangle rotated by
/// `angle_degrees`.
///
/// Each extent is `floor(max - min)` across the rotated corners. The
/// truncation can come out one pixel short of the true bounding box on a
/// fractional boundary; callers rely on this exact sizing, so it must not be
/// changed to rounding.
///
/// # Errors
///
/// Returns `TransformError::Geometry` if the angle is not finite or either
/// extent truncates to zero or does not fit in a `u32`.
pub fn rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> Result<(u32, u32)> {
    if !angle_degrees.is_finite() {
        return Err(TransformError::Geometry(format!(
            "rotation angle {} is not finite",
            angle_degrees
        )));
    }

    let corners = rotated_corners(width, height, angle_degrees);

    let min_x = corners.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_x = corners.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let min_y = corners.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_y = corners.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

    let new_width = truncate_extent(max_x - min_x)?;
    let new_height = truncate_extent(max_y - min_y)?;

    Ok((new_width, new_height))
}

fn truncate_extent(span: f64) -> Result<u32> {
    let truncated = span.floor();
    if truncated.is_nan() || truncated < 1.0 || truncated > u32::MAX as f64 {
        return Err(TransformError::Geometry(format!(
            "rotated extent {} is not a usable canvas size",
            span
        )));
    }
    Ok(truncated as u32)
}
