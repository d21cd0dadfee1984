//! Image rotation onto a canvas sized to hold the whole rotated image.
//!
//! Two entry points are provided:
//! - [`rotate_quarter`]: exact rotation by a multiple of 90 degrees, done as
//!   a pixel permutation with no trigonometry.
//! - [`rotate`]: rotation by an arbitrary angle. The canvas is the truncated
//!   bounding box of the rotated corners (see
//!   [`rotated_bounds`](crate::geometry::rotated_bounds)).
//!
//! # Algorithm
//!
//! The general path first centres the unrotated image on the new canvas at
//! offset `((new_w - w) / 2, (new_h - h) / 2)` (truncated), then rotates the
//! canvas content about the canvas centre `c`. Rendering uses inverse
//! mapping with nearest-neighbour sampling at pixel centres:
//!
//! ```text
//! q     = (dst_x + 0.5, dst_y + 0.5) - c
//! src_x = q.x * cos(θ) + q.y * sin(θ) + c.x - offset_x
//! src_y = -q.x * sin(θ) + q.y * cos(θ) + c.y - offset_y
//! ```
//!
//! Canvas pixels with no source behind them keep the format background
//! (transparent for RGBA, black for RGB).
//!
//! Positive angles turn the image clockwise as displayed (y axis down).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::{PixelBuffer, PixelFormat};
use crate::error::{Result, TransformError};
use crate::geometry::rotated_bounds;

/// A rotation to apply to an image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Rotator {
    /// Exact rotation; the angle must be a multiple of 90 degrees.
    Quarter(f64),
    /// Rotation by any angle onto a bounding-box canvas.
    Arbitrary(f64),
}

/// Rotates an image 90 degrees to the left (counter-clockwise).
pub const LEFT_90: Rotator = Rotator::Quarter(-90.0);

/// Rotates an image 90 degrees to the right (clockwise).
pub const RIGHT_90: Rotator = Rotator::Quarter(90.0);

/// Rotates an image 180 degrees.
pub const ROTATE_180: Rotator = Rotator::Quarter(180.0);

impl Rotator {
    /// Create a rotator for an arbitrary angle in degrees.
    pub fn new(angle_degrees: f64) -> Self {
        Rotator::Arbitrary(angle_degrees)
    }

    /// The rotation angle in degrees.
    pub fn angle(&self) -> f64 {
        match *self {
            Rotator::Quarter(angle) | Rotator::Arbitrary(angle) => angle,
        }
    }

    /// Rotate `image`, returning a newly allocated buffer.
    pub fn apply(&self, image: &PixelBuffer) -> Result<PixelBuffer> {
        match *self {
            Rotator::Quarter(angle) => rotate_quarter(image, angle),
            Rotator::Arbitrary(angle) => rotate(image, angle),
        }
    }
}

fn ensure_not_empty(image: &PixelBuffer) -> Result<()> {
    if image.is_empty() {
        return Err(TransformError::InvalidArgument(format!(
            "cannot rotate an empty {}x{} image",
            image.width(),
            image.height()
        )));
    }
    Ok(())
}

/// Reject canvases whose pixel data would not fit in memory addressable by `usize`.
fn ensure_allocatable(width: u32, height: u32, format: PixelFormat) -> Result<()> {
    match PixelBuffer::byte_len(width, height, format) {
        Some(_) => Ok(()),
        None => Err(TransformError::Geometry(format!(
            "rotated canvas {}x{} is too large to allocate",
            width, height
        ))),
    }
}

/// Rotate an image by a multiple of 90 degrees.
///
/// For odd quarter turns the output has swapped dimensions; otherwise it
/// matches the input. The content exactly fills the new canvas.
///
/// # Errors
///
/// Returns `TransformError::InvalidArgument` if the angle is not a finite
/// multiple of 90 or the image is empty.
pub fn rotate_quarter(image: &PixelBuffer, angle_degrees: f64) -> Result<PixelBuffer> {
    if !angle_degrees.is_finite() || angle_degrees % 90.0 != 0.0 {
        return Err(TransformError::InvalidArgument(format!(
            "angle {} is not a multiple of 90",
            angle_degrees
        )));
    }
    ensure_not_empty(image)?;

    let (w, h) = image.dimensions();
    // Exact in f64: the angle is already known to be a multiple of 90
    let quarter = (angle_degrees / 90.0).rem_euclid(4.0) as i64;
    debug!(w, h, angle = angle_degrees, quarter, "Rotating image by quarter turns");

    if quarter == 0 {
        return Ok(image.clone());
    }

    let (dst_w, dst_h) = if quarter % 2 == 1 { (h, w) } else { (w, h) };
    let channels = image.format().channels();
    let mut output = PixelBuffer::new(dst_w, dst_h, image.format());

    for y in 0..h {
        let src_row = image.row(y);
        for x in 0..w {
            let (dst_x, dst_y) = match quarter {
                1 => (h - 1 - y, x),
                2 => (w - 1 - x, h - 1 - y),
                _ => (y, w - 1 - x),
            };
            let src_idx = x as usize * channels;
            let dst_idx = dst_x as usize * channels;
            output.row_mut(dst_y)[dst_idx..dst_idx + channels]
                .copy_from_slice(&src_row[src_idx..src_idx + channels]);
        }
    }

    Ok(output)
}

/// Rotate an image by an arbitrary angle in degrees.
///
/// The output canvas is the truncated bounding box of the rotated image, so
/// it may be up to one pixel smaller than the exact box on each axis.
///
/// # Errors
///
/// - `TransformError::InvalidArgument` if the image is empty.
/// - `TransformError::Geometry` if the angle is not finite or the canvas
///   would be empty.
pub fn rotate(image: &PixelBuffer, angle_degrees: f64) -> Result<PixelBuffer> {
    ensure_not_empty(image)?;

    let (src_w, src_h) = image.dimensions();
    let (dst_w, dst_h) = rotated_bounds(src_w, src_h, angle_degrees)?;
    ensure_allocatable(dst_w, dst_h, image.format())?;
    debug!(
        w = src_w,
        h = src_h,
        angle = angle_degrees,
        dst_w,
        dst_h,
        "Rotating image"
    );

    let offset_x = ((dst_w as f64 - src_w as f64) / 2.0).trunc();
    let offset_y = ((dst_h as f64 - src_h as f64) / 2.0).trunc();
    let cx = dst_w as f64 / 2.0;
    let cy = dst_h as f64 / 2.0;

    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    let (w, h) = (src_w as f64, src_h as f64);
    let channels = image.format().channels();
    let mut output = PixelBuffer::new(dst_w, dst_h, image.format());

    for dst_y in 0..dst_h {
        let qy = dst_y as f64 + 0.5 - cy;
        let dst_row = output.row_mut(dst_y);

        for dst_x in 0..dst_w {
            let qx = dst_x as f64 + 0.5 - cx;

            // Inverse rotation back into source space
            let src_x = (qx * cos + qy * sin + cx - offset_x).floor();
            let src_y = (-qx * sin + qy * cos + cy - offset_y).floor();

            if src_x < 0.0 || src_x >= w || src_y < 0.0 || src_y >= h {
                continue;
            }

            let src_row = image.row(src_y as u32);
            let src_idx = src_x as usize * channels;
            let dst_idx = dst_x as usize * channels;
            dst_row[dst_idx..dst_idx + channels]
                .copy_from_slice(&src_row[src_idx..src_idx + channels]);
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create an RGBA test image where every pixel is unique and opaque.
    fn test_image(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(x as u8);
                pixels.push(y as u8);
                pixels.push(((y * width + x) % 256) as u8);
                pixels.push(255);
            }
        }
        PixelBuffer::from_raw(width, height, PixelFormat::Rgba8, pixels).unwrap()
    }

    #[test]
    fn test_quarter_90_swaps_dimensions() {
        let img = test_image(100, 50);
        let result = rotate_quarter(&img, 90.0).unwrap();
        assert_eq!(result.dimensions(), (50, 100));
    }

    #[test]
    fn test_quarter_180_keeps_dimensions() {
        let img = test_image(100, 50);
        let result = rotate_quarter(&img, 180.0).unwrap();
        assert_eq!(result.dimensions(), (100, 50));
    }

    #[test]
    fn test_quarter_90_is_clockwise() {
        let img = test_image(4, 3);
        let result = rotate_quarter(&img, 90.0).unwrap();

        // Top-left moves to top-right, bottom-left moves to top-left
        assert_eq!(result.get_pixel(2, 0), img.get_pixel(0, 0));
        assert_eq!(result.get_pixel(0, 0), img.get_pixel(0, 2));
        assert_eq!(result.get_pixel(0, 3), img.get_pixel(3, 2));
    }

    #[test]
    fn test_quarter_180_corners() {
        let img = test_image(5, 7);
        let result = rotate_quarter(&img, 180.0).unwrap();
        assert_eq!(result.get_pixel(0, 0), img.get_pixel(4, 6));
        assert_eq!(result.get_pixel(4, 6), img.get_pixel(0, 0));
        assert_eq!(result.get_pixel(4, 0), img.get_pixel(0, 6));
    }

    #[test]
    fn test_quarter_negative_and_large_angles() {
        let img = test_image(6, 4);
        assert_eq!(
            rotate_quarter(&img, -90.0).unwrap(),
            rotate_quarter(&img, 270.0).unwrap()
        );
        assert_eq!(
            rotate_quarter(&img, 450.0).unwrap(),
            rotate_quarter(&img, 90.0).unwrap()
        );
        assert_eq!(rotate_quarter(&img, -360.0).unwrap(), img);
        assert_eq!(rotate_quarter(&img, 720.0).unwrap(), img);
    }

    #[test]
    fn test_quarter_huge_multiples_of_180_keep_dimensions() {
        let img = test_image(6, 4);
        let angle = 90.0 * 2f64.powi(100);
        assert_eq!(rotate_quarter(&img, angle).unwrap(), img);
        assert_eq!(rotate_quarter(&img, -angle).unwrap(), img);
    }

    #[test]
    fn test_quarter_huge_odd_multiple_swaps_dimensions() {
        let angle = 90.0 * (2f64.powi(40) + 1.0);
        let img = test_image(6, 4);
        assert_eq!(rotate_quarter(&img, angle).unwrap().dimensions(), (4, 6));
    }

    #[test]
    fn test_oversized_canvas_rejected() {
        assert!(matches!(
            ensure_allocatable(u32::MAX, u32::MAX, PixelFormat::Rgba8),
            Err(TransformError::Geometry(_))
        ));
        assert!(ensure_allocatable(141, 141, PixelFormat::Rgba8).is_ok());
    }

    #[test]
    fn test_left_then_right_is_identity() {
        let img = test_image(9, 5);
        let left = LEFT_90.apply(&img).unwrap();
        let back = RIGHT_90.apply(&left).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn test_rotate_180_constant() {
        let img = test_image(3, 8);
        let once = ROTATE_180.apply(&img).unwrap();
        assert_eq!(once.dimensions(), (3, 8));
        assert_eq!(ROTATE_180.apply(&once).unwrap(), img);
    }

    #[test]
    fn test_quarter_rejects_off_grid_angle() {
        let img = test_image(10, 10);
        for angle in [45.0, 1.0, 90.5, -30.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    rotate_quarter(&img, angle),
                    Err(TransformError::InvalidArgument(_))
                ),
                "angle {} should be rejected",
                angle
            );
        }
    }

    #[test]
    fn test_empty_image_rejected() {
        let img = PixelBuffer::new(0, 10, PixelFormat::Rgba8);
        assert!(matches!(
            rotate_quarter(&img, 90.0),
            Err(TransformError::InvalidArgument(_))
        ));
        assert!(matches!(
            rotate(&img, 30.0),
            Err(TransformError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_general_zero_angle_is_identity() {
        let img = test_image(7, 5);
        assert_eq!(rotate(&img, 0.0).unwrap(), img);
    }

    #[test]
    fn test_general_matches_quarter_turns() {
        // Even size difference keeps the centring offset exact
        let img = test_image(6, 4);
        assert_eq!(rotate(&img, 90.0).unwrap(), rotate_quarter(&img, 90.0).unwrap());
        assert_eq!(rotate(&img, 180.0).unwrap(), rotate_quarter(&img, 180.0).unwrap());
    }

    #[test]
    fn test_general_canvas_is_truncated_bounding_box() {
        let img = test_image(100, 50);
        let result = rotate(&img, 30.0).unwrap();
        assert_eq!(result.dimensions(), (111, 93));

        let square = test_image(100, 100);
        assert_eq!(rotate(&square, 45.0).unwrap().dimensions(), (141, 141));
    }

    #[test]
    fn test_general_fills_uncovered_area_transparent() {
        let img = test_image(10, 10);
        let result = rotate(&img, 45.0).unwrap();
        assert_eq!(result.dimensions(), (14, 14));

        // Corners of the canvas lie outside the rotated square
        assert_eq!(result.get_pixel(0, 0), Some(&[0u8, 0, 0, 0][..]));
        assert_eq!(result.get_pixel(13, 13), Some(&[0u8, 0, 0, 0][..]));

        // Centre is covered by opaque source content
        assert_eq!(result.get_pixel(7, 7).unwrap()[3], 255);
    }

    #[test]
    fn test_general_fills_uncovered_area_black_for_rgb() {
        let img = PixelBuffer::from_raw(10, 10, PixelFormat::Rgb8, vec![200u8; 10 * 10 * 3]).unwrap();
        let result = rotate(&img, 45.0).unwrap();
        assert_eq!(result.format(), PixelFormat::Rgb8);
        assert_eq!(result.get_pixel(0, 0), Some(&[0u8, 0, 0][..]));
        assert_eq!(result.get_pixel(7, 7), Some(&[200u8, 200, 200][..]));
    }

    #[test]
    fn test_general_non_finite_angle() {
        let img = test_image(10, 10);
        assert!(matches!(rotate(&img, f64::NAN), Err(TransformError::Geometry(_))));
        assert!(matches!(
            rotate(&img, f64::NEG_INFINITY),
            Err(TransformError::Geometry(_))
        ));
    }

    #[test]
    fn test_input_left_untouched() {
        let img = test_image(8, 6);
        let copy = img.clone();
        let _ = rotate(&img, 33.0).unwrap();
        let _ = rotate_quarter(&img, 270.0).unwrap();
        assert_eq!(img, copy);
    }

    #[test]
    fn test_rotator_new_uses_general_path() {
        let rotator = Rotator::new(45.0);
        assert_eq!(rotator, Rotator::Arbitrary(45.0));
        assert_eq!(rotator.angle(), 45.0);
        assert!(rotator.apply(&test_image(10, 10)).is_ok());
    }

    #[test]
    fn test_1x1_image_rotation() {
        let img = test_image(1, 1);
        let result = rotate(&img, 45.0).unwrap();
        assert!(result.width() >= 1);
        assert!(result.height() >= 1);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
