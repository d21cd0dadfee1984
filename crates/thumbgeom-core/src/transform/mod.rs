//! Geometric transforms: rotation and region extraction.
//!
//! Every transform is a pure function from a borrowed [`PixelBuffer`] to a
//! newly allocated one. Inputs are never modified, so transforms are safe to
//! run concurrently on independent buffers.
//!
//! # Composition
//!
//! A thumbnail pipeline typically extracts the requested region from the
//! freshly decoded source first, then rotates the result. [`Transform`]
//! captures one step as a plain value and [`apply_all`] runs a sequence of
//! them, feeding each output into the next step.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, x to the right, y down
//! - Rotation angles are in degrees, positive = clockwise as displayed
//! - Regions are in source pixel coordinates and may extend past the edges

mod region;
mod rotation;

pub use region::{
    crop_to_region, extract_region, resolve_region, ClampedRegion, Position, Region,
};
pub use rotation::{rotate, rotate_quarter, Rotator, LEFT_90, RIGHT_90, ROTATE_180};

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::error::Result;

/// A single geometric transform step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transform {
    /// Exact rotation by a multiple of 90 degrees.
    FastRotate { angle: f64 },
    /// Rotation by any angle onto a bounding-box canvas.
    GeneralRotate { angle: f64 },
    /// Crop to a region, clamped to the image bounds.
    RegionExtract(Region),
}

impl Transform {
    /// Apply this transform, returning a newly allocated buffer.
    pub fn apply(&self, image: &PixelBuffer) -> Result<PixelBuffer> {
        match self {
            Transform::FastRotate { angle } => rotate_quarter(image, *angle),
            Transform::GeneralRotate { angle } => rotate(image, *angle),
            Transform::RegionExtract(region) => {
                let clamped = resolve_region(region, image.width(), image.height())?;
                extract_region(image, &clamped)
            }
        }
    }
}

impl From<Rotator> for Transform {
    fn from(rotator: Rotator) -> Self {
        match rotator {
            Rotator::Quarter(angle) => Transform::FastRotate { angle },
            Rotator::Arbitrary(angle) => Transform::GeneralRotate { angle },
        }
    }
}

impl From<Region> for Transform {
    fn from(region: Region) -> Self {
        Transform::RegionExtract(region)
    }
}

/// Apply `transforms` in order.
///
/// Stops at the first failing step; no partial result is returned. An empty
/// list yields a copy of the input.
pub fn apply_all(image: &PixelBuffer, transforms: &[Transform]) -> Result<PixelBuffer> {
    let Some((first, rest)) = transforms.split_first() else {
        return Ok(image.clone());
    };

    let mut current = first.apply(image)?;
    for transform in rest {
        current = transform.apply(&current)?;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PixelFormat;
    use crate::error::TransformError;

    fn test_image(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 0, 255]);
            }
        }
        PixelBuffer::from_raw(width, height, PixelFormat::Rgba8, pixels).unwrap()
    }

    #[test]
    fn test_from_rotator() {
        assert_eq!(Transform::from(RIGHT_90), Transform::FastRotate { angle: 90.0 });
        assert_eq!(
            Transform::from(Rotator::new(12.5)),
            Transform::GeneralRotate { angle: 12.5 }
        );
    }

    #[test]
    fn test_region_extract_variant() {
        let img = test_image(100, 100);
        let step = Transform::from(Region::new(20, 20, 100, 100));
        let result = step.apply(&img).unwrap();
        assert_eq!(result.dimensions(), (80, 80));
        assert_eq!(result.get_pixel(0, 0), img.get_pixel(20, 20));
    }

    #[test]
    fn test_apply_all_extract_then_rotate() {
        let img = test_image(40, 30);
        let steps = [
            Transform::RegionExtract(Region::new(-10, 0, 30, 10)),
            Transform::from(RIGHT_90),
        ];
        let result = apply_all(&img, &steps).unwrap();

        // Region resolves to 20x10, then the quarter turn swaps it
        assert_eq!(result.dimensions(), (10, 20));
        // Source (0, 0) ends up in the top-right corner
        assert_eq!(result.get_pixel(9, 0), img.get_pixel(0, 0));
    }

    #[test]
    fn test_apply_all_empty_is_copy() {
        let img = test_image(5, 5);
        assert_eq!(apply_all(&img, &[]).unwrap(), img);
    }

    #[test]
    fn test_apply_all_stops_on_error() {
        let img = test_image(10, 10);
        let steps = [
            Transform::FastRotate { angle: 45.0 },
            Transform::GeneralRotate { angle: 10.0 },
        ];
        assert!(matches!(
            apply_all(&img, &steps),
            Err(TransformError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_four_quarter_transforms_restore_dimensions() {
        let img = test_image(13, 7);
        let steps = [Transform::FastRotate { angle: 90.0 }; 4];
        let result = apply_all(&img, &steps).unwrap();
        assert_eq!(result.dimensions(), (13, 7));
    }
}
