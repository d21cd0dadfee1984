//! WASM bindings for rotation and region extraction.
//!
//! This module provides JavaScript bindings so a thumbnail pipeline running in
//! the browser can crop and rotate decoded images.

use crate::types::{to_js_error, JsClampedRegion, JsPixelBuffer};
use thumbgeom_core::transform::{
    extract_region as core_extract, resolve_region as core_resolve, rotate as core_rotate,
    rotate_quarter as core_rotate_quarter, Region,
};
use wasm_bindgen::prelude::*;

/// Rotate an image by any angle.
///
/// The output canvas is the truncated bounding box of the rotated image.
/// Uncovered pixels are transparent for RGBA input and black for RGB input.
///
/// # Arguments
///
/// * `image` - Source image to rotate
/// * `angle_degrees` - Rotation angle in degrees (positive = clockwise)
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rotated = rotate(sourceImage, 15.0);
/// ```
#[wasm_bindgen]
pub fn rotate(image: &JsPixelBuffer, angle_degrees: f64) -> Result<JsPixelBuffer, JsValue> {
    let src = image.to_buffer().map_err(to_js_error)?;
    core_rotate(&src, angle_degrees)
        .map(JsPixelBuffer::from_buffer)
        .map_err(to_js_error)
}

/// Rotate an image by a multiple of 90 degrees.
///
/// Throws if `angle_degrees` is not a multiple of 90.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const portrait = rotate_quarter(landscapeImage, 90);
/// ```
#[wasm_bindgen]
pub fn rotate_quarter(image: &JsPixelBuffer, angle_degrees: f64) -> Result<JsPixelBuffer, JsValue> {
    let src = image.to_buffer().map_err(to_js_error)?;
    core_rotate_quarter(&src, angle_degrees)
        .map(JsPixelBuffer::from_buffer)
        .map_err(to_js_error)
}

/// Clamp a requested region to a `source_width` x `source_height` image.
///
/// Throws if the size is not positive or the region misses the image.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const region = resolve_region(-20, -20, 100, 100, image.width, image.height);
/// // region.x === 0, region.width === 80 for a 100x100 image
/// ```
#[wasm_bindgen]
pub fn resolve_region(
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    source_width: u32,
    source_height: u32,
) -> Result<JsClampedRegion, JsValue> {
    let requested = Region::new(x, y, width, height);
    core_resolve(&requested, source_width, source_height)
        .map(JsClampedRegion::from_region)
        .map_err(to_js_error)
}

/// Copy a resolved region out of an image.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const region = resolve_region(10, 10, 50, 50, image.width, image.height);
/// const cropped = extract_region(image, region);
/// ```
#[wasm_bindgen]
pub fn extract_region(
    image: &JsPixelBuffer,
    region: &JsClampedRegion,
) -> Result<JsPixelBuffer, JsValue> {
    let src = image.to_buffer().map_err(to_js_error)?;
    core_extract(&src, region.region())
        .map(JsPixelBuffer::from_buffer)
        .map_err(to_js_error)
}
