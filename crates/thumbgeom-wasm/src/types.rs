//! WASM-compatible wrapper types for pixel data and regions.
//!
//! This module provides JavaScript-friendly types that wrap the core thumbgeom types,
//! handling the conversion between Rust and JavaScript data representations.

use thumbgeom_core::{ClampedRegion, PixelBuffer, PixelFormat, TransformError};
use wasm_bindgen::prelude::*;

/// A pixel buffer wrapper for JavaScript.
///
/// Pixels are 8-bit RGBA when `has_alpha` is true, otherwise 8-bit RGB, in
/// row-major order.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    width: u32,
    height: u32,
    has_alpha: bool,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create a new JsPixelBuffer from dimensions and pixel data.
    ///
    /// The pixel length is validated when the buffer is first used by a
    /// transform.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, has_alpha: bool, pixels: Vec<u8>) -> JsPixelBuffer {
        JsPixelBuffer {
            width,
            height,
            has_alpha,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// True for RGBA data, false for RGB.
    #[wasm_bindgen(getter)]
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsPixelBuffer {
    /// Wrap a core buffer, taking ownership of its pixels.
    pub(crate) fn from_buffer(buffer: PixelBuffer) -> Self {
        let (width, height) = buffer.dimensions();
        let has_alpha = buffer.format().has_alpha();
        Self {
            width,
            height,
            has_alpha,
            pixels: buffer.into_raw(),
        }
    }

    /// Convert to a core buffer. Clones the pixel data.
    pub(crate) fn to_buffer(&self) -> Result<PixelBuffer, TransformError> {
        let format = if self.has_alpha {
            PixelFormat::Rgba8
        } else {
            PixelFormat::Rgb8
        };
        PixelBuffer::from_raw(self.width, self.height, format, self.pixels.clone())
    }
}

/// A resolved, in-bounds crop region.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsClampedRegion {
    inner: ClampedRegion,
}

#[wasm_bindgen]
impl JsClampedRegion {
    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u32 {
        self.inner.x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u32 {
        self.inner.y()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }
}

impl JsClampedRegion {
    pub(crate) fn from_region(inner: ClampedRegion) -> Self {
        Self { inner }
    }

    pub(crate) fn region(&self) -> &ClampedRegion {
        &self.inner
    }
}

/// Convert a core error into the string value thrown to JavaScript.
pub(crate) fn to_js_error(err: TransformError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
