//! Thumbgeom WASM - WebAssembly bindings for Thumbgeom
//!
//! This crate provides WASM bindings to expose the thumbgeom-core transforms
//! to JavaScript/TypeScript thumbnail pipelines.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for pixel buffers and regions
//! - `transform` - Rotation and region extraction bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsPixelBuffer, resolve_region, extract_region, rotate } from '@thumbgeom/wasm';
//!
//! await init();
//!
//! const image = new JsPixelBuffer(width, height, true, rgbaBytes);
//! const region = resolve_region(-20, -20, 100, 100, image.width, image.height);
//! const thumb = rotate(extract_region(image, region), 15.0);
//! ```

use wasm_bindgen::prelude::*;

mod transform;
mod types;

// Re-export public types
pub use transform::{extract_region, resolve_region, rotate, rotate_quarter};
pub use types::{JsClampedRegion, JsPixelBuffer};

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
