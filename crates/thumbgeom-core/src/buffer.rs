//! Owned pixel buffers used as the input and output of every transform.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TransformError};

/// Memory layout of a single pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PixelFormat {
    /// 8-bit RGB, no alpha channel.
    Rgb8,
    /// 8-bit RGBA with straight alpha.
    #[default]
    Rgba8,
}

impl PixelFormat {
    /// Number of bytes per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }

    /// Returns true if the format carries an alpha channel.
    #[inline]
    pub fn has_alpha(self) -> bool {
        matches!(self, PixelFormat::Rgba8)
    }

    /// Value written to pixels no source content lands on.
    ///
    /// Formats with alpha get a fully transparent pixel; formats without
    /// alpha get opaque black.
    #[inline]
    pub fn background(self) -> &'static [u8] {
        match self {
            PixelFormat::Rgb8 => &[0, 0, 0],
            PixelFormat::Rgba8 => &[0, 0, 0, 0],
        }
    }
}

/// A rectangular grid of pixels in row-major order.
///
/// The pixel data is tightly packed: `pixels.len() == width * height * channels`.
/// Fields are private so the length invariant cannot be broken after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    format: PixelFormat,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a buffer with every pixel set to the format's background.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        let count = width as usize * height as usize;
        let pixels = format.background().repeat(count);
        Self {
            width,
            height,
            format,
            pixels,
        }
    }

    /// Byte length of a `width` x `height` buffer, or `None` if it overflows `usize`.
    pub fn byte_len(width: u32, height: u32, format: PixelFormat) -> Option<usize> {
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(format.channels()))
    }

    /// Wrap existing pixel data, checking that its length matches the dimensions.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidArgument` if `pixels.len()` differs
    /// from `width * height * format.channels()`.
    pub fn from_raw(width: u32, height: u32, format: PixelFormat, pixels: Vec<u8>) -> Result<Self> {
        match Self::byte_len(width, height, format) {
            Some(expected) if expected == pixels.len() => Ok(Self {
                width,
                height,
                format,
                pixels,
            }),
            _ => Err(TransformError::InvalidArgument(format!(
                "pixel data of {} bytes does not match a {}x{} {:?} image",
                pixels.len(),
                width,
                height,
                format
            ))),
        }
    }

    /// Create a buffer from an `image::RgbImage`.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            format: PixelFormat::Rgb8,
            pixels: img.into_raw(),
        }
    }

    /// Create a buffer from an `image::RgbaImage`.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            format: PixelFormat::Rgba8,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an `image::RgbImage`. Returns `None` for non-RGB buffers.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        match self.format {
            PixelFormat::Rgb8 => image::RgbImage::from_raw(self.width, self.height, self.pixels.clone()),
            PixelFormat::Rgba8 => None,
        }
    }

    /// Convert to an `image::RgbaImage`. Returns `None` for non-RGBA buffers.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        match self.format {
            PixelFormat::Rgba8 => {
                image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            }
            PixelFormat::Rgb8 => None,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` in pixels.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Raw pixel bytes in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the buffer and return the raw pixel bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// Check if the buffer has no addressable pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Byte offset of pixel `(x, y)`, or `None` if it lies outside the buffer.
    #[inline]
    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize * self.width as usize + x as usize) * self.format.channels())
        } else {
            None
        }
    }

    /// Read the pixel at `(x, y)`.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        let idx = self.offset(x, y)?;
        Some(&self.pixels[idx..idx + self.format.channels()])
    }

    /// Write the pixel at `(x, y)`.
    ///
    /// Returns false, leaving the buffer untouched, if the coordinates are out
    /// of range or `value` has the wrong number of channels.
    #[inline]
    pub fn put_pixel(&mut self, x: u32, y: u32, value: &[u8]) -> bool {
        let channels = self.format.channels();
        match self.offset(x, y) {
            Some(idx) if value.len() == channels => {
                self.pixels[idx..idx + channels].copy_from_slice(value);
                true
            }
            _ => false,
        }
    }

    /// One row of pixel bytes. Caller guarantees `y < height`.
    #[inline]
    pub(crate) fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * self.format.channels();
        let start = y as usize * stride;
        &self.pixels[start..start + stride]
    }

    #[inline]
    pub(crate) fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.width as usize * self.format.channels();
        let start = y as usize * stride;
        &mut self.pixels[start..start + stride]
    }
}
