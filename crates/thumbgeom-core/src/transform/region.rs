//! Region extraction with clamping to the source bounds.
//!
//! A [`Region`] is a caller request in source pixel coordinates and may hang
//! off any edge of the image. [`resolve_region`] intersects it with the
//! source and yields a [`ClampedRegion`] that is guaranteed to lie fully
//! inside; [`extract_region`] then copies that sub-rectangle without scaling.
//!
//! # Clamping
//!
//! Each axis is handled independently:
//! - A negative position moves to 0 and the size shrinks by the overhang.
//! - A region running past the far edge is cut at the edge.
//! - A region that misses the source entirely is rejected.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::error::{Result, TransformError};

/// A requested crop rectangle in source pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Region {
    /// Left edge (may be negative).
    pub x: i32,
    /// Top edge (may be negative).
    pub y: i32,
    /// Width in pixels (must be positive).
    pub width: i32,
    /// Height in pixels (must be positive).
    pub height: i32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Anchor for placing a region of a given size on the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Position {
    /// Top-left coordinate of a `width` x `height` region anchored on a
    /// `source_width` x `source_height` image.
    ///
    /// Centred placement truncates toward zero. A region larger than the
    /// source gets a negative coordinate, which [`resolve_region`] clamps.
    pub fn origin(
        self,
        width: i32,
        height: i32,
        source_width: u32,
        source_height: u32,
    ) -> (i32, i32) {
        let span = |source: u32, len: i32| {
            (source as i64 - len as i64).clamp(i32::MIN as i64, i32::MAX as i64)
        };
        let free_x = span(source_width, width);
        let free_y = span(source_height, height);

        let x = match self {
            Position::TopLeft | Position::CenterLeft | Position::BottomLeft => 0,
            Position::TopCenter | Position::Center | Position::BottomCenter => free_x / 2,
            Position::TopRight | Position::CenterRight | Position::BottomRight => free_x,
        };
        let y = match self {
            Position::TopLeft | Position::TopCenter | Position::TopRight => 0,
            Position::CenterLeft | Position::Center | Position::CenterRight => free_y / 2,
            Position::BottomLeft | Position::BottomCenter | Position::BottomRight => free_y,
        };
        (x as i32, y as i32)
    }
}

impl Region {
    /// A `width` x `height` region placed on the source by an anchor.
    pub fn anchored(
        position: Position,
        width: i32,
        height: i32,
        source_width: u32,
        source_height: u32,
    ) -> Self {
        let (x, y) = position.origin(width, height, source_width, source_height);
        Self::new(x, y, width, height)
    }
}

/// A region known to lie inside a source of a given size.
///
/// Normally produced by [`resolve_region`]. [`extract_region`] still checks
/// containment, since a region can be paired with a different buffer than
/// the one it was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClampedRegion {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl ClampedRegion {
    /// The region covering a whole `width` x `height` source.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    #[inline]
    pub fn x(&self) -> u32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> u32 {
        self.y
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check whether this region fits inside a `width` x `height` source.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x as u64 + self.width as u64 <= width as u64
            && self.y as u64 + self.height as u64 <= height as u64
    }
}

/// Clamp one axis. Returns `None` when the span misses `[0, source)`.
fn clamp_axis(position: i64, length: i64, source: u32) -> Option<(u32, u32)> {
    let source = source as i64;
    if position >= source {
        return None;
    }

    let (start, length) = if position < 0 {
        (0, length + position)
    } else {
        (position, length)
    };
    if length <= 0 {
        return None;
    }

    let length = length.min(source - start);
    Some((start as u32, length as u32))
}

/// Intersect a requested region with a `source_width` x `source_height` image.
///
/// # Errors
///
/// - `TransformError::InvalidArgument` if the requested width or height is
///   not positive.
/// - `TransformError::OutOfBounds` if the region does not overlap the source.
///
/// # Example
///
/// ```ignore
/// let clamped = resolve_region(&Region::new(-20, -20, 100, 100), 100, 100)?;
/// assert_eq!((clamped.x(), clamped.width()), (0, 80));
/// ```
pub fn resolve_region(
    requested: &Region,
    source_width: u32,
    source_height: u32,
) -> Result<ClampedRegion> {
    if requested.width <= 0 || requested.height <= 0 {
        return Err(TransformError::InvalidArgument(format!(
            "region size {}x{} must be positive",
            requested.width, requested.height
        )));
    }

    let out_of_bounds = || TransformError::OutOfBounds {
        x: requested.x as i64,
        y: requested.y as i64,
        width: requested.width as i64,
        height: requested.height as i64,
        source_width,
        source_height,
    };

    let (x, width) = clamp_axis(requested.x as i64, requested.width as i64, source_width)
        .ok_or_else(out_of_bounds)?;
    let (y, height) = clamp_axis(requested.y as i64, requested.height as i64, source_height)
        .ok_or_else(out_of_bounds)?;

    Ok(ClampedRegion {
        x,
        y,
        width,
        height,
    })
}

/// Copy the pixels inside `region` into a new buffer of the region's size.
///
/// # Errors
///
/// - `TransformError::InvalidArgument` if the region is empty.
/// - `TransformError::OutOfBounds` if `region` was resolved against a
///   larger source and does not fit inside `image`.
pub fn extract_region(image: &PixelBuffer, region: &ClampedRegion) -> Result<PixelBuffer> {
    if region.width == 0 || region.height == 0 {
        return Err(TransformError::InvalidArgument(format!(
            "cannot extract an empty {}x{} region",
            region.width, region.height
        )));
    }

    let (src_w, src_h) = image.dimensions();
    if !region.fits_within(src_w, src_h) {
        return Err(TransformError::OutOfBounds {
            x: region.x as i64,
            y: region.y as i64,
            width: region.width as i64,
            height: region.height as i64,
            source_width: src_w,
            source_height: src_h,
        });
    }

    debug!(
        w = src_w,
        h = src_h,
        x = region.x,
        y = region.y,
        width = region.width,
        height = region.height,
        "Extracting region"
    );

    let channels = image.format().channels();
    let mut output = PixelBuffer::new(region.width, region.height, image.format());

    // Copy pixel data row by row
    let start = region.x as usize * channels;
    let end = start + region.width as usize * channels;
    for y in 0..region.height {
        let src_row = image.row(region.y + y);
        output.row_mut(y).copy_from_slice(&src_row[start..end]);
    }

    Ok(output)
}

/// Apply an optional region request to an image.
///
/// With no region the source is returned borrowed, without copying. With a
/// region the request is resolved against the image and the result copied.
pub fn crop_to_region<'a>(
    image: &'a PixelBuffer,
    requested: Option<&Region>,
) -> Result<Cow<'a, PixelBuffer>> {
    match requested {
        None => Ok(Cow::Borrowed(image)),
        Some(region) => {
            let clamped = resolve_region(region, image.width(), image.height())?;
            extract_region(image, &clamped).map(Cow::Owned)
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
