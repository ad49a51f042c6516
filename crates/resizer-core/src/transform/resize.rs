//! Width-constrained proportional resizing.
//!
//! The output width is always the configured maximum; the height follows the
//! aspect ratio of the (already oriented) source. Narrow sources are scaled
//! up, wide sources are scaled down.

use image::{imageops, ImageBuffer, Rgb};
use thiserror::Error;

use crate::decode::{DecodedImage, FilterType};

/// Errors that can occur while resampling.
#[derive(Debug, Error)]
pub enum ResizeError {
    /// Width or height of the requested output is zero
    #[error("Invalid target dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Source buffer length doesn't match its declared dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },
}

/// Compute the output size for a `width x height` source.
///
/// Returns `(max_width, floor(max_width * height / width))`. The height is
/// computed in integer arithmetic so that exact ratios never lose a pixel to
/// floating point error (`4000x3000` gives exactly `1080x810`).
///
/// A zero-width source yields a zero height. Heights beyond `u32::MAX`
/// saturate.
pub fn target_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width == 0 {
        return (max_width, 0);
    }

    let new_height = u64::from(max_width) * u64::from(height) / u64::from(width);
    (max_width, u32::try_from(new_height).unwrap_or(u32::MAX))
}

/// Resample an image to exact dimensions.
///
/// The result is written into a fresh buffer: every destination pixel is a
/// weighted sum of source pixels only, with nothing blended from a prior
/// destination.
///
/// # Errors
///
/// Returns `ResizeError::InvalidDimensions` for a zero target and
/// `ResizeError::InvalidPixelData` if the source buffer is malformed.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, ResizeError> {
    if width == 0 || height == 0 {
        return Err(ResizeError::InvalidDimensions { width, height });
    }
    if image.is_empty() {
        return Err(ResizeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let expected = image.width as usize * image.height as usize * 3;
    let source = ImageBuffer::<Rgb<u8>, &[u8]>::from_raw(
        image.width,
        image.height,
        image.pixels.as_slice(),
    )
    .ok_or(ResizeError::InvalidPixelData {
        expected,
        actual: image.pixels.len(),
    })?;

    // Fast path: if dimensions match, just copy
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let resized = imageops::resize(&source, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}
