//! JPEG encoding of resized rasters.

use image::codecs::jpeg::JpegEncoder;
use image::{ImageBuffer, Rgb};
use thiserror::Error;

/// MIME type of every object the resizer writes.
pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// Largest width or height a baseline JPEG frame header can carry.
pub const MAX_JPEG_DIMENSION: u32 = u16::MAX as u32;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// One side does not fit the 16-bit JPEG frame header.
    #[error("{width}x{height} exceeds the JPEG limit of {max} pixels per side")]
    DimensionsTooLarge { width: u32, height: u32, max: u32 },

    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Check that a `width x height` raster can be written as JPEG at all.
///
/// The pipeline calls this before resampling so that an impossible output
/// is rejected before any pixels are produced.
pub fn check_jpeg_dimensions(width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        Err(EncodeError::InvalidDimensions { width, height })
    } else if width > MAX_JPEG_DIMENSION || height > MAX_JPEG_DIMENSION {
        Err(EncodeError::DimensionsTooLarge {
            width,
            height,
            max: MAX_JPEG_DIMENSION,
        })
    } else {
        Ok(())
    }
}

/// Encode packed RGB8 pixels as a baseline JPEG.
///
/// `quality` is clamped to 1..=100.
///
/// # Errors
///
/// Dimension errors come from [`check_jpeg_dimensions`].
/// `EncodeError::InvalidPixelData` means `pixels` is not `width * height * 3`
/// bytes long.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    check_jpeg_dimensions(width, height)?;

    let expected = width as usize * height as usize * 3;
    let raster = ImageBuffer::<Rgb<u8>, &[u8]>::from_raw(width, height, pixels)
        .filter(|_| pixels.len() == expected)
        .ok_or(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        })?;

    // Quarter of the raw size is a typical first guess for photographic data.
    let mut out = Vec::with_capacity(expected / 4);
    JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
        .encode_image(&raster)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_jpeg_markers() {
        let pixels = vec![128u8; 100 * 100 * 3];
        let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 75).unwrap();

        // SOI at the start, EOI at the end
        assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);
        let len = jpeg_bytes.len();
        assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_decodes_to_same_dimensions() {
        let pixels = vec![90u8; 1080 * 540 * 3];
        let jpeg = encode_jpeg(&pixels, 1080, 540, 75).unwrap();

        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (1080, 540));
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let pixels = vec![128u8; 10 * 10 * 3];

        assert!(encode_jpeg(&pixels, 10, 10, 0).is_ok());
        assert!(encode_jpeg(&pixels, 10, 10, 255).is_ok());
    }

    #[test]
    fn test_encode_jpeg_invalid_pixel_data() {
        let short = vec![128u8; 99 * 100 * 3];
        assert!(matches!(
            encode_jpeg(&short, 100, 100, 75),
            Err(EncodeError::InvalidPixelData { .. })
        ));

        let long = vec![128u8; 101 * 100 * 3];
        assert!(matches!(
            encode_jpeg(&long, 100, 100, 75),
            Err(EncodeError::InvalidPixelData { .. })
        ));
    }

    #[test]
    fn test_encode_jpeg_zero_dimensions() {
        assert!(matches!(
            encode_jpeg(&[], 0, 100, 75),
            Err(EncodeError::InvalidDimensions { width: 0, height: 100 })
        ));
        assert!(matches!(
            encode_jpeg(&[], 1080, 0, 75),
            Err(EncodeError::InvalidDimensions { width: 1080, height: 0 })
        ));
    }

    #[test]
    fn test_encode_jpeg_side_over_limit() {
        // Rejected before the pixel buffer is even looked at.
        assert!(matches!(
            encode_jpeg(&[], 1080, 75_600, 75),
            Err(EncodeError::DimensionsTooLarge { width: 1080, height: 75_600, max: 65_535 })
        ));
    }

    #[test]
    fn test_check_jpeg_dimensions_bounds() {
        assert!(check_jpeg_dimensions(1, 1).is_ok());
        assert!(check_jpeg_dimensions(MAX_JPEG_DIMENSION, 1).is_ok());
        assert!(check_jpeg_dimensions(1, MAX_JPEG_DIMENSION).is_ok());
        assert!(matches!(
            check_jpeg_dimensions(MAX_JPEG_DIMENSION + 1, 1),
            Err(EncodeError::DimensionsTooLarge { .. })
        ));
        assert!(matches!(
            check_jpeg_dimensions(0, 1),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_content_type() {
        assert_eq!(JPEG_CONTENT_TYPE, "image/jpeg");
    }
}
