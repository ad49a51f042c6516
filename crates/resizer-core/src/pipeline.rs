//! The decode, orient, resize, encode pipeline.

use thiserror::Error;

use crate::decode::{decode_image, read_orientation, DecodeError};
use crate::encode::{check_jpeg_dimensions, encode_jpeg, EncodeError};
use crate::settings::ResizeSettings;
use crate::transform::{apply_rotation, resize, target_dimensions, ResizeError, Rotation};

/// Errors produced by [`ImageTransform`].
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Failed to decode input image: {0}")]
    Decode(#[from] DecodeError),

    #[error("Failed to resample image: {0}")]
    Resize(#[from] ResizeError),

    #[error("Failed to encode output image: {0}")]
    Encode(#[from] EncodeError),

    /// The proportional height rounds down to zero.
    #[error("Source {width}x{height} is too wide to scale to a non-empty image")]
    EmptyOutput { width: u32, height: u32 },

    #[error("Output {width}x{height} exceeds the limit of {max} pixels")]
    OutputTooLarge { width: u32, height: u32, max: u64 },
}

/// Result of a successful transform.
#[derive(Debug, Clone)]
pub struct ResizedImage {
    /// Encoded JPEG bytes.
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Rotation applied before resizing.
    pub rotation: Rotation,
}

/// Orientation-correcting, width-constrained JPEG transcoder.
///
/// Stateless apart from its settings; one instance can serve any number of
/// calls, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct ImageTransform {
    settings: ResizeSettings,
}

impl ImageTransform {
    pub fn new(settings: ResizeSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ResizeSettings {
        &self.settings
    }

    /// Transcode `input` and return only the encoded bytes.
    pub fn transform(&self, input: &[u8]) -> Result<Vec<u8>, TransformError> {
        self.process(input).map(|resized| resized.bytes)
    }

    /// Transcode `input`:
    ///
    /// 1. decode it,
    /// 2. rotate it upright if its orientation tag is 6 or 8,
    /// 3. resample it to `max_width` wide, keeping the aspect ratio of the
    ///    rotated raster,
    /// 4. encode it as JPEG.
    ///
    /// Images narrower than `max_width` are enlarged.
    pub fn process(&self, input: &[u8]) -> Result<ResizedImage, TransformError> {
        let decoded = decode_image(input)?;

        let orientation = read_orientation(input, self.settings.orientation_tag);
        let rotation = Rotation::from_orientation(orientation);

        // Upright dimensions; the raster itself is rotated after the size checks.
        let (src_w, src_h) = rotation.rotated_dimensions(decoded.width, decoded.height);
        let (width, height) = target_dimensions(src_w, src_h, self.settings.max_width);
        if width == 0 || height == 0 {
            return Err(TransformError::EmptyOutput {
                width: src_w,
                height: src_h,
            });
        }
        check_jpeg_dimensions(width, height)?;
        if u64::from(width) * u64::from(height) > self.settings.max_output_pixels {
            return Err(TransformError::OutputTooLarge {
                width,
                height,
                max: self.settings.max_output_pixels,
            });
        }

        tracing::debug!(
            src_w,
            src_h,
            width,
            height,
            ?orientation,
            ?rotation,
            "resizing image"
        );

        let oriented = apply_rotation(decoded, rotation);
        let resized = resize(&oriented, width, height, self.settings.filter)?;
        drop(oriented);

        let bytes = encode_jpeg(
            &resized.pixels,
            resized.width,
            resized.height,
            self.settings.jpeg_quality,
        )?;

        Ok(ResizedImage {
            bytes,
            width,
            height,
            rotation,
        })
    }
}
