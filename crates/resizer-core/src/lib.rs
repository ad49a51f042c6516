//! Resizer Core - orientation-aware image resizing
//!
//! This crate turns encoded image bytes into a JPEG of a fixed width:
//! the source is decoded, rotated upright according to its EXIF
//! orientation, resampled proportionally with a cubic kernel and
//! re-encoded. It performs no I/O.
//!
//! # Example
//!
//! ```ignore
//! use resizer_core::{ImageTransform, ResizeSettings};
//!
//! let transform = ImageTransform::new(ResizeSettings::default());
//! let jpeg = transform.transform(&std::fs::read("photo.jpg")?)?;
//! ```

pub mod decode;
pub mod encode;
pub mod pipeline;
pub mod settings;
pub mod transform;

#[cfg(test)]
pub(crate) mod test_support;

pub use decode::{decode_image, read_orientation, DecodeError, DecodedImage, FilterType};
pub use encode::{
    check_jpeg_dimensions, encode_jpeg, EncodeError, JPEG_CONTENT_TYPE, MAX_JPEG_DIMENSION,
};
pub use pipeline::{ImageTransform, ResizedImage, TransformError};
pub use settings::ResizeSettings;
pub use transform::{apply_rotation, resize, target_dimensions, ResizeError, Rotation};
