//! Immutable configuration for [`ImageTransform`](crate::ImageTransform).

use serde::{Deserialize, Serialize};

use crate::decode::FilterType;

/// Width every output image is scaled to.
pub const DEFAULT_MAX_WIDTH: u32 = 1080;

/// Marker inserted into derived object keys: `{key}.{suffix}.jpg`.
pub const DEFAULT_RESIZED_SUFFIX: &str = "optimised";

/// TIFF tag id of the EXIF orientation field.
pub const EXIF_ORIENTATION_TAG: u16 = 274;

/// Standard JPEG quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Upper bound on output pixels, so a sliver-shaped source cannot turn into
/// a multi-gigabyte raster once scaled to full width.
pub const DEFAULT_MAX_OUTPUT_PIXELS: u64 = 100_000_000;

/// Settings for the resize pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeSettings {
    /// Output width in pixels.
    pub max_width: u32,
    /// Suffix used when deriving the output key.
    pub resized_suffix: String,
    /// TIFF tag id holding the orientation value.
    pub orientation_tag: u16,
    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
    /// Resampling kernel.
    pub filter: FilterType,
    /// Largest output raster, in pixels, the transform will allocate.
    pub max_output_pixels: u64,
}

impl Default for ResizeSettings {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            resized_suffix: DEFAULT_RESIZED_SUFFIX.to_string(),
            orientation_tag: EXIF_ORIENTATION_TAG,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            filter: FilterType::default(),
            max_output_pixels: DEFAULT_MAX_OUTPUT_PIXELS,
        }
    }
}

impl ResizeSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_width(mut self, max_width: u32) -> Self {
        self.max_width = max_width;
        self
    }

    pub fn with_resized_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.resized_suffix = suffix.into();
        self
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// Derive the key the resized copy of `key` is stored under.
    pub fn output_key(&self, key: &str) -> String {
        format!("{}.{}.jpg", key, self.resized_suffix)
    }

    /// Returns true if `key` already names a resized copy.
    pub fn is_output_key(&self, key: &str) -> bool {
        key.strip_suffix(".jpg")
            .and_then(|rest| rest.strip_suffix(self.resized_suffix.as_str()))
            .is_some_and(|rest| rest.ends_with('.'))
    }
}
