//! Orientation correction.
//!
//! Only the two pure quarter-turn orientations are honoured:
//!
//! | EXIF value | Action |
//! |---|---|
//! | 6 | rotate 90° clockwise |
//! | 8 | rotate 270° clockwise (90° counter-clockwise) |
//! | anything else, or absent | none |
//!
//! Mirrored orientations (2, 4, 5, 7) and the half turn (3) are left as
//! stored.

use image::{imageops, ImageBuffer, Rgb};
use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;

/// Rotation applied to a decoded raster before resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Clockwise270,
}

impl Rotation {
    /// Map an EXIF orientation value to the rotation that uprights the image.
    pub fn from_orientation(orientation: Option<u32>) -> Self {
        match orientation {
            Some(6) => Rotation::Clockwise90,
            Some(8) => Rotation::Clockwise270,
            _ => Rotation::None,
        }
    }

    /// Returns true if this rotation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        !matches!(self, Rotation::None)
    }

    /// Dimensions of a `width x height` raster after this rotation.
    pub fn rotated_dimensions(self, width: u32, height: u32) -> (u32, u32) {
        if self.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

/// Rotate a raster by a quarter turn. Pixels are moved, never resampled.
pub fn apply_rotation(image: DecodedImage, rotation: Rotation) -> DecodedImage {
    if rotation == Rotation::None {
        return image;
    }

    let view = ImageBuffer::<Rgb<u8>, &[u8]>::from_raw(
        image.width,
        image.height,
        image.pixels.as_slice(),
    );
    if let Some(view) = view {
        let rotated = match rotation {
            Rotation::Clockwise270 => imageops::rotate270(&view),
            _ => imageops::rotate90(&view),
        };
        return DecodedImage::from_rgb_image(rotated);
    }

    // Mismatched buffers are passed through for the encoder to reject.
    image
}
