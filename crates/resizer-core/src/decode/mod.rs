//! Image decoding for the resize pipeline.
//!
//! This module provides:
//! - Decoding JPEG and PNG bytes into an RGB8 raster
//! - Reading the EXIF orientation value, if any
//!
//! Decoding never applies orientation itself; the transform stage decides
//! which rotations to honour.

mod reader;
mod types;

pub use reader::{decode_image, read_orientation};
pub use types::{DecodeError, DecodedImage, FilterType};
