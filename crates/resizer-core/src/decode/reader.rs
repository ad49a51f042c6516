//! Container decoding and EXIF orientation lookup.

use std::io::Cursor;

use exif::{Context, In, Reader, Tag};
use image::{ImageError, ImageReader};

use super::{DecodeError, DecodedImage};

/// Decode encoded image bytes into an RGB8 raster.
///
/// The container format is guessed from the leading bytes. No orientation
/// correction is applied here; see [`read_orientation`].
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes carry no known image
/// signature or name a format without a decoder (JPEG, PNG, GIF, BMP and
/// TIFF are decoded), and `DecodeError::CorruptedFile` if a recognised container
/// fails to decode (truncated data, bad markers).
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader.decode().map_err(|e| match e {
        // Recognised signature, but no codec compiled in (WebP, AVIF, ...).
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    })?;

    Ok(DecodedImage::from_rgb_image(img.into_rgb8()))
}

/// Read the orientation value stored under `tag` in the primary IFD.
///
/// `tag` is the numeric TIFF tag id (274 for the standard EXIF orientation).
/// Missing or unreadable metadata yields `None`; many images carry no EXIF
/// block at all.
pub fn read_orientation(bytes: &[u8], tag: u16) -> Option<u32> {
    let mut cursor = Cursor::new(bytes);
    let exif = Reader::new().read_from_container(&mut cursor).ok()?;
    let field = exif.get_field(Tag(Context::Tiff, tag), In::PRIMARY)?;
    field.value.get_uint(0)
}
