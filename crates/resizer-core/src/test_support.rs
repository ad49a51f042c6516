//! Fixture builders shared by unit tests.

use crate::encode::encode_jpeg;

/// Encode a `width x height` gradient as JPEG, with no EXIF block.
pub(crate) fn gradient_jpeg(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.push(((x * 255) / width.max(1)) as u8);
            pixels.push(((y * 255) / height.max(1)) as u8);
            pixels.push(128);
        }
    }
    encode_jpeg(&pixels, width, height, 90).unwrap()
}

/// Encode a JPEG whose top half is `top` and bottom half is `bottom`.
pub(crate) fn two_tone_jpeg(width: u32, height: u32, top: [u8; 3], bottom: [u8; 3]) -> Vec<u8> {
    let pixels: Vec<u8> = (0..height)
        .flat_map(|y| {
            let colour = if y < height / 2 { top } else { bottom };
            (0..width).flat_map(move |_| colour)
        })
        .collect();
    encode_jpeg(&pixels, width, height, 95).unwrap()
}

/// Insert an APP1 segment holding a single EXIF orientation entry right
/// after the SOI marker of `jpeg`.
pub(crate) fn with_orientation(jpeg: &[u8], orientation: u16) -> Vec<u8> {
    assert_eq!(&jpeg[0..2], &[0xFF, 0xD8], "fixture must be a JPEG");

    let mut payload = Vec::with_capacity(32);
    payload.extend_from_slice(b"Exif\0\0");
    // Little-endian TIFF header, IFD0 at offset 8
    payload.extend_from_slice(&[0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00]);
    // One entry: tag 0x0112 (Orientation), type SHORT, count 1
    payload.extend_from_slice(&[0x01, 0x00]);
    payload.extend_from_slice(&[0x12, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00]);
    payload.extend_from_slice(&orientation.to_le_bytes());
    payload.extend_from_slice(&[0x00, 0x00]);
    // No next IFD
    payload.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

    let segment_len = (payload.len() + 2) as u16;

    let mut out = Vec::with_capacity(jpeg.len() + payload.len() + 4);
    out.extend_from_slice(&jpeg[0..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}
