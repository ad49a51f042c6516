//! Image encoding.
//!
//! Output is always baseline JPEG; [`JPEG_CONTENT_TYPE`] is the MIME type to
//! store it under.

mod jpeg;

pub use jpeg::{
    check_jpeg_dimensions, encode_jpeg, EncodeError, JPEG_CONTENT_TYPE, MAX_JPEG_DIMENSION,
};
