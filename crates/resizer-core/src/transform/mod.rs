//! Raster transforms applied between decode and encode.
//!
//! # Transform Order
//!
//! 1. Orientation correction (quarter turns only)
//! 2. Proportional resize to the maximum width
//!
//! The resize dimensions are always computed from the raster *after*
//! orientation correction.

mod orientation;
mod resize;

pub use orientation::{apply_rotation, Rotation};
pub use resize::{resize, target_dimensions, ResizeError};
