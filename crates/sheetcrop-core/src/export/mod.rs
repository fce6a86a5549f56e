//! Crop export.
//!
//! The export collaborator receives the committed rectangle rounded to a
//! [`PixelRect`](crate::geometry::PixelRect), copies that region out of the
//! decoded photo and encodes it as JPEG for the host to save or upload.

mod crop;
mod jpeg;

use thiserror::Error;

pub use crop::{clamp_to_image, crop_image};
pub use jpeg::{encode_jpeg, export_jpeg, DEFAULT_JPEG_QUALITY};

/// Errors that can occur while exporting a crop.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    /// The crop region has no pixels once clamped to the image.
    #[error("Crop region {width}x{height} at ({x}, {y}) is empty inside a {image_width}x{image_height} image")]
    EmptyRegion {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    /// Pixel data length doesn't match the dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// JPEG encoding failed.
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}
