//! JPEG encoding of exported crops.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{crop_image, ExportError};
use crate::decode::DecodedImage;
use crate::geometry::PixelRect;

/// Quality used when the host does not ask for one.
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// Encode an RGB image as JPEG.
///
/// `quality` is clamped to 1-100.
pub fn encode_jpeg(image: &DecodedImage, quality: u8) -> Result<Vec<u8>, ExportError> {
    let expected = image.width as usize * image.height as usize * 3;
    if image.is_empty() || image.pixels.len() != expected {
        return Err(ExportError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .write_image(
            &image.pixels,
            image.width,
            image.height,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| ExportError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Crop `image` to `rect` and encode the result as JPEG.
///
/// # Arguments
///
/// * `image` - The upright source photo
/// * `rect` - Region in image pixels; clamped to the image first
/// * `quality` - JPEG quality, clamped to 1-100
///
/// # Returns
///
/// The encoded JPEG bytes.
///
/// # Errors
///
/// Returns `ExportError::EmptyRegion` if nothing of `rect` lies inside the
/// image, `ExportError::InvalidPixelData` for a malformed buffer and
/// `ExportError::EncodingFailed` if the encoder fails.
pub fn export_jpeg(
    image: &DecodedImage,
    rect: PixelRect,
    quality: u8,
) -> Result<Vec<u8>, ExportError> {
    let cropped = crop_image(image, rect)?;
    log::debug!(
        "exporting {}x{} crop at ({}, {})",
        cropped.width,
        cropped.height,
        rect.x,
        rect.y
    );
    encode_jpeg(&cropped, quality)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_photo;

    fn gray(width: u32, height: u32) -> DecodedImage {
        DecodedImage::new(width, height, vec![128; (width * height * 3) as usize])
    }

    #[test]
    fn test_encode_has_jpeg_markers() {
        let bytes = encode_jpeg(&gray(32, 16), DEFAULT_JPEG_QUALITY).unwrap();
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
        assert_eq!(&bytes[bytes.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_quality_is_clamped() {
        assert!(encode_jpeg(&gray(8, 8), 0).is_ok());
        assert!(encode_jpeg(&gray(8, 8), 255).is_ok());
    }

    #[test]
    fn test_mismatched_buffer_is_error() {
        let img = DecodedImage {
            width: 4,
            height: 4,
            pixels: vec![0; 47],
        };
        assert!(matches!(
            encode_jpeg(&img, 90),
            Err(ExportError::InvalidPixelData { .. })
        ));
    }

    #[test]
    fn test_export_decodes_to_crop_size() {
        let rect = PixelRect {
            x: 10,
            y: 5,
            width: 40,
            height: 20,
        };
        let bytes = export_jpeg(&gray(100, 50), rect, 90).unwrap();
        let decoded = decode_photo(&bytes).unwrap();
        assert_eq!((decoded.width, decoded.height), (40, 20));
    }
}
