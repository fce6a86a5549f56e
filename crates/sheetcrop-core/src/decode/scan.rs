//! Downscaled RGBA frames for bounds suggestion.

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageBuffer, Rgb};

use super::{DecodeError, DecodedImage};
use crate::suggest::RgbaFrame;

/// Scale `image` to `target_width` pixels wide, preserving aspect ratio, and
/// return it as an RGBA scan frame.
///
/// Always resamples, including upscaling narrow images: strategies rescale
/// by the width ratio and assume the frame has exactly `target_width`
/// columns. The photo is resampled in place from its RGB buffer; only the
/// small result is expanded to RGBA.
///
/// # Arguments
///
/// * `image` - The upright source photo
/// * `target_width` - Width of the scan frame in pixels
///
/// # Returns
///
/// An `RgbaFrame` `target_width` pixels wide with the photo's aspect ratio.
///
/// # Errors
///
/// Returns `DecodeError::InvalidScanWidth` for a zero width,
/// `DecodeError::EmptyImage` for an image without pixels, and
/// `DecodeError::CorruptedFile` if the pixel buffer is shorter than
/// `width * height * 3`.
pub fn scan_frame(image: &DecodedImage, target_width: u32) -> Result<RgbaFrame, DecodeError> {
    if target_width == 0 {
        return Err(DecodeError::InvalidScanWidth);
    }
    if image.is_empty() {
        return Err(DecodeError::EmptyImage {
            width: image.width,
            height: image.height,
        });
    }

    let source: ImageBuffer<Rgb<u8>, &[u8]> =
        ImageBuffer::from_raw(image.width, image.height, image.pixels.as_slice())
            .ok_or_else(|| DecodeError::CorruptedFile("Pixel buffer size mismatch".to_string()))?;

    let target_height = scan_height(image.width, image.height, target_width);
    let scaled = imageops::resize(&source, target_width, target_height, FilterType::Triangle);
    let rgba = DynamicImage::ImageRgb8(scaled).into_rgba8();

    RgbaFrame::new(target_width, target_height, rgba.into_raw()).map_err(DecodeError::from)
}

/// Height of a `target_width` wide frame with the aspect ratio of
/// `width x height`; at least one row.
fn scan_height(width: u32, height: u32, target_width: u32) -> u32 {
    let scaled = height as f64 * target_width as f64 / width as f64;
    (scaled.round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> DecodedImage {
        let pixels = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_scan_height_preserves_ratio() {
        assert_eq!(scan_height(4000, 3000, 256), 192);
        assert_eq!(scan_height(1000, 2000, 256), 512);
        assert_eq!(scan_height(10000, 1, 256), 1);
    }

    #[test]
    fn test_frame_dimensions_and_alpha() {
        let frame = scan_frame(&solid(1024, 768, [40, 50, 60]), 256).unwrap();
        assert_eq!((frame.width(), frame.height()), (256, 192));
        assert_eq!(frame.pixels().len(), 256 * 192 * 4);
        assert_eq!(&frame.pixels()[0..4], &[40, 50, 60, 255]);
    }

    #[test]
    fn test_narrow_image_is_upscaled() {
        let frame = scan_frame(&solid(64, 32, [255, 255, 255]), 256).unwrap();
        assert_eq!((frame.width(), frame.height()), (256, 128));
    }

    #[test]
    fn test_halves_keep_their_side() {
        let mut pixels = Vec::with_capacity(512 * 4 * 3);
        for _ in 0..4 {
            for x in 0..512 {
                let v = if x < 256 { 0 } else { 255 };
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        let frame = scan_frame(&DecodedImage::new(512, 4, pixels), 256).unwrap();

        assert_eq!((frame.width(), frame.height()), (256, 2));
        assert_eq!(&frame.pixels()[0..4], &[0, 0, 0, 255]);
        let last = frame.pixels().len() - 4;
        assert_eq!(&frame.pixels()[last..], &[255, 255, 255, 255]);
    }

    #[test]
    fn test_short_buffer_rejected() {
        let img = DecodedImage {
            width: 8,
            height: 8,
            pixels: vec![0; 10],
        };
        assert!(matches!(
            scan_frame(&img, 4),
            Err(DecodeError::CorruptedFile(_))
        ));
    }

    #[test]
    fn test_zero_width_rejected() {
        let img = solid(8, 8, [0, 0, 0]);
        assert!(matches!(
            scan_frame(&img, 0),
            Err(DecodeError::InvalidScanWidth)
        ));
    }

    #[test]
    fn test_empty_image_rejected() {
        let img = DecodedImage {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        };
        assert!(matches!(
            scan_frame(&img, 256),
            Err(DecodeError::EmptyImage { .. })
        ));
    }
}
