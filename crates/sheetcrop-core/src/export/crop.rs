//! Copying a pixel rectangle out of a decoded photo.

use super::ExportError;
use crate::decode::DecodedImage;
use crate::geometry::PixelRect;

/// Clamp `rect` to a `width x height` image.
///
/// Rounding each component separately can push the right or bottom edge one
/// pixel past the image; that pixel is dropped here.
pub fn clamp_to_image(rect: PixelRect, width: u32, height: u32) -> PixelRect {
    let x = rect.x.min(width);
    let y = rect.y.min(height);
    PixelRect {
        x,
        y,
        width: rect.width.min(width - x),
        height: rect.height.min(height - y),
    }
}

/// Copy the region `rect` of `image` into a new image.
///
/// # Errors
///
/// Returns `ExportError::InvalidPixelData` if the image buffer does not match
/// its dimensions and `ExportError::EmptyRegion` if nothing of `rect` lies
/// inside the image.
pub fn crop_image(image: &DecodedImage, rect: PixelRect) -> Result<DecodedImage, ExportError> {
    let expected = image.width as usize * image.height as usize * 3;
    if image.pixels.len() != expected {
        return Err(ExportError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    let region = clamp_to_image(rect, image.width, image.height);
    if region.width == 0 || region.height == 0 {
        return Err(ExportError::EmptyRegion {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            image_width: image.width,
            image_height: image.height,
        });
    }

    if region.width == image.width && region.height == image.height {
        return Ok(image.clone());
    }

    let src_stride = image.width as usize * 3;
    let row_bytes = region.width as usize * 3;
    let mut pixels = Vec::with_capacity(row_bytes * region.height as usize);

    for row in image
        .pixels
        .chunks_exact(src_stride)
        .skip(region.y as usize)
        .take(region.height as usize)
    {
        let start = region.x as usize * 3;
        pixels.extend_from_slice(&row[start..start + row_bytes]);
    }

    Ok(DecodedImage::new(region.width, region.height, pixels))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Each pixel holds `(x, y, 0)`.
    fn coordinate_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 0]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    fn pixel(image: &DecodedImage, x: u32, y: u32) -> [u8; 3] {
        let i = ((y * image.width + x) * 3) as usize;
        [image.pixels[i], image.pixels[i + 1], image.pixels[i + 2]]
    }

    #[test]
    fn test_crop_copies_region() {
        let img = coordinate_image(20, 10);
        let rect = PixelRect {
            x: 5,
            y: 2,
            width: 8,
            height: 4,
        };
        let out = crop_image(&img, rect).unwrap();

        assert_eq!((out.width, out.height), (8, 4));
        assert_eq!(pixel(&out, 0, 0), [5, 2, 0]);
        assert_eq!(pixel(&out, 7, 3), [12, 5, 0]);
    }

    #[test]
    fn test_full_crop_is_copy() {
        let img = coordinate_image(6, 4);
        let rect = PixelRect {
            x: 0,
            y: 0,
            width: 6,
            height: 4,
        };
        let out = crop_image(&img, rect).unwrap();
        assert_eq!(out.pixels, img.pixels);
    }

    #[test]
    fn test_overshoot_is_clamped() {
        let img = coordinate_image(10, 10);
        let rect = PixelRect {
            x: 4,
            y: 6,
            width: 7,
            height: 5,
        };
        let out = crop_image(&img, rect).unwrap();
        assert_eq!((out.width, out.height), (6, 4));
        assert_eq!(pixel(&out, 5, 3), [9, 9, 0]);
    }

    #[test]
    fn test_region_outside_image_is_error() {
        let img = coordinate_image(10, 10);
        let rect = PixelRect {
            x: 10,
            y: 0,
            width: 5,
            height: 5,
        };
        assert!(matches!(
            crop_image(&img, rect),
            Err(ExportError::EmptyRegion { .. })
        ));
    }

    #[test]
    fn test_short_buffer_is_error() {
        let img = DecodedImage {
            width: 4,
            height: 4,
            pixels: vec![0; 10],
        };
        let rect = PixelRect {
            x: 0,
            y: 0,
            width: 2,
            height: 2,
        };
        assert_eq!(
            crop_image(&img, rect).unwrap_err(),
            ExportError::InvalidPixelData {
                expected: 48,
                actual: 10
            }
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
