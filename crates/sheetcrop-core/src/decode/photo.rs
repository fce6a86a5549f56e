//! Photo decoding with EXIF orientation applied.
//!
//! Phone cameras store pixels in sensor order and record the upright
//! orientation in EXIF. Crop rectangles are expressed against the upright
//! image, so orientation is corrected here once, before anything measures
//! the image.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Decode JPEG or PNG bytes into an upright RGB image.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format is not recognized,
/// `DecodeError::CorruptedFile` if decoding fails part way, and
/// `DecodeError::EmptyImage` if the result has no pixels.
pub fn decode_photo(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = read_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    let img = reader.decode().map_err(map_image_error)?;

    let upright = apply_orientation(img, orientation).into_rgb8();
    let (width, height) = upright.dimensions();
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage { width, height });
    }

    log::debug!(
        "decoded {}x{} photo (orientation {:?})",
        width,
        height,
        orientation
    );
    Ok(DecodedImage::from_rgb_image(upright))
}

/// EXIF orientation of `bytes`, `Orientation::Normal` when absent or unreadable.
pub fn read_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}

fn map_image_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
