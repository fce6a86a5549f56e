//! Initial crop suggestions from a fast pixel scan.
//!
//! A [`BoundsSuggester`] looks at a small downscaled RGBA copy of the photo
//! (an [`RgbaFrame`], supplied by the decode collaborator) and proposes one
//! rectangle in full-resolution image space, or nothing. Suggestions only
//! seed the crop box; a failure or an empty result degrades to the host's
//! default region and is never fatal.
//!
//! ## Strategies
//!
//! - [`InkBounds`]: bounding box of every pixel darker than an ink threshold
//! - [`RowDensity`]: vertical band of rows dense with dark pixels
//! - [`Margins`]: fixed fractional margins, no pixel inspection
//!
//! They are interchangeable; the active one is chosen through
//! [`crate::config::SuggesterConfig`].

mod frame;
mod ink;
mod margins;
mod rows;

pub use frame::RgbaFrame;
pub use ink::InkBounds;
pub use margins::Margins;
pub use rows::RowDensity;

use thiserror::Error;

use crate::geometry::ImageRect;

/// Errors a strategy can report. Callers downgrade these to "no suggestion".
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SuggestError {
    /// The scan frame has a zero dimension.
    #[error("Empty scan frame: {width}x{height}")]
    EmptyFrame { width: u32, height: u32 },

    /// The pixel buffer does not hold width * height RGBA pixels.
    #[error("Invalid scan frame: expected {expected} bytes (width * height * 4), got {actual}")]
    FrameSize { expected: usize, actual: usize },

    /// The full-resolution image has a zero dimension.
    #[error("Empty image: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
}

/// A replaceable strategy proposing the initial crop rectangle.
///
/// Implementations must be cheap and deterministic; they may run on a worker
/// thread, hence `Send + Sync`.
pub trait BoundsSuggester: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Propose a rectangle in the `image_width x image_height` image space.
    ///
    /// `Ok(None)` means the scan found nothing worth suggesting.
    fn suggest(
        &self,
        frame: &RgbaFrame,
        image_width: u32,
        image_height: u32,
    ) -> Result<Option<ImageRect>, SuggestError>;
}

/// Reject zero-sized full-resolution images before scanning.
pub(crate) fn check_image(image_width: u32, image_height: u32) -> Result<(), SuggestError> {
    if image_width == 0 || image_height == 0 {
        return Err(SuggestError::EmptyImage {
            width: image_width,
            height: image_height,
        });
    }
    Ok(())
}
