//! Row-density strategy for full-page documents.
//!
//! A row is content when more than `row_fraction` of its pixels are darker
//! than the threshold (channel mean). The suggestion spans from the first
//! content row to the first non-content row after it, across the full frame
//! width, padded by a fraction of the frame. Bands too small to be a page are
//! rejected, and so is a band that never ends: content running off the
//! bottom of the frame means the page edge is not in view.

use serde::{Deserialize, Serialize};

use super::{check_image, BoundsSuggester, RgbaFrame, SuggestError};
use crate::geometry::ImageRect;
use crate::luminance::{brightness, INK_THRESHOLD};

/// Vertical band of text-dense rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RowDensity {
    /// Channel-mean brightness below which a pixel is dark (0-255).
    pub threshold: f32,
    /// Share of dark pixels that makes a row content (0.0 to 1.0).
    pub row_fraction: f64,
    /// Padding on every side as a share of the frame size (0.0 to 1.0).
    pub padding_fraction: f64,
    /// Minimum share of the image the result must exceed on both axes.
    pub min_fraction: f64,
}

impl Default for RowDensity {
    fn default() -> Self {
        Self {
            threshold: INK_THRESHOLD,
            row_fraction: 0.1,
            padding_fraction: 0.05,
            min_fraction: 0.2,
        }
    }
}

impl RowDensity {
    /// Locate `(top, bottom)` of the first dense band, in frame rows. `None`
    /// if no band starts or the band runs to the last row.
    fn find_band(&self, frame: &RgbaFrame) -> Option<(usize, usize)> {
        let limit = frame.width() as f64 * self.row_fraction;
        let mut top = None;

        for (y, row) in frame.rows().enumerate() {
            let dark = row
                .chunks_exact(4)
                .filter(|px| brightness(px[0], px[1], px[2]) < self.threshold)
                .count() as f64;

            if let Some(start) = top {
                if dark < limit {
                    return Some((start, y));
                }
            } else if dark > limit {
                top = Some(y);
            }
        }

        if let Some(start) = top {
            log::debug!("row density band from row {} never ends", start);
        }
        None
    }
}

impl BoundsSuggester for RowDensity {
    fn name(&self) -> &'static str {
        "row_density"
    }

    fn suggest(
        &self,
        frame: &RgbaFrame,
        image_width: u32,
        image_height: u32,
    ) -> Result<Option<ImageRect>, SuggestError> {
        check_image(image_width, image_height)?;

        let Some((top, bottom)) = self.find_band(frame) else {
            return Ok(None);
        };

        let frame_w = frame.width() as f64;
        let frame_h = frame.height() as f64;
        let pad_x = frame_w * self.padding_fraction;
        let pad_y = frame_h * self.padding_fraction;

        let left = (0.0 - pad_x).max(0.0);
        let right = (frame_w - pad_x).min(frame_w);
        let top = (top as f64 - pad_y).max(0.0);
        let bottom = (bottom as f64 + pad_y).min(frame_h);

        let (image_w, image_h) = (image_width as f64, image_height as f64);
        let scale_x = image_w / frame_w;
        let scale_y = image_h / frame_h;
        let rect = ImageRect::new(
            left * scale_x,
            top * scale_y,
            (right - left) * scale_x,
            (bottom - top) * scale_y,
        );

        if rect.width <= image_w * self.min_fraction || rect.height <= image_h * self.min_fraction {
            log::debug!(
                "row density band {:.0}x{:.0} too small for {}x{} image",
                rect.width,
                rect.height,
                image_width,
                image_height
            );
            return Ok(None);
        }

        Ok(Some(rect.confine(image_w, image_h)))
    }
}
