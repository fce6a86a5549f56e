//! Ink bounding-box strategy.
//!
//! Every pixel whose BT.601 luma is below the ink threshold is treated as
//! content. The bounding box of all content pixels is padded, clamped to the
//! frame, and scaled back to the full-resolution image by the width ratio.

use serde::{Deserialize, Serialize};

use super::{check_image, BoundsSuggester, RgbaFrame, SuggestError};
use crate::geometry::ImageRect;
use crate::luminance::{luma, INK_THRESHOLD};

/// Bounding box of dark ("ink") pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InkBounds {
    /// Luma below which a pixel counts as ink (0-255).
    pub threshold: f32,
    /// Padding added on every side, in frame pixels.
    pub padding: u32,
}

impl Default for InkBounds {
    fn default() -> Self {
        Self {
            threshold: INK_THRESHOLD,
            padding: 8,
        }
    }
}

impl BoundsSuggester for InkBounds {
    fn name(&self) -> &'static str {
        "ink_bounds"
    }

    fn suggest(
        &self,
        frame: &RgbaFrame,
        image_width: u32,
        image_height: u32,
    ) -> Result<Option<ImageRect>, SuggestError> {
        check_image(image_width, image_height)?;

        let (width, height) = (frame.width(), frame.height());
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (width, height, 0u32, 0u32);

        for (y, row) in frame.rows().enumerate() {
            for (x, px) in row.chunks_exact(4).enumerate() {
                if luma(px[0], px[1], px[2]) < self.threshold {
                    let (x, y) = (x as u32, y as u32);
                    min_x = min_x.min(x);
                    min_y = min_y.min(y);
                    max_x = max_x.max(x);
                    max_y = max_y.max(y);
                }
            }
        }

        // A single dark pixel, line or nothing at all has no area
        if max_x <= min_x || max_y <= min_y {
            return Ok(None);
        }

        let min_x = min_x.saturating_sub(self.padding);
        let min_y = min_y.saturating_sub(self.padding);
        let max_x = max_x.saturating_add(self.padding).min(width - 1);
        let max_y = max_y.saturating_add(self.padding).min(height - 1);

        let scale = image_width as f64 / width as f64;
        let rect = ImageRect::new(
            min_x as f64 * scale,
            min_y as f64 * scale,
            (max_x - min_x) as f64 * scale,
            (max_y - min_y) as f64 * scale,
        );

        Ok(Some(rect.confine(image_width as f64, image_height as f64)))
    }
}
