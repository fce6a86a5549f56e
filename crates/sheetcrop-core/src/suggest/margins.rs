//! Fixed-margin strategy.
//!
//! Proposes the region left after trimming fractional margins from each side
//! of the image. It never inspects pixels, which makes it a predictable
//! choice for layouts where the question always sits in the same place.

use serde::{Deserialize, Serialize};

use super::{check_image, BoundsSuggester, RgbaFrame, SuggestError};
use crate::geometry::ImageRect;

/// Fractional margins trimmed from each side (0.0 to 1.0 of the image).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Margins {
    /// A question in the middle of a printed page.
    pub const QUESTION_LAYOUT: Margins = Margins {
        left: 0.1,
        right: 0.1,
        top: 0.2,
        bottom: 0.2,
    };

    /// A band across the upper part of the page: top 15%, 30% tall.
    pub const UPPER_BAND: Margins = Margins {
        left: 0.1,
        right: 0.1,
        top: 0.15,
        bottom: 0.55,
    };

    /// Returns true if every margin is in `[0, 1)` and opposite margins leave
    /// a positive span.
    pub fn is_valid(&self) -> bool {
        let in_range = |m: f64| (0.0..1.0).contains(&m);
        in_range(self.left)
            && in_range(self.right)
            && in_range(self.top)
            && in_range(self.bottom)
            && self.left + self.right < 1.0
            && self.top + self.bottom < 1.0
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::QUESTION_LAYOUT
    }
}

impl BoundsSuggester for Margins {
    fn name(&self) -> &'static str {
        "margins"
    }

    fn suggest(
        &self,
        _frame: &RgbaFrame,
        image_width: u32,
        image_height: u32,
    ) -> Result<Option<ImageRect>, SuggestError> {
        check_image(image_width, image_height)?;
        if !self.is_valid() {
            return Ok(None);
        }

        let (w, h) = (image_width as f64, image_height as f64);
        let rect = ImageRect::new(
            w * self.left,
            h * self.top,
            w * (1.0 - self.left - self.right),
            h * (1.0 - self.top - self.bottom),
        );
        Ok(Some(rect.confine(w, h)))
    }
}
