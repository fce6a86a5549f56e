//! Crop engine configuration.
//!
//! Every field has a default, so a host only supplies what it changes. Hosts
//! pass the config as a plain object; missing fields fall back to
//! [`CropConfig::default`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::ImageRect;
use crate::handles::{DEFAULT_HANDLE_SIZE, MIN_HANDLE_SIZE};
use crate::suggest::{BoundsSuggester, InkBounds, Margins, RowDensity};

/// Errors reported by [`CropConfig::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Handle size must be finite and at least [`MIN_HANDLE_SIZE`].
    #[error("Invalid handle size: {0}")]
    InvalidHandleSize(f64),

    /// Minimum crop size must be positive and finite.
    #[error("Invalid minimum crop size: {width}x{height}")]
    InvalidMinimumSize { width: f64, height: f64 },

    /// Default region fractions must be in (0, 1].
    #[error("Invalid default region: {width_fraction}x{height_fraction}")]
    InvalidDefaultRegion {
        width_fraction: f64,
        height_fraction: f64,
    },

    /// Scan width must be non-zero.
    #[error("Scan width must be non-zero")]
    InvalidScanWidth,

    /// Strategy parameters are out of range.
    #[error("Invalid suggester settings: {0}")]
    InvalidSuggester(String),
}

/// Centered fallback region used when no suggestion is available.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DefaultRegion {
    /// Share of the image width covered (0.0 to 1.0).
    pub width_fraction: f64,
    /// Share of the image height covered (0.0 to 1.0).
    pub height_fraction: f64,
}

impl DefaultRegion {
    /// Whole worksheet: 80% x 50%.
    pub const WORKSHEET: DefaultRegion = DefaultRegion {
        width_fraction: 0.8,
        height_fraction: 0.5,
    };

    /// Single question: 80% x 30%.
    pub const QUESTION: DefaultRegion = DefaultRegion {
        width_fraction: 0.8,
        height_fraction: 0.3,
    };

    /// The region centered in an `image_width x image_height` image.
    pub fn rect_for(&self, image_width: u32, image_height: u32) -> ImageRect {
        let (w, h) = (image_width as f64, image_height as f64);
        let width = w * self.width_fraction;
        let height = h * self.height_fraction;
        ImageRect::new((w - width) / 2.0, (h - height) / 2.0, width, height)
    }
}

impl Default for DefaultRegion {
    fn default() -> Self {
        Self::WORKSHEET
    }
}

/// Which [`BoundsSuggester`] seeds the crop box, with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SuggesterConfig {
    InkBounds(InkBounds),
    RowDensity(RowDensity),
    Margins(Margins),
}

impl SuggesterConfig {
    /// The configured strategy.
    pub fn strategy(&self) -> &dyn BoundsSuggester {
        match self {
            SuggesterConfig::InkBounds(s) => s,
            SuggesterConfig::RowDensity(s) => s,
            SuggesterConfig::Margins(s) => s,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let unit = |v: f64| (0.0..=1.0).contains(&v);
        match self {
            SuggesterConfig::InkBounds(s) => {
                if !(0.0..=255.0).contains(&s.threshold) {
                    return Err(ConfigError::InvalidSuggester(format!(
                        "ink threshold {} outside 0-255",
                        s.threshold
                    )));
                }
            }
            SuggesterConfig::RowDensity(s) => {
                if !(0.0..=255.0).contains(&s.threshold)
                    || !unit(s.row_fraction)
                    || !unit(s.padding_fraction)
                    || !unit(s.min_fraction)
                {
                    return Err(ConfigError::InvalidSuggester(format!("{:?}", s)));
                }
            }
            SuggesterConfig::Margins(s) => {
                if !s.is_valid() {
                    return Err(ConfigError::InvalidSuggester(format!("{:?}", s)));
                }
            }
        }
        Ok(())
    }
}

impl Default for SuggesterConfig {
    fn default() -> Self {
        SuggesterConfig::InkBounds(InkBounds::default())
    }
}

/// Settings for one crop session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CropConfig {
    /// Side length of each handle's touch target, in screen units; at least
    /// [`MIN_HANDLE_SIZE`].
    pub handle_size: f64,
    /// Minimum crop width, in image pixels.
    pub min_width: f64,
    /// Minimum crop height, in image pixels.
    pub min_height: f64,
    /// Fallback region when no suggestion is available.
    pub default_region: DefaultRegion,
    /// Width of the downscaled frame scanned for suggestions.
    pub scan_width: u32,
    /// Strategy that seeds the crop box.
    pub suggester: SuggesterConfig,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            handle_size: DEFAULT_HANDLE_SIZE,
            min_width: 40.0,
            min_height: 40.0,
            default_region: DefaultRegion::WORKSHEET,
            scan_width: 256,
            suggester: SuggesterConfig::default(),
        }
    }
}

impl CropConfig {
    /// Check every field is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.handle_size.is_finite() && self.handle_size >= MIN_HANDLE_SIZE) {
            return Err(ConfigError::InvalidHandleSize(self.handle_size));
        }

        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.min_width) || !positive(self.min_height) {
            return Err(ConfigError::InvalidMinimumSize {
                width: self.min_width,
                height: self.min_height,
            });
        }

        let fraction = |v: f64| v > 0.0 && v <= 1.0;
        let region = self.default_region;
        if !fraction(region.width_fraction) || !fraction(region.height_fraction) {
            return Err(ConfigError::InvalidDefaultRegion {
                width_fraction: region.width_fraction,
                height_fraction: region.height_fraction,
            });
        }

        if self.scan_width == 0 {
            return Err(ConfigError::InvalidScanWidth);
        }

        self.suggester.validate()
    }
}
