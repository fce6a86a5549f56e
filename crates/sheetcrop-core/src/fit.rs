//! Letterbox fitting and image/screen coordinate conversion.
//!
//! The photo is drawn "contain"-style: scaled to fit its container while
//! preserving aspect ratio and centered along the shorter axis. [`Fit`]
//! describes that placement and [`CoordinateMapper`] converts between image
//! pixels and screen units through it.
//!
//! # Degenerate containers
//!
//! A container with a zero dimension never divides by zero: any
//! non-positive denominator is floored to 1, which yields a zero-sized but
//! well-defined [`Fit`].

use serde::{Deserialize, Serialize};

use crate::geometry::{ImagePoint, ImageRect, ScreenPoint, ScreenRect, Size};

/// Placement of the letterboxed image inside its container, in screen units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fit {
    pub draw_width: f64,
    pub draw_height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Fit {
    /// Compute the contain-fit of an `image_width x image_height` image in
    /// `container`.
    ///
    /// If the image is relatively wider than the container its width fills
    /// the container and it is centered vertically; otherwise its height
    /// fills and it is centered horizontally.
    ///
    /// # Arguments
    ///
    /// * `image_width` - Full-resolution image width in pixels
    /// * `image_height` - Full-resolution image height in pixels
    /// * `container` - Render size of the container in screen units
    ///
    /// # Returns
    ///
    /// The draw size and centering offsets. Degenerate inputs (zero or
    /// negative sizes) yield a finite fit rather than NaN.
    pub fn contain(image_width: f64, image_height: f64, container: Size) -> Self {
        let container_width = container.width.max(0.0);
        let container_height = container.height.max(0.0);

        let container_ratio = floor_one(container_width) / floor_one(container_height);
        let image_ratio = image_width.max(0.0) / floor_one(image_height);

        if image_ratio > container_ratio {
            let draw_width = container_width;
            let draw_height = draw_width / image_ratio;
            Self {
                draw_width,
                draw_height,
                offset_x: 0.0,
                offset_y: ((container_height - draw_height) / 2.0).max(0.0),
            }
        } else {
            let draw_height = container_height;
            let draw_width = draw_height * image_ratio;
            Self {
                draw_width,
                draw_height,
                offset_x: ((container_width - draw_width) / 2.0).max(0.0),
                offset_y: 0.0,
            }
        }
    }

    /// Screen-space rectangle covered by the drawn image.
    pub fn image_bounds(&self) -> ScreenRect {
        ScreenRect::new(self.offset_x, self.offset_y, self.draw_width, self.draw_height)
    }
}

/// Treat any non-positive (or NaN) denominator as 1.
#[inline]
fn floor_one(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        1.0
    }
}

/// Converts points and rectangles between image space and screen space for
/// one image in one container.
///
/// Rebuild the mapper whenever the container size or the image changes; it
/// is a cheap value type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    image_width: f64,
    image_height: f64,
    fit: Fit,
}

impl CoordinateMapper {
    pub fn new(image_width: u32, image_height: u32, container: Size) -> Self {
        let image_width = image_width as f64;
        let image_height = image_height as f64;
        Self {
            image_width,
            image_height,
            fit: Fit::contain(image_width, image_height, container),
        }
    }

    pub fn fit(&self) -> Fit {
        self.fit
    }

    /// Image bounds as `(width, height)` in pixels.
    pub fn image_extent(&self) -> (f64, f64) {
        (self.image_width, self.image_height)
    }

    /// Map an image point onto the screen.
    pub fn to_screen(&self, point: ImagePoint) -> ScreenPoint {
        ScreenPoint::new(
            self.fit.offset_x + (point.x / floor_one(self.image_width)) * self.fit.draw_width,
            self.fit.offset_y + (point.y / floor_one(self.image_height)) * self.fit.draw_height,
        )
    }

    /// Map a screen point back into the image, clamped to the image bounds.
    ///
    /// The clamp is what keeps every rectangle built from pointer positions
    /// inside the image, even when the pointer overshoots the drawn edge.
    ///
    /// # Arguments
    ///
    /// * `point` - Pointer position relative to the container origin
    ///
    /// # Returns
    ///
    /// The image-space point, with each axis in `[0, image size]`. Points in
    /// the letterbox bars clamp to the nearest image edge.
    pub fn from_screen(&self, point: ScreenPoint) -> ImagePoint {
        let x = ((point.x - self.fit.offset_x) / self.fit.draw_width.max(1.0)) * self.image_width;
        let y = ((point.y - self.fit.offset_y) / self.fit.draw_height.max(1.0)) * self.image_height;
        ImagePoint::new(
            x.max(0.0).min(self.image_width),
            y.max(0.0).min(self.image_height),
        )
    }

    /// Map an image rectangle onto the screen via its two corners.
    pub fn rect_to_screen(&self, rect: &ImageRect) -> ScreenRect {
        let top_left = self.to_screen(rect.top_left());
        let bottom_right = self.to_screen(rect.bottom_right());
        ScreenRect::new(
            top_left.x,
            top_left.y,
            bottom_right.x - top_left.x,
            bottom_right.y - top_left.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_tall_image_in_square_container() {
        // ratio 0.5 < 1.0: height fills
        let fit = Fit::contain(1000.0, 2000.0, Size::new(400.0, 400.0));
        assert_eq!(fit.draw_height, 400.0);
        assert_eq!(fit.draw_width, 200.0);
        assert_eq!(fit.offset_x, 100.0);
        assert_eq!(fit.offset_y, 0.0);
    }

    #[test]
    fn test_fit_wide_image_in_square_container() {
        let fit = Fit::contain(2000.0, 1000.0, Size::new(400.0, 400.0));
        assert_eq!(fit.draw_width, 400.0);
        assert_eq!(fit.draw_height, 200.0);
        assert_eq!(fit.offset_x, 0.0);
        assert_eq!(fit.offset_y, 100.0);
    }

    #[test]
    fn test_fit_matching_ratio_has_no_offsets() {
        let fit = Fit::contain(800.0, 600.0, Size::new(400.0, 300.0));
        assert_eq!(fit.draw_width, 400.0);
        assert_eq!(fit.draw_height, 300.0);
        assert_eq!(fit.offset_x, 0.0);
        assert_eq!(fit.offset_y, 0.0);
    }

    #[test]
    fn test_fit_zero_container_is_defined() {
        let fit = Fit::contain(1000.0, 2000.0, Size::new(0.0, 0.0));
        assert_eq!(fit.draw_width, 0.0);
        assert_eq!(fit.draw_height, 0.0);
        assert!(fit.offset_x.is_finite());
        assert!(fit.offset_y.is_finite());
    }

    #[test]
    fn test_fit_zero_height_image_is_defined() {
        let fit = Fit::contain(1000.0, 0.0, Size::new(400.0, 400.0));
        assert!(fit.draw_width.is_finite());
        assert!(fit.draw_height.is_finite());
    }

    #[test]
    fn test_to_screen_applies_scale_and_offset() {
        let mapper = CoordinateMapper::new(1000, 2000, Size::new(400.0, 400.0));
        let screen = mapper.to_screen(ImagePoint::new(500.0, 1000.0));
        assert_eq!(screen, ScreenPoint::new(200.0, 200.0));
    }

    #[test]
    fn test_from_screen_clamps_to_image() {
        let mapper = CoordinateMapper::new(1000, 2000, Size::new(400.0, 400.0));
        // Left letterbox band maps to x = 0
        let p = mapper.from_screen(ScreenPoint::new(20.0, -50.0));
        assert_eq!(p, ImagePoint::new(0.0, 0.0));

        let p = mapper.from_screen(ScreenPoint::new(399.0, 999.0));
        assert_eq!(p, ImagePoint::new(1000.0, 2000.0));
    }

    #[test]
    fn test_from_screen_zero_container_does_not_divide_by_zero() {
        let mapper = CoordinateMapper::new(1000, 2000, Size::new(0.0, 0.0));
        let p = mapper.from_screen(ScreenPoint::new(10.0, 10.0));
        assert!(p.x.is_finite() && p.y.is_finite());
    }

    #[test]
    fn test_rect_to_screen() {
        let mapper = CoordinateMapper::new(1000, 2000, Size::new(400.0, 400.0));
        let rect = mapper.rect_to_screen(&ImageRect::new(0.0, 0.0, 500.0, 1000.0));
        assert_eq!(rect, ScreenRect::new(100.0, 0.0, 100.0, 200.0));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
