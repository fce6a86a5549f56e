//! Geometry primitives for the crop engine.
//!
//! Every point and rectangle carries its coordinate space in its type:
//!
//! - **Image space** ([`ImagePoint`], [`ImageRect`]): the source photo's native
//!   pixel grid, origin at the top-left corner.
//! - **Screen space** ([`ScreenPoint`], [`ScreenRect`]): the rendered
//!   container's on-screen units, origin at the component's top-left corner.
//!
//! Conversions between the two live in [`crate::fit::CoordinateMapper`].

use serde::{Deserialize, Serialize};

/// A point in image-pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImagePoint {
    pub x: f64,
    pub y: f64,
}

impl ImagePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset from `origin` to this point.
    pub fn delta_from(self, origin: ScreenPoint) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// Width and height of a render container, in screen units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A rectangle in image-pixel space.
///
/// The engine keeps `width > 0`, `height > 0` and the whole rectangle inside
/// `[0, image_width] x [0, image_height]`; see [`ImageRect::confine`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ImageRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top_left(&self) -> ImagePoint {
        ImagePoint::new(self.x, self.y)
    }

    pub fn bottom_right(&self) -> ImagePoint {
        ImagePoint::new(self.right(), self.bottom())
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Returns true if the rectangle encloses a positive area.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Fit the rectangle inside `[0, image_width] x [0, image_height]`.
    ///
    /// The rectangle is shifted back inside the image rather than shrunk; it
    /// only shrinks when it is larger than the image on that axis.
    pub fn confine(self, image_width: f64, image_height: f64) -> Self {
        let image_width = image_width.max(0.0);
        let image_height = image_height.max(0.0);

        // max/min rather than clamp: NaN from a host collapses to 0 instead of panicking
        let width = self.width.max(0.0).min(image_width);
        let height = self.height.max(0.0).min(image_height);

        Self {
            x: self.x.max(0.0).min(image_width - width),
            y: self.y.max(0.0).min(image_height - height),
            width,
            height,
        }
    }

    /// Round to whole pixels for the export step.
    ///
    /// Uses `round()` on every component; flooring would bias crops up and
    /// to the left.
    pub fn to_pixel_rect(&self) -> PixelRect {
        PixelRect {
            x: self.x.max(0.0).round() as u32,
            y: self.y.max(0.0).round() as u32,
            width: self.width.max(0.0).round() as u32,
            height: self.height.max(0.0).round() as u32,
        }
    }
}

/// A rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A `size x size` square centered on `center`.
    pub fn centered_square(center: ScreenPoint, size: f64) -> Self {
        let half = size / 2.0;
        Self::new(center.x - half, center.y - half, size, size)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Edge-inclusive containment test.
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

/// An integer rectangle in image-pixel space, handed to the export step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// An immutable description of the photo being cropped.
///
/// `width` and `height` are the full-resolution (orientation-corrected) pixel
/// dimensions, not the render size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Opaque locator the host uses to find the photo again (URI, path, key).
    pub locator: String,
    pub width: u32,
    pub height: u32,
}

impl ImageDescriptor {
    pub fn new(locator: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            locator: locator.into(),
            width,
            height,
        }
    }

    /// Image bounds as floating point `(width, height)`.
    pub fn extent(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64)
    }
}
