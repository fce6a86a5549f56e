//! Resize handles and gesture hit-testing.
//!
//! Eight square hit-zones sit on the crop box in screen space: one on each
//! corner and one on the midpoint of each edge. A touch that misses all of
//! them targets [`Handle::Move`], even outside the box itself.
//!
//! Hit-testing walks the zones in a fixed order, corners before edges:
//! `tl, tr, bl, br, t, b, l, r`. Where zones overlap (small boxes) the corner
//! wins.

use serde::{Deserialize, Serialize};

use crate::geometry::{ScreenPoint, ScreenRect};

/// Default side length of a handle's touch target, in screen units.
pub const DEFAULT_HANDLE_SIZE: f64 = 36.0;

/// Smallest touch target a fingertip can reliably hit, in screen units.
pub const MIN_HANDLE_SIZE: f64 = 32.0;

/// Gesture target on the crop box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handle {
    #[serde(rename = "move")]
    Move,
    #[serde(rename = "tl")]
    TopLeft,
    #[serde(rename = "tr")]
    TopRight,
    #[serde(rename = "bl")]
    BottomLeft,
    #[serde(rename = "br")]
    BottomRight,
    #[serde(rename = "t")]
    Top,
    #[serde(rename = "b")]
    Bottom,
    #[serde(rename = "l")]
    Left,
    #[serde(rename = "r")]
    Right,
}

impl Handle {
    /// Resize handles in hit-test priority order.
    pub const RESIZE: [Handle; 8] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
        Handle::Top,
        Handle::Bottom,
        Handle::Left,
        Handle::Right,
    ];

    /// Short identifier used by hosts (`"tl"`, `"move"`, ...).
    pub fn id(self) -> &'static str {
        match self {
            Handle::Move => "move",
            Handle::TopLeft => "tl",
            Handle::TopRight => "tr",
            Handle::BottomLeft => "bl",
            Handle::BottomRight => "br",
            Handle::Top => "t",
            Handle::Bottom => "b",
            Handle::Left => "l",
            Handle::Right => "r",
        }
    }

    pub fn is_move(self) -> bool {
        self == Handle::Move
    }

    /// Dragging this handle moves the left edge.
    pub fn drives_left(self) -> bool {
        matches!(self, Handle::TopLeft | Handle::BottomLeft | Handle::Left)
    }

    /// Dragging this handle moves the right edge.
    pub fn drives_right(self) -> bool {
        matches!(self, Handle::TopRight | Handle::BottomRight | Handle::Right)
    }

    /// Dragging this handle moves the top edge.
    pub fn drives_top(self) -> bool {
        matches!(self, Handle::TopLeft | Handle::TopRight | Handle::Top)
    }

    /// Dragging this handle moves the bottom edge.
    pub fn drives_bottom(self) -> bool {
        matches!(self, Handle::BottomLeft | Handle::BottomRight | Handle::Bottom)
    }

    /// Point of `bounds` this handle is centered on. `Move` uses the center.
    fn anchor(self, bounds: &ScreenRect) -> ScreenPoint {
        let mid_x = bounds.x + bounds.width / 2.0;
        let mid_y = bounds.y + bounds.height / 2.0;
        let (x, y) = match self {
            Handle::Move => (mid_x, mid_y),
            Handle::TopLeft => (bounds.x, bounds.y),
            Handle::TopRight => (bounds.right(), bounds.y),
            Handle::BottomLeft => (bounds.x, bounds.bottom()),
            Handle::BottomRight => (bounds.right(), bounds.bottom()),
            Handle::Top => (mid_x, bounds.y),
            Handle::Bottom => (mid_x, bounds.bottom()),
            Handle::Left => (bounds.x, mid_y),
            Handle::Right => (bounds.right(), mid_y),
        };
        ScreenPoint::new(x, y)
    }
}

/// Hit-zones for one render of the crop box, in screen space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandleSet {
    /// The crop box itself; the `move` target.
    pub bounds: ScreenRect,
    /// Resize zones in priority order.
    pub zones: [(Handle, ScreenRect); 8],
}

impl HandleSet {
    /// Lay out `size x size` handles around `bounds`.
    pub fn layout(bounds: ScreenRect, size: f64) -> Self {
        let zones = Handle::RESIZE
            .map(|handle| (handle, ScreenRect::centered_square(handle.anchor(&bounds), size)));
        Self { bounds, zones }
    }

    /// Hit rectangle for `handle`; `Move` yields the box itself.
    pub fn zone(&self, handle: Handle) -> ScreenRect {
        self.zones
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, rect)| *rect)
            .unwrap_or(self.bounds)
    }

    /// Resolve the gesture target for a touch at `point`.
    ///
    /// The box interior is not bounds-checked: anything that misses every
    /// resize zone is a move.
    pub fn hit_test(&self, point: ScreenPoint) -> Handle {
        self.zones
            .iter()
            .find(|(_, rect)| rect.contains(point))
            .map(|(handle, _)| *handle)
            .unwrap_or(Handle::Move)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Handle, ScreenRect)> {
        self.zones.iter()
    }
}
