//! Gesture state machine for moving and resizing the crop box.
//!
//! ```text
//!            touch_start                 touch_move (commit)
//!   Idle ──────────────────▶ Dragging ◀──────────────┐
//!    ▲                          │  └─────────────────┘
//!    └──── touch_end / cancel ──┘
//! ```
//!
//! A [`DragSession`] records the grabbed handle, the pointer's starting
//! screen position and a snapshot of the image-space rectangle. Each move is
//! computed from that snapshot plus the total pointer delta, never from the
//! previous tick, so rounding does not accumulate.
//!
//! Move and end events without a matching start are ignored; the input layer
//! is allowed to deliver duplicates or reorder them.

use crate::fit::CoordinateMapper;
use crate::geometry::{ImageRect, ScreenPoint};
use crate::handles::{Handle, HandleSet};
use crate::store::{Provenance, RectangleStore};

/// Transient state of one gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// What the gesture grabbed.
    pub handle: Handle,
    /// Pointer position at touch start, in screen space.
    pub origin: ScreenPoint,
    /// Rectangle at touch start, in image space.
    pub snapshot: ImageRect,
}

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Minimum crop dimensions, in image pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinSize {
    pub width: f64,
    pub height: f64,
}

impl MinSize {
    /// Grow `rect` to at least this size and confine it to the image.
    ///
    /// An image smaller than the minimum caps the minimum at the image size.
    pub fn enforce(&self, rect: ImageRect, image_width: f64, image_height: f64) -> ImageRect {
        ImageRect {
            width: rect.width.max(self.width.min(image_width)),
            height: rect.height.max(self.height.min(image_height)),
            ..rect
        }
        .confine(image_width, image_height)
    }
}

impl Default for MinSize {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 40.0,
        }
    }
}

/// Turns pointer events into rectangle updates.
#[derive(Debug, Clone)]
pub struct DragController {
    state: DragState,
    handle_size: f64,
    min_size: MinSize,
}

impl DragController {
    pub fn new(handle_size: f64, min_size: MinSize) -> Self {
        Self {
            state: DragState::Idle,
            handle_size,
            min_size,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn min_size(&self) -> MinSize {
        self.min_size
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Handle layout for `rect` as currently rendered.
    pub fn handles(&self, mapper: &CoordinateMapper, rect: &ImageRect) -> HandleSet {
        HandleSet::layout(mapper.rect_to_screen(rect), self.handle_size)
    }

    /// Begin a gesture at `point`, grabbing whatever handle it hits.
    ///
    /// A start while already dragging replaces the session: the input layer
    /// lost the previous release.
    pub fn touch_start(
        &mut self,
        point: ScreenPoint,
        mapper: &CoordinateMapper,
        store: &RectangleStore,
    ) -> Handle {
        let snapshot = store.rect();
        let handle = self.handles(mapper, &snapshot).hit_test(point);
        log::debug!("drag start on {} at ({:.1}, {:.1})", handle.id(), point.x, point.y);

        self.state = DragState::Dragging(DragSession {
            handle,
            origin: point,
            snapshot,
        });
        handle
    }

    /// Apply the pointer at `point` and commit the result to `store`.
    ///
    /// Returns the committed rectangle, or `None` when idle.
    pub fn touch_move(
        &mut self,
        point: ScreenPoint,
        mapper: &CoordinateMapper,
        store: &mut RectangleStore,
    ) -> Option<ImageRect> {
        let DragState::Dragging(session) = self.state else {
            return None;
        };

        let (dx, dy) = point.delta_from(session.origin);
        let rect = if session.handle.is_move() {
            translate(&session.snapshot, dx, dy, mapper)
        } else {
            resize(&session.snapshot, session.handle, dx, dy, mapper, self.min_size)
        };

        store.set(rect, Provenance::UserAdjusted);
        Some(rect)
    }

    /// Finish the gesture. Returns false if there was none.
    pub fn touch_end(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.state = DragState::Idle;
        was_dragging
    }

    /// Abort the gesture. The last committed rectangle stays.
    pub fn touch_cancel(&mut self) -> bool {
        self.touch_end()
    }
}

/// Move policy: shift the snapshot's screen anchor, map it back through
/// `from_screen` (inheriting its clamp), keep the size.
fn translate(snapshot: &ImageRect, dx: f64, dy: f64, mapper: &CoordinateMapper) -> ImageRect {
    let anchor = mapper.to_screen(snapshot.top_left());
    let moved = mapper.from_screen(ScreenPoint::new(anchor.x + dx, anchor.y + dy));
    let (image_w, image_h) = mapper.image_extent();

    ImageRect {
        x: moved.x,
        y: moved.y,
        ..*snapshot
    }
    .confine(image_w, image_h)
}

/// Resize policy: move only the corners on the handle's axes, map both back,
/// normalize so a handle dragged past the opposite edge flips the box.
fn resize(
    snapshot: &ImageRect,
    handle: Handle,
    dx: f64,
    dy: f64,
    mapper: &CoordinateMapper,
    min_size: MinSize,
) -> ImageRect {
    let mut top_left = mapper.to_screen(snapshot.top_left());
    let mut bottom_right = mapper.to_screen(snapshot.bottom_right());

    if handle.drives_left() {
        top_left.x += dx;
    }
    if handle.drives_top() {
        top_left.y += dy;
    }
    if handle.drives_right() {
        bottom_right.x += dx;
    }
    if handle.drives_bottom() {
        bottom_right.y += dy;
    }

    let p1 = mapper.from_screen(top_left);
    let p2 = mapper.from_screen(bottom_right);
    let (image_w, image_h) = mapper.image_extent();

    let normalized = ImageRect {
        x: p1.x.min(p2.x),
        y: p1.y.min(p2.y),
        width: (p2.x - p1.x).abs(),
        height: (p2.y - p1.y).abs(),
    };
    min_size.enforce(normalized, image_w, image_h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    /// 1000x1000 image in a 1000x1000 container: screen == image.
    fn unit_mapper() -> CoordinateMapper {
        CoordinateMapper::new(1000, 1000, Size::new(1000.0, 1000.0))
    }

    fn assert_close(actual: ImageRect, expected: ImageRect) {
        let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
        assert!(
            close(actual.x, expected.x)
                && close(actual.y, expected.y)
                && close(actual.width, expected.width)
                && close(actual.height, expected.height),
            "{:?} != {:?}",
            actual,
            expected
        );
    }

    fn drag(
        start: (f64, f64),
        to: (f64, f64),
        rect: ImageRect,
        mapper: &CoordinateMapper,
    ) -> (Handle, ImageRect) {
        let mut store = RectangleStore::new(rect);
        let mut controller = DragController::new(36.0, MinSize::default());
        let handle = controller.touch_start(ScreenPoint::new(start.0, start.1), mapper, &store);
        let result = controller
            .touch_move(ScreenPoint::new(to.0, to.1), mapper, &mut store)
            .unwrap();
        assert_eq!(store.rect(), result);
        (handle, result)
    }

    #[test]
    fn test_move_by_delta() {
        let rect = ImageRect::new(100.0, 100.0, 200.0, 200.0);
        let (handle, moved) = drag((200.0, 200.0), (220.0, 190.0), rect, &unit_mapper());
        assert_eq!(handle, Handle::Move);
        assert_close(moved, ImageRect::new(120.0, 90.0, 200.0, 200.0));
    }

    #[test]
    fn test_move_clamps_at_image_edges() {
        let rect = ImageRect::new(100.0, 100.0, 200.0, 200.0);
        let (_, moved) = drag((200.0, 200.0), (-500.0, 5000.0), rect, &unit_mapper());
        assert_close(moved, ImageRect::new(0.0, 800.0, 200.0, 200.0));
    }

    #[test]
    fn test_move_through_letterbox_scale() {
        // 2000x1000 image in 400x400: scale 0.2, offset_y 100
        let mapper = CoordinateMapper::new(2000, 1000, Size::new(400.0, 400.0));
        let rect = ImageRect::new(500.0, 250.0, 500.0, 250.0);
        let (handle, moved) = drag((150.0, 175.0), (170.0, 185.0), rect, &mapper);
        assert_eq!(handle, Handle::Move);
        assert_close(moved, ImageRect::new(600.0, 300.0, 500.0, 250.0));
    }

    #[test]
    fn test_resize_bottom_right_respects_minimum() {
        let rect = ImageRect::new(0.0, 0.0, 100.0, 100.0);
        let (handle, resized) = drag((100.0, 100.0), (10.0, 10.0), rect, &unit_mapper());
        assert_eq!(handle, Handle::BottomRight);
        assert_close(resized, ImageRect::new(0.0, 0.0, 40.0, 40.0));
    }

    #[test]
    fn test_resize_edge_moves_one_axis() {
        let rect = ImageRect::new(100.0, 100.0, 200.0, 200.0);
        let (handle, resized) = drag((300.0, 200.0), (350.0, 260.0), rect, &unit_mapper());
        assert_eq!(handle, Handle::Right);
        assert_close(resized, ImageRect::new(100.0, 100.0, 250.0, 200.0));
    }

    #[test]
    fn test_resize_flips_past_opposite_edge() {
        let rect = ImageRect::new(100.0, 100.0, 200.0, 200.0);
        // Drag the left edge 300 px right, 100 px past the right edge
        let (handle, resized) = drag((100.0, 200.0), (400.0, 200.0), rect, &unit_mapper());
        assert_eq!(handle, Handle::Left);
        assert_close(resized, ImageRect::new(300.0, 100.0, 100.0, 200.0));
    }

    #[test]
    fn test_resize_clamps_overshoot() {
        let rect = ImageRect::new(100.0, 100.0, 200.0, 200.0);
        let (handle, resized) = drag((100.0, 100.0), (-400.0, -400.0), rect, &unit_mapper());
        assert_eq!(handle, Handle::TopLeft);
        assert_close(resized, ImageRect::new(0.0, 0.0, 300.0, 300.0));
    }

    #[test]
    fn test_minimum_near_edge_stays_in_bounds() {
        let rect = ImageRect::new(900.0, 900.0, 100.0, 100.0);
        // Collapse onto the bottom-right corner
        let (_, resized) = drag((900.0, 900.0), (1000.0, 1000.0), rect, &unit_mapper());
        assert_close(resized, ImageRect::new(960.0, 960.0, 40.0, 40.0));
    }

    #[test]
    fn test_moves_use_session_snapshot() {
        let mapper = unit_mapper();
        let mut store = RectangleStore::new(ImageRect::new(100.0, 100.0, 200.0, 200.0));
        let mut controller = DragController::new(36.0, MinSize::default());
        controller.touch_start(ScreenPoint::new(200.0, 200.0), &mapper, &store);

        controller.touch_move(ScreenPoint::new(210.0, 200.0), &mapper, &mut store);
        let rect = controller
            .touch_move(ScreenPoint::new(230.0, 200.0), &mapper, &mut store)
            .unwrap();

        // Delta is measured from the start, not the previous tick
        assert!((rect.x - 130.0).abs() < 1e-9);
    }

    #[test]
    fn test_idle_events_are_ignored() {
        let mapper = unit_mapper();
        let rect = ImageRect::new(100.0, 100.0, 200.0, 200.0);
        let mut store = RectangleStore::new(rect);
        let mut controller = DragController::new(36.0, MinSize::default());

        assert!(controller
            .touch_move(ScreenPoint::new(10.0, 10.0), &mapper, &mut store)
            .is_none());
        assert!(!controller.touch_end());
        assert!(!controller.touch_cancel());
        assert_eq!(store.rect(), rect);
        assert!(!store.is_user_adjusted());
    }

    #[test]
    fn test_end_returns_to_idle_and_stops_mutation() {
        let mapper = unit_mapper();
        let mut store = RectangleStore::new(ImageRect::new(100.0, 100.0, 200.0, 200.0));
        let mut controller = DragController::new(36.0, MinSize::default());

        controller.touch_start(ScreenPoint::new(200.0, 200.0), &mapper, &store);
        controller.touch_move(ScreenPoint::new(250.0, 200.0), &mapper, &mut store);
        assert!(store.is_user_adjusted());
        assert!(controller.touch_end());
        assert_eq!(*controller.state(), DragState::Idle);

        let committed = store.rect();
        controller.touch_move(ScreenPoint::new(600.0, 600.0), &mapper, &mut store);
        assert_eq!(store.rect(), committed);
    }

    #[test]
    fn test_start_alone_does_not_adjust() {
        let mapper = unit_mapper();
        let store = RectangleStore::new(ImageRect::new(100.0, 100.0, 200.0, 200.0));
        let mut controller = DragController::new(36.0, MinSize::default());
        controller.touch_start(ScreenPoint::new(200.0, 200.0), &mapper, &store);
        assert!(controller.is_dragging());
        assert!(!store.is_user_adjusted());
    }

    #[test]
    fn test_enforce_grows_and_confines() {
        let tiny = ImageRect::new(990.0, 5.0, 4.0, 100.0);
        let rect = MinSize::default().enforce(tiny, 1000.0, 1000.0);
        assert_close(rect, ImageRect::new(960.0, 5.0, 40.0, 100.0));
    }

    #[test]
    fn test_tiny_image_caps_minimum() {
        let mapper = CoordinateMapper::new(30, 30, Size::new(300.0, 300.0));
        let rect = ImageRect::new(0.0, 0.0, 30.0, 30.0);
        let (_, resized) = drag((300.0, 300.0), (0.0, 0.0), rect, &mapper);
        assert_close(resized, ImageRect::new(0.0, 0.0, 30.0, 30.0));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geometry::Size;
    use proptest::prelude::*;

    fn handle_strategy() -> impl Strategy<Value = Handle> {
        prop_oneof![
            Just(Handle::Move),
            Just(Handle::TopLeft),
            Just(Handle::TopRight),
            Just(Handle::BottomLeft),
            Just(Handle::BottomRight),
            Just(Handle::Top),
            Just(Handle::Bottom),
            Just(Handle::Left),
            Just(Handle::Right),
        ]
    }

    proptest! {
        /// Property: whatever the drag, the committed rectangle stays inside
        /// the image and respects the minimum size.
        #[test]
        fn prop_drag_result_in_bounds(
            (image_w, image_h) in (100u32..=5000, 100u32..=5000),
            (container_w, container_h) in (200.0f64..=1500.0, 200.0f64..=1500.0),
            (fx, fy, fw, fh) in (0.0f64..=0.5, 0.0f64..=0.5, 0.1f64..=0.5, 0.1f64..=0.5),
            handle in handle_strategy(),
            (dx, dy) in (-3000.0f64..=3000.0, -3000.0f64..=3000.0),
        ) {
            let mapper = CoordinateMapper::new(image_w, image_h, Size::new(container_w, container_h));
            let (w, h) = (image_w as f64, image_h as f64);
            let snapshot = ImageRect::new(fx * w, fy * h, (fw * w).max(40.0), (fh * h).max(40.0));

            let min = MinSize::default();
            let rect = if handle.is_move() {
                translate(&snapshot, dx, dy, &mapper)
            } else {
                resize(&snapshot, handle, dx, dy, &mapper, min)
            };

            let eps = 1e-6;
            prop_assert!(rect.x >= 0.0 && rect.y >= 0.0);
            prop_assert!(rect.right() <= w + eps, "right {} > {}", rect.right(), w);
            prop_assert!(rect.bottom() <= h + eps, "bottom {} > {}", rect.bottom(), h);
            prop_assert!(rect.width >= min.width - eps);
            prop_assert!(rect.height >= min.height - eps);
        }
    }
}
