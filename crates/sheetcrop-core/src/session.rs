//! A crop session: the engine wired together for one host view.
//!
//! [`CropSession`] owns the [`RectangleStore`], the [`DragController`] and
//! the current [`CoordinateMapper`], and is the only thing a host needs to
//! talk to. Pointer events and container resizes go in; render frames and
//! change notifications come out.
//!
//! Suggestions run outside the session so they never block pointer events:
//!
//! 1. [`CropSession::load_image`] bumps the generation, seeds the default
//!    region and returns a [`SuggestionRequest`].
//! 2. The host runs the request wherever it likes, producing a
//!    [`SuggestionOutcome`].
//! 3. [`CropSession::apply_suggestion`] accepts the outcome only if it still
//!    belongs to the current image and no gesture has started on it since
//!    the image was loaded, even a tap that moved nothing.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, CropConfig};
use crate::decode::{scan_frame, DecodedImage};
use crate::drag::{DragController, MinSize};
use crate::export::clamp_to_image;
use crate::fit::{CoordinateMapper, Fit};
use crate::geometry::{ImageDescriptor, ImageRect, PixelRect, ScreenPoint, ScreenRect, Size};
use crate::handles::{Handle, HandleSet};
use crate::store::{Provenance, RectangleStore, SubscriptionId};
use crate::suggest::{BoundsSuggester, RgbaFrame};

/// Work order for one suggestion pass over one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    /// Image generation the result must match to be applied.
    pub generation: u64,
    pub image: ImageDescriptor,
}

impl SuggestionRequest {
    /// Run `suggester` over `frame`. Strategy errors become "no suggestion".
    pub fn run(&self, suggester: &dyn BoundsSuggester, frame: &RgbaFrame) -> SuggestionOutcome {
        let rect = match suggester.suggest(frame, self.image.width, self.image.height) {
            Ok(rect) => rect,
            Err(e) => {
                log::warn!(
                    "{} suggestion failed for {}: {}",
                    suggester.name(),
                    self.image.locator,
                    e
                );
                None
            }
        };
        SuggestionOutcome {
            generation: self.generation,
            rect,
        }
    }

    /// Downscale `image` to a `scan_width` frame, then [`run`](Self::run).
    pub fn run_decoded(
        &self,
        suggester: &dyn BoundsSuggester,
        image: &DecodedImage,
        scan_width: u32,
    ) -> SuggestionOutcome {
        match scan_frame(image, scan_width) {
            Ok(frame) => self.run(suggester, &frame),
            Err(e) => {
                log::warn!("scan frame failed for {}: {}", self.image.locator, e);
                self.no_suggestion()
            }
        }
    }

    /// Outcome for a pass that could not run at all.
    pub fn no_suggestion(&self) -> SuggestionOutcome {
        SuggestionOutcome {
            generation: self.generation,
            rect: None,
        }
    }
}

/// Result of a suggestion pass, tagged with the generation it ran for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuggestionOutcome {
    pub generation: u64,
    /// Proposed rectangle in image space, `None` for "no suggestion".
    pub rect: Option<ImageRect>,
}

/// What [`CropSession::apply_suggestion`] did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SuggestionStatus {
    /// The suggested rectangle now seeds the crop box.
    Applied,
    /// No suggestion; the default region seeds the crop box.
    Fallback,
    /// The outcome belongs to an earlier image and was discarded.
    Stale,
    /// A gesture already started on this image; the outcome was discarded.
    Superseded,
}

impl SuggestionStatus {
    /// Name used by hosts, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            SuggestionStatus::Applied => "applied",
            SuggestionStatus::Fallback => "fallback",
            SuggestionStatus::Stale => "stale",
            SuggestionStatus::Superseded => "superseded",
        }
    }

    /// Returns true if the crop box was (re)seeded.
    pub fn seeded(self) -> bool {
        matches!(self, SuggestionStatus::Applied | SuggestionStatus::Fallback)
    }
}

/// Everything needed to draw the crop box for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropFrame {
    /// Placement of the image in the container.
    pub fit: Fit,
    /// The crop box in screen space.
    pub bounds: ScreenRect,
    pub handles: HandleSet,
}

impl CropFrame {
    /// Lay out `rect` for drawing through `mapper`.
    pub fn layout(mapper: &CoordinateMapper, rect: &ImageRect, handle_size: f64) -> Self {
        let handles = HandleSet::layout(mapper.rect_to_screen(rect), handle_size);
        CropFrame {
            fit: mapper.fit(),
            bounds: handles.bounds,
            handles,
        }
    }
}

/// Crop engine state for one image shown in one container.
#[derive(Debug)]
pub struct CropSession {
    config: CropConfig,
    image: ImageDescriptor,
    container: Size,
    /// Shared with change listeners so they can lay out each new rectangle.
    mapper: Rc<Cell<CoordinateMapper>>,
    store: RectangleStore,
    drag: DragController,
    generation: u64,
    /// A gesture started on the current image.
    interacted: bool,
}

impl CropSession {
    /// Create a session showing `image` in `container`, seeded with the
    /// configured default region.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`CropConfig::validate`].
    pub fn new(
        config: CropConfig,
        image: ImageDescriptor,
        container: Size,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let min_size = MinSize {
            width: config.min_width,
            height: config.min_height,
        };
        let drag = DragController::new(config.handle_size, min_size);
        let store = RectangleStore::new(default_rect(&config, &image, min_size));
        let mapper = Rc::new(Cell::new(CoordinateMapper::new(
            image.width,
            image.height,
            container,
        )));

        Ok(Self {
            config,
            image,
            container,
            mapper,
            store,
            drag,
            generation: 0,
            interacted: false,
        })
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    pub fn image(&self) -> &ImageDescriptor {
        &self.image
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn mapper(&self) -> CoordinateMapper {
        self.mapper.get()
    }

    /// The container was resized: recompute the fit.
    ///
    /// An active drag is cancelled; its origin belongs to the old layout.
    pub fn set_container(&mut self, container: Size) {
        if self.drag.touch_cancel() {
            log::debug!("container resized mid-drag; gesture cancelled");
        }
        self.container = container;
        self.mapper
            .set(CoordinateMapper::new(self.image.width, self.image.height, container));
    }

    /// Show a new image in the same container.
    ///
    /// Any in-flight suggestion becomes stale, an active drag is cancelled,
    /// and the crop box restarts from the default region as a guess.
    pub fn load_image(&mut self, image: ImageDescriptor) -> SuggestionRequest {
        self.generation += 1;
        self.drag.touch_cancel();
        self.interacted = false;

        self.mapper
            .set(CoordinateMapper::new(image.width, image.height, self.container));
        self.image = image;
        self.store.reset(self.default_rect());

        log::debug!(
            "loaded {} ({}x{}), generation {}",
            self.image.locator,
            self.image.width,
            self.image.height,
            self.generation
        );
        self.suggestion_request()
    }

    /// A request for the image currently shown.
    pub fn suggestion_request(&self) -> SuggestionRequest {
        SuggestionRequest {
            generation: self.generation,
            image: self.image.clone(),
        }
    }

    /// Seed the crop box from a finished suggestion pass, if it is still wanted.
    ///
    /// # Arguments
    ///
    /// * `outcome` - Result of running a [`SuggestionRequest`]
    ///
    /// # Returns
    ///
    /// [`SuggestionStatus::Stale`] if `outcome` belongs to an earlier image,
    /// [`SuggestionStatus::Superseded`] once any gesture has started on this
    /// image, otherwise `Applied` or `Fallback` depending on whether the
    /// outcome carried a usable rectangle.
    pub fn apply_suggestion(&mut self, outcome: SuggestionOutcome) -> SuggestionStatus {
        if outcome.generation != self.generation {
            log::debug!(
                "discarding suggestion for generation {} (current {})",
                outcome.generation,
                self.generation
            );
            return SuggestionStatus::Stale;
        }
        if self.interacted || self.store.is_user_adjusted() {
            log::debug!("discarding suggestion; user already touched the crop box");
            return SuggestionStatus::Superseded;
        }

        let (image_w, image_h) = self.image.extent();
        let suggested = outcome
            .rect
            .map(|rect| self.drag.min_size().enforce(rect, image_w, image_h))
            .filter(ImageRect::has_area);

        match suggested {
            Some(rect) => {
                self.store.seed(rect);
                SuggestionStatus::Applied
            }
            None => {
                log::info!("no suggestion for {}; using default region", self.image.locator);
                self.store.seed(self.default_rect());
                SuggestionStatus::Fallback
            }
        }
    }

    /// Run the configured strategy over `frame` right away and apply it.
    pub fn suggest_now(&mut self, frame: &RgbaFrame) -> SuggestionStatus {
        let outcome = self
            .suggestion_request()
            .run(self.config.suggester.strategy(), frame);
        self.apply_suggestion(outcome)
    }

    pub fn touch_start(&mut self, point: ScreenPoint) -> Handle {
        self.interacted = true;
        self.drag.touch_start(point, &self.mapper.get(), &self.store)
    }

    pub fn touch_move(&mut self, point: ScreenPoint) -> Option<ImageRect> {
        self.drag
            .touch_move(point, &self.mapper.get(), &mut self.store)
    }

    pub fn touch_end(&mut self) -> bool {
        self.drag.touch_end()
    }

    pub fn touch_cancel(&mut self) -> bool {
        self.drag.touch_cancel()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Render data for the current rectangle.
    pub fn frame(&self) -> CropFrame {
        CropFrame::layout(&self.mapper.get(), &self.store.rect(), self.config.handle_size)
    }

    /// Current rectangle in image space.
    pub fn rect(&self) -> ImageRect {
        self.store.rect()
    }

    pub fn provenance(&self) -> Provenance {
        self.store.provenance()
    }

    /// The rectangle to export: rounded to whole pixels, inside the image.
    pub fn crop_rect(&self) -> PixelRect {
        clamp_to_image(
            self.store.rect().to_pixel_rect(),
            self.image.width,
            self.image.height,
        )
    }

    /// Call `listener` with the new rectangle and its render frame after
    /// every committed change.
    ///
    /// Listeners run in the middle of the mutating call, so they should draw
    /// from their arguments instead of reading the session back.
    pub fn subscribe<F>(&mut self, mut listener: F) -> SubscriptionId
    where
        F: FnMut(&ImageRect, &CropFrame) + 'static,
    {
        let mapper = Rc::clone(&self.mapper);
        let handle_size = self.config.handle_size;
        self.store.subscribe(move |rect| {
            let frame = CropFrame::layout(&mapper.get(), rect, handle_size);
            listener(rect, &frame);
        })
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    fn default_rect(&self) -> ImageRect {
        default_rect(&self.config, &self.image, self.drag.min_size())
    }
}

fn default_rect(config: &CropConfig, image: &ImageDescriptor, min_size: MinSize) -> ImageRect {
    let (image_w, image_h) = image.extent();
    let region = config.default_region.rect_for(image.width, image.height);
    min_size.enforce(region, image_w, image_h)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
