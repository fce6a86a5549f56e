//! Crop session WASM bindings.
//!
//! `JsCropSession` wraps the core `CropSession`. Rectangles, frames and
//! configuration cross the boundary as plain objects through
//! `serde_wasm_bindgen`; pointer events are plain numbers.
//!
//! # Example
//!
//! ```typescript
//! const session = new JsCropSession({ handleSize: 40 }, uri, photo.width, photo.height, 360, 480);
//! session.on_change((rect, frame) => redraw(frame));
//!
//! const generation = session.load_image(uri, photo.width, photo.height);
//! // ...later, possibly from a worker
//! session.apply_suggestion(generation, rectOrNull);
//!
//! box.onpointerdown = (e) => session.touch_start(e.offsetX, e.offsetY);
//! ```

use std::collections::HashMap;

use sheetcrop_core::config::CropConfig;
use sheetcrop_core::geometry::{ImageDescriptor, ImageRect, ScreenPoint, Size};
use sheetcrop_core::session::{CropSession, SuggestionOutcome};
use sheetcrop_core::store::SubscriptionId;
use wasm_bindgen::prelude::*;

use crate::types::{JsDecodedImage, JsScanFrame};

/// Interactive crop box state for one photo in one container.
#[wasm_bindgen]
pub struct JsCropSession {
    inner: CropSession,
    subscriptions: HashMap<u32, SubscriptionId>,
    next_subscription: u32,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Create a session. `config` may be `undefined` for the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        config: JsValue,
        locator: String,
        image_width: u32,
        image_height: u32,
        container_width: f64,
        container_height: f64,
    ) -> Result<JsCropSession, JsValue> {
        let config = parse_config(config)?;
        Self::with_config(
            config,
            ImageDescriptor::new(locator, image_width, image_height),
            Size::new(container_width, container_height),
        )
        .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// The container was resized.
    pub fn set_container(&mut self, width: f64, height: f64) {
        self.inner.set_container(Size::new(width, height));
    }

    /// Show a new photo. Returns the generation to pass back with its
    /// suggestion.
    pub fn load_image(&mut self, locator: String, width: u32, height: u32) -> f64 {
        let request = self
            .inner
            .load_image(ImageDescriptor::new(locator, width, height));
        request.generation as f64
    }

    /// Current image generation.
    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> f64 {
        self.inner.generation() as f64
    }

    /// Seed the box from a suggestion computed elsewhere. `rect` is an
    /// `{x, y, width, height}` object in image pixels, or `null`.
    ///
    /// Returns `"applied"`, `"fallback"`, `"stale"` or `"superseded"`.
    /// A generation that is not a non-negative whole number is an error.
    pub fn apply_suggestion(&mut self, generation: f64, rect: JsValue) -> Result<String, JsValue> {
        let generation = parse_generation(generation)
            .ok_or_else(|| JsValue::from_str(&format!("Invalid generation: {}", generation)))?;
        let rect: Option<ImageRect> = if rect.is_null() || rect.is_undefined() {
            None
        } else {
            let rect = serde_wasm_bindgen::from_value(rect)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            Some(rect)
        };
        let outcome = SuggestionOutcome {
            generation,
            rect,
        };
        Ok(self.inner.apply_suggestion(outcome).as_str().to_string())
    }

    /// Run the configured strategy over a scan frame and apply the result.
    pub fn suggest(&mut self, frame: &JsScanFrame) -> String {
        self.inner.suggest_now(frame.frame()).as_str().to_string()
    }

    /// Downscale `photo`, run the configured strategy and apply the result.
    pub fn suggest_photo(&mut self, photo: &JsDecodedImage) -> String {
        let config = self.inner.config();
        let outcome = self.inner.suggestion_request().run_decoded(
            config.suggester.strategy(),
            photo.decoded(),
            config.scan_width,
        );
        self.inner.apply_suggestion(outcome).as_str().to_string()
    }

    /// Begin a gesture. Returns the grabbed handle id (`"tl"`, `"move"`, ...).
    pub fn touch_start(&mut self, x: f64, y: f64) -> String {
        self.inner
            .touch_start(ScreenPoint::new(x, y))
            .id()
            .to_string()
    }

    /// Continue a gesture. Returns the committed rectangle, or `undefined`
    /// when no gesture is active.
    pub fn touch_move(&mut self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        match self.inner.touch_move(ScreenPoint::new(x, y)) {
            Some(rect) => to_js(&rect),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    pub fn touch_end(&mut self) -> bool {
        self.inner.touch_end()
    }

    pub fn touch_cancel(&mut self) -> bool {
        self.inner.touch_cancel()
    }

    #[wasm_bindgen(getter)]
    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }

    /// Fit, box outline and handle zones for drawing.
    pub fn frame(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.frame())
    }

    /// Current rectangle in image pixels.
    pub fn rect(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.rect())
    }

    /// `"guessed"` or `"userAdjusted"`.
    #[wasm_bindgen(getter)]
    pub fn provenance(&self) -> String {
        self.inner.provenance().as_str().to_string()
    }

    /// Rectangle for export: whole pixels, inside the image.
    pub fn crop_rect(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.crop_rect())
    }

    /// Call `callback(rect, frame)` after every committed change, with the
    /// rectangle in image pixels and the same render frame `frame()` returns.
    /// Returns an id for `off_change`.
    ///
    /// The callback runs while the session is still busy with the change, so
    /// calling back into the session from it throws. Draw from `frame`.
    pub fn on_change(&mut self, callback: js_sys::Function) -> u32 {
        let id = self.inner.subscribe(move |rect, frame| {
            match (to_js(rect), to_js(frame)) {
                (Ok(rect), Ok(frame)) => {
                    if let Err(e) = callback.call2(&JsValue::NULL, &rect, &frame) {
                        log::warn!("crop change listener threw: {:?}", e);
                    }
                }
                (Err(e), _) | (_, Err(e)) => {
                    log::warn!("failed to serialize crop change: {:?}", e)
                }
            }
        });
        self.track(id)
    }

    /// Remove a listener added with `on_change`.
    pub fn off_change(&mut self, id: u32) -> bool {
        match self.subscriptions.remove(&id) {
            Some(subscription) => self.inner.unsubscribe(subscription),
            None => false,
        }
    }
}

impl JsCropSession {
    pub(crate) fn with_config(
        config: CropConfig,
        image: ImageDescriptor,
        container: Size,
    ) -> Result<Self, sheetcrop_core::ConfigError> {
        Ok(Self {
            inner: CropSession::new(config, image, container)?,
            subscriptions: HashMap::new(),
            next_subscription: 0,
        })
    }

    fn track(&mut self, subscription: SubscriptionId) -> u32 {
        let id = self.next_subscription;
        self.next_subscription = self.next_subscription.wrapping_add(1);
        self.subscriptions.insert(id, subscription);
        id
    }
}

fn parse_config(value: JsValue) -> Result<CropConfig, JsValue> {
    if value.is_null() || value.is_undefined() {
        return Ok(CropConfig::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Generations are whole, non-negative counters; anything else from JS is
/// rejected rather than truncated.
fn parse_generation(value: f64) -> Option<u64> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value < u64::MAX as f64 {
        Some(value as u64)
    } else {
        None
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetcrop_core::suggest::RgbaFrame;

    fn session() -> JsCropSession {
        JsCropSession::with_config(
            CropConfig::default(),
            ImageDescriptor::new("page.jpg", 1000, 1000),
            Size::new(1000.0, 1000.0),
        )
        .unwrap()
    }

    #[test]
    fn test_touch_start_reports_handle() {
        let mut session = session();
        // Default region is (100, 250, 800, 500)
        assert_eq!(session.touch_start(100.0, 250.0), "tl");
        assert!(session.touch_end());
        assert_eq!(session.touch_start(500.0, 500.0), "move");
        assert!(session.is_dragging());
        assert!(session.touch_cancel());
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_load_image_bumps_generation() {
        let mut session = session();
        assert_eq!(session.generation(), 0.0);
        assert_eq!(session.load_image("next.jpg".to_string(), 640, 480), 1.0);
        assert_eq!(session.generation(), 1.0);
    }

    #[test]
    fn test_suggest_on_blank_frame_falls_back() {
        let mut session = session();
        let frame = RgbaFrame::new(8, 8, vec![255; 8 * 8 * 4]).unwrap();
        let status = session.suggest(&JsScanFrame::from_frame(frame));
        assert_eq!(status, "fallback");
        assert_eq!(session.provenance(), "guessed");
    }

    #[test]
    fn test_suggest_photo_finds_ink() {
        let mut session = session();
        let mut pixels = vec![255u8; 1000 * 1000 * 3];
        for y in 300..700 {
            for x in 200..800 {
                let i = (y * 1000 + x) * 3;
                pixels[i..i + 3].copy_from_slice(&[0, 0, 0]);
            }
        }
        let photo = JsDecodedImage::new(1000, 1000, pixels);
        assert_eq!(session.suggest_photo(&photo), "applied");
    }

    #[test]
    fn test_parse_generation() {
        assert_eq!(parse_generation(0.0), Some(0));
        assert_eq!(parse_generation(7.0), Some(7));
        assert_eq!(parse_generation(f64::NAN), None);
        assert_eq!(parse_generation(-1.0), None);
        assert_eq!(parse_generation(f64::INFINITY), None);
        assert_eq!(parse_generation(1.5), None);
    }

    #[test]
    fn test_suggest_photo_after_tap_is_superseded() {
        let mut session = session();
        session.touch_start(500.0, 500.0);
        session.touch_end();
        let photo = JsDecodedImage::new(1000, 1000, vec![0; 1000 * 1000 * 3]);
        assert_eq!(session.suggest_photo(&photo), "superseded");
    }

    #[test]
    fn test_off_change_unknown_id() {
        let mut session = session();
        assert!(!session.off_change(7));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = CropConfig::default();
        config.handle_size = -1.0;
        let result = JsCropSession::with_config(
            config,
            ImageDescriptor::new("x", 10, 10),
            Size::new(10.0, 10.0),
        );
        assert!(result.is_err());
    }
}
