//! WASM-compatible wrapper types for image data.
//!
//! These types wrap the core image types and handle the conversion between
//! Rust and JavaScript data representations.

use sheetcrop_core::decode::DecodedImage;
use sheetcrop_core::suggest::RgbaFrame;
use wasm_bindgen::prelude::*;

/// A decoded, upright photo for JavaScript.
///
/// The pixel data stays in WASM memory; `pixels()` copies it out as a
/// `Uint8Array`.
#[wasm_bindgen]
pub struct JsDecodedImage {
    inner: DecodedImage,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Wrap RGB pixel data (3 bytes per pixel, row-major order).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            inner: DecodedImage {
                width,
                height,
                pixels,
            },
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3).
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array. This copies.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer also releases it.
    pub fn free(self) {}
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(inner: DecodedImage) -> Self {
        Self { inner }
    }

    /// Borrow the core image without copying the pixels.
    pub(crate) fn decoded(&self) -> &DecodedImage {
        &self.inner
    }
}

/// A downscaled RGBA frame handed to bounds suggestion.
///
/// Hosts that downscale on their own (for example with a canvas and
/// `getImageData`) can build one directly from the RGBA bytes.
#[wasm_bindgen]
pub struct JsScanFrame {
    inner: RgbaFrame,
}

#[wasm_bindgen]
impl JsScanFrame {
    /// Wrap RGBA pixel data (4 bytes per pixel, row-major order).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsScanFrame, JsValue> {
        RgbaFrame::new(width, height, pixels)
            .map(JsScanFrame::from_frame)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Returns RGBA pixel data as Uint8Array. This copies.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }
}

impl JsScanFrame {
    pub(crate) fn from_frame(inner: RgbaFrame) -> Self {
        Self { inner }
    }

    pub(crate) fn frame(&self) -> &RgbaFrame {
        &self.inner
    }
}
