//! Crop export WASM bindings.
//!
//! Rectangles here are whole image pixels, as returned by
//! `JsCropSession.cropRect()`.

use crate::types::JsDecodedImage;
use sheetcrop_core::export::{self, DEFAULT_JPEG_QUALITY};
use sheetcrop_core::geometry::PixelRect;
use wasm_bindgen::prelude::*;

/// Copy a pixel region out of `image`. The region is clamped to the image.
#[wasm_bindgen]
pub fn crop_image(
    image: &JsDecodedImage,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<JsDecodedImage, JsValue> {
    let rect = PixelRect {
        x,
        y,
        width,
        height,
    };
    export::crop_image(image.decoded(), rect)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Crop `image` and encode the region as JPEG.
///
/// `quality` is 1-100 and defaults to 80.
#[wasm_bindgen]
pub fn export_jpeg(
    image: &JsDecodedImage,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    quality: Option<u8>,
) -> Result<Vec<u8>, JsValue> {
    let rect = PixelRect {
        x,
        y,
        width,
        height,
    };
    export::export_jpeg(
        image.decoded(),
        rect,
        quality.unwrap_or(DEFAULT_JPEG_QUALITY),
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))
}
