//! Photo decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_photo, scan_frame } from '@sheetcrop/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const photo = decode_photo(bytes);
//! const frame = scan_frame(photo, 256);
//! ```

use crate::types::{JsDecodedImage, JsScanFrame};
use sheetcrop_core::decode;
use wasm_bindgen::prelude::*;

/// Decode JPEG or PNG bytes into an upright RGB image.
///
/// EXIF orientation is applied, so `width`/`height` are what the user sees
/// and what crop rectangles are measured against.
#[wasm_bindgen]
pub fn decode_photo(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_photo(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// EXIF orientation tag value (1-8) of the photo bytes; 1 when absent.
#[wasm_bindgen]
pub fn read_orientation(bytes: &[u8]) -> u8 {
    decode::read_orientation(bytes) as u8
}

/// Downscale `image` to `width` pixels wide as an RGBA scan frame.
#[wasm_bindgen]
pub fn scan_frame(image: &JsDecodedImage, width: u32) -> Result<JsScanFrame, JsValue> {
    decode::scan_frame(image.decoded(), width)
        .map(JsScanFrame::from_frame)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
