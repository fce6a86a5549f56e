//! Sheetcrop WASM - WebAssembly bindings for the crop engine
//!
//! This crate exposes `sheetcrop-core` to JavaScript/TypeScript hosts.
//!
//! # Module Structure
//!
//! - `session` - the interactive crop box (`JsCropSession`)
//! - `decode` - photo decoding and scan-frame downscaling
//! - `export` - cropping and JPEG export
//! - `types` - WASM-compatible wrapper types for image data
//! - `logger` - `log` records forwarded to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_photo, JsCropSession } from '@sheetcrop/wasm';
//!
//! await init();
//!
//! const photo = decode_photo(new Uint8Array(await file.arrayBuffer()));
//! const session = new JsCropSession(undefined, file.name, photo.width, photo.height, 360, 480);
//! session.suggest_photo(photo);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod export;
mod logger;
mod session;
mod types;

pub use decode::{decode_photo, read_orientation, scan_frame};
pub use export::{crop_image, export_jpeg};
pub use logger::set_log_level;
pub use session::JsCropSession;
pub use types::{JsDecodedImage, JsScanFrame};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install();
    log::debug!("sheetcrop-wasm {} ready", env!("CARGO_PKG_VERSION"));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
