//! Luminance helpers for the content-scanning strategies.
//!
//! Ink detection uses the ITU-R BT.601 luma weights with a fixed threshold
//! of 200.

/// ITU-R BT.601 coefficient for red channel.
pub const LUMA_R: f32 = 0.299;

/// ITU-R BT.601 coefficient for green channel.
pub const LUMA_G: f32 = 0.587;

/// ITU-R BT.601 coefficient for blue channel.
pub const LUMA_B: f32 = 0.114;

/// Default "ink" threshold: pixels darker than this count as content.
pub const INK_THRESHOLD: f32 = 200.0;

/// BT.601 luma of an 8-bit RGB triple, in 0.0..=255.0.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> f32 {
    LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32
}

/// Unweighted channel mean of an 8-bit RGB triple, in 0.0..=255.0.
#[inline]
pub fn brightness(r: u8, g: u8, b: u8) -> f32 {
    (r as f32 + g as f32 + b as f32) / 3.0
}
