//! WASM bindings for display-space cropping and materialization.
//!
//! The core crops are zero-copy views; a view can't outlive a call into
//! WASM, so every function here returns an owning [`JsPixelBuffer`].

use orientcrop_core::buffer;
use orientcrop_core::Rect;
use wasm_bindgen::prelude::*;

use crate::types::{orientation_from_u8, to_js_error, JsPixelBuffer};

/// Crop an image using a rectangle drawn on its upright presentation.
///
/// The returned pixels stay in storage orientation, so the result carries
/// the same orientation code as the source.
///
/// # Arguments
///
/// * `image` - Stored pixels
/// * `orientation` - EXIF orientation code of `image` (1-8)
/// * `x`, `y`, `width`, `height` - Crop rectangle in display pixels
///
/// # Errors
///
/// Returns an error if the orientation code is invalid, a coordinate is
/// NaN or infinite, or the rectangle misses the picture entirely.
///
/// # Example (TypeScript)
///
/// ```typescript
/// // Top half of a sideways phone photo, still stored sideways
/// const half = crop_display_rect(image, 6, 0, 0, displayWidth, displayHeight / 2);
/// ```
#[wasm_bindgen]
pub fn crop_display_rect(
    image: &JsPixelBuffer,
    orientation: u8,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Result<JsPixelBuffer, JsValue> {
    let orientation = orientation_from_u8(orientation).map_err(to_js_error)?;
    let view = image.buffer().view();
    let crop = buffer::crop_display_rect(&view, orientation, Rect::new(x, y, width, height))
        .map_err(to_js_error)?;
    crop.to_buffer().map(JsPixelBuffer::from).map_err(to_js_error)
}

/// Rewrite stored pixels into their upright arrangement.
///
/// The result should be treated as orientation 1.
#[wasm_bindgen]
pub fn materialize(image: &JsPixelBuffer, orientation: u8) -> Result<JsPixelBuffer, JsValue> {
    let orientation = orientation_from_u8(orientation).map_err(to_js_error)?;
    buffer::materialize(&image.buffer().view(), orientation)
        .map(JsPixelBuffer::from)
        .map_err(to_js_error)
}

/// Crop with a display rectangle and return upright pixels.
///
/// Equivalent to `materialize(crop_display_rect(...), orientation)` with a
/// single copy.
#[wasm_bindgen]
pub fn export_display_crop(
    image: &JsPixelBuffer,
    orientation: u8,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Result<JsPixelBuffer, JsValue> {
    let orientation = orientation_from_u8(orientation).map_err(to_js_error)?;
    buffer::export_display_crop(
        &image.buffer().view(),
        orientation,
        Rect::new(x, y, width, height),
    )
    .map(JsPixelBuffer::from)
    .map_err(to_js_error)
}
