//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode JPEG/PNG bytes, keeping storage orientation
//! - [`decode_image_upright`] - Decode and apply the orientation tag
//! - [`read_orientation`] - Read just the EXIF orientation code
//! - [`resize_to_fit`] - Shrink an image to fit a bounding box
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, export_display_crop } from '@orientcrop/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const decoded = decode_image(bytes);
//! console.log(`Shown as ${decoded.display_width}x${decoded.display_height}`);
//! const crop = export_display_crop(decoded.image, decoded.orientation, 0, 0, 512, 512);
//! ```

use orientcrop_core::decode;
use orientcrop_core::Size;
use wasm_bindgen::prelude::*;

use crate::types::{filter_from_u8, to_js_error, JsDecodedImage, JsPixelBuffer};

/// Decode a JPEG or PNG image from bytes.
///
/// Pixels are returned exactly as stored; the EXIF orientation code is
/// reported alongside (1 when the file has none).
///
/// # Errors
///
/// Returns an error if:
/// - The format isn't recognized
/// - The file is corrupted or truncated
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from)
        .map_err(to_js_error)
}

/// Decode an image and rewrite its pixels upright.
#[wasm_bindgen]
pub fn decode_image_upright(bytes: &[u8]) -> Result<JsPixelBuffer, JsValue> {
    decode::decode_image_upright(bytes)
        .map(JsPixelBuffer::from)
        .map_err(to_js_error)
}

/// EXIF orientation code (1-8) of an encoded image, without decoding pixels.
///
/// Missing or invalid tags read as 1.
#[wasm_bindgen]
pub fn read_orientation(bytes: &[u8]) -> u8 {
    decode::read_orientation(bytes).exif_value()
}

/// Resize an image to fit within a bounding box, preserving aspect ratio.
///
/// # Arguments
///
/// * `image` - Source pixels
/// * `max_width` - Maximum width in pixels
/// * `max_height` - Maximum height in pixels
/// * `filter` - 0 = Nearest, 1 = Bilinear, 2 = Lanczos3
///
/// # Example
///
/// ```typescript
/// const preview = resize_to_fit(image, 2560, 2560, 2);
/// ```
#[wasm_bindgen]
pub fn resize_to_fit(
    image: &JsPixelBuffer,
    max_width: f64,
    max_height: f64,
    filter: u8,
) -> Result<JsPixelBuffer, JsValue> {
    decode::resize_to_fit(
        &image.buffer().view(),
        Size::new(max_width, max_height),
        filter_from_u8(filter),
    )
    .map(JsPixelBuffer::from)
    .map_err(to_js_error)
}
