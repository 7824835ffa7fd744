//! Image encoding WASM bindings.
//!
//! Pixels are written as given and tagged with an EXIF orientation code, so
//! a sideways crop can be saved without rotating it first.
//!
//! # Example
//!
//! ```typescript
//! import { crop_display_rect, encode_image } from '@orientcrop/wasm';
//!
//! const crop = crop_display_rect(decoded.image, decoded.orientation, 0, 0, 800, 600);
//! const jpeg = encode_image(crop, decoded.orientation, 'jpeg', 0.9);
//! ```

use orientcrop_core::encode::{self, EncodeOptions, ImageFormat};
use wasm_bindgen::prelude::*;

use crate::types::{orientation_from_u8, to_js_error, JsPixelBuffer};

/// Encode an image tagged with an EXIF orientation code.
///
/// # Arguments
///
/// * `image` - Pixels in storage orientation
/// * `orientation` - EXIF orientation code to embed (1-8)
/// * `format` - `"jpeg"` (or `"jpg"`) or `"png"`
/// * `quality` - JPEG quality in `0.0..=1.0`, default 0.9; ignored for PNG
///
/// # Returns
///
/// The encoded file as a `Uint8Array`.
///
/// # Errors
///
/// Returns an error if the orientation code or format is unknown, or the
/// encoder fails.
#[wasm_bindgen]
pub fn encode_image(
    image: &JsPixelBuffer,
    orientation: u8,
    format: &str,
    quality: Option<f32>,
) -> Result<Vec<u8>, JsValue> {
    let orientation = orientation_from_u8(orientation).map_err(to_js_error)?;
    let options = EncodeOptions {
        format: parse_format(format).map_err(to_js_error)?,
        quality,
    };
    encode::encode_image(&image.buffer().view(), orientation, &options).map_err(to_js_error)
}

/// MIME type for a format name, e.g. for a `Blob`.
#[wasm_bindgen]
pub fn mime_type(format: &str) -> Result<String, JsValue> {
    parse_format(format)
        .map(|f| f.mime_type().to_string())
        .map_err(to_js_error)
}

fn parse_format(name: &str) -> Result<ImageFormat, String> {
    match name.to_ascii_lowercase().as_str() {
        "jpeg" | "jpg" => Ok(ImageFormat::Jpeg),
        "png" => Ok(ImageFormat::Png),
        other => Err(format!("Unsupported output format: {}", other)),
    }
}
