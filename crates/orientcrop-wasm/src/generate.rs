//! WASM bindings for generating orientation reference images.
//!
//! There is no filesystem in the browser, so this wraps
//! `generate_variants` and hands back the encoded files for the caller to
//! download or display.

use orientcrop_core::decode;
use orientcrop_core::generate::{self, GenerateError, GeneratorConfig, OrientedVariant};
use orientcrop_core::PixelBuffer;
use wasm_bindgen::prelude::*;

use crate::types::{to_js_error, JsPixelBuffer};

/// One generated file.
#[wasm_bindgen]
pub struct JsOrientedVariant {
    inner: OrientedVariant,
}

#[wasm_bindgen]
impl JsOrientedVariant {
    /// EXIF orientation code embedded in the file
    #[wasm_bindgen(getter)]
    pub fn orientation(&self) -> u8 {
        self.inner.orientation.exif_value()
    }

    /// Suggested file name, e.g. `oriented_image_6.jpg`
    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.inner.file_name.clone()
    }

    /// Encoded file contents. Copies.
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }
}

/// Encode an upright image once for each of the eight orientation codes.
///
/// # Arguments
///
/// * `image` - Upright pixels
/// * `config` - Optional object `{ format, max_size, quality, filter, file_stem }`;
///   every field may be omitted
///
/// # Returns
///
/// An array of `JsOrientedVariant` in EXIF order (codes 1 through 8).
///
/// # Example (TypeScript)
///
/// ```typescript
/// const variants = generate_variants(image, { format: 'png', file_stem: 'test' });
/// for (const v of variants) {
///   zip.file(v.file_name, v.bytes());
/// }
/// ```
#[wasm_bindgen]
pub fn generate_variants(image: &JsPixelBuffer, config: JsValue) -> Result<js_sys::Array, JsValue> {
    let config: GeneratorConfig = if config.is_undefined() || config.is_null() {
        GeneratorConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid generator config: {}", e)))?
    };

    let array = js_sys::Array::new();
    for variant in variants(image.buffer(), &config).map_err(to_js_error)? {
        array.push(&JsValue::from(variant));
    }
    Ok(array)
}

/// Scale `image` to the configured bounds and generate all variants.
fn variants(
    image: &PixelBuffer,
    config: &GeneratorConfig,
) -> Result<Vec<JsOrientedVariant>, GenerateError> {
    let scaled;
    let view = match config.max_size {
        Some(max_size) => {
            scaled = decode::resize_to_fit(&image.view(), max_size, config.filter)?;
            scaled.view()
        }
        None => image.view(),
    };

    let variants = generate::generate_variants(&view, config)?;
    Ok(variants
        .into_iter()
        .map(|inner| JsOrientedVariant { inner })
        .collect())
}
