//! OrientCrop WASM - WebAssembly bindings for OrientCrop
//!
//! This crate exposes orientcrop-core to JavaScript/TypeScript so a browser
//! can crop phone photos by what the user sees, without rotating the stored
//! pixels first.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for pixel data
//! - `geometry` - Orientation sizes, rectangle mapping and transforms
//! - `crop` - Display-space crops and materialization
//! - `decode` - JPEG/PNG decoding and resizing
//! - `encode` - JPEG/PNG encoding with an EXIF orientation tag
//! - `generate` - Reference images for all eight orientation codes
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, export_display_crop, encode_image } from '@orientcrop/wasm';
//!
//! await init();
//!
//! const decoded = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const crop = export_display_crop(decoded.image, decoded.orientation, 100, 100, 640, 480);
//! const jpeg = encode_image(crop, 1, 'jpeg', 0.9);
//! ```

use wasm_bindgen::prelude::*;

mod crop;
mod decode;
mod encode;
mod generate;
mod geometry;
mod logger;
mod types;

// Re-export public types
pub use crop::{crop_display_rect, export_display_crop, materialize};
pub use decode::{decode_image, decode_image_upright, read_orientation, resize_to_fit};
pub use encode::{encode_image, mime_type};
pub use generate::{generate_variants, JsOrientedVariant};
pub use geometry::{
    display_rect_to_storage, orient_rect_js, orientation_transform, oriented_size,
    storage_rect_to_display,
};
pub use types::{JsDecodedImage, JsPixelBuffer};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::init(log::LevelFilter::Warn);
}

/// Change how much the core crate logs to the console.
///
/// Accepts `"off"`, `"error"`, `"warn"`, `"info"`, `"debug"` or `"trace"`.
#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    logger::init(logger::parse_level(level));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
