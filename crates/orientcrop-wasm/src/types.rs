//! WASM-compatible wrapper types for pixel data.
//!
//! JavaScript can't hold a Rust borrow, so everything crossing the boundary
//! owns its pixels. Crops made on the JS side are copied out of the parent
//! as soon as they are returned.

use std::fmt::Display;

use orientcrop_core::decode::{DecodedImage, FilterType};
use orientcrop_core::{Orientation, PixelBuffer, PixelFormat};
use wasm_bindgen::prelude::*;

/// An owning pixel buffer for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
///
/// The `free()` method can be called to explicitly release WASM memory, but this is
/// optional as wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    inner: PixelBuffer,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create a tightly packed buffer.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `format` - Pixel format code: 0 Gray8, 1 GrayAlpha8, 2 Rgb8, 3 Rgba8, 4 Rgba16
    /// * `pixels` - Pixel data, row-major order
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: u32,
        height: u32,
        format: u8,
        pixels: Vec<u8>,
    ) -> Result<JsPixelBuffer, JsValue> {
        let format = format_from_u8(format).map_err(to_js_error)?;
        PixelBuffer::new(width, height, format, pixels)
            .map(JsPixelBuffer::from)
            .map_err(to_js_error)
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Pixel format code
    #[wasm_bindgen(getter)]
    pub fn format(&self) -> u8 {
        format_to_u8(self.inner.format())
    }

    #[wasm_bindgen(getter)]
    pub fn stride(&self) -> usize {
        self.inner.stride()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.as_bytes().len()
    }

    /// Returns the pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.as_bytes().to_vec()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsPixelBuffer {
    pub(crate) fn buffer(&self) -> &PixelBuffer {
        &self.inner
    }
}

impl From<PixelBuffer> for JsPixelBuffer {
    fn from(inner: PixelBuffer) -> Self {
        Self { inner }
    }
}

/// A decoded image: stored pixels plus the EXIF orientation code.
#[wasm_bindgen]
pub struct JsDecodedImage {
    image: PixelBuffer,
    orientation: Orientation,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Pixels as stored in the file. Copies.
    #[wasm_bindgen(getter)]
    pub fn image(&self) -> JsPixelBuffer {
        JsPixelBuffer::from(self.image.clone())
    }

    /// EXIF orientation code (1-8)
    #[wasm_bindgen(getter)]
    pub fn orientation(&self) -> u8 {
        self.orientation.exif_value()
    }

    /// Width as shown after applying the orientation
    #[wasm_bindgen(getter)]
    pub fn display_width(&self) -> u32 {
        if self.orientation.swaps_dimensions() {
            self.image.height()
        } else {
            self.image.width()
        }
    }

    /// Height as shown after applying the orientation
    #[wasm_bindgen(getter)]
    pub fn display_height(&self) -> u32 {
        if self.orientation.swaps_dimensions() {
            self.image.width()
        } else {
            self.image.height()
        }
    }
}

impl From<DecodedImage> for JsDecodedImage {
    fn from(decoded: DecodedImage) -> Self {
        Self {
            image: decoded.buffer,
            orientation: decoded.orientation,
        }
    }
}

/// Pixel format code used across the JS boundary.
///
/// Values:
/// - 0 = Gray8
/// - 1 = GrayAlpha8
/// - 2 = Rgb8
/// - 3 = Rgba8
/// - 4 = Rgba16
pub(crate) fn format_to_u8(format: PixelFormat) -> u8 {
    match format {
        PixelFormat::Gray8 => 0,
        PixelFormat::GrayAlpha8 => 1,
        PixelFormat::Rgb8 => 2,
        PixelFormat::Rgba8 => 3,
        PixelFormat::Rgba16 => 4,
    }
}

pub(crate) fn format_from_u8(value: u8) -> Result<PixelFormat, String> {
    match value {
        0 => Ok(PixelFormat::Gray8),
        1 => Ok(PixelFormat::GrayAlpha8),
        2 => Ok(PixelFormat::Rgb8),
        3 => Ok(PixelFormat::Rgba8),
        4 => Ok(PixelFormat::Rgba16),
        other => Err(format!("Unknown pixel format code: {}", other)),
    }
}

/// Convert a u8 filter type value to the core FilterType enum.
///
/// Values:
/// - 0 = Nearest (fastest, lowest quality)
/// - 1 = Bilinear (good balance of speed and quality)
/// - 2 = Lanczos3 (best quality, slowest)
///
/// Any other value defaults to Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear, // Default
    }
}

pub(crate) fn orientation_from_u8(value: u8) -> Result<Orientation, String> {
    Orientation::from_exif(value).map_err(|e| e.to_string())
}

pub(crate) fn to_js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
