//! WASM bindings for orientation geometry.
//!
//! Everything here is pure coordinate math; no pixels are touched. Rectangles
//! come back as `{ x, y, width, height }` objects and sizes as
//! `{ width, height }`.
//!
//! # Example
//!
//! ```typescript
//! // A 1200x1800 photo tagged 6 (Right) is shown as 1800x1200
//! const shown = oriented_size(1200, 1800, 6);
//!
//! // Map a crop drawn on the upright preview back to stored pixels
//! const raw = display_rect_to_storage(512, 0, 1024, 1024, 6, 1200, 1800);
//! ```

use orientcrop_core::{orient_rect, AffineTransform, Origin, Rect, Size};
use wasm_bindgen::prelude::*;

use crate::types::{orientation_from_u8, to_js_error};

/// Size of a `width` x `height` image after applying an orientation code.
#[wasm_bindgen]
pub fn oriented_size(width: f64, height: f64, orientation: u8) -> Result<JsValue, JsValue> {
    let orientation = orientation_from_u8(orientation).map_err(to_js_error)?;
    let size = Size::new(width, height).oriented(orientation);
    serde_wasm_bindgen::to_value(&size).map_err(to_js_error)
}

/// Orient a rectangle against a reference size.
///
/// `(x, y, width, height)` is in the frame obtained by orienting
/// `(reference_width, reference_height)` with `orientation`; the result is in
/// the reference frame. Rounded to whole pixels.
///
/// # Errors
///
/// Returns an error if `orientation` is not 1-8.
#[wasm_bindgen(js_name = orient_rect)]
pub fn orient_rect_js(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    orientation: u8,
    reference_width: f64,
    reference_height: f64,
) -> Result<JsValue, JsValue> {
    let orientation = orientation_from_u8(orientation).map_err(to_js_error)?;
    let rect = orient_rect(
        Rect::new(x, y, width, height),
        orientation,
        Size::new(reference_width, reference_height),
    );
    serde_wasm_bindgen::to_value(&rect).map_err(to_js_error)
}

/// Map a rectangle drawn on the upright (display) image to stored pixels.
#[wasm_bindgen]
pub fn display_rect_to_storage(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    orientation: u8,
    storage_width: f64,
    storage_height: f64,
) -> Result<JsValue, JsValue> {
    let orientation = orientation_from_u8(orientation).map_err(to_js_error)?;
    let rect = Rect::new(x, y, width, height)
        .to_storage(orientation, Size::new(storage_width, storage_height));
    serde_wasm_bindgen::to_value(&rect).map_err(to_js_error)
}

/// Map a rectangle in stored pixels to the upright (display) image.
#[wasm_bindgen]
pub fn storage_rect_to_display(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    orientation: u8,
    storage_width: f64,
    storage_height: f64,
) -> Result<JsValue, JsValue> {
    let orientation = orientation_from_u8(orientation).map_err(to_js_error)?;
    let rect = Rect::new(x, y, width, height)
        .to_display(orientation, Size::new(storage_width, storage_height));
    serde_wasm_bindgen::to_value(&rect).map_err(to_js_error)
}

/// Storage-to-display affine transform as `[a, b, c, d, tx, ty]`.
///
/// Same layout as `DOMMatrix`/canvas `setTransform`. Pass `bottom_left` for
/// a y-up coordinate system.
#[wasm_bindgen]
pub fn orientation_transform(
    orientation: u8,
    storage_width: f64,
    storage_height: f64,
    bottom_left: bool,
) -> Result<Vec<f64>, JsValue> {
    let orientation = orientation_from_u8(orientation).map_err(to_js_error)?;
    let transform = orientation.transform(
        Size::new(storage_width, storage_height),
        origin_from_flag(bottom_left),
    );
    Ok(transform_to_vec(&transform))
}

pub(crate) fn origin_from_flag(bottom_left: bool) -> Origin {
    if bottom_left {
        Origin::BottomLeft
    } else {
        Origin::TopLeft
    }
}

fn transform_to_vec(t: &AffineTransform) -> Vec<f64> {
    vec![t.a, t.b, t.c, t.d, t.tx, t.ty]
}

#[cfg(test)]
mod tests {
    use super::*;
    use orientcrop_core::Orientation;

    #[test]
    fn test_transform_layout() {
        // Right, top-left: (x, y) -> (H - y, x)
        let t = Orientation::Right.transform(Size::new(40.0, 30.0), Origin::TopLeft);
        let v = transform_to_vec(&t);
        assert_eq!(v.len(), 6);

        let (x, y) = (5.0, 7.0);
        let mapped = (v[0] * x + v[2] * y + v[4], v[1] * x + v[3] * y + v[5]);
        assert_eq!(mapped, (23.0, 5.0));
    }

    #[test]
    fn test_orientation_transform_identity() {
        let v = orientation_transform(1, 10.0, 20.0, false).unwrap();
        assert_eq!(v, vec![1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_origin_from_flag() {
        assert_eq!(origin_from_flag(false), Origin::TopLeft);
        assert_eq!(origin_from_flag(true), Origin::BottomLeft);
    }
}
