//! Zero-copy cropping.
//!
//! Cropping never touches pixel data: the result is a [`PixelView`] into the
//! same memory with its offset moved to the window's first pixel and the
//! parent's stride kept. That makes a crop O(1) regardless of its size.
//!
//! # Coordinate System
//!
//! [`PixelView::crop`] takes a rectangle in the view's own storage
//! coordinates. [`crop_display_rect`] takes one in display coordinates (what
//! a viewer honoring the EXIF orientation shows) and does the mapping.
//!
//! # Example
//!
//! ```ignore
//! let decoded = decode_image(&bytes)?;
//! let view = decoded.buffer.view();
//!
//! // Crop the top-left 1024x1024 block of the *upright* picture
//! let crop = crop_display_rect(&view, decoded.orientation, Rect::new(0.0, 0.0, 1024.0, 1024.0))?;
//! let upright = materialize(&crop, decoded.orientation)?;
//! ```

use log::debug;

use super::{materialize, BufferError, PixelBuffer, PixelView};
use crate::geometry::Rect;
use crate::orientation::Orientation;

impl<'a> PixelView<'a> {
    /// Crop to `rect`, given in this view's storage coordinates.
    ///
    /// A fractional rectangle is widened to the whole pixels it touches
    /// (origin floored, far edges ceiled). The returned view borrows the same
    /// memory as `self`.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::NonFiniteRect` for NaN or infinite components and
    /// `BufferError::OutOfBounds` if the covered pixels don't lie fully inside
    /// the view. Nothing is clamped.
    pub fn crop(&self, rect: Rect) -> Result<PixelView<'a>, BufferError> {
        if !rect.is_finite() {
            return Err(BufferError::NonFiniteRect { rect });
        }

        let pixels = rect.enclosing();
        let fits = pixels.x >= 0.0
            && pixels.y >= 0.0
            && pixels.width >= 0.0
            && pixels.height >= 0.0
            && pixels.max_x() <= f64::from(self.width)
            && pixels.max_y() <= f64::from(self.height);
        if !fits {
            return Err(BufferError::OutOfBounds {
                rect,
                width: self.width,
                height: self.height,
            });
        }

        let (x, y) = (pixels.x as u32, pixels.y as u32);
        let (width, height) = (pixels.width as u32, pixels.height as u32);

        let offset = self.offset + y as usize * self.stride + x as usize * self.format.bytes_per_pixel();

        debug!(
            "Crop {}x{} at ({}, {}) of {}x{} view, offset {} -> {}",
            width, height, x, y, self.width, self.height, self.offset, offset
        );

        Ok(PixelView {
            data: self.data,
            offset,
            width,
            height,
            stride: self.stride,
            format: self.format,
        })
    }
}

/// Crop a view stored with `orientation` using a rectangle in display
/// coordinates.
///
/// The rectangle is first intersected with the display bounds (so a crop
/// hanging over the edge is trimmed to the picture) and widened to the whole
/// pixels it touches, then mapped into storage coordinates and cropped
/// without copying. The result is still in storage orientation; pass it to
/// [`materialize`] for upright pixels.
///
/// # Errors
///
/// Returns `BufferError::NonFiniteRect` for NaN or infinite components and
/// `BufferError::OutOfBounds` if the rectangle doesn't overlap the picture at
/// all.
pub fn crop_display_rect<'a>(
    view: &PixelView<'a>,
    orientation: Orientation,
    display_rect: Rect,
) -> Result<PixelView<'a>, BufferError> {
    if !display_rect.is_finite() {
        return Err(BufferError::NonFiniteRect { rect: display_rect });
    }

    let storage_size = view.size();
    let display_bounds = Rect::from_size(storage_size.oriented(orientation));

    let visible = display_rect
        .intersection(&display_bounds)
        .ok_or(BufferError::OutOfBounds {
            rect: display_rect,
            width: display_bounds.width as u32,
            height: display_bounds.height as u32,
        })?
        .enclosing();

    let storage_rect = visible.to_storage(orientation, storage_size);
    debug!(
        "{} display crop {:?} -> storage {:?}",
        orientation, visible, storage_rect
    );
    view.crop(storage_rect)
}

/// Crop with a display rectangle and return the result upright.
///
/// [`crop_display_rect`] followed by [`materialize`]; the only copy made is
/// the final one.
pub fn export_display_crop(
    view: &PixelView<'_>,
    orientation: Orientation,
    display_rect: Rect,
) -> Result<PixelBuffer, BufferError> {
    let crop = crop_display_rect(view, orientation, display_rect)?;
    materialize(&crop, orientation)
}
