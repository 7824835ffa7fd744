//! Closed-form rectangle orientation.
//!
//! Pushing a rectangle through a generic matrix and re-deriving the bounding
//! box is easy to get subtly wrong for the mirrored quarter turns
//! (`LeftMirrored`, `RightMirrored`), so every code has its own arm here. The
//! affine path in [`super::transform`] is checked against these in tests.

use super::{Rect, Size};
use crate::orientation::Orientation;

/// Orient a rectangle against a reference size (top-left origin).
///
/// `rect` is expressed in the frame obtained by orienting `reference_size`
/// with `orientation`; the result is in the frame of `reference_size`. With a
/// storage size as reference this turns a display-space crop rectangle into
/// storage coordinates. Use `orientation.inverse()` together with the display
/// size for the opposite direction ([`Rect::to_display`]).
///
/// The result is rounded to whole pixels after the transform, origin and
/// size independently.
///
/// # Example
///
/// ```ignore
/// // A 1200x1800 image tagged `Right` shows as 1800x1200
/// let storage = Size::new(1200.0, 1800.0);
/// let crop = Rect::new(512.0, 0.0, 1024.0, 1024.0); // display coordinates
/// let raw = orient_rect(crop, Orientation::Right, storage);
/// assert_eq!(raw, Rect::new(0.0, 264.0, 1024.0, 1024.0));
/// ```
pub fn orient_rect(rect: Rect, orientation: Orientation, reference_size: Size) -> Rect {
    let (w_ref, h_ref) = (reference_size.width, reference_size.height);
    let Rect {
        x,
        y,
        width: w,
        height: h,
    } = rect;

    let oriented = match orientation {
        Orientation::Up => rect,
        Orientation::UpMirrored => Rect::new(w_ref - w - x, y, w, h),
        Orientation::Down => Rect::new(w_ref - w - x, h_ref - h - y, w, h),
        Orientation::DownMirrored => Rect::new(x, h_ref - h - y, w, h),
        Orientation::LeftMirrored => Rect::new(y, x, h, w),
        // rotate by -90° then move down by the reference height
        Orientation::Right => Rect::new(y, h_ref - w - x, h, w),
        Orientation::RightMirrored => Rect::new(w_ref - h - y, h_ref - w - x, h, w),
        // rotate by +90° then move right by the reference width
        Orientation::Left => Rect::new(w_ref - h - y, x, h, w),
    };

    oriented.rounded()
}

impl Orientation {
    /// Storage pixel shown at display pixel `(x, y)`.
    ///
    /// `storage_width`/`storage_height` are the dimensions of the stored grid.
    /// This is [`orient_rect`] applied to a one-pixel rectangle, in integers.
    ///
    /// # Panics
    ///
    /// Expects a non-empty grid and `(x, y)` inside the display grid. Outside
    /// of that the subtractions underflow, which panics in debug builds and
    /// yields a meaningless coordinate in release builds.
    #[inline]
    pub fn storage_pixel(
        self,
        x: u32,
        y: u32,
        storage_width: u32,
        storage_height: u32,
    ) -> (u32, u32) {
        let last_x = storage_width - 1;
        let last_y = storage_height - 1;
        match self {
            Orientation::Up => (x, y),
            Orientation::UpMirrored => (last_x - x, y),
            Orientation::Down => (last_x - x, last_y - y),
            Orientation::DownMirrored => (x, last_y - y),
            Orientation::LeftMirrored => (y, x),
            Orientation::Right => (y, last_y - x),
            Orientation::RightMirrored => (last_x - y, last_y - x),
            Orientation::Left => (last_x - y, x),
        }
    }
}
