//! Physically reorder pixels into display orientation.
//!
//! Only needed when the consumer ignores the orientation tag (or the tag is
//! about to be reset to `Up`). Everything else should keep the stored pixels
//! and transform coordinates instead.

use log::debug;

use super::{BufferError, PixelBuffer, PixelView};
use crate::orientation::Orientation;

/// Copy `view` into a new buffer laid out upright.
///
/// The output has the oriented dimensions (width and height swapped for the
/// quarter-turn codes) and is tightly packed. Each output pixel is read from
/// the storage pixel given by [`Orientation::storage_pixel`].
///
/// # Errors
///
/// Returns `BufferError::Allocation` if the output can't be allocated.
pub fn materialize(view: &PixelView<'_>, orientation: Orientation) -> Result<PixelBuffer, BufferError> {
    if orientation.is_identity() {
        return view.to_buffer();
    }

    let (src_w, src_h) = (view.width(), view.height());
    let (dst_w, dst_h) = if orientation.swaps_dimensions() {
        (src_h, src_w)
    } else {
        (src_w, src_h)
    };

    let mut output = PixelBuffer::zeroed(dst_w, dst_h, view.format())?;
    debug!(
        "Materialize {} {}x{} -> {}x{}",
        orientation, src_w, src_h, dst_w, dst_h
    );

    let bpp = view.format().bytes_per_pixel();
    for y in 0..dst_h {
        let row = output.row_mut(y);
        for (x, dst) in (0..dst_w).zip(row.chunks_exact_mut(bpp)) {
            let (sx, sy) = orientation.storage_pixel(x, y, src_w, src_h);
            dst.copy_from_slice(view.pixel(sx, sy));
        }
    }

    Ok(output)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::buffer::PixelFormat;
    use crate::geometry::Rect;
    use proptest::prelude::*;

    fn numbered(width: u32, height: u32) -> PixelBuffer {
        let data = (0..width * height * 2)
            .map(|v| (v % 251) as u8)
            .collect();
        PixelBuffer::new(width, height, PixelFormat::GrayAlpha8, data).unwrap()
    }

    proptest! {
        /// Property: every display pixel shows the storage pixel the rectangle
        /// mapping points at.
        #[test]
        fn prop_pixels_follow_rect_mapping(
            o in prop::sample::select(Orientation::ALL.to_vec()),
            width in 1u32..=12,
            height in 1u32..=12,
        ) {
            let buffer = numbered(width, height);
            let upright = materialize(&buffer.view(), o).unwrap();
            let view = upright.view();

            for y in 0..upright.height() {
                for x in 0..upright.width() {
                    let unit = Rect::new(f64::from(x), f64::from(y), 1.0, 1.0);
                    let raw = unit.to_storage(o, buffer.size());
                    let expected = buffer.view().pixel(raw.x as u32, raw.y as u32);
                    prop_assert_eq!(view.pixel(x, y), expected);
                }
            }
        }

        /// Property: output dimensions follow the oriented size.
        #[test]
        fn prop_dimensions(
            o in prop::sample::select(Orientation::ALL.to_vec()),
            width in 0u32..=40,
            height in 0u32..=40,
        ) {
            let buffer = numbered(width, height);
            let upright = materialize(&buffer.view(), o).unwrap();
            prop_assert_eq!(upright.size(), buffer.size().oriented(o));
        }
    }
}
