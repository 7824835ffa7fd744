//! OrientCrop Core - EXIF orientation geometry and zero-copy cropping
//!
//! Cameras usually store pixels the way the sensor read them and record an
//! EXIF orientation code telling viewers how to turn the picture upright.
//! This crate keeps the stored pixels untouched and works in coordinates
//! instead:
//!
//! - [`orientation`]: the eight EXIF codes and their rotation/mirror data
//! - [`geometry`]: sizes, rectangles, affine transforms for both origin
//!   conventions, and the closed-form rectangle mapping
//! - [`buffer`]: owning pixel buffers, borrowed views, zero-copy crops and
//!   materialization into upright pixels
//! - [`decode`] / [`encode`]: JPEG and PNG codecs that report or embed the
//!   orientation tag rather than applying it
//! - [`generate`]: reference images for all eight codes

pub mod buffer;
pub mod decode;
pub mod encode;
pub mod generate;
pub mod geometry;
pub mod orientation;

pub use buffer::{
    crop_display_rect, export_display_crop, materialize, BufferError, PixelBuffer, PixelFormat,
    PixelView,
};
pub use geometry::{orient_rect, AffineTransform, Origin, Point, Rect, Size};
pub use orientation::{InvalidOrientation, Orientation};

#[cfg(test)]
mod tests {
    use super::*;

    /// Crop the top half of a picture shown upright, starting from its
    /// sideways storage.
    #[test]
    fn test_display_crop_pipeline() {
        // 2x3 storage tagged Right shows as 3x2:
        //   storage    display
        //   0 1        4 2 0
        //   2 3        5 3 1
        //   4 5
        let data = (0..6).collect();
        let buffer = PixelBuffer::new(2, 3, PixelFormat::Gray8, data).unwrap();
        let orientation = Orientation::Right;

        let display = buffer.size().oriented(orientation);
        assert_eq!(display, Size::new(3.0, 2.0));

        let top_row = Rect::new(0.0, 0.0, 3.0, 1.0);
        let storage_rect = top_row.to_storage(orientation, buffer.size());
        assert_eq!(storage_rect, Rect::new(0.0, 0.0, 1.0, 3.0));

        let crop = crop_display_rect(&buffer.view(), orientation, top_row).unwrap();
        assert_eq!((crop.width(), crop.height()), (1, 3));

        let upright = materialize(&crop, orientation).unwrap();
        assert_eq!(upright.as_bytes(), &[4, 2, 0]);
    }
}
