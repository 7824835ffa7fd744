//! Image resizing for fitting oriented output into a bounding box.
//!
//! All functions return new owning buffers without modifying the input.

use log::debug;

use super::{DecodeError, FilterType};
use crate::buffer::{PixelBuffer, PixelView};
use crate::geometry::Size;

/// Resize a view to exact dimensions.
///
/// # Arguments
///
/// * `view` - The source pixels
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Interpolation filter to use
///
/// # Returns
///
/// A new `PixelBuffer` with the specified dimensions and the source's format.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target dimension is zero.
pub fn resize(
    view: &PixelView<'_>,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<PixelBuffer, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: f64::from(width),
            height: f64::from(height),
        });
    }

    // Fast path: if dimensions match, just copy
    if view.width() == width && view.height() == height {
        return Ok(view.to_buffer()?);
    }

    let source = view.to_dynamic_image()?;
    let resized = source.resize_exact(width, height, filter.to_image_filter());
    debug!(
        "Resized {}x{} -> {}x{} ({:?})",
        view.width(),
        view.height(),
        width,
        height,
        filter
    );

    Ok(PixelBuffer::from_dynamic_image(resized)?)
}

/// Resize a view to fit inside `max_size` while preserving aspect ratio.
///
/// Images that already fit are copied unchanged; nothing is upscaled.
///
/// # Arguments
///
/// * `view` - The source pixels
/// * `max_size` - Bounding box the result must fit in
/// * `filter` - Interpolation filter to use
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if `max_size` is smaller than one
/// pixel in either direction (or not a number).
pub fn resize_to_fit(
    view: &PixelView<'_>,
    max_size: Size,
    filter: FilterType,
) -> Result<PixelBuffer, DecodeError> {
    if !(max_size.width >= 1.0 && max_size.height >= 1.0) {
        return Err(DecodeError::InvalidDimensions {
            width: max_size.width,
            height: max_size.height,
        });
    }

    if view.width() == 0 || view.height() == 0 {
        return Ok(view.to_buffer()?);
    }

    let (new_width, new_height) = calculate_fit_dimensions(view.width(), view.height(), max_size);
    resize(view, new_width, new_height, filter)
}

/// Calculate dimensions to fit within `max_size` while preserving aspect ratio.
///
/// Never scales up. A zero-sized input stays zero-sized.
fn calculate_fit_dimensions(width: u32, height: u32, max_size: Size) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let (w, h) = (f64::from(width), f64::from(height));
    let scale = (max_size.width / w).min(max_size.height / h);
    if scale >= 1.0 {
        return (width, height);
    }

    let max_width = max_size.width.floor();
    let max_height = max_size.height.floor();
    let new_width = (w * scale).round().clamp(1.0, max_width) as u32;
    let new_height = (h * scale).round().clamp(1.0, max_height) as u32;
    (new_width, new_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PixelFormat;
    use crate::geometry::Rect;

    fn create_test_image(width: u32, height: u32) -> PixelBuffer {
        // Create a simple gradient image for testing
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8); // R
                pixels.push(((y * 255) / height.max(1)) as u8); // G
                pixels.push(128); // B
            }
        }
        PixelBuffer::new(width, height, PixelFormat::Rgb8, pixels).unwrap()
    }

    #[test]
    fn test_resize_basic() {
        let img = create_test_image(100, 50);
        let resized = resize(&img.view(), 50, 25, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width(), 50);
        assert_eq!(resized.height(), 25);
        assert_eq!(resized.format(), PixelFormat::Rgb8);
        assert_eq!(resized.as_bytes().len(), 50 * 25 * 3);
    }

    #[test]
    fn test_resize_same_dimensions() {
        let img = create_test_image(100, 50);
        let resized = resize(&img.view(), 100, 50, FilterType::Bilinear).unwrap();
        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = create_test_image(100, 50);

        assert!(resize(&img.view(), 0, 50, FilterType::Bilinear).is_err());
        assert!(resize(&img.view(), 50, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_resize_crop_view() {
        let img = create_test_image(100, 50);
        let crop = img.crop(Rect::new(10.0, 10.0, 40.0, 20.0)).unwrap();
        let resized = resize(&crop, 20, 10, FilterType::Nearest).unwrap();
        assert_eq!((resized.width(), resized.height()), (20, 10));
    }

    #[test]
    fn test_resize_to_fit_landscape() {
        let img = create_test_image(600, 400);
        let resized =
            resize_to_fit(&img.view(), Size::new(256.0, 256.0), FilterType::Lanczos3).unwrap();

        assert_eq!(resized.width(), 256);
        assert_eq!(resized.height(), 171); // 400 * (256/600) ≈ 171
    }

    #[test]
    fn test_resize_to_fit_portrait() {
        let img = create_test_image(400, 600);
        let resized =
            resize_to_fit(&img.view(), Size::new(256.0, 256.0), FilterType::Lanczos3).unwrap();

        assert_eq!(resized.width(), 171);
        assert_eq!(resized.height(), 256);
    }

    #[test]
    fn test_resize_to_fit_uses_tighter_side() {
        let img = create_test_image(400, 400);
        let resized =
            resize_to_fit(&img.view(), Size::new(100.0, 300.0), FilterType::Bilinear).unwrap();

        assert_eq!((resized.width(), resized.height()), (100, 100));
    }

    #[test]
    fn test_resize_to_fit_already_smaller() {
        let img = create_test_image(100, 50);
        let resized =
            resize_to_fit(&img.view(), Size::new(256.0, 256.0), FilterType::Bilinear).unwrap();

        // Should return same dimensions when already smaller
        assert_eq!(resized.width(), 100);
        assert_eq!(resized.height(), 50);
    }

    #[test]
    fn test_resize_to_fit_invalid_max_size() {
        let img = create_test_image(100, 50);
        for max in [
            Size::new(0.0, 100.0),
            Size::new(100.0, 0.5),
            Size::new(f64::NAN, 100.0),
        ] {
            assert!(matches!(
                resize_to_fit(&img.view(), max, FilterType::Bilinear),
                Err(DecodeError::InvalidDimensions { .. })
            ));
        }
    }

    #[test]
    fn test_calculate_fit_dimensions() {
        assert_eq!(
            calculate_fit_dimensions(6000, 4000, Size::new(2560.0, 2560.0)),
            (2560, 1707)
        );
        assert_eq!(
            calculate_fit_dimensions(4000, 6000, Size::new(2560.0, 2560.0)),
            (1707, 2560)
        );
        assert_eq!(
            calculate_fit_dimensions(4000, 4000, Size::new(256.0, 256.0)),
            (256, 256)
        );
        assert_eq!(
            calculate_fit_dimensions(10000, 10, Size::new(100.0, 100.0)),
            (100, 1)
        );
    }

    #[test]
    fn test_resize_to_fit_empty_image() {
        let img = PixelBuffer::new(0, 0, PixelFormat::Rgb8, vec![]).unwrap();
        let resized =
            resize_to_fit(&img.view(), Size::new(64.0, 64.0), FilterType::Bilinear).unwrap();
        assert_eq!(resized.size(), Size::ZERO);
    }

    #[test]
    fn test_calculate_fit_dimensions_zero_input() {
        assert_eq!(calculate_fit_dimensions(0, 0, Size::new(256.0, 256.0)), (0, 0));
    }

    #[test]
    fn test_all_filter_types() {
        let img = create_test_image(100, 50);

        for filter in [
            FilterType::Nearest,
            FilterType::Bilinear,
            FilterType::Lanczos3,
        ] {
            let resized = resize(&img.view(), 50, 25, filter).unwrap();
            assert_eq!(resized.width(), 50);
            assert_eq!(resized.height(), 25);
        }
    }
}
