//! Image encoding with embedded EXIF orientation.
//!
//! This module provides functionality for:
//! - Encoding images to JPEG with configurable quality
//! - Encoding images to PNG
//! - Tagging either with an EXIF orientation code, so the stored pixels can
//!   stay as they are and viewers rotate on display
//!
//! # Examples
//!
//! ```ignore
//! use orientcrop_core::encode::{encode_image, EncodeOptions, ImageFormat};
//!
//! // Stored sideways, shown upright by any viewer that honors EXIF
//! let bytes = encode_image(&buffer.view(), Orientation::Right, &EncodeOptions::default())?;
//! ```

mod jpeg;
mod metadata;
mod png;
mod types;

use crate::buffer::PixelView;
use crate::orientation::Orientation;

pub use self::jpeg::encode_jpeg;
pub use self::png::encode_png;
pub use types::{EncodeError, EncodeOptions, ImageFormat, DEFAULT_QUALITY};

/// Encode a view in the format chosen by `options`, tagged with
/// `orientation`.
///
/// # Arguments
///
/// * `view` - Pixels in storage orientation
/// * `orientation` - EXIF orientation to embed
/// * `options` - Output format and quality
///
/// # Errors
///
/// See [`encode_jpeg`] and [`encode_png`].
pub fn encode_image(
    view: &PixelView<'_>,
    orientation: Orientation,
    options: &EncodeOptions,
) -> Result<Vec<u8>, EncodeError> {
    match options.format {
        ImageFormat::Jpeg => encode_jpeg(view, orientation, options.jpeg_quality()),
        ImageFormat::Png => encode_png(view, orientation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{PixelBuffer, PixelFormat};
    use crate::decode::{decode_image, read_orientation};

    fn noise(width: u32, height: u32) -> PixelBuffer {
        let mut state = 0x1234_5678u32;
        let data = (0..width * height * 3)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state >> 24) as u8
            })
            .collect();
        PixelBuffer::new(width, height, PixelFormat::Rgb8, data).unwrap()
    }

    #[test]
    fn test_roundtrip_preserves_orientation() {
        let buffer = noise(6, 4);
        for format in [ImageFormat::Jpeg, ImageFormat::Png] {
            for orientation in Orientation::ALL {
                let bytes =
                    encode_image(&buffer.view(), orientation, &EncodeOptions::new(format)).unwrap();
                let decoded = decode_image(&bytes).unwrap();

                assert_eq!(decoded.orientation, orientation, "{format} {orientation}");
                assert_eq!(decoded.storage_size(), buffer.size());
            }
        }
    }

    #[test]
    fn test_quality_affects_jpeg_size() {
        let buffer = noise(64, 64);
        let low = EncodeOptions {
            format: ImageFormat::Jpeg,
            quality: Some(0.1),
        };
        let high = EncodeOptions {
            format: ImageFormat::Jpeg,
            quality: Some(1.0),
        };

        let low_bytes = encode_image(&buffer.view(), Orientation::Up, &low).unwrap();
        let high_bytes = encode_image(&buffer.view(), Orientation::Up, &high).unwrap();
        assert!(high_bytes.len() > low_bytes.len());
    }

    #[test]
    fn test_png_ignores_quality() {
        let buffer = noise(8, 8);
        let a = EncodeOptions {
            format: ImageFormat::Png,
            quality: Some(0.1),
        };
        let b = EncodeOptions::new(ImageFormat::Png);

        assert_eq!(
            encode_image(&buffer.view(), Orientation::Right, &a).unwrap(),
            encode_image(&buffer.view(), Orientation::Right, &b).unwrap()
        );
    }

    #[test]
    fn test_up_is_still_tagged() {
        let buffer = noise(4, 4);
        let bytes = encode_image(&buffer.view(), Orientation::Up, &EncodeOptions::default()).unwrap();
        assert!(bytes.windows(6).any(|w| w == b"Exif\0\0"));
        assert_eq!(read_orientation(&bytes), Orientation::Up);
    }
}
