//! JPEG encoding with an embedded orientation tag.
//!
//! Pixels go through the `image` crate's JPEG encoder; the EXIF block is then
//! spliced in as an APP1 segment right after SOI (or after the JFIF APP0
//! segment when the encoder wrote one).

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};
use log::debug;

use super::{metadata, EncodeError, ImageFormat};
use crate::buffer::PixelView;
use crate::orientation::Orientation;

const SOI: [u8; 2] = [0xFF, 0xD8];
const APP0: [u8; 2] = [0xFF, 0xE0];
const APP1: [u8; 2] = [0xFF, 0xE1];
const EXIF_HEADER: &[u8; 6] = b"Exif\0\0";

/// Encode a view as JPEG and tag it with `orientation`.
///
/// # Arguments
///
/// * `view` - Pixels in storage orientation
/// * `orientation` - EXIF orientation to embed
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// Gray images are written as grayscale; sources with alpha or 16-bit
/// samples are flattened to 8-bit RGB (alpha is dropped).
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for an empty view and
/// `EncodeError::EncodingFailed` if the codec fails.
pub fn encode_jpeg(
    view: &PixelView<'_>,
    orientation: Orientation,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (view.width(), view.height());
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let (pixels, color) = match view.to_dynamic_image()? {
        DynamicImage::ImageLuma8(gray) => (gray.into_raw(), ExtendedColorType::L8),
        DynamicImage::ImageRgb8(rgb) => (rgb.into_raw(), ExtendedColorType::Rgb8),
        other => (other.to_rgb8().into_raw(), ExtendedColorType::Rgb8),
    };

    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, quality.clamp(1, 100))
        .write_image(&pixels, width, height, color)
        .map_err(|e| EncodeError::EncodingFailed {
            format: ImageFormat::Jpeg,
            message: e.to_string(),
        })?;

    let block = metadata::orientation_block(orientation)?;
    let tagged = insert_exif_segment(&encoded, &block)?;
    debug!(
        "Encoded {}x{} JPEG at quality {}: {} bytes",
        width,
        height,
        quality,
        tagged.len()
    );
    Ok(tagged)
}

/// Splice an APP1 EXIF segment into an encoded JPEG.
fn insert_exif_segment(jpeg: &[u8], block: &[u8]) -> Result<Vec<u8>, EncodeError> {
    if !jpeg.starts_with(&SOI) {
        return Err(EncodeError::EncodingFailed {
            format: ImageFormat::Jpeg,
            message: "missing SOI marker".to_string(),
        });
    }

    // Keep JFIF's APP0 first if present
    let mut insert_at = SOI.len();
    if jpeg[insert_at..].starts_with(&APP0) {
        let len_bytes = jpeg
            .get(insert_at + 2..insert_at + 4)
            .ok_or_else(|| EncodeError::EncodingFailed {
                format: ImageFormat::Jpeg,
                message: "truncated APP0 segment".to_string(),
            })?;
        insert_at += 2 + usize::from(u16::from_be_bytes([len_bytes[0], len_bytes[1]]));
    }
    let insert_at = insert_at.min(jpeg.len());

    // The length field counts itself but not the marker
    let segment_len = u16::try_from(2 + EXIF_HEADER.len() + block.len())
        .map_err(|_| EncodeError::Exif(format!("EXIF block too large ({} bytes)", block.len())))?;

    let mut out = Vec::with_capacity(jpeg.len() + 4 + EXIF_HEADER.len() + block.len());
    out.extend_from_slice(&jpeg[..insert_at]);
    out.extend_from_slice(&APP1);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(EXIF_HEADER);
    out.extend_from_slice(block);
    out.extend_from_slice(&jpeg[insert_at..]);
    Ok(out)
}
