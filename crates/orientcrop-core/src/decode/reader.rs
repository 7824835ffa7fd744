//! Image decoding with EXIF orientation reporting.
//!
//! Unlike a viewer, the decoder never rotates anything on its own: pixels come
//! back exactly as stored and the orientation tag is reported next to them.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{ImageError, ImageReader};
use log::{debug, warn};

use super::{DecodeError, DecodedImage};
use crate::buffer::PixelBuffer;
use crate::orientation::Orientation;

/// Decode an image (JPEG or PNG) from bytes, keeping storage orientation.
///
/// # Arguments
///
/// * `bytes` - Raw file bytes
///
/// # Returns
///
/// A `DecodedImage` with the stored pixels and the EXIF orientation.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format is not recognized.
/// Returns `DecodeError::CorruptedFile` if the file is damaged.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = read_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let img = reader.decode().map_err(|e| match e {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    })?;

    let buffer = PixelBuffer::from_dynamic_image(img)?;
    debug!(
        "Decoded {}x{} {:?}, orientation {}",
        buffer.width(),
        buffer.height(),
        buffer.format(),
        orientation
    );

    Ok(DecodedImage {
        buffer,
        orientation,
    })
}

/// Decode an image and return its pixels in display orientation.
///
/// Use this for consumers that ignore the orientation tag.
///
/// # Errors
///
/// Same as [`decode_image`], plus `DecodeError::Buffer` if the reoriented
/// copy can't be allocated.
pub fn decode_image_upright(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    Ok(decode_image(bytes)?.into_upright()?)
}

/// Read the EXIF orientation of an encoded image.
///
/// Returns `Orientation::Up` if there is no EXIF data or no orientation tag.
/// A tag outside 1-8 is logged and also treated as `Up`.
pub fn read_orientation(bytes: &[u8]) -> Orientation {
    let parsed = match png_exif_chunk(bytes) {
        Some(tiff) => Reader::new().read_raw(tiff.to_vec()),
        None => Reader::new().read_from_container(&mut Cursor::new(bytes)),
    };
    let Ok(exif) = parsed else {
        return Orientation::Up;
    };

    let Some(value) = exif
        .get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
    else {
        return Orientation::Up;
    };

    Orientation::try_from(value).unwrap_or_else(|err| {
        warn!("{err}, treating as Up");
        Orientation::Up
    })
}

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Payload of the `eXIf` chunk of a PNG file, if any.
///
/// Walks the chunk list up to `IDAT`; the chunk is only valid before the
/// image data.
fn png_exif_chunk(bytes: &[u8]) -> Option<&[u8]> {
    let mut rest = bytes.strip_prefix(&PNG_SIGNATURE[..])?;
    while rest.len() >= 12 {
        let len = u32::from_be_bytes([rest[0], rest[1], rest[2], rest[3]]) as usize;
        let kind = &rest[4..8];
        let data = rest.get(8..8usize.checked_add(len)?)?;
        match kind {
            b"eXIf" => return Some(data),
            b"IDAT" | b"IEND" => return None,
            _ => {}
        }
        // skip data and CRC
        rest = rest.get(12 + len..)?;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PixelFormat;
    use crate::encode::{encode_image, EncodeOptions, ImageFormat};

    /// 3x2 RGB image with distinct, JPEG-friendly colors per column.
    fn sample_buffer() -> PixelBuffer {
        let data = vec![
            255, 0, 0, 0, 255, 0, 0, 0, 255, //
            255, 0, 0, 0, 255, 0, 0, 0, 255,
        ];
        PixelBuffer::new(3, 2, PixelFormat::Rgb8, data).unwrap()
    }

    fn plain_jpeg(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 100, 50]));
        let mut bytes = Vec::new();
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, 90)
            .encode_image(&img)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_plain_jpeg() {
        let bytes = plain_jpeg(16, 8);
        let decoded = decode_image(&bytes).unwrap();

        assert_eq!(decoded.buffer.width(), 16);
        assert_eq!(decoded.buffer.height(), 8);
        assert_eq!(decoded.buffer.format(), PixelFormat::Rgb8);
        assert_eq!(decoded.orientation, Orientation::Up);
    }

    #[test]
    fn test_decode_keeps_storage_orientation() {
        let buffer = sample_buffer();
        let options = EncodeOptions {
            format: ImageFormat::Png,
            quality: None,
        };
        let bytes = encode_image(&buffer.view(), Orientation::Right, &options).unwrap();

        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.buffer, buffer);
        assert_eq!(decoded.display_size(), crate::geometry::Size::new(2.0, 3.0));
    }

    #[test]
    fn test_read_orientation_from_jpeg() {
        let buffer = sample_buffer();
        for orientation in Orientation::ALL {
            let bytes =
                encode_image(&buffer.view(), orientation, &EncodeOptions::default()).unwrap();
            assert_eq!(read_orientation(&bytes), orientation);
        }
    }

    #[test]
    fn test_read_orientation_from_png() {
        let buffer = sample_buffer();
        let options = EncodeOptions {
            format: ImageFormat::Png,
            quality: None,
        };
        let bytes = encode_image(&buffer.view(), Orientation::RightMirrored, &options).unwrap();
        assert!(png_exif_chunk(&bytes).is_some());
        assert_eq!(read_orientation(&bytes), Orientation::RightMirrored);
    }

    #[test]
    fn test_png_exif_chunk_rejects_truncated_file() {
        let buffer = sample_buffer();
        let options = EncodeOptions {
            format: ImageFormat::Png,
            quality: None,
        };
        let bytes = encode_image(&buffer.view(), Orientation::Down, &options).unwrap();
        assert_eq!(png_exif_chunk(&bytes[..20]), None);
        assert_eq!(png_exif_chunk(b"not a png"), None);
    }

    #[test]
    fn test_read_orientation_without_exif() {
        assert_eq!(read_orientation(&plain_jpeg(4, 4)), Orientation::Up);
        assert_eq!(read_orientation(&[]), Orientation::Up);
    }

    #[test]
    fn test_decode_upright_applies_orientation() {
        let buffer = sample_buffer();
        let options = EncodeOptions {
            format: ImageFormat::Png,
            quality: None,
        };
        let bytes = encode_image(&buffer.view(), Orientation::Left, &options).unwrap();

        let upright = decode_image_upright(&bytes).unwrap();
        assert_eq!((upright.width(), upright.height()), (2, 3));
        // Left: display row 0 is the last storage column, top to bottom
        assert_eq!(upright.view().pixel(0, 0), &[0, 0, 255]);
        assert_eq!(upright.view().pixel(0, 2), &[255, 0, 0]);
    }

    #[test]
    fn test_decode_invalid_data() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(
            result,
            Err(DecodeError::InvalidFormat) | Err(DecodeError::CorruptedFile(_))
        ));
    }

    #[test]
    fn test_decode_empty_data() {
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_jpeg() {
        let bytes = plain_jpeg(32, 32);
        let truncated = &bytes[..bytes.len() / 2];
        assert!(decode_image(truncated).is_err());
    }
}
