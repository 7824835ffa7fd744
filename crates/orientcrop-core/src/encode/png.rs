//! PNG encoding with an `eXIf` chunk.

use log::debug;
use png::chunk::ChunkType;
use png::{BitDepth, ColorType};

use super::{metadata, EncodeError, ImageFormat};
use crate::buffer::{PixelFormat, PixelView};
use crate::orientation::Orientation;

const EXIF_CHUNK: ChunkType = ChunkType(*b"eXIf");

/// Encode a view as PNG and tag it with `orientation`.
///
/// Every pixel format maps onto a PNG color type without conversion;
/// `Rgba16` samples are written big endian as PNG requires.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for an empty view and
/// `EncodeError::EncodingFailed` if the codec fails.
pub fn encode_png(view: &PixelView<'_>, orientation: Orientation) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (view.width(), view.height());
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let (color, depth) = match view.format() {
        PixelFormat::Gray8 => (ColorType::Grayscale, BitDepth::Eight),
        PixelFormat::GrayAlpha8 => (ColorType::GrayscaleAlpha, BitDepth::Eight),
        PixelFormat::Rgb8 => (ColorType::Rgb, BitDepth::Eight),
        PixelFormat::Rgba8 => (ColorType::Rgba, BitDepth::Eight),
        PixelFormat::Rgba16 => (ColorType::Rgba, BitDepth::Sixteen),
    };

    let mut data = view.to_buffer()?.into_bytes();
    if view.format() == PixelFormat::Rgba16 {
        for sample in data.chunks_exact_mut(2) {
            let value = u16::from_ne_bytes([sample[0], sample[1]]);
            sample.copy_from_slice(&value.to_be_bytes());
        }
    }

    let block = metadata::orientation_block(orientation)?;
    let failed = |e: png::EncodingError| EncodeError::EncodingFailed {
        format: ImageFormat::Png,
        message: e.to_string(),
    };

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(depth);

        let mut writer = encoder.write_header().map_err(failed)?;
        // eXIf has to precede IDAT
        writer.write_chunk(EXIF_CHUNK, &block).map_err(failed)?;
        writer.write_image_data(&data).map_err(failed)?;
        writer.finish().map_err(failed)?;
    }

    debug!(
        "Encoded {}x{} PNG ({:?}, {:?}): {} bytes",
        width,
        height,
        color,
        depth,
        out.len()
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PixelBuffer;
    use crate::geometry::Rect;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_png_basic() {
        let buffer = PixelBuffer::new(3, 2, PixelFormat::Rgb8, vec![10u8; 18]).unwrap();
        let bytes = encode_png(&buffer.view(), Orientation::Up).unwrap();

        assert_eq!(&bytes[..8], &PNG_MAGIC);
        assert!(bytes.windows(4).any(|w| w == b"eXIf"));
        assert!(bytes.ends_with(&[0xAE, 0x42, 0x60, 0x82])); // IEND CRC
    }

    #[test]
    fn test_exif_chunk_before_image_data() {
        let buffer = PixelBuffer::new(2, 2, PixelFormat::Gray8, vec![1, 2, 3, 4]).unwrap();
        let bytes = encode_png(&buffer.view(), Orientation::Left).unwrap();

        let exif = bytes.windows(4).position(|w| w == b"eXIf").unwrap();
        let idat = bytes.windows(4).position(|w| w == b"IDAT").unwrap();
        assert!(exif < idat);
    }

    #[test]
    fn test_png_is_lossless() {
        let data: Vec<u8> = (0..4 * 3 * 4).map(|v| (v * 5) as u8).collect();
        let buffer = PixelBuffer::new(4, 3, PixelFormat::Rgba8, data).unwrap();
        let bytes = encode_png(&buffer.view(), Orientation::Down).unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap().into_rgba8();
        assert_eq!(decoded.into_raw(), buffer.as_bytes());
    }

    #[test]
    fn test_png_sixteen_bit_byte_order() {
        let samples: [u16; 4] = [0x0102, 0x0304, 0x0506, 0xFFFF];
        let data: Vec<u8> = samples.iter().flat_map(|s| s.to_ne_bytes()).collect();
        let buffer = PixelBuffer::new(1, 1, PixelFormat::Rgba16, data).unwrap();
        let bytes = encode_png(&buffer.view(), Orientation::Up).unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap().into_rgba16();
        assert_eq!(decoded.get_pixel(0, 0).0, samples);
    }

    #[test]
    fn test_png_of_crop() {
        let data: Vec<u8> = (0..16).collect();
        let buffer = PixelBuffer::new(4, 4, PixelFormat::Gray8, data).unwrap();
        let crop = buffer.crop(Rect::new(2.0, 1.0, 2.0, 3.0)).unwrap();
        let bytes = encode_png(&crop, Orientation::Up).unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap().into_luma8();
        assert_eq!(decoded.dimensions(), (2, 3));
        assert_eq!(decoded.into_raw(), vec![6, 7, 10, 11, 14, 15]);
    }

    #[test]
    fn test_encode_png_empty() {
        let buffer = PixelBuffer::new(5, 0, PixelFormat::Gray8, vec![]).unwrap();
        assert!(matches!(
            encode_png(&buffer.view(), Orientation::Up),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }
}
