//! Core types for image decoding.

use image::{DynamicImage, ImageBuffer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::{materialize, BufferError, PixelBuffer, PixelFormat, PixelView};
use crate::geometry::Size;
use crate::orientation::Orientation;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// A requested output size is unusable.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    /// I/O error during file reading.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Pixel data could not be laid out or allocated.
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

impl From<std::io::Error> for DecodeError {
    fn from(err: std::io::Error) -> Self {
        DecodeError::IoError(err.to_string())
    }
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    #[default]
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// A decoded image: pixels exactly as stored plus the orientation tag.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    /// Pixels in storage orientation.
    pub buffer: PixelBuffer,
    /// EXIF orientation read from the file (`Up` when absent).
    pub orientation: Orientation,
}

impl DecodedImage {
    /// Intrinsic size of the stored pixel grid.
    pub fn storage_size(&self) -> Size {
        self.buffer.size()
    }

    /// Size as shown by a viewer honoring the orientation.
    pub fn display_size(&self) -> Size {
        self.buffer.size().oriented(self.orientation)
    }

    /// Physically apply the orientation, yielding upright pixels.
    pub fn into_upright(self) -> Result<PixelBuffer, BufferError> {
        if self.orientation.is_identity() {
            return Ok(self.buffer);
        }
        materialize(&self.buffer.view(), self.orientation)
    }
}

impl PixelBuffer {
    /// Take over the pixels of a decoded `image` crate image.
    ///
    /// 8-bit gray, gray+alpha, RGB and RGBA are kept as they are, other
    /// 16-bit layouts become `Rgba16` and float layouts become `Rgba8`.
    pub fn from_dynamic_image(img: DynamicImage) -> Result<Self, BufferError> {
        let (width, height) = (img.width(), img.height());
        match img {
            DynamicImage::ImageLuma8(buf) => {
                PixelBuffer::new(width, height, PixelFormat::Gray8, buf.into_raw())
            }
            DynamicImage::ImageLumaA8(buf) => {
                PixelBuffer::new(width, height, PixelFormat::GrayAlpha8, buf.into_raw())
            }
            DynamicImage::ImageRgb8(buf) => {
                PixelBuffer::new(width, height, PixelFormat::Rgb8, buf.into_raw())
            }
            DynamicImage::ImageRgba8(buf) => {
                PixelBuffer::new(width, height, PixelFormat::Rgba8, buf.into_raw())
            }
            DynamicImage::ImageLuma16(_)
            | DynamicImage::ImageLumaA16(_)
            | DynamicImage::ImageRgb16(_)
            | DynamicImage::ImageRgba16(_) => {
                let data = img
                    .into_rgba16()
                    .into_raw()
                    .into_iter()
                    .flat_map(u16::to_ne_bytes)
                    .collect();
                PixelBuffer::new(width, height, PixelFormat::Rgba16, data)
            }
            other => PixelBuffer::new(
                width,
                height,
                PixelFormat::Rgba8,
                other.into_rgba8().into_raw(),
            ),
        }
    }
}

impl PixelView<'_> {
    /// Copy the window into an `image` crate image of the matching layout.
    pub fn to_dynamic_image(&self) -> Result<DynamicImage, BufferError> {
        let packed = self.to_buffer()?;
        let (width, height) = (packed.width(), packed.height());
        let (stride, format) = (packed.stride(), packed.format());
        let bytes = packed.into_bytes();
        let len = bytes.len();

        let img = match format {
            PixelFormat::Gray8 => {
                ImageBuffer::from_raw(width, height, bytes).map(DynamicImage::ImageLuma8)
            }
            PixelFormat::GrayAlpha8 => {
                ImageBuffer::from_raw(width, height, bytes).map(DynamicImage::ImageLumaA8)
            }
            PixelFormat::Rgb8 => {
                ImageBuffer::from_raw(width, height, bytes).map(DynamicImage::ImageRgb8)
            }
            PixelFormat::Rgba8 => {
                ImageBuffer::from_raw(width, height, bytes).map(DynamicImage::ImageRgba8)
            }
            PixelFormat::Rgba16 => {
                let samples: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_ne_bytes([pair[0], pair[1]]))
                    .collect();
                ImageBuffer::from_raw(width, height, samples).map(DynamicImage::ImageRgba16)
            }
        };

        img.ok_or(BufferError::InvalidLayout {
            width,
            height,
            stride,
            len,
        })
    }
}
