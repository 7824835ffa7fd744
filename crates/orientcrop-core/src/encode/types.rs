//! Output formats, options and errors for encoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::BufferError;

/// Quality used when none is given.
pub const DEFAULT_QUALITY: f32 = 0.9;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The EXIF block could not be built or doesn't fit in its container
    #[error("EXIF metadata error: {0}")]
    Exif(String),

    /// The codec failed
    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: ImageFormat,
        message: String,
    },

    /// Pixel data could not be copied out of the view
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// Container format for encoded output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Jpeg,
    Png,
}

impl ImageFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageFormat::Jpeg => write!(f, "JPEG"),
            ImageFormat::Png => write!(f, "PNG"),
        }
    }
}

/// Options for [`encode_image`](super::encode_image).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    pub format: ImageFormat,
    /// Lossy quality in `0.0..=1.0`; `None` means [`DEFAULT_QUALITY`].
    /// Ignored for PNG.
    pub quality: Option<f32>,
}

impl EncodeOptions {
    /// Options for the given format with default quality.
    pub fn new(format: ImageFormat) -> Self {
        Self {
            format,
            quality: None,
        }
    }

    /// JPEG quality on the encoder's 1-100 scale.
    ///
    /// Out-of-range values are clamped; NaN falls back to the default.
    pub fn jpeg_quality(&self) -> u8 {
        let quality = match self.quality {
            Some(q) if !q.is_nan() => q.clamp(0.0, 1.0),
            _ => DEFAULT_QUALITY,
        };
        ((quality * 100.0).round() as u8).clamp(1, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jpeg_quality_mapping() {
        let mut options = EncodeOptions::default();
        assert_eq!(options.jpeg_quality(), 90);

        options.quality = Some(1.0);
        assert_eq!(options.jpeg_quality(), 100);

        options.quality = Some(0.0);
        assert_eq!(options.jpeg_quality(), 1);

        options.quality = Some(0.76);
        assert_eq!(options.jpeg_quality(), 76);
    }

    #[test]
    fn test_jpeg_quality_clamping() {
        let mut options = EncodeOptions::default();
        options.quality = Some(7.0);
        assert_eq!(options.jpeg_quality(), 100);

        options.quality = Some(-1.0);
        assert_eq!(options.jpeg_quality(), 1);

        options.quality = Some(f32::NAN);
        assert_eq!(options.jpeg_quality(), 90);
    }

    #[test]
    fn test_format_names() {
        assert_eq!(ImageFormat::Jpeg.extension(), "jpg");
        assert_eq!(ImageFormat::Png.extension(), "png");
        assert_eq!(ImageFormat::Png.mime_type(), "image/png");
        assert_eq!(ImageFormat::Jpeg.to_string(), "JPEG");
    }

    #[test]
    fn test_options_from_json() {
        let options: EncodeOptions = serde_json::from_str(r#"{"format": "png"}"#).unwrap();
        assert_eq!(options, EncodeOptions::new(ImageFormat::Png));

        let options: EncodeOptions = serde_json::from_str(r#"{"quality": 0.5}"#).unwrap();
        assert_eq!(options.format, ImageFormat::Jpeg);
        assert_eq!(options.jpeg_quality(), 50);
    }

    #[test]
    fn test_error_display() {
        let err = EncodeError::InvalidDimensions {
            width: 0,
            height: 10,
        };
        assert_eq!(
            err.to_string(),
            "Invalid dimensions: width (0) and height (10) must be non-zero"
        );

        let err = EncodeError::EncodingFailed {
            format: ImageFormat::Png,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "PNG encoding failed: boom");
    }
}
