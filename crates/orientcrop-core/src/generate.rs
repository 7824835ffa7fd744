//! Reference images for every EXIF orientation.
//!
//! Given an upright picture, writes eight files whose stored pixels differ but
//! which all look identical (and upright) in a viewer that honors the EXIF
//! tag. Handy for checking that a decoder, cropper or viewer gets every code
//! right.
//!
//! # Example
//!
//! ```ignore
//! let config = GeneratorConfig::from_json(r#"{"format": "png", "max_size": {"width": 512, "height": 512}}"#)?;
//! let written = generate_from_file("photo.jpg", "out/", &config)?;
//! assert_eq!(written.len(), 8); // out/photo_1.png ... out/photo_8.png
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::{materialize, BufferError, PixelView};
use crate::decode::{decode_image_upright, resize_to_fit, DecodeError, FilterType};
use crate::encode::{encode_image, EncodeError, EncodeOptions, ImageFormat};
use crate::geometry::Size;
use crate::orientation::Orientation;

/// Stem used when neither the config nor the source path provides one.
pub const DEFAULT_FILE_STEM: &str = "oriented_image";

/// Errors from generating reference images.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Invalid generator config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// What to generate and how.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Output container.
    pub format: ImageFormat,
    /// Bounding box for the upright picture; larger sources are scaled down
    /// to fit, smaller ones are left alone.
    pub max_size: Option<Size>,
    /// Lossy quality in `0.0..=1.0`, ignored by PNG.
    pub quality: Option<f32>,
    /// Filter used when scaling down.
    pub filter: FilterType,
    /// File name stem; defaults to the source's.
    pub file_stem: Option<String>,
}

impl GeneratorConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, GenerateError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            format: self.format,
            quality: self.quality,
        }
    }
}

/// One encoded reference image.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientedVariant {
    pub orientation: Orientation,
    /// `<stem>_<exif>.<ext>`
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Encode `upright` once per orientation code, in EXIF order.
///
/// Each variant stores the pixels rearranged by the inverse of its code and
/// carries the code in its EXIF block, so applying the tag gives back
/// `upright`. `max_size` is not applied here; see [`generate_from_file`].
///
/// # Errors
///
/// Returns the first buffer or encoder error.
pub fn generate_variants(
    upright: &PixelView<'_>,
    config: &GeneratorConfig,
) -> Result<Vec<OrientedVariant>, GenerateError> {
    let stem = config.file_stem.as_deref().unwrap_or(DEFAULT_FILE_STEM);
    let options = config.encode_options();

    Orientation::ALL
        .into_iter()
        .map(|orientation| -> Result<OrientedVariant, GenerateError> {
            let stored = materialize(upright, orientation.inverse())?;
            let bytes = encode_image(&stored.view(), orientation, &options)?;
            let file_name = format!(
                "{}_{}.{}",
                stem,
                orientation.exif_value(),
                config.format.extension()
            );
            debug!(
                "{}: stored {}x{}, {} bytes",
                file_name,
                stored.width(),
                stored.height(),
                bytes.len()
            );
            Ok(OrientedVariant {
                orientation,
                file_name,
                bytes,
            })
        })
        .collect()
}

/// Generate all eight reference images for the picture in `source` and write
/// them into `dest_dir`.
///
/// The source is decoded upright (its own orientation tag applied), scaled
/// down to `config.max_size` if it is larger, and passed to
/// [`generate_variants`].
///
/// # Arguments
///
/// * `source` - Image file to read
/// * `dest_dir` - Existing directory to write into
/// * `config` - Output settings
///
/// # Returns
///
/// The paths written, in EXIF order.
///
/// # Errors
///
/// Returns `GenerateError::Io` if the source can't be read, the destination
/// doesn't exist or a file can't be written.
pub fn generate_from_file(
    source: impl AsRef<Path>,
    dest_dir: impl AsRef<Path>,
    config: &GeneratorConfig,
) -> Result<Vec<PathBuf>, GenerateError> {
    let source = source.as_ref();
    let dest_dir = dest_dir.as_ref();

    if !dest_dir.is_dir() {
        return Err(GenerateError::Io {
            path: dest_dir.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "destination directory does not exist"),
        });
    }

    let bytes = fs::read(source).map_err(|e| GenerateError::Io {
        path: source.to_path_buf(),
        source: e,
    })?;

    let mut upright = decode_image_upright(&bytes)?;
    if let Some(max_size) = config.max_size {
        upright = resize_to_fit(&upright.view(), max_size, config.filter)?;
    }
    info!(
        "Generating {} reference images from {} ({}x{})",
        Orientation::ALL.len(),
        source.display(),
        upright.width(),
        upright.height()
    );

    let mut config = config.clone();
    if config.file_stem.is_none() {
        config.file_stem = Some(source_stem(source));
    }

    let mut written = Vec::with_capacity(Orientation::ALL.len());
    for variant in generate_variants(&upright.view(), &config)? {
        let path = dest_dir.join(&variant.file_name);
        fs::write(&path, &variant.bytes).map_err(|e| GenerateError::Io {
            path: path.clone(),
            source: e,
        })?;
        info!("Wrote {} ({})", path.display(), variant.orientation);
        written.push(path);
    }
    Ok(written)
}

/// File name up to the first dot: `IMG_0001.large.jpg` -> `IMG_0001`.
fn source_stem(source: &Path) -> String {
    source
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.split('.').next())
        .filter(|stem| !stem.is_empty())
        .unwrap_or(DEFAULT_FILE_STEM)
        .to_string()
}
