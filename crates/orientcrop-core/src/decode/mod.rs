//! Image decoding pipeline.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG images without touching their orientation
//! - Reading the EXIF orientation tag (JPEG APP1 or PNG `eXIf`)
//! - Fit-inside resizing for generated output
//!
//! # Examples
//!
//! ```ignore
//! use orientcrop_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg")?;
//! let decoded = decode_image(&bytes)?;
//! println!(
//!     "{:?} stored, {:?} shown ({})",
//!     decoded.storage_size(),
//!     decoded.display_size(),
//!     decoded.orientation
//! );
//! ```

mod reader;
mod resize;
mod types;

pub use reader::{decode_image, decode_image_upright, read_orientation};
pub use resize::{resize, resize_to_fit};
pub use types::{DecodeError, DecodedImage, FilterType};
