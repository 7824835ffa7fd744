//! Affine transforms between storage and display coordinates.
//!
//! # Construction
//!
//! In the bottom-left convention the display → storage transform is exactly
//! what an encoder does to an upright picture to store it with a given code:
//!
//! 1. mirror about the vertical axis (mirrored codes only)
//! 2. rotate by the code's angle
//! 3. translate so the bounding box starts at the origin
//!
//! The storage → display transform undoes it: rotate by the negated angle,
//! mirror, translate.
//!
//! Raster buffers count rows downward, so the top-left transforms are the
//! bottom-left ones conjugated by a vertical flip of the source frame and the
//! destination frame. Using a transform built for one convention in the other
//! flips quarter-turn results upside down, hence the explicit [`Origin`].

use serde::{Deserialize, Serialize};

use super::{AffineTransform, Rect, Size};
use crate::orientation::Orientation;

/// Origin convention of a coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Origin {
    /// Origin at the top-left corner, y grows downward (bitmaps).
    #[default]
    TopLeft,
    /// Origin at the bottom-left corner, y grows upward (vector graphics).
    BottomLeft,
}

impl Orientation {
    /// Transform mapping storage coordinates to display coordinates.
    ///
    /// `storage_size` is the size of the stored pixel grid, before any
    /// width/height swap.
    pub fn transform(self, storage_size: Size, origin: Origin) -> AffineTransform {
        if self.is_identity() {
            return AffineTransform::IDENTITY;
        }

        let display_size = storage_size.oriented(self);
        let forward = storage_to_display(self, storage_size);

        match origin {
            Origin::BottomLeft => forward,
            Origin::TopLeft => vertical_flip(storage_size.height)
                .then(&forward)
                .then(&vertical_flip(display_size.height)),
        }
    }

    /// Transform mapping display coordinates back to storage coordinates.
    pub fn inverse_transform(self, storage_size: Size, origin: Origin) -> AffineTransform {
        if self.is_identity() {
            return AffineTransform::IDENTITY;
        }

        let display_size = storage_size.oriented(self);
        let backward = display_to_storage(self, display_size);

        match origin {
            Origin::BottomLeft => backward,
            Origin::TopLeft => vertical_flip(display_size.height)
                .then(&backward)
                .then(&vertical_flip(storage_size.height)),
        }
    }
}

fn mirror(orientation: Orientation) -> AffineTransform {
    if orientation.is_mirrored() {
        AffineTransform::scale(-1.0, 1.0)
    } else {
        AffineTransform::IDENTITY
    }
}

/// Bottom-left storage → display.
fn storage_to_display(orientation: Orientation, storage_size: Size) -> AffineTransform {
    let linear = AffineTransform::quarter_turns(-orientation.quarter_turns())
        .then(&mirror(orientation));
    anchored_at_origin(linear, storage_size)
}

/// Bottom-left display → storage.
fn display_to_storage(orientation: Orientation, display_size: Size) -> AffineTransform {
    let linear = mirror(orientation)
        .then(&AffineTransform::quarter_turns(orientation.quarter_turns()));
    anchored_at_origin(linear, display_size)
}

/// Append the translation that moves the image of `(0, 0, size)` back to the
/// origin.
fn anchored_at_origin(linear: AffineTransform, size: Size) -> AffineTransform {
    let bounds = linear.apply_rect(Rect::from_size(size));
    linear.then(&AffineTransform::translation(-bounds.x, -bounds.y))
}

/// `(x, y) -> (x, height - y)`, switching between the two origin conventions.
fn vertical_flip(height: f64) -> AffineTransform {
    AffineTransform::scale(1.0, -1.0).then(&AffineTransform::translation(0.0, height))
}
