//! EXIF orientation codes.
//!
//! An image file stores its pixels in whatever layout the sensor produced and
//! records, in the EXIF `Orientation` tag, how a viewer has to rotate and/or
//! mirror those pixels to show them upright. There are exactly eight codes.
//!
//! Each code is described by two constants:
//!
//! - `angle`: the rotation (in radians, counter-clockwise in a y-up frame)
//!   that turns the upright picture into the stored one
//! - `is_mirrored`: whether the upright picture is reflected about its
//!   vertical axis before that rotation
//!
//! | code            | exif | angle  | mirrored |
//! |-----------------|------|--------|----------|
//! | `Up`            | 1    | 0      | no       |
//! | `UpMirrored`    | 2    | 0      | yes      |
//! | `Down`          | 3    | π      | no       |
//! | `DownMirrored`  | 4    | π      | yes      |
//! | `LeftMirrored`  | 5    | π/2    | yes      |
//! | `Right`         | 6    | π/2    | no       |
//! | `RightMirrored` | 7    | -π/2   | yes      |
//! | `Left`          | 8    | -π/2   | no       |
//!
//! See: https://exiftool.org/TagNames/EXIF.html

use std::f64::consts::FRAC_PI_2;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A value outside the eight defined EXIF orientation codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid EXIF orientation code: {0} (expected 1-8)")]
pub struct InvalidOrientation(pub u32);

/// EXIF orientation values (1-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Stored upright, nothing to do.
    #[default]
    Up = 1,
    /// Mirrored horizontally.
    UpMirrored = 2,
    /// Rotated 180 degrees.
    Down = 3,
    /// Mirrored vertically.
    DownMirrored = 4,
    /// Transposed (mirrored about the main diagonal).
    LeftMirrored = 5,
    /// Must be rotated 90 degrees clockwise for display.
    Right = 6,
    /// Transversed (mirrored about the anti-diagonal).
    RightMirrored = 7,
    /// Must be rotated 90 degrees counter-clockwise for display.
    Left = 8,
}

impl Orientation {
    /// All eight codes in EXIF order.
    pub const ALL: [Orientation; 8] = [
        Orientation::Up,
        Orientation::UpMirrored,
        Orientation::Down,
        Orientation::DownMirrored,
        Orientation::LeftMirrored,
        Orientation::Right,
        Orientation::RightMirrored,
        Orientation::Left,
    ];

    /// Create from an EXIF orientation tag value.
    pub fn from_exif(value: u8) -> Result<Self, InvalidOrientation> {
        Self::try_from(u32::from(value))
    }

    /// The EXIF tag value (1-8).
    #[inline]
    pub fn exif_value(self) -> u8 {
        self as u8
    }

    /// Rotation in whole quarter turns (counter-clockwise, y-up), one of
    /// `0, 1, 2, -1`.
    #[inline]
    pub fn quarter_turns(self) -> i32 {
        match self {
            Orientation::Up | Orientation::UpMirrored => 0,
            Orientation::Down | Orientation::DownMirrored => 2,
            Orientation::LeftMirrored | Orientation::Right => 1,
            Orientation::RightMirrored | Orientation::Left => -1,
        }
    }

    /// Rotation angle in radians: `0`, `π/2`, `π` or `-π/2`.
    #[inline]
    pub fn angle(self) -> f64 {
        f64::from(self.quarter_turns()) * FRAC_PI_2
    }

    /// Whether the picture is mirrored before rotating.
    #[inline]
    pub fn is_mirrored(self) -> bool {
        matches!(
            self,
            Orientation::UpMirrored
                | Orientation::DownMirrored
                | Orientation::LeftMirrored
                | Orientation::RightMirrored
        )
    }

    /// Returns true if this orientation swaps width and height dimensions.
    ///
    /// Quarter-turn rotations (and their mirrored variants) swap the
    /// image dimensions.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::LeftMirrored
                | Orientation::Right
                | Orientation::RightMirrored
                | Orientation::Left
        )
    }

    /// The code that undoes this one.
    ///
    /// `Right` and `Left` undo each other; every other code is an involution.
    #[inline]
    pub fn inverse(self) -> Self {
        match self {
            Orientation::Right => Orientation::Left,
            Orientation::Left => Orientation::Right,
            other => other,
        }
    }

    /// Whether this is the identity orientation.
    #[inline]
    pub fn is_identity(self) -> bool {
        self == Orientation::Up
    }

    /// The conventional name of the code, as used by EXIF tools.
    pub fn name(self) -> &'static str {
        match self {
            Orientation::Up => "Up",
            Orientation::UpMirrored => "Up Mirrored",
            Orientation::Down => "Down",
            Orientation::DownMirrored => "Down Mirrored",
            Orientation::LeftMirrored => "Left Mirrored",
            Orientation::Right => "Right",
            Orientation::RightMirrored => "Right Mirrored",
            Orientation::Left => "Left",
        }
    }
}

impl TryFrom<u32> for Orientation {
    type Error = InvalidOrientation;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Orientation::Up),
            2 => Ok(Orientation::UpMirrored),
            3 => Ok(Orientation::Down),
            4 => Ok(Orientation::DownMirrored),
            5 => Ok(Orientation::LeftMirrored),
            6 => Ok(Orientation::Right),
            7 => Ok(Orientation::RightMirrored),
            8 => Ok(Orientation::Left),
            other => Err(InvalidOrientation(other)),
        }
    }
}

impl From<Orientation> for u32 {
    fn from(value: Orientation) -> Self {
        u32::from(value.exif_value())
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
