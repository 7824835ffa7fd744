//! Orientation geometry: sizes, rectangles and the transforms between
//! storage and display coordinates.
//!
//! # Coordinate Systems
//!
//! - **Storage** coordinates address the pixels exactly as they are laid out
//!   in memory (or in the file), before any orientation correction.
//! - **Display** coordinates address the same pixels after the EXIF
//!   orientation has been applied, i.e. what a viewer shows upright.
//!
//! Both can be expressed with either origin convention (see [`Origin`]).
//! Unless stated otherwise, rectangles use the top-left convention, matching
//! raster buffers.
//!
//! All values are `f64` so sub-pixel layouts survive until the final
//! rounding step.

mod affine;
mod rect;
mod transform;

use serde::{Deserialize, Serialize};

use crate::orientation::Orientation;

pub use affine::AffineTransform;
pub use rect::orient_rect;
pub use transform::Origin;

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The size after applying `orientation`.
    ///
    /// Quarter-turn codes swap width and height, the others keep them.
    pub fn oriented(self, orientation: Orientation) -> Self {
        if orientation.swaps_dimensions() {
            Self::new(self.height, self.width)
        } else {
            self
        }
    }

    pub fn area(self) -> f64 {
        self.width * self.height
    }

    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(f64::from(width), f64::from(height))
    }
}

/// A point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle.
///
/// A `Rect` carries no tag for the coordinate system it lives in; every
/// function that accepts or returns one documents it instead.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle at the origin covering `size`.
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Zero or negative extent in either direction.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Whether `other` lies fully inside this rectangle.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }

    /// The overlapping region, or `None` if the rectangles don't overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let max_x = self.max_x().min(other.max_x());
        let max_y = self.max_y().min(other.max_y());

        if max_x <= x || max_y <= y {
            return None;
        }
        Some(Rect::new(x, y, max_x - x, max_y - y))
    }

    /// Whether every component is a finite number.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Smallest whole-pixel rectangle covering this one.
    ///
    /// The origin is floored and the far edges are ceiled. Edges within
    /// [`PIXEL_EPSILON`] of a whole pixel snap to it, so float noise from the
    /// orientation math doesn't grow the window by a pixel.
    pub fn enclosing(&self) -> Rect {
        let x = snap(self.x).floor();
        let y = snap(self.y).floor();
        let max_x = snap(self.max_x()).ceil();
        let max_y = snap(self.max_y()).ceil();
        Rect::new(x, y, max_x - x, max_y - y)
    }

    /// Round origin and size to whole pixels, independently of each other.
    pub fn rounded(&self) -> Rect {
        Rect::new(
            self.x.round(),
            self.y.round(),
            self.width.round(),
            self.height.round(),
        )
    }

    /// Map a rectangle given in display coordinates of an image stored at
    /// `storage_size` into storage coordinates (top-left origin).
    pub fn to_storage(&self, orientation: Orientation, storage_size: Size) -> Rect {
        orient_rect(*self, orientation, storage_size)
    }

    /// Map a rectangle given in storage coordinates of an image stored at
    /// `storage_size` into display coordinates (top-left origin).
    pub fn to_display(&self, orientation: Orientation, storage_size: Size) -> Rect {
        orient_rect(
            *self,
            orientation.inverse(),
            storage_size.oriented(orientation),
        )
    }
}

/// Distance from a whole pixel below which an edge is treated as lying on it.
pub const PIXEL_EPSILON: f64 = 1e-6;

fn snap(value: f64) -> f64 {
    let nearest = value.round();
    if (value - nearest).abs() < PIXEL_EPSILON {
        nearest
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_oriented_swaps_for_quarter_turns() {
        let size = Size::new(1200.0, 1800.0);
        for orientation in Orientation::ALL {
            let oriented = size.oriented(orientation);
            if orientation.swaps_dimensions() {
                assert_eq!(oriented, Size::new(1800.0, 1200.0), "{orientation}");
            } else {
                assert_eq!(oriented, size, "{orientation}");
            }
        }
    }

    #[test]
    fn test_size_from_u32() {
        let size = Size::from((640, 480));
        assert_eq!(size, Size::new(640.0, 480.0));
        assert_eq!(size.area(), 307200.0);
        assert!(!size.is_empty());
        assert!(Size::ZERO.is_empty());
    }

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 25.0, 100.0, 100.0);
        assert_eq!(a.intersection(&b), Some(Rect::new(50.0, 25.0, 50.0, 75.0)));
        assert_eq!(b.intersection(&a), a.intersection(&b));
    }

    #[test]
    fn test_rect_intersection_disjoint() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let touching = Rect::new(10.0, 0.0, 10.0, 10.0);
        let far = Rect::new(50.0, 50.0, 1.0, 1.0);
        assert_eq!(a.intersection(&touching), None);
        assert_eq!(a.intersection(&far), None);
    }

    #[test]
    fn test_rect_rounded_is_independent() {
        // 0.4 + 0.4 would round to 1 if the edges were rounded instead
        let r = Rect::new(0.4, 1.5, 0.4, 2.49).rounded();
        assert_eq!(r, Rect::new(0.0, 2.0, 0.0, 2.0));
    }

    #[test]
    fn test_rect_enclosing() {
        // fractional edges grow outward
        assert_eq!(
            Rect::new(0.5, 0.0, 2.5, 1.0).enclosing(),
            Rect::new(0.0, 0.0, 3.0, 1.0)
        );
        assert_eq!(
            Rect::new(-0.4, 0.2, 3.0, 1.6).enclosing(),
            Rect::new(-1.0, 0.0, 4.0, 2.0)
        );
        // float noise stays on the pixel
        assert_eq!(
            Rect::new(1.0 - 1e-9, 2.0, 2.0 + 2e-9, 1.0).enclosing(),
            Rect::new(1.0, 2.0, 2.0, 1.0)
        );
    }

    #[test]
    fn test_rect_is_finite() {
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).is_finite());
        assert!(!Rect::new(f64::NAN, 0.0, 1.0, 1.0).is_finite());
        assert!(!Rect::new(0.0, 0.0, f64::INFINITY, 1.0).is_finite());
    }

    #[test]
    fn test_rect_contains() {
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(bounds.contains(&bounds));
        assert!(bounds.contains(&Rect::new(2.0, 2.0, 8.0, 8.0)));
        assert!(!bounds.contains(&Rect::new(2.0, 2.0, 9.0, 8.0)));
        assert!(!bounds.contains(&Rect::new(-1.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn test_rect_accessors() {
        let r = Rect::new(3.0, 4.0, 5.0, 6.0);
        assert_eq!(r.origin(), Point::new(3.0, 4.0));
        assert_eq!(r.size(), Size::new(5.0, 6.0));
        assert_eq!(r.max_x(), 8.0);
        assert_eq!(r.max_y(), 10.0);
        assert_eq!(r.area(), 30.0);
        assert!(!r.is_empty());
        assert!(Rect::new(0.0, 0.0, 0.0, 5.0).is_empty());
    }
}
