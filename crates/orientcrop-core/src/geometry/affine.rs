//! 2D affine transforms.

use serde::{Deserialize, Serialize};

use super::{Point, Rect};

/// A 2×3 affine matrix.
///
/// ```text
/// x' = a * x + c * y + tx
/// y' = b * x + d * y + ty
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineTransform {
    pub const IDENTITY: AffineTransform = AffineTransform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    pub fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation about the origin, counter-clockwise when y points up.
    pub fn rotation(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Rotation by a whole number of quarter turns.
    ///
    /// Same direction as [`AffineTransform::rotation`], but with exact
    /// coefficients so no `6e-17` residue leaks into pixel coordinates.
    pub fn quarter_turns(turns: i32) -> Self {
        match turns.rem_euclid(4) {
            0 => Self::IDENTITY,
            1 => Self::new(0.0, 1.0, -1.0, 0.0, 0.0, 0.0),
            2 => Self::new(-1.0, 0.0, 0.0, -1.0, 0.0, 0.0),
            _ => Self::new(0.0, -1.0, 1.0, 0.0, 0.0, 0.0),
        }
    }

    /// `self` followed by `next`.
    pub fn then(&self, next: &AffineTransform) -> AffineTransform {
        AffineTransform {
            a: next.a * self.a + next.c * self.b,
            b: next.b * self.a + next.d * self.b,
            c: next.a * self.c + next.c * self.d,
            d: next.b * self.c + next.d * self.d,
            tx: next.a * self.tx + next.c * self.ty + next.tx,
            ty: next.b * self.tx + next.d * self.ty + next.ty,
        }
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// The inverse transform, or `None` for a singular matrix.
    pub fn inverted(&self) -> Option<AffineTransform> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(AffineTransform {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            tx: (self.c * self.ty - self.d * self.tx) / det,
            ty: (self.b * self.tx - self.a * self.ty) / det,
        })
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn apply_point(&self, point: Point) -> Point {
        Point::new(
            self.a * point.x + self.c * point.y + self.tx,
            self.b * point.x + self.d * point.y + self.ty,
        )
    }

    /// The bounding box of the four transformed corners of `rect`.
    ///
    /// Exact for the axis-aligned transforms used by orientations; a general
    /// rotation yields the enclosing box.
    pub fn apply_rect(&self, rect: Rect) -> Rect {
        let corners = [
            self.apply_point(Point::new(rect.x, rect.y)),
            self.apply_point(Point::new(rect.max_x(), rect.y)),
            self.apply_point(Point::new(rect.x, rect.max_y())),
            self.apply_point(Point::new(rect.max_x(), rect.max_y())),
        ];

        let mut min = corners[0];
        let mut max = corners[0];
        for p in &corners[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }

        Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }
}
