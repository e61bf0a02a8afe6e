pub mod angle_2d;
pub mod distance_2d;
pub mod intersect_2d;

use crate::error::{GeometryError, Result};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Default epsilon for the "lies on" predicates (arc radius, segment sum).
pub const ON_EPSILON: f64 = 1e-3;

/// Returns `x` clamped to `[lo, hi]`.
#[must_use]
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    hi.min(x.max(lo))
}

/// Normalizes `v`.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroVector`] if `v` has zero length.
pub fn unit(v: &Vector2) -> Result<Vector2> {
    v.try_normalize(0.0).ok_or_else(|| GeometryError::ZeroVector.into())
}

/// Rotates `v` counter-clockwise by `degrees`.
#[must_use]
pub fn rotate(v: &Vector2, degrees: f64) -> Vector2 {
    let (s, c) = degrees.to_radians().sin_cos();
    Vector2::new(v.x * c - v.y * s, v.x * s + v.y * c)
}

/// Directed line segment from `p1` to `p2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2 {
    pub p1: Point2,
    pub p2: Point2,
}

impl Line2 {
    /// Creates a segment between two points.
    #[must_use]
    pub fn new(p1: Point2, p2: Point2) -> Self {
        Self { p1, p2 }
    }

    /// Creates a segment from raw coordinates.
    #[must_use]
    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Point2::new(x1, y1), Point2::new(x2, y2))
    }

    /// Vector from `p1` to `p2`.
    #[must_use]
    pub fn vector(&self) -> Vector2 {
        self.p2 - self.p1
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }

    /// True when both endpoints coincide.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.p1 == self.p2
    }

    /// Unit direction from `p1` to `p2`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroLengthLine`] for a null segment.
    pub fn unit_direction(&self) -> Result<Vector2> {
        if self.is_null() {
            return Err(GeometryError::ZeroLengthLine.into());
        }
        unit(&self.vector())
    }

    /// The segment reflected across the X axis.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        Self::from_coords(self.p1.x, -self.p1.y, self.p2.x, -self.p2.y)
    }
}

/// Axis-aligned rectangle stored as normalized min/max corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    min: Point2,
    max: Point2,
}

impl Rect {
    /// Rectangle spanned by two opposite corners, in any order.
    #[must_use]
    pub fn from_points(a: Point2, b: Point2) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Rectangle of the given size centered on `center`.
    #[must_use]
    pub fn from_center(center: Point2, width: f64, height: f64) -> Self {
        let hw = width.abs() * 0.5;
        let hh = height.abs() * 0.5;
        Self {
            min: Point2::new(center.x - hw, center.y - hh),
            max: Point2::new(center.x + hw, center.y + hh),
        }
    }

    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.min.x
    }

    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.max.x
    }

    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.min.y
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.max.y
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        nalgebra::center(&self.min, &self.max)
    }

    /// True if `p` is inside or on the boundary.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Boundary edges in left, top, right, bottom order (top is `max_y`).
    #[must_use]
    pub fn edges(&self) -> [Line2; 4] {
        let bl = self.min;
        let tr = self.max;
        let tl = Point2::new(self.min.x, self.max.y);
        let br = Point2::new(self.max.x, self.min.y);
        [
            Line2::new(tl, bl),
            Line2::new(tl, tr),
            Line2::new(tr, br),
            Line2::new(bl, br),
        ]
    }
}
