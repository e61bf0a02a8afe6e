use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::math::angle_2d::{arc_length, is_point_on_arc, wrap_degrees};
use crate::math::intersect_2d::intersect_arc_with_rect_boundary;
use crate::math::{Point2, Rect, Vector2, ON_EPSILON};

/// Sweep direction of an arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArcDirection {
    /// Clockwise, negative span.
    Cw,
    /// Counter-clockwise, positive span.
    Ccw,
}

impl ArcDirection {
    #[must_use]
    pub fn is_ccw(self) -> bool {
        self == Self::Ccw
    }
}

/// A circular arc in the right-handed plane.
///
/// `start` and `span` are in degrees. A positive span sweeps
/// counter-clockwise; `start + span` may leave `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    center: Point2,
    radius: f64,
    start: f64,
    span: f64,
}

impl Default for Arc {
    fn default() -> Self {
        Self {
            center: Point2::origin(),
            radius: 0.5,
            start: 0.0,
            span: 90.0,
        }
    }
}

impl Arc {
    /// Creates a new arc.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonPositiveRadius`] if `radius <= 0`.
    pub fn new(center: Point2, radius: f64, start: f64, span: f64) -> Result<Self> {
        check_radius(radius)?;
        Ok(Self {
            center,
            radius,
            start,
            span,
        })
    }

    /// Arc centered at the origin sweeping from `a1` to `a2`.
    ///
    /// Counter-clockwise arcs get a span in `(0, 360]`, clockwise arcs in
    /// `[-360, 0)`. Angles that coincide modulo 360 give a full circle
    /// starting at 0°.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonPositiveRadius`] if `radius <= 0`.
    pub fn from_angles(a1: f64, a2: f64, radius: f64, direction: ArcDirection) -> Result<Self> {
        let a1 = wrap_degrees(a1);
        let a2 = wrap_degrees(a2);
        #[allow(clippy::float_cmp)]
        let (start, span) = if a1 == a2 {
            (0.0, if direction.is_ccw() { 360.0 } else { -360.0 })
        } else if direction.is_ccw() {
            (a1, (if a2 < a1 { a2 + 360.0 } else { a2 }) - a1)
        } else {
            (a1, -((if a1 < a2 { a1 + 360.0 } else { a1 }) - a2))
        };
        Self::new(Point2::origin(), radius, start, span)
    }

    /// Arc centered at the origin sweeping from the direction of `v1` to
    /// the direction of `v2`.
    ///
    /// # Errors
    ///
    /// Returns an error if either vector is zero or `radius <= 0`.
    pub fn from_vectors(
        v1: &Vector2,
        v2: &Vector2,
        radius: f64,
        direction: ArcDirection,
    ) -> Result<Self> {
        if v1.norm() == 0.0 || v2.norm() == 0.0 {
            return Err(GeometryError::ZeroVector.into());
        }
        let a1 = v1.y.atan2(v1.x).to_degrees();
        let a2 = v2.y.atan2(v2.x).to_degrees();
        Self::from_angles(a1, a2, radius, direction)
    }

    /// Returns this arc moved to `center`.
    #[must_use]
    pub fn with_center(mut self, center: Point2) -> Self {
        self.center = center;
        self
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        self.center
    }

    pub fn set_center(&mut self, center: Point2) {
        self.center = center;
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Changes the radius.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonPositiveRadius`] if `radius <= 0`; the
    /// arc is left unchanged.
    pub fn set_radius(&mut self, radius: f64) -> Result<()> {
        check_radius(radius)?;
        self.radius = radius;
        Ok(())
    }

    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn set_start(&mut self, start: f64) {
        self.start = start;
    }

    #[must_use]
    pub fn span(&self) -> f64 {
        self.span
    }

    pub fn set_span(&mut self, span: f64) {
        self.span = span;
    }

    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn end_angle(&self) -> f64 {
        self.start + self.span
    }

    #[must_use]
    pub fn direction(&self) -> ArcDirection {
        if self.span < 0.0 {
            ArcDirection::Cw
        } else {
            ArcDirection::Ccw
        }
    }

    #[must_use]
    pub fn start_point(&self) -> Point2 {
        self.point_at_angle(self.start)
    }

    #[must_use]
    pub fn end_point(&self) -> Point2 {
        self.point_at_angle(self.end_angle())
    }

    /// Unit vector from the center toward the start point.
    #[must_use]
    pub fn start_angle_vector(&self) -> Vector2 {
        angle_vector(self.start)
    }

    /// Unit vector from the center toward the end point.
    #[must_use]
    pub fn end_angle_vector(&self) -> Vector2 {
        angle_vector(self.end_angle())
    }

    /// Unit vector halfway through the sweep.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::FullCircleBisector`] for a ±360° span.
    pub fn bisector(&self) -> Result<Vector2> {
        #[allow(clippy::float_cmp)]
        let full = self.span.abs() == 360.0;
        if full {
            return Err(GeometryError::FullCircleBisector.into());
        }
        Ok(angle_vector(self.start + self.span / 2.0))
    }

    /// Signed length along the arc.
    #[must_use]
    pub fn length(&self) -> f64 {
        arc_length(self.span, self.radius)
    }

    /// Point at parameter `t` in `[0, 1]` along the sweep.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.point_at_angle(self.start + self.span * t)
    }

    /// True if `p` lies on this arc within the default epsilon.
    #[must_use]
    pub fn contains_point(&self, p: &Point2) -> bool {
        is_point_on_arc(p, &self.center, self.start, self.span, Some(self.radius), ON_EPSILON)
    }

    /// The single point where this arc leaves `rect`, if there is exactly one.
    #[must_use]
    pub fn clip_to_rect(&self, rect: &Rect) -> Option<Point2> {
        intersect_arc_with_rect_boundary(&self.center, self.radius, self.start, self.span, rect)
    }

    fn point_at_angle(&self, degrees: f64) -> Point2 {
        self.center + angle_vector(degrees) * self.radius
    }
}

fn angle_vector(degrees: f64) -> Vector2 {
    let (s, c) = degrees.to_radians().sin_cos();
    Vector2::new(c, s)
}

fn check_radius(radius: f64) -> Result<()> {
    if radius > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::NonPositiveRadius(radius).into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn rejects_non_positive_radius() {
        assert!(Arc::new(Point2::origin(), 0.0, 0.0, 90.0).is_err());
        assert!(Arc::new(Point2::origin(), -1.0, 0.0, 90.0).is_err());
        let mut arc = Arc::default();
        assert!(arc.set_radius(0.0).is_err());
        assert_relative_eq!(arc.radius(), 0.5);
    }

    #[test]
    fn equal_angles_make_full_circle() {
        let ccw = Arc::from_angles(30.0, 30.0, 1.0, ArcDirection::Ccw).unwrap();
        assert_relative_eq!(ccw.span(), 360.0);
        assert_relative_eq!(ccw.start(), 0.0);
        let cw = Arc::from_angles(30.0, 30.0, 1.0, ArcDirection::Cw).unwrap();
        assert_relative_eq!(cw.span(), -360.0);
    }

    #[test]
    fn spans_across_zero_degrees() {
        let ccw = Arc::from_angles(350.0, 10.0, 1.0, ArcDirection::Ccw).unwrap();
        assert!((ccw.span() - 20.0).abs() < TOL, "span={}", ccw.span());
        let cw = Arc::from_angles(10.0, 350.0, 1.0, ArcDirection::Cw).unwrap();
        assert!((cw.span() + 20.0).abs() < TOL, "span={}", cw.span());
        let long = Arc::from_angles(-120.0, 90.0, 1.0, ArcDirection::Cw).unwrap();
        assert!((long.start() - 240.0).abs() < TOL);
        assert!((long.span() + 150.0).abs() < TOL, "span={}", long.span());
    }

    #[test]
    fn from_vectors_uses_directions() {
        let arc = Arc::from_vectors(
            &Vector2::new(2.0, 0.0),
            &Vector2::new(0.0, 5.0),
            1.0,
            ArcDirection::Ccw,
        )
        .unwrap();
        assert!((arc.span() - 90.0).abs() < TOL);
        assert!(
            Arc::from_vectors(&Vector2::zeros(), &Vector2::x(), 1.0, ArcDirection::Ccw).is_err()
        );
    }

    #[test]
    fn end_points_and_vectors() {
        let arc = Arc::new(Point2::new(1.0, 1.0), 2.0, 90.0, 90.0).unwrap();
        let s = arc.start_point();
        let e = arc.end_point();
        assert!((s.x - 1.0).abs() < TOL && (s.y - 3.0).abs() < TOL, "s={s:?}");
        assert!((e.x + 1.0).abs() < TOL && (e.y - 1.0).abs() < TOL, "e={e:?}");
        assert!((arc.end_angle_vector().x + 1.0).abs() < TOL);
        assert!((arc.length() - std::f64::consts::PI).abs() < TOL);
    }

    #[test]
    fn bisector_of_quarter_arc() {
        let arc = Arc::new(Point2::origin(), 1.0, 0.0, 90.0).unwrap();
        let b = arc.bisector().unwrap();
        assert!((b.x - b.y).abs() < TOL && (b.norm() - 1.0).abs() < TOL);
        let full = Arc::new(Point2::origin(), 1.0, 45.0, -360.0).unwrap();
        assert!(full.bisector().is_err());
    }

    proptest! {
        #[test]
        fn span_sign_follows_direction(
            a1 in -720.0f64..720.0,
            a2 in -720.0f64..720.0,
            r in 0.001f64..100.0,
        ) {
            let ccw = Arc::from_angles(a1, a2, r, ArcDirection::Ccw).unwrap();
            let cw = Arc::from_angles(a1, a2, r, ArcDirection::Cw).unwrap();
            prop_assert!(ccw.span() > 0.0 && ccw.span() <= 360.0);
            prop_assert!(cw.span() < 0.0 && cw.span() >= -360.0);
        }

        #[test]
        fn end_points_lie_on_arc(
            cx in -10.0f64..10.0,
            cy in -10.0f64..10.0,
            start in -360.0f64..360.0,
            span in -359.0f64..359.0,
            r in 0.01f64..50.0,
        ) {
            let arc = Arc::new(Point2::new(cx, cy), r, start, span).unwrap();
            prop_assert!(is_point_on_arc(
                &arc.start_point(), &arc.center(), arc.start(), arc.span(), Some(arc.radius()), ON_EPSILON
            ));
            prop_assert!(is_point_on_arc(
                &arc.end_point(), &arc.center(), arc.start(), arc.span(), Some(arc.radius()), ON_EPSILON
            ));
        }
    }
}
