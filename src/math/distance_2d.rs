use super::{unit, Line2, Point2, Vector2, ON_EPSILON};
use crate::error::{GeometryError, Result};

/// Projects `p` onto the infinite line through `sp` and `ep`.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroLengthLine`] if `sp == ep`.
pub fn closest_point_on_line(p: &Point2, sp: &Point2, ep: &Point2) -> Result<Point2> {
    if sp == ep {
        return Err(GeometryError::ZeroLengthLine.into());
    }
    let u = unit(&(ep - sp))?;
    let v = p - sp;
    Ok(sp + u * v.dot(&u))
}

/// Point on the circle `(center, radius)` closest to `p`.
///
/// # Errors
///
/// Returns [`GeometryError::PointAtCenter`] if `p == center`.
pub fn closest_point_on_arc(p: &Point2, center: &Point2, radius: f64) -> Result<Point2> {
    if p == center {
        return Err(GeometryError::PointAtCenter.into());
    }
    let v = unit(&(p - center))?;
    Ok(center + v * radius)
}

#[must_use]
pub fn midpoint(p1: &Point2, p2: &Point2) -> Point2 {
    Point2::new((p1.x + p2.x) * 0.5, (p1.y + p2.y) * 0.5)
}

/// True if `p` lies on `seg` within `eps`.
///
/// Uses the sum of distances to both endpoints, so points just off the
/// segment ends are rejected as well as points off the line.
#[must_use]
pub fn is_point_on_segment(p: &Point2, seg: &Line2, eps: f64) -> bool {
    let d1 = (p - seg.p1).norm();
    let d2 = (p - seg.p2).norm();
    (d1 + d2 - seg.length()).abs() < eps
}

/// [`is_point_on_segment`] with the default epsilon.
#[must_use]
pub fn is_point_on_segment_default(p: &Point2, seg: &Line2) -> bool {
    is_point_on_segment(p, seg, ON_EPSILON)
}

/// Parametric form of a segment: start point and unit direction.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroLengthLine`] for a null segment.
pub fn line_to_parametric(line: &Line2) -> Result<(Point2, Vector2)> {
    Ok((line.p1, line.unit_direction()?))
}

/// True if `l2` starts on the infinite line carrying `l1`.
///
/// The determinant is compared with exact equality, so nearly collinear
/// segments produced by rounding are reported as not collinear.
#[must_use]
pub fn lines_collinear(l1: &Line2, l2: &Line2) -> bool {
    let (x1, y1) = (l1.p1.x, l1.p1.y);
    let (x2, y2) = (l1.p2.x, l1.p2.y);
    let (x3, y3) = (l2.p1.x, l2.p1.y);
    #[allow(clippy::float_cmp)]
    let collinear = (y1 - y2) * (x1 - x3) == (y1 - y3) * (x1 - x2);
    collinear
}
