//! Angle utilities. Angles are in degrees unless a name says otherwise.

use super::{Point2, Vector2, ON_EPSILON};
use crate::error::{GeometryError, Result};

/// Slack, in degrees, absorbing `atan2` round-off at arc end points.
pub const ANGLE_EPSILON: f64 = 1e-9;

/// Absolute direction of `v` in `[0, 360)`.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroVector`] if `v` has zero length.
pub fn vector_to_absolute_angle(v: &Vector2) -> Result<f64> {
    if v.x == 0.0 && v.y == 0.0 {
        return Err(GeometryError::ZeroVector.into());
    }
    Ok(wrap_degrees(v.y.atan2(v.x).to_degrees()))
}

/// Maps any angle into `[0, 360)`.
#[must_use]
pub fn wrap_degrees(a: f64) -> f64 {
    let w = a.rem_euclid(360.0);
    // rem_euclid can round up to the modulus for tiny negative inputs.
    if w >= 360.0 {
        0.0
    } else {
        w
    }
}

/// Signed length of an arc spanning `span` degrees at `radius`.
#[must_use]
pub fn arc_length(span: f64, radius: f64) -> f64 {
    span / 360.0 * (2.0 * std::f64::consts::PI * radius)
}

/// Theoretical length of a conical tip with the given included angle.
#[must_use]
pub fn tip_length(included_angle: f64, diameter: f64) -> f64 {
    diameter * 0.5 / (included_angle / 2.0).to_radians().tan()
}

/// Tests whether `p` lies on the arc around `center`.
///
/// When `radius` is given, points farther than `eps` from the circle are
/// rejected first. The angular test is inclusive at both ends, within
/// [`ANGLE_EPSILON`], and handles spans that wrap through 0°.
#[must_use]
pub fn is_point_on_arc(
    p: &Point2,
    center: &Point2,
    start: f64,
    span: f64,
    radius: Option<f64>,
    eps: f64,
) -> bool {
    let v = p - center;
    if let Some(r) = radius {
        if (v.norm() - r).abs() > eps {
            return false;
        }
    }
    let mut sa = wrap_degrees(start);
    let mut ea = wrap_degrees(start + span);
    if span < 0.0 {
        std::mem::swap(&mut sa, &mut ea);
    }
    let pa = wrap_degrees(v.y.atan2(v.x).to_degrees());
    // Offsets measured ccw from the low end cover the wrapped case too.
    let sweep = wrap_degrees(ea - sa);
    let offset = wrap_degrees(pa - sa);
    offset <= sweep + ANGLE_EPSILON || offset >= 360.0 - ANGLE_EPSILON
}

/// [`is_point_on_arc`] with the default epsilon.
#[must_use]
pub fn is_point_on_arc_default(
    p: &Point2,
    center: &Point2,
    start: f64,
    span: f64,
    radius: Option<f64>,
) -> bool {
    is_point_on_arc(p, center, start, span, radius, ON_EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn absolute_angle_quadrants() {
        let cases = [
            (Vector2::new(1.0, 0.0), 0.0),
            (Vector2::new(0.0, 2.0), 90.0),
            (Vector2::new(-1.0, 0.0), 180.0),
            (Vector2::new(0.0, -1.0), 270.0),
            (Vector2::new(1.0, -1.0), 315.0),
        ];
        for (v, want) in cases {
            let got = vector_to_absolute_angle(&v).unwrap_or(f64::NAN);
            assert!((got - want).abs() < TOL, "v={v:?} got={got}");
        }
    }

    #[test]
    fn absolute_angle_rejects_zero() {
        assert!(vector_to_absolute_angle(&Vector2::zeros()).is_err());
    }

    #[test]
    fn arc_length_is_signed() {
        let l = arc_length(-90.0, 2.0);
        assert!((l + std::f64::consts::PI).abs() < TOL, "l={l}");
    }

    #[test]
    fn tip_length_of_90_degree_point() {
        assert!((tip_length(90.0, 1.0) - 0.5).abs() < TOL);
    }

    #[test]
    fn point_on_wrapping_arc() {
        let c = Point2::origin();
        // 300° sweeping +120° wraps through 0°.
        assert!(is_point_on_arc_default(&Point2::new(1.0, 0.0), &c, 300.0, 120.0, Some(1.0)));
        assert!(!is_point_on_arc_default(&Point2::new(-1.0, 0.0), &c, 300.0, 120.0, Some(1.0)));
    }

    #[test]
    fn point_on_clockwise_arc() {
        let c = Point2::origin();
        // From 90° clockwise to 0°.
        let p = Point2::new(45f64.to_radians().cos(), 45f64.to_radians().sin());
        assert!(is_point_on_arc_default(&p, &c, 90.0, -90.0, Some(1.0)));
        assert!(!is_point_on_arc_default(&Point2::new(-1.0, 0.0), &c, 90.0, -90.0, None));
    }

    #[test]
    fn point_off_radius_is_rejected() {
        let c = Point2::origin();
        assert!(!is_point_on_arc_default(&Point2::new(1.1, 0.0), &c, -10.0, 20.0, Some(1.0)));
        assert!(is_point_on_arc_default(&Point2::new(1.1, 0.0), &c, -10.0, 20.0, None));
    }
}
