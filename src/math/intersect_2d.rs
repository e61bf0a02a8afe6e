use super::angle_2d::is_point_on_arc;
use super::distance_2d::{is_point_on_segment, line_to_parametric};
use super::{Line2, Point2, Rect, ON_EPSILON, TOLERANCE};
use crate::error::Result;

/// Intersection of the infinite lines carrying `l1` and `l2`.
///
/// Returns `None` when the lines are parallel.
#[must_use]
pub fn line_line_intersection(l1: &Line2, l2: &Line2) -> Option<Point2> {
    let d1 = l1.vector();
    let d2 = l2.vector();
    let cross = d1.x * d2.y - d1.y * d2.x;
    if cross.abs() < TOLERANCE || !cross.is_finite() {
        return None;
    }
    let dx = l2.p1.x - l1.p1.x;
    let dy = l2.p1.y - l1.p1.y;
    let t = (dx * d2.y - dy * d2.x) / cross;
    Some(l1.p1 + d1 * t)
}

/// Bounded segment-segment intersection.
///
/// Returns the crossing point when it lies within both segments, endpoints
/// included.
#[must_use]
pub fn segment_segment_intersection(a: &Line2, b: &Line2) -> Option<Point2> {
    let da = a.vector();
    let db = b.vector();

    let cross = da.x * db.y - da.y * db.x;
    if cross.abs() < TOLERANCE {
        return None;
    }

    let dx = b.p1.x - a.p1.x;
    let dy = b.p1.y - a.p1.y;
    let t = (dx * db.y - dy * db.x) / cross;
    let u = (dx * da.y - dy * da.x) / cross;

    // Use a small epsilon to include endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        Some(a.p1 + da * t.clamp(0.0, 1.0))
    } else {
        None
    }
}

/// Intersections of the infinite line through `line` with a circle.
///
/// Returns no point, one point for an exact tangent, or two points ordered
/// by their parameter along the line (smaller first).
///
/// # Errors
///
/// Returns an error if `line` has zero length.
pub fn intersect_line_circle(line: &Line2, center: &Point2, r: f64) -> Result<Vec<Point2>> {
    let (o, d) = line_to_parametric(line)?;
    let (f, g) = (d.x, d.y);
    let ex = center.x - o.x;
    let ey = center.y - o.y;
    let b = f * f + g * g;
    let cross = f * ey - g * ex;
    let root = r * r * b - cross * cross;
    let a = f * ex + g * ey;

    let mut points = Vec::with_capacity(2);
    #[allow(clippy::float_cmp)]
    let tangent = root == 0.0;
    if tangent {
        points.push(o + d * (a / b));
    } else if root > 0.0 {
        let s = root.sqrt();
        points.push(o + d * ((a - s) / b));
        points.push(o + d * ((a + s) / b));
    }
    Ok(points)
}

/// [`intersect_line_circle`] applied to each edge of `rect`, in left, top,
/// right, bottom order.
///
/// # Errors
///
/// Returns an error if `rect` has a zero-length edge.
pub fn intersect_rect_circle(rect: &Rect, center: &Point2, r: f64) -> Result<[Vec<Point2>; 4]> {
    let [left, top, right, bottom] = rect.edges();
    Ok([
        intersect_line_circle(&left, center, r)?,
        intersect_line_circle(&top, center, r)?,
        intersect_line_circle(&right, center, r)?,
        intersect_line_circle(&bottom, center, r)?,
    ])
}

/// First bounded crossing of `line` with the boundary of `rect`.
///
/// Edges are tried left, top, right, bottom. Meant for a segment with one
/// end inside the rectangle.
#[must_use]
pub fn first_rect_crossing(line: &Line2, rect: &Rect) -> Option<Point2> {
    rect.edges()
        .iter()
        .find_map(|edge| segment_segment_intersection(line, edge))
}

/// The single point where an arc leaves `rect`.
///
/// Candidates come from the arc's circle against each edge, filtered to
/// those inside the arc's angular span and on the edge segment. Returns a
/// point only when exactly one candidate survives; zero or several mean the
/// arc has no usable clip point.
#[must_use]
pub fn intersect_arc_with_rect_boundary(
    center: &Point2,
    radius: f64,
    start: f64,
    span: f64,
    rect: &Rect,
) -> Option<Point2> {
    let mut hits = Vec::new();
    for edge in &rect.edges() {
        let Ok(points) = intersect_line_circle(edge, center, radius) else {
            continue;
        };
        hits.extend(points.into_iter().filter(|p| {
            is_point_on_arc(p, center, start, span, None, ON_EPSILON)
                && is_point_on_segment(p, edge, ON_EPSILON)
        }));
    }
    if hits.len() == 1 {
        hits.pop()
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn infinite_lines_cross_outside_segments() {
        let p = line_line_intersection(
            &Line2::from_coords(0.0, 0.0, 1.0, 0.0),
            &Line2::from_coords(5.0, 1.0, 5.0, 2.0),
        )
        .unwrap();
        assert!((p.x - 5.0).abs() < TOL && p.y.abs() < TOL, "p={p:?}");
    }

    #[test]
    fn parallel_lines_do_not_cross() {
        assert!(line_line_intersection(
            &Line2::from_coords(0.0, 0.0, 1.0, 0.0),
            &Line2::from_coords(0.0, 1.0, 1.0, 1.0),
        )
        .is_none());
    }

    #[test]
    fn bounded_intersection_requires_overlap() {
        let a = Line2::from_coords(0.0, 0.0, 2.0, 2.0);
        let b = Line2::from_coords(0.0, 2.0, 2.0, 0.0);
        let p = segment_segment_intersection(&a, &b).unwrap();
        assert!((p.x - 1.0).abs() < TOL && (p.y - 1.0).abs() < TOL);
        let c = Line2::from_coords(3.0, 0.0, 3.0, 1.0);
        assert!(segment_segment_intersection(&a, &c).is_none());
    }

    #[test]
    fn secant_through_center_has_two_points() {
        let c = Point2::new(1.0, 1.0);
        let pts =
            intersect_line_circle(&Line2::from_coords(-2.0, 1.0, 4.0, 1.0), &c, 2.0).unwrap();
        assert_eq!(pts.len(), 2);
        for p in &pts {
            assert!(((p - c).norm() - 2.0).abs() < TOL, "p={p:?}");
        }
        // Smaller parameter first.
        assert!(pts[0].x < pts[1].x);
    }

    #[test]
    fn tangent_has_one_point() {
        let pts = intersect_line_circle(
            &Line2::from_coords(-3.0, 1.0, 3.0, 1.0),
            &Point2::origin(),
            1.0,
        )
        .unwrap();
        assert_eq!(pts.len(), 1);
        assert!(pts[0].x.abs() < TOL && (pts[0].y - 1.0).abs() < TOL);
    }

    #[test]
    fn miss_has_no_points() {
        let pts = intersect_line_circle(
            &Line2::from_coords(-3.0, 5.0, 3.0, 5.0),
            &Point2::origin(),
            1.0,
        )
        .unwrap();
        assert!(pts.is_empty());
        assert!(intersect_line_circle(
            &Line2::from_coords(1.0, 1.0, 1.0, 1.0),
            &Point2::origin(),
            1.0
        )
        .is_err());
    }

    #[test]
    fn rect_circle_per_edge() {
        let rect = Rect::from_points(Point2::new(-1.0, -1.0), Point2::new(1.0, 1.0));
        let hits = intersect_rect_circle(&rect, &Point2::origin(), 1.0).unwrap();
        // Every edge is tangent to the unit circle.
        for edge_hits in &hits {
            assert_eq!(edge_hits.len(), 1);
        }
        assert!((hits[0][0].x + 1.0).abs() < TOL);
        assert!((hits[1][0].y - 1.0).abs() < TOL);
    }

    #[test]
    fn segment_leaves_rect_once() {
        let rect = Rect::from_points(Point2::new(-1.0, -1.0), Point2::new(1.0, 1.0));
        let p = first_rect_crossing(&Line2::from_coords(0.0, 0.0, 3.0, 0.0), &rect).unwrap();
        assert!((p.x - 1.0).abs() < TOL && p.y.abs() < TOL);
        assert!(first_rect_crossing(&Line2::from_coords(2.0, 0.0, 3.0, 0.0), &rect).is_none());
    }

    #[test]
    fn arc_clips_rect_exactly_once() {
        let rect = Rect::from_points(Point2::new(0.5, -0.5), Point2::new(1.5, 0.5));
        // Unit-radius arc starting inside the rect at 0° heading ccw.
        let p = intersect_arc_with_rect_boundary(&Point2::origin(), 1.0, 0.0, 90.0, &rect).unwrap();
        assert!((p.y - 0.5).abs() < 1e-6, "p={p:?}");
        assert!(((p - Point2::origin()).norm() - 1.0).abs() < TOL);
    }

    #[test]
    fn arc_crossing_twice_has_no_clip() {
        let rect = Rect::from_points(Point2::new(0.5, -0.5), Point2::new(1.5, 0.5));
        assert!(
            intersect_arc_with_rect_boundary(&Point2::origin(), 1.0, -90.0, 180.0, &rect).is_none()
        );
    }
}
