//! Dimension layout: arrows, leaders and extension lines for linear and
//! angle dimensions.
//!
//! Style lengths are given in screen pixels and converted to scene units
//! through a [`DimContext`], so the same dimension lays out differently at
//! different zoom levels.

pub mod angle;
pub mod arrow;
pub mod format;
pub mod label;
pub mod linear;

pub use angle::{AngleDim, AngleDimSpec};
pub use arrow::DimArrow;
pub use format::DimFormat;
pub use label::{label_extent, DimLabel, LabelMetrics, MonospaceMetrics};
pub use linear::{DimRef, Force, LinearDim, LinearDimSpec};

use crate::geometry::Arc;
use crate::math::{Line2, Point2, Vector2};

/// Outside leader length (pixels).
pub const LEADER_LEN: f64 = 30.0;

/// Extension line overshoot past the arrow tip (pixels).
pub const EXTENSION_LINE_EXT: f64 = 7.0;

/// Extension line gap from the reference point (pixels).
pub const EXTENSION_LINE_GAP: f64 = 7.0;

/// Jog line attached to a radius label (pixels).
pub const JOG_LINE_LEN: f64 = 30.0;

/// Padding around a label border (pixels).
pub const DIM_LABEL_GAP: f64 = 15.0;

/// Scene scale and text measurement used to lay out dimensions.
#[derive(Clone, Copy)]
pub struct DimContext<'a> {
    pixel_size: f64,
    metrics: &'a dyn LabelMetrics,
}

impl<'a> DimContext<'a> {
    /// `pixel_size` is the scene length of one screen pixel.
    #[must_use]
    pub fn new(pixel_size: f64, metrics: &'a dyn LabelMetrics) -> Self {
        Self {
            pixel_size,
            metrics,
        }
    }

    #[must_use]
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    #[must_use]
    pub fn metrics(&self) -> &'a dyn LabelMetrics {
        self.metrics
    }

    /// Converts a pixel length to scene units.
    #[must_use]
    pub fn pixels_to_scene(&self, pixels: f64) -> f64 {
        pixels * self.pixel_size
    }
}

impl std::fmt::Debug for DimContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DimContext")
            .field("pixel_size", &self.pixel_size)
            .finish_non_exhaustive()
    }
}

/// A stroked piece of a dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DimPrimitive {
    Line(Line2),
    Arc(Arc),
}

/// Everything a renderer needs to draw one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct DimLayout {
    pub arrows: [DimArrow; 2],
    pub label: DimLabel,
    pub primitives: Vec<DimPrimitive>,
}

impl DimLayout {
    /// Only the line primitives.
    #[must_use]
    pub fn lines(&self) -> Vec<Line2> {
        self.primitives
            .iter()
            .filter_map(|p| match p {
                DimPrimitive::Line(l) => Some(*l),
                DimPrimitive::Arc(_) => None,
            })
            .collect()
    }

    /// Only the arc primitives.
    #[must_use]
    pub fn arcs(&self) -> Vec<Arc> {
        self.primitives
            .iter()
            .filter_map(|p| match p {
                DimPrimitive::Arc(a) => Some(*a),
                DimPrimitive::Line(_) => None,
            })
            .collect()
    }
}

/// A dimension owned by a tool definition.
#[derive(Debug, Clone, PartialEq)]
pub enum Dimension {
    Linear(LinearDim),
    Angle(AngleDim),
}

impl Dimension {
    #[must_use]
    pub fn value(&self) -> f64 {
        match self {
            Self::Linear(d) => d.spec().value,
            Self::Angle(d) => d.spec().value,
        }
    }

    #[must_use]
    pub fn layout(&self) -> &DimLayout {
        match self {
            Self::Linear(d) => d.layout(),
            Self::Angle(d) => d.layout(),
        }
    }
}

/// Unit vector, or zero for a zero vector.
///
/// Layout heuristics compare directions that may legitimately vanish, such
/// as a label sitting on an arrow tip; those comparisons treat the
/// direction as zero instead of failing.
pub(crate) fn unit_or_zero(v: &Vector2) -> Vector2 {
    v.try_normalize(0.0).unwrap_or_else(Vector2::zeros)
}

/// Dot product of the directions of `a` and `b`.
pub(crate) fn direction_dot(a: &Vector2, b: &Vector2) -> f64 {
    unit_or_zero(a).dot(&unit_or_zero(b))
}

/// Appends extension lines from the reference points to the arrow tips.
///
/// Each line starts a gap away from its reference point and overshoots
/// its tip. A line is skipped when its reference is `None` or the tip is
/// within the gap of the reference.
pub(crate) fn push_extension_lines(
    ctx: &DimContext<'_>,
    refs: [Option<Point2>; 2],
    tips: [Point2; 2],
    out: &mut Vec<DimPrimitive>,
) {
    let ext = ctx.pixels_to_scene(EXTENSION_LINE_EXT);
    let gap = ctx.pixels_to_scene(EXTENSION_LINE_GAP);
    for (p, tip) in refs.into_iter().zip(tips) {
        let Some(p) = p else { continue };
        let v = tip - p;
        if v.norm() > gap {
            let n = unit_or_zero(&v);
            out.push(DimPrimitive::Line(Line2::new(p + n * gap, tip + n * ext)));
        }
    }
}

/// Appends a line primitive.
pub(crate) fn push_line(out: &mut Vec<DimPrimitive>, from: Point2, to: Point2) {
    out.push(DimPrimitive::Line(Line2::new(from, to)));
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn extension_lines_gap_and_overshoot() {
        let metrics = MonospaceMetrics::default();
        let ctx = DimContext::new(0.1, &metrics);
        let mut out = Vec::new();
        push_extension_lines(
            &ctx,
            [Some(Point2::new(0.0, 0.0)), None],
            [Point2::new(0.0, 5.0), Point2::new(9.0, 9.0)],
            &mut out,
        );
        assert_eq!(out.len(), 1);
        let DimPrimitive::Line(l) = out[0] else {
            panic!("expected a line");
        };
        assert!((l.p1.y - 0.7).abs() < TOL, "p1={:?}", l.p1);
        assert!((l.p2.y - 5.7).abs() < TOL, "p2={:?}", l.p2);
    }

    #[test]
    fn extension_line_suppressed_inside_gap() {
        let metrics = MonospaceMetrics::default();
        let ctx = DimContext::new(0.1, &metrics);
        let mut out = Vec::new();
        let p = Point2::new(1.0, 1.0);
        push_extension_lines(
            &ctx,
            [Some(p), Some(p)],
            [Point2::new(1.0, 1.5), p],
            &mut out,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn zero_direction_dot_is_zero() {
        assert!(direction_dot(&Vector2::zeros(), &Vector2::new(1.0, 0.0)).abs() < TOL);
        assert!((direction_dot(&Vector2::new(2.0, 0.0), &Vector2::new(5.0, 0.0)) - 1.0).abs() < TOL);
    }
}
