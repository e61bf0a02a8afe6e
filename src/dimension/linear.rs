use tracing::debug;

use crate::error::{DimensionError, Result};
use crate::math::distance_2d::{closest_point_on_line, lines_collinear};
use crate::math::intersect_2d::first_rect_crossing;
use crate::math::{Line2, Point2, Rect, Vector2};

use super::{
    direction_dot, push_extension_lines, push_line, unit_or_zero, DimArrow, DimContext, DimFormat,
    DimLabel, DimLayout, DimPrimitive, LEADER_LEN,
};

/// Length of the line synthesized through a point reference.
const POINT_LINE_LEN: f64 = 1e-4;

/// Largest `1 - |cos|` between two lines still treated as parallel.
const PARALLEL_EPSILON: f64 = 0.001;

/// A linear dimension reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DimRef {
    Point(Point2),
    Line(Line2),
}

/// Orientation override for two diagonal reference points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Force {
    Horizontal,
    Vertical,
}

/// Inputs of a [`LinearDim`].
#[derive(Debug, Clone, PartialEq)]
pub struct LinearDimSpec {
    pub value: f64,
    /// Label center in scene coordinates.
    pub pos: Point2,
    pub ref1: DimRef,
    /// `None` dimensions the length of a line `ref1`.
    pub ref2: Option<DimRef>,
    /// Arrows point toward each other.
    pub outside: bool,
    pub format: DimFormat,
    pub force: Option<Force>,
}

impl Default for LinearDimSpec {
    fn default() -> Self {
        Self {
            value: 30.0,
            pos: Point2::origin(),
            ref1: DimRef::Point(Point2::new(-15.0, 0.0)),
            ref2: Some(DimRef::Point(Point2::new(15.0, 0.0))),
            outside: false,
            format: DimFormat::MM,
            force: None,
        }
    }
}

/// A linear dimension between points or parallel lines.
///
/// Two reference points that are neither vertically nor horizontally
/// aligned are dimensioned according to where the label sits relative
/// to them. With the points at `O`:
///
/// ```text
///  1 | 2 | 3
/// ---O---+---
///  4 | 5 | 6
/// ---+---O---
///  7 | 8 | 9
/// ```
///
/// regions 4 and 6 give a vertical dimension, 2 and 8 a horizontal one,
/// and the rest a dimension parallel to the line through the points.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearDim {
    spec: LinearDimSpec,
    layout: DimLayout,
}

impl LinearDim {
    /// Lays out a new dimension.
    ///
    /// # Errors
    ///
    /// Returns a [`DimensionError`] if the references cannot be
    /// dimensioned.
    pub fn new(spec: LinearDimSpec, ctx: &DimContext<'_>) -> Result<Self> {
        let layout = layout(&spec, ctx)?;
        Ok(Self { spec, layout })
    }

    /// Edits the spec and lays the dimension out again.
    ///
    /// The edit is applied to a copy; on error the dimension keeps its
    /// previous spec and layout.
    ///
    /// # Errors
    ///
    /// Returns a [`DimensionError`] if the edited references cannot be
    /// dimensioned.
    pub fn configure<F>(&mut self, ctx: &DimContext<'_>, edit: F) -> Result<()>
    where
        F: FnOnce(&mut LinearDimSpec),
    {
        let mut spec = self.spec.clone();
        edit(&mut spec);
        self.layout = layout(&spec, ctx)?;
        self.spec = spec;
        Ok(())
    }

    #[must_use]
    pub fn spec(&self) -> &LinearDimSpec {
        &self.spec
    }

    #[must_use]
    pub fn layout(&self) -> &DimLayout {
        &self.layout
    }

    #[must_use]
    pub fn arrows(&self) -> &[DimArrow; 2] {
        &self.layout.arrows
    }

    #[must_use]
    pub fn label(&self) -> &DimLabel {
        &self.layout.label
    }
}

fn layout(spec: &LinearDimSpec, ctx: &DimContext<'_>) -> Result<DimLayout> {
    let label = DimLabel::new(spec.format.format(spec.value), spec.pos, ctx);
    let builder = Builder {
        ctx,
        spec,
        br: label.rect(),
    };
    let (arrows, primitives) = match (spec.ref1, spec.ref2) {
        (DimRef::Point(p1), Some(DimRef::Point(p2))) => builder.two_points(p1, p2)?,
        (DimRef::Line(l1), Some(DimRef::Line(l2))) => builder.two_lines(&l1, &l2)?,
        (DimRef::Line(l), None) => {
            if l.is_null() {
                return Err(DimensionError::ZeroLengthReference.into());
            }
            builder.two_points(l.p1, l.p2)?
        }
        (DimRef::Point(p), Some(DimRef::Line(l))) | (DimRef::Line(l), Some(DimRef::Point(p))) => {
            builder.point_line(p, &l)?
        }
        (DimRef::Point(_), None) => {
            return Err(DimensionError::IllegalReferences(
                "a point needs a second reference".to_string(),
            )
            .into());
        }
    };
    Ok(DimLayout {
        arrows,
        label,
        primitives,
    })
}

type Parts = ([DimArrow; 2], Vec<DimPrimitive>);

struct Builder<'a, 'c> {
    ctx: &'a DimContext<'c>,
    spec: &'a LinearDimSpec,
    br: Rect,
}

impl Builder<'_, '_> {
    fn two_points(&self, p1: Point2, p2: Point2) -> Result<Parts> {
        let pos = self.spec.pos;
        let force = self.spec.force;
        if p1 == p2 {
            return Err(DimensionError::IdenticalReferences.into());
        }
        #[allow(clippy::float_cmp)]
        let (same_x, same_y) = (p1.x == p2.x, p1.y == p2.y);
        if same_x {
            if force == Some(Force::Horizontal) {
                return Err(DimensionError::CannotForce("horizontal").into());
            }
            return self.vertical(p1, p2);
        }
        if same_y {
            if force == Some(Force::Vertical) {
                return Err(DimensionError::CannotForce("vertical").into());
            }
            return self.horizontal(p1, p2);
        }
        let rect = Rect::from_points(p1, p2);
        let in_rect = rect.contains(&pos);
        match force {
            Some(Force::Vertical) => self.vertical(p1, p2),
            Some(Force::Horizontal) => self.horizontal(p1, p2),
            None if pos.y > rect.min_y() && pos.y < rect.max_y() && !in_rect => {
                self.vertical(p1, p2)
            }
            None if pos.x > rect.min_x() && pos.x < rect.max_x() && !in_rect => {
                self.horizontal(p1, p2)
            }
            None => self.parallel(p1, p2),
        }
    }

    fn vertical(&self, p1: Point2, p2: Point2) -> Result<Parts> {
        let (p1, p2) = if p1.y > p2.y { (p2, p1) } else { (p1, p2) };
        let (px, py) = (self.spec.pos.x, self.spec.pos.y);
        let (y1, y2) = (p1.y, p2.y);
        let (lo, hi) = (self.br.min_y(), self.br.max_y());
        let at = |y: f64| Point2::new(px, y);
        let mut out = Vec::new();
        let arrows = if self.spec.outside {
            let leader = self.ctx.pixels_to_scene(LEADER_LEN);
            if lo > y2 {
                push_line(&mut out, at(lo), at(y2));
                push_line(&mut out, at(y1), at(y1 - leader));
            } else if hi < y1 {
                push_line(&mut out, at(hi), at(y1));
                push_line(&mut out, at(y2), at(y2 + leader));
            } else {
                push_line(&mut out, at(y2), at(y2 + leader));
                push_line(&mut out, at(y1), at(y1 - leader));
            }
            [
                DimArrow::new(at(y1), Vector2::new(0.0, 1.0))?,
                DimArrow::new(at(y2), Vector2::new(0.0, -1.0))?,
            ]
        } else {
            if py > y2 {
                if lo > y1 {
                    push_line(&mut out, at(lo), at(y1));
                }
            } else if py < y1 {
                if hi < y2 {
                    push_line(&mut out, at(hi), at(y2));
                }
            } else {
                if lo > y1 {
                    push_line(&mut out, at(lo), at(y1));
                }
                if hi < y2 {
                    push_line(&mut out, at(hi), at(y2));
                }
            }
            [
                DimArrow::new(at(y1), Vector2::new(0.0, -1.0))?,
                DimArrow::new(at(y2), Vector2::new(0.0, 1.0))?,
            ]
        };
        push_extension_lines(
            self.ctx,
            [Some(p1), Some(p2)],
            [arrows[0].tip(), arrows[1].tip()],
            &mut out,
        );
        Ok((arrows, out))
    }

    fn horizontal(&self, p1: Point2, p2: Point2) -> Result<Parts> {
        let (p1, p2) = if p1.x > p2.x { (p2, p1) } else { (p1, p2) };
        let (px, py) = (self.spec.pos.x, self.spec.pos.y);
        let (x1, x2) = (p1.x, p2.x);
        let (left, right) = (self.br.min_x(), self.br.max_x());
        let at = |x: f64| Point2::new(x, py);
        let mut out = Vec::new();
        let arrows = if self.spec.outside {
            let leader = self.ctx.pixels_to_scene(LEADER_LEN);
            if px > x2 {
                if left > x2 {
                    push_line(&mut out, at(x2), at(left));
                }
                push_line(&mut out, at(x1), at(x1 - leader));
            } else if px < x1 {
                if right < x1 {
                    push_line(&mut out, at(x1), at(right));
                }
                push_line(&mut out, at(x2), at(x2 + leader));
            } else {
                push_line(&mut out, at(x1), at(x1 - leader));
                push_line(&mut out, at(x2), at(x2 + leader));
            }
            [
                DimArrow::new(at(x1), Vector2::new(1.0, 0.0))?,
                DimArrow::new(at(x2), Vector2::new(-1.0, 0.0))?,
            ]
        } else {
            if px > x2 {
                if left > x1 {
                    push_line(&mut out, at(left), at(x1));
                }
            } else if px < x1 {
                if right < x2 {
                    push_line(&mut out, at(right), at(x2));
                }
            } else {
                if right < x2 {
                    push_line(&mut out, at(right), at(x2));
                }
                if left > x1 {
                    push_line(&mut out, at(left), at(x1));
                }
            }
            [
                DimArrow::new(at(x1), Vector2::new(-1.0, 0.0))?,
                DimArrow::new(at(x2), Vector2::new(1.0, 0.0))?,
            ]
        };
        push_extension_lines(
            self.ctx,
            [Some(p1), Some(p2)],
            [arrows[0].tip(), arrows[1].tip()],
            &mut out,
        );
        Ok((arrows, out))
    }

    fn parallel(&self, p1: Point2, p2: Point2) -> Result<Parts> {
        let pos = self.spec.pos;
        let u = unit_or_zero(&(p2 - p1));
        let mp = p1 + u * (pos - p1).dot(&u);
        let sv = pos - mp;
        let ap1 = p1 + sv;
        let ap2 = p2 + sv;
        let lv1 = ap1 - pos;
        let lv2 = ap2 - pos;
        let dim_outside = direction_dot(&lv1, &lv2) >= 0.0;
        let br = &self.br;
        let mut out = Vec::new();
        let arrows = if self.spec.outside {
            let leader = self.ctx.pixels_to_scene(LEADER_LEN);
            if dim_outside {
                let (near, far, npv) = if lv1.norm() > lv2.norm() {
                    (ap2, ap1, u)
                } else {
                    (ap1, ap2, -u)
                };
                match first_rect_crossing(&Line2::new(pos, near), br) {
                    Some(xp) => push_line(&mut out, near, xp),
                    None => push_line(&mut out, near, near + npv * leader),
                }
                push_line(&mut out, far, far - npv * leader);
            } else {
                push_line(&mut out, ap1, ap1 - u * leader);
                push_line(&mut out, ap2, ap2 + u * leader);
            }
            [DimArrow::new(ap1, u)?, DimArrow::new(ap2, -u)?]
        } else {
            if dim_outside {
                let ep = if lv1.norm() > lv2.norm() { ap1 } else { ap2 };
                if let Some(xp) = first_rect_crossing(&Line2::new(pos, ep), br) {
                    push_line(&mut out, xp, ep);
                }
            } else {
                let from1 = first_rect_crossing(&Line2::new(pos, ap1), br).unwrap_or(ap2);
                push_line(&mut out, from1, ap1);
                let from2 = first_rect_crossing(&Line2::new(pos, ap2), br).unwrap_or(ap1);
                push_line(&mut out, from2, ap2);
            }
            [DimArrow::new(ap1, -u)?, DimArrow::new(ap2, u)?]
        };
        push_extension_lines(
            self.ctx,
            [Some(p1), Some(p2)],
            [arrows[0].tip(), arrows[1].tip()],
            &mut out,
        );
        Ok((arrows, out))
    }

    fn two_lines(&self, line1: &Line2, line2: &Line2) -> Result<Parts> {
        if line1.is_null() || line2.is_null() {
            return Err(DimensionError::ZeroLengthReference.into());
        }
        let dp = direction_dot(&(line1.p1 - line1.p2), &(line2.p1 - line2.p2));
        if 1.0 - dp.abs() > PARALLEL_EPSILON {
            return Err(DimensionError::NotParallel.into());
        }
        if lines_collinear(line1, line2) {
            return Err(DimensionError::Collinear.into());
        }
        let pos = self.spec.pos;
        let mut ap1 = closest_point_on_line(&pos, &line1.p1, &line1.p2)?;
        let mut ap2 = closest_point_on_line(&pos, &line2.p1, &line2.p2)?;
        let mut v1 = ap1 - pos;
        let mut v2 = ap2 - pos;
        let (mut l1, mut l2) = (line1, line2);
        if v1.norm() > v2.norm() {
            std::mem::swap(&mut v1, &mut v2);
            std::mem::swap(&mut ap1, &mut ap2);
            std::mem::swap(&mut l1, &mut l2);
        }
        let dim_outside = direction_dot(&v1, &v2) >= 0.0;
        let br = &self.br;
        let mut out = Vec::new();
        let arrows = if self.spec.outside {
            let leader = self.ctx.pixels_to_scene(LEADER_LEN);
            if dim_outside {
                if let Some(xp) = first_rect_crossing(&Line2::new(pos, ap1), br) {
                    push_line(&mut out, xp, ap1);
                }
                push_line(&mut out, ap2, ap2 + unit_or_zero(&v2) * leader);
                [DimArrow::new(ap1, v1)?, DimArrow::new(ap2, -v2)?]
            } else {
                push_line(&mut out, ap2, ap2 + unit_or_zero(&v2) * leader);
                push_line(&mut out, ap1, ap1 + unit_or_zero(&v1) * leader);
                [DimArrow::new(ap1, -v1)?, DimArrow::new(ap2, -v2)?]
            }
        } else if dim_outside {
            if let Some(xp) = first_rect_crossing(&Line2::new(pos, ap2), br) {
                push_line(&mut out, xp, ap2);
            }
            [DimArrow::new(ap1, -v1)?, DimArrow::new(ap2, v2)?]
        } else {
            for ap in [ap1, ap2] {
                if let Some(xp) = first_rect_crossing(&Line2::new(pos, ap), br) {
                    push_line(&mut out, xp, ap);
                }
            }
            [DimArrow::new(ap1, v1)?, DimArrow::new(ap2, v2)?]
        };
        let refs = [Some(extension_ref(l1, ap1)), Some(extension_ref(l2, ap2))];
        push_extension_lines(self.ctx, refs, [ap1, ap2], &mut out);
        Ok((arrows, out))
    }

    fn point_line(&self, point: Point2, line: &Line2) -> Result<Parts> {
        if line.is_null() {
            return Err(DimensionError::ZeroLengthReference.into());
        }
        let v = unit_or_zero(&line.vector());
        let through = Line2::new(point, point + v * POINT_LINE_LEN);
        debug!(?point, "dimensioning point against line");
        self.two_lines(line, &through)
    }
}

/// Reference point for an extension line to an arrow tip on `line`.
///
/// A tip inside the segment needs no extension; otherwise the extension
/// starts at the nearer segment end.
fn extension_ref(line: &Line2, tip: Point2) -> Point2 {
    let mut v1 = line.p1 - tip;
    let mut v2 = line.p2 - tip;
    let off_line = direction_dot(&v1, &v2) >= 0.0;
    if v1.norm() > v2.norm() {
        std::mem::swap(&mut v1, &mut v2);
    }
    if off_line {
        tip + v1
    } else {
        tip
    }
}
