use crate::error::{DimensionError, Result};
use crate::geometry::{Arc, ArcDirection};
use crate::math::angle_2d::vector_to_absolute_angle;
use crate::math::distance_2d::is_point_on_segment_default;
use crate::math::intersect_2d::line_line_intersection;
use crate::math::{clamp, Line2, Point2, Rect, Vector2};

use super::{
    push_extension_lines, unit_or_zero, DimArrow, DimContext, DimFormat, DimLabel, DimLayout,
    DimPrimitive, LEADER_LEN,
};

/// Inputs of an [`AngleDim`].
#[derive(Debug, Clone, PartialEq)]
pub struct AngleDimSpec {
    pub value: f64,
    /// Label center in scene coordinates.
    pub pos: Point2,
    pub line1: Line2,
    pub line2: Line2,
    /// Arrows point toward each other from outside the wedge.
    pub outside: bool,
    /// Points into the quadrant being dimensioned, away from the
    /// intersection. Need not be normalized.
    pub quad: Vector2,
    pub format: DimFormat,
}

impl Default for AngleDimSpec {
    fn default() -> Self {
        Self {
            value: 90.0,
            pos: Point2::new(0.5, 0.5),
            line1: Line2::from_coords(-1.0, 0.0, 1.0, 0.0),
            line2: Line2::from_coords(0.0, -1.0, 0.0, 1.0),
            outside: false,
            quad: Vector2::new(0.7071, 0.7071),
            format: DimFormat::ANGLE,
        }
    }
}

/// An angle dimension between two intersecting lines.
///
/// Leaders are arcs around the intersection passing through the label
/// center. "Left" and "right" below are as seen from the intersection
/// looking along the angle bisector.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleDim {
    spec: AngleDimSpec,
    layout: DimLayout,
}

impl AngleDim {
    /// Lays out a new dimension.
    ///
    /// # Errors
    ///
    /// Returns a [`DimensionError`] for a zero-length or parallel
    /// reference line, or a label placed on the intersection.
    pub fn new(spec: AngleDimSpec, ctx: &DimContext<'_>) -> Result<Self> {
        let layout = layout(&spec, ctx)?;
        Ok(Self { spec, layout })
    }

    /// Edits the spec and lays the dimension out again.
    ///
    /// On error the dimension keeps its previous spec and layout.
    ///
    /// # Errors
    ///
    /// Same as [`AngleDim::new`].
    pub fn configure<F>(&mut self, ctx: &DimContext<'_>, edit: F) -> Result<()>
    where
        F: FnOnce(&mut AngleDimSpec),
    {
        let mut spec = self.spec.clone();
        edit(&mut spec);
        self.layout = layout(&spec, ctx)?;
        self.spec = spec;
        Ok(())
    }

    #[must_use]
    pub fn spec(&self) -> &AngleDimSpec {
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

/// Leader arc geometry shared by every branch of the layout.
struct Leaders {
    center: Point2,
    radius: f64,
    label_v: Vector2,
    label_rect: Rect,
    fixed_span: f64,
}

impl Leaders {
    /// Leader from the label toward `to`, clipped at the label border.
    ///
    /// Nothing is drawn when the arc does not leave the label exactly once.
    fn clipped(&self, to: &Vector2, direction: ArcDirection, out: &mut Vec<DimPrimitive>) -> Result<()> {
        let arc = Arc::from_vectors(&self.label_v, to, self.radius, direction)?.with_center(self.center);
        if let Some(clip) = arc.clip_to_rect(&self.label_rect) {
            let leader = Arc::from_vectors(&(clip - self.center), to, self.radius, direction)?
                .with_center(self.center);
            out.push(DimPrimitive::Arc(leader));
        }
        Ok(())
    }

    /// Fixed-length leader starting at the arrow tip along `from`.
    fn fixed(&self, from: &Vector2, sign: f64, out: &mut Vec<DimPrimitive>) -> Result<()> {
        let start = vector_to_absolute_angle(from)?;
        out.push(DimPrimitive::Arc(Arc::new(
            self.center,
            self.radius,
            start,
            sign * self.fixed_span,
        )?));
        Ok(())
    }
}

fn layout(spec: &AngleDimSpec, ctx: &DimContext<'_>) -> Result<DimLayout> {
    let l1 = spec.line1;
    let l2 = spec.line2;
    if l1.is_null() || l2.is_null() {
        return Err(DimensionError::ZeroLengthReference.into());
    }
    let xsect = line_line_intersection(&l1, &l2).ok_or(DimensionError::Parallel)?;
    let label = DimLabel::new(spec.format.format(spec.value), spec.pos, ctx);
    let label_v = spec.pos - xsect;
    let radius = label_v.norm();
    if radius <= 0.0 {
        return Err(DimensionError::LabelAtVertex.into());
    }

    // Law of cosines: the angle subtended by a leader chord.
    let chord = ctx.pixels_to_scene(LEADER_LEN);
    let rsq = radius * radius;
    let res = (2.0 * rsq - chord * chord) / (2.0 * rsq);
    let fixed_span = clamp(res, -1.0, 1.0).acos().to_degrees();

    // Orient both line directions toward the dimensioned quadrant.
    let quad = unit_or_zero(&spec.quad);
    let mut v1 = l1.unit_direction()?;
    let mut v2 = l2.unit_direction()?;
    if v1.dot(&quad) <= 0.0 {
        v1 = -v1;
    }
    if v2.dot(&quad) <= 0.0 {
        v2 = -v2;
    }
    let bisect = unit_or_zero(&(v1 + v2));
    let bisect90 = Vector2::new(-bisect.y, bisect.x);

    let (mut l_line, mut r_line, mut l_v, mut r_v) = (l1, l2, v1, v2);
    if bisect90.dot(&v1) <= 0.0 {
        std::mem::swap(&mut l_line, &mut r_line);
        std::mem::swap(&mut l_v, &mut r_v);
    }
    let l_tip = xsect + l_v * radius;
    let r_tip = xsect + r_v * radius;
    let l_perp = Vector2::new(-l_v.y, l_v.x);
    let r_perp = Vector2::new(r_v.y, -r_v.x);

    let leaders = Leaders {
        center: xsect,
        radius,
        label_v,
        label_rect: label.rect(),
        fixed_span,
    };
    let mut out = Vec::new();
    if label_v.dot(&l_perp) > 0.0 {
        // Label left of the wedge.
        if spec.outside {
            leaders.clipped(&l_v, ArcDirection::Cw, &mut out)?;
            leaders.fixed(&r_v, -1.0, &mut out)?;
        } else {
            leaders.clipped(&r_v, ArcDirection::Cw, &mut out)?;
        }
    } else if label_v.dot(&r_perp) > 0.0 {
        // Label right of the wedge.
        if spec.outside {
            leaders.clipped(&r_v, ArcDirection::Ccw, &mut out)?;
            leaders.fixed(&l_v, 1.0, &mut out)?;
        } else {
            leaders.clipped(&l_v, ArcDirection::Ccw, &mut out)?;
        }
    } else if spec.outside {
        leaders.fixed(&r_v, -1.0, &mut out)?;
        leaders.fixed(&l_v, 1.0, &mut out)?;
    } else {
        leaders.clipped(&l_v, ArcDirection::Ccw, &mut out)?;
        leaders.clipped(&r_v, ArcDirection::Cw, &mut out)?;
    }

    let sign = if spec.outside { -1.0 } else { 1.0 };
    let arrows = [
        DimArrow::new(l_tip, l_perp * sign)?,
        DimArrow::new(r_tip, r_perp * sign)?,
    ];

    let refs = [extension_ref(&l_line, l_tip), extension_ref(&r_line, r_tip)];
    push_extension_lines(ctx, refs, [l_tip, r_tip], &mut out);
    Ok(DimLayout {
        arrows,
        label,
        primitives: out,
    })
}

/// Nearer end of `line` to `tip`, or `None` when the tip is on the line.
fn extension_ref(line: &Line2, tip: Point2) -> Option<Point2> {
    if is_point_on_segment_default(&tip, line) {
        return None;
    }
    if (tip - line.p2).norm() < (tip - line.p1).norm() {
        Some(line.p2)
    } else {
        Some(line.p1)
    }
}
