//! Parametric tool profiles.
//!
//! Each tool family is a spec struct implementing [`ToolSpec`]. A
//! [`ToolDef`] owns one spec, its half profile and the dimensions annotating
//! it. The profile runs from the tool front on the centerline, up and along
//! the top edge, to the back of the blank and down to the centerline again.
//! Dimension layout reads profile end points by position, so each family's
//! [`ToolSpec::LANDMARKS`] names those positions.

pub mod neck;
pub mod point;
pub mod spindown;
pub mod spindown_tip;
pub mod taper;
pub mod taper_bevel;

pub use neck::NeckSpec;
pub use point::PointSpec;
pub use spindown::SpindownSpec;
pub use spindown_tip::SpindownTipSpec;
pub use taper::TaperSpec;
pub use taper_bevel::TaperBevelSpec;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dimension::arrow::ARROW_LENGTH;
use crate::dimension::{
    label_extent, AngleDim, AngleDimSpec, DimContext, DimFormat, DimRef, Dimension, Force,
    LinearDim, LinearDimSpec, DIM_LABEL_GAP, LEADER_LEN,
};
use crate::error::{GeometryError, Result, ToolError};
use crate::geometry::{Path2d, PathElement};
use crate::math::{Line2, Point2, Vector2};

/// The six tool families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Point,
    Neck,
    Spindown,
    SpindownTip,
    Taper,
    TaperBevel,
}

impl ToolKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Neck => "neck",
            Self::Spindown => "spindown",
            Self::SpindownTip => "spindown_tip",
            Self::Taper => "taper",
            Self::TaperBevel => "taper_bevel",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A dimension annotating one spec field.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDimension {
    pub field: &'static str,
    pub dimension: Dimension,
}

/// Parameters of one tool family.
pub trait ToolSpec: Clone + PartialEq + fmt::Debug {
    const KIND: ToolKind;

    /// Names of the profile end points, in profile order.
    const LANDMARKS: &'static [&'static str];

    /// Field names and values, in display order.
    fn fields(&self) -> Vec<(&'static str, f64)>;

    /// Mutable access to a field by name.
    fn field_mut(&mut self, field: &str) -> Option<&mut f64>;

    /// True if every field is positive and every derived length fits the
    /// blank.
    fn is_buildable(&self) -> bool;

    /// Builds the upper half profile.
    ///
    /// # Errors
    ///
    /// Returns a path error only if the profile could not be started,
    /// which does not happen for a buildable spec.
    fn build_profile(&self) -> Result<Path2d>;

    /// Index of the last profile element ground by rough plunging.
    fn plunge_index(&self) -> usize;

    /// Lays out this family's dimensions on the profile end points.
    ///
    /// # Errors
    ///
    /// Returns an error if `points` does not match the family's profile or
    /// a dimension cannot be laid out.
    fn layout_dimensions(&self, points: &[Point2], ctx: &DimContext<'_>)
        -> Result<Vec<ToolDimension>>;

    fn blank_dia(&self) -> f64;

    fn blank_length(&self) -> f64;

    /// A copy with `field` set to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UnknownField`] if the family has no such field.
    fn with_field(&self, field: &str, value: f64) -> Result<Self> {
        let mut next = self.clone();
        let slot = next.field_mut(field).ok_or_else(|| ToolError::UnknownField {
            kind: Self::KIND.name(),
            field: field.to_string(),
        })?;
        *slot = value;
        Ok(next)
    }

    fn all_positive(&self) -> bool {
        self.fields().iter().all(|&(_, v)| v > 0.0)
    }
}

/// A tool definition: specs, the profile built from them and its
/// dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDef<S: ToolSpec> {
    specs: S,
    profile: Path2d,
    dimensions: Vec<ToolDimension>,
}

impl<S: ToolSpec> ToolDef<S> {
    /// Builds the profile for `specs`.
    ///
    /// Dimensions stay empty until [`ToolDef::update_dimensions`].
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::InvalidSpecs`] if the specs are not buildable.
    pub fn new(specs: S) -> Result<Self> {
        if !specs.is_buildable() {
            return Err(ToolError::InvalidSpecs(S::KIND.name()).into());
        }
        let profile = specs.build_profile()?;
        Ok(Self {
            specs,
            profile,
            dimensions: Vec::new(),
        })
    }

    #[must_use]
    pub fn specs(&self) -> &S {
        &self.specs
    }

    #[must_use]
    pub fn profile(&self) -> &Path2d {
        &self.profile
    }

    #[must_use]
    pub fn path_elements(&self) -> Vec<PathElement> {
        self.profile.elements()
    }

    /// Whether the tool would still be buildable with `field` changed.
    ///
    /// Nothing is modified.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UnknownField`] for a field the family lacks.
    pub fn check_geometry_with(&self, field: &str, value: f64) -> Result<bool> {
        Ok(self.specs.with_field(field, value)?.is_buildable())
    }

    /// Changes one field and rebuilds the profile.
    ///
    /// Dimensions are left as they were; call
    /// [`ToolDef::update_dimensions`] to lay them out again.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UnknownField`] or, when the change would make
    /// the tool unbuildable, [`ToolError::Infeasible`]. The tool is
    /// unchanged on error.
    pub fn set_spec(&mut self, field: &str, value: f64) -> Result<()> {
        let next = self.specs.with_field(field, value)?;
        if !next.is_buildable() {
            return Err(ToolError::Infeasible {
                kind: S::KIND.name(),
                field: field.to_string(),
                value,
            }
            .into());
        }
        if next != self.specs {
            self.profile = next.build_profile()?;
            self.specs = next;
            debug!(kind = %S::KIND, field, value, "tool spec changed");
        }
        Ok(())
    }

    /// Lays out every dimension against the current profile.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension cannot be laid out; the previous
    /// dimensions are kept.
    pub fn update_dimensions(&mut self, ctx: &DimContext<'_>) -> Result<()> {
        self.dimensions = self
            .specs
            .layout_dimensions(&self.profile.end_points(), ctx)?;
        Ok(())
    }

    #[must_use]
    pub fn dimensions(&self) -> &[ToolDimension] {
        &self.dimensions
    }

    /// The dimension annotating `field`, if laid out.
    #[must_use]
    pub fn dimension(&self, field: &str) -> Option<&Dimension> {
        self.dimensions
            .iter()
            .find(|d| d.field == field)
            .map(|d| &d.dimension)
    }

    /// Named profile end points.
    #[must_use]
    pub fn landmarks(&self) -> Vec<(&'static str, Point2)> {
        S::LANDMARKS
            .iter()
            .copied()
            .zip(self.profile.end_points())
            .collect()
    }

    /// The profile end point called `name`.
    #[must_use]
    pub fn landmark(&self, name: &str) -> Option<Point2> {
        self.landmarks()
            .into_iter()
            .find(|&(n, _)| n == name)
            .map(|(_, p)| p)
    }
}

/// Specs of any tool family, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolSpecs {
    Point(PointSpec),
    Neck(NeckSpec),
    Spindown(SpindownSpec),
    SpindownTip(SpindownTipSpec),
    Taper(TaperSpec),
    TaperBevel(TaperBevelSpec),
}

impl ToolSpecs {
    /// Default specs of `kind`.
    #[must_use]
    pub fn default_for(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Point => Self::Point(PointSpec::default()),
            ToolKind::Neck => Self::Neck(NeckSpec::default()),
            ToolKind::Spindown => Self::Spindown(SpindownSpec::default()),
            ToolKind::SpindownTip => Self::SpindownTip(SpindownTipSpec::default()),
            ToolKind::Taper => Self::Taper(TaperSpec::default()),
            ToolKind::TaperBevel => Self::TaperBevel(TaperBevelSpec::default()),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ToolKind {
        match self {
            Self::Point(_) => ToolKind::Point,
            Self::Neck(_) => ToolKind::Neck,
            Self::Spindown(_) => ToolKind::Spindown,
            Self::SpindownTip(_) => ToolKind::SpindownTip,
            Self::Taper(_) => ToolKind::Taper,
            Self::TaperBevel(_) => ToolKind::TaperBevel,
        }
    }
}

/// A tool of any family.
#[derive(Debug, Clone, PartialEq)]
pub enum Tool {
    Point(ToolDef<PointSpec>),
    Neck(ToolDef<NeckSpec>),
    Spindown(ToolDef<SpindownSpec>),
    SpindownTip(ToolDef<SpindownTipSpec>),
    Taper(ToolDef<TaperSpec>),
    TaperBevel(ToolDef<TaperBevelSpec>),
}

macro_rules! each_tool {
    ($tool:expr, $def:ident => $body:expr) => {
        match $tool {
            Tool::Point($def) => $body,
            Tool::Neck($def) => $body,
            Tool::Spindown($def) => $body,
            Tool::SpindownTip($def) => $body,
            Tool::Taper($def) => $body,
            Tool::TaperBevel($def) => $body,
        }
    };
}

impl Tool {
    /// Builds a tool from tagged specs.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::InvalidSpecs`] if the specs are not buildable.
    pub fn new(specs: ToolSpecs) -> Result<Self> {
        Ok(match specs {
            ToolSpecs::Point(s) => Self::Point(ToolDef::new(s)?),
            ToolSpecs::Neck(s) => Self::Neck(ToolDef::new(s)?),
            ToolSpecs::Spindown(s) => Self::Spindown(ToolDef::new(s)?),
            ToolSpecs::SpindownTip(s) => Self::SpindownTip(ToolDef::new(s)?),
            ToolSpecs::Taper(s) => Self::Taper(ToolDef::new(s)?),
            ToolSpecs::TaperBevel(s) => Self::TaperBevel(ToolDef::new(s)?),
        })
    }

    #[must_use]
    pub fn kind(&self) -> ToolKind {
        match self {
            Self::Point(_) => ToolKind::Point,
            Self::Neck(_) => ToolKind::Neck,
            Self::Spindown(_) => ToolKind::Spindown,
            Self::SpindownTip(_) => ToolKind::SpindownTip,
            Self::Taper(_) => ToolKind::Taper,
            Self::TaperBevel(_) => ToolKind::TaperBevel,
        }
    }

    /// A tagged copy of the current specs.
    #[must_use]
    pub fn specs(&self) -> ToolSpecs {
        match self {
            Self::Point(d) => ToolSpecs::Point(*d.specs()),
            Self::Neck(d) => ToolSpecs::Neck(*d.specs()),
            Self::Spindown(d) => ToolSpecs::Spindown(*d.specs()),
            Self::SpindownTip(d) => ToolSpecs::SpindownTip(*d.specs()),
            Self::Taper(d) => ToolSpecs::Taper(*d.specs()),
            Self::TaperBevel(d) => ToolSpecs::TaperBevel(*d.specs()),
        }
    }

    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, f64)> {
        each_tool!(self, d => d.specs().fields())
    }

    #[must_use]
    pub fn profile(&self) -> &Path2d {
        each_tool!(self, d => d.profile())
    }

    #[must_use]
    pub fn path_elements(&self) -> Vec<PathElement> {
        each_tool!(self, d => d.path_elements())
    }

    #[must_use]
    pub fn blank_dia(&self) -> f64 {
        each_tool!(self, d => d.specs().blank_dia())
    }

    #[must_use]
    pub fn blank_length(&self) -> f64 {
        each_tool!(self, d => d.specs().blank_length())
    }

    #[must_use]
    pub fn plunge_index(&self) -> usize {
        each_tool!(self, d => d.specs().plunge_index())
    }

    /// See [`ToolDef::check_geometry_with`].
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UnknownField`] for a field the family lacks.
    pub fn check_geometry_with(&self, field: &str, value: f64) -> Result<bool> {
        each_tool!(self, d => d.check_geometry_with(field, value))
    }

    /// See [`ToolDef::set_spec`].
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UnknownField`] or [`ToolError::Infeasible`].
    pub fn set_spec(&mut self, field: &str, value: f64) -> Result<()> {
        each_tool!(self, d => d.set_spec(field, value))
    }

    /// See [`ToolDef::update_dimensions`].
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension cannot be laid out.
    pub fn update_dimensions(&mut self, ctx: &DimContext<'_>) -> Result<()> {
        each_tool!(self, d => d.update_dimensions(ctx))
    }

    #[must_use]
    pub fn dimensions(&self) -> &[ToolDimension] {
        each_tool!(self, d => d.dimensions())
    }

    #[must_use]
    pub fn landmarks(&self) -> Vec<(&'static str, Point2)> {
        each_tool!(self, d => d.landmarks())
    }
}

/// Axial run-out of a chamfer from `small_dia` up to `big_dia`.
///
/// A 90° chamfer has no run-out.
#[must_use]
pub fn chamfer_length(big_dia: f64, small_dia: f64, chamfer_angle: f64) -> f64 {
    if chamfer_angle < 90.0 {
        (big_dia - small_dia) / 2.0 / chamfer_angle.to_radians().tan()
    } else {
        0.0
    }
}

/// Axial run-out of a taper from `tip_dia` up to `big_dia`.
#[must_use]
pub fn taper_length(big_dia: f64, tip_dia: f64, included_angle: f64) -> f64 {
    (big_dia - tip_dia) / 2.0 / (included_angle / 2.0).to_radians().tan()
}

/// The `N` profile end points a family's dimensions are laid out on.
pub(crate) fn profile_points<const N: usize>(kind: ToolKind, points: &[Point2]) -> Result<[Point2; N]> {
    <[Point2; N]>::try_from(points).map_err(|_| {
        GeometryError::Degenerate(format!(
            "{kind} profile has {} end points, expected {N}",
            points.len()
        ))
        .into()
    })
}

fn mirror(p: Point2) -> Point2 {
    Point2::new(p.x, -p.y)
}

/// Label placement rules shared by the tool families.
///
/// Lengths are in scene units. Arrow extents are taken as the arrow length
/// in both directions.
pub(crate) struct DimStyle<'a, 'c> {
    ctx: &'a DimContext<'c>,
    leader: f64,
    gap: f64,
    arrow: f64,
}

impl<'a, 'c> DimStyle<'a, 'c> {
    pub(crate) fn new(ctx: &'a DimContext<'c>) -> Self {
        Self {
            ctx,
            leader: ctx.pixels_to_scene(LEADER_LEN),
            gap: ctx.pixels_to_scene(DIM_LABEL_GAP),
            arrow: ctx.pixels_to_scene(ARROW_LENGTH),
        }
    }

    pub(crate) fn gap(&self) -> f64 {
        self.gap
    }

    pub(crate) fn leader(&self) -> f64 {
        self.leader
    }

    /// Scene width and height of the label for `value`.
    pub(crate) fn extent(&self, format: DimFormat, value: f64) -> (f64, f64) {
        label_extent(&format.format(value), self.ctx)
    }

    fn linear(&self, field: &'static str, spec: LinearDimSpec) -> Result<ToolDimension> {
        Ok(ToolDimension {
            field,
            dimension: Dimension::Linear(LinearDim::new(spec, self.ctx)?),
        })
    }

    fn angle(&self, field: &'static str, spec: AngleDimSpec) -> Result<ToolDimension> {
        Ok(ToolDimension {
            field,
            dimension: Dimension::Angle(AngleDim::new(spec, self.ctx)?),
        })
    }

    /// Blank diameter at the back corner, label right of the tool.
    ///
    /// A label that does not fit between the arrows drops below the tool.
    pub(crate) fn blank_dia(&self, bd: f64, corner: Point2) -> Result<ToolDimension> {
        let (w, h) = self.extent(DimFormat::DIAMETER_INCH, bd);
        let lx = corner.x + w / 2.0 + self.gap;
        let (ly, outside) = if self.arrow * 2.0 + h + self.gap > bd {
            (-bd / 2.0 - self.leader - h / 2.0, true)
        } else {
            (0.0, false)
        };
        self.linear(
            "blank_dia",
            LinearDimSpec {
                value: bd,
                pos: Point2::new(lx, ly),
                ref1: DimRef::Point(corner),
                ref2: Some(DimRef::Point(mirror(corner))),
                outside,
                format: DimFormat::DIAMETER_INCH,
                force: Some(Force::Vertical),
            },
        )
    }

    /// Axial length above the tool at height `ly`.
    ///
    /// A label that does not fit between the arrows moves left of the
    /// tool front.
    pub(crate) fn length(
        &self,
        field: &'static str,
        value: f64,
        ref1: Point2,
        ref2: Point2,
        ly: f64,
    ) -> Result<ToolDimension> {
        let (w, _) = self.extent(DimFormat::INCH, value);
        let (lx, outside) = if self.arrow * 2.0 + w + self.gap > value {
            (-w / 2.0 - self.leader, true)
        } else {
            (value / 2.0, false)
        };
        self.linear(
            field,
            LinearDimSpec {
                value,
                pos: Point2::new(lx, ly),
                ref1: DimRef::Point(ref1),
                ref2: Some(DimRef::Point(ref2)),
                outside,
                format: DimFormat::INCH,
                force: Some(Force::Horizontal),
            },
        )
    }

    /// Ground diameter measured at `x`, label below the tool at `ly`.
    pub(crate) fn dia_below(&self, field: &'static str, dia: f64, x: f64, ly: f64) -> Result<ToolDimension> {
        self.linear(
            field,
            LinearDimSpec {
                value: dia,
                pos: Point2::new(x, ly),
                ref1: DimRef::Point(Point2::new(x, dia / 2.0)),
                ref2: Some(DimRef::Point(Point2::new(x, -dia / 2.0))),
                outside: true,
                format: DimFormat::DIAMETER_INCH,
                force: Some(Force::Vertical),
            },
        )
    }

    /// Tip diameter at the tool front, label left of the tool.
    pub(crate) fn tip_dia(&self, td: f64, corner: Point2) -> Result<ToolDimension> {
        let (w, h) = self.extent(DimFormat::DIAMETER_INCH, td);
        let lx = -w / 2.0 - self.gap;
        let (ly, outside) = if self.arrow * 2.0 + h + self.gap > td {
            (-td / 2.0 - self.leader - h / 2.0, true)
        } else {
            (0.0, false)
        };
        self.linear(
            "tip_dia",
            LinearDimSpec {
                value: td,
                pos: Point2::new(lx, ly),
                ref1: DimRef::Point(corner),
                ref2: Some(DimRef::Point(mirror(corner))),
                outside,
                format: DimFormat::DIAMETER_INCH,
                force: Some(Force::Vertical),
            },
        )
    }

    /// Included angle of a pointed tip, label left of the tip.
    ///
    /// Arrows go outside when the wedge is too narrow to hold the label.
    pub(crate) fn tip_angle(&self, value: f64, tip: Point2, shoulder: Point2, bd: f64) -> Result<ToolDimension> {
        let (_, h) = self.extent(DimFormat::ANGLE, value);
        let rise = h / 2.0 + self.arrow;
        let v1 = Vector2::new(-bd, rise).normalize();
        let v2 = Vector2::new(-bd, -rise).normalize();
        let needed = v1.dot(&v2).clamp(-1.0, 1.0).acos().to_degrees();
        self.angle(
            "tip_angle",
            AngleDimSpec {
                value,
                pos: Point2::new(-bd / 2.0, 0.0),
                line1: Line2::new(tip, shoulder),
                line2: Line2::new(tip, mirror(shoulder)),
                outside: value < needed,
                quad: Vector2::new(-1.0, 0.0),
                format: DimFormat::ANGLE,
            },
        )
    }

    /// Included angle of a taper, measured on its two mirrored flanks.
    pub(crate) fn included_angle(&self, value: f64, small: Point2, big: Point2, pos: Point2) -> Result<ToolDimension> {
        self.angle(
            "included_angle",
            AngleDimSpec {
                value,
                pos,
                line1: Line2::new(small, big),
                line2: Line2::new(mirror(small), mirror(big)),
                outside: true,
                quad: Vector2::new(1.0, 0.0),
                format: DimFormat::ANGLE,
            },
        )
    }

    /// Chamfer angle on the lower half, between the chamfer and the blank
    /// edge behind it. The label sits left of the chamfer end at `ly`.
    pub(crate) fn chamfer_angle(
        &self,
        value: f64,
        start: Point2,
        end: Point2,
        back_corner: Point2,
        ly: f64,
    ) -> Result<ToolDimension> {
        let (w, _) = self.extent(DimFormat::ANGLE, value);
        self.angle(
            "chamfer_angle",
            AngleDimSpec {
                value,
                pos: Point2::new(end.x - w - self.arrow, ly),
                line1: Line2::new(mirror(end), mirror(back_corner)),
                line2: Line2::new(mirror(start), mirror(end)),
                outside: true,
                quad: Vector2::new(1.0, -1.0),
                format: DimFormat::ANGLE,
            },
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::dimension::MonospaceMetrics;

    const TOL: f64 = 1e-12;

    #[test]
    fn chamfer_of_ninety_degrees_has_no_run_out() {
        assert!(chamfer_length(0.5, 0.3, 90.0).abs() < TOL);
        assert!((chamfer_length(0.5, 0.3, 45.0) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn taper_run_out() {
        let l = taper_length(0.5, 0.25, 90.0);
        assert!((l - 0.125).abs() < 1e-9, "l={l}");
    }

    #[test]
    fn profile_points_checks_count() {
        let pts = [Point2::origin(); 3];
        assert!(profile_points::<3>(ToolKind::Point, &pts).is_ok());
        assert!(profile_points::<4>(ToolKind::Point, &pts).is_err());
    }

    #[test]
    fn tagged_specs_round_trip_through_tool() {
        for kind in [
            ToolKind::Point,
            ToolKind::Neck,
            ToolKind::Spindown,
            ToolKind::SpindownTip,
            ToolKind::Taper,
            ToolKind::TaperBevel,
        ] {
            let specs = ToolSpecs::default_for(kind);
            let tool = Tool::new(specs.clone()).unwrap();
            assert_eq!(tool.kind(), kind);
            assert_eq!(tool.specs(), specs);
            assert!(tool.profile().is_valid());
        }
    }

    #[test]
    fn every_default_tool_lays_out_dimensions() {
        let metrics = MonospaceMetrics::default();
        for scale in [0.0005, 0.002, 0.01] {
            let ctx = DimContext::new(scale, &metrics);
            for kind in [
                ToolKind::Point,
                ToolKind::Neck,
                ToolKind::Spindown,
                ToolKind::SpindownTip,
                ToolKind::Taper,
                ToolKind::TaperBevel,
            ] {
                let mut tool = Tool::new(ToolSpecs::default_for(kind)).unwrap();
                tool.update_dimensions(&ctx).unwrap();
                let fields: Vec<_> = tool.fields().into_iter().map(|(f, _)| f).collect();
                for dim in tool.dimensions() {
                    assert!(fields.contains(&dim.field), "{kind}: stray {}", dim.field);
                }
                assert_eq!(tool.dimensions().len(), fields.len(), "{kind}");
            }
        }
    }

    #[test]
    fn unknown_field_is_reported() {
        let tool = Tool::new(ToolSpecs::default_for(ToolKind::Point)).unwrap();
        assert!(tool.check_geometry_with("neck_dia", 0.2).is_err());
    }

    #[test]
    fn kind_names_match_serde_tags() {
        let json_like = toml::to_string(&ToolSpecs::default_for(ToolKind::SpindownTip)).unwrap();
        assert!(json_like.contains("kind = \"spindown_tip\""), "{json_like}");
        assert_eq!(ToolKind::SpindownTip.to_string(), "spindown_tip");
    }
}
