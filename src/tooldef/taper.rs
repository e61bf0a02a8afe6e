use serde::{Deserialize, Serialize};

use crate::dimension::{DimContext, DimFormat};
use crate::error::Result;
use crate::geometry::Path2d;
use crate::math::Point2;

use super::{profile_points, taper_length, DimStyle, ToolDimension, ToolKind, ToolSpec};

/// A tool tapered from a flat tip up to the blank diameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaperSpec {
    pub blank_dia: f64,
    pub blank_length: f64,
    pub tip_dia: f64,
    /// Included angle of the taper (degrees).
    pub included_angle: f64,
}

impl Default for TaperSpec {
    fn default() -> Self {
        Self {
            blank_dia: 0.5,
            blank_length: 3.0,
            tip_dia: 0.25,
            included_angle: 7.0,
        }
    }
}

impl TaperSpec {
    /// Axial length of the taper.
    #[must_use]
    pub fn taper_length(&self) -> f64 {
        taper_length(self.blank_dia, self.tip_dia, self.included_angle)
    }
}

impl ToolSpec for TaperSpec {
    const KIND: ToolKind = ToolKind::Taper;
    const LANDMARKS: &'static [&'static str] =
        &["front_center", "tip_corner", "taper_end", "back_corner", "back_center"];

    fn fields(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("blank_dia", self.blank_dia),
            ("blank_length", self.blank_length),
            ("tip_dia", self.tip_dia),
            ("included_angle", self.included_angle),
        ]
    }

    fn field_mut(&mut self, field: &str) -> Option<&mut f64> {
        match field {
            "blank_dia" => Some(&mut self.blank_dia),
            "blank_length" => Some(&mut self.blank_length),
            "tip_dia" => Some(&mut self.tip_dia),
            "included_angle" => Some(&mut self.included_angle),
            _ => None,
        }
    }

    fn is_buildable(&self) -> bool {
        self.all_positive()
            && self.tip_dia < self.blank_dia
            && self.taper_length() < self.blank_length
            && self.included_angle < 180.0
    }

    fn build_profile(&self) -> Result<Path2d> {
        let br = self.blank_dia / 2.0;
        let mut path = Path2d::starting_at(Point2::origin());
        path.line_to(0.0, self.tip_dia / 2.0)?
            .line_to(self.taper_length(), br)?
            .line_to(self.blank_length, br)?
            .line_to(self.blank_length, 0.0)?;
        Ok(path)
    }

    fn plunge_index(&self) -> usize {
        2
    }

    fn layout_dimensions(&self, points: &[Point2], ctx: &DimContext<'_>) -> Result<Vec<ToolDimension>> {
        let [_, p2, p3, p4, _] = profile_points::<5>(Self::KIND, points)?;
        let style = DimStyle::new(ctx);
        let bd = self.blank_dia;

        let (_, h) = style.extent(DimFormat::INCH, self.blank_length);
        let length_y = bd / 2.0 + h / 2.0 + style.gap();

        Ok(vec![
            style.blank_dia(bd, p4)?,
            style.length("blank_length", self.blank_length, p2, p4, length_y)?,
            style.tip_dia(self.tip_dia, p2)?,
            style.included_angle(self.included_angle, p2, p3, Point2::new(p3.x * 1.25, -bd))?,
        ])
    }

    fn blank_dia(&self) -> f64 {
        self.blank_dia
    }

    fn blank_length(&self) -> f64 {
        self.blank_length
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::dimension::{Dimension, MonospaceMetrics};
    use crate::tooldef::ToolDef;

    const TOL: f64 = 1e-9;

    #[test]
    fn default_profile() {
        let def = ToolDef::new(TaperSpec::default()).unwrap();
        let pts = def.profile().end_points();
        assert_eq!(pts.len(), 5);
        assert_eq!(pts[1], Point2::new(0.0, 0.125));
        let dx = 0.125 / 3.5f64.to_radians().tan();
        assert!((pts[2].x - dx).abs() < TOL, "x={}", pts[2].x);
        assert!((pts[2].y - 0.25).abs() < TOL);
    }

    #[test]
    fn feasibility_rules() {
        let def = ToolDef::new(TaperSpec::default()).unwrap();
        assert!(!def.check_geometry_with("tip_dia", 0.5).unwrap());
        assert!(!def.check_geometry_with("included_angle", 180.0).unwrap());
        // A 1° taper is about 14 long.
        assert!(!def.check_geometry_with("included_angle", 1.0).unwrap());
        assert!(def.check_geometry_with("included_angle", 30.0).unwrap());
    }

    #[test]
    fn included_angle_is_measured_on_both_flanks() {
        let metrics = MonospaceMetrics::default();
        let ctx = DimContext::new(0.004, &metrics);
        let mut def = ToolDef::new(TaperSpec::default()).unwrap();
        def.update_dimensions(&ctx).unwrap();
        assert_eq!(def.dimensions().len(), 4);
        let Some(Dimension::Angle(ia)) = def.dimension("included_angle") else {
            panic!("included_angle should be an angle");
        };
        let l1 = ia.spec().line1;
        let l2 = ia.spec().line2;
        assert!((l1.p1.y + l2.p1.y).abs() < TOL);
        assert!((l1.p2.y + l2.p2.y).abs() < TOL);
        assert!(matches!(def.dimension("tip_dia"), Some(Dimension::Linear(_))));
    }
}
