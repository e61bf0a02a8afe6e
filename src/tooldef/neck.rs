use serde::{Deserialize, Serialize};

use crate::dimension::{DimContext, DimFormat};
use crate::error::Result;
use crate::geometry::Path2d;
use crate::math::Point2;

use super::{chamfer_length, profile_points, DimStyle, ToolDimension, ToolKind, ToolSpec};

/// A necked tool: a full diameter cutting section, a relieved neck behind
/// it and an optional chamfer back up to the blank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeckSpec {
    pub blank_dia: f64,
    pub blank_length: f64,
    pub neck_dia: f64,
    pub cut_length: f64,
    /// Distance from the tool front to the end of the neck.
    pub neck_length: f64,
    /// Chamfer angle from the neck back to the blank (degrees). 90 means no
    /// chamfer.
    pub chamfer_angle: f64,
}

impl Default for NeckSpec {
    fn default() -> Self {
        Self {
            blank_dia: 0.5,
            blank_length: 3.0,
            neck_dia: 0.47,
            cut_length: 1.0,
            neck_length: 2.0,
            chamfer_angle: 45.0,
        }
    }
}

impl NeckSpec {
    #[must_use]
    pub fn chamfer_length(&self) -> f64 {
        chamfer_length(self.blank_dia, self.neck_dia, self.chamfer_angle)
    }
}

impl ToolSpec for NeckSpec {
    const KIND: ToolKind = ToolKind::Neck;
    const LANDMARKS: &'static [&'static str] = &[
        "front_center",
        "front_corner",
        "cut_end",
        "neck_start",
        "neck_end",
        "chamfer_end",
        "back_corner",
        "back_center",
    ];

    fn fields(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("blank_dia", self.blank_dia),
            ("blank_length", self.blank_length),
            ("neck_dia", self.neck_dia),
            ("cut_length", self.cut_length),
            ("neck_length", self.neck_length),
            ("chamfer_angle", self.chamfer_angle),
        ]
    }

    fn field_mut(&mut self, field: &str) -> Option<&mut f64> {
        match field {
            "blank_dia" => Some(&mut self.blank_dia),
            "blank_length" => Some(&mut self.blank_length),
            "neck_dia" => Some(&mut self.neck_dia),
            "cut_length" => Some(&mut self.cut_length),
            "neck_length" => Some(&mut self.neck_length),
            "chamfer_angle" => Some(&mut self.chamfer_angle),
            _ => None,
        }
    }

    fn is_buildable(&self) -> bool {
        self.all_positive()
            && self.neck_dia < self.blank_dia
            && self.blank_length > self.neck_length
            && self.neck_length > self.cut_length
            && self.chamfer_angle <= 90.0
            && self.chamfer_length() < self.blank_length - self.neck_length
    }

    fn build_profile(&self) -> Result<Path2d> {
        let br = self.blank_dia / 2.0;
        let nr = self.neck_dia / 2.0;
        let mut path = Path2d::starting_at(Point2::origin());
        path.line_to(0.0, br)?
            .line_to(self.cut_length, br)?
            .line_to(self.cut_length, nr)?
            .line_to(self.neck_length, nr)?
            .line_to(self.neck_length + self.chamfer_length(), br)?
            .line_to(self.blank_length, br)?
            .line_to(self.blank_length, 0.0)?;
        Ok(path)
    }

    fn plunge_index(&self) -> usize {
        5
    }

    fn layout_dimensions(&self, points: &[Point2], ctx: &DimContext<'_>) -> Result<Vec<ToolDimension>> {
        let [_, p2, p3, _, p5, p6, p7, _] = profile_points::<8>(Self::KIND, points)?;
        let style = DimStyle::new(ctx);
        let bd = self.blank_dia;
        let top = bd / 2.0 + style.gap();

        let (_, h) = style.extent(DimFormat::INCH, self.cut_length);
        let cut = style.length("cut_length", self.cut_length, p2, p3, top + h / 2.0)?;

        let neck_end = if self.chamfer_angle < 90.0 { p5 } else { p6 };
        let (_, h) = style.extent(DimFormat::INCH, self.neck_length);
        let neck = style.length("neck_length", self.neck_length, p2, neck_end, top + h * 2.0)?;

        let (_, h) = style.extent(DimFormat::INCH, self.blank_length);
        let blank = style.length("blank_length", self.blank_length, p2, p7, top + h * 3.5)?;

        let (_, h) = style.extent(DimFormat::DIAMETER_INCH, self.neck_dia);
        let neck_x = self.cut_length + (self.neck_length - self.cut_length) / 2.0;
        let neck_y = -bd / 2.0 - style.leader() - h;
        let neck_dia = style.dia_below("neck_dia", self.neck_dia, neck_x, neck_y)?;

        let (_, h) = style.extent(DimFormat::ANGLE, self.chamfer_angle);
        let chamfer = style.chamfer_angle(self.chamfer_angle, p5, p6, p7, neck_y - h)?;

        Ok(vec![style.blank_dia(bd, p7)?, cut, neck, blank, neck_dia, chamfer])
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
        let def = ToolDef::new(NeckSpec::default()).unwrap();
        let pts = def.profile().end_points();
        assert_eq!(pts.len(), 8);
        assert_eq!(pts[1], Point2::new(0.0, 0.25));
        assert_eq!(pts[2], Point2::new(1.0, 0.25));
        assert_eq!(pts[3], Point2::new(1.0, 0.235));
        assert_eq!(pts[4], Point2::new(2.0, 0.235));
        // 45° chamfer over 0.015 of radial depth.
        assert!((pts[5].x - 2.015).abs() < TOL, "x={}", pts[5].x);
        assert!((pts[5].y - 0.25).abs() < TOL);
        assert_eq!(pts[7], Point2::new(3.0, 0.0));
    }

    #[test]
    fn square_shoulder_without_chamfer() {
        let spec = NeckSpec {
            chamfer_angle: 90.0,
            ..NeckSpec::default()
        };
        let def = ToolDef::new(spec).unwrap();
        assert_eq!(def.landmark("chamfer_end"), Some(Point2::new(2.0, 0.25)));
    }

    #[test]
    fn feasibility_rules() {
        let def = ToolDef::new(NeckSpec::default()).unwrap();
        assert!(!def.check_geometry_with("neck_dia", 0.5).unwrap());
        assert!(!def.check_geometry_with("neck_length", 0.9).unwrap());
        assert!(!def.check_geometry_with("neck_length", 3.0).unwrap());
        assert!(!def.check_geometry_with("chamfer_angle", 91.0).unwrap());
        assert!(!def.check_geometry_with("cut_length", 0.0).unwrap());
        // A shallow chamfer running off the back of the blank.
        assert!(!def.check_geometry_with("chamfer_angle", 0.5).unwrap());
        assert!(def.check_geometry_with("neck_dia", 0.3).unwrap());
    }

    #[test]
    fn plunge_ends_at_chamfer() {
        let def = ToolDef::new(NeckSpec::default()).unwrap();
        assert_eq!(NeckSpec::LANDMARKS[def.specs().plunge_index()], "chamfer_end");
    }

    #[test]
    fn dimensions_are_stacked_above_and_below() {
        let metrics = MonospaceMetrics::default();
        let ctx = DimContext::new(0.003, &metrics);
        let mut def = ToolDef::new(NeckSpec::default()).unwrap();
        def.update_dimensions(&ctx).unwrap();
        assert_eq!(def.dimensions().len(), 6);

        let label_y = |field: &str| match def.dimension(field).unwrap() {
            Dimension::Linear(d) => d.label().pos().y,
            Dimension::Angle(d) => d.label().pos().y,
        };
        assert!(label_y("cut_length") < label_y("neck_length"));
        assert!(label_y("neck_length") < label_y("blank_length"));
        assert!(label_y("neck_dia") < -0.25);
        assert!(label_y("chamfer_angle") < label_y("neck_dia"));

        let Some(Dimension::Linear(nd)) = def.dimension("neck_dia") else {
            panic!("neck_dia should be linear");
        };
        let [a1, a2] = nd.arrows();
        assert!(((a1.tip().y - a2.tip().y).abs() - 0.47).abs() < TOL);
        assert!((a1.tip().x - 1.5).abs() < TOL);
    }
}
