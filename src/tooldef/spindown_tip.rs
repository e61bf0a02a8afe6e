use serde::{Deserialize, Serialize};

use crate::dimension::DimContext;
use crate::error::Result;
use crate::geometry::Path2d;
use crate::math::angle_2d::tip_length;
use crate::math::Point2;

use super::{profile_points, DimStyle, SpindownSpec, ToolDimension, ToolKind, ToolSpec};

/// A spindown with a point ground on the spun diameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpindownTipSpec {
    pub blank_dia: f64,
    pub blank_length: f64,
    pub spin_dia: f64,
    pub spin_length: f64,
    /// Included angle of the point (degrees).
    pub tip_angle: f64,
    pub chamfer_angle: f64,
}

impl Default for SpindownTipSpec {
    fn default() -> Self {
        Self {
            blank_dia: 0.5,
            blank_length: 3.0,
            spin_dia: 0.375,
            spin_length: 1.0,
            tip_angle: 118.0,
            chamfer_angle: 45.0,
        }
    }
}

impl SpindownTipSpec {
    /// The spindown this tool is ground from.
    #[must_use]
    pub fn spindown(&self) -> SpindownSpec {
        SpindownSpec {
            blank_dia: self.blank_dia,
            blank_length: self.blank_length,
            spin_dia: self.spin_dia,
            spin_length: self.spin_length,
            chamfer_angle: self.chamfer_angle,
        }
    }

    /// Axial length of the point on the spun diameter.
    #[must_use]
    pub fn tip_length(&self) -> f64 {
        if self.tip_angle < 180.0 {
            tip_length(self.tip_angle, self.spin_dia)
        } else {
            0.0
        }
    }
}

impl ToolSpec for SpindownTipSpec {
    const KIND: ToolKind = ToolKind::SpindownTip;
    const LANDMARKS: &'static [&'static str] = &[
        "tip",
        "spin_start",
        "spin_end",
        "chamfer_end",
        "back_corner",
        "back_center",
    ];

    fn fields(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("blank_dia", self.blank_dia),
            ("blank_length", self.blank_length),
            ("spin_dia", self.spin_dia),
            ("spin_length", self.spin_length),
            ("tip_angle", self.tip_angle),
            ("chamfer_angle", self.chamfer_angle),
        ]
    }

    fn field_mut(&mut self, field: &str) -> Option<&mut f64> {
        match field {
            "blank_dia" => Some(&mut self.blank_dia),
            "blank_length" => Some(&mut self.blank_length),
            "spin_dia" => Some(&mut self.spin_dia),
            "spin_length" => Some(&mut self.spin_length),
            "tip_angle" => Some(&mut self.tip_angle),
            "chamfer_angle" => Some(&mut self.chamfer_angle),
            _ => None,
        }
    }

    fn is_buildable(&self) -> bool {
        self.spindown().is_buildable()
            && self.all_positive()
            && self.tip_angle < 180.0
            && self.tip_length() < self.spin_length
    }

    fn build_profile(&self) -> Result<Path2d> {
        let mut path = Path2d::starting_at(Point2::origin());
        path.line_to(self.tip_length(), self.spin_dia / 2.0)?;
        self.spindown().finish_profile(&mut path)?;
        Ok(path)
    }

    fn plunge_index(&self) -> usize {
        3
    }

    fn layout_dimensions(&self, points: &[Point2], ctx: &DimContext<'_>) -> Result<Vec<ToolDimension>> {
        let points = profile_points::<6>(Self::KIND, points)?;
        let style = DimStyle::new(ctx);
        let mut dims = self.spindown().layout_on(points, &style)?;
        dims.push(style.tip_angle(self.tip_angle, points[0], points[1], self.blank_dia)?);
        Ok(dims)
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
    use crate::dimension::{DimRef, Dimension, MonospaceMetrics};
    use crate::tooldef::ToolDef;

    const TOL: f64 = 1e-9;

    #[test]
    fn point_is_ground_on_spun_diameter() {
        let def = ToolDef::new(SpindownTipSpec::default()).unwrap();
        let start = def.landmark("spin_start").unwrap();
        let tl = 0.1875 / 59f64.to_radians().tan();
        assert!((start.x - tl).abs() < TOL, "x={}", start.x);
        assert!((start.y - 0.1875).abs() < TOL);
        assert_eq!(def.profile().len(), 6);
    }

    #[test]
    fn feasibility_adds_tip_rules() {
        let def = ToolDef::new(SpindownTipSpec::default()).unwrap();
        assert!(!def.check_geometry_with("tip_angle", 180.0).unwrap());
        // Point longer than the spun section.
        assert!(!def.check_geometry_with("spin_length", 0.1).unwrap());
        // Inherited from the spindown.
        assert!(!def.check_geometry_with("spin_dia", 0.5).unwrap());
        assert!(def.check_geometry_with("tip_angle", 90.0).unwrap());
    }

    #[test]
    fn spin_length_measured_from_tip() {
        let metrics = MonospaceMetrics::default();
        let ctx = DimContext::new(0.003, &metrics);
        let mut def = ToolDef::new(SpindownTipSpec::default()).unwrap();
        def.update_dimensions(&ctx).unwrap();
        assert_eq!(def.dimensions().len(), 6);
        let Some(Dimension::Linear(sl)) = def.dimension("spin_length") else {
            panic!("spin_length should be linear");
        };
        assert_eq!(sl.spec().ref1, DimRef::Point(Point2::origin()));
        assert!(matches!(def.dimension("tip_angle"), Some(Dimension::Angle(_))));
    }
}
