use serde::{Deserialize, Serialize};

use crate::dimension::{DimContext, DimFormat};
use crate::error::Result;
use crate::geometry::Path2d;
use crate::math::angle_2d::tip_length;
use crate::math::Point2;

use super::{profile_points, DimStyle, ToolDimension, ToolKind, ToolSpec};

/// A pointed tool ground from round stock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointSpec {
    pub blank_dia: f64,
    pub blank_length: f64,
    /// Included angle of the point (degrees).
    pub tip_angle: f64,
}

impl Default for PointSpec {
    fn default() -> Self {
        Self {
            blank_dia: 0.5,
            blank_length: 2.0,
            tip_angle: 118.0,
        }
    }
}

impl PointSpec {
    /// Axial length of the ground point.
    #[must_use]
    pub fn tip_length(&self) -> f64 {
        tip_length(self.tip_angle, self.blank_dia)
    }
}

impl ToolSpec for PointSpec {
    const KIND: ToolKind = ToolKind::Point;
    const LANDMARKS: &'static [&'static str] = &["tip", "shoulder", "back_corner", "back_center"];

    fn fields(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("blank_dia", self.blank_dia),
            ("blank_length", self.blank_length),
            ("tip_angle", self.tip_angle),
        ]
    }

    fn field_mut(&mut self, field: &str) -> Option<&mut f64> {
        match field {
            "blank_dia" => Some(&mut self.blank_dia),
            "blank_length" => Some(&mut self.blank_length),
            "tip_angle" => Some(&mut self.tip_angle),
            _ => None,
        }
    }

    fn is_buildable(&self) -> bool {
        self.all_positive() && self.tip_angle < 180.0 && self.blank_length > self.tip_length()
    }

    fn build_profile(&self) -> Result<Path2d> {
        let br = self.blank_dia / 2.0;
        let mut path = Path2d::starting_at(Point2::origin());
        path.line_to(self.tip_length(), br)?
            .line_to(self.blank_length, br)?
            .line_to(self.blank_length, 0.0)?;
        Ok(path)
    }

    fn plunge_index(&self) -> usize {
        1
    }

    fn layout_dimensions(&self, points: &[Point2], ctx: &DimContext<'_>) -> Result<Vec<ToolDimension>> {
        let [p1, p2, p3, _] = profile_points::<4>(Self::KIND, points)?;
        let style = DimStyle::new(ctx);
        let bd = self.blank_dia;

        let (_, h) = style.extent(DimFormat::INCH, self.blank_length);
        let length_y = bd / 2.0 + h / 2.0 + style.gap();

        Ok(vec![
            style.blank_dia(bd, p3)?,
            style.length("blank_length", self.blank_length, p1, p3, length_y)?,
            style.tip_angle(self.tip_angle, p1, p2, bd)?,
        ])
    }

    fn blank_dia(&self) -> f64 {
        self.blank_dia
    }

    fn blank_length(&self) -> f64 {
        self.blank_length
    }
}
