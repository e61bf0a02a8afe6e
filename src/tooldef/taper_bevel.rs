use serde::{Deserialize, Serialize};

use crate::dimension::{DimContext, DimFormat};
use crate::error::Result;
use crate::geometry::Path2d;
use crate::math::Point2;

use super::{chamfer_length, profile_points, DimStyle, ToolDimension, ToolKind, ToolSpec};

/// A taper of given length ending below the blank diameter, with a bevel
/// back up to the shank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaperBevelSpec {
    pub blank_dia: f64,
    pub blank_length: f64,
    pub tip_dia: f64,
    pub included_angle: f64,
    pub taper_length: f64,
    /// Bevel angle from the taper end to the blank (degrees). 90 means a
    /// square shoulder.
    pub chamfer_angle: f64,
}

impl Default for TaperBevelSpec {
    fn default() -> Self {
        Self {
            blank_dia: 0.25,
            blank_length: 2.0,
            tip_dia: 0.125,
            included_angle: 7.0,
            taper_length: 0.5,
            chamfer_angle: 30.0,
        }
    }
}

impl TaperBevelSpec {
    /// Diameter at the big end of the taper.
    #[must_use]
    pub fn big_end_dia(&self) -> f64 {
        self.taper_length * (self.included_angle / 2.0).to_radians().tan() * 2.0 + self.tip_dia
    }

    #[must_use]
    pub fn chamfer_length(&self) -> f64 {
        chamfer_length(self.blank_dia, self.big_end_dia(), self.chamfer_angle)
    }
}

impl ToolSpec for TaperBevelSpec {
    const KIND: ToolKind = ToolKind::TaperBevel;
    const LANDMARKS: &'static [&'static str] = &[
        "front_center",
        "tip_corner",
        "taper_end",
        "chamfer_end",
        "back_corner",
        "back_center",
    ];

    fn fields(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("blank_dia", self.blank_dia),
            ("blank_length", self.blank_length),
            ("tip_dia", self.tip_dia),
            ("included_angle", self.included_angle),
            ("taper_length", self.taper_length),
            ("chamfer_angle", self.chamfer_angle),
        ]
    }

    fn field_mut(&mut self, field: &str) -> Option<&mut f64> {
        match field {
            "blank_dia" => Some(&mut self.blank_dia),
            "blank_length" => Some(&mut self.blank_length),
            "tip_dia" => Some(&mut self.tip_dia),
            "included_angle" => Some(&mut self.included_angle),
            "taper_length" => Some(&mut self.taper_length),
            "chamfer_angle" => Some(&mut self.chamfer_angle),
            _ => None,
        }
    }

    fn is_buildable(&self) -> bool {
        self.all_positive()
            && self.chamfer_angle <= 90.0
            && self.big_end_dia() < self.blank_dia
            && self.tip_dia < self.blank_dia
            && self.taper_length < self.blank_length
            && self.included_angle < 180.0
            && self.taper_length + self.chamfer_length() < self.blank_length
    }

    fn build_profile(&self) -> Result<Path2d> {
        let br = self.blank_dia / 2.0;
        let tl = self.taper_length;
        let mut path = Path2d::starting_at(Point2::origin());
        path.line_to(0.0, self.tip_dia / 2.0)?
            .line_to(tl, self.big_end_dia() / 2.0)?
            .line_to(tl + self.chamfer_length(), br)?
            .line_to(self.blank_length, br)?
            .line_to(self.blank_length, 0.0)?;
        Ok(path)
    }

    fn plunge_index(&self) -> usize {
        3
    }

    fn layout_dimensions(&self, points: &[Point2], ctx: &DimContext<'_>) -> Result<Vec<ToolDimension>> {
        let [_, p2, p3, p4, p5, _] = profile_points::<6>(Self::KIND, points)?;
        let style = DimStyle::new(ctx);
        let bd = self.blank_dia;

        #[allow(clippy::float_cmp)]
        let taper_end = if self.chamfer_angle == 90.0 { p4 } else { p3 };
        let (_, h) = style.extent(DimFormat::INCH, self.taper_length);
        let taper_y = bd / 2.0 + h / 2.0 + style.gap();
        let taper = style.length("taper_length", self.taper_length, p2, taper_end, taper_y)?;

        let (_, h) = style.extent(DimFormat::INCH, self.blank_length);
        let blank_y = taper_y + h + style.gap();
        let blank = style.length("blank_length", self.blank_length, p2, p5, blank_y)?;

        let (_, h) = style.extent(DimFormat::ANGLE, self.included_angle);
        let angle_y = -bd / 2.0 - h - style.gap();
        let included = style.included_angle(
            self.included_angle,
            p2,
            p3,
            Point2::new(self.taper_length * 0.3, angle_y),
        )?;

        let (_, h) = style.extent(DimFormat::ANGLE, self.chamfer_angle);
        let chamfer = style.chamfer_angle(self.chamfer_angle, p3, p4, p5, angle_y - h)?;

        Ok(vec![
            style.blank_dia(bd, p5)?,
            taper,
            blank,
            style.tip_dia(self.tip_dia, p2)?,
            included,
            chamfer,
        ])
    }

    fn blank_dia(&self) -> f64 {
        self.blank_dia
    }

    fn blank_length(&self) -> f64 {
        self.blank_length
    }
}
