use serde::{Deserialize, Serialize};

use crate::dimension::{DimContext, DimFormat};
use crate::error::Result;
use crate::geometry::Path2d;
use crate::math::Point2;

use super::{chamfer_length, profile_points, DimStyle, ToolDimension, ToolKind, ToolSpec};

/// A tool whose front section is spun down to a smaller diameter, with an
/// optional chamfer back up to the blank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpindownSpec {
    pub blank_dia: f64,
    pub blank_length: f64,
    pub spin_dia: f64,
    pub spin_length: f64,
    /// Chamfer angle from the spun diameter to the blank (degrees). 90
    /// means a square shoulder.
    pub chamfer_angle: f64,
}

impl Default for SpindownSpec {
    fn default() -> Self {
        Self {
            blank_dia: 0.5,
            blank_length: 5.0,
            spin_dia: 0.3125 + 0.005,
            spin_length: 0.515,
            chamfer_angle: 2.0,
        }
    }
}

impl SpindownSpec {
    #[must_use]
    pub fn chamfer_length(&self) -> f64 {
        chamfer_length(self.blank_dia, self.spin_dia, self.chamfer_angle)
    }
}

impl ToolSpec for SpindownSpec {
    const KIND: ToolKind = ToolKind::Spindown;
    const LANDMARKS: &'static [&'static str] = &[
        "front_center",
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
            ("chamfer_angle", self.chamfer_angle),
        ]
    }

    fn field_mut(&mut self, field: &str) -> Option<&mut f64> {
        match field {
            "blank_dia" => Some(&mut self.blank_dia),
            "blank_length" => Some(&mut self.blank_length),
            "spin_dia" => Some(&mut self.spin_dia),
            "spin_length" => Some(&mut self.spin_length),
            "chamfer_angle" => Some(&mut self.chamfer_angle),
            _ => None,
        }
    }

    fn is_buildable(&self) -> bool {
        self.all_positive()
            && self.spin_dia < self.blank_dia
            && self.chamfer_angle <= 90.0
            && self.chamfer_length() < self.blank_length - self.spin_length
    }

    fn build_profile(&self) -> Result<Path2d> {
        let mut path = Path2d::starting_at(Point2::origin());
        path.line_to(0.0, self.spin_dia / 2.0)?;
        self.finish_profile(&mut path)?;
        Ok(path)
    }

    fn plunge_index(&self) -> usize {
        3
    }

    fn layout_dimensions(&self, points: &[Point2], ctx: &DimContext<'_>) -> Result<Vec<ToolDimension>> {
        let points = profile_points::<6>(Self::KIND, points)?;
        self.layout_on(points, &DimStyle::new(ctx))
    }

    fn blank_dia(&self) -> f64 {
        self.blank_dia
    }

    fn blank_length(&self) -> f64 {
        self.blank_length
    }
}

impl SpindownSpec {
    /// Appends the spun section, the chamfer and the back of the blank to
    /// a path ending at the front of the spun diameter.
    pub(crate) fn finish_profile(&self, path: &mut Path2d) -> Result<()> {
        let br = self.blank_dia / 2.0;
        path.line_to(self.spin_length, self.spin_dia / 2.0)?
            .line_to(self.spin_length + self.chamfer_length(), br)?
            .line_to(self.blank_length, br)?
            .line_to(self.blank_length, 0.0)?;
        Ok(())
    }

    /// Blank, spin and chamfer dimensions on a six point spindown profile.
    pub(crate) fn layout_on(&self, points: [Point2; 6], style: &DimStyle<'_, '_>) -> Result<Vec<ToolDimension>> {
        let [p1, p2, p3, p4, p5, _] = points;
        let bd = self.blank_dia;
        let top = bd / 2.0 + style.gap();

        // Measure from the spun diameter unless the front is pointed.
        #[allow(clippy::float_cmp)]
        let front = if p1.x == p2.x { p2 } else { p1 };

        let (_, h) = style.extent(DimFormat::INCH, self.spin_length);
        let spin = style.length("spin_length", self.spin_length, front, p3, top + h / 2.0)?;

        let (_, h) = style.extent(DimFormat::INCH, self.blank_length);
        let blank = style.length("blank_length", self.blank_length, front, p5, top + h * 2.0)?;

        let (_, h) = style.extent(DimFormat::DIAMETER_INCH, self.spin_dia);
        let spin_y = -bd / 2.0 - style.leader() - h;
        let spin_dia = style.dia_below("spin_dia", self.spin_dia, self.spin_length * 0.3, spin_y)?;

        let (_, h) = style.extent(DimFormat::ANGLE, self.chamfer_angle);
        let chamfer = style.chamfer_angle(self.chamfer_angle, p3, p4, p5, -bd - h)?;

        Ok(vec![style.blank_dia(bd, p5)?, spin, blank, spin_dia, chamfer])
    }
}
