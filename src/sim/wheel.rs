use crate::error::{GeometryError, Result};
use crate::geometry::Path2d;
use crate::math::Point2;

/// Taper dressed into the wheel face, front to back.
pub const DRESSED_TAPER: f64 = 0.002;

/// A straight 1A1 grinding wheel seen edge on.
///
/// The wheel origin is the lower right corner of its face, the point that
/// machine positions refer to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wheel {
    width: f64,
    dia: f64,
}

impl Wheel {
    /// Creates a wheel.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] unless both sizes are positive.
    pub fn new(width: f64, dia: f64) -> Result<Self> {
        if width <= 0.0 || dia <= 0.0 {
            return Err(
                GeometryError::Degenerate(format!("wheel {width} wide, {dia} diameter")).into(),
            );
        }
        Ok(Self { width, dia })
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn dia(&self) -> f64 {
        self.dia
    }

    /// Closed outline with the origin at `(0, 0)`.
    ///
    /// # Errors
    ///
    /// Propagates path construction errors.
    pub fn outline(&self) -> Result<Path2d> {
        self.outline_at(Point2::origin())
    }

    /// Closed outline with the origin at `pos`.
    ///
    /// # Errors
    ///
    /// Propagates path construction errors.
    pub fn outline_at(&self, pos: Point2) -> Result<Path2d> {
        let mut path = Path2d::starting_at(pos);
        path.line_to(pos.x - self.width, pos.y + DRESSED_TAPER)?
            .line_to(pos.x - self.width, pos.y + self.dia)?
            .line_to(pos.x, pos.y + self.dia)?
            .line_to(pos.x, pos.y)?;
        Ok(path)
    }
}
