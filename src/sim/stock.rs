use crate::error::{GeometryError, Result};
use crate::geometry::Path2d;
use crate::math::Point2;

/// Round blank stock, seen from the side with its axis on Y = 0 and its
/// front face at X = 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stock {
    length: f64,
    dia: f64,
}

impl Stock {
    /// Creates a blank.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] unless both sizes are positive.
    pub fn new(length: f64, dia: f64) -> Result<Self> {
        if length <= 0.0 || dia <= 0.0 {
            return Err(
                GeometryError::Degenerate(format!("stock {length} long, {dia} diameter")).into(),
            );
        }
        Ok(Self { length, dia })
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[must_use]
    pub fn dia(&self) -> f64 {
        self.dia
    }

    /// Closed full section, front bottom corner first, drawn clockwise.
    ///
    /// # Errors
    ///
    /// Propagates path construction errors.
    pub fn outline(&self) -> Result<Path2d> {
        let r = self.dia / 2.0;
        let mut path = Path2d::starting_at(Point2::new(0.0, -r));
        path.line_to(0.0, r)?
            .line_to(self.length, r)?
            .line_to(self.length, -r)?
            .line_to(0.0, -r)?;
        Ok(path)
    }
}
