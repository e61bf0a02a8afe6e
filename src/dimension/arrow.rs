use crate::error::Result;
use crate::math::{unit, Point2, Rect, Vector2};

use super::DimContext;

/// Arrow head length in pixels.
pub const ARROW_LENGTH: f64 = 14.0;

/// Arrow head base width in pixels.
pub const ARROW_WIDTH: f64 = 5.0;

/// A dimension arrow head: tip position and pointing direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimArrow {
    tip: Point2,
    direction: Vector2,
}

impl DimArrow {
    /// Creates an arrow whose tip sits at `tip` and points along `direction`.
    ///
    /// # Errors
    ///
    /// Returns an error if `direction` has zero length.
    pub fn new(tip: Point2, direction: Vector2) -> Result<Self> {
        Ok(Self {
            tip,
            direction: unit(&direction)?,
        })
    }

    #[must_use]
    pub fn tip(&self) -> Point2 {
        self.tip
    }

    /// Unit pointing direction.
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        self.direction
    }

    /// Pointing direction in degrees, `atan2` convention.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.direction.y.atan2(self.direction.x).to_degrees()
    }

    /// Triangle outline in scene units: tip, then the two base corners.
    #[must_use]
    pub fn outline(&self, ctx: &DimContext<'_>) -> [Point2; 3] {
        let back = -self.direction * ctx.pixels_to_scene(ARROW_LENGTH);
        let side = Vector2::new(-self.direction.y, self.direction.x)
            * ctx.pixels_to_scene(ARROW_WIDTH / 2.0);
        [self.tip, self.tip + back + side, self.tip + back - side]
    }

    /// Axis-aligned bounds of [`DimArrow::outline`].
    #[must_use]
    pub fn bounding_rect(&self, ctx: &DimContext<'_>) -> Rect {
        let [a, b, c] = self.outline(ctx);
        let min = Point2::new(a.x.min(b.x).min(c.x), a.y.min(b.y).min(c.y));
        let max = Point2::new(a.x.max(b.x).max(c.x), a.y.max(b.y).max(c.y));
        Rect::from_points(min, max)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::dimension::MonospaceMetrics;

    const TOL: f64 = 1e-12;

    #[test]
    fn zero_direction_is_rejected() {
        assert!(DimArrow::new(Point2::origin(), Vector2::zeros()).is_err());
    }

    #[test]
    fn direction_is_normalized() {
        let a = DimArrow::new(Point2::origin(), Vector2::new(0.0, -3.0)).unwrap();
        assert!((a.direction().y + 1.0).abs() < TOL);
        assert!((a.rotation() + 90.0).abs() < TOL);
    }

    #[test]
    fn horizontal_arrow_bounds() {
        let metrics = MonospaceMetrics::default();
        let ctx = DimContext::new(0.1, &metrics);
        let a = DimArrow::new(Point2::new(1.0, 1.0), Vector2::new(1.0, 0.0)).unwrap();
        let r = a.bounding_rect(&ctx);
        assert!((r.width() - 1.4).abs() < TOL, "w={}", r.width());
        assert!((r.height() - 0.5).abs() < TOL, "h={}", r.height());
        assert!((r.max_x() - 1.0).abs() < TOL);
    }
}
