use crate::error::{PathError, Result};
use crate::math::angle_2d::wrap_degrees;
use crate::math::Point2;

use super::arc::{Arc, ArcDirection};

/// One element of a [`Path2d`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathElement {
    /// A bare point: the start point, or a line from the previous end.
    Point(Point2),
    /// An arc from the previous end to `end` around `center`.
    Arc {
        end: Point2,
        center: Point2,
        direction: ArcDirection,
    },
}

impl PathElement {
    /// The point this element ends at.
    #[must_use]
    pub fn end_point(&self) -> Point2 {
        match *self {
            Self::Point(p) | Self::Arc { end: p, .. } => p,
        }
    }

    #[must_use]
    pub fn is_arc(&self) -> bool {
        matches!(self, Self::Arc { .. })
    }
}

/// A renderable piece of a [`Path2d`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    Line { from: Point2, to: Point2 },
    Arc(Arc),
}

/// An ordered chain of line and arc segments.
///
/// The first element is always a bare point. Elements are only ever
/// appended; [`Path2d::move_to`] starts over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path2d {
    elements: Vec<PathElement>,
}

impl Path2d {
    /// Creates an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a path starting at `start`.
    #[must_use]
    pub fn starting_at(start: Point2) -> Self {
        Self {
            elements: vec![PathElement::Point(start)],
        }
    }

    /// Discards all elements and starts again at `(x, y)`.
    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.elements.clear();
        self.elements.push(PathElement::Point(Point2::new(x, y)));
        self
    }

    /// Appends a line to `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NotStarted`] if the path has no start point.
    pub fn line_to(&mut self, x: f64, y: f64) -> Result<&mut Self> {
        self.ensure_started()?;
        self.elements.push(PathElement::Point(Point2::new(x, y)));
        Ok(self)
    }

    /// Appends an arc ending at `(ex, ey)` around `(cx, cy)`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NotStarted`] if the path has no start point.
    pub fn arc_to(
        &mut self,
        ex: f64,
        ey: f64,
        cx: f64,
        cy: f64,
        direction: ArcDirection,
    ) -> Result<&mut Self> {
        self.ensure_started()?;
        self.elements.push(PathElement::Arc {
            end: Point2::new(ex, ey),
            center: Point2::new(cx, cy),
            direction,
        });
        Ok(self)
    }

    /// True if the path has a start point and at least one segment.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.elements.len() >= 2 && matches!(self.elements[0], PathElement::Point(_))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// A copy of the elements.
    #[must_use]
    pub fn elements(&self) -> Vec<PathElement> {
        self.elements.clone()
    }

    /// Borrowing iterator over the elements.
    pub fn iter(&self) -> impl Iterator<Item = &PathElement> {
        self.elements.iter()
    }

    /// End point of every element, start point included.
    #[must_use]
    pub fn end_points(&self) -> Vec<Point2> {
        self.elements.iter().map(PathElement::end_point).collect()
    }

    /// The path reflected across the X axis. Arc directions flip.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        let flip = |p: Point2| Point2::new(p.x, -p.y);
        let elements = self
            .elements
            .iter()
            .map(|e| match *e {
                PathElement::Point(p) => PathElement::Point(flip(p)),
                PathElement::Arc {
                    end,
                    center,
                    direction,
                } => PathElement::Arc {
                    end: flip(end),
                    center: flip(center),
                    direction: match direction {
                        ArcDirection::Cw => ArcDirection::Ccw,
                        ArcDirection::Ccw => ArcDirection::Cw,
                    },
                },
            })
            .collect();
        Self { elements }
    }

    /// Converts the path to line and arc segments for a renderer.
    ///
    /// Arc radius is the distance from the previous end point to the arc
    /// center. The signed span wraps forward from the start angle for ccw
    /// arcs and backward for cw arcs.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Invalid`] if the path is not valid, or a
    /// geometry error for an arc that starts on its own center.
    pub fn to_segments(&self) -> Result<Vec<PathSegment>> {
        if !self.is_valid() {
            return Err(PathError::Invalid(format!(
                "{} element(s), need a start point and a segment",
                self.elements.len()
            ))
            .into());
        }
        let mut segments = Vec::with_capacity(self.elements.len() - 1);
        let mut prev = self.elements[0].end_point();
        for element in &self.elements[1..] {
            match *element {
                PathElement::Point(p) => {
                    segments.push(PathSegment::Line { from: prev, to: p });
                }
                PathElement::Arc {
                    end,
                    center,
                    direction,
                } => {
                    let radius = (prev - center).norm();
                    let sa = wrap_degrees((prev.y - center.y).atan2(prev.x - center.x).to_degrees());
                    let ea = wrap_degrees((end.y - center.y).atan2(end.x - center.x).to_degrees());
                    let span = match direction {
                        ArcDirection::Ccw => (if ea < sa { ea + 360.0 } else { ea }) - sa,
                        ArcDirection::Cw => -((if sa < ea { sa + 360.0 } else { sa }) - ea),
                    };
                    segments.push(PathSegment::Arc(Arc::new(center, radius, sa, span)?));
                }
            }
            prev = element.end_point();
        }
        Ok(segments)
    }

    fn ensure_started(&self) -> Result<()> {
        if self.elements.is_empty() {
            Err(PathError::NotStarted.into())
        } else {
            Ok(())
        }
    }
}
