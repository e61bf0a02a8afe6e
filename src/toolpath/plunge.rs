use tracing::{debug, warn};

use crate::error::{Result, ToolpathError};
use crate::geometry::PathElement;
use crate::math::intersect_2d::segment_segment_intersection;
use crate::math::{Line2, Point2};

use super::GrindSettings;

/// Rough plunge stations and the profile they were found on.
#[derive(Debug, Clone, PartialEq)]
pub struct PlungePlan {
    /// `(z, depth)` of each rough plunge, front to back. Depth is measured
    /// down from the blank surface.
    pub points: Vec<Point2>,
    /// Profile end points with the blank surface moved to Y = 0, so every
    /// ground point has a positive depth.
    pub translated: Vec<Point2>,
}

/// Computes the rough plunges needed to clear stock down to a profile.
///
/// The grind length runs from the tool front, or from `start_z` when set,
/// to the element at `last`. It is divided into equal steps no wider than
/// the wheel width times the overlap. At each station a vertical line is
/// dropped through the translated profile and the first edge it crosses,
/// in profile order, gives the plunge depth.
///
/// Without `start_z` the final station is left to the finishing moves, so
/// `n` steps yield `n - 1` plunges. With `start_z` the first plunge is at
/// `start_z` itself and all `n` stations are kept.
#[derive(Debug, Clone)]
pub struct RoughPlunge<'a> {
    elements: &'a [PathElement],
    last: usize,
    blank_dia: f64,
    settings: &'a GrindSettings,
    start_z: Option<f64>,
}

impl<'a> RoughPlunge<'a> {
    /// Creates a new `RoughPlunge` operation over `elements[..=last]`.
    #[must_use]
    pub fn new(
        elements: &'a [PathElement],
        last: usize,
        blank_dia: f64,
        settings: &'a GrindSettings,
    ) -> Self {
        Self {
            elements,
            last,
            blank_dia,
            settings,
            start_z: None,
        }
    }

    /// Starts the first plunge at `z` instead of one step from the front.
    #[must_use]
    pub fn with_start_z(mut self, z: f64) -> Self {
        self.start_z = Some(z);
        self
    }

    /// Runs the plunge search.
    ///
    /// # Errors
    ///
    /// Returns a [`ToolpathError`] if the profile contains an arc, `last` is
    /// out of range, `start_z` is at or beyond the end of the grind, or the
    /// wheel step is not positive or needs too many passes.
    pub fn execute(&self) -> Result<PlungePlan> {
        let br = self.blank_dia / 2.0;
        let translated = self
            .elements
            .iter()
            .map(|e| match *e {
                PathElement::Point(p) => Ok(Point2::new(p.x, br - p.y)),
                PathElement::Arc { .. } => Err(ToolpathError::ArcUnsupported.into()),
            })
            .collect::<Result<Vec<_>>>()?;

        let target = translated
            .get(self.last)
            .ok_or(ToolpathError::IndexOutOfRange {
                index: self.last,
                len: translated.len(),
            })?
            .x;

        let mut length = target;
        if let Some(start_z) = self.start_z {
            if start_z >= target {
                return Err(ToolpathError::StartBeyondTarget { start_z, length: target }.into());
            }
            length -= start_z;
        }

        let passes = self.settings.rough_passes(length)?;
        if passes == 0 {
            return Ok(PlungePlan {
                points: Vec::new(),
                translated,
            });
        }

        #[allow(clippy::cast_precision_loss)]
        let z_step = length / passes as f64;
        let stations = passes - usize::from(self.start_z.is_none());
        debug!(length, passes, z_step, "rough plunge");

        let mut points = Vec::with_capacity(stations);
        for i in 0..stations {
            #[allow(clippy::cast_precision_loss)]
            let z = match self.start_z {
                Some(start_z) => start_z + z_step * i as f64,
                None => z_step * (i + 1) as f64,
            };
            let station = Line2::from_coords(z, self.blank_dia, z, -self.blank_dia);
            match first_crossing(&translated, &station) {
                Some(p) => {
                    debug!(z = p.x, depth = p.y, "plunge station");
                    points.push(p);
                }
                None => warn!(z, "no profile edge under plunge station"),
            }
        }
        Ok(PlungePlan { points, translated })
    }
}

/// First profile edge, in profile order, crossed by `station`.
///
/// Edges on the blank surface and vertical edges are never ground by a
/// plunge and are skipped.
fn first_crossing(profile: &[Point2], station: &Line2) -> Option<Point2> {
    profile.windows(2).find_map(|pair| {
        let (a, b) = (pair[0], pair[1]);
        #[allow(clippy::float_cmp)]
        let skip = (a.y == 0.0 && b.y == 0.0) || a.x == b.x;
        if skip {
            return None;
        }
        segment_segment_intersection(station, &Line2::new(a, b))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::GrindError;
    use crate::geometry::ArcDirection;
    use crate::tooldef::{NeckSpec, SpindownSpec, ToolDef, ToolSpec};

    const TOL: f64 = 1e-9;

    fn points(coords: &[(f64, f64)]) -> Vec<PathElement> {
        coords
            .iter()
            .map(|&(x, y)| PathElement::Point(Point2::new(x, y)))
            .collect()
    }

    #[test]
    fn arcs_are_rejected() {
        let mut elements = points(&[(0.0, 0.0), (0.0, 0.2)]);
        elements.push(PathElement::Arc {
            end: Point2::new(0.5, 0.25),
            center: Point2::new(0.5, 0.2),
            direction: ArcDirection::Cw,
        });
        let settings = GrindSettings::default();
        let err = RoughPlunge::new(&elements, 2, 0.5, &settings).execute().unwrap_err();
        assert!(matches!(err, GrindError::Toolpath(ToolpathError::ArcUnsupported)));
    }

    #[test]
    fn profile_is_translated_to_blank_surface() {
        let elements = points(&[(0.0, 0.0), (0.0, 0.2), (1.0, 0.2), (1.0, 0.25)]);
        let settings = GrindSettings::default();
        let plan = RoughPlunge::new(&elements, 2, 0.5, &settings).execute().unwrap();
        assert!((plan.translated[0].y - 0.25).abs() < TOL);
        assert!((plan.translated[1].y - 0.05).abs() < TOL);
        assert!(plan.translated[3].y.abs() < TOL);
    }

    #[test]
    fn pass_count_without_start() {
        let def = ToolDef::new(SpindownSpec::default()).unwrap();
        let elements = def.path_elements();
        let settings = GrindSettings::default();
        let index = def.specs().plunge_index();
        let plan = RoughPlunge::new(&elements, index, 0.5, &settings).execute().unwrap();
        let length = elements[index].end_point().x;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n = (length / 0.225).ceil() as usize;
        assert_eq!(plan.points.len(), n - 1);
        // Stations on the spun diameter plunge to its depth.
        let spin_depth = 0.25 - def.specs().spin_dia / 2.0;
        assert!((plan.points[0].y - spin_depth).abs() < TOL);
        // Stations past the spun section land on the chamfer.
        let last = plan.points.last().unwrap();
        assert!(last.y < spin_depth && last.y > 0.0);
    }

    #[test]
    fn pass_count_with_start() {
        let def = ToolDef::new(NeckSpec::default()).unwrap();
        let elements = def.path_elements();
        let settings = GrindSettings::default();
        let start = 1.0 + 0.25;
        let plan = RoughPlunge::new(&elements, 5, 0.5, &settings)
            .with_start_z(start)
            .execute()
            .unwrap();
        let length = elements[5].end_point().x - start;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n = (length / 0.225).ceil() as usize;
        assert_eq!(plan.points.len(), n);
        assert!((plan.points[0].x - start).abs() < TOL);
        for p in &plan.points {
            assert!((p.y - 0.015).abs() < TOL, "depth {}", p.y);
        }
    }

    #[test]
    fn start_beyond_target_fails() {
        let def = ToolDef::new(NeckSpec::default()).unwrap();
        let elements = def.path_elements();
        let settings = GrindSettings::default();
        let err = RoughPlunge::new(&elements, 5, 0.5, &settings)
            .with_start_z(3.0)
            .execute()
            .unwrap_err();
        assert!(matches!(
            err,
            GrindError::Toolpath(ToolpathError::StartBeyondTarget { .. })
        ));
    }

    #[test]
    fn index_out_of_range_fails() {
        let elements = points(&[(0.0, 0.0), (1.0, 0.1)]);
        let settings = GrindSettings::default();
        assert!(RoughPlunge::new(&elements, 7, 0.5, &settings).execute().is_err());
    }

    #[test]
    fn zero_step_fails() {
        let elements = points(&[(0.0, 0.0), (1.0, 0.1)]);
        let settings = GrindSettings {
            wheel_overlap: 0.0,
            ..GrindSettings::default()
        };
        assert!(matches!(
            RoughPlunge::new(&elements, 1, 0.5, &settings).execute(),
            Err(GrindError::Toolpath(ToolpathError::InvalidStep { .. }))
        ));
    }

    #[test]
    fn tiny_step_fails() {
        let elements = points(&[(0.0, 0.0), (1.0, 0.1)]);
        let settings = GrindSettings {
            wheel_width: 1e-9,
            ..GrindSettings::default()
        };
        assert!(matches!(
            RoughPlunge::new(&elements, 1, 0.5, &settings).execute(),
            Err(GrindError::Toolpath(ToolpathError::InvalidStep { .. }))
        ));
    }

    #[test]
    fn first_edge_wins_over_nearer_edge() {
        // Two edges overlap in z; the earlier one is deeper.
        let elements = points(&[(0.0, 0.0), (0.0, 0.1), (1.0, 0.1), (0.5, 0.2), (1.0, 0.2)]);
        let settings = GrindSettings {
            wheel_width: 1.0,
            wheel_overlap: 0.5,
            ..GrindSettings::default()
        };
        let plan = RoughPlunge::new(&elements, 4, 0.5, &settings).execute().unwrap();
        assert_eq!(plan.points.len(), 1);
        assert!((plan.points[0].y - 0.15).abs() < TOL);
    }
}
