//! Replay of move programs for simulation.
//!
//! [`SimReconstruct`] walks a program in execution order, tracking the wheel
//! position, and turns every move into the straight rapids and feeds the
//! machine would make. Positions are in part coordinates: X along the tool
//! from its front face, Y up from the centerline.

pub mod stock;
pub mod wheel;

pub use stock::Stock;
pub use wheel::Wheel;

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{ProgramError, Result};
use crate::math::Point2;
use crate::program::{Move, Program, RollerOff};

/// Feed of rapid and homing moves (inches per minute).
pub const RAPID_FEED: f64 = 15.0;

/// One simulated machine motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimPrimitive {
    /// Wheel at its home position. A program starts and ends at home.
    Home(Point2),
    /// Uncontrolled positioning move.
    Rapid { to: Point2, note: &'static str },
    /// Straight grinding move at `feed` inches per minute.
    Feed {
        to: Point2,
        feed: f64,
        note: &'static str,
    },
    /// Pause, in seconds.
    Dwell(f64),
}

impl SimPrimitive {
    /// Where the wheel is after this primitive, if it moves.
    #[must_use]
    pub fn end_point(&self) -> Option<Point2> {
        match *self {
            Self::Home(p) | Self::Rapid { to: p, .. } | Self::Feed { to: p, .. } => Some(p),
            Self::Dwell(_) => None,
        }
    }
}

/// Rebuilds the wheel motion of a program.
///
/// Order numbers must strictly increase: a program whose moves were
/// rearranged by hand is rejected rather than replayed out of sequence.
/// The home position is set by the last `Off` move and reported at both
/// ends of the replay.
#[derive(Debug, Clone)]
pub struct SimReconstruct<'a> {
    program: &'a Program,
    blank_dia: f64,
}

impl<'a> SimReconstruct<'a> {
    /// Creates a new `SimReconstruct` for a program ground on a blank of
    /// `blank_dia`.
    #[must_use]
    pub fn new(program: &'a Program, blank_dia: f64) -> Self {
        Self { program, blank_dia }
    }

    /// Replays the program.
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::OutOfOrder`] if an order number does not
    /// exceed the one before it, or [`ProgramError::InvalidValue`] for an
    /// `Angle` move whose angle is not in (0, 90] degrees.
    pub fn execute(&self) -> Result<Vec<SimPrimitive>> {
        let br = self.blank_dia / 2.0;
        self.check_order()?;
        let home = self
            .program
            .moves()
            .rev()
            .find_map(|m| match m {
                Move::Off(off) => Some(home_of(off, br)),
                _ => None,
            })
            .unwrap_or_else(Point2::origin);

        let mut out = Vec::new();
        let mut pos = Point2::origin();
        for mv in self.program.moves() {
            replay(mv, br, home, &mut pos, &mut out)?;
        }
        debug!(moves = self.program.len(), primitives = out.len(), "replayed program");
        Ok(out)
    }

    fn check_order(&self) -> Result<()> {
        let mut previous: Option<u32> = None;
        for r in self.program.records() {
            if let Some(p) = previous {
                if r.order <= p {
                    return Err(ProgramError::OutOfOrder {
                        previous: p,
                        found: r.order,
                    }
                    .into());
                }
            }
            previous = Some(r.order);
        }
        Ok(())
    }
}

fn home_of(off: &RollerOff, br: f64) -> Point2 {
    Point2::new(-off.neg_home_axis2, off.neg_home_axis1 + br)
}

fn rapid(out: &mut Vec<SimPrimitive>, to: Point2, note: &'static str) {
    out.push(SimPrimitive::Rapid { to, note });
}

fn feed(out: &mut Vec<SimPrimitive>, to: Point2, feed: f64, note: &'static str) {
    out.push(SimPrimitive::Feed { to, feed, note });
}

#[allow(clippy::float_cmp)]
fn replay(
    mv: &Move,
    br: f64,
    home: Point2,
    pos: &mut Point2,
    out: &mut Vec<SimPrimitive>,
) -> Result<()> {
    match mv {
        Move::On(_) => out.push(SimPrimitive::Home(home)),
        Move::Off(off) => {
            *pos = home_of(off, br);
            out.push(SimPrimitive::Home(*pos));
        }
        Move::Angle(m) => {
            if m.angle.is_nan() || m.angle <= 0.0 || m.angle > 90.0 {
                return Err(ProgramError::InvalidValue {
                    id: "ANGLE".to_string(),
                    value: m.angle.to_string(),
                }
                .into());
            }
            let dy = pos.y - (br - m.taper_down_to);
            pos.x -= dy / m.angle.to_radians().tan();
            pos.y -= dy;
            feed(out, *pos, m.velocity, "angle x and y at feed");
        }
        Move::Axis1(m) => {
            pos.y = br - m.plunge_to;
            feed(out, *pos, m.velocity, "plunge y at feed");
            if m.return_to_neg {
                pos.y = br + m.neg_position;
                rapid(out, *pos, "return to neg");
            }
        }
        Move::Axis2In(m) => {
            pos.x = m.move_in_to + m.axis2_backlash;
            feed(out, *pos, m.velocity, "position x at feed");
            if m.axis2_backlash != 0.0 {
                pos.x -= m.axis2_backlash;
                feed(out, *pos, m.velocity, "take up backlash");
            }
        }
        Move::Axis2Out(m) => {
            pos.x = m.move_out_to;
            feed(out, *pos, m.velocity, "feed x out");
        }
        Move::BackTaper(m) => {
            *pos = Point2::new(m.taper_out_to, br - m.taper_up_to);
            feed(out, *pos, m.velocity, "back taper up");
        }
        Move::LoopPlunge(m) => {
            for _ in 0..m.number_loops {
                pos.x += m.width_of_plunge;
                rapid(out, *pos, "loop position x");
                pos.y = br - m.rapid_down_to;
                rapid(out, *pos, "loop down to blank");
                pos.y = br - m.depth_of_plunge;
                feed(out, *pos, m.velocity, "loop plunge");
                if m.plunge_dwell != 0.0 {
                    out.push(SimPrimitive::Dwell(m.plunge_dwell));
                }
                if m.return_to_neg {
                    pos.y = br + m.neg_position;
                    rapid(out, *pos, "loop return to neg");
                }
            }
        }
        Move::RapidIn(m) => {
            *pos = Point2::new(m.rapid_in_to + m.axis2_backlash, br + m.above_part);
            rapid(out, *pos, "rapid in to x and y");
            if m.axis2_backlash != 0.0 {
                pos.x = m.rapid_in_to;
                rapid(out, *pos, "take up backlash");
            }
            pos.y = br + m.rapid_down_to;
            feed(out, *pos, m.rapid_down_velocity, "down to top of blank");
        }
        Move::CcwRadius(_) | Move::CwRadius(_) => {
            warn!(move_id = mv.id(), "radius moves are not simulated");
        }
        Move::Dwell(m) => out.push(SimPrimitive::Dwell(m.seconds)),
    }
    Ok(())
}

/// Machine time to run the primitives.
///
/// Feeds and rapids take their length over their feed rate, homing moves
/// run at [`RAPID_FEED`] and dwells add their seconds. The first home only
/// places the wheel. Moves with a non-finite time are skipped and the
/// total saturates at [`Duration::MAX`].
#[must_use]
pub fn grind_time(primitives: &[SimPrimitive]) -> Duration {
    let mut pos: Option<Point2> = None;
    let mut secs = 0.0;
    for p in primitives {
        let (to, rate) = match *p {
            SimPrimitive::Dwell(s) => {
                if s.is_finite() {
                    secs += s.max(0.0);
                }
                continue;
            }
            SimPrimitive::Home(to) | SimPrimitive::Rapid { to, .. } => (to, RAPID_FEED),
            SimPrimitive::Feed { to, feed, .. } => (to, feed),
        };
        if let Some(from) = pos {
            let t = (to - from).norm() / rate * 60.0;
            if rate > 0.0 && t.is_finite() {
                secs += t;
            } else if t != 0.0 {
                warn!(?to, rate, "move time is not finite");
            }
        }
        pos = Some(to);
    }
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

/// Formats a duration as `1h 02m 03s`, `2m 03s` or `3s`.
#[must_use]
pub fn format_hms(d: Duration) -> String {
    let total = d.as_secs();
    let (h, m, s) = (total / 3600, total / 60 % 60, total % 60);
    if h > 0 {
        format!("{h}h {m:02}m {s:02}s")
    } else if m > 0 {
        format!("{m}m {s:02}s")
    } else {
        format!("{s}s")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::GrindError;
    use crate::program::{Angle, Axis1, Axis2In, CwRadius, Dwell, LoopPlunge, RapidIn, RollerOn};
    use crate::tooldef::{Tool, ToolKind, ToolSpecs};
    use crate::toolpath::{GrindSettings, ProgramGenerator};
    use approx::assert_relative_eq;

    fn pt(p: &SimPrimitive) -> Point2 {
        p.end_point().unwrap()
    }

    #[test]
    fn replays_plunge_program() {
        let mut program = Program::new();
        program.push(RollerOn::default());
        program.push(RapidIn {
            rapid_in_to: 0.1,
            axis2_backlash: 0.0,
            ..RapidIn::default()
        });
        program.push(Axis1 {
            plunge_to: 0.05,
            velocity: 0.05,
            return_to_neg: false,
            ..Axis1::default()
        });
        program.push(RollerOff::default());

        let prims = SimReconstruct::new(&program, 0.5).execute().unwrap();
        assert_eq!(prims.len(), 5);
        assert_eq!(prims[0], SimPrimitive::Home(Point2::new(-0.5, 1.75)));
        assert!(matches!(prims[1], SimPrimitive::Rapid { .. }));
        assert_relative_eq!(pt(&prims[1]), Point2::new(0.1, 0.26), epsilon = 1e-12);
        let SimPrimitive::Feed { to, feed, .. } = prims[2] else {
            panic!("expected feed down onto the blank");
        };
        assert_relative_eq!(to, Point2::new(0.1, 0.25), epsilon = 1e-12);
        assert_relative_eq!(feed, 0.5);
        assert_relative_eq!(pt(&prims[3]), Point2::new(0.1, 0.2), epsilon = 1e-12);
        assert_eq!(prims[4], SimPrimitive::Home(Point2::new(-0.5, 1.75)));
    }

    #[test]
    fn out_of_order_program_fails() {
        let mut program = Program::new();
        program.push_record(2, Move::On(RollerOn::default()));
        program.push_record(2, Move::Off(RollerOff::default()));
        assert!(matches!(
            SimReconstruct::new(&program, 0.5).execute(),
            Err(GrindError::Program(ProgramError::OutOfOrder {
                previous: 2,
                found: 2
            }))
        ));
    }

    #[test]
    fn home_defaults_to_origin_without_off() {
        let mut program = Program::new();
        program.push(RollerOn::default());
        let prims = SimReconstruct::new(&program, 0.5).execute().unwrap();
        assert_eq!(prims, [SimPrimitive::Home(Point2::origin())]);
    }

    #[test]
    fn last_off_sets_home() {
        let mut program = Program::new();
        program.push(RollerOn::default());
        program.push(RollerOff {
            neg_home_axis1: 1.0,
            neg_home_axis2: 0.25,
            ..RollerOff::default()
        });
        program.push(RollerOff {
            neg_home_axis1: 2.0,
            neg_home_axis2: 0.75,
            ..RollerOff::default()
        });
        let prims = SimReconstruct::new(&program, 0.5).execute().unwrap();
        assert_eq!(
            prims,
            [
                SimPrimitive::Home(Point2::new(-0.75, 2.25)),
                SimPrimitive::Home(Point2::new(-0.25, 1.25)),
                SimPrimitive::Home(Point2::new(-0.75, 2.25)),
            ]
        );
    }

    #[test]
    fn angle_outside_quadrant_is_rejected() {
        for angle in [0.0, -30.0, 90.5, f64::NAN] {
            let mut program = Program::new();
            program.push(RollerOn::default());
            program.push(Angle {
                angle,
                ..Angle::default()
            });
            assert!(
                matches!(
                    SimReconstruct::new(&program, 0.5).execute(),
                    Err(GrindError::Program(ProgramError::InvalidValue { .. }))
                ),
                "angle {angle}"
            );
        }
    }

    #[test]
    fn right_angle_feeds_straight_down() {
        let mut program = Program::new();
        program.push(RapidIn {
            rapid_in_to: 0.5,
            axis2_backlash: 0.0,
            ..RapidIn::default()
        });
        program.push(Angle {
            angle: 90.0,
            taper_down_to: 0.1,
            velocity: 0.05,
        });
        let prims = SimReconstruct::new(&program, 0.5).execute().unwrap();
        let end = pt(prims.last().unwrap());
        assert_relative_eq!(end, Point2::new(0.5, 0.15), epsilon = 1e-9);
        assert!(grind_time(&prims).as_secs_f64().is_finite());
    }

    #[test]
    fn backlash_moves_double_up() {
        let mut program = Program::new();
        program.push(RapidIn {
            rapid_in_to: 1.0,
            ..RapidIn::default()
        });
        program.push(Axis2In {
            move_in_to: 2.0,
            ..Axis2In::default()
        });
        let prims = SimReconstruct::new(&program, 0.5).execute().unwrap();
        assert_eq!(prims.len(), 5);
        assert_relative_eq!(pt(&prims[0]).x, 1.045);
        assert_relative_eq!(pt(&prims[1]).x, 1.0);
        assert_relative_eq!(pt(&prims[3]).x, 2.045);
        assert_relative_eq!(pt(&prims[4]).x, 2.0);
    }

    #[test]
    fn loop_plunge_repeats() {
        let mut program = Program::new();
        program.push(LoopPlunge {
            number_loops: 3,
            width_of_plunge: 0.1,
            depth_of_plunge: 0.02,
            plunge_dwell: 0.5,
            ..LoopPlunge::default()
        });
        let prims = SimReconstruct::new(&program, 0.5).execute().unwrap();
        assert_eq!(prims.len(), 15);
        let dwells = prims.iter().filter(|p| matches!(p, SimPrimitive::Dwell(_))).count();
        assert_eq!(dwells, 3);
        assert_relative_eq!(pt(&prims[10]).x, 0.3, epsilon = 1e-12);
        assert_relative_eq!(pt(&prims[12]).y, 0.23, epsilon = 1e-12);
    }

    #[test]
    fn radius_moves_are_skipped_and_dwell_kept() {
        let mut program = Program::new();
        program.push(CwRadius::default());
        program.push(Dwell { seconds: 2.0 });
        let prims = SimReconstruct::new(&program, 0.5).execute().unwrap();
        assert_eq!(prims, [SimPrimitive::Dwell(2.0)]);
    }

    #[test]
    fn angle_finish_reaches_profile() {
        let settings = GrindSettings::default();
        let tool = Tool::new(ToolSpecs::default_for(ToolKind::Taper)).unwrap();
        let program = ProgramGenerator::new(&tool, &settings)
            .for_simulation()
            .execute()
            .unwrap();
        let prims = SimReconstruct::new(&program, tool.blank_dia()).execute().unwrap();
        let finish = prims
            .iter()
            .rev()
            .find(|p| matches!(p, SimPrimitive::Feed { .. }))
            .unwrap();
        // The finishing angle ends on the tip corner.
        assert_relative_eq!(pt(finish), Point2::new(0.0, 0.125), epsilon = 1e-9);
    }

    #[test]
    fn grind_time_sums_feeds_and_dwells() {
        let prims = [
            SimPrimitive::Home(Point2::new(0.0, 0.0)),
            SimPrimitive::Feed {
                to: Point2::new(1.0, 0.0),
                feed: 1.0,
                note: "",
            },
            SimPrimitive::Dwell(2.0),
            SimPrimitive::Rapid {
                to: Point2::new(1.0, 15.0),
                note: "",
            },
        ];
        assert_relative_eq!(grind_time(&prims).as_secs_f64(), 60.0 + 2.0 + 60.0, epsilon = 1e-9);
    }

    #[test]
    fn grind_time_skips_unbounded_moves() {
        let prims = [
            SimPrimitive::Home(Point2::new(0.0, 0.0)),
            SimPrimitive::Feed {
                to: Point2::new(f64::INFINITY, 0.0),
                feed: 1.0,
                note: "",
            },
            SimPrimitive::Feed {
                to: Point2::new(1.0, 0.0),
                feed: 0.0,
                note: "",
            },
            SimPrimitive::Dwell(f64::INFINITY),
            SimPrimitive::Dwell(3.0),
        ];
        assert_relative_eq!(grind_time(&prims).as_secs_f64(), 3.0, epsilon = 1e-9);
        let long = [
            SimPrimitive::Home(Point2::new(0.0, 0.0)),
            SimPrimitive::Feed {
                to: Point2::new(1e300, 0.0),
                feed: 1.0,
                note: "",
            },
        ];
        assert_eq!(grind_time(&long), Duration::MAX);
    }

    #[test]
    fn formats_hms() {
        assert_eq!(format_hms(Duration::from_secs(7)), "7s");
        assert_eq!(format_hms(Duration::from_secs(125)), "2m 05s");
        assert_eq!(format_hms(Duration::from_secs(3723)), "1h 02m 03s");
        assert_eq!(format_hms(Duration::from_secs(61 * 3600)), "61h 00m 00s");
    }
}
