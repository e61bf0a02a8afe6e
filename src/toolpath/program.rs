use tracing::{debug, info};

use crate::error::{Result, ToolpathError};
use crate::math::angle_2d::tip_length;
use crate::program::{
    Angle, Axis1, Axis2Out, BackTaper, Program, RapidIn, RollerOff, RollerOn,
    DEFAULT_AXIS_2_BACKLASH,
};
use crate::tooldef::{
    NeckSpec, PointSpec, SpindownSpec, SpindownTipSpec, TaperBevelSpec, TaperSpec, Tool, ToolSpec,
    ToolSpecs,
};

use super::{GrindSettings, PlungePlan, RoughPlunge};

/// Extra depth past the centerline for finishing moves that run off the
/// front of a pointed tool.
const PAST_CENTER: f64 = 0.01;

/// Retract feed after the neck finishing pass.
const RETRACT_FEED: f64 = 15.0;

/// Builds the grind program for a tool.
///
/// Every program rough plunges the stock down toward the profile, runs one
/// or more finishing moves along it and ends with the rollers off.
#[derive(Debug, Clone)]
pub struct ProgramGenerator<'a> {
    tool: &'a Tool,
    settings: &'a GrindSettings,
    for_sim: bool,
}

impl<'a> ProgramGenerator<'a> {
    /// Creates a new `ProgramGenerator` for a machine program.
    #[must_use]
    pub fn new(tool: &'a Tool, settings: &'a GrindSettings) -> Self {
        Self {
            tool,
            settings,
            for_sim: false,
        }
    }

    /// Generates a simulation program instead: rough plunges stop
    /// [`GrindSettings::sim_offset`] short so the finishing moves show.
    #[must_use]
    pub fn for_simulation(mut self) -> Self {
        self.for_sim = true;
        self
    }

    /// Generates the program.
    ///
    /// # Errors
    ///
    /// Returns a [`ToolpathError`] if the rough plunges cannot be computed,
    /// or [`ToolpathError::WheelTooWide`] for a neck narrower than the
    /// wheel.
    pub fn execute(&self) -> Result<Program> {
        let program = match self.tool.specs() {
            ToolSpecs::Point(s) => self.point(&s)?,
            ToolSpecs::Neck(s) => self.neck(&s)?,
            ToolSpecs::Spindown(s) => self.spindown(&s)?,
            ToolSpecs::SpindownTip(s) => self.spindown_tip(&s)?,
            ToolSpecs::Taper(s) => self.taper(&s)?,
            ToolSpecs::TaperBevel(s) => self.taper_bevel(&s)?,
        };
        info!(
            kind = %self.tool.kind(),
            moves = program.len(),
            sim = self.for_sim,
            "generated program"
        );
        Ok(program)
    }

    fn sim_offset(&self) -> f64 {
        if self.for_sim {
            self.settings.sim_offset
        } else {
            0.0
        }
    }

    fn plunge(&self, last: usize, start_z: Option<f64>) -> Result<PlungePlan> {
        let elements = self.tool.path_elements();
        let op = RoughPlunge::new(&elements, last, self.tool.blank_dia(), self.settings);
        match start_z {
            Some(z) => op.with_start_z(z).execute(),
            None => op.execute(),
        }
    }

    /// Rapid to each plunge station and plunge, without backlash take-up.
    fn push_rough_plunges(&self, program: &mut Program, plan: &PlungePlan) {
        for p in &plan.points {
            program.push(RapidIn {
                rapid_in_to: p.x,
                axis2_backlash: 0.0,
                ..RapidIn::default()
            });
            program.push(Axis1 {
                plunge_to: p.y - self.sim_offset(),
                velocity: self.settings.plunge_feed,
                ..Axis1::default()
            });
        }
        debug!(plunges = plan.points.len(), "rough plunges");
    }

    fn finish_rapid(program: &mut Program, z: f64) {
        program.push(RapidIn {
            rapid_in_to: z,
            ..RapidIn::default()
        });
    }

    /// Square shoulder: plunge straight down without retracting.
    fn square_plunge(program: &mut Program, depth: f64, feed: f64) {
        program.push(Axis1 {
            plunge_to: depth,
            velocity: feed,
            return_to_neg: false,
            ..Axis1::default()
        });
    }

    fn point(&self, s: &PointSpec) -> Result<Program> {
        let tl = tip_length(s.tip_angle, s.blank_dia);
        let passes = self.settings.rough_passes(tl)?.max(1);
        #[allow(clippy::cast_precision_loss)]
        let dz = tl / passes as f64;
        let half = s.tip_angle / 2.0;
        let slope = half.to_radians().tan();
        // Backlash is only taken up when a single pass reaches the finish.
        let first_backlash = if passes == 1 { DEFAULT_AXIS_2_BACKLASH } else { 0.0 };

        let mut program = Program::new();
        program.push(RollerOn::default());
        program.push(RapidIn {
            rapid_in_to: dz,
            axis2_backlash: first_backlash,
            ..RapidIn::default()
        });
        for pass in 1..passes {
            #[allow(clippy::cast_precision_loss)]
            let z = dz * pass as f64;
            program.push(Axis1 {
                plunge_to: (tl - z) * slope - self.sim_offset(),
                velocity: self.settings.plunge_feed,
                ..Axis1::default()
            });
            program.push(RapidIn {
                rapid_in_to: z + dz,
                axis2_backlash: 0.0,
                ..RapidIn::default()
            });
        }
        program.push(Angle {
            angle: half,
            taper_down_to: s.blank_dia / 2.0 + PAST_CENTER,
            velocity: self.settings.seg1_feed,
        });
        program.push(RollerOff::default());
        Ok(program)
    }

    fn neck(&self, s: &NeckSpec) -> Result<Program> {
        let ww = self.settings.wheel_width;
        let neck = s.neck_length - s.cut_length;
        if neck < ww {
            return Err(ToolpathError::WheelTooWide { wheel: ww, neck }.into());
        }
        let start_z = s.cut_length + ww;
        let plan = self.plunge(s.plunge_index(), Some(start_z))?;
        let depth = (s.blank_dia - s.neck_dia) / 2.0;

        let mut program = Program::new();
        program.push(RollerOn::default());
        self.push_rough_plunges(&mut program, &plan);
        let chamfer = if s.chamfer_angle < 90.0 { s.chamfer_length() } else { 0.0 };
        Self::finish_rapid(&mut program, s.neck_length + chamfer);
        if chamfer > 0.0 {
            program.push(Angle {
                angle: s.chamfer_angle,
                taper_down_to: depth,
                velocity: self.settings.seg1_feed,
            });
        } else {
            Self::square_plunge(&mut program, depth, self.settings.seg1_feed);
        }
        program.push(Axis2Out {
            move_out_to: start_z,
            velocity: self.settings.seg2_feed,
        });
        program.push(Axis1 {
            plunge_to: 0.0,
            velocity: RETRACT_FEED,
            return_to_neg: true,
            ..Axis1::default()
        });
        program.push(RollerOff::default());
        Ok(program)
    }

    /// Rough plunges, the shoulder and the back-tapered spun diameter.
    fn spindown_body(&self, s: &SpindownSpec, plunge_index: usize) -> Result<(Program, PlungePlan)> {
        let plan = self.plunge(plunge_index, None)?;
        let &[_, spin_start, _, chamfer_end, ..] = plan.translated.as_slice() else {
            return Err(ToolpathError::IndexOutOfRange {
                index: 3,
                len: plan.translated.len(),
            }
            .into());
        };
        let mut program = Program::new();
        program.push(RollerOn::default());
        self.push_rough_plunges(&mut program, &plan);
        Self::finish_rapid(&mut program, chamfer_end.x);
        let depth = spin_start.y + self.settings.back_taper;
        if s.chamfer_angle < 90.0 {
            program.push(Angle {
                angle: s.chamfer_angle,
                taper_down_to: depth,
                velocity: self.settings.seg1_feed,
            });
        } else {
            Self::square_plunge(&mut program, depth, self.settings.seg1_feed);
        }
        program.push(BackTaper {
            taper_up_to: spin_start.y,
            taper_out_to: spin_start.x,
            velocity: self.settings.seg2_feed,
        });
        Ok((program, plan))
    }

    fn spindown(&self, s: &SpindownSpec) -> Result<Program> {
        let (mut program, _) = self.spindown_body(s, s.plunge_index())?;
        program.push(RollerOff::default());
        Ok(program)
    }

    fn spindown_tip(&self, s: &SpindownTipSpec) -> Result<Program> {
        let (mut program, plan) = self.spindown_body(&s.spindown(), s.plunge_index())?;
        let front = plan.translated.first().map_or(0.0, |p| p.y);
        program.push(Angle {
            angle: s.tip_angle / 2.0,
            taper_down_to: front + PAST_CENTER,
            velocity: self.settings.seg3_feed,
        });
        program.push(RollerOff::default());
        Ok(program)
    }

    fn taper(&self, s: &TaperSpec) -> Result<Program> {
        let plan = self.plunge(s.plunge_index(), None)?;
        let mut program = Program::new();
        program.push(RollerOn::default());
        self.push_rough_plunges(&mut program, &plan);
        Self::finish_rapid(&mut program, s.taper_length());
        program.push(Angle {
            angle: s.included_angle / 2.0,
            taper_down_to: (s.blank_dia - s.tip_dia) / 2.0,
            velocity: self.settings.seg1_feed,
        });
        program.push(RollerOff::default());
        Ok(program)
    }

    fn taper_bevel(&self, s: &TaperBevelSpec) -> Result<Program> {
        let plan = self.plunge(s.plunge_index(), None)?;
        let &[_, _, taper_end, chamfer_end, ..] = plan.translated.as_slice() else {
            return Err(ToolpathError::IndexOutOfRange {
                index: 3,
                len: plan.translated.len(),
            }
            .into());
        };
        let mut program = Program::new();
        program.push(RollerOn::default());
        self.push_rough_plunges(&mut program, &plan);
        Self::finish_rapid(&mut program, chamfer_end.x);
        if s.chamfer_angle < 90.0 {
            program.push(Angle {
                angle: s.chamfer_angle,
                taper_down_to: taper_end.y,
                velocity: self.settings.seg1_feed,
            });
        } else {
            Self::square_plunge(&mut program, taper_end.y, self.settings.seg1_feed);
        }
        program.push(Angle {
            angle: s.included_angle / 2.0,
            taper_down_to: (s.blank_dia - s.tip_dia) / 2.0,
            velocity: self.settings.seg2_feed,
        });
        program.push(RollerOff::default());
        Ok(program)
    }
}
