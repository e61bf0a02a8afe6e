//! Move templates understood by the grinder controller.
//!
//! Every move carries a fixed set of named variables. Unset variables take
//! the machine defaults given here.

use tracing::warn;

use crate::error::{ProgramError, Result};

/// Default Z axis backlash taken up on moves toward the back of the part.
pub const DEFAULT_AXIS_2_BACKLASH: f64 = 0.045;

/// A variable value as written to a program file.
pub trait VariableValue: Copy {
    fn to_text(self) -> String;

    /// Parses a written value. Every value is read as a number first.
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::InvalidValue`] if `text` is not a number.
    fn from_text(id: &str, text: &str) -> Result<Self>;
}

fn parse_number(id: &str, text: &str) -> Result<f64> {
    match text.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(ProgramError::InvalidValue {
            id: id.to_string(),
            value: text.to_string(),
        }
        .into()),
    }
}

impl VariableValue for f64 {
    fn to_text(self) -> String {
        format!("{self:.5}")
    }

    fn from_text(id: &str, text: &str) -> Result<Self> {
        parse_number(id, text)
    }
}

impl VariableValue for bool {
    fn to_text(self) -> String {
        u8::from(self).to_string()
    }

    fn from_text(id: &str, text: &str) -> Result<Self> {
        let n = parse_number(id, text)?;
        #[allow(clippy::float_cmp)]
        let set = n != 0.0;
        Ok(set)
    }
}

impl VariableValue for u32 {
    fn to_text(self) -> String {
        self.to_string()
    }

    fn from_text(id: &str, text: &str) -> Result<Self> {
        let n = parse_number(id, text)?;
        if n < 0.0 || n > f64::from(u32::MAX) {
            return Err(ProgramError::InvalidValue {
                id: id.to_string(),
                value: text.to_string(),
            }
            .into());
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = n as u32;
        Ok(count)
    }
}

macro_rules! move_template {
    (
        $(#[$meta:meta])*
        $name:ident = $id:literal {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty = $default:expr => $var:literal, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $( $field: $default, )*
                }
            }
        }

        impl $name {
            /// Move id written to program files.
            pub const ID: &'static str = $id;

            /// Variable ids and written values, in template order.
            #[must_use]
            pub fn variables(&self) -> Vec<(&'static str, String)> {
                vec![ $( ($var, self.$field.to_text()), )* ]
            }

            /// Sets one variable from its written value.
            ///
            /// Returns `false` for an id this move does not have.
            ///
            /// # Errors
            ///
            /// Returns [`ProgramError::InvalidValue`] for an unreadable value.
            pub fn set_variable(&mut self, id: &str, text: &str) -> Result<bool> {
                match id {
                    $( $var => self.$field = <$ty as VariableValue>::from_text(id, text)?, )*
                    _ => return Ok(false),
                }
                Ok(true)
            }
        }
    };
}

move_template! {
    /// Program start-up.
    RollerOn = "On" {
        plunge_depth: f64 = 0.0 => "PLUNGE_DEPTH",
        program_loops: u32 = 1 => "PROGRAM_LOOPS",
        final_plunge: f64 = 0.0 => "FINAL_PLUNGE",
        traverse_axis_3: bool = false => "TRAVERSE_AXIS_3",
    }
}

move_template! {
    /// Program end: both axes return home.
    RollerOff = "Off" {
        neg_home_axis1: f64 = 1.5 => "NEG_HOME_AXIS1",
        neg_home_axis2: f64 = 0.5 => "NEG_HOME_AXIS2",
        axis_1_velocity: f64 = 15.0 => "AXIS_1_VELOCITY",
        axis_2_velocity: f64 = 15.0 => "AXIS_2_VELOCITY",
        axis_2_return: bool = true => "AXIS_2_RETURN",
    }
}

move_template! {
    /// Rapid to a Z position above the part, then feed down onto it.
    RapidIn = "RapidIn" {
        above_part: f64 = 0.01 => "ABOVE_PART",
        rapid_down_to: f64 = 0.0 => "RAPID_DOWN_TO",
        rapid_in_to: f64 = 0.0 => "RAPID_IN_TO",
        rapid_down_velocity: f64 = 0.5 => "RAPID_DOWN_VELOCITY",
        axis2_backlash: f64 = DEFAULT_AXIS_2_BACKLASH => "AXIS2_BACKLASH",
    }
}

move_template! {
    /// Y axis plunge, optionally retracting above the part.
    Axis1 = "Axis1" {
        plunge_to: f64 = 0.0 => "PLUNGE_TO",
        velocity: f64 = 0.05 => "VELOCITY_AXIS1",
        return_to_neg: bool = true => "RETURN_TO_NEG",
        neg_position: f64 = 0.01 => "NEG_POSITION",
    }
}

move_template! {
    /// Z axis feed toward the back of the part.
    Axis2In = "Axis2In" {
        move_in_to: f64 = 0.0 => "MOVE_IN_TO",
        velocity: f64 = 5.0 => "VELOCITY_AXIS2",
        axis2_backlash: f64 = DEFAULT_AXIS_2_BACKLASH => "AXIS2_BACKLASH",
    }
}

move_template! {
    /// Z axis feed toward the front of the part.
    Axis2Out = "Axis2Out" {
        move_out_to: f64 = 0.0 => "MOVE_OUT_TO",
        velocity: f64 = 2.0 => "VELOCITY_AXIS2",
    }
}

move_template! {
    /// Feed both axes along an angle down to a depth.
    Angle = "Angle" {
        /// Degrees from the Z axis.
        angle: f64 = 45.0 => "ANGLE",
        taper_down_to: f64 = 0.0 => "TAPER_DOWN_TO",
        velocity: f64 = 0.05 => "TAPER_VELOCITY",
    }
}

move_template! {
    /// Feed toward the front of the part while rising slightly.
    BackTaper = "Back Taper" {
        taper_up_to: f64 = 0.0 => "TAPER_UP_TO",
        taper_out_to: f64 = 0.0 => "TAPER_OUT_TO",
        velocity: f64 = 2.0 => "TAPER_VELOCITY",
    }
}

move_template! {
    /// Repeated step, plunge and retract groove cycle.
    LoopPlunge = "Loop Plunge" {
        rapid_down_to: f64 = 0.0 => "RAPID_DOWN_TO",
        depth_of_plunge: f64 = 0.0 => "DEPTH_OF_PLUNGE",
        velocity: f64 = 0.05 => "VELOCITY_AXIS1",
        width_of_plunge: f64 = 0.0 => "WIDTH_OF_PLUNGE",
        plunge_dwell: f64 = 0.0 => "PLUNGE_DWELL",
        number_loops: u32 = 1 => "NUMBER_LOOPS",
        return_to_neg: bool = true => "RETURN_TO_NEG",
        neg_position: f64 = 0.01 => "NEG_POSITION",
    }
}

move_template! {
    /// Inside corner fillet.
    ///
    /// The radius envelope starts at 270° and sweeps 180° ccw; the
    /// percentages select a portion of it in `[0, 1]`.
    CcwRadius = "CCWRadius" {
        radius: f64 = 0.01 => "RADIUS_VALUE",
        start_percent: f64 = 0.0 => "START_PERCENT",
        end_percent: f64 = 0.5 => "END_PERCENT",
        velocity: f64 = 0.05 => "RADIUS_VELOCITY",
    }
}

move_template! {
    /// Outside corner radius, on the same envelope swept cw.
    CwRadius = "CWRadius" {
        radius: f64 = 0.01 => "RADIUS_VALUE",
        start_percent: f64 = 0.5 => "START_PERCENT",
        end_percent: f64 = 1.0 => "END_PERCENT",
        velocity: f64 = 0.05 => "RADIUS_VELOCITY",
    }
}

move_template! {
    /// Pause, in seconds.
    Dwell = "Dwell" {
        seconds: f64 = 1.0 => "DWELL",
    }
}

/// One machine move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Move {
    On(RollerOn),
    Off(RollerOff),
    RapidIn(RapidIn),
    Axis1(Axis1),
    Axis2In(Axis2In),
    Axis2Out(Axis2Out),
    Angle(Angle),
    BackTaper(BackTaper),
    LoopPlunge(LoopPlunge),
    CcwRadius(CcwRadius),
    CwRadius(CwRadius),
    Dwell(Dwell),
}

macro_rules! each_move {
    ($mv:expr, $m:ident => $body:expr) => {
        match $mv {
            Move::On($m) => $body,
            Move::Off($m) => $body,
            Move::RapidIn($m) => $body,
            Move::Axis1($m) => $body,
            Move::Axis2In($m) => $body,
            Move::Axis2Out($m) => $body,
            Move::Angle($m) => $body,
            Move::BackTaper($m) => $body,
            Move::LoopPlunge($m) => $body,
            Move::CcwRadius($m) => $body,
            Move::CwRadius($m) => $body,
            Move::Dwell($m) => $body,
        }
    };
}

impl Move {
    /// A move with default variables for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::UnknownMove`] for an unknown id.
    pub fn default_for(id: &str) -> Result<Self> {
        Ok(match id {
            RollerOn::ID => Self::On(RollerOn::default()),
            RollerOff::ID => Self::Off(RollerOff::default()),
            RapidIn::ID => Self::RapidIn(RapidIn::default()),
            Axis1::ID => Self::Axis1(Axis1::default()),
            Axis2In::ID => Self::Axis2In(Axis2In::default()),
            Axis2Out::ID => Self::Axis2Out(Axis2Out::default()),
            Angle::ID => Self::Angle(Angle::default()),
            BackTaper::ID => Self::BackTaper(BackTaper::default()),
            LoopPlunge::ID => Self::LoopPlunge(LoopPlunge::default()),
            CcwRadius::ID => Self::CcwRadius(CcwRadius::default()),
            CwRadius::ID => Self::CwRadius(CwRadius::default()),
            Dwell::ID => Self::Dwell(Dwell::default()),
            _ => return Err(ProgramError::UnknownMove(id.to_string()).into()),
        })
    }

    /// Builds a move from written variables. Missing variables keep their
    /// defaults and unknown ones are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::UnknownMove`] or
    /// [`ProgramError::InvalidValue`].
    pub fn from_variables<'v, I>(id: &str, variables: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'v str, &'v str)>,
    {
        let mut mv = Self::default_for(id)?;
        for (var, text) in variables {
            if !mv.set_variable(var, text)? {
                warn!(move_id = id, variable = var, "ignoring unknown variable");
            }
        }
        Ok(mv)
    }

    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::On(_) => RollerOn::ID,
            Self::Off(_) => RollerOff::ID,
            Self::RapidIn(_) => RapidIn::ID,
            Self::Axis1(_) => Axis1::ID,
            Self::Axis2In(_) => Axis2In::ID,
            Self::Axis2Out(_) => Axis2Out::ID,
            Self::Angle(_) => Angle::ID,
            Self::BackTaper(_) => BackTaper::ID,
            Self::LoopPlunge(_) => LoopPlunge::ID,
            Self::CcwRadius(_) => CcwRadius::ID,
            Self::CwRadius(_) => CwRadius::ID,
            Self::Dwell(_) => Dwell::ID,
        }
    }

    #[must_use]
    pub fn variables(&self) -> Vec<(&'static str, String)> {
        each_move!(self, m => m.variables())
    }

    /// See the per-template `set_variable`.
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::InvalidValue`] for an unreadable value.
    pub fn set_variable(&mut self, id: &str, text: &str) -> Result<bool> {
        each_move!(self, m => m.set_variable(id, text))
    }
}
