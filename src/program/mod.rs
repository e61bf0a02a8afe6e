//! Ordered move programs for the grinder controller.

pub mod moves;
pub mod xml;

pub use moves::{
    Angle, Axis1, Axis2In, Axis2Out, BackTaper, CcwRadius, CwRadius, Dwell, LoopPlunge, Move,
    RapidIn, RollerOff, RollerOn, DEFAULT_AXIS_2_BACKLASH,
};

/// A move and its position in the program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveRecord {
    /// Execution order, starting at 1.
    pub order: u32,
    pub mv: Move,
}

/// An ordered list of moves.
///
/// Moves appended with [`Program::push`] are numbered 1, 2, 3... Programs
/// read from a file keep the order numbers they were written with, which
/// are not guaranteed to increase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    records: Vec<MoveRecord>,
}

impl Program {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a move and returns its order number.
    pub fn push(&mut self, mv: impl Into<Move>) -> u32 {
        let order = self.records.last().map_or(1, |r| r.order + 1);
        self.records.push(MoveRecord { order, mv: mv.into() });
        order
    }

    /// Appends a move with an explicit order number.
    pub fn push_record(&mut self, order: u32, mv: Move) {
        self.records.push(MoveRecord { order, mv });
    }

    #[must_use]
    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    /// The moves in stored order.
    pub fn moves(&self) -> impl DoubleEndedIterator<Item = &Move> {
        self.records.iter().map(|r| &r.mv)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

macro_rules! into_move {
    ($($variant:ident($ty:ident)),* $(,)?) => {
        $(
            impl From<$ty> for Move {
                fn from(m: $ty) -> Self {
                    Move::$variant(m)
                }
            }
        )*
    };
}

into_move!(
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
);
