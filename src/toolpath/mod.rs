//! Grind toolpaths: rough plunge planning and program generation.

pub mod plunge;
pub mod program;
pub mod settings;

pub use plunge::{PlungePlan, RoughPlunge};
pub use program::ProgramGenerator;
pub use settings::{GrindSettings, MAX_ROUGH_PASSES};
