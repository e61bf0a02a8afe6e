//! Tool grinding core: parametric tool profiles, their dimensions, grind
//! programs and program replay.

pub mod config;
pub mod dimension;
pub mod error;
pub mod geometry;
pub mod math;
pub mod program;
pub mod sim;
pub mod tooldef;
pub mod toolpath;

pub use error::{GrindError, Result};
