pub mod arc;
pub mod path2d;

pub use arc::{Arc, ArcDirection};
pub use path2d::{Path2d, PathElement, PathSegment};
