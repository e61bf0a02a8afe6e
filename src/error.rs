use thiserror::Error;

/// Top-level error type for the grinding core.
#[derive(Debug, Error)]
pub enum GrindError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Dimension(#[from] DimensionError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Toolpath(#[from] ToolpathError),

    #[error(transparent)]
    Program(#[from] ProgramError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("zero-length vector")]
    ZeroVector,

    #[error("line has zero length")]
    ZeroLengthLine,

    #[error("radius must be > 0, got {0}")]
    NonPositiveRadius(f64),

    #[error("arc of 360 degrees has no bisector")]
    FullCircleBisector,

    #[error("point coincides with arc center, direction is undefined")]
    PointAtCenter,

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to building or rendering a [`crate::geometry::Path2d`].
#[derive(Debug, Error)]
pub enum PathError {
    #[error("path has no start point")]
    NotStarted,

    #[error("path is invalid: {0}")]
    Invalid(String),
}

/// Errors raised while laying out a dimension.
#[derive(Debug, Error)]
pub enum DimensionError {
    #[error("reference points are the same")]
    IdenticalReferences,

    #[error("illegal reference combination: {0}")]
    IllegalReferences(String),

    #[error("linear dimension cannot be forced {0}")]
    CannotForce(&'static str),

    #[error("cannot dimension intersecting lines")]
    NotParallel,

    #[error("cannot dimension collinear lines")]
    Collinear,

    #[error("reference lines are parallel")]
    Parallel,

    #[error("referenced line has zero length")]
    ZeroLengthReference,

    #[error("label sits on the reference intersection")]
    LabelAtVertex,
}

/// Errors raised by tool definitions.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown {kind} field: {field}")]
    UnknownField { kind: &'static str, field: String },

    #[error("{kind} geometry is not buildable with {field} = {value}")]
    Infeasible {
        kind: &'static str,
        field: String,
        value: f64,
    },

    #[error("{0} specs do not describe a buildable tool")]
    InvalidSpecs(&'static str),
}

/// Errors raised while computing plunge points or emitting programs.
#[derive(Debug, Error)]
pub enum ToolpathError {
    #[error("arc elements are not supported in plunge computation")]
    ArcUnsupported,

    #[error("start z {start_z} is beyond the grind length {length}")]
    StartBeyondTarget { start_z: f64, length: f64 },

    #[error("element index {index} is out of range for {len} elements")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("wheel width {wheel} is wider than the neck ({neck})")]
    WheelTooWide { wheel: f64, neck: f64 },

    #[error("invalid wheel step: width {width} x overlap {overlap}")]
    InvalidStep { width: f64, overlap: f64 },
}

/// Errors related to move programs and their replay.
#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("moves are out of order: {found} follows {previous}")]
    OutOfOrder { previous: u32, found: u32 },

    #[error("unknown move id: {0}")]
    UnknownMove(String),

    #[error("invalid value for {id}: {value}")]
    InvalidValue { id: String, value: String },

    #[error("xml error: {0}")]
    Xml(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to job configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for results using [`GrindError`].
pub type Result<T> = std::result::Result<T, GrindError>;
