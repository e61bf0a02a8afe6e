//! Job files.
//!
//! A job is a TOML file naming one tool and, optionally, the grind
//! settings to make it with:
//!
//! ```toml
//! [tool]
//! kind = "neck"
//! blank_dia = 0.5
//! neck_dia = 0.47
//!
//! [grind]
//! wheel_width = 0.25
//! ```
//!
//! Omitted fields take the family or machine defaults.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ConfigError, GrindError, Result};
use crate::tooldef::{Tool, ToolSpecs};
use crate::toolpath::GrindSettings;

/// A tool and the settings to grind it with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobConfig {
    pub tool: ToolSpecs,
    #[serde(default)]
    pub grind: GrindSettings,
}

impl JobConfig {
    /// Reads and validates a job file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] or any error of [`JobConfig::from_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(ConfigError::from)?;
        let job: Self = text.parse()?;
        info!(path = %path.display(), kind = %job.tool.kind(), "loaded job");
        Ok(job)
    }

    /// Checks the grind settings and that the tool can be built.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] for a bad setting or
    /// [`crate::error::ToolError::InvalidSpecs`] for an unbuildable tool.
    pub fn validate(&self) -> Result<()> {
        self.grind.validate()?;
        self.tool()?;
        Ok(())
    }

    /// Builds the tool.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ToolError::InvalidSpecs`] for an unbuildable
    /// tool.
    pub fn tool(&self) -> Result<Tool> {
        Tool::new(self.tool.clone())
    }
}

impl FromStr for JobConfig {
    type Err = GrindError;

    /// Parses and validates a job.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] for malformed TOML or any error of
    /// [`JobConfig::validate`].
    fn from_str(text: &str) -> Result<Self> {
        let job: Self = toml::from_str(text).map_err(ConfigError::from)?;
        job.validate()?;
        Ok(job)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::ToolError;
    use crate::tooldef::{NeckSpec, ToolKind};

    #[test]
    fn missing_fields_take_defaults() {
        let job: JobConfig = "[tool]\nkind = \"neck\"\nneck_dia = 0.45\n".parse().unwrap();
        assert_eq!(
            job.tool,
            ToolSpecs::Neck(NeckSpec {
                neck_dia: 0.45,
                ..NeckSpec::default()
            })
        );
        assert_eq!(job.grind, GrindSettings::default());
        assert_eq!(job.tool().unwrap().kind(), ToolKind::Neck);
    }

    #[test]
    fn grind_settings_are_validated() {
        let text = "[tool]\nkind = \"point\"\n[grind]\nwheel_width = 2.0\n";
        assert!(matches!(
            text.parse::<JobConfig>(),
            Err(GrindError::Config(ConfigError::OutOfRange {
                field: "wheel_width",
                ..
            }))
        ));
    }

    #[test]
    fn unbuildable_tool_is_rejected() {
        let text = "[tool]\nkind = \"taper\"\ntip_dia = 0.75\n";
        assert!(matches!(
            text.parse::<JobConfig>(),
            Err(GrindError::Tool(ToolError::InvalidSpecs("taper")))
        ));
    }

    #[test]
    fn unknown_kind_is_a_toml_error() {
        let text = "[tool]\nkind = \"drill\"\n";
        assert!(matches!(
            text.parse::<JobConfig>(),
            Err(GrindError::Config(ConfigError::Toml(_)))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[tool]\nkind = \"spindown_tip\"\ntip_angle = 90.0\n\n[grind]\nseg3_feed = 0.2"
        )
        .unwrap();
        let job = JobConfig::load(file.path()).unwrap();
        let ToolSpecs::SpindownTip(specs) = job.tool else {
            panic!("expected a spindown tip");
        };
        assert!((specs.tip_angle - 90.0).abs() < 1e-12);
        assert!((job.grind.seg3_feed - 0.2).abs() < 1e-12);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            JobConfig::load(&dir.path().join("none.toml")),
            Err(GrindError::Config(ConfigError::Io(_)))
        ));
    }
}
