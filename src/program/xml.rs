//! Program files.
//!
//! A program is a `PROGRAM` document whose `BUILDERSCRIPTS` element holds
//! one `MOVE` per move:
//!
//! ```xml
//! <MOVE Order="2" Id="Axis1">
//!   <MOVEINDEX>1</MOVEINDEX>
//!   <VARIABLES>
//!     <VARIABLE><ID>PLUNGE_TO</ID><VALUE>0.05000</VALUE></VARIABLE>
//!   </VARIABLES>
//! </MOVE>
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ProgramError, Result};

use super::{Move, Program};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename = "PROGRAM")]
struct ProgramDoc {
    #[serde(rename = "BUILDERSCRIPTS")]
    scripts: BuilderScripts,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct BuilderScripts {
    #[serde(rename = "MOVE", default)]
    moves: Vec<MoveNode>,
}

#[derive(Debug, Serialize, Deserialize)]
struct MoveNode {
    #[serde(rename = "@Order")]
    order: u32,
    #[serde(rename = "@Id")]
    id: String,
    #[serde(rename = "MOVEINDEX")]
    move_index: u32,
    #[serde(rename = "VARIABLES", default)]
    variables: Variables,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Variables {
    #[serde(rename = "VARIABLE", default)]
    items: Vec<VariableNode>,
}

#[derive(Debug, Serialize, Deserialize)]
struct VariableNode {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "VALUE")]
    value: String,
}

impl Program {
    /// Serializes the program. The move index of each move is its order
    /// number minus one.
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::Xml`] if serialization fails.
    pub fn to_xml(&self) -> Result<String> {
        let moves = self
            .records()
            .iter()
            .map(|r| MoveNode {
                order: r.order,
                id: r.mv.id().to_string(),
                move_index: r.order.saturating_sub(1),
                variables: Variables {
                    items: r
                        .mv
                        .variables()
                        .into_iter()
                        .map(|(id, value)| VariableNode {
                            id: id.to_string(),
                            value,
                        })
                        .collect(),
                },
            })
            .collect();
        let doc = ProgramDoc {
            scripts: BuilderScripts { moves },
        };
        let body = quick_xml::se::to_string(&doc).map_err(|e| ProgramError::Xml(e.to_string()))?;
        Ok(format!("{XML_DECLARATION}\n{body}\n"))
    }

    /// Parses a program, keeping each move's written order number.
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::Xml`] for malformed XML, or the move errors
    /// of [`Move::from_variables`].
    pub fn from_xml(text: &str) -> Result<Self> {
        let doc: ProgramDoc =
            quick_xml::de::from_str(text).map_err(|e| ProgramError::Xml(e.to_string()))?;
        let mut program = Self::new();
        for node in &doc.scripts.moves {
            let mv = Move::from_variables(
                &node.id,
                node.variables
                    .items
                    .iter()
                    .map(|v| (v.id.as_str(), v.value.as_str())),
            )?;
            program.push_record(node.order, mv);
        }
        debug!(moves = program.len(), "parsed program");
        Ok(program)
    }

    /// Writes the program to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::Io`] or [`ProgramError::Xml`].
    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_xml()?).map_err(ProgramError::from)?;
        info!(path = %path.display(), moves = self.len(), "wrote program");
        Ok(())
    }

    /// Reads a program from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::Io`] or the errors of [`Program::from_xml`].
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(ProgramError::from)?;
        Self::from_xml(&text)
    }
}
