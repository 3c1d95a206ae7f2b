//! Automaton Record Export Utilities
//!
//! This module renders compiled automaton records for downstream tools:
//! JSON for code generators, Graphviz DOT for inspection.

use std::fmt::Write as _;
use std::io::Write;
use std::str::FromStr;

use crate::automata::AutomatonRecord;
use crate::error::{Error, Result};

/// Output format for automaton records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Compact JSON
    #[default]
    Json,
    /// Indented JSON
    PrettyJson,
    /// Graphviz DOT
    Dot,
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(Self::Json),
            "pretty" | "pretty-json" => Ok(Self::PrettyJson),
            "dot" => Ok(Self::Dot),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

impl AutomatonRecord {
    /// Serialize to JSON text
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let text = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(text)
    }

    /// Parse a record from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Render as a Graphviz digraph; accepting states are double circles
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph automaton {\n    rankdir=LR;\n");
        out.push_str("    __start [shape=point];\n");
        for state in &self.states {
            let shape = if self.accepts.contains(state) {
                "doublecircle"
            } else {
                "circle"
            };
            let _ = writeln!(out, "    {} [shape={}];", state, shape);
        }
        let _ = writeln!(out, "    __start -> {};", self.start);
        for (state, row) in &self.transitions {
            for (name, next) in row {
                let _ = writeln!(
                    out,
                    "    {} -> {} [label=\"{}\"];",
                    state,
                    next,
                    name.replace('\\', "\\\\").replace('"', "\\\"")
                );
            }
        }
        out.push_str("}\n");
        out
    }
}

/// Write a record in the given format
pub fn write_record<W: Write>(
    record: &AutomatonRecord,
    format: ExportFormat,
    mut out: W,
) -> Result<()> {
    let text = match format {
        ExportFormat::Json => record.to_json(false)?,
        ExportFormat::PrettyJson => record.to_json(true)?,
        ExportFormat::Dot => record.to_dot(),
    };
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    Ok(())
}
