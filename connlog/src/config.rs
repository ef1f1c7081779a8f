//! Session configuration.
//!
//! A [`Config`] names the format string and where records go. It can be
//! built in code or read from a JSON document:
//!
//! ```
//! use connlog::config::{Config, OutputConfig};
//!
//! let config = Config::from_json(
//!     r#"{ "format": "%srcip %status", "output": { "kind": "command", "command": "logger" } }"#,
//! )
//! .unwrap();
//! assert_eq!(config.format, "%srcip %status");
//! assert_eq!(config.output, OutputConfig::command("logger", None));
//! ```

use crate::error::Error;
use crate::format::{self, FormatProgram};
use crate::printer::{CommandPrinter, Invocation, Printer, ShellRunner, StreamPrinter};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Format used when none is configured.
pub const DEFAULT_FORMAT: &str =
    "%time %srcip:%srcport %dstip:%dstport %status %reqsize %respsize %latency \"%reqline\"";

/// Record destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OutputConfig {
    /// One line per record on standard output.
    #[default]
    Stdout,
    /// Pipe each record into `command`, run as `user` when set.
    Command {
        command: String,
        #[serde(default)]
        user: Option<String>,
    },
}

impl OutputConfig {
    pub fn command(command: impl Into<String>, user: Option<String>) -> Self {
        OutputConfig::Command {
            command: command.into(),
            user,
        }
    }

    pub fn build(&self) -> Box<dyn Printer> {
        match self {
            OutputConfig::Stdout => Box::new(StreamPrinter::new(std::io::stdout())),
            OutputConfig::Command { command, user } => {
                let mut invocation = Invocation::new(command.as_str());
                if let Some(user) = user {
                    invocation = invocation.with_user(user.as_str());
                }
                Box::new(CommandPrinter::with_runner(invocation, ShellRunner))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub format: String,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    pub fn from_json(text: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, Error> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Compile the configured format string.
    pub fn program(&self) -> Result<FormatProgram, Error> {
        Ok(format::parse(&self.format)?)
    }
}
