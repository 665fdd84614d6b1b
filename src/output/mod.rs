//! Output module for rendering poke results
//!
//! This module handles:
//! - Selecting the output format from configuration or the command line
//! - Rendering a [`HandResult`] as pretty JSON
//! - Rendering a [`HandResult`] as a plain text report

mod cli;
mod json;

pub use cli::{format_cli_report, render_cli};
pub use json::render_json;

use crate::finger::HandResult;
use crate::{ConfigError, Result};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty printed JSON, suitable for piping
    #[default]
    Json,

    /// Human readable text report
    Cli,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Cli => "cli",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "cli" => Ok(Self::Cli),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders a poke result in the requested format
///
/// # Arguments
///
/// * `result` - The poke result to render
/// * `format` - Output format
/// * `writer` - Destination, usually stdout
pub fn render<W: Write>(result: &HandResult, format: OutputFormat, writer: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => render_json(result, writer),
        OutputFormat::Cli => render_cli(result, writer),
    }
}
