//! TOML configuration file support.
//!
//! Export defaults can be kept in a config file instead of repeated flags:
//!
//! ```toml
//! # sierraecg.toml
//! [read]
//! include_repbeats = true
//!
//! [export]
//! format = "csv"
//! pretty = true
//! ```
//!
//! Flags given on the command line take precedence.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use super::ExportFormat;

/// Root configuration structure for sierraecg.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Decoding settings.
    #[serde(default)]
    pub read: ReadSection,

    /// Export-specific settings.
    #[serde(default)]
    pub export: ExportSection,
}

/// Settings applied when decoding the input file.
#[derive(Debug, Default, Deserialize)]
pub struct ReadSection {
    /// Decode representative beats as well as full-disclosure leads.
    pub include_repbeats: Option<bool>,
}

/// Configuration for the export command.
#[derive(Debug, Default, Deserialize)]
pub struct ExportSection {
    /// Output format.
    pub format: Option<ExportFormat>,

    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
