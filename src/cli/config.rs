//! TOML configuration file support.
//!
//! Import settings can be kept in a config file instead of being passed as
//! flags every time:
//!
//! ```toml
//! # psmdb.toml
//! [import]
//! page_size = 1000
//! no_modification_marker = "-"
//! spectrum_file = "run01.mgf"
//! ```
//!
//! Flags given on the command line take precedence over the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use psmdb::ingest::IngestConfig;

/// Root configuration structure for psmdb.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Import-specific settings.
    #[serde(default)]
    pub import: ImportSection,
}

/// Configuration for the import command.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportSection {
    /// Rows per committed page.
    pub page_size: Option<usize>,

    /// Modification field value meaning "no modification".
    pub no_modification_marker: Option<String>,

    /// Spectrum file name used in spectrum keys.
    pub spectrum_file: Option<String>,
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

    /// Build the import configuration, filling unset values from `defaults`.
    pub fn ingest_config(&self, defaults: IngestConfig) -> IngestConfig {
        let section = &self.import;
        IngestConfig {
            page_size: section.page_size.unwrap_or(defaults.page_size),
            no_modification_marker: section
                .no_modification_marker
                .clone()
                .unwrap_or(defaults.no_modification_marker),
            spectrum_file: section
                .spectrum_file
                .clone()
                .unwrap_or(defaults.spectrum_file),
        }
    }
}
