use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::record::NO_MODIFICATION;

/// Rows committed per transaction, and therefore per page
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Configuration for an import run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Number of rows per committed page
    pub page_size: usize,

    /// Modification field value meaning "no modification"
    pub no_modification_marker: String,

    /// Spectrum file name used as prefix of every spectrum key
    pub spectrum_file: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            no_modification_marker: NO_MODIFICATION.to_string(),
            spectrum_file: String::new(),
        }
    }
}

impl IngestConfig {
    /// Default configuration with a spectrum file name
    pub fn with_spectrum_file(spectrum_file: impl Into<String>) -> Self {
        Self {
            spectrum_file: spectrum_file.into(),
            ..Default::default()
        }
    }

    /// Check the configuration before an import starts
    pub fn validate(&self) -> Result<(), String> {
        if self.page_size == 0 {
            return Err("page_size must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Database path used when none is given: `<input file name>.db` next to the input.
///
/// ```
/// use std::path::Path;
/// use psmdb::ingest::default_database_path;
///
/// let db = default_database_path(Path::new("/data/results.txt"));
/// assert_eq!(db, Path::new("/data/results.txt.db"));
/// ```
pub fn default_database_path(input: &Path) -> PathBuf {
    let mut name = input.file_name().unwrap_or_default().to_os_string();
    name.push(".db");
    input.with_file_name(name)
}
