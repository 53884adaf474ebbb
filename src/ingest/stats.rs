use std::fmt;

use serde::Serialize;

use super::page::PageIndex;

/// Outcome of a finished import
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportSummary {
    /// Data rows stored
    pub rows_ingested: u64,
    /// Distinct spectrum titles
    pub distinct_spectra: usize,
    /// Score attribute names: `Score`, `Modification`, then extra columns
    pub score_names: Vec<String>,
    /// Modification names in first-seen order
    pub modifications: Vec<String>,
    /// Committed pages
    #[serde(skip)]
    pub pages: PageIndex,
    /// Number of committed pages
    pub page_count: usize,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Imported {} matches ({} spectra) in {} pages, {} modifications",
            self.rows_ingested,
            self.distinct_spectra,
            self.page_count,
            self.modifications.len()
        )
    }
}
