/// Match table name
pub const MATCH_TABLE: &str = "SpectrumMatch";
/// Page index table name
pub const PAGE_TABLE: &str = "PageIndex";

/// Source line number of the row (header is line 0)
pub const ROW_ID: &str = "RowId";
/// Precursor m/z
pub const MZ: &str = "Mz";
/// Raw spectrum title
pub const TITLE: &str = "Title";
/// Peptide sequence
pub const SEQUENCE: &str = "Sequence";
/// Absolute mass error `|exp_mass - pep_mass|`
pub const MASS_ERROR: &str = "MassError";
/// Serialized spectrum match
pub const BLOB: &str = "Blob";
/// Raw score
pub const SCORE: &str = "Score";
/// Modification field exactly as it appeared in the file
pub const MODIFICATION_TEXT: &str = "ModificationText";

/// 1-based page number in the page index table
pub const PAGE_NUMBER: &str = "PageNumber";

/// Fixed match table columns in storage order (positions 1..=8)
pub const FIXED_COLUMNS: [&str; 8] = [
    ROW_ID,
    MZ,
    TITLE,
    SEQUENCE,
    MASS_ERROR,
    BLOB,
    SCORE,
    MODIFICATION_TEXT,
];
