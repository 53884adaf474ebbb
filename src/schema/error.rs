/// Reasons a header row cannot be turned into a column schema
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// The input had no header line at all
    #[error("input is empty, expected a header row")]
    EmptyInput,

    /// The header lacks the mandatory `spectrum_title` column
    #[error("header has no spectrum_title column")]
    MissingSpectrumTitle,

    /// A fixed-role or extra header token appears twice
    #[error("duplicate column '{name}' at index {index}")]
    DuplicateColumn {
        /// Header text of the offending column
        name: String,
        /// 0-based index of the second occurrence
        index: usize,
    },

    /// A header token is empty
    #[error("empty column name at index {0}")]
    EmptyColumnName(usize),
}
