use crate::blob::BlobError;
use crate::record::RowParseError;
use crate::schema::SchemaError;
use crate::store::StoreError;

use super::engine::EngineState;

/// Errors that end an import.
///
/// Every variant is fatal: the open transaction is rolled back, the engine
/// moves to [`EngineState::Aborted`] and the progress sink is told.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The header cannot be used; nothing was created
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(#[from] SchemaError),

    /// The store rejected the table definitions
    #[error("failed to create match tables: {0}")]
    SchemaCreation(#[source] StoreError),

    /// A data row is malformed
    #[error("line {line}: {source}")]
    RowParse {
        /// Source line number of the row
        line: u64,
        /// What is wrong with it
        #[source]
        source: RowParseError,
    },

    /// A match could not be serialized
    #[error("line {line}: failed to encode match: {source}")]
    Blob {
        /// Source line number of the row
        line: u64,
        /// Encoding error
        #[source]
        source: BlobError,
    },

    /// Insert or commit failed
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    /// The input could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not valid tab-delimited UTF-8
    #[error("TSV read error: {0}")]
    Csv(#[from] csv::Error),

    /// The configuration is unusable
    #[error("invalid import configuration: {0}")]
    InvalidConfig(String),

    /// The import was cancelled before it finished
    #[error("import cancelled")]
    Cancelled,

    /// The engine was driven out of order
    #[error("cannot {action} while the engine is {state}")]
    InvalidState {
        /// Current state
        state: EngineState,
        /// Attempted action
        action: &'static str,
    },

    /// The import worker thread panicked
    #[error("import worker panicked")]
    WorkerPanicked,
}
