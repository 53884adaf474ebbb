use crate::blob::BlobError;

/// Errors raised by a [`MatchStore`](super::MatchStore)
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Error from SQLite
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A batch or commit was issued without an open transaction
    #[error("no open transaction")]
    NoTransaction,

    /// `begin` was called while a transaction was already open
    #[error("a transaction is already open")]
    TransactionAlreadyOpen,

    /// A batched insert did not affect exactly one row
    #[error("batched statement {index} affected {affected} rows, expected 1")]
    RowNotInserted {
        /// 0-based index of the statement in the batch
        index: usize,
        /// Number of rows it affected
        affected: usize,
    },

    /// A stored match blob could not be decoded
    #[error("failed to decode match blob of row {row_id}: {source}")]
    Blob {
        /// Row the blob belongs to
        row_id: u64,
        /// Decoding error
        #[source]
        source: BlobError,
    },
}
