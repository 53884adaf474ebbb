//! # Match Store
//!
//! The ingestion engine only needs a handful of operations from its database:
//! run DDL, open/commit/roll back a transaction, and execute a parameterized
//! statement for a batch of rows. [`MatchStore`] captures exactly that, and
//! [`SqliteStore`] implements it on top of `rusqlite`.

mod error;
mod sqlite;

pub use error::StoreError;
pub use sqlite::{SqliteStore, StoredMatch};

/// A value bound to one statement parameter
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// SQL NULL
    Null,
    /// 64-bit integer
    Integer(i64),
    /// 64-bit float
    Real(f64),
    /// UTF-8 text
    Text(String),
    /// Raw bytes
    Blob(Vec<u8>),
}

/// Database operations needed by the ingestion engine.
///
/// Implementations are owned by a single import worker and never shared.
pub trait MatchStore {
    /// Execute one or more DDL/DML statements without parameters
    fn execute(&mut self, sql: &str) -> Result<(), StoreError>;

    /// Open a transaction
    fn begin(&mut self) -> Result<(), StoreError>;

    /// Execute `sql` once per parameter row inside the open transaction,
    /// returning the number of rows each execution affected.
    fn execute_batch(&mut self, sql: &str, rows: &[Vec<SqlValue>])
        -> Result<Vec<usize>, StoreError>;

    /// Commit the open transaction
    fn commit(&mut self) -> Result<(), StoreError>;

    /// Roll back the open transaction
    fn rollback(&mut self) -> Result<(), StoreError>;

    /// Whether a transaction is currently open
    fn in_transaction(&self) -> bool;
}
