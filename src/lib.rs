//! # psmdb - Streaming Import of Peptide-Spectrum Matches
//!
//! `psmdb` loads tab-delimited identification result files (one candidate
//! peptide-spectrum match per line) into an embedded SQLite database. The
//! column layout is inferred from the header row, and rows are committed in
//! pages so the first results can be displayed while the rest of the file is
//! still being read.
//!
//! ## Key Features
//!
//! - **Schema Inference**: Known header tokens map to fixed roles; every other
//!   column is kept as an extra `TEXT` column, with no limit on their number.
//!
//! - **Paged Commits**: Rows are written in transactions of 1000 rows. Each
//!   commit appends a page to a persistent page index, and only committed pages
//!   are ever announced.
//!
//! - **Rank Reconstruction**: Candidate rank is derived from how often the
//!   spectrum title was seen before, using file order alone.
//!
//! - **Self-Contained Rows**: Each row carries a compact binary blob of its
//!   spectrum match (sequence, modifications, charge, mass error, score).
//!
//! - **Background Worker**: Imports run on a dedicated thread with progress
//!   callbacks and cooperative cancellation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use psmdb::ingest::{default_database_path, spawn_file_import, IngestConfig, LogSink};
//! use psmdb::store::SqliteStore;
//!
//! let input = Path::new("results.txt");
//! let store = SqliteStore::open(default_database_path(input))?;
//!
//! let handle = spawn_file_import(
//!     input,
//!     store,
//!     IngestConfig::with_spectrum_file("run01.mgf"),
//!     LogSink,
//! )?;
//!
//! let summary = handle.join()?;
//! println!("{}", summary);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! This creates two tables:
//! ```text
//! SpectrumMatch   RowId | Mz | Title | Sequence | MassError | Blob | Score | ModificationText | extras...
//! PageIndex       PageNumber | RowId
//! ```
//!
//! ## Modules
//!
//! - [`schema`]: header resolution and table definitions
//! - [`record`]: per-row record building, ranks and modification parsing
//! - [`blob`]: binary encoding of the stored spectrum match
//! - [`store`]: storage abstraction and the SQLite implementation
//! - [`ingest`]: batched, paged import engine and its worker thread
//! - [`vocabulary`]: modification names and extra column registry

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod blob;
pub mod ingest;
pub mod record;
pub mod schema;
pub mod store;
pub mod vocabulary;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::blob::{decode, encode, BlobError};
    pub use crate::ingest::{
        import_file, import_reader, spawn_file_import, spawn_import, CancellationToken,
        ChannelSink, ImportError, ImportHandle, ImportSummary, IngestConfig, LogSink, NullSink,
        PageIndex, ProgressEvent, ProgressSink,
    };
    pub use crate::record::{MatchRecord, MatchRecordBuilder, SpectrumMatch};
    pub use crate::schema::{columns, ColumnRole, ColumnSchema, FixedRole, SchemaError};
    pub use crate::store::{MatchStore, SqliteStore, StoredMatch, StoreError};
    pub use crate::vocabulary::{ExtraColumnRegistry, ModificationVocabulary};
}
