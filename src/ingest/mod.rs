//! # Streaming Import
//!
//! Reads a tab-delimited identification result file row by row and writes it
//! to a [`MatchStore`](crate::store::MatchStore) in pages:
//!
//! ```text
//! header ──▶ ColumnSchema ──▶ CREATE TABLE (one transaction)
//! row    ──▶ MatchRecord  ──▶ batch ──(page_size rows)──▶ COMMIT ──▶ Page
//! EOF    ──▶ commit partial batch ──▶ ImportSummary
//! ```
//!
//! A page becomes visible only after its transaction commits, so a reader
//! never observes a half-written page. The first commit is announced through
//! [`ProgressSink::on_first_page_ready`], later ones through
//! [`ProgressSink::on_page_committed`].
//!
//! ## Threading
//!
//! [`import_reader`] runs on the calling thread. [`spawn_import`] runs the same
//! import on a dedicated worker and returns an [`ImportHandle`] that can cancel
//! and join it.
//!
//! ## Example
//!
//! ```rust
//! use psmdb::ingest::{import_reader, CancellationToken, IngestConfig, NullSink};
//! use psmdb::store::SqliteStore;
//!
//! let tsv = "spectrum_title\tpeptide\texp_mass\tpep_mass\tmodification\tscore\tcharge\n\
//!            scan=1\tPEPTIDE\t800.4\t800.39\t-\t42.0\t2\n";
//!
//! let mut store = SqliteStore::open_in_memory()?;
//! let summary = import_reader(
//!     tsv.as_bytes(),
//!     &mut store,
//!     &IngestConfig::with_spectrum_file("run01.mgf"),
//!     &mut NullSink,
//!     &CancellationToken::new(),
//! )?;
//!
//! assert_eq!(summary.rows_ingested, 1);
//! assert_eq!(store.load_page(1)?.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod engine;
mod error;
mod page;
mod progress;
mod stats;
mod worker;


pub use config::{default_database_path, IngestConfig, DEFAULT_PAGE_SIZE};
pub use engine::{import_file, import_reader, CancellationToken, EngineState, IngestionEngine};
pub use error::ImportError;
pub use page::{Page, PageIndex};
pub use progress::{ChannelSink, LogSink, NullSink, ProgressEvent, ProgressSink};
pub use stats::ImportSummary;
pub use worker::{spawn_file_import, spawn_import, ImportHandle};
