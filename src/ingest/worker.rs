//! Background import worker.
//!
//! [`spawn_import`] moves the input reader, the store and the progress sink
//! onto a dedicated thread and returns immediately with an [`ImportHandle`].
//!
//! ```text
//! ┌─────────────┐   reader + store + sink   ┌──────────────────┐
//! │  Caller     │ ────────(move)──────────▶ │ "psmdb-import"   │
//! │             │                           │ worker thread    │
//! │             │ ◀───── ProgressSink ───── │ (rows → pages)   │
//! │             │ ──── CancellationToken ─▶ │                  │
//! └─────────────┘                           └──────────────────┘
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::thread::{self, JoinHandle};

use log::warn;

use crate::store::MatchStore;

use super::config::IngestConfig;
use super::engine::{import_reader, CancellationToken};
use super::error::ImportError;
use super::progress::ProgressSink;
use super::stats::ImportSummary;

type WorkerOutput<S> = (S, Result<ImportSummary, ImportError>);

/// Handle to a running import.
///
/// # Drop Safety
///
/// Dropping the handle without calling [`join`](Self::join) cancels the
/// import and waits for the worker, so the store is never left with an open
/// transaction.
pub struct ImportHandle<S: Send + 'static> {
    handle: Option<JoinHandle<WorkerOutput<S>>>,
    cancel: CancellationToken,
}

impl<S: Send + 'static> ImportHandle<S> {
    /// Request cooperative cancellation; the worker stops before its next row
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Token controlling this import
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Whether the worker has exited
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the import to end
    pub fn join(self) -> Result<ImportSummary, ImportError> {
        self.join_with_store().1
    }

    /// Wait for the import to end and get the store back.
    ///
    /// The store is `None` only if the worker panicked.
    pub fn join_with_store(mut self) -> (Option<S>, Result<ImportSummary, ImportError>) {
        let Some(handle) = self.handle.take() else {
            return (None, Err(ImportError::WorkerPanicked));
        };
        match handle.join() {
            Ok((store, result)) => (Some(store), result),
            Err(_panic) => (None, Err(ImportError::WorkerPanicked)),
        }
    }
}

impl<S: Send + 'static> Drop for ImportHandle<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            warn!("ImportHandle dropped without join(); cancelling import");
            self.cancel.cancel();
            let _ = handle.join();
        }
    }
}

/// Run an import on a dedicated `psmdb-import` thread.
///
/// The store is owned exclusively by the worker until the handle is joined.
pub fn spawn_import<R, S, P>(
    reader: R,
    store: S,
    config: IngestConfig,
    sink: P,
) -> Result<ImportHandle<S>, ImportError>
where
    R: Read + Send + 'static,
    S: MatchStore + Send + 'static,
    P: ProgressSink + Send + 'static,
{
    let cancel = CancellationToken::new();
    let worker_cancel = cancel.clone();

    let handle = thread::Builder::new()
        .name("psmdb-import".to_string())
        .spawn(move || {
            let mut store = store;
            let mut sink = sink;
            let result = import_reader(reader, &mut store, &config, &mut sink, &worker_cancel);
            (store, result)
        })?;

    Ok(ImportHandle {
        handle: Some(handle),
        cancel,
    })
}

/// Open `path` on the calling thread and import it with [`spawn_import`].
///
/// A file that cannot be opened is reported to `sink` before the error is
/// returned, as for any other failed import.
pub fn spawn_file_import<S, P>(
    path: &Path,
    store: S,
    config: IngestConfig,
    mut sink: P,
) -> Result<ImportHandle<S>, ImportError>
where
    S: MatchStore + Send + 'static,
    P: ProgressSink + Send + 'static,
{
    match File::open(path) {
        Ok(file) => spawn_import(BufReader::new(file), store, config, sink),
        Err(e) => {
            let err = ImportError::Io(e);
            sink.on_import_failed(&err);
            Err(err)
        }
    }
}
