use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, error, info};

use super::error::ImportError;
use super::stats::ImportSummary;

/// Receives notifications from the import worker.
///
/// Calls are made synchronously on the worker thread at page-commit
/// boundaries, so implementations must return quickly. All methods default to
/// doing nothing.
pub trait ProgressSink {
    /// The first page is committed and can be displayed
    fn on_first_page_ready(&mut self) {}

    /// A page after the first one was committed
    fn on_page_committed(&mut self, _page_number: usize, _total_pages: usize) {}

    /// The import stopped with an error
    fn on_import_failed(&mut self, _error: &ImportError) {}

    /// The import completed
    fn on_import_finished(&mut self, _summary: &ImportSummary) {}
}

impl<T: ProgressSink + ?Sized> ProgressSink for &mut T {
    fn on_first_page_ready(&mut self) {
        (**self).on_first_page_ready()
    }

    fn on_page_committed(&mut self, page_number: usize, total_pages: usize) {
        (**self).on_page_committed(page_number, total_pages)
    }

    fn on_import_failed(&mut self, error: &ImportError) {
        (**self).on_import_failed(error)
    }

    fn on_import_finished(&mut self, summary: &ImportSummary) {
        (**self).on_import_finished(summary)
    }
}

/// Sink that ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {}

/// Sink that reports progress through the `log` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn on_first_page_ready(&mut self) {
        info!("First page of results is ready");
    }

    fn on_page_committed(&mut self, page_number: usize, total_pages: usize) {
        debug!("Committed page {}/{}", page_number, total_pages);
    }

    fn on_import_failed(&mut self, error: &ImportError) {
        error!("Import failed: {}", error);
    }

    fn on_import_finished(&mut self, summary: &ImportSummary) {
        info!("{}", summary);
    }
}

/// Progress notification forwarded by [`ChannelSink`]
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// See [`ProgressSink::on_first_page_ready`]
    FirstPageReady,
    /// See [`ProgressSink::on_page_committed`]
    PageCommitted {
        /// 1-based number of the committed page
        page_number: usize,
        /// Pages committed so far
        total_pages: usize,
    },
    /// See [`ProgressSink::on_import_failed`]
    Failed(String),
    /// See [`ProgressSink::on_import_finished`]
    Finished(ImportSummary),
}

/// Sink forwarding notifications over an unbounded channel.
///
/// Sending never blocks the worker. Events sent after the receiver is gone
/// are dropped.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<ProgressEvent>,
}

impl ChannelSink {
    /// Create a sink and the receiver its events arrive on
    pub fn new() -> (Self, Receiver<ProgressEvent>) {
        let (sender, receiver) = unbounded();
        (Self { sender }, receiver)
    }

    fn send(&self, event: ProgressEvent) {
        if self.sender.send(event).is_err() {
            debug!("Progress receiver dropped, event discarded");
        }
    }
}

impl ProgressSink for ChannelSink {
    fn on_first_page_ready(&mut self) {
        self.send(ProgressEvent::FirstPageReady);
    }

    fn on_page_committed(&mut self, page_number: usize, total_pages: usize) {
        self.send(ProgressEvent::PageCommitted {
            page_number,
            total_pages,
        });
    }

    fn on_import_failed(&mut self, error: &ImportError) {
        self.send(ProgressEvent::Failed(error.to_string()));
    }

    fn on_import_finished(&mut self, summary: &ImportSummary) {
        self.send(ProgressEvent::Finished(summary.clone()));
    }
}
