use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::mem;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};

use crate::blob;
use crate::record::{MatchRecord, MatchRecordBuilder};
use crate::schema::{
    create_match_table_sql, create_page_table_sql, insert_match_sql, insert_page_sql,
    ColumnSchema, SchemaError,
};
use crate::store::{MatchStore, SqlValue, StoreError};
use crate::vocabulary::FIXED_COLUMN_COUNT;

use super::config::IngestConfig;
use super::error::ImportError;
use super::page::{Page, PageIndex};
use super::progress::ProgressSink;
use super::stats::ImportSummary;

/// Lifecycle of an [`IngestionEngine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Schema resolved, tables not created yet
    AwaitingSchema,
    /// Tables exist, rows are accepted
    Streaming,
    /// All rows committed
    Finished,
    /// Stopped by an error or cancellation
    Aborted,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AwaitingSchema => "awaiting schema",
            Self::Streaming => "streaming",
            Self::Finished => "finished",
            Self::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// Cooperative cancellation flag shared between a controller and the worker
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Batched, paged writer of match rows.
///
/// The engine is created from an already resolved [`ColumnSchema`], creates
/// the match and page tables, then commits rows in transactions of exactly
/// `page_size` rows. Each commit appends one [`Page`] to the page index, both
/// in the store (same transaction) and in memory.
pub struct IngestionEngine<'s, S: MatchStore + ?Sized> {
    store: &'s mut S,
    config: IngestConfig,
    state: EngineState,
    builder: MatchRecordBuilder,
    insert_match: String,
    insert_page: String,
    batch: Vec<Vec<SqlValue>>,
    current_page: Vec<u64>,
    pages: PageIndex,
    rows_ingested: u64,
}

impl<'s, S: MatchStore + ?Sized> IngestionEngine<'s, S> {
    /// Create an engine in [`EngineState::AwaitingSchema`]
    pub fn new(
        store: &'s mut S,
        schema: ColumnSchema,
        config: IngestConfig,
    ) -> Result<Self, ImportError> {
        config.validate().map_err(ImportError::InvalidConfig)?;

        let insert_match = insert_match_sql(&schema);
        let builder = MatchRecordBuilder::new(schema)
            .spectrum_file(config.spectrum_file.clone())
            .none_marker(config.no_modification_marker.clone());

        Ok(Self {
            store,
            batch: Vec::with_capacity(config.page_size),
            current_page: Vec::with_capacity(config.page_size),
            config,
            state: EngineState::AwaitingSchema,
            builder,
            insert_match,
            insert_page: insert_page_sql(),
            pages: PageIndex::new(),
            rows_ingested: 0,
        })
    }

    /// Current state
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Pages committed so far
    pub fn pages(&self) -> &PageIndex {
        &self.pages
    }

    /// Rows accepted so far, committed or not
    pub fn rows_ingested(&self) -> u64 {
        self.rows_ingested
    }

    /// Record builder, with the rank and modification state accumulated so far
    pub fn builder(&self) -> &MatchRecordBuilder {
        &self.builder
    }

    /// Create the match and page tables in a single transaction.
    ///
    /// On failure the transaction is rolled back, so no partial table
    /// remains, and the engine is aborted.
    pub fn create_tables(&mut self) -> Result<(), ImportError> {
        self.expect_state(EngineState::AwaitingSchema, "create tables")?;

        let ddl = format!(
            "{};\n{};",
            create_match_table_sql(self.builder.schema()),
            create_page_table_sql()
        );
        debug!("Creating match tables:\n{}", ddl);

        match execute_ddl(&mut *self.store, &ddl) {
            Ok(()) => {
                self.state = EngineState::Streaming;
                Ok(())
            }
            Err(e) => {
                self.abort();
                Err(ImportError::SchemaCreation(e))
            }
        }
    }

    /// Add one data row.
    ///
    /// `row_id` is the source line number. When the batch reaches
    /// `page_size` rows it is committed and published through `sink`. Any
    /// error aborts the engine and rolls back the open transaction.
    pub fn ingest_row<P: ProgressSink + ?Sized>(
        &mut self,
        row_id: u64,
        fields: &[&str],
        sink: &mut P,
    ) -> Result<(), ImportError> {
        self.expect_state(EngineState::Streaming, "ingest a row")?;
        let result = self.try_ingest_row(row_id, fields, sink);
        if result.is_err() {
            self.abort();
        }
        result
    }

    /// Commit the trailing partial page and finish the import.
    pub fn finish<P: ProgressSink + ?Sized>(
        &mut self,
        sink: &mut P,
    ) -> Result<ImportSummary, ImportError> {
        self.expect_state(EngineState::Streaming, "finish")?;
        if !self.batch.is_empty() {
            if let Err(e) = self.commit_page(sink) {
                self.abort();
                return Err(e);
            }
        }
        self.state = EngineState::Finished;

        let summary = self.summary();
        info!("{}", summary);
        sink.on_import_finished(&summary);
        Ok(summary)
    }

    /// Roll back any open transaction and move to [`EngineState::Aborted`].
    ///
    /// Pages committed before the abort are kept.
    pub fn abort(&mut self) {
        if self.state == EngineState::Finished || self.state == EngineState::Aborted {
            return;
        }
        if self.store.in_transaction() {
            warn!("Rolling back {} uncommitted rows", self.batch.len());
            if let Err(e) = self.store.rollback() {
                warn!("Rollback failed: {}", e);
            }
        }
        self.batch.clear();
        self.current_page.clear();
        self.state = EngineState::Aborted;
    }

    fn try_ingest_row<P: ProgressSink + ?Sized>(
        &mut self,
        row_id: u64,
        fields: &[&str],
        sink: &mut P,
    ) -> Result<(), ImportError> {
        let record = self
            .builder
            .build(row_id, fields)
            .map_err(|source| ImportError::RowParse {
                line: row_id,
                source,
            })?;
        let blob = blob::encode(&record.to_spectrum_match()).map_err(|source| {
            ImportError::Blob {
                line: row_id,
                source,
            }
        })?;

        if self.batch.is_empty() {
            self.store.begin()?;
        }
        self.batch.push(row_values(&record, blob));
        self.current_page.push(row_id);
        self.rows_ingested += 1;

        if self.batch.len() == self.config.page_size {
            self.commit_page(sink)?;
        }
        Ok(())
    }

    fn commit_page<P: ProgressSink + ?Sized>(&mut self, sink: &mut P) -> Result<(), ImportError> {
        let page_number = self.pages.len() + 1;

        let affected = self.store.execute_batch(&self.insert_match, &self.batch)?;
        check_affected(&affected)?;

        let page_rows: Vec<Vec<SqlValue>> = self
            .current_page
            .iter()
            .map(|&row_id| {
                vec![
                    SqlValue::Integer(page_number as i64),
                    SqlValue::Integer(row_id as i64),
                ]
            })
            .collect();
        let affected = self.store.execute_batch(&self.insert_page, &page_rows)?;
        check_affected(&affected)?;

        self.store.commit()?;

        self.batch.clear();
        let page = Page::new(page_number, mem::take(&mut self.current_page));
        debug!("Committed page {} ({} rows)", page_number, page.len());
        self.pages.push(page);

        if page_number == 1 {
            sink.on_first_page_ready();
        } else {
            sink.on_page_committed(page_number, self.pages.len());
        }
        Ok(())
    }

    fn summary(&self) -> ImportSummary {
        ImportSummary {
            rows_ingested: self.rows_ingested,
            distinct_spectra: self.builder.ranks().distinct_titles(),
            score_names: self.builder.schema().score_names(),
            modifications: self.builder.vocabulary().to_vec(),
            page_count: self.pages.len(),
            pages: self.pages.clone(),
        }
    }

    fn expect_state(&self, expected: EngineState, action: &'static str) -> Result<(), ImportError> {
        if self.state != expected {
            return Err(ImportError::InvalidState {
                state: self.state,
                action,
            });
        }
        Ok(())
    }
}

fn execute_ddl<S: MatchStore + ?Sized>(store: &mut S, ddl: &str) -> Result<(), StoreError> {
    store.begin()?;
    store.execute(ddl)?;
    store.commit()
}

fn check_affected(affected: &[usize]) -> Result<(), StoreError> {
    match affected.iter().position(|&n| n != 1) {
        Some(index) => Err(StoreError::RowNotInserted {
            index,
            affected: affected[index],
        }),
        None => Ok(()),
    }
}

/// Parameters for one match row, in storage position order
fn row_values(record: &MatchRecord, blob: Vec<u8>) -> Vec<SqlValue> {
    let mut values = Vec::with_capacity(FIXED_COLUMN_COUNT + record.extras.len());
    values.push(SqlValue::Integer(record.row_id as i64));
    values.push(SqlValue::Real(record.mz));
    values.push(SqlValue::Text(record.title.clone()));
    values.push(SqlValue::Text(record.sequence.clone()));
    values.push(SqlValue::Real(record.abs_mass_error()));
    values.push(SqlValue::Blob(blob));
    values.push(SqlValue::Real(record.score));
    values.push(SqlValue::Text(record.modification_text.clone()));
    values.extend(record.extras.values().map(|v| SqlValue::Text(v.clone())));
    values
}

/// Import a tab-delimited result stream into `store`.
///
/// The first line is the header. If it lacks `spectrum_title` the import
/// fails with [`ImportError::UnsupportedFormat`] before anything is created.
/// `cancel` is checked before every row. Failures are reported to `sink`
/// before being returned.
pub fn import_reader<R, S, P>(
    reader: R,
    store: &mut S,
    config: &IngestConfig,
    sink: &mut P,
    cancel: &CancellationToken,
) -> Result<ImportSummary, ImportError>
where
    R: Read,
    S: MatchStore + ?Sized,
    P: ProgressSink + ?Sized,
{
    let result = run_import(reader, store, config, sink, cancel);
    if let Err(ref e) = result {
        sink.on_import_failed(e);
    }
    result
}

/// Import a result file, see [`import_reader`].
pub fn import_file<S, P>(
    path: &Path,
    store: &mut S,
    config: &IngestConfig,
    sink: &mut P,
    cancel: &CancellationToken,
) -> Result<ImportSummary, ImportError>
where
    S: MatchStore + ?Sized,
    P: ProgressSink + ?Sized,
{
    match File::open(path) {
        Ok(file) => import_reader(BufReader::new(file), store, config, sink, cancel),
        Err(e) => {
            let err = ImportError::Io(e);
            sink.on_import_failed(&err);
            Err(err)
        }
    }
}

fn run_import<R, S, P>(
    reader: R,
    store: &mut S,
    config: &IngestConfig,
    sink: &mut P,
    cancel: &CancellationToken,
) -> Result<ImportSummary, ImportError>
where
    R: Read,
    S: MatchStore + ?Sized,
    P: ProgressSink + ?Sized,
{
    let mut tsv = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);
    let mut records = tsv.records();

    let header = records.next().ok_or(SchemaError::EmptyInput)??;
    let schema = ColumnSchema::from_fields(header.iter())?;
    info!(
        "Resolved {} columns ({} extra)",
        schema.width(),
        schema.extras().len()
    );

    let mut engine = IngestionEngine::new(store, schema, config.clone())?;
    engine.create_tables()?;

    let mut fallback_line = 0u64;
    for record in records {
        fallback_line += 1;
        if cancel.is_cancelled() {
            warn!("Import cancelled after {} rows", engine.rows_ingested());
            engine.abort();
            return Err(ImportError::Cancelled);
        }

        let record = match record {
            Ok(record) => record,
            Err(e) => {
                engine.abort();
                return Err(e.into());
            }
        };
        let row_id = record
            .position()
            .map(|p| p.line().saturating_sub(1))
            .unwrap_or(fallback_line);
        let fields: Vec<&str> = record.iter().collect();
        engine.ingest_row(row_id, &fields, sink)?;
    }

    engine.finish(sink)
}
