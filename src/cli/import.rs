use anyhow::{Context, Result};
use log::{error, info};
use std::path::PathBuf;

use psmdb::ingest::{
    default_database_path, spawn_file_import, ChannelSink, ImportSummary, IngestConfig,
    ProgressEvent,
};
use psmdb::store::SqliteStore;

use super::config::Config;

/// Arguments of the import command
pub struct ImportArgs {
    pub input: PathBuf,
    pub db: Option<PathBuf>,
    pub spectrum_file: Option<String>,
    pub config: Option<PathBuf>,
    pub overwrite: bool,
    pub json: bool,
    pub page_size: Option<usize>,
}

/// Import a result file into a match database
pub fn run(args: ImportArgs) -> Result<()> {
    let input = args.input;
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let db = args.db.unwrap_or_else(|| default_database_path(&input));
    if db.exists() {
        if !args.overwrite {
            anyhow::bail!(
                "Database already exists: {} (use --overwrite to replace it)",
                db.display()
            );
        }
        std::fs::remove_file(&db)
            .with_context(|| format!("Failed to remove existing database: {}", db.display()))?;
    }

    let file_config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let input_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut config = file_config.ingest_config(IngestConfig::with_spectrum_file(input_name));
    if let Some(spectrum_file) = args.spectrum_file {
        config.spectrum_file = spectrum_file;
    }
    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }

    info!("psmdb - identification results import");
    info!("======================================");
    info!("Input:         {}", input.display());
    info!("Database:      {}", db.display());
    info!("Spectrum file: {}", config.spectrum_file);
    info!("Page size:     {}", config.page_size);

    let store = SqliteStore::open(&db)
        .with_context(|| format!("Failed to open database: {}", db.display()))?;
    let (sink, events) = ChannelSink::new();
    let handle = spawn_file_import(&input, store, config, sink).context("Failed to start import")?;

    // The channel closes when the worker drops its sink
    for event in events.iter() {
        match event {
            ProgressEvent::FirstPageReady => info!("First page ready"),
            ProgressEvent::PageCommitted {
                page_number,
                total_pages,
            } => info!("Committed page {} ({} total)", page_number, total_pages),
            ProgressEvent::Failed(message) => error!("Import failed: {}", message),
            ProgressEvent::Finished(_) => info!("Import complete!"),
        }
    }

    let summary = handle.join().context("Import failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary, &db);
    }
    Ok(())
}

fn print_summary(summary: &ImportSummary, db: &std::path::Path) {
    println!("Import Summary");
    println!("==============");
    println!("Database:         {}", db.display());
    println!("Matches imported: {}", summary.rows_ingested);
    println!("Distinct spectra: {}", summary.distinct_spectra);
    println!("Pages committed:  {}", summary.page_count);
    println!("Score columns:    {}", summary.score_names.join(", "));
    if summary.modifications.is_empty() {
        println!("Modifications:    none");
    } else {
        println!("Modifications:    {}", summary.modifications.join(", "));
    }
}
