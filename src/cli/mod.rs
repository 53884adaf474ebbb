use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod import;
mod info;

/// psmdb - Peptide-spectrum match importer
#[derive(Parser)]
#[command(name = "psmdb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a tab-delimited identification result file
    Import {
        /// Input result file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output database path (defaults to <INPUT>.db)
        #[arg(long, value_name = "PATH")]
        db: Option<PathBuf>,

        /// Spectrum file name used in spectrum keys (defaults to the input file name)
        #[arg(long, value_name = "NAME")]
        spectrum_file: Option<String>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Replace the database if it already exists
        #[arg(long)]
        overwrite: bool,

        /// Print the import summary as JSON
        #[arg(long)]
        json: bool,

        /// Rows per committed page
        #[arg(long, hide = true)]
        page_size: Option<usize>,
    },

    /// Display information about an imported database
    Info {
        /// Database file path
        #[arg(value_name = "DB")]
        db: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Import {
            input,
            db,
            spectrum_file,
            config,
            overwrite,
            json,
            page_size,
        } => import::run(import::ImportArgs {
            input,
            db,
            spectrum_file,
            config,
            overwrite,
            json,
            page_size,
        }),
        Commands::Info { db } => info::run(db),
    }
}
