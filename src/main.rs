//! # psmdb
//!
//! A command-line tool for loading identification result files into a
//! paged SQLite match database.
//!
//! ## Usage
//!
//! ```bash
//! # Import results.txt into results.txt.db
//! psmdb import results.txt --spectrum-file run01.mgf
//!
//! # Inspect an imported database
//! psmdb info results.txt.db
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
