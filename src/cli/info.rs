use anyhow::{Context, Result};
use std::path::PathBuf;

use psmdb::schema::columns;
use psmdb::store::SqliteStore;

/// Display information about a match database
pub fn run(db: PathBuf) -> Result<()> {
    if !db.exists() {
        anyhow::bail!("File does not exist: {}", db.display());
    }

    let store = SqliteStore::open(&db).context("Failed to open database")?;
    if !store.table_exists(columns::MATCH_TABLE)? {
        anyhow::bail!(
            "{} has no {} table; was it created by psmdb import?",
            db.display(),
            columns::MATCH_TABLE
        );
    }

    let match_count = store.match_count()?;
    let page_count = store.page_count()?;
    let table_columns = store.table_columns(columns::MATCH_TABLE)?;

    println!("psmdb Database Information");
    println!("==========================");
    println!("File: {}", db.display());
    println!();

    println!("Statistics:");
    println!("  Matches: {}", match_count);
    println!("  Pages: {}", page_count);
    if page_count > 0 {
        let last = store.page_row_ids(page_count)?.len();
        println!("  Rows in last page: {}", last);
    }
    println!();

    println!("Columns:");
    for (i, name) in table_columns.iter().enumerate() {
        let kind = if i < columns::FIXED_COLUMNS.len() {
            "fixed"
        } else {
            "extra"
        };
        println!("  {:3}. {} ({})", i + 1, name, kind);
    }

    if page_count > 0 {
        let first = store.load_page(1).context("Failed to read first page")?;
        if let Some(row) = first.first() {
            println!();
            println!("First match:");
            println!("  Key: {}", row.spectrum_match.key);
            println!("  Sequence: {}", row.sequence);
            println!("  m/z: {:.4}", row.mz);
            println!("  Score: {}", row.score);
        }
    }

    Ok(())
}
