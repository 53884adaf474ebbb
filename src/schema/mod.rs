//! # Column Schema Resolution
//!
//! This module infers the column layout of a tab-delimited identification
//! result file from its header row and derives the SQL table definitions
//! used to store the matches.
//!
//! ## Header Roles
//!
//! | Header token | Role | Required |
//! |--------------|------|----------|
//! | spectrum_title | Spectrum title, rank key | Yes |
//! | peptide | Peptide sequence | For data rows |
//! | exp_mass | Experimental mass | For data rows |
//! | pep_mass | Theoretical peptide mass | For data rows |
//! | modification | `name@pos[delta]` list | For data rows |
//! | score | Raw score | For data rows |
//! | charge | Precursor charge | For data rows |
//! | mz | Precursor m/z | No (derived) |
//! | *anything else* | Extra column, stored as TEXT | No |
//!
//! ## Match Table
//!
//! | Position | Column | Type |
//! |----------|--------|------|
//! | 1 | RowId | INTEGER PRIMARY KEY |
//! | 2 | Mz | REAL |
//! | 3 | Title | TEXT |
//! | 4 | Sequence | TEXT |
//! | 5 | MassError | REAL |
//! | 6 | Blob | BLOB |
//! | 7 | Score | REAL |
//! | 8 | ModificationText | TEXT |
//! | 9.. | extra columns | TEXT |

/// Stored table and column name constants.
pub mod columns;
mod ddl;
mod error;
/// Header token constants.
pub mod header;
mod resolver;

#[cfg(test)]
mod tests;

pub use ddl::{
    create_match_table_sql, create_page_table_sql, insert_match_sql, insert_page_sql,
    quote_identifier,
};
pub use error::SchemaError;
pub use resolver::{ColumnRole, ColumnSchema, FixedRole};
