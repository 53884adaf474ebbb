//! # Match Records
//!
//! Builds one [`MatchRecord`] per data row of an identification result file:
//!
//! 1. fixed-role fields are looked up through the [`ColumnSchema`](crate::schema::ColumnSchema),
//! 2. the rank is derived from how often the spectrum title was seen before,
//! 3. mass error and (when no `mz` column exists) m/z are computed,
//! 4. the modification field is parsed and its names registered.
//!
//! The small object model ([`Peptide`], [`PeptideAssumption`], [`SpectrumMatch`])
//! is what ends up serialized in the blob column.

mod builder;
mod error;
mod modification;
mod rank;
mod types;

#[cfg(test)]
mod tests;

pub use builder::{derive_mz, spectrum_key, MatchRecordBuilder, SPECTRUM_KEY_SEPARATOR};
pub use error::RowParseError;
pub use modification::parse_modifications;
pub use rank::RankTracker;
pub use types::{
    MatchRecord, ModificationMatch, Peptide, PeptideAssumption, SpectrumMatch, UNKNOWN_ADVOCATE,
};

/// Default modification field value meaning "no modification"
pub const NO_MODIFICATION: &str = "-";
