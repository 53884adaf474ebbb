use indexmap::IndexMap;

use crate::schema::{header, ColumnSchema, FixedRole};
use crate::vocabulary::ModificationVocabulary;

use super::error::RowParseError;
use super::modification::parse_modifications;
use super::rank::RankTracker;
use super::types::MatchRecord;
use super::NO_MODIFICATION;

/// Separator placed between the spectrum file name and the title in keys
pub const SPECTRUM_KEY_SEPARATOR: &str = "_cus_";

/// Unique key of a ranked match: `<spectrum file>_cus_<title>_rank_<rank>`
pub fn spectrum_key(spectrum_file: &str, title: &str, rank: u32) -> String {
    format!("{spectrum_file}{SPECTRUM_KEY_SEPARATOR}{title}_rank_{rank}")
}

/// Precursor m/z from the experimental mass and charge.
///
/// A zero charge has no defined m/z and is rejected instead of producing an
/// infinite value.
pub fn derive_mz(exp_mass: f64, charge: i32) -> Result<f64, RowParseError> {
    if charge == 0 {
        return Err(RowParseError::ZeroCharge { exp_mass });
    }
    let mz = exp_mass / f64::from(charge);
    if !mz.is_finite() {
        return Err(RowParseError::NonFinite("m/z"));
    }
    Ok(mz)
}

/// Turns split data rows into [`MatchRecord`]s.
///
/// The builder owns the per-import state that depends on row order: the
/// [`RankTracker`] and the [`ModificationVocabulary`]. Rows must therefore be
/// fed in file order.
#[derive(Debug, Clone)]
pub struct MatchRecordBuilder {
    schema: ColumnSchema,
    ranks: RankTracker,
    vocabulary: ModificationVocabulary,
    none_marker: String,
    spectrum_file: String,
}

impl MatchRecordBuilder {
    /// Create a builder for rows laid out according to `schema`
    pub fn new(schema: ColumnSchema) -> Self {
        Self {
            schema,
            ranks: RankTracker::new(),
            vocabulary: ModificationVocabulary::new(),
            none_marker: NO_MODIFICATION.to_string(),
            spectrum_file: String::new(),
        }
    }

    /// Set the spectrum file name used as spectrum key prefix
    pub fn spectrum_file(mut self, name: impl Into<String>) -> Self {
        self.spectrum_file = name.into();
        self
    }

    /// Set the modification field value meaning "no modification"
    pub fn none_marker(mut self, marker: impl Into<String>) -> Self {
        self.none_marker = marker.into();
        self
    }

    /// Column schema the rows follow
    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    /// Modifications seen so far
    pub fn vocabulary(&self) -> &ModificationVocabulary {
        &self.vocabulary
    }

    /// Rank state accumulated so far
    pub fn ranks(&self) -> &RankTracker {
        &self.ranks
    }

    /// Build the record for one data row.
    ///
    /// `row_id` is the source line number of the row. Every failure is
    /// returned to the caller; nothing is defaulted.
    pub fn build(&mut self, row_id: u64, fields: &[&str]) -> Result<MatchRecord, RowParseError> {
        let title = self.required(fields, FixedRole::SpectrumTitle)?;
        let sequence = self.required(fields, FixedRole::Sequence)?;
        let exp_mass = parse_f64(self.required(fields, FixedRole::ExpMass)?, header::EXP_MASS)?;
        let pep_mass = parse_f64(self.required(fields, FixedRole::PepMass)?, header::PEP_MASS)?;
        let modification_text = self.required(fields, FixedRole::Modification)?;
        let score = parse_f64(self.required(fields, FixedRole::Score)?, header::SCORE)?;
        let charge = parse_charge(self.required(fields, FixedRole::Charge)?)?;

        let mz = match self.schema.index_of(FixedRole::Mz) {
            Some(index) => parse_f64(field_at(fields, index, header::MZ)?, header::MZ)?,
            None => derive_mz(exp_mass, charge)?,
        };

        let mass_error = exp_mass - pep_mass;
        if !mass_error.is_finite() {
            return Err(RowParseError::NonFinite("mass error"));
        }

        let extras = self
            .schema
            .extra_columns()
            .map(|(index, name)| {
                field_at(fields, index, name).map(|value| (name.to_string(), value.to_string()))
            })
            .collect::<Result<IndexMap<_, _>, _>>()?;

        let modifications =
            parse_modifications(modification_text, &self.none_marker, &mut self.vocabulary)?;

        let rank = self.ranks.next_rank(title);

        Ok(MatchRecord {
            row_id,
            spectrum_key: spectrum_key(&self.spectrum_file, title, rank),
            title: title.to_string(),
            rank,
            sequence: sequence.to_string(),
            modifications,
            modification_text: modification_text.to_string(),
            mass_error,
            score,
            charge,
            mz,
            extras,
        })
    }

    fn required<'a>(&self, fields: &[&'a str], role: FixedRole) -> Result<&'a str, RowParseError> {
        let index = self
            .schema
            .index_of(role)
            .ok_or(RowParseError::MissingRole(role))?;
        field_at(fields, index, role.header_name())
    }
}

fn field_at<'a>(fields: &[&'a str], index: usize, column: &str) -> Result<&'a str, RowParseError> {
    fields
        .get(index)
        .copied()
        .ok_or_else(|| RowParseError::MissingField {
            column: column.to_string(),
            index,
            found: fields.len(),
        })
}

fn parse_f64(value: &str, column: &'static str) -> Result<f64, RowParseError> {
    match value.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(parsed),
        _ => Err(RowParseError::InvalidNumber {
            column,
            value: value.to_string(),
        }),
    }
}

fn parse_charge(value: &str) -> Result<i32, RowParseError> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| RowParseError::InvalidNumber {
            column: header::CHARGE,
            value: value.to_string(),
        })
}
