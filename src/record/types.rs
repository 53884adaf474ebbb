use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A modification placed on a residue
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModificationMatch {
    /// Modification name as written in the file (e.g. "Oxidation")
    pub name: String,
    /// 1-based residue position
    pub position: u32,
    /// Variable (as opposed to fixed) modification
    pub variable: bool,
}

impl ModificationMatch {
    /// Create a variable modification at a residue position
    pub fn new(name: impl Into<String>, position: u32) -> Self {
        Self {
            name: name.into(),
            position,
            variable: true,
        }
    }
}

/// A peptide sequence with its modifications
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peptide {
    /// Amino acid sequence
    pub sequence: String,
    /// Modifications in file order
    pub modifications: Vec<ModificationMatch>,
}

impl Peptide {
    /// Create a peptide from a sequence and its modifications
    pub fn new(sequence: impl Into<String>, modifications: Vec<ModificationMatch>) -> Self {
        Self {
            sequence: sequence.into(),
            modifications,
        }
    }
}

/// Advocate recorded when the search engine is not known
pub const UNKNOWN_ADVOCATE: &str = "*";

/// A candidate peptide explaining a spectrum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeptideAssumption {
    /// Candidate peptide
    pub peptide: Peptide,
    /// 1-based rank among the candidates of the spectrum
    pub rank: u32,
    /// Precursor charge state
    pub charge: i32,
    /// Signed mass error, `exp_mass - pep_mass`
    pub mass_error: f64,
    /// Raw score reported by the search engine
    pub raw_score: f64,
    /// Search engine that proposed the peptide
    pub advocate: String,
}

impl PeptideAssumption {
    /// Create an assumption for a peptide with an unknown advocate
    pub fn new(peptide: Peptide, rank: u32, charge: i32, mass_error: f64, raw_score: f64) -> Self {
        Self {
            peptide,
            rank,
            charge,
            mass_error,
            raw_score,
            advocate: UNKNOWN_ADVOCATE.to_string(),
        }
    }

    /// Set the search engine that proposed the peptide
    pub fn advocate(mut self, advocate: impl Into<String>) -> Self {
        self.advocate = advocate.into();
        self
    }
}

/// The object persisted in the match blob: a spectrum key and its best assumption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumMatch {
    /// Unique key, `<spectrum file>_cus_<title>_rank_<rank>`
    pub key: String,
    /// Best-scoring peptide assumption
    pub best_assumption: PeptideAssumption,
}

impl SpectrumMatch {
    /// Create a match from its key and best assumption
    pub fn new(key: impl Into<String>, best_assumption: PeptideAssumption) -> Self {
        Self {
            key: key.into(),
            best_assumption,
        }
    }
}

/// Fully resolved data row
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    /// Source line number (header is line 0)
    pub row_id: u64,
    /// Unique spectrum key including the rank suffix
    pub spectrum_key: String,
    /// Raw spectrum title
    pub title: String,
    /// 1-based rank of this match among matches of the same title
    pub rank: u32,
    /// Peptide sequence
    pub sequence: String,
    /// Parsed modifications
    pub modifications: Vec<ModificationMatch>,
    /// Modification field as written in the file
    pub modification_text: String,
    /// Signed mass error, `exp_mass - pep_mass`
    pub mass_error: f64,
    /// Raw score
    pub score: f64,
    /// Precursor charge
    pub charge: i32,
    /// Precursor m/z, from the `mz` column or `exp_mass / charge`
    pub mz: f64,
    /// Extra column values keyed by header name, in storage order
    pub extras: IndexMap<String, String>,
}

impl MatchRecord {
    /// Absolute mass error as stored in the match table
    pub fn abs_mass_error(&self) -> f64 {
        self.mass_error.abs()
    }

    /// Build the object graph stored in the blob column
    pub fn to_spectrum_match(&self) -> SpectrumMatch {
        let peptide = Peptide::new(self.sequence.clone(), self.modifications.clone());
        let assumption = PeptideAssumption::new(
            peptide,
            self.rank,
            self.charge,
            self.mass_error,
            self.score,
        );
        SpectrumMatch::new(self.spectrum_key.clone(), assumption)
    }
}
