//! Header tokens recognized as fixed column roles.
//!
//! Matching is exact and case-sensitive; any other token becomes an extra column.

/// Spectrum title (required)
pub const SPECTRUM_TITLE: &str = "spectrum_title";
/// Peptide sequence
pub const PEPTIDE: &str = "peptide";
/// Experimental (observed) precursor mass
pub const EXP_MASS: &str = "exp_mass";
/// Theoretical peptide mass
pub const PEP_MASS: &str = "pep_mass";
/// Modification annotations, `name@position[delta];...`
pub const MODIFICATION: &str = "modification";
/// Raw identification score
pub const SCORE: &str = "score";
/// Precursor charge state
pub const CHARGE: &str = "charge";
/// Precursor m/z (optional, derived from `exp_mass / charge` when absent)
pub const MZ: &str = "mz";
