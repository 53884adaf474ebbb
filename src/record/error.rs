use crate::schema::FixedRole;

/// Errors that make a data row unusable
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowParseError {
    /// A role needed to build a record was never resolved from the header
    #[error("header has no '{0}' column")]
    MissingRole(FixedRole),

    /// The row is shorter than the header index of a column
    #[error("column '{column}' (index {index}) missing, row has {found} fields")]
    MissingField {
        /// Header name of the column
        column: String,
        /// Header index of the column
        index: usize,
        /// Number of fields in the row
        found: usize,
    },

    /// A numeric field failed to parse or is not finite
    #[error("invalid {column} value '{value}'")]
    InvalidNumber {
        /// Header name of the column
        column: &'static str,
        /// Raw field text
        value: String,
    },

    /// A modification token is malformed
    #[error("invalid modification '{token}': {reason}")]
    InvalidModification {
        /// Offending `name@position` token
        token: String,
        /// What is wrong with it
        reason: &'static str,
    },

    /// m/z must be derived but the charge is zero
    #[error("cannot derive m/z from exp_mass {exp_mass} with charge 0")]
    ZeroCharge {
        /// Experimental mass of the row
        exp_mass: f64,
    },

    /// A derived quantity is infinite or NaN
    #[error("derived {0} is not finite")]
    NonFinite(&'static str),
}
