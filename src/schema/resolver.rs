use std::fmt;

use serde::Serialize;

use crate::vocabulary::ExtraColumnRegistry;

use super::error::SchemaError;
use super::header;

/// One of the eight column roles with a fixed meaning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FixedRole {
    /// `spectrum_title`
    SpectrumTitle,
    /// `peptide`
    Sequence,
    /// `exp_mass`
    ExpMass,
    /// `pep_mass`
    PepMass,
    /// `modification`
    Modification,
    /// `score`
    Score,
    /// `charge`
    Charge,
    /// `mz`
    Mz,
}

impl FixedRole {
    /// All fixed roles in declaration order
    pub const ALL: [FixedRole; 8] = [
        FixedRole::SpectrumTitle,
        FixedRole::Sequence,
        FixedRole::ExpMass,
        FixedRole::PepMass,
        FixedRole::Modification,
        FixedRole::Score,
        FixedRole::Charge,
        FixedRole::Mz,
    ];

    /// Map an exact header token to its role
    pub fn from_header(token: &str) -> Option<Self> {
        match token {
            header::SPECTRUM_TITLE => Some(Self::SpectrumTitle),
            header::PEPTIDE => Some(Self::Sequence),
            header::EXP_MASS => Some(Self::ExpMass),
            header::PEP_MASS => Some(Self::PepMass),
            header::MODIFICATION => Some(Self::Modification),
            header::SCORE => Some(Self::Score),
            header::CHARGE => Some(Self::Charge),
            header::MZ => Some(Self::Mz),
            _ => None,
        }
    }

    /// Header token naming this role
    pub fn header_name(self) -> &'static str {
        match self {
            Self::SpectrumTitle => header::SPECTRUM_TITLE,
            Self::Sequence => header::PEPTIDE,
            Self::ExpMass => header::EXP_MASS,
            Self::PepMass => header::PEP_MASS,
            Self::Modification => header::MODIFICATION,
            Self::Score => header::SCORE,
            Self::Charge => header::CHARGE,
            Self::Mz => header::MZ,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FixedRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header_name())
    }
}

/// Role of a single header column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum ColumnRole {
    /// A recognized column
    Fixed(FixedRole),
    /// Any other column, stored verbatim under its header text
    Extra {
        /// Original header text
        name: String,
        /// 1-based storage position in the match table (9..)
        position: usize,
    },
}

/// Column layout inferred from a header row.
///
/// Every header index carries exactly one [`ColumnRole`]. The schema is built
/// once per import and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    roles: Vec<ColumnRole>,
    fixed: [Option<usize>; 8],
    extras: ExtraColumnRegistry,
    extra_indices: Vec<usize>,
}

impl ColumnSchema {
    /// Resolve a raw header line, splitting on tabs.
    pub fn resolve(header_line: &str) -> Result<Self, SchemaError> {
        let line = header_line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return Err(SchemaError::EmptyInput);
        }
        Self::from_fields(line.split('\t'))
    }

    /// Resolve already-split header tokens.
    ///
    /// Trailing empty tokens (a header line ending in tabs) are dropped; an
    /// empty token before the last named column is an error.
    pub fn from_fields<'a, I>(fields: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tokens: Vec<&str> = fields.into_iter().collect();
        while tokens.last().is_some_and(|t| t.is_empty()) {
            tokens.pop();
        }

        let mut roles = Vec::new();
        let mut fixed = [None; 8];
        let mut extras = ExtraColumnRegistry::new();
        let mut extra_indices = Vec::new();

        for (index, token) in tokens.into_iter().enumerate() {
            let role = match FixedRole::from_header(token) {
                Some(role) => {
                    if fixed[role.slot()].is_some() {
                        return Err(SchemaError::DuplicateColumn {
                            name: token.to_string(),
                            index,
                        });
                    }
                    fixed[role.slot()] = Some(index);
                    ColumnRole::Fixed(role)
                }
                None => {
                    if token.is_empty() {
                        return Err(SchemaError::EmptyColumnName(index));
                    }
                    if extras.position(token).is_some() {
                        return Err(SchemaError::DuplicateColumn {
                            name: token.to_string(),
                            index,
                        });
                    }
                    let position = extras.register(token);
                    extra_indices.push(index);
                    ColumnRole::Extra {
                        name: token.to_string(),
                        position,
                    }
                }
            };
            roles.push(role);
        }

        if fixed[FixedRole::SpectrumTitle.slot()].is_none() {
            return Err(SchemaError::MissingSpectrumTitle);
        }

        Ok(Self {
            roles,
            fixed,
            extras,
            extra_indices,
        })
    }

    /// Header index of a fixed role, if the header carried it
    pub fn index_of(&self, role: FixedRole) -> Option<usize> {
        self.fixed[role.slot()]
    }

    /// Whether the header carried the role
    pub fn has(&self, role: FixedRole) -> bool {
        self.index_of(role).is_some()
    }

    /// Role of the column at a header index
    pub fn role_at(&self, index: usize) -> Option<&ColumnRole> {
        self.roles.get(index)
    }

    /// All roles in header order
    pub fn roles(&self) -> &[ColumnRole] {
        &self.roles
    }

    /// Number of header columns
    pub fn width(&self) -> usize {
        self.roles.len()
    }

    /// Registry of extra columns
    pub fn extras(&self) -> &ExtraColumnRegistry {
        &self.extras
    }

    /// `(header index, name)` of each extra column, in storage order
    pub fn extra_columns(&self) -> impl Iterator<Item = (usize, &str)> {
        self.extra_indices
            .iter()
            .copied()
            .zip(self.extras.names())
    }

    /// Names of the score-like attributes shown next to each match:
    /// `Score`, `Modification`, then every extra column.
    pub fn score_names(&self) -> Vec<String> {
        let mut names = vec!["Score".to_string(), "Modification".to_string()];
        names.extend(self.extras.names().map(str::to_string));
        names
    }
}
