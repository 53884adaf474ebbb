use crate::vocabulary::ModificationVocabulary;

use super::error::RowParseError;
use super::types::ModificationMatch;

/// Parse a modification field such as `Oxidation@5[15.99];Phospho@7[79.97]`.
///
/// Returns an empty list for an empty field or the `none_marker`. Each
/// `;`-separated token is split on its first `@`; the position is the 1-based
/// integer before the first `[` and the bracketed text is ignored. A single
/// trailing `;` is accepted, any other empty token is an error. Names are
/// registered in `vocabulary` only when the whole field parses.
pub fn parse_modifications(
    field: &str,
    none_marker: &str,
    vocabulary: &mut ModificationVocabulary,
) -> Result<Vec<ModificationMatch>, RowParseError> {
    if field.is_empty() || field == none_marker {
        return Ok(Vec::new());
    }

    let list = field.strip_suffix(';').unwrap_or(field);
    let mut modifications = Vec::new();
    for token in list.split(';') {
        if token.is_empty() {
            return Err(RowParseError::InvalidModification {
                token: field.to_string(),
                reason: "empty token",
            });
        }
        modifications.push(parse_token(token)?);
    }
    for modification in &modifications {
        vocabulary.register(&modification.name);
    }
    Ok(modifications)
}

fn parse_token(token: &str) -> Result<ModificationMatch, RowParseError> {
    let invalid = |reason: &'static str| RowParseError::InvalidModification {
        token: token.to_string(),
        reason,
    };

    let (name, remainder) = token.split_once('@').ok_or_else(|| invalid("missing '@'"))?;
    if name.is_empty() {
        return Err(invalid("empty name"));
    }

    let position = remainder.split('[').next().unwrap_or_default().trim();
    let position: u32 = position
        .parse()
        .map_err(|_| invalid("position is not a positive integer"))?;
    if position == 0 {
        return Err(invalid("positions are 1-based"));
    }

    Ok(ModificationMatch::new(name, position))
}
