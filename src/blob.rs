//! Binary encoding of [`SpectrumMatch`] objects for the match table's blob column.
//!
//! The layout is one format-version byte followed by the `bincode` encoding of
//! the match. It is a private persistence format: only readers built from this
//! crate are expected to decode it.

use crate::record::SpectrumMatch;

/// Version byte written in front of every blob
pub const BLOB_FORMAT_VERSION: u8 = 1;

/// Errors raised while encoding or decoding a match blob
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// The blob has no bytes at all
    #[error("match blob is empty")]
    Empty,

    /// The blob was written by an unknown format version
    #[error("unsupported match blob version {0}")]
    UnsupportedVersion(u8),

    /// bincode failed to encode or decode the payload
    #[error("bincode error: {0}")]
    Codec(#[from] bincode::Error),
}

/// Encode a match into a self-contained byte blob
pub fn encode(spectrum_match: &SpectrumMatch) -> Result<Vec<u8>, BlobError> {
    let size = bincode::serialized_size(spectrum_match)?;
    let mut bytes = Vec::with_capacity(size as usize + 1);
    bytes.push(BLOB_FORMAT_VERSION);
    bincode::serialize_into(&mut bytes, spectrum_match)?;
    Ok(bytes)
}

/// Decode a blob produced by [`encode`]
pub fn decode(bytes: &[u8]) -> Result<SpectrumMatch, BlobError> {
    let (&version, payload) = bytes.split_first().ok_or(BlobError::Empty)?;
    if version != BLOB_FORMAT_VERSION {
        return Err(BlobError::UnsupportedVersion(version));
    }
    Ok(bincode::deserialize(payload)?)
}
