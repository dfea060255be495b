//! Canonical binary snapshot codec.
//!
//! Layout: 4-byte magic, little-endian u16 format version, postcard body.
//! With the `crypto-hash` feature enabled a 32-byte BLAKE3 digest of the
//! body is appended on encode and checked on decode.
//!
//! Postcard encoding is deterministic, so equal tables always produce
//! identical bytes.

use thiserror::Error;

use crate::table::CapTable;

/// File magic for canonical snapshots.
pub const SNAPSHOT_MAGIC: [u8; 4] = *b"CPTB";

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u16 = 1;

const HEADER_LEN: usize = 6;

#[cfg(feature = "crypto-hash")]
const DIGEST_LEN: usize = 32;

/// Errors from snapshot encoding and decoding.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("snapshot header magic mismatch")]
    BadMagic,
    #[error("unsupported snapshot version: {0}")]
    UnsupportedVersion(u16),
    #[error("snapshot truncated")]
    Truncated,
    #[error("snapshot codec error: {0}")]
    Codec(#[from] postcard::Error),
    #[cfg(feature = "crypto-hash")]
    #[error("snapshot digest mismatch")]
    DigestMismatch,
}

/// Encode a cap table into the canonical snapshot format.
pub fn encode_snapshot(table: &CapTable) -> Result<Vec<u8>, FormatError> {
    let body = postcard::to_stdvec(table)?;
    let mut out = Vec::with_capacity(HEADER_LEN + body.len() + 32);
    out.extend_from_slice(&SNAPSHOT_MAGIC);
    out.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
    out.extend_from_slice(&body);
    #[cfg(feature = "crypto-hash")]
    out.extend_from_slice(blake3::hash(&body).as_bytes());
    Ok(out)
}

/// Decode a canonical snapshot back into a cap table.
pub fn decode_snapshot(bytes: &[u8]) -> Result<CapTable, FormatError> {
    if bytes.len() < HEADER_LEN {
        return Err(FormatError::Truncated);
    }
    if bytes[..4] != SNAPSHOT_MAGIC {
        return Err(FormatError::BadMagic);
    }
    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != SNAPSHOT_VERSION {
        return Err(FormatError::UnsupportedVersion(version));
    }
    let body = &bytes[HEADER_LEN..];

    #[cfg(feature = "crypto-hash")]
    let body = {
        if body.len() < DIGEST_LEN {
            return Err(FormatError::Truncated);
        }
        let (body, digest) = body.split_at(body.len() - DIGEST_LEN);
        if blake3::hash(body).as_bytes()[..] != *digest {
            return Err(FormatError::DigestMismatch);
        }
        body
    };

    Ok(postcard::from_bytes(body)?)
}

// =============================================================================
// TESTS
// =============================================================================
