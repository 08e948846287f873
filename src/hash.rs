//! One-shot SHA-256 hashing

use sha2::{Digest as _, Sha256};

use crate::error::{CryptoError, DEFAULT_NAMESPACE, ErrorKind, Result};

/// Length of a SHA-256 digest in bytes
pub const DIGEST_LEN: usize = 32;

/// A SHA-256 digest
pub type Digest = [u8; DIGEST_LEN];

/// Hash `data` with SHA-256.
///
/// The whole input is hashed in one call; there is no streaming interface.
pub fn hash(data: &[u8]) -> Result<Digest> {
    let output = Sha256::digest(data);
    let digest = Digest::try_from(output.as_slice()).map_err(|e| {
        CryptoError::with_source(DEFAULT_NAMESPACE, ErrorKind::HashFailure, data.len(), e).trace()
    })?;

    #[cfg(feature = "tracing")]
    tracing::trace!(len = data.len(), "hashed buffer");

    Ok(digest)
}

/// Hash `data` with SHA-256 and return the digest as lowercase hex.
pub fn hash_hex(data: &[u8]) -> Result<String> {
    hash(data).map(hex::encode)
}
