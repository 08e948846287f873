use std::error::Error as StdError;

use thiserror::Error;

/// Namespace used when the caller does not configure one.
pub const DEFAULT_NAMESPACE: &str = "pwcrypt";

/// Where a failure originated, from the point of view of a service that
/// embeds this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCategory {
    /// The failure happened inside server-side machinery (key derivation,
    /// cipher, digest). Every error produced by this crate uses this
    /// category.
    BackEnd,

    /// The failure is attributable to the client or caller-facing layer.
    /// Reserved for higher layers that rewrap errors from this crate.
    FrontEnd,
}

/// The operation that could not be completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The SHA-256 digest could not be produced.
    HashFailure,
    /// Key derivation or encryption failed.
    EncryptFailure,
    /// Key derivation, decryption, padding removal or UTF-8 decoding
    /// failed. A wrong password and corrupted ciphertext are
    /// indistinguishable here.
    DecryptFailure,
}

impl ErrorKind {
    fn verb(self) -> &'static str {
        match self {
            Self::HashFailure => "hash",
            Self::EncryptFailure => "encrypt",
            Self::DecryptFailure => "decrypt",
        }
    }
}

#[derive(Debug, Error)]
#[error("{namespace}: {msg}")]
pub struct CryptoError {
    /// Origin classification, always provided.
    pub category: ErrorCategory,
    /// Which operation failed.
    pub kind: ErrorKind,
    /// Error taxonomy the producing component was configured with.
    pub namespace: &'static str,
    /// Length of the input buffer the failed operation was given.
    pub len: usize,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    msg: String,
}

impl CryptoError {
    /// Creates a back-end error for `kind` over a buffer of `len` bytes,
    /// with the standard "could not ... buffer with length N" message.
    pub fn new(namespace: &'static str, kind: ErrorKind, len: usize) -> Self {
        Self {
            category: ErrorCategory::BackEnd,
            kind,
            namespace,
            len,
            source: None,
            msg: format!("could not {} buffer with length {}", kind.verb(), len),
        }
    }

    /// Like [`CryptoError::new`], but retains the originating library error.
    pub fn with_source(
        namespace: &'static str,
        kind: ErrorKind,
        len: usize,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::with_boxed_source(namespace, kind, len, Box::new(source))
    }

    pub(crate) fn with_boxed_source(
        namespace: &'static str,
        kind: ErrorKind,
        len: usize,
        source: Box<dyn StdError + Send + Sync + 'static>,
    ) -> Self {
        Self {
            source: Some(source),
            ..Self::new(namespace, kind, len)
        }
    }

    /// The message carried by the error, without the namespace prefix.
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Returns the preserved source error if present.
    pub fn source_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    /// Wraps the current error with a higher-level message while preserving
    /// the original as source.
    pub fn with_context(self, msg: impl Into<String>) -> Self {
        Self {
            category: self.category,
            kind: self.kind,
            namespace: self.namespace,
            len: self.len,
            msg: msg.into(),
            source: Some(Box::new(self)),
        }
    }

    #[cfg(feature = "tracing")]
    pub(crate) fn trace(self) -> Self {
        tracing::debug!(
            namespace = self.namespace,
            kind = ?self.kind,
            len = self.len,
            cause = ?self.source,
            "{}",
            self.msg
        );
        self
    }

    #[cfg(not(feature = "tracing"))]
    pub(crate) fn trace(self) -> Self {
        self
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, CryptoError>;
