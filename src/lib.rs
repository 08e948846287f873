//! pwcrypt - one-shot SHA-256 hashing and password-based AES-256-CBC
//! encryption, byte-compatible with the Node.js `crypto` defaults.

#![forbid(unsafe_code)]

pub mod cipher;
pub mod error;
pub mod hash;

pub use cipher::PasswordCipher;
pub use error::{CryptoError, ErrorCategory, ErrorKind, Result};
pub use hash::{Digest, hash, hash_hex};
