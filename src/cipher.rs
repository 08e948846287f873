//! Password-based encryption using scrypt + AES-256-CBC
//!
//! This module implements deterministic password-based encryption using:
//! - scrypt for key derivation from password and salt
//! - AES-256-CBC with PKCS#7 padding and a constant all-zero IV
//!
//! Ciphertexts carry no metadata: no salt, no IV, no version. Identical
//! plaintexts under the same password and salt always encrypt to identical
//! ciphertexts, and nothing authenticates the ciphertext. Output is
//! byte-compatible with Node.js `crypto.scryptSync` + `createCipheriv`
//! using their default scrypt cost parameters.

use std::fmt;

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use scrypt::{Params, scrypt};
use zeroize::Zeroizing;

use crate::error::{CryptoError, DEFAULT_NAMESPACE, ErrorKind, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;
type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Cipher identifier, as named by OpenSSL
pub const CIPHER_NAME: &str = "aes-256-cbc";

/// Length of derived key in bytes
pub const KEY_LEN: usize = 32;

/// AES block size in bytes
pub const BLOCK_LEN: usize = 16;

/// Initialization vector, used for every message
pub const IV: [u8; BLOCK_LEN] = [0u8; BLOCK_LEN];

/// scrypt log2(N) parameter (CPU/memory cost, N = 16384)
pub const SCRYPT_LOG_N: u8 = 14;

/// scrypt r parameter (block size)
pub const SCRYPT_R: u32 = 8;

/// scrypt p parameter (parallelization)
pub const SCRYPT_P: u32 = 1;

/// Encrypts and decrypts buffers under a key derived from a password and
/// an optional salt.
///
/// The key is re-derived on every call; the instance itself only holds the
/// password, the salt and the error namespace, none of which change after
/// construction.
#[derive(Clone)]
pub struct PasswordCipher {
    password: Zeroizing<Vec<u8>>,
    salt: String,
    namespace: &'static str,
}

impl PasswordCipher {
    /// Create a cipher for `password`.
    ///
    /// Text passwords are used as their UTF-8 bytes. A missing salt is the
    /// empty string.
    pub fn new(password: impl AsRef<[u8]>, salt: Option<&str>) -> Self {
        Self {
            password: Zeroizing::new(password.as_ref().to_vec()),
            salt: salt.unwrap_or_default().to_owned(),
            namespace: DEFAULT_NAMESPACE,
        }
    }

    /// Tag every error this cipher produces with `namespace` instead of the
    /// crate default.
    pub fn with_namespace(mut self, namespace: &'static str) -> Self {
        self.namespace = namespace;
        self
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    /// Encrypt `plaintext`, returning raw ciphertext bytes.
    ///
    /// The ciphertext is always a non-empty multiple of [`BLOCK_LEN`].
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let fail = |e: BoxedSource| self.error(ErrorKind::EncryptFailure, plaintext.len(), e);

        let key = self.derive_key().map_err(fail)?;
        let cipher = Aes256CbcEnc::new_from_slices(key.as_slice(), &IV)
            .map_err(|e| fail(Box::new(e)))?;
        let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            len = plaintext.len(),
            namespace = self.namespace,
            "encrypted buffer"
        );

        Ok(ciphertext)
    }

    /// Decrypt `ciphertext`, returning the plaintext bytes.
    ///
    /// The plaintext must be valid UTF-8. A wrong password or salt usually
    /// fails padding removal; when it does not, the garbage it yields is
    /// rejected by UTF-8 validation in most cases.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.decrypt_to_string(ciphertext).map(String::into_bytes)
    }

    /// Decrypt `ciphertext` into text.
    pub fn decrypt_to_string(&self, ciphertext: &[u8]) -> Result<String> {
        let fail = |e: BoxedSource| self.error(ErrorKind::DecryptFailure, ciphertext.len(), e);

        let key = self.derive_key().map_err(fail)?;
        let cipher = Aes256CbcDec::new_from_slices(key.as_slice(), &IV)
            .map_err(|e| fail(Box::new(e)))?;
        let plaintext = cipher
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|e| fail(Box::new(e)))?;
        let text = String::from_utf8(plaintext).map_err(|e| {
            // Don't leave the decrypted bytes behind in freed memory.
            drop(Zeroizing::new(e.into_bytes()));
            fail("invalid utf-8 plaintext".into())
        })?;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            len = ciphertext.len(),
            namespace = self.namespace,
            "decrypted buffer"
        );

        Ok(text)
    }

    /// Derive the 32-byte key from the stored password and salt.
    fn derive_key(&self) -> std::result::Result<Zeroizing<[u8; KEY_LEN]>, BoxedSource> {
        let params = Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, KEY_LEN)?;

        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        scrypt(&self.password, self.salt.as_bytes(), &params, key.as_mut())?;

        Ok(key)
    }

    fn error(&self, kind: ErrorKind, len: usize, source: BoxedSource) -> CryptoError {
        CryptoError::with_boxed_source(self.namespace, kind, len, source).trace()
    }
}

impl fmt::Debug for PasswordCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordCipher")
            .field("password", &"<redacted>")
            .field("salt", &self.salt)
            .field("namespace", &self.namespace)
            .finish()
    }
}
