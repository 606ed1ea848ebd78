//! # Signing Keys
//!
//! A 256-bit HMAC key written as 64 hex characters in either case. The
//! shape check is the whole validation: any 32 bytes are a usable key.
//!
//! ## Security Invariant
//!
//! `SigningKey` does not implement `Serialize` and its `Debug` output is
//! redacted, so key material cannot leak into logs, responses or
//! credential documents by accident.

use crate::error::CryptoError;

/// Length of a signing key in bytes.
pub const KEY_BYTES: usize = 32;

/// A 256-bit symmetric signing key.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey([u8; KEY_BYTES]);

impl SigningKey {
    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; KEY_BYTES]) -> Self {
        Self(bytes)
    }

    /// Parse a key from exactly 64 hex characters.
    ///
    /// No trimming or prefix stripping: `" 00..00"` and `"0x00..00"` are
    /// rejected.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        if !is_valid_key_hex(s) {
            return Err(CryptoError::InvalidKey(format!(
                "must be {} hex characters, got {} characters",
                KEY_BYTES * 2,
                s.chars().count()
            )));
        }
        let mut bytes = [0u8; KEY_BYTES];
        hex::decode_to_slice(s, &mut bytes).map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
        Ok(Self(bytes))
    }

    /// A fresh key from the OS entropy source.
    pub fn generate() -> Result<Self, CryptoError> {
        let random = rscp_core::random::random_bytes(KEY_BYTES)?;
        let mut bytes = [0u8; KEY_BYTES];
        bytes.copy_from_slice(&random);
        Ok(Self(bytes))
    }

    /// Lowercase hex form, for handing a generated key to an operator.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_BYTES] {
        &self.0
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey([REDACTED])")
    }
}

/// Whether `s` is exactly 64 ASCII hex digits.
pub fn is_valid_key_hex(s: &str) -> bool {
    s.len() == KEY_BYTES * 2 && s.bytes().all(|b| b.is_ascii_hexdigit())
}
