//! # Payload Signatures
//!
//! HMAC-SHA256 over the canonical bytes of a [`SignaturePayload`],
//! encoded as standard base64.
//!
//! ## Security Invariant
//!
//! - The MAC input is always `CanonicalBytes`, never a caller-built string.
//! - Verification recomputes the expected signature and compares the two
//!   strings in constant time. A length mismatch still performs a dummy
//!   comparison.
//! - A mismatch is an outcome, not an error: [`verify_signature`] returns
//!   a [`VerificationOutcome`] and never fails.

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use rscp_core::{CanonicalBytes, SignaturePayload, SignedCredential, Timestamp};

use crate::error::CryptoError;
use crate::key::SigningKey;

type HmacSha256 = Hmac<Sha256>;

/// Result of checking a signature or fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    pub valid: bool,
    /// Human-readable reason when `valid` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VerificationOutcome {
    pub fn ok() -> Self {
        Self { valid: true, error: None }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(reason.into()),
        }
    }
}

/// Constant-time string equality.
pub(crate) fn constant_time_str_eq(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}

fn mac(canonical: &CanonicalBytes, key: &SigningKey) -> Result<Vec<u8>, CryptoError> {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
    mac.update(canonical.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Sign a payload: base64(HMAC-SHA256(key, canonical(payload))).
pub fn sign_payload(payload: &SignaturePayload, key: &SigningKey) -> Result<String, CryptoError> {
    let canonical = CanonicalBytes::new(payload)?;
    Ok(STANDARD.encode(mac(&canonical, key)?))
}

/// Sign a payload and wrap it with the signature and signing time.
pub fn sign_credential(payload: SignaturePayload, key: &SigningKey) -> Result<SignedCredential, CryptoError> {
    let signature = sign_payload(&payload, key)?;
    Ok(SignedCredential {
        payload,
        signature,
        signed_at: Timestamp::now(),
    })
}

/// Check `signature` against a fresh signature of `payload` under `key`.
pub fn verify_signature(payload: &SignaturePayload, signature: &str, key: &SigningKey) -> VerificationOutcome {
    let expected = match sign_payload(payload, key) {
        Ok(sig) => sig,
        Err(e) => return VerificationOutcome::failed(format!("could not recompute signature: {e}")),
    };
    if constant_time_str_eq(signature, &expected) {
        VerificationOutcome::ok()
    } else {
        VerificationOutcome::failed("signature does not match payload")
    }
}
