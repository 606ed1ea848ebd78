//! Credential fingerprints: SHA-256 hex over the same canonical bytes that
//! are signed. A fingerprint needs no key, so anyone holding a payload can
//! check it against a published hash.

use rscp_core::{sha256_hex, CanonicalBytes, SignaturePayload};

use crate::error::CryptoError;
use crate::sign::{constant_time_str_eq, VerificationOutcome};

/// Lowercase hex SHA-256 of the canonical payload.
pub fn generate_credential_hash(payload: &SignaturePayload) -> Result<String, CryptoError> {
    Ok(sha256_hex(&CanonicalBytes::new(payload)?))
}

/// Compare `expected` (hex, either case) with the payload's fingerprint.
pub fn verify_credential_hash(payload: &SignaturePayload, expected: &str) -> VerificationOutcome {
    let actual = match generate_credential_hash(payload) {
        Ok(h) => h,
        Err(e) => return VerificationOutcome::failed(format!("could not recompute hash: {e}")),
    };
    if constant_time_str_eq(&expected.to_ascii_lowercase(), &actual) {
        VerificationOutcome::ok()
    } else {
        VerificationOutcome::failed("credential hash does not match payload")
    }
}
