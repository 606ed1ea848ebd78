//! # Signature Payload
//!
//! The exact data an issuer signs, and the envelope that carries the
//! signature. Both structs declare their fields in canonical order; see
//! [`crate::canonical`] for why that matters.

use serde::{Deserialize, Serialize};

use crate::attributes::RscpPublicAttributes;
use crate::temporal::Timestamp;

/// The signed portion of a credential.
///
/// Created once at issuance. The core computes and verifies over it but
/// never stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignaturePayload {
    /// `urn:rscp:credential:...`
    pub credential_id: String,
    /// `RS-...` certificate number.
    pub certificate_number: String,
    /// Verification code in storage form.
    pub verification_code: String,
    /// Gate-checked public attributes.
    pub public_attributes: RscpPublicAttributes,
    /// Uppercase 3-letter issuer code.
    pub issuer_code: String,
    /// Issuance instant.
    pub issued_at: Timestamp,
}

/// A payload together with its base64 HMAC signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedCredential {
    /// What was signed.
    pub payload: SignaturePayload,
    /// Standard base64 HMAC-SHA256 over the canonical payload.
    pub signature: String,
    /// When the signature was produced.
    pub signed_at: Timestamp,
}
