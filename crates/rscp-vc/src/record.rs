//! # Registry Records
//!
//! The only shape this stack hands to a registry writer. It is built from
//! an [`IssuedCredential`], whose attributes came out of the privacy
//! gate, and it has no field that could hold anything else.

use serde::{Deserialize, Serialize};

use rscp_core::{RscpPublicAttributes, Timestamp};

use crate::builder::IssuedCredential;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegistryRecord {
    /// `urn:rscp:credential:...` identifier.
    pub credential_id: String,
    /// `RS-...` certificate number.
    pub certificate_number: String,
    /// Verification code, storage form.
    pub verification_code: String,
    /// Uppercase 3-letter issuer code.
    pub issuer_code: String,
    /// The five gate-checked attributes.
    pub public_attributes: RscpPublicAttributes,
    /// When the credential was issued.
    pub issued_at: Timestamp,
    /// Base64 HMAC signature over the canonical payload.
    pub signature: String,
    /// SHA-256 fingerprint of the canonical payload.
    pub credential_hash: String,
}

impl RegistryRecord {
    pub(crate) fn from_issued(issued: &IssuedCredential) -> Self {
        let payload = &issued.signed.payload;
        Self {
            credential_id: payload.credential_id.clone(),
            certificate_number: payload.certificate_number.clone(),
            verification_code: payload.verification_code.clone(),
            issuer_code: payload.issuer_code.clone(),
            public_attributes: payload.public_attributes.clone(),
            issued_at: payload.issued_at,
            signature: issued.signed.signature.clone(),
            credential_hash: issued.credential_hash.clone(),
        }
    }
}
