//! # QR Payload
//!
//! Compact JSON embedded in a certificate's QR code:
//!
//! ```json
//! {"v":1,"cert":"RS-2026-G-IN-SWG-000001-8","code":"A3B7K9MD","level":"gold","validUntil":"2029-01-01"}
//! ```
//!
//! `level` and `validUntil` are optional. The verifier uses `validUntil`
//! for its expiry check and cross-checks `cert` and `code` against the
//! identifiers presented alongside the QR code.

use serde::{Deserialize, Serialize};

use rscp_core::{clean_code, CertificationLevel};

/// Current QR payload format version.
pub const QR_PAYLOAD_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrPayload {
    /// Format version.
    pub v: u32,
    /// Certificate number.
    pub cert: String,
    /// Verification code, storage form.
    pub code: String,
    /// Certification level, shown by scanners.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<CertificationLevel>,
    /// Expiry date checked by the verifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
}

impl QrPayload {
    pub fn new(certificate_number: &str, verification_code: &str) -> Self {
        Self {
            v: QR_PAYLOAD_VERSION,
            cert: certificate_number.to_string(),
            code: clean_code(verification_code),
            level: None,
            valid_until: None,
        }
    }

    pub fn with_level(mut self, level: CertificationLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_valid_until(mut self, valid_until: impl Into<String>) -> Self {
        self.valid_until = Some(valid_until.into());
        self
    }

    /// Compact JSON for the QR encoder.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode scanned QR text.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
