//! # Canonical Serialization
//!
//! `CanonicalBytes` is the sole construction path for bytes that are
//! signed or hashed.
//!
//! ## Security Invariant
//!
//! The inner field is private and the only constructor takes a
//! [`SignaturePayload`]. Any function that signs or hashes must accept
//! `&CanonicalBytes`, so an arbitrary `serde_json::Value` (whose key order
//! is a property of the map, not of the protocol) can never reach a
//! signature.
//!
//! ## Byte Layout
//!
//! Compact JSON with members in one fixed sequence:
//!
//! ```text
//! credentialId, certificateNumber, verificationCode,
//! publicAttributes{givenName, familyName, level, validFrom, validUntil},
//! issuerCode, issuedAt
//! ```
//!
//! The order comes from struct declaration order, serialized directly with
//! `serde_json::to_vec`. The payload is never routed through
//! `serde_json::Value`, whose key order depends on how the map was built.

use crate::error::CanonicalizationError;
use crate::payload::SignaturePayload;

/// Deterministic UTF-8 bytes of a signature payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Canonicalize a signature payload.
    pub fn new(payload: &SignaturePayload) -> Result<Self, CanonicalizationError> {
        Ok(Self(serde_json::to_vec(payload)?))
    }

    /// Access the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::RscpPublicAttributes;
    use crate::level::CertificationLevel;
    use crate::temporal::Timestamp;

    fn payload() -> SignaturePayload {
        SignaturePayload {
            credential_id: "urn:rscp:credential:swg:2026:000001".into(),
            certificate_number: "RS-2026-G-IN-SWG-000001-8".into(),
            verification_code: "A3B7K9MD".into(),
            public_attributes: RscpPublicAttributes {
                given_name: "Asha".into(),
                family_name: "Rao".into(),
                level: CertificationLevel::Gold,
                valid_from: "2026-01-01".into(),
                valid_until: "2029-01-01".into(),
            },
            issuer_code: "SWG".into(),
            issued_at: Timestamp::parse("2026-01-01T09:30:00Z").unwrap(),
        }
    }

    #[test]
    fn exact_canonical_form() {
        let bytes = CanonicalBytes::new(&payload()).unwrap();
        let expected = concat!(
            r#"{"credentialId":"urn:rscp:credential:swg:2026:000001","#,
            r#""certificateNumber":"RS-2026-G-IN-SWG-000001-8","#,
            r#""verificationCode":"A3B7K9MD","#,
            r#""publicAttributes":{"givenName":"Asha","familyName":"Rao","level":"gold","#,
            r#""validFrom":"2026-01-01","validUntil":"2029-01-01"},"#,
            r#""issuerCode":"SWG","issuedAt":"2026-01-01T09:30:00Z"}"#
        );
        assert_eq!(std::str::from_utf8(bytes.as_bytes()).unwrap(), expected);
    }

    #[test]
    fn independent_of_source_key_order() {
        // Same payload arriving with members in a different order.
        let shuffled = r#"{"issuedAt":"2026-01-01T09:30:00Z","issuerCode":"SWG",
            "publicAttributes":{"validUntil":"2029-01-01","validFrom":"2026-01-01",
            "level":"gold","familyName":"Rao","givenName":"Asha"},
            "verificationCode":"A3B7K9MD","certificateNumber":"RS-2026-G-IN-SWG-000001-8",
            "credentialId":"urn:rscp:credential:swg:2026:000001"}"#;
        let parsed: SignaturePayload = serde_json::from_str(shuffled).unwrap();
        assert_eq!(
            CanonicalBytes::new(&parsed).unwrap(),
            CanonicalBytes::new(&payload()).unwrap()
        );
    }

    #[test]
    fn field_change_changes_bytes() {
        let mut other = payload();
        other.public_attributes.family_name = "Roa".into();
        assert_ne!(
            CanonicalBytes::new(&other).unwrap(),
            CanonicalBytes::new(&payload()).unwrap()
        );
    }

    #[test]
    fn non_ascii_is_emitted_as_utf8() {
        let mut p = payload();
        p.public_attributes.given_name = "Zoë".into();
        let bytes = CanonicalBytes::new(&p).unwrap();
        let s = std::str::from_utf8(bytes.as_bytes()).unwrap();
        assert!(s.contains("\"givenName\":\"Zoë\""));
        assert!(!bytes.is_empty());
        assert_eq!(bytes.len(), bytes.as_ref().len());
    }
}
