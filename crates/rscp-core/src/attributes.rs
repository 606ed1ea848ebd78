//! # Public Attributes
//!
//! The five fields that may leave an issuer's system. Nothing else about a
//! holder is representable here: the struct rejects unknown fields on
//! deserialization, so a registry schema built on it cannot carry
//! contact details, identity documents or assessment data.
//!
//! Values of this type are meant to come out of the privacy gate in
//! `rscp-protocol`, which checks shape and date ordering. Deserializing
//! one directly only checks that the five fields exist.

use serde::{Deserialize, Serialize};

use crate::level::CertificationLevel;

/// Wire names of the public attributes, in canonical order.
pub const PUBLIC_ATTRIBUTE_FIELDS: [&str; 5] =
    ["givenName", "familyName", "level", "validFrom", "validUntil"];

/// The only holder data the protocol publishes.
///
/// Field declaration order is the canonical signing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RscpPublicAttributes {
    /// Holder's given name.
    pub given_name: String,
    /// Holder's family name.
    pub family_name: String,
    /// Certification level.
    pub level: CertificationLevel,
    /// Start of validity (ISO-8601 date or datetime).
    pub valid_from: String,
    /// End of validity (ISO-8601 date or datetime), strictly after `valid_from`.
    pub valid_until: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RscpPublicAttributes {
        RscpPublicAttributes {
            given_name: "Asha".into(),
            family_name: "Rao".into(),
            level: CertificationLevel::Silver,
            valid_from: "2026-01-01".into(),
            valid_until: "2028-01-01".into(),
        }
    }

    #[test]
    fn serializes_in_canonical_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"givenName":"Asha","familyName":"Rao","level":"silver","validFrom":"2026-01-01","validUntil":"2028-01-01"}"#
        );
        let mut last = 0;
        for field in PUBLIC_ATTRIBUTE_FIELDS {
            let pos = json.find(&format!("\"{field}\"")).unwrap();
            assert!(pos >= last);
            last = pos;
        }
    }

    #[test]
    fn unknown_fields_are_unrepresentable() {
        let json = r#"{"givenName":"Asha","familyName":"Rao","level":"silver",
            "validFrom":"2026-01-01","validUntil":"2028-01-01","email":"a@b.c"}"#;
        assert!(serde_json::from_str::<RscpPublicAttributes>(json).is_err());
    }

    #[test]
    fn roundtrip() {
        let json = serde_json::to_string(&sample()).unwrap();
        let back: RscpPublicAttributes = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }
}
