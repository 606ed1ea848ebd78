//! # Registry Input
//!
//! The shape a registry writer receives: an issuer code, the gate-checked
//! public attributes, and optional identifiers and signature carried
//! through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use rscp_core::{normalize_issuer_code, RscpPublicAttributes};

use crate::enforce::{detect_forbidden_fields, enforce_public_attributes_only};
use crate::error::ProtocolError;

/// Validated registry submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegistryInput {
    /// Uppercase 3-letter issuer code.
    pub issuer_code: String,
    /// Output of the privacy gate.
    pub public_attributes: RscpPublicAttributes,
    /// `RS-...` certificate number, carried through unchecked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_number: Option<String>,
    /// `urn:rscp:credential:...` identifier, carried through unchecked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
    /// Base64 signature, carried through unchecked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

fn optional_string(input: &Map<String, Value>, field: &str) -> Result<Option<String>, ProtocolError> {
    match input.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ProtocolError::invalid(field, "must be a string")),
    }
}

/// Validate an untyped registry submission.
///
/// Forbidden fields anywhere in the scanned scope fail first. Then the
/// issuer code must be three letters, then `publicAttributes` must pass
/// [`enforce_public_attributes_only`]. Other top-level keys are dropped.
pub fn validate_registry_input(input: &Map<String, Value>) -> Result<RegistryInput, ProtocolError> {
    let forbidden = detect_forbidden_fields(input);
    if let Some(first) = forbidden.first() {
        return Err(ProtocolError::ProtocolViolation {
            field: first.clone(),
            fields: forbidden,
        });
    }

    let issuer_code = match input.get("issuerCode") {
        None | Some(Value::Null) => return Err(ProtocolError::missing("issuerCode")),
        Some(Value::String(s)) => normalize_issuer_code(s)
            .map_err(|_| ProtocolError::invalid("issuerCode", "must be a 3-letter code (A-Z)"))?,
        Some(_) => return Err(ProtocolError::invalid("issuerCode", "must be a string")),
    };

    let public_attributes = match input.get("publicAttributes") {
        None | Some(Value::Null) => return Err(ProtocolError::missing("publicAttributes")),
        Some(Value::Object(attrs)) => enforce_public_attributes_only(attrs)?,
        Some(_) => return Err(ProtocolError::invalid("publicAttributes", "must be an object")),
    };

    Ok(RegistryInput {
        issuer_code,
        public_attributes,
        certificate_number: optional_string(input, "certificateNumber")?,
        credential_id: optional_string(input, "credentialId")?,
        signature: optional_string(input, "signature")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolErrorKind;
    use serde_json::json;

    fn input(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    fn attrs() -> Value {
        json!({
            "givenName": "Asha",
            "familyName": "Rao",
            "level": "bronze",
            "validFrom": "2026-01-01",
            "validUntil": "2027-01-01",
        })
    }

    #[test]
    fn valid_input_with_passthrough_fields() {
        let out = validate_registry_input(&input(json!({
            "issuerCode": "swg",
            "publicAttributes": attrs(),
            "certificateNumber": "RS-2026-B-IN-SWG-000001-0",
            "signature": "c2lnbmF0dXJl",
            "batch": 7,
        })))
        .unwrap();
        assert_eq!(out.issuer_code, "SWG");
        assert_eq!(out.certificate_number.as_deref(), Some("RS-2026-B-IN-SWG-000001-0"));
        assert_eq!(out.signature.as_deref(), Some("c2lnbmF0dXJl"));
        assert!(out.credential_id.is_none());

        let json = serde_json::to_value(&out).unwrap();
        assert!(json.get("credentialId").is_none());
        assert!(json.get("batch").is_none());
    }

    #[test]
    fn issuer_code_checked_before_attributes() {
        let err = validate_registry_input(&input(json!({
            "issuerCode": "SW1",
            "publicAttributes": {},
        })))
        .unwrap_err();
        assert_eq!(err.field(), "issuerCode");
        assert_eq!(err.kind(), ProtocolErrorKind::InvalidAttribute);

        let err = validate_registry_input(&input(json!({ "publicAttributes": attrs() }))).unwrap_err();
        assert_eq!(err, ProtocolError::missing("issuerCode"));
    }

    #[test]
    fn forbidden_fields_outrank_issuer_code() {
        let err = validate_registry_input(&input(json!({
            "issuerCode": "??",
            "publicAttributes": { "dob": "1990-01-01" },
        })))
        .unwrap_err();
        assert_eq!(err.kind(), ProtocolErrorKind::ProtocolViolation);
        assert_eq!(err.field(), "publicAttributes.dob");
    }

    #[test]
    fn attributes_are_enforced() {
        let err = validate_registry_input(&input(json!({
            "issuerCode": "SWG",
            "publicAttributes": { "givenName": "Asha" },
        })))
        .unwrap_err();
        assert_eq!(err, ProtocolError::missing("familyName"));

        let err = validate_registry_input(&input(json!({ "issuerCode": "SWG" }))).unwrap_err();
        assert_eq!(err, ProtocolError::missing("publicAttributes"));
    }

    #[test]
    fn passthrough_fields_must_be_strings() {
        let err = validate_registry_input(&input(json!({
            "issuerCode": "SWG",
            "publicAttributes": attrs(),
            "signature": 12,
        })))
        .unwrap_err();
        assert_eq!(err.field(), "signature");
    }

    #[test]
    fn registry_shape_cannot_carry_extra_fields() {
        let json = json!({
            "issuerCode": "SWG",
            "publicAttributes": attrs(),
            "email": "a@b.c",
        });
        assert!(serde_json::from_value::<RegistryInput>(json).is_err());
    }
}
