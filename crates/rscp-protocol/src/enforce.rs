//! # Public Attribute Enforcement
//!
//! The privacy gate. Every value bound for a registry passes through
//! [`enforce_public_attributes_only`]; [`extract_public_attributes`] and
//! `validate_registry_input` are thin adapters that converge on it.
//!
//! ## Security Invariant
//!
//! Forbidden-field detection runs before any other check. A candidate
//! that carries both `email` and an incomplete attribute set fails for
//! `email`. On success the returned [`RscpPublicAttributes`] is built
//! from scratch, so nothing else on the input can ride along.
//!
//! Input is an untyped JSON object. Keys are inspected; values are read
//! only for the five attributes and the two nested containers.

use serde_json::{Map, Value};

use rscp_core::{parse_iso_date, CertificationLevel, RscpPublicAttributes};

use crate::error::ProtocolError;
use crate::fields::{classify_field, FieldClass, NESTED_CONTAINERS};

/// Longest accepted name, in Unicode scalar values.
pub const MAX_NAME_CHARS: usize = 100;

/// Every forbidden field path in `data`, in input order.
///
/// All top-level keys are scanned first. Then each `publicAttributes` or
/// `attributes` object is scanned one level deep, and its hits are
/// reported as `container.field`. A top-level hit therefore always
/// precedes a nested one. An empty result means clean.
pub fn detect_forbidden_fields(data: &Map<String, Value>) -> Vec<String> {
    let mut found: Vec<String> = data
        .keys()
        .filter(|k| classify_field(k) == FieldClass::Forbidden)
        .cloned()
        .collect();

    for (key, value) in data {
        if !NESTED_CONTAINERS.contains(&key.as_str()) {
            continue;
        }
        if let Value::Object(inner) = value {
            found.extend(
                inner
                    .keys()
                    .filter(|k| classify_field(k) == FieldClass::Forbidden)
                    .map(|k| format!("{key}.{k}")),
            );
        }
    }
    found
}

fn ensure_no_forbidden_fields(data: &Map<String, Value>) -> Result<(), ProtocolError> {
    let fields = detect_forbidden_fields(data);
    match fields.first() {
        Some(first) => Err(ProtocolError::ProtocolViolation {
            field: first.clone(),
            fields,
        }),
        None => Ok(()),
    }
}

fn require<'a>(data: &'a Map<String, Value>, field: &str) -> Result<&'a Value, ProtocolError> {
    match data.get(field) {
        None | Some(Value::Null) => Err(ProtocolError::missing(field)),
        Some(v) => Ok(v),
    }
}

fn is_control(c: char) -> bool {
    matches!(c as u32, 0x00..=0x1F | 0x7F..=0x9F)
}

fn contains_tag_like(s: &str) -> bool {
    match s.find('<') {
        Some(open) => s[open..].contains('>'),
        None => false,
    }
}

fn validate_name(field: &str, value: &Value) -> Result<String, ProtocolError> {
    let Value::String(s) = value else {
        return Err(ProtocolError::invalid(field, "must be a string"));
    };
    let len = s.chars().count();
    if len == 0 || len > MAX_NAME_CHARS {
        return Err(ProtocolError::invalid(
            field,
            format!("must be 1-{MAX_NAME_CHARS} characters, got {len}"),
        ));
    }
    if s.chars().any(is_control) {
        return Err(ProtocolError::invalid(field, "must not contain control characters"));
    }
    if contains_tag_like(s) {
        return Err(ProtocolError::invalid(field, "must not contain markup"));
    }
    if s.trim().is_empty() {
        return Err(ProtocolError::invalid(field, "must not be only whitespace"));
    }
    Ok(s.clone())
}

fn validate_level(value: &Value) -> Result<CertificationLevel, ProtocolError> {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| ProtocolError::invalid("level", "must be one of bronze, silver, gold"))
}

fn validate_date(field: &str, value: &Value) -> Result<(String, chrono::DateTime<chrono::Utc>), ProtocolError> {
    let s = value
        .as_str()
        .ok_or_else(|| ProtocolError::invalid(field, "must be an ISO-8601 date string"))?;
    let instant = parse_iso_date(s)
        .ok_or_else(|| ProtocolError::invalid(field, "must be a valid ISO-8601 date or datetime"))?;
    Ok((s.to_string(), instant))
}

/// Reduce `data` to the five public attributes, or say why it cannot be.
///
/// # Errors
///
/// In order of precedence:
///
/// 1. [`ProtocolError::ProtocolViolation`] naming the first forbidden field
///    and listing all of them.
/// 2. [`ProtocolError::MissingAttribute`] for the first absent or null
///    attribute in `givenName, familyName, level, validFrom, validUntil`.
/// 3. [`ProtocolError::InvalidAttribute`] for the first malformed attribute
///    in the same order.
/// 4. [`ProtocolError::InvalidAttribute`] on `validUntil` when it is not
///    strictly after `validFrom`.
pub fn enforce_public_attributes_only(
    data: &Map<String, Value>,
) -> Result<RscpPublicAttributes, ProtocolError> {
    ensure_no_forbidden_fields(data)?;

    let given_name = require(data, "givenName")?;
    let family_name = require(data, "familyName")?;
    let level = require(data, "level")?;
    let valid_from = require(data, "validFrom")?;
    let valid_until = require(data, "validUntil")?;

    let given_name = validate_name("givenName", given_name)?;
    let family_name = validate_name("familyName", family_name)?;
    let level = validate_level(level)?;
    let (valid_from, from) = validate_date("validFrom", valid_from)?;
    let (valid_until, until) = validate_date("validUntil", valid_until)?;

    if until <= from {
        return Err(ProtocolError::invalid(
            "validUntil",
            "must be strictly after validFrom",
        ));
    }

    Ok(RscpPublicAttributes {
        given_name,
        family_name,
        level,
        valid_from,
        valid_until,
    })
}

/// Pull the public attributes out of a full credential object.
///
/// The whole credential is scanned for forbidden fields first. Then, if it
/// carries a `publicAttributes` object, that object is enforced; otherwise
/// a flat candidate is rebuilt from the five top-level attribute fields.
pub fn extract_public_attributes(
    credential: &Map<String, Value>,
) -> Result<RscpPublicAttributes, ProtocolError> {
    ensure_no_forbidden_fields(credential)?;

    match credential.get("publicAttributes") {
        Some(Value::Object(inner)) => enforce_public_attributes_only(inner),
        None | Some(Value::Null) => {
            let candidate: Map<String, Value> = rscp_core::PUBLIC_ATTRIBUTE_FIELDS
                .iter()
                .filter_map(|f| credential.get(*f).map(|v| (f.to_string(), v.clone())))
                .collect();
            enforce_public_attributes_only(&candidate)
        }
        Some(_) => Err(ProtocolError::invalid("publicAttributes", "must be an object")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolErrorKind;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    fn valid() -> Map<String, Value> {
        obj(json!({
            "givenName": "Asha",
            "familyName": "Rao",
            "level": "gold",
            "validFrom": "2026-01-01",
            "validUntil": "2029-01-01",
        }))
    }

    fn with(key: &str, value: Value) -> Map<String, Value> {
        let mut m = valid();
        m.insert(key.to_string(), value);
        m
    }

    fn without(key: &str) -> Map<String, Value> {
        let mut m = valid();
        m.remove(key);
        m
    }

    #[test]
    fn valid_attributes_pass() {
        let attrs = enforce_public_attributes_only(&valid()).unwrap();
        assert_eq!(attrs.given_name, "Asha");
        assert_eq!(attrs.level, CertificationLevel::Gold);
        assert_eq!(attrs.valid_until, "2029-01-01");
    }

    #[test]
    fn unknown_fields_are_dropped() {
        let attrs = enforce_public_attributes_only(&with("nickname", json!("A"))).unwrap();
        let out = serde_json::to_value(&attrs).unwrap();
        assert_eq!(out.as_object().unwrap().len(), 5);
        assert!(out.get("nickname").is_none());
    }

    #[test]
    fn detect_reports_top_level_and_nested_paths() {
        let data = obj(json!({
            "email": "a@b.c",
            "publicAttributes": { "givenName": "Asha", "Phone": "123" },
            "attributes": { "ssn": "x" },
            "other": { "email": "ignored" },
        }));
        let mut found = detect_forbidden_fields(&data);
        found.sort();
        assert_eq!(found, vec!["attributes.ssn", "email", "publicAttributes.Phone"]);
    }

    #[test]
    fn top_level_hits_precede_nested_ones() {
        let data = obj(json!({
            "attributes": { "ssn": "x" },
            "phone": "1",
            "givenName": "Asha",
            "email": "a@b.c",
        }));
        assert_eq!(
            detect_forbidden_fields(&data),
            vec!["phone", "email", "attributes.ssn"]
        );

        let data = obj(json!({ "email": "a@b.c", "attributes": { "ssn": "x" } }));
        match enforce_public_attributes_only(&data).unwrap_err() {
            ProtocolError::ProtocolViolation { field, fields } => {
                assert_eq!(field, "email");
                assert_eq!(fields, vec!["email", "attributes.ssn"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn first_offending_field_follows_input_order() {
        let data = obj(json!({ "phone": "1", "email": "a@b.c" }));
        assert_eq!(enforce_public_attributes_only(&data).unwrap_err().field(), "phone");
    }

    #[test]
    fn detect_clean_is_empty() {
        assert!(detect_forbidden_fields(&valid()).is_empty());
        assert!(detect_forbidden_fields(&Map::new()).is_empty());
    }

    #[test]
    fn forbidden_field_outranks_everything() {
        let mut data = obj(json!({ "email": "a@b.c", "validFrom": "2026-01-01", "validUntil": "2026-01-01" }));
        let err = enforce_public_attributes_only(&data).unwrap_err();
        assert_eq!(err.kind(), ProtocolErrorKind::ProtocolViolation);
        assert_eq!(err.field(), "email");

        data.insert("phone".into(), json!("1"));
        match enforce_public_attributes_only(&data).unwrap_err() {
            ProtocolError::ProtocolViolation { field, fields } => {
                assert_eq!(field, "email");
                assert_eq!(fields, vec!["email", "phone"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_reported_in_fixed_order() {
        let err = enforce_public_attributes_only(&Map::new()).unwrap_err();
        assert_eq!(err, ProtocolError::missing("givenName"));

        let mut m = without("level");
        m.remove("validUntil");
        assert_eq!(
            enforce_public_attributes_only(&m).unwrap_err(),
            ProtocolError::missing("level")
        );

        assert_eq!(
            enforce_public_attributes_only(&with("familyName", Value::Null)).unwrap_err(),
            ProtocolError::missing("familyName")
        );
    }

    #[test]
    fn missing_outranks_invalid() {
        let mut m = with("givenName", json!(""));
        m.remove("validUntil");
        assert_eq!(
            enforce_public_attributes_only(&m).unwrap_err().kind(),
            ProtocolErrorKind::MissingAttribute
        );
    }

    #[test]
    fn name_shape_rules() {
        for bad in [
            json!(""),
            json!("   "),
            json!("\t"),
            json!("A".repeat(101)),
            json!("Asha\u{0}"),
            json!("Asha\u{85}"),
            json!("Asha\u{7f}"),
            json!("<b>Asha</b>"),
            json!("Asha<img src=x>"),
            json!(42),
            json!(["Asha"]),
        ] {
            let err = enforce_public_attributes_only(&with("givenName", bad.clone())).unwrap_err();
            assert_eq!(err.kind(), ProtocolErrorKind::InvalidAttribute, "{bad}");
            assert_eq!(err.field(), "givenName");
        }
    }

    #[test]
    fn name_accepts_unicode_up_to_limit() {
        let hundred = "é".repeat(100);
        let attrs = enforce_public_attributes_only(&with("familyName", json!(hundred))).unwrap();
        assert_eq!(attrs.family_name.chars().count(), 100);
        assert!(enforce_public_attributes_only(&with("givenName", json!("O'Brien-Ng"))).is_ok());
        assert!(enforce_public_attributes_only(&with("givenName", json!("a > b"))).is_ok());
    }

    #[test]
    fn level_must_be_exact() {
        for bad in [json!("Gold"), json!("GOLD"), json!("platinum"), json!("G"), json!(3)] {
            let err = enforce_public_attributes_only(&with("level", bad.clone())).unwrap_err();
            assert_eq!(err.field(), "level", "{bad}");
            assert_eq!(err.kind(), ProtocolErrorKind::InvalidAttribute);
        }
    }

    #[test]
    fn dates_must_be_real() {
        for bad in [json!("2026-02-30"), json!("01/01/2026"), json!("soon"), json!(20260101)] {
            let err = enforce_public_attributes_only(&with("validFrom", bad.clone())).unwrap_err();
            assert_eq!(err.field(), "validFrom", "{bad}");
        }
    }

    #[test]
    fn equal_or_inverted_dates_rejected() {
        let mut m = with("validUntil", json!("2026-01-01"));
        let err = enforce_public_attributes_only(&m).unwrap_err();
        assert_eq!(err.kind(), ProtocolErrorKind::InvalidAttribute);
        assert_eq!(err.field(), "validUntil");

        m.insert("validUntil".into(), json!("2025-12-31"));
        assert_eq!(enforce_public_attributes_only(&m).unwrap_err().field(), "validUntil");

        // Same instant written two ways is still equal.
        let m = with("validUntil", json!("2026-01-01T00:00:00Z"));
        assert!(enforce_public_attributes_only(&m).is_err());
    }

    #[test]
    fn mixed_date_and_datetime_compare_as_instants() {
        let m = with("validUntil", json!("2026-01-01T00:00:01Z"));
        assert!(enforce_public_attributes_only(&m).is_ok());
    }

    #[test]
    fn extract_from_nested_container() {
        let credential = obj(json!({
            "credentialId": "urn:rscp:credential:swg:2026:000001",
            "publicAttributes": valid(),
        }));
        let attrs = extract_public_attributes(&credential).unwrap();
        assert_eq!(attrs.family_name, "Rao");
    }

    #[test]
    fn extract_from_flat_credential() {
        let mut credential = valid();
        credential.insert("certificateNumber".into(), json!("RS-2026-G-IN-SWG-000001-8"));
        let attrs = extract_public_attributes(&credential).unwrap();
        assert_eq!(attrs, enforce_public_attributes_only(&valid()).unwrap());
    }

    #[test]
    fn extract_catches_forbidden_anywhere() {
        let credential = obj(json!({ "email": "a@b.c", "publicAttributes": valid() }));
        assert_eq!(extract_public_attributes(&credential).unwrap_err().field(), "email");

        let mut inner = valid();
        inner.insert("passportNumber".into(), json!("X"));
        let credential = obj(json!({ "publicAttributes": inner }));
        assert_eq!(
            extract_public_attributes(&credential).unwrap_err().field(),
            "publicAttributes.passportNumber"
        );
    }

    #[test]
    fn extract_rejects_non_object_container() {
        let credential = obj(json!({ "publicAttributes": "Asha Rao" }));
        assert_eq!(
            extract_public_attributes(&credential).unwrap_err(),
            ProtocolError::invalid("publicAttributes", "must be an object")
        );
    }
}
