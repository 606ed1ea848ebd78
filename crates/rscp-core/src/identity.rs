//! # Credential Identifiers and DIDs
//!
//! Purely derived identifiers with no checksum of their own:
//!
//! - Credential ID: `urn:rscp:credential:{issuer}:{YYYY}:{NNNNNN}`
//! - Issuer DID: `did:rscp:issuer:{issuer}`
//! - Holder DID: `did:rscp:holder:{uuid}`
//!
//! Generators lowercase every component. Parsers are case-insensitive,
//! strict about shape, and return `None` rather than failing.
//!
//! [`generate_all_identifiers`] is the usual per-issuance entry point.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::certificate::{
    generate_certificate_number, normalize_issuer_code, validate_serial, validate_year,
};
use crate::error::{RscpError, ValidationError};
use crate::level::CertificationLevel;
use crate::verification_code::generate_verification_code;

/// URN prefix for credential identifiers.
pub const CREDENTIAL_URN_PREFIX: &str = "urn:rscp:credential:";
/// DID prefix for issuers.
pub const ISSUER_DID_PREFIX: &str = "did:rscp:issuer:";
/// DID prefix for holders.
pub const HOLDER_DID_PREFIX: &str = "did:rscp:holder:";

/// Components of a credential URN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialIdParts {
    /// Lowercase issuer code.
    pub issuer_code: String,
    /// Four-digit issuance year.
    pub year: u32,
    /// Serial number.
    pub serial: u32,
}

/// Inputs shared by every identifier of one issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierOptions {
    /// Issuance year.
    pub year: u32,
    /// Certification level.
    pub level: CertificationLevel,
    /// 2-letter country code.
    pub country: String,
    /// 3-letter issuer code.
    pub issuer_code: String,
    /// Serial number within issuer and year.
    pub serial: u32,
}

/// Every identifier minted for one issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedIdentifiers {
    /// `RS-...` certificate number.
    pub certificate_number: String,
    /// 8-character verification code (storage form).
    pub verification_code: String,
    /// `urn:rscp:credential:...` identifier.
    pub credential_id: String,
    /// `did:rscp:issuer:...` identifier.
    pub issuer_did: String,
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    if s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
    {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

fn is_letters(s: &str, len: usize) -> bool {
    s.len() == len && s.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.chars().all(|c| c.is_ascii_digit())
}

/// `urn:rscp:credential:{issuer}:{YYYY}:{NNNNNN}`.
pub fn generate_credential_id(
    issuer_code: &str,
    year: u32,
    serial: u32,
) -> Result<String, ValidationError> {
    let issuer = normalize_issuer_code(issuer_code)?.to_ascii_lowercase();
    let year = validate_year(year)?;
    let serial = validate_serial(serial)?;
    Ok(format!("{CREDENTIAL_URN_PREFIX}{issuer}:{year:04}:{serial:06}"))
}

/// Parse a credential URN. Case-insensitive; `None` on any mismatch.
pub fn parse_credential_id(s: &str) -> Option<CredentialIdParts> {
    let rest = strip_prefix_ignore_case(s, CREDENTIAL_URN_PREFIX)?;
    let parts: Vec<&str> = rest.split(':').collect();
    if parts.len() != 3 {
        return None;
    }
    let (issuer, year, serial) = (parts[0], parts[1], parts[2]);
    if !is_letters(issuer, 3) || !is_digits(year, 4) || !is_digits(serial, 6) {
        return None;
    }
    Some(CredentialIdParts {
        issuer_code: issuer.to_ascii_lowercase(),
        year: year.parse().ok()?,
        serial: serial.parse().ok()?,
    })
}

/// `did:rscp:issuer:{issuer}`.
pub fn generate_issuer_did(issuer_code: &str) -> Result<String, ValidationError> {
    let issuer = normalize_issuer_code(issuer_code)?.to_ascii_lowercase();
    Ok(format!("{ISSUER_DID_PREFIX}{issuer}"))
}

/// Parse an issuer DID, returning the lowercase issuer code.
pub fn parse_issuer_did(s: &str) -> Option<String> {
    let issuer = strip_prefix_ignore_case(s, ISSUER_DID_PREFIX)?;
    is_letters(issuer, 3).then(|| issuer.to_ascii_lowercase())
}

/// `did:rscp:holder:{uuid}` with the UUID in lowercase hyphenated form.
pub fn generate_holder_did(holder_id: &Uuid) -> String {
    format!("{HOLDER_DID_PREFIX}{}", holder_id.hyphenated())
}

/// A holder DID around a fresh random (v4) UUID.
pub fn new_holder_did() -> String {
    generate_holder_did(&Uuid::new_v4())
}

/// Parse a holder DID. Only the 8-4-4-4-12 hyphenated UUID form is accepted.
pub fn parse_holder_did(s: &str) -> Option<Uuid> {
    let id = strip_prefix_ignore_case(s, HOLDER_DID_PREFIX)?;
    let groups: Vec<&str> = id.split('-').collect();
    let lengths: Vec<usize> = groups.iter().map(|g| g.len()).collect();
    if lengths != [8, 4, 4, 4, 12]
        || !groups.iter().all(|g| g.chars().all(|c| c.is_ascii_hexdigit()))
    {
        return None;
    }
    Uuid::parse_str(id).ok()
}

/// Mint the certificate number, verification code, credential ID and
/// issuer DID for one issuance.
pub fn generate_all_identifiers(options: &IdentifierOptions) -> Result<GeneratedIdentifiers, RscpError> {
    let certificate_number = generate_certificate_number(
        options.year,
        options.level,
        &options.country,
        &options.issuer_code,
        options.serial,
    )?;
    let verification_code = generate_verification_code()?;
    let credential_id = generate_credential_id(&options.issuer_code, options.year, options.serial)?;
    let issuer_did = generate_issuer_did(&options.issuer_code)?;

    Ok(GeneratedIdentifiers {
        certificate_number,
        verification_code,
        credential_id,
        issuer_did,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certificate::validate_certificate_number;
    use crate::verification_code::validate_verification_code;

    #[test]
    fn credential_id_known_value() {
        assert_eq!(
            generate_credential_id("SWG", 2026, 1).unwrap(),
            "urn:rscp:credential:swg:2026:000001"
        );
    }

    #[test]
    fn credential_id_validates_inputs() {
        assert!(generate_credential_id("SW", 2026, 1).is_err());
        assert!(generate_credential_id("SWG", 1999, 1).is_err());
        assert!(generate_credential_id("SWG", 2026, 0).is_err());
    }

    #[test]
    fn credential_id_parse() {
        let parts = parse_credential_id("URN:RSCP:CREDENTIAL:SWG:2026:000042").unwrap();
        assert_eq!(parts.issuer_code, "swg");
        assert_eq!(parts.year, 2026);
        assert_eq!(parts.serial, 42);

        for bad in [
            "",
            "urn:rscp:credential:swg:2026:42",
            "urn:rscp:credential:sw:2026:000042",
            "urn:rscp:credential:swg:26:000042",
            "urn:rscp:credential:swg:2026:000042:x",
            "urn:other:credential:swg:2026:000042",
            "urn:rscp:credential:sw1:2026:000042",
        ] {
            assert!(parse_credential_id(bad).is_none(), "{bad:?}");
        }
    }

    #[test]
    fn issuer_did_roundtrip() {
        let did = generate_issuer_did("SWG").unwrap();
        assert_eq!(did, "did:rscp:issuer:swg");
        assert_eq!(parse_issuer_did(&did).as_deref(), Some("swg"));
        assert_eq!(parse_issuer_did("DID:RSCP:ISSUER:SWG").as_deref(), Some("swg"));
        assert!(parse_issuer_did("did:rscp:issuer:swgx").is_none());
        assert!(parse_issuer_did("did:rscp:holder:swg").is_none());
        assert!(generate_issuer_did("S1G").is_err());
    }

    #[test]
    fn holder_did_roundtrip() {
        let id = Uuid::parse_str("6F9619FF-8B86-D011-B42D-00CF4FC964FF").unwrap();
        let did = generate_holder_did(&id);
        assert_eq!(did, "did:rscp:holder:6f9619ff-8b86-d011-b42d-00cf4fc964ff");
        assert_eq!(parse_holder_did(&did), Some(id));
        assert_eq!(parse_holder_did(&did.to_uppercase()), Some(id));
    }

    #[test]
    fn holder_did_rejects_non_hyphenated_uuid() {
        assert!(parse_holder_did("did:rscp:holder:6f9619ff8b86d011b42d00cf4fc964ff").is_none());
        assert!(parse_holder_did("did:rscp:holder:{6f9619ff-8b86-d011-b42d-00cf4fc964ff}").is_none());
        assert!(parse_holder_did("did:rscp:holder:").is_none());
    }

    #[test]
    fn new_holder_dids_are_unique() {
        let a = new_holder_did();
        let b = new_holder_did();
        assert_ne!(a, b);
        assert!(parse_holder_did(&a).is_some());
    }

    #[test]
    fn generate_all_identifiers_is_consistent() {
        let ids = generate_all_identifiers(&IdentifierOptions {
            year: 2026,
            level: CertificationLevel::Gold,
            country: "in".into(),
            issuer_code: "swg".into(),
            serial: 1,
        })
        .unwrap();
        assert_eq!(ids.certificate_number, "RS-2026-G-IN-SWG-000001-8");
        assert!(validate_certificate_number(&ids.certificate_number));
        assert!(validate_verification_code(&ids.verification_code));
        assert_eq!(ids.credential_id, "urn:rscp:credential:swg:2026:000001");
        assert_eq!(ids.issuer_did, "did:rscp:issuer:swg");
    }

    #[test]
    fn generate_all_identifiers_propagates_validation() {
        let err = generate_all_identifiers(&IdentifierOptions {
            year: 2026,
            level: CertificationLevel::Gold,
            country: "IN".into(),
            issuer_code: "SWG".into(),
            serial: 0,
        })
        .unwrap_err();
        assert!(matches!(
            err,
            RscpError::Validation(ValidationError::InvalidSerial(0))
        ));
    }
}
