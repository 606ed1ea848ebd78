//! # Verification
//!
//! Two verifier entry points:
//!
//! - [`verify_certificate`] for a human or scanner presenting a
//!   certificate number, a verification code and optionally the QR text.
//!   Checks shape, both checksums, QR consistency and expiry.
//! - [`verify_signed_credential`] for a relying party holding the signed
//!   credential and the issuer key. Checks the signature, re-runs the
//!   privacy gate over the attributes and validates the identifiers.
//!
//! Neither fails. Every problem becomes an entry in `errors` and flips
//! `valid` to false.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use rscp_core::{
    clean_code, format_certificate_number, is_expired_at, parse_certificate_number,
    parse_credential_id, validate_verification_code, CertificateNumberParts, SignedCredential,
};
use rscp_crypto::{verify_signature, SigningKey};
use rscp_protocol::enforce_public_attributes_only;

use crate::qr::QrPayload;

/// Outcome of [`verify_certificate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    /// All checks passed and the credential is not expired.
    pub valid: bool,
    pub certificate_valid: bool,
    pub code_valid: bool,
    /// Only ever true when a QR payload supplied `validUntil`.
    pub expired: bool,
    /// Components of the certificate number, when it parsed.
    pub parsed: Option<CertificateNumberParts>,
    /// Decoded QR payload, when one was supplied and decoded.
    pub qr_data: Option<QrPayload>,
    pub errors: Vec<String>,
}

/// [`verify_certificate_at`] against the current time.
pub fn verify_certificate(
    certificate_number: &str,
    verification_code: &str,
    qr_json: Option<&str>,
) -> VerificationResult {
    verify_certificate_at(certificate_number, verification_code, qr_json, Utc::now())
}

/// Verify presented identifiers, treating `now` as the current instant.
pub fn verify_certificate_at(
    certificate_number: &str,
    verification_code: &str,
    qr_json: Option<&str>,
    now: DateTime<Utc>,
) -> VerificationResult {
    let mut errors = Vec::new();

    let parsed = parse_certificate_number(certificate_number);
    let certificate_valid = match &parsed {
        Some(parts) if parts.is_valid() => true,
        Some(_) => {
            errors.push("certificate number check digit does not match".to_string());
            false
        }
        None => {
            errors.push("certificate number is not in RS-YYYY-L-CC-III-NNNNNN-C format".to_string());
            false
        }
    };

    let code_valid = validate_verification_code(verification_code);
    if !code_valid {
        errors.push("verification code is invalid".to_string());
    }

    let mut expired = false;
    let qr_data = match qr_json {
        None => None,
        Some(text) => match QrPayload::from_json(text) {
            Ok(qr) => {
                if format_certificate_number(&qr.cert) != format_certificate_number(certificate_number) {
                    errors.push("QR certificate number does not match".to_string());
                }
                if clean_code(&qr.code) != clean_code(verification_code) {
                    errors.push("QR verification code does not match".to_string());
                }
                if let Some(until) = &qr.valid_until {
                    match is_expired_at(until, now) {
                        Some(true) => {
                            expired = true;
                            errors.push(format!("credential expired on {until}"));
                        }
                        Some(false) => {}
                        None => errors.push(format!("QR validUntil {until:?} is not a valid date")),
                    }
                }
                Some(qr)
            }
            Err(e) => {
                errors.push(format!("QR payload could not be decoded: {e}"));
                None
            }
        },
    };

    if !errors.is_empty() {
        tracing::debug!(certificate = %certificate_number, errors = ?errors, "certificate verification failed");
    }

    VerificationResult {
        valid: errors.is_empty(),
        certificate_valid,
        code_valid,
        expired,
        parsed,
        qr_data,
        errors,
    }
}

/// Outcome of [`verify_signed_credential`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialVerification {
    pub valid: bool,
    pub signature_valid: bool,
    /// The payload's attributes still pass the privacy gate.
    pub attributes_valid: bool,
    /// Certificate number, verification code and credential ID are
    /// well-formed and agree on the issuer.
    pub identifiers_valid: bool,
    pub errors: Vec<String>,
}

/// Verify a signed credential under the issuer's key.
pub fn verify_signed_credential(signed: &SignedCredential, key: &SigningKey) -> CredentialVerification {
    let payload = &signed.payload;
    let mut errors = Vec::new();

    let signature = verify_signature(payload, &signed.signature, key);
    if let Some(reason) = &signature.error {
        errors.push(reason.clone());
    }

    let attributes_valid = match serde_json::to_value(&payload.public_attributes) {
        Ok(Value::Object(map)) => match enforce_public_attributes_only(&map) {
            Ok(_) => true,
            Err(e) => {
                errors.push(e.to_string());
                false
            }
        },
        _ => {
            errors.push("public attributes could not be re-encoded".to_string());
            false
        }
    };

    let mut identifiers_valid = true;
    let issuer = payload.issuer_code.to_ascii_uppercase();
    match parse_certificate_number(&payload.certificate_number) {
        Some(parts) if parts.is_valid() => {
            if parts.issuer_code != issuer {
                identifiers_valid = false;
                errors.push("certificate number issuer does not match issuerCode".to_string());
            }
            if parts.level != payload.public_attributes.level {
                identifiers_valid = false;
                errors.push("certificate number level does not match attributes".to_string());
            }
        }
        _ => {
            identifiers_valid = false;
            errors.push("certificate number is invalid".to_string());
        }
    }
    if !validate_verification_code(&payload.verification_code) {
        identifiers_valid = false;
        errors.push("verification code is invalid".to_string());
    }
    match parse_credential_id(&payload.credential_id) {
        Some(id) if id.issuer_code.eq_ignore_ascii_case(&issuer) => {}
        Some(_) => {
            identifiers_valid = false;
            errors.push("credential ID issuer does not match issuerCode".to_string());
        }
        None => {
            identifiers_valid = false;
            errors.push("credential ID is invalid".to_string());
        }
    }

    CredentialVerification {
        valid: signature.valid && attributes_valid && identifiers_valid,
        signature_valid: signature.valid,
        attributes_valid,
        identifiers_valid,
        errors,
    }
}
