//! # Credential Issuance
//!
//! [`CredentialBuilder`] stitches the layers together for the common
//! issuance flow:
//!
//! ```text
//! issuer data ── privacy gate ──> 5 public attributes
//!                                      │
//!       identifier inputs ── codec ──> certificate number, code, URN, DIDs
//!                                      │
//!                          signing ──> SignedCredential + fingerprint
//! ```
//!
//! A [`CredentialRequest`] is a plain struct. Required inputs are checked
//! once, inside [`CredentialBuilder::build`]; nothing is validated while
//! the request is being filled in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use rscp_core::{
    calculate_valid_until, generate_all_identifiers, generate_holder_did, new_holder_did,
    normalize_issuer_code, parse_iso_date, CertificationLevel, GeneratedIdentifiers,
    IdentifierOptions, RscpPublicAttributes, SignaturePayload, SignedCredential, Timestamp,
};
use rscp_crypto::{generate_credential_hash, sign_credential, SigningKey};
use rscp_protocol::PrivacyGate;

use crate::error::VcError;
use crate::qr::QrPayload;
use crate::record::RegistryRecord;
use crate::url::VerificationUrls;

/// Everything an issuer supplies for one credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRequest {
    /// 3-letter issuer code.
    pub issuer_code: String,
    /// 2-letter country code.
    pub country: String,
    /// Issuance year for the certificate number.
    pub year: u32,
    /// Serial within issuer and year.
    pub serial: u32,
    /// Holder UUID. A random one is drawn when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holder_id: Option<Uuid>,
    /// Issuer-side holder data. Only the five public attributes survive;
    /// `validFrom` defaults to the issuance date and `validUntil` to the
    /// level's validity period after `validFrom`.
    pub attributes: Map<String, Value>,
    /// Defaults to now.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<Timestamp>,
}

/// Output of a successful issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedCredential {
    pub identifiers: GeneratedIdentifiers,
    pub holder_did: String,
    pub public_attributes: RscpPublicAttributes,
    pub signed: SignedCredential,
    /// SHA-256 fingerprint of the signed payload.
    pub credential_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls: Option<VerificationUrls>,
}

impl IssuedCredential {
    /// The record handed to a registry writer.
    pub fn registry_record(&self) -> RegistryRecord {
        RegistryRecord::from_issued(self)
    }

    /// QR payload for the printed certificate.
    pub fn qr_payload(&self) -> QrPayload {
        QrPayload::new(
            &self.identifiers.certificate_number,
            &self.identifiers.verification_code,
        )
        .with_level(self.public_attributes.level)
        .with_valid_until(self.public_attributes.valid_until.clone())
    }
}

/// Issues credentials under one signing key.
#[derive(Debug, Clone)]
pub struct CredentialBuilder {
    key: SigningKey,
    gate: PrivacyGate,
    verification_base_url: Option<String>,
}

impl CredentialBuilder {
    /// A builder that audits gate violations through `tracing`.
    pub fn new(key: SigningKey) -> Self {
        Self {
            key,
            gate: PrivacyGate::default(),
            verification_base_url: None,
        }
    }

    /// Use a specific privacy gate, e.g. one with a custom audit sink.
    pub fn with_gate(mut self, gate: PrivacyGate) -> Self {
        self.gate = gate;
        self
    }

    /// Emit verification URLs under `base_url`.
    pub fn with_verification_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.verification_base_url = Some(base_url.into());
        self
    }

    /// Gate, identify and sign one credential.
    ///
    /// # Errors
    ///
    /// [`VcError::Protocol`] when the attributes fail the privacy gate,
    /// [`VcError::Identifier`] for a bad issuer, country, year or serial,
    /// [`VcError::Crypto`] if signing fails.
    pub fn build(&self, request: &CredentialRequest) -> Result<IssuedCredential, VcError> {
        let issued_at = request.issued_at.unwrap_or_else(Timestamp::now);
        let candidate = with_default_validity(&request.attributes, issued_at);
        let public_attributes = self.gate.enforce(&candidate)?;

        let issuer_code = normalize_issuer_code(&request.issuer_code)?;
        let identifiers = generate_all_identifiers(&IdentifierOptions {
            year: request.year,
            level: public_attributes.level,
            country: request.country.clone(),
            issuer_code: issuer_code.clone(),
            serial: request.serial,
        })?;
        let holder_did = match &request.holder_id {
            Some(id) => generate_holder_did(id),
            None => new_holder_did(),
        };

        let payload = SignaturePayload {
            credential_id: identifiers.credential_id.clone(),
            certificate_number: identifiers.certificate_number.clone(),
            verification_code: identifiers.verification_code.clone(),
            public_attributes: public_attributes.clone(),
            issuer_code,
            issued_at,
        };
        let credential_hash = generate_credential_hash(&payload)?;
        let signed = sign_credential(payload, &self.key)?;

        let urls = self.verification_base_url.as_deref().map(|base| {
            VerificationUrls::new(
                base,
                &identifiers.certificate_number,
                &identifiers.verification_code,
            )
        });

        tracing::info!(
            certificate_number = %identifiers.certificate_number,
            credential_id = %identifiers.credential_id,
            level = %public_attributes.level,
            "credential issued"
        );

        Ok(IssuedCredential {
            identifiers,
            holder_did,
            public_attributes,
            signed,
            credential_hash,
            urls,
        })
    }
}

fn is_absent(attributes: &Map<String, Value>, field: &str) -> bool {
    matches!(attributes.get(field), None | Some(Value::Null))
}

/// Fill in `validFrom` and `validUntil` when the issuer left them out.
///
/// Only fills what it can derive. Anything malformed is left for the gate
/// to reject.
fn with_default_validity(attributes: &Map<String, Value>, issued_at: Timestamp) -> Map<String, Value> {
    let mut out = attributes.clone();

    if is_absent(&out, "validFrom") {
        let date = issued_at.as_datetime().date_naive();
        out.insert("validFrom".into(), Value::String(date.format("%Y-%m-%d").to_string()));
    }

    if is_absent(&out, "validUntil") {
        let level = out
            .get("level")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<CertificationLevel>().ok());
        let from = out
            .get("validFrom")
            .and_then(Value::as_str)
            .and_then(parse_iso_date)
            .map(|dt| dt.date_naive());
        if let Some(until) = level.zip(from).and_then(|(l, f)| default_valid_until(l, f)) {
            out.insert("validUntil".into(), Value::String(until));
        }
    }

    out
}

fn default_valid_until(level: CertificationLevel, from: NaiveDate) -> Option<String> {
    calculate_valid_until(level, from).map(|d| d.format("%Y-%m-%d").to_string())
}
