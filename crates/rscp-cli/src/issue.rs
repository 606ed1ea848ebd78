//! # Issue Subcommand
//!
//! Reads issuer-side holder data from a JSON file, passes it through the
//! privacy gate, mints identifiers and signs the credential under the key
//! in the profile's signing key variable.
//!
//! Any field outside the five public attributes is dropped by the gate;
//! a forbidden field (email, phone, national ID, ...) aborts issuance.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use uuid::Uuid;

use rscp_core::Timestamp;
use rscp_crypto::SigningKey;
use rscp_vc::{CredentialBuilder, CredentialRequest, IssuedCredential, QrPayload, RegistryRecord};

use crate::config::IssuerProfile;

/// Arguments for the `rscp issue` subcommand.
#[derive(Args, Debug)]
pub struct IssueArgs {
    /// JSON object with holder attributes.
    #[arg(value_name = "FILE")]
    pub attributes: PathBuf,

    #[arg(long)]
    pub year: u32,

    #[arg(long)]
    pub serial: u32,

    /// 3-letter issuer code. Defaults to the profile's.
    #[arg(long)]
    pub issuer: Option<String>,

    /// 2-letter country code. Defaults to the profile's.
    #[arg(long)]
    pub country: Option<String>,

    /// Base URL for verification links. Defaults to the profile's.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Holder UUID. A random one is drawn when absent.
    #[arg(long)]
    pub holder_id: Option<Uuid>,

    /// Issuance instant, `YYYY-MM-DDTHH:MM:SSZ`. Defaults to now.
    #[arg(long, value_parser = Timestamp::parse)]
    pub issued_at: Option<Timestamp>,

    /// Write the result here instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// What `rscp issue` emits.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IssueOutput<'a> {
    credential: &'a IssuedCredential,
    registry_record: RegistryRecord,
    qr: QrPayload,
}

/// Execute the issue subcommand.
pub fn run_issue(args: &IssueArgs, profile: &IssuerProfile) -> Result<u8> {
    let key = profile.signing_key()?;
    let issued = issue_credential(args, profile, key)?;

    let output = IssueOutput {
        credential: &issued,
        registry_record: issued.registry_record(),
        qr: issued.qr_payload(),
    };
    match &args.output {
        Some(path) => {
            write_json(path, &output)?;
            println!(
                "OK: issued {} -> {}",
                issued.identifiers.certificate_number,
                path.display()
            );
        }
        None => crate::print_json(&output)?,
    }
    Ok(0)
}

/// Build the credential request from `args` and `profile` and issue it.
pub fn issue_credential(args: &IssueArgs, profile: &IssuerProfile, key: SigningKey) -> Result<IssuedCredential> {
    let attributes = crate::read_json_object(&args.attributes)?;
    let request = CredentialRequest {
        issuer_code: profile.issuer_code(args.issuer.as_deref())?,
        country: profile.country(args.country.as_deref())?,
        year: args.year,
        serial: args.serial,
        holder_id: args.holder_id,
        attributes,
        issued_at: args.issued_at,
    };

    let mut builder = CredentialBuilder::new(key);
    if let Some(base) = profile.verification_base_url(args.base_url.as_deref()) {
        builder = builder.with_verification_base_url(base);
    }
    builder
        .build(&request)
        .with_context(|| format!("cannot issue credential from {}", args.attributes.display()))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to serialize credential")?;
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}
