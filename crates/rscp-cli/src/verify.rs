//! # Verify Subcommand
//!
//! Two modes, matching the two verifier entry points:
//!
//! - `rscp verify cert NUMBER CODE [--qr JSON | --qr-file FILE]` checks
//!   presented identifiers the way a verification page would.
//! - `rscp verify credential FILE` checks a signed credential under the
//!   issuer key. `FILE` may hold a bare signed credential or the output
//!   of `rscp issue`.
//!
//! Both print the full result as JSON and exit 1 when it is not valid.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use serde_json::Value;

use rscp_core::SignedCredential;
use rscp_vc::{verify_certificate, verify_signed_credential};

use crate::config::IssuerProfile;

/// Arguments for the `rscp verify` subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[command(subcommand)]
    pub command: VerifyCommand,
}

#[derive(Subcommand, Debug)]
pub enum VerifyCommand {
    /// Verify a certificate number and verification code.
    Cert {
        #[arg(value_name = "NUMBER")]
        number: String,
        #[arg(value_name = "CODE")]
        code: String,
        /// Scanned QR payload text.
        #[arg(long, conflicts_with = "qr_file")]
        qr: Option<String>,
        /// File holding the scanned QR payload text.
        #[arg(long)]
        qr_file: Option<PathBuf>,
    },

    /// Verify a signed credential with the profile's signing key.
    Credential {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// Execute the verify subcommand.
pub fn run_verify(args: &VerifyArgs, profile: &IssuerProfile) -> Result<u8> {
    match &args.command {
        VerifyCommand::Cert {
            number,
            code,
            qr,
            qr_file,
        } => {
            let qr = match (qr, qr_file) {
                (Some(text), _) => Some(text.clone()),
                (None, Some(path)) => Some(
                    std::fs::read_to_string(path)
                        .with_context(|| format!("failed to read QR payload: {}", path.display()))?,
                ),
                (None, None) => None,
            };
            let result = verify_certificate(number, code, qr.as_deref().map(str::trim));
            crate::print_json(&result)?;
            Ok(exit_code(result.valid))
        }
        VerifyCommand::Credential { file } => {
            let key = profile.signing_key()?;
            let signed = load_signed_credential(file)?;
            let result = verify_signed_credential(&signed, &key);
            crate::print_json(&result)?;
            Ok(exit_code(result.valid))
        }
    }
}

fn exit_code(valid: bool) -> u8 {
    if valid {
        0
    } else {
        1
    }
}

/// Load a signed credential, unwrapping `rscp issue` output if needed.
pub fn load_signed_credential(path: &Path) -> Result<SignedCredential> {
    let mut map = crate::read_json_object(path)?;
    let value = match map.remove("credential") {
        Some(Value::Object(mut issued)) => match issued.remove("signed") {
            Some(signed) => signed,
            None => bail!("{}: \"credential\" has no \"signed\" member", path.display()),
        },
        Some(_) => bail!("{}: \"credential\" is not an object", path.display()),
        None => Value::Object(map),
    };
    serde_json::from_value(value)
        .with_context(|| format!("{} does not hold a signed credential", path.display()))
}
