//! # Issuer Profile
//!
//! Optional YAML file passed with `--config`:
//!
//! ```yaml
//! issuer_code: SWG
//! country: IN
//! verification_base_url: https://verify.example.org
//! signing_key_env: RSCP_SIGNING_KEY
//! ```
//!
//! Command-line flags override every profile value. The signing key itself
//! is only ever read from the environment variable the profile names.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use rscp_crypto::SigningKey;

/// Environment variable consulted when the profile names none.
pub const DEFAULT_SIGNING_KEY_ENV: &str = "RSCP_SIGNING_KEY";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IssuerProfile {
    #[serde(default)]
    pub issuer_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub verification_base_url: Option<String>,
    #[serde(default)]
    pub signing_key_env: Option<String>,
}

impl IssuerProfile {
    /// Load a profile, or the empty profile when no path was given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let profile: Self = serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded issuer profile");
        Ok(profile)
    }

    /// `flag` if given, else the profile's issuer code.
    pub fn issuer_code(&self, flag: Option<&str>) -> Result<String> {
        pick(flag, self.issuer_code.as_deref(), "issuer code", "--issuer")
    }

    /// `flag` if given, else the profile's country.
    pub fn country(&self, flag: Option<&str>) -> Result<String> {
        pick(flag, self.country.as_deref(), "country", "--country")
    }

    /// `flag` if given, else the profile's base URL. Absent is fine.
    pub fn verification_base_url(&self, flag: Option<&str>) -> Option<String> {
        flag.or(self.verification_base_url.as_deref()).map(str::to_string)
    }

    pub fn signing_key_env(&self) -> &str {
        self.signing_key_env.as_deref().unwrap_or(DEFAULT_SIGNING_KEY_ENV)
    }

    /// Read the hex signing key from the configured environment variable.
    pub fn signing_key(&self) -> Result<SigningKey> {
        let var = self.signing_key_env();
        let hex = match std::env::var(var) {
            Ok(v) => v,
            Err(std::env::VarError::NotPresent) => {
                bail!("no signing key: set {var} to a 64-character hex key (see `rscp keygen`)")
            }
            Err(e) => return Err(e).with_context(|| format!("failed to read {var}")),
        };
        SigningKey::from_hex(hex.trim()).with_context(|| format!("{var} does not hold a valid signing key"))
    }
}

fn pick(flag: Option<&str>, profile: Option<&str>, what: &str, flag_name: &str) -> Result<String> {
    match flag.or(profile) {
        Some(v) => Ok(v.to_string()),
        None => bail!("no {what}: pass {flag_name} or set it in the --config profile"),
    }
}
