//! # rscp-cli: CLI Tool for the RSCP Stack
//!
//! Provides the `rscp` command-line interface over the library crates.
//!
//! ## Subcommands
//!
//! - `rscp cert`: certificate number generation, validation and parsing.
//! - `rscp code`: verification code generation, validation and display.
//! - `rscp issue`: issue and sign a credential from an attribute file.
//! - `rscp verify`: verify presented identifiers or a signed credential.
//! - `rscp keygen`: generate a random signing key.
//! - `rscp check`: run the privacy gate over a JSON file.
//!
//! ```bash
//! rscp cert generate --year 2026 --level gold --country IN --issuer SWG --serial 1
//! rscp --config issuer.yaml issue holder.json --year 2026 --serial 1
//! rscp verify cert RS-2026-G-IN-SWG-000001-8 A3B7-K9MD
//! ```
//!
//! Structured results go to stdout as pretty JSON. Diagnostics go through
//! `tracing` to stderr.

pub mod cert;
pub mod check;
pub mod code;
pub mod config;
pub mod issue;
pub mod keygen;
pub mod verify;

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Read a file that must hold a single JSON object.
pub fn read_json_object(path: &Path) -> Result<Map<String, Value>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    match value {
        Value::Object(map) => Ok(map),
        other => bail!(
            "{} must contain a JSON object, found {}",
            path.display(),
            json_type_name(&other)
        ),
    }
}

/// Render `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{text}");
    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
