//! # Check Subcommand
//!
//! Runs the privacy gate over a JSON file without issuing anything and
//! prints a report. Violations are captured with a [`MemoryAuditSink`], so
//! the report shows exactly the sanitized view an audit log would get;
//! raw values of forbidden fields never reach stdout.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use serde_json::{Map, Value};

use rscp_protocol::{
    detect_forbidden_fields, MemoryAuditSink, PrivacyGate, ProtocolError, ProtocolErrorKind,
    ViolationEvent,
};

/// Which gate entry point to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GateMode {
    /// Flat attribute bag.
    Enforce,
    /// Credential-shaped object with an optional `publicAttributes` member.
    Extract,
    /// Registry submission with `issuerCode` and `publicAttributes`.
    Registry,
}

/// Arguments for the `rscp check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[arg(long, value_enum, default_value_t = GateMode::Enforce)]
    pub mode: GateMode,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateError {
    pub code: ProtocolErrorKind,
    pub field: String,
    pub message: String,
}

impl From<&ProtocolError> for GateError {
    fn from(e: &ProtocolError) -> Self {
        Self {
            code: e.kind(),
            field: e.field().to_string(),
            message: e.to_string(),
        }
    }
}

/// Outcome of one gate run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub ok: bool,
    /// What survived the gate, when it passed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<GateError>,
    /// Every forbidden field path found, even when the gate failed for
    /// another reason first.
    pub forbidden_fields: Vec<String>,
    pub violations: Vec<ViolationEvent>,
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let input = crate::read_json_object(&args.file)?;
    let report = check(&input, args.mode)?;
    crate::print_json(&report)?;
    Ok(if report.ok { 0 } else { 1 })
}

/// Run the gate in `mode` and collect what it reported.
pub fn check(input: &Map<String, Value>, mode: GateMode) -> Result<CheckReport> {
    let sink = Arc::new(MemoryAuditSink::new());
    let gate = PrivacyGate::new(sink.clone());

    let outcome = match mode {
        GateMode::Enforce => gate.enforce(input).map(serde_json::to_value),
        GateMode::Extract => gate.extract(input).map(serde_json::to_value),
        GateMode::Registry => gate.validate_registry_input(input).map(serde_json::to_value),
    };

    let (output, error) = match outcome {
        Ok(value) => (Some(value?), None),
        Err(e) => {
            tracing::info!(code = %e.code(), field = %e.field(), "privacy gate rejected input");
            (None, Some(GateError::from(&e)))
        }
    };

    Ok(CheckReport {
        ok: error.is_none(),
        output,
        error,
        forbidden_fields: detect_forbidden_fields(input),
        violations: sink.events(),
    })
}
