//! # rscp CLI entry point
//!
//! Parses command-line arguments, loads the optional issuer profile and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rscp_cli::cert::{run_cert, CertArgs};
use rscp_cli::check::{run_check, CheckArgs};
use rscp_cli::code::{run_code, CodeArgs};
use rscp_cli::config::IssuerProfile;
use rscp_cli::issue::{run_issue, IssueArgs};
use rscp_cli::keygen::{run_keygen, KeygenArgs};
use rscp_cli::verify::{run_verify, VerifyArgs};

/// RSCP Stack CLI
///
/// Road Safety Certification Protocol tooling: certificate numbers,
/// verification codes, privacy-gated issuance and HMAC verification.
#[derive(Parser, Debug)]
#[command(name = "rscp", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML issuer profile.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate, validate, format or parse certificate numbers.
    Cert(CertArgs),

    /// Generate, validate or format verification codes.
    Code(CodeArgs),

    /// Issue and sign a credential from a holder attribute file.
    Issue(IssueArgs),

    /// Verify presented identifiers or a signed credential.
    Verify(VerifyArgs),

    /// Generate a random 256-bit signing key.
    Keygen(KeygenArgs),

    /// Run the privacy gate over a JSON file.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "rscp CLI starting");

    let profile = match IssuerProfile::load(cli.config.as_deref()) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    let result = match cli.command {
        Commands::Cert(args) => run_cert(&args, &profile),
        Commands::Code(args) => run_code(&args),
        Commands::Issue(args) => run_issue(&args, &profile),
        Commands::Verify(args) => run_verify(&args, &profile),
        Commands::Keygen(args) => run_keygen(&args),
        Commands::Check(args) => run_check(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
