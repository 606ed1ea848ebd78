//! # Keygen Subcommand
//!
//! Generate a random 256-bit HMAC signing key as 64 hex characters.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use rscp_crypto::SigningKey;

/// Arguments for the `rscp keygen` subcommand.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Write the key to this file instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Execute the keygen subcommand.
pub fn run_keygen(args: &KeygenArgs) -> Result<u8> {
    let key = SigningKey::generate().context("failed to generate signing key")?;
    match &args.output {
        Some(path) => {
            write_key(&key, path)?;
            println!("OK: wrote signing key to {}", path.display());
        }
        None => println!("{}", key.to_hex()),
    }
    Ok(0)
}

fn write_key(key: &SigningKey, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, key.to_hex())
        .with_context(|| format!("failed to write signing key: {}", path.display()))?;
    tracing::info!(path = %path.display(), "signing key written");
    Ok(())
}
