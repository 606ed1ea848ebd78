//! # Certificate Number Subcommand
//!
//! Generate, validate, normalize and take apart `RS-YYYY-L-CC-III-NNNNNN-C`
//! certificate numbers.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use rscp_core::{
    format_certificate_number, generate_certificate_number, parse_certificate_number,
    CertificationLevel,
};

use crate::config::IssuerProfile;

/// Arguments for the `rscp cert` subcommand.
#[derive(Args, Debug)]
pub struct CertArgs {
    #[command(subcommand)]
    pub command: CertCommand,
}

#[derive(Subcommand, Debug)]
pub enum CertCommand {
    /// Generate a certificate number with its check character.
    Generate {
        #[arg(long)]
        year: u32,
        /// bronze, silver or gold.
        #[arg(long)]
        level: CertificationLevel,
        /// 2-letter country code. Defaults to the profile's.
        #[arg(long)]
        country: Option<String>,
        /// 3-letter issuer code. Defaults to the profile's.
        #[arg(long)]
        issuer: Option<String>,
        #[arg(long)]
        serial: u32,
    },

    /// Check shape and check character. Exits 1 when invalid.
    Validate {
        #[arg(value_name = "NUMBER")]
        number: String,
    },

    /// Print the canonical uppercase form.
    Format {
        #[arg(value_name = "NUMBER")]
        number: String,
    },

    /// Print the components as JSON.
    Parse {
        #[arg(value_name = "NUMBER")]
        number: String,
    },
}

/// Execute the cert subcommand.
pub fn run_cert(args: &CertArgs, profile: &IssuerProfile) -> Result<u8> {
    match &args.command {
        CertCommand::Generate {
            year,
            level,
            country,
            issuer,
            serial,
        } => {
            let country = profile.country(country.as_deref())?;
            let issuer = profile.issuer_code(issuer.as_deref())?;
            let number = cmd_generate(*year, *level, &country, &issuer, *serial)?;
            println!("{number}");
            Ok(0)
        }
        CertCommand::Validate { number } => Ok(cmd_validate(number)),
        CertCommand::Format { number } => {
            println!("{}", format_certificate_number(number));
            Ok(0)
        }
        CertCommand::Parse { number } => cmd_parse(number),
    }
}

fn cmd_generate(
    year: u32,
    level: CertificationLevel,
    country: &str,
    issuer: &str,
    serial: u32,
) -> Result<String> {
    generate_certificate_number(year, level, country, issuer, serial)
        .context("cannot generate certificate number")
}

fn cmd_validate(number: &str) -> u8 {
    match parse_certificate_number(number) {
        Some(parts) if parts.is_valid() => {
            println!("OK: {} is valid", format_certificate_number(number));
            0
        }
        Some(parts) => {
            println!(
                "FAIL: check character {} is wrong for {}",
                parts.check_digit,
                parts.checksum_base()
            );
            1
        }
        None => {
            println!("FAIL: not in RS-YYYY-L-CC-III-NNNNNN-C format");
            1
        }
    }
}

fn cmd_parse(number: &str) -> Result<u8> {
    match parse_certificate_number(number) {
        Some(parts) => {
            crate::print_json(&parts)?;
            Ok(if parts.is_valid() { 0 } else { 1 })
        }
        None => {
            println!("FAIL: not in RS-YYYY-L-CC-III-NNNNNN-C format");
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_matches_known_number() {
        let n = cmd_generate(2026, CertificationLevel::Gold, "in", "swg", 1).unwrap();
        assert_eq!(n, "RS-2026-G-IN-SWG-000001-8");
    }

    #[test]
    fn generate_reports_bad_input() {
        let err = cmd_generate(2019, CertificationLevel::Gold, "IN", "SWG", 1).unwrap_err();
        assert!(format!("{err:#}").contains("2019"));
    }

    #[test]
    fn generate_uses_profile_defaults() {
        let profile = IssuerProfile {
            issuer_code: Some("NRB".into()),
            country: Some("KE".into()),
            ..Default::default()
        };
        let args = CertArgs {
            command: CertCommand::Generate {
                year: 2031,
                level: CertificationLevel::Silver,
                country: None,
                issuer: None,
                serial: 42,
            },
        };
        assert_eq!(run_cert(&args, &profile).unwrap(), 0);
    }

    #[test]
    fn generate_without_issuer_fails() {
        let args = CertArgs {
            command: CertCommand::Generate {
                year: 2031,
                level: CertificationLevel::Silver,
                country: Some("KE".into()),
                issuer: None,
                serial: 42,
            },
        };
        assert!(run_cert(&args, &IssuerProfile::default()).is_err());
    }

    #[test]
    fn validate_exit_codes() {
        assert_eq!(cmd_validate("rs-2026-g-in-swg-000001-8"), 0);
        assert_eq!(cmd_validate("RS-2026-G-IN-SWG-000001-7"), 1);
        assert_eq!(cmd_validate("RS-2026-X-IN-SWG-000001-8"), 1);
    }

    #[test]
    fn parse_exit_codes() {
        assert_eq!(cmd_parse("RS-2100-S-GB-XYZ-999999-9").unwrap(), 0);
        assert_eq!(cmd_parse("RS-2100-S-GB-XYZ-999999-0").unwrap(), 1);
        assert_eq!(cmd_parse("garbage").unwrap(), 1);
    }
}
