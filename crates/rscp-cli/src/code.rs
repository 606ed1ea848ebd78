//! # Verification Code Subcommand
//!
//! Generate, validate and display 8-character Damm-checked verification
//! codes.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use rscp_core::verification_code::complete_code;
use rscp_core::{
    clean_code, format_verification_code, generate_verification_code, validate_verification_code,
};

/// Arguments for the `rscp code` subcommand.
#[derive(Args, Debug)]
pub struct CodeArgs {
    #[command(subcommand)]
    pub command: CodeCommand,
}

#[derive(Subcommand, Debug)]
pub enum CodeCommand {
    /// Generate fresh random codes, one per line.
    Generate {
        #[arg(long, short = 'n', default_value_t = 1)]
        count: usize,
        /// Print in `XXXX-XXXX` display form.
        #[arg(long)]
        display: bool,
    },

    /// Check alphabet, length and check character. Exits 1 when invalid.
    Validate {
        #[arg(value_name = "CODE")]
        code: String,
    },

    /// Print in `XXXX-XXXX` display form.
    Format {
        #[arg(value_name = "CODE")]
        code: String,
    },

    /// Append the check character to a 7-character base.
    Complete {
        #[arg(value_name = "BASE")]
        base: String,
    },
}

/// Execute the code subcommand.
pub fn run_code(args: &CodeArgs) -> Result<u8> {
    match &args.command {
        CodeCommand::Generate { count, display } => {
            for code in cmd_generate(*count, *display)? {
                println!("{code}");
            }
            Ok(0)
        }
        CodeCommand::Validate { code } => {
            if validate_verification_code(code) {
                println!("OK: {} is valid", format_verification_code(code));
                Ok(0)
            } else {
                println!("FAIL: {code:?} is not a valid verification code");
                Ok(1)
            }
        }
        CodeCommand::Format { code } => {
            println!("{}", format_verification_code(code));
            Ok(0)
        }
        CodeCommand::Complete { base } => {
            let code = complete_code(&clean_code(base))
                .with_context(|| format!("cannot complete {base:?}"))?;
            println!("{code}");
            Ok(0)
        }
    }
}

fn cmd_generate(count: usize, display: bool) -> Result<Vec<String>> {
    (0..count)
        .map(|_| {
            let code = generate_verification_code().context("failed to generate verification code")?;
            Ok(if display { format_verification_code(&code) } else { code })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_validate() {
        let codes = cmd_generate(20, false).unwrap();
        assert_eq!(codes.len(), 20);
        assert!(codes.iter().all(|c| c.len() == 8 && validate_verification_code(c)));
    }

    #[test]
    fn display_form_has_hyphen() {
        let codes = cmd_generate(3, true).unwrap();
        assert!(codes.iter().all(|c| c.len() == 9 && c.as_bytes()[4] == b'-'));
        assert!(codes.iter().all(|c| validate_verification_code(c)));
    }

    #[test]
    fn validate_exit_codes() {
        let ok = CodeArgs {
            command: CodeCommand::Validate { code: "a3b7-k9md".into() },
        };
        assert_eq!(run_code(&ok).unwrap(), 0);
        let bad = CodeArgs {
            command: CodeCommand::Validate { code: "A3B7K9ME".into() },
        };
        assert_eq!(run_code(&bad).unwrap(), 1);
    }

    #[test]
    fn complete_rejects_short_base() {
        let args = CodeArgs {
            command: CodeCommand::Complete { base: "A3B".into() },
        };
        assert!(run_code(&args).is_err());
    }
}
