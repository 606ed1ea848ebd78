//! # Verification Codes
//!
//! Eight-character codes over [`VERIFICATION_ALPHABET`]: seven random
//! payload characters followed by a Damm check character. Storage form is
//! the bare eight characters; display form inserts a hyphen after the
//! fourth (`A3B7-K9M2`). Both clean to the same canonical value.

use serde::{Deserialize, Serialize};

use crate::checksum::{damm_check, damm_validate, VERIFICATION_ALPHABET};
use crate::error::{RscpError, ValidationError};
use crate::random::random_string;

/// Total code length including the check character.
pub const CODE_LENGTH: usize = 8;
/// Length of the random payload.
pub const CODE_BASE_LENGTH: usize = 7;

/// A cleaned code split into payload and check character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationCodeParts {
    /// First seven characters.
    pub base: String,
    /// Eighth character.
    pub check_digit: char,
}

/// Strip hyphens and whitespace, then uppercase.
pub fn clean_code(code: &str) -> String {
    code.chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Append the Damm check character to a 7-character base.
pub fn complete_code(base: &str) -> Result<String, ValidationError> {
    let base = base.to_uppercase();
    let len = base.chars().count();
    if len != CODE_BASE_LENGTH {
        return Err(ValidationError::InvalidCodeBaseLength(len));
    }
    let check = damm_check(&base)?;
    Ok(format!("{base}{check}"))
}

/// Draw a fresh verification code from the secure random source.
///
/// Returns the 8-character storage form; no display hyphen is applied.
pub fn generate_verification_code() -> Result<String, RscpError> {
    let base = random_string(CODE_BASE_LENGTH, VERIFICATION_ALPHABET)?;
    Ok(complete_code(&base)?)
}

/// Display form `XXXX-XXXX`.
///
/// If cleaning does not yield exactly eight characters the uppercased
/// input is returned unchanged. Never fails.
pub fn format_verification_code(code: &str) -> String {
    let cleaned = clean_code(code);
    if cleaned.chars().count() != CODE_LENGTH {
        return code.to_uppercase();
    }
    let (head, tail) = cleaned.split_at(
        cleaned
            .char_indices()
            .nth(4)
            .map(|(i, _)| i)
            .unwrap_or(cleaned.len()),
    );
    format!("{head}-{tail}")
}

/// Whether `code` is a well-formed code with a correct check character.
///
/// Any length other than eight after cleaning is rejected without running
/// the checksum.
pub fn validate_verification_code(code: &str) -> bool {
    let cleaned = clean_code(code);
    if cleaned.chars().count() != CODE_LENGTH {
        return false;
    }
    damm_validate(&cleaned)
}

/// Split a cleaned 8-character code into payload and check character.
pub fn parse_verification_code(code: &str) -> Option<VerificationCodeParts> {
    let cleaned = clean_code(code);
    if cleaned.chars().count() != CODE_LENGTH {
        return None;
    }
    let check_digit = cleaned.chars().last()?;
    let base: String = cleaned.chars().take(CODE_BASE_LENGTH).collect();
    Some(VerificationCodeParts { base, check_digit })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn clean_format_roundtrip(code in "[A-Za-z0-9]{8}") {
            prop_assert_eq!(clean_code(&format_verification_code(&code)), clean_code(&code));
        }

        #[test]
        fn format_never_panics(code in ".{0,16}") {
            let _ = format_verification_code(&code);
            let _ = validate_verification_code(&code);
            let _ = parse_verification_code(&code);
        }
    }
}
