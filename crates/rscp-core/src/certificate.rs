//! # Certificate Numbers
//!
//! Human-readable certificate numbers of the form
//!
//! ```text
//! RS-{YYYY}-{L}-{CC}-{III}-{NNNNNN}-{C}
//! ```
//!
//! where `L` is the level code, `CC` the country, `III` the issuer code,
//! `NNNNNN` the zero-padded serial and `C` the MOD 11,10 check character
//! over the hyphen-free base `RS{YYYY}{L}{CC}{III}{NNNNNN}`.
//!
//! Parsing and validating are separate steps so that callers can tell a
//! malformed string (`parse` returns `None`) from a well-formed number with
//! a wrong check character (`validate` returns `false`).

use serde::{Deserialize, Serialize};

use crate::checksum::{mod11_10_check, mod11_10_verify};
use crate::error::ValidationError;
use crate::level::CertificationLevel;

/// Fixed prefix of every certificate number.
pub const CERTIFICATE_PREFIX: &str = "RS";

/// Earliest accepted issuance year.
pub const MIN_YEAR: u32 = 2020;
/// Latest accepted issuance year.
pub const MAX_YEAR: u32 = 2100;
/// Largest serial that fits the 6-digit field.
pub const MAX_SERIAL: u32 = 999_999;

/// Components recovered from a certificate number string.
///
/// A parse result only: holding a value of this type says nothing about
/// whether its check character is correct. Use [`CertificateNumberParts::is_valid`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateNumberParts {
    /// Four-digit issuance year.
    pub year: u32,
    /// Certification level.
    pub level: CertificationLevel,
    /// Single-letter level code (`B`, `S`, `G`).
    pub level_code: char,
    /// Uppercase 2-letter country code.
    pub country: String,
    /// Uppercase 3-letter issuer code.
    pub issuer_code: String,
    /// Serial number, 0–999999 as written.
    pub serial: u32,
    /// Check character as written (uppercased).
    pub check_digit: char,
}

impl CertificateNumberParts {
    /// The hyphen-free checksum input: `RS{YYYY}{L}{CC}{III}{NNNNNN}`.
    pub fn checksum_base(&self) -> String {
        checksum_base(
            self.year,
            self.level_code,
            &self.country,
            &self.issuer_code,
            self.serial,
        )
    }

    /// Whether the check character matches the recomputed checksum.
    pub fn is_valid(&self) -> bool {
        mod11_10_verify(&self.checksum_base(), self.check_digit)
    }
}

impl std::fmt::Display for CertificateNumberParts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{CERTIFICATE_PREFIX}-{:04}-{}-{}-{}-{:06}-{}",
            self.year, self.level_code, self.country, self.issuer_code, self.serial, self.check_digit
        )
    }
}

fn checksum_base(year: u32, level_code: char, country: &str, issuer_code: &str, serial: u32) -> String {
    format!("{CERTIFICATE_PREFIX}{year:04}{level_code}{country}{issuer_code}{serial:06}")
}

fn is_upper_letters(s: &str, len: usize) -> bool {
    s.len() == len && s.chars().all(|c| c.is_ascii_uppercase())
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.chars().all(|c| c.is_ascii_digit())
}

/// Normalize and validate a 2-letter country code.
///
/// Only the shape is checked; membership in ISO 3166-1 is not.
pub fn normalize_country(country: &str) -> Result<String, ValidationError> {
    let upper = country.to_ascii_uppercase();
    if is_upper_letters(&upper, 2) {
        Ok(upper)
    } else {
        Err(ValidationError::InvalidCountry(country.to_string()))
    }
}

/// Normalize and validate a 3-letter issuer code.
pub fn normalize_issuer_code(issuer_code: &str) -> Result<String, ValidationError> {
    let upper = issuer_code.to_ascii_uppercase();
    if is_upper_letters(&upper, 3) {
        Ok(upper)
    } else {
        Err(ValidationError::InvalidIssuerCode(issuer_code.to_string()))
    }
}

/// Validate an issuance year against the supported window.
pub fn validate_year(year: u32) -> Result<u32, ValidationError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(ValidationError::InvalidYear(year))
    }
}

/// Validate a serial against the 6-digit range (zero is reserved).
pub fn validate_serial(serial: u32) -> Result<u32, ValidationError> {
    if (1..=MAX_SERIAL).contains(&serial) {
        Ok(serial)
    } else {
        Err(ValidationError::InvalidSerial(serial))
    }
}

/// Generate a certificate number with its MOD 11,10 check character.
///
/// # Errors
///
/// Every input is validated and the first offending field is reported:
/// year in 2020–2100, country `[A-Z]{2}`, issuer `[A-Z]{3}` (both
/// case-normalized), serial in 1–999999.
pub fn generate_certificate_number(
    year: u32,
    level: CertificationLevel,
    country: &str,
    issuer_code: &str,
    serial: u32,
) -> Result<String, ValidationError> {
    let year = validate_year(year)?;
    let country = normalize_country(country)?;
    let issuer_code = normalize_issuer_code(issuer_code)?;
    let serial = validate_serial(serial)?;

    let base = checksum_base(year, level.code(), &country, &issuer_code, serial);
    let check = mod11_10_check(&base)?;

    Ok(CertificateNumberParts {
        year,
        level,
        level_code: level.code(),
        country,
        issuer_code,
        serial,
        check_digit: check,
    }
    .to_string())
}

/// Parse a certificate number against `RS-DDDD-[BSG]-LL-LLL-DDDDDD-[A-Z0-9]`.
///
/// Case-insensitive. Returns `None` on any mismatch, including a level code
/// outside `B`/`S`/`G`. The check character is not verified here.
pub fn parse_certificate_number(s: &str) -> Option<CertificateNumberParts> {
    let upper = s.to_ascii_uppercase();
    let parts: Vec<&str> = upper.split('-').collect();
    if parts.len() != 7 || parts[0] != CERTIFICATE_PREFIX {
        return None;
    }

    let (year, level_code, country, issuer, serial, check) =
        (parts[1], parts[2], parts[3], parts[4], parts[5], parts[6]);

    if !is_digits(year, 4) || !is_digits(serial, 6) {
        return None;
    }
    if !is_upper_letters(country, 2) || !is_upper_letters(issuer, 3) {
        return None;
    }

    let mut code_chars = level_code.chars();
    let level_char = code_chars.next()?;
    if code_chars.next().is_some() {
        return None;
    }
    let level = CertificationLevel::from_code(level_char)?;

    let mut check_chars = check.chars();
    let check_digit = check_chars.next()?;
    if check_chars.next().is_some()
        || !(check_digit.is_ascii_uppercase() || check_digit.is_ascii_digit())
    {
        return None;
    }

    Some(CertificateNumberParts {
        year: year.parse().ok()?,
        level,
        level_code: level.code(),
        country: country.to_string(),
        issuer_code: issuer.to_string(),
        serial: serial.parse().ok()?,
        check_digit,
    })
}

/// Parse, then verify the check character.
pub fn validate_certificate_number(s: &str) -> bool {
    parse_certificate_number(s).is_some_and(|parts| parts.is_valid())
}

/// Canonical uppercase hyphenated form.
///
/// Unparseable input degrades to the uppercased input. Never fails and
/// never re-derives the check character.
pub fn format_certificate_number(s: &str) -> String {
    match parse_certificate_number(s) {
        Some(parts) => parts.to_string(),
        None => s.to_uppercase(),
    }
}
