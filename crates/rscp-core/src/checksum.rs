//! # Checksum Engines
//!
//! Two independent error-detecting codes keep short identifiers
//! self-validating against transcription errors:
//!
//! - **MOD 11,10** (ISO 7064 hybrid system) over `0-9A-Z`, used for the
//!   trailing check character of certificate numbers.
//! - **Damm** over a 10×10 totally anti-symmetric quasigroup, used for the
//!   eighth character of verification codes.
//!
//! Both engines are pure functions over `&str` with no shared state.
//!
//! ## Alphabet folding
//!
//! The Damm table only has ten symbols, so verification-code characters
//! fold onto digits via `index mod 10`. Characters whose alphabet indices
//! differ by a multiple of ten share a digit, which means a substitution
//! between two such characters is invisible to the check. Alphabet
//! position carries no meaning outside this folding.

use crate::error::ValidationError;

/// Alphabet for MOD 11,10 input. A character's value is its index (0–35).
pub const ALPHANUMERIC_ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Verification-code alphabet: uppercase letters and digits without the
/// visually ambiguous `I`, `L`, `O`, `0` and `1`.
pub const VERIFICATION_ALPHABET: &str = "ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Damm operation table. Rows are the interim state, columns the input digit.
const DAMM_TABLE: [[u8; 10]; 10] = [
    [0, 3, 1, 7, 5, 9, 8, 6, 4, 2],
    [7, 0, 9, 2, 1, 5, 4, 8, 6, 3],
    [4, 2, 0, 6, 8, 7, 1, 3, 5, 9],
    [1, 7, 5, 0, 9, 8, 3, 4, 2, 6],
    [6, 1, 2, 3, 0, 4, 5, 9, 7, 8],
    [3, 6, 7, 4, 2, 0, 9, 5, 8, 1],
    [5, 8, 6, 9, 7, 2, 0, 1, 3, 4],
    [8, 9, 4, 5, 3, 6, 2, 0, 1, 7],
    [9, 4, 3, 8, 6, 1, 7, 2, 0, 5],
    [2, 5, 8, 1, 4, 3, 6, 7, 9, 0],
];

// ---------------------------------------------------------------------------
// MOD 11,10
// ---------------------------------------------------------------------------

fn alphanumeric_value(c: char) -> Option<u32> {
    // ASCII alphabet: byte offset equals character index.
    ALPHANUMERIC_ALPHABET.find(c).map(|index| index as u32)
}

/// Compute the MOD 11,10 check character for `input`.
///
/// The input is uppercased first. Running remainder starts at 10; for each
/// character `remainder = (((remainder + value) mod 10) or 10) * 2 mod 11`.
/// The check value is `(11 - remainder) mod 10`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidChecksumCharacter`] for any character
/// outside `0-9A-Z`.
pub fn mod11_10_check(input: &str) -> Result<char, ValidationError> {
    let mut remainder: u32 = 10;
    for (position, c) in input.chars().enumerate() {
        let upper = c.to_ascii_uppercase();
        let value = alphanumeric_value(upper).ok_or(ValidationError::InvalidChecksumCharacter {
            engine: "MOD 11,10",
            character: c,
            position,
        })?;
        let mut sum = (remainder + value) % 10;
        if sum == 0 {
            sum = 10;
        }
        remainder = (sum * 2) % 11;
    }
    let check = (11 - remainder) % 10;
    // check < 10, so the conversion always succeeds.
    Ok(char::from_digit(check, 10).unwrap_or('0'))
}

/// Verify `check` against the MOD 11,10 check character of `input`.
///
/// Comparison is case-insensitive. Inputs with characters outside the
/// alphabet never verify.
pub fn mod11_10_verify(input: &str, check: char) -> bool {
    match mod11_10_check(input) {
        Ok(expected) => expected.eq_ignore_ascii_case(&check),
        Err(_) => false,
    }
}

// ---------------------------------------------------------------------------
// Damm
// ---------------------------------------------------------------------------

/// Fold a verification-alphabet character onto a Damm digit (`index mod 10`).
///
/// Lookup is case-insensitive. Returns `None` for characters outside the
/// alphabet.
pub fn damm_digit(c: char) -> Option<usize> {
    let upper = c.to_ascii_uppercase();
    VERIFICATION_ALPHABET
        .chars()
        .position(|a| a == upper)
        .map(|index| index % 10)
}

/// Run the Damm table over `input` from state 0 and return the interim state.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidChecksumCharacter`] for characters
/// outside [`VERIFICATION_ALPHABET`].
pub fn damm_interim(input: &str) -> Result<u8, ValidationError> {
    let mut state: u8 = 0;
    for (position, c) in input.chars().enumerate() {
        let digit = damm_digit(c).ok_or(ValidationError::InvalidChecksumCharacter {
            engine: "Damm",
            character: c,
            position,
        })?;
        state = DAMM_TABLE[state as usize][digit];
    }
    Ok(state)
}

/// Compute the Damm check character for `base`.
///
/// Finds the digit that carries the final interim state to 0 and returns
/// the alphabet character at that digit's position.
pub fn damm_check(base: &str) -> Result<char, ValidationError> {
    let state = damm_interim(base)? as usize;
    let digit = DAMM_TABLE[state]
        .iter()
        .position(|&next| next == 0)
        .unwrap_or(0);
    Ok(VERIFICATION_ALPHABET
        .chars()
        .nth(digit)
        .unwrap_or('A'))
}

/// Full Damm validation: `true` iff `input` (base plus check) reduces to 0.
pub fn damm_validate(input: &str) -> bool {
    !input.is_empty() && matches!(damm_interim(input), Ok(0))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn code_base() -> impl Strategy<Value = String> {
        "[ABCDEFGHJKMNPQRSTUVWXYZ2-9]{7}"
    }

    proptest! {
        #[test]
        fn damm_generated_code_validates(base in code_base()) {
            let check = damm_check(&base).unwrap();
            let code = format!("{base}{check}");
            prop_assert!(damm_validate(&code));
        }

        /// A substitution that changes the folded digit is always caught.
        #[test]
        fn damm_detects_digit_changing_substitution(
            base in code_base(),
            pos in 0usize..8,
            replacement in 0usize..31,
        ) {
            let check = damm_check(&base).unwrap();
            let mut chars: Vec<char> = format!("{base}{check}").chars().collect();
            let new_char = VERIFICATION_ALPHABET.chars().nth(replacement).unwrap();
            prop_assume!(damm_digit(new_char) != damm_digit(chars[pos]));
            chars[pos] = new_char;
            let mutated: String = chars.into_iter().collect();
            prop_assert!(!damm_validate(&mutated));
        }

        /// Swapping neighbours with distinct folded digits is always caught.
        #[test]
        fn damm_detects_adjacent_transposition(base in code_base(), pos in 0usize..7) {
            let check = damm_check(&base).unwrap();
            let mut chars: Vec<char> = format!("{base}{check}").chars().collect();
            prop_assume!(damm_digit(chars[pos]) != damm_digit(chars[pos + 1]));
            chars.swap(pos, pos + 1);
            let mutated: String = chars.into_iter().collect();
            prop_assert!(!damm_validate(&mutated));
        }
    }
}
