//! # Error Types
//!
//! Structured errors for the foundational layer, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Parse failures of identifier strings are not errors: parsers return
//! `Option` and checksum validators return `bool`. The types here cover
//! inputs a caller supplied for *generation*, where silently accepting a
//! best-effort value would mint a bad identifier.

use thiserror::Error;

/// Top-level error type for the RSCP core.
#[derive(Error, Debug)]
pub enum RscpError {
    /// An identifier input failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The secure random source could not satisfy a request.
    #[error("random source error: {0}")]
    Random(#[from] RandomError),

    /// Canonical serialization of a signing payload failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}

/// Validation failure for an identifier component.
///
/// Every variant names the offending field and the constraint it broke.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Issuance year outside the supported window.
    #[error("invalid year {0}: must be an integer between 2020 and 2100")]
    InvalidYear(u32),

    /// Unknown certification level name or code.
    #[error("invalid level {0:?}: must be one of bronze, silver, gold")]
    InvalidLevel(String),

    /// Country code is not two ASCII letters.
    #[error("invalid country {0:?}: must be a 2-letter code (A-Z)")]
    InvalidCountry(String),

    /// Issuer code is not three ASCII letters.
    #[error("invalid issuer code {0:?}: must be a 3-letter code (A-Z)")]
    InvalidIssuerCode(String),

    /// Serial number outside the 6-digit range.
    #[error("invalid serial {0}: must be an integer between 1 and 999999")]
    InvalidSerial(u32),

    /// A checksum input contained a character outside the engine's alphabet.
    #[error("invalid character {character:?} at position {position} for {engine} checksum")]
    InvalidChecksumCharacter {
        /// Which checksum engine rejected the input.
        engine: &'static str,
        /// The rejected character.
        character: char,
        /// Zero-based character position in the input.
        position: usize,
    },

    /// A verification code base had the wrong length.
    #[error("invalid verification code base length {0}: must be 7 characters")]
    InvalidCodeBaseLength(usize),

    /// A date string is not an ISO-8601 calendar date.
    #[error("invalid date {0:?}: must be an ISO-8601 date or datetime")]
    InvalidDate(String),

    /// A timestamp is not in the one textual form that is signed.
    #[error("invalid timestamp {0:?}: must be YYYY-MM-DDTHH:MM:SSZ with whole seconds")]
    InvalidTimestamp(String),
}

/// Failure of the secure random source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RandomError {
    /// The requested upper bound cannot be sampled without bias.
    #[error("invalid random range max {0}: must be between 1 and 4294967295")]
    InvalidRange(u64),

    /// An empty alphabet was supplied for string generation.
    #[error("cannot draw random characters from an empty alphabet")]
    EmptyAlphabet,

    /// The operating system entropy source failed.
    #[error("entropy source failure: {0}")]
    Entropy(String),
}

/// Errors during canonical serialization of a signing payload.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
