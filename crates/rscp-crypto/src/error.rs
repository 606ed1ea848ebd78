//! Errors from the signing layer.
//!
//! Signature and hash *mismatches* are not errors; see
//! [`crate::VerificationOutcome`]. These variants cover bad keys and
//! payloads that could not be canonicalized at all.

use rscp_core::{CanonicalizationError, RandomError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoError {
    /// Key material does not have the required shape.
    #[error("invalid signing key: {0}")]
    InvalidKey(String),

    /// The payload could not be canonicalized.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// Key generation could not draw entropy.
    #[error("key generation failed: {0}")]
    Random(#[from] RandomError),
}
