//! Issuance errors. Verification never fails; it reports.

use rscp_core::{RscpError, ValidationError};
use rscp_crypto::CryptoError;
use rscp_protocol::ProtocolError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VcError {
    /// The issuer data did not pass the privacy gate.
    #[error("privacy gate: {0}")]
    Protocol(#[from] ProtocolError),

    /// An identifier input was rejected.
    #[error("identifier: {0}")]
    Identifier(#[from] RscpError),

    /// Signing failed.
    #[error("signing: {0}")]
    Crypto(#[from] CryptoError),
}

impl From<ValidationError> for VcError {
    fn from(e: ValidationError) -> Self {
        Self::Identifier(RscpError::Validation(e))
    }
}
