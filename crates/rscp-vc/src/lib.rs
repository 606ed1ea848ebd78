//! # rscp-vc: Issuance and Verification
//!
//! The facade over the lower crates:
//!
//! - **Builder** (`builder.rs`): request → gate → identifiers → signature.
//! - **Verify** (`verify.rs`): certificate/code/QR checks for front-ends,
//!   and full signed-credential verification for relying parties.
//! - **QR and URLs** (`qr.rs`, `url.rs`): what gets printed on a certificate.
//! - **Registry** (`record.rs`): the record handed to a registry writer.
//!
//! ## Crate Policy
//!
//! - Depends on `rscp-core`, `rscp-protocol` and `rscp-crypto` internally.
//! - Every attribute that leaves this crate came out of the privacy gate.
//! - Verification reports problems; it does not fail.

pub mod builder;
pub mod error;
pub mod qr;
pub mod record;
pub mod url;
pub mod verify;

pub use builder::{CredentialBuilder, CredentialRequest, IssuedCredential};
pub use error::VcError;
pub use qr::{QrPayload, QR_PAYLOAD_VERSION};
pub use record::RegistryRecord;
pub use url::{full_verification_url, short_verification_url, VerificationUrls};
pub use verify::{
    verify_certificate, verify_certificate_at, verify_signed_credential, CredentialVerification,
    VerificationResult,
};
