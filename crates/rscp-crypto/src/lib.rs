//! # rscp-crypto: Signing Layer for the RSCP Stack
//!
//! - [`sign`]: HMAC-SHA256 signatures over canonical payloads, verified in
//!   constant time.
//! - [`hash`]: SHA-256 credential fingerprints over the same bytes.
//! - [`key`]: 256-bit signing keys with a strict hex shape.
//!
//! ## Crate Policy
//!
//! - Signing input is always `CanonicalBytes` built from a
//!   `SignaturePayload`. There is no API that signs raw bytes.
//! - Key material is never serialized or logged.
//! - Verification returns a [`VerificationOutcome`]; only malformed keys
//!   and unserializable payloads are errors.
//! - No `unsafe` code. No `.unwrap()` outside tests.

pub mod error;
pub mod hash;
pub mod key;
pub mod sign;

pub use error::CryptoError;
pub use hash::{generate_credential_hash, verify_credential_hash};
pub use key::{is_valid_key_hex, SigningKey, KEY_BYTES};
pub use sign::{sign_credential, sign_payload, verify_signature, VerificationOutcome};
