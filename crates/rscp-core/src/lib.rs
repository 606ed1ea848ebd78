//! # rscp-core: Foundational Types for the RSCP Stack
//!
//! Identifiers and payload primitives for the Road Safety Certification
//! Protocol. Every other crate in the workspace depends on `rscp-core`; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Two checksum engines, one per identifier.** MOD 11,10 protects
//!    certificate numbers; Damm protects verification codes. Both live in
//!    [`checksum`] and neither allocates per character.
//!
//! 2. **Parse failures are values, not errors.** Identifier parsers return
//!    `Option`, validators return `bool`. Only generation inputs produce a
//!    [`ValidationError`].
//!
//! 3. **Fresh entropy per call.** [`random`] draws from the OS on every
//!    request with rejection sampling; nothing is seeded or cached.
//!
//! 4. **`CanonicalBytes` newtype.** Everything signed or hashed flows through
//!    `CanonicalBytes::new()`, which fixes member order independently of map
//!    iteration order.
//!
//! 5. **Five public attributes.** [`RscpPublicAttributes`] cannot represent
//!    any other holder data.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `rscp-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All operations are synchronous and share no mutable state.

pub mod attributes;
pub mod canonical;
pub mod certificate;
pub mod checksum;
pub mod digest;
pub mod error;
pub mod identity;
pub mod level;
pub mod payload;
pub mod random;
pub mod temporal;
pub mod verification_code;

// Re-export primary types for ergonomic imports.
pub use attributes::{RscpPublicAttributes, PUBLIC_ATTRIBUTE_FIELDS};
pub use canonical::CanonicalBytes;
pub use certificate::{
    format_certificate_number, generate_certificate_number, normalize_country,
    normalize_issuer_code, parse_certificate_number, validate_certificate_number,
    CertificateNumberParts,
};
pub use digest::{sha256_digest, sha256_hex, ContentDigest};
pub use error::{CanonicalizationError, RandomError, RscpError, ValidationError};
pub use identity::{
    generate_all_identifiers, generate_credential_id, generate_holder_did, generate_issuer_did,
    new_holder_did, parse_credential_id, parse_holder_did, parse_issuer_did, CredentialIdParts,
    GeneratedIdentifiers, IdentifierOptions,
};
pub use level::{CertificationLevel, ALL_LEVELS};
pub use payload::{SignaturePayload, SignedCredential};
pub use temporal::{calculate_valid_until, is_expired_at, parse_iso_date, Timestamp};
pub use verification_code::{
    clean_code, format_verification_code, generate_verification_code, parse_verification_code,
    validate_verification_code, VerificationCodeParts,
};
