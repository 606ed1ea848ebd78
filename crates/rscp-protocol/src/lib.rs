//! # rscp-protocol: Privacy Gate
//!
//! The only path from issuer data to a registry. A candidate either
//! reduces to exactly five public attributes or is rejected with a
//! [`ProtocolError`] whose kind says why.
//!
//! ## Security Invariant
//!
//! Forbidden-field detection precedes every other check, and the output
//! type has no room for anything but the five attributes. There is one
//! enforcement function; every adapter in this crate calls it.
//!
//! ## Crate Policy
//!
//! - Depends only on `rscp-core` internally.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.
//! - No global logging side effects: violations go to an injected
//!   [`AuditSink`].

pub mod audit;
pub mod enforce;
pub mod error;
pub mod fields;
pub mod registry;
pub mod sanitize;

pub use audit::{AuditSink, MemoryAuditSink, PrivacyGate, TracingAuditSink, ViolationEvent};
pub use enforce::{detect_forbidden_fields, enforce_public_attributes_only, extract_public_attributes};
pub use error::{ProtocolError, ProtocolErrorKind};
pub use fields::{classify_field, is_allowed_field, is_forbidden_field, FieldClass, FORBIDDEN_FIELDS};
pub use registry::{validate_registry_input, RegistryInput};
pub use sanitize::{sanitize_for_logging, REDACTED};
