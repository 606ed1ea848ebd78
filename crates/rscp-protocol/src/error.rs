//! # Privacy Gate Errors
//!
//! One tagged enum for every way a candidate can fail the gate. The
//! variant is the discriminant: callers branch on [`ProtocolError::kind`]
//! or match directly, and only [`ProtocolErrorKind::ProtocolViolation`]
//! is security-relevant.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Discriminant of a [`ProtocolError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProtocolErrorKind {
    /// A forbidden field was present.
    ProtocolViolation,
    /// A required public attribute was absent or null.
    MissingAttribute,
    /// A public attribute had the wrong shape.
    InvalidAttribute,
}

impl ProtocolErrorKind {
    /// Stable error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ProtocolViolation => "PROTOCOL_VIOLATION",
            Self::MissingAttribute => "MISSING_ATTRIBUTE",
            Self::InvalidAttribute => "INVALID_ATTRIBUTE",
        }
    }
}

impl std::fmt::Display for ProtocolErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Failure of the privacy gate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Forbidden data reached the gate. Never recoverable by retrying.
    #[error("protocol violation: forbidden field {field:?} present (all offending fields: {})", .fields.join(", "))]
    ProtocolViolation {
        /// First offending field path.
        field: String,
        /// Every offending field path, `field` or `container.field`.
        fields: Vec<String>,
    },

    /// A required attribute was not supplied.
    #[error("missing required attribute {field:?}")]
    MissingAttribute {
        /// Wire name of the absent attribute.
        field: String,
    },

    /// An attribute was supplied with the wrong shape.
    #[error("invalid attribute {field:?}: {message}")]
    InvalidAttribute {
        /// Wire name of the attribute.
        field: String,
        /// What constraint it broke.
        message: String,
    },
}

impl ProtocolError {
    /// Which failure mode this is.
    pub fn kind(&self) -> ProtocolErrorKind {
        match self {
            Self::ProtocolViolation { .. } => ProtocolErrorKind::ProtocolViolation,
            Self::MissingAttribute { .. } => ProtocolErrorKind::MissingAttribute,
            Self::InvalidAttribute { .. } => ProtocolErrorKind::InvalidAttribute,
        }
    }

    /// Stable error code string, e.g. `PROTOCOL_VIOLATION`.
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// The field the error is about.
    pub fn field(&self) -> &str {
        match self {
            Self::ProtocolViolation { field, .. }
            | Self::MissingAttribute { field }
            | Self::InvalidAttribute { field, .. } => field,
        }
    }

    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn missing(field: &str) -> Self {
        Self::MissingAttribute {
            field: field.to_string(),
        }
    }
}
