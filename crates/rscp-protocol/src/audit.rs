//! # Audited Privacy Gate
//!
//! The free functions in [`crate::enforce`] and [`crate::registry`] are
//! pure. [`PrivacyGate`] wraps them with an injected [`AuditSink`] that is
//! told about every protocol violation, carrying only sanitized data.
//!
//! The default sink emits a `tracing` warning. Tests and tools that need
//! to inspect violations use [`MemoryAuditSink`].

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use rscp_core::RscpPublicAttributes;

use crate::enforce::{enforce_public_attributes_only, extract_public_attributes};
use crate::error::ProtocolError;
use crate::registry::{validate_registry_input, RegistryInput};
use crate::sanitize::sanitize_for_logging;

/// A rejected attempt to pass forbidden data through the gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationEvent {
    /// Which gate entry point rejected the input.
    pub operation: String,
    /// Every offending field path.
    pub fields: Vec<String>,
    /// The input after [`sanitize_for_logging`].
    pub sanitized: Map<String, Value>,
}

/// Receiver for protocol violation events.
pub trait AuditSink: Send + Sync {
    /// Record one violation. Must not fail.
    fn record_violation(&self, event: &ViolationEvent);
}

/// Emits each violation as a `tracing::warn!` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record_violation(&self, event: &ViolationEvent) {
        let data = Value::Object(event.sanitized.clone());
        tracing::warn!(
            operation = %event.operation,
            fields = ?event.fields,
            data = %data,
            "privacy gate rejected forbidden fields"
        );
    }
}

/// Keeps violations in memory.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    events: Mutex<Vec<ViolationEvent>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<ViolationEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl AuditSink for MemoryAuditSink {
    fn record_violation(&self, event: &ViolationEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}

/// The privacy gate with an audit capability attached.
#[derive(Clone)]
pub struct PrivacyGate {
    sink: Arc<dyn AuditSink>,
}

impl std::fmt::Debug for PrivacyGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivacyGate").finish_non_exhaustive()
    }
}

impl Default for PrivacyGate {
    fn default() -> Self {
        Self::new(Arc::new(TracingAuditSink))
    }
}

impl PrivacyGate {
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self { sink }
    }

    /// [`enforce_public_attributes_only`], auditing violations.
    pub fn enforce(&self, data: &Map<String, Value>) -> Result<RscpPublicAttributes, ProtocolError> {
        enforce_public_attributes_only(data).map_err(|e| self.audit("enforce", data, e))
    }

    /// [`extract_public_attributes`], auditing violations.
    pub fn extract(&self, credential: &Map<String, Value>) -> Result<RscpPublicAttributes, ProtocolError> {
        extract_public_attributes(credential).map_err(|e| self.audit("extract", credential, e))
    }

    /// [`validate_registry_input`], auditing violations.
    pub fn validate_registry_input(&self, input: &Map<String, Value>) -> Result<RegistryInput, ProtocolError> {
        validate_registry_input(input).map_err(|e| self.audit("registry", input, e))
    }

    fn audit(&self, operation: &str, data: &Map<String, Value>, err: ProtocolError) -> ProtocolError {
        if let ProtocolError::ProtocolViolation { fields, .. } = &err {
            self.sink.record_violation(&ViolationEvent {
                operation: operation.to_string(),
                fields: fields.clone(),
                sanitized: sanitize_for_logging(data),
            });
        }
        err
    }
}
