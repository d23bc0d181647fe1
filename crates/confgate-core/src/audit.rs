// crates/confgate-core/src/audit.rs
// ============================================================================
// Module: Validation Audit Logging
// Description: Structured audit events for validation runs.
// Purpose: Emit one redacted JSON record per run without hard dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every run of a validator configured with a sink produces one
//! [`ValidationAuditEvent`]. Events name the outcome, the error kind, and the
//! section/key involved. Raw values never appear in an event. Sinks write
//! JSON lines to stderr or an append-only file, or keep events in memory.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::error::ValidationError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outcome of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// The document satisfied the schema.
    Valid,
    /// The document violated the schema or a limit.
    Invalid,
}

/// Validation audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Run outcome.
    pub outcome: ValidationOutcome,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
    /// Section involved in the failure, when any.
    pub section: Option<String>,
    /// Value key involved in the failure, when any.
    pub key: Option<String>,
    /// Number of sections in the document.
    pub sections_seen: usize,
    /// Redaction classification for payload logging.
    pub redaction: &'static str,
}

/// Inputs required to construct an audit event.
pub struct ValidationAuditEventParams {
    /// Run outcome.
    pub outcome: ValidationOutcome,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
    /// Section involved in the failure.
    pub section: Option<String>,
    /// Value key involved in the failure.
    pub key: Option<String>,
    /// Number of sections in the document.
    pub sections_seen: usize,
}

impl ValidationAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: ValidationAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "config_validation",
            timestamp_ms,
            outcome: params.outcome,
            error_kind: params.error_kind,
            section: params.section,
            key: params.key,
            sections_seen: params.sections_seen,
            redaction: "values_omitted",
        }
    }

    /// Builds the event describing a finished run.
    #[must_use]
    pub fn from_result(result: &Result<(), ValidationError>, sections_seen: usize) -> Self {
        let params = match result {
            Ok(()) => ValidationAuditEventParams {
                outcome: ValidationOutcome::Valid,
                error_kind: None,
                section: None,
                key: None,
                sections_seen,
            },
            Err(err) => ValidationAuditEventParams {
                outcome: ValidationOutcome::Invalid,
                error_kind: Some(err.kind()),
                section: err.section().map(str::to_string),
                key: err.key().map(str::to_string),
                sections_seen,
            },
        };
        Self::new(params)
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for validation runs.
pub trait ValidationAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &ValidationAuditEvent);
}

/// Audit sink that discards events.
pub struct NoopAuditSink;

impl ValidationAuditSink for NoopAuditSink {
    fn record(&self, _event: &ValidationAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl ValidationAuditSink for StderrAuditSink {
    fn record(&self, event: &ValidationAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl ValidationAuditSink for FileAuditSink {
    fn record(&self, event: &ValidationAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Audit sink that keeps events in memory.
#[derive(Default)]
pub struct MemoryAuditSink {
    /// Recorded events in order.
    events: Mutex<Vec<ValidationAuditEvent>>,
}

impl MemoryAuditSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<ValidationAuditEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl ValidationAuditSink for MemoryAuditSink {
    fn record(&self, event: &ValidationAuditEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
