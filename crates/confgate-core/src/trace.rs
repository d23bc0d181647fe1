// crates/confgate-core/src/trace.rs
// ============================================================================
// Module: Validation Trace
// Description: Observer hooks for the matching engine.
// Purpose: Expose entry matches and verdicts without affecting results.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The engine reports what it does to a [`ValidationTrace`]: which entry
//! claimed each name, which names went unclaimed, each leaf value verdict,
//! and whether each node's requirements held. Every hook defaults to a no-op,
//! so an observer only implements what it needs. Tracing never changes the
//! outcome of a run.

use serde::Serialize;

// ============================================================================
// SECTION: Trace Types
// ============================================================================

/// Level of the document a hook refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope<'a> {
    /// The list of sections.
    Config,
    /// The values of the named section.
    Section(&'a str),
}

impl<'a> Scope<'a> {
    /// Returns the section name for section scopes
    #[must_use]
    pub const fn section(self) -> Option<&'a str> {
        match self {
            Self::Config => None,
            Self::Section(name) => Some(name),
        }
    }
}

/// Schema entry that claimed a name, by list and position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Index into the required entries.
    Required(usize),
    /// Index into the optional entries.
    Optional(usize),
}

// ============================================================================
// SECTION: Trace Hook
// ============================================================================

/// Observer for validation runs
pub trait ValidationTrace {
    /// A schema entry claimed `name`
    fn on_entry_matched(&mut self, _scope: Scope<'_>, _name: &str, _entry: EntryKind) {}

    /// No schema entry claimed `name`
    fn on_unexpected(&mut self, _scope: Scope<'_>, _name: &str) {}

    /// A value validator returned its verdict for `section`/`key`
    fn on_value_checked(&mut self, _section: &str, _key: &str, _accepted: bool) {}

    /// All names at `scope` were processed; `satisfied` covers required
    /// coverage and key validator teardowns
    fn on_node_finished(&mut self, _scope: Scope<'_>, _satisfied: bool) {}
}

/// No-op trace implementation
pub struct NoopTrace;

impl ValidationTrace for NoopTrace {}

// ============================================================================
// SECTION: Recording Trace
// ============================================================================

/// Owned record of one trace hook invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    /// See [`ValidationTrace::on_entry_matched`].
    EntryMatched {
        /// Section for value-level events.
        section: Option<String>,
        /// Claimed name.
        name: String,
        /// Claiming entry.
        entry: EntryKind,
    },
    /// See [`ValidationTrace::on_unexpected`].
    Unexpected {
        /// Section for value-level events.
        section: Option<String>,
        /// Unclaimed name.
        name: String,
    },
    /// See [`ValidationTrace::on_value_checked`].
    ValueChecked {
        /// Section holding the value.
        section: String,
        /// Key holding the value.
        key: String,
        /// Verdict.
        accepted: bool,
    },
    /// See [`ValidationTrace::on_node_finished`].
    NodeFinished {
        /// Section for value-level events.
        section: Option<String>,
        /// Whether the node's requirements held.
        satisfied: bool,
    },
}

/// Trace that keeps every event in order
#[derive(Debug, Clone, Default)]
pub struct RecordingTrace {
    /// Events in emission order.
    events: Vec<TraceEvent>,
}

impl RecordingTrace {
    /// Creates an empty recorder
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    /// Returns the recorded events
    #[must_use]
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Consumes the recorder and returns its events
    #[must_use]
    pub fn into_events(self) -> Vec<TraceEvent> {
        self.events
    }
}

impl ValidationTrace for RecordingTrace {
    fn on_entry_matched(&mut self, scope: Scope<'_>, name: &str, entry: EntryKind) {
        self.events.push(TraceEvent::EntryMatched {
            section: scope.section().map(str::to_string),
            name: name.to_string(),
            entry,
        });
    }

    fn on_unexpected(&mut self, scope: Scope<'_>, name: &str) {
        self.events.push(TraceEvent::Unexpected {
            section: scope.section().map(str::to_string),
            name: name.to_string(),
        });
    }

    fn on_value_checked(&mut self, section: &str, key: &str, accepted: bool) {
        self.events.push(TraceEvent::ValueChecked {
            section: section.to_string(),
            key: key.to_string(),
            accepted,
        });
    }

    fn on_node_finished(&mut self, scope: Scope<'_>, satisfied: bool) {
        self.events.push(TraceEvent::NodeFinished {
            section: scope.section().map(str::to_string),
            satisfied,
        });
    }
}
