// crates/confgate-core/src/error.rs
// ============================================================================
// Module: Validation Errors
// Description: Failure taxonomy for document validation.
// Purpose: Report the first violation found, with the names involved.
// Dependencies: confgate-logic, serde, thiserror
// ============================================================================

//! ## Overview
//! A validation run stops at the first violation and returns one
//! [`ValidationError`]. Each variant carries the section, key, and offending
//! value needed to locate the problem. [`ValidationError::kind`] gives a
//! stable snake_case label for logs and audit events.

use std::fmt;

use confgate_logic::PredicateError;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Limit Kinds
// ============================================================================

/// Size limit that a document exceeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitKind {
    /// Number of sections in the document.
    Sections,
    /// Number of values in one section.
    ValuesPerSection,
    /// Byte length of a section name or value key.
    NameBytes,
}

impl LimitKind {
    /// Returns the snake_case label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sections => "sections",
            Self::ValuesPerSection => "values_per_section",
            Self::NameBytes => "name_bytes",
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Validation Errors
// ============================================================================

/// Document validation failures
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required section entry matched nothing, or a section key validator
    /// rejected its tally
    #[error("Other sections expected")]
    MissingRequiredSections,

    /// Sections no entry claimed while unknown sections are rejected
    #[error("Unexpected sections with names: \"{}\"", .names.join(", "))]
    UnexpectedSections {
        /// Unclaimed section names in document order
        names: Vec<String>,
    },

    /// A required value entry matched nothing, or a key validator rejected
    /// its tally
    #[error("Other values expected in section \"{section}\"")]
    MissingRequiredValues {
        /// Section being validated
        section: String,
    },

    /// Keys no entry claimed while unknown keys are rejected
    #[error("Unexpected values: \"{}\" in section \"{section}\"", .names.join(", "))]
    UnexpectedValues {
        /// Section being validated
        section: String,
        /// Unclaimed keys in document order
        names: Vec<String>,
    },

    /// A value validator rejected, or could not evaluate, a raw value
    #[error("Wrong value in section \"{section}\", key \"{key}\": \"{value}\" ({validator})")]
    ValueValidationFailed {
        /// Section holding the value
        section: String,
        /// Key holding the value
        key: String,
        /// Raw value as found in the document
        value: String,
        /// Description of the rejecting validator
        validator: String,
        /// Predicate error when the validator could not answer
        #[source]
        source: Option<PredicateError>,
    },

    /// The document exceeds a configured size limit
    #[error("{limit} limit exceeded: {actual} > {max}")]
    LimitExceeded {
        /// Limit that was exceeded
        limit: LimitKind,
        /// Section involved, when the limit is per section
        section: Option<String>,
        /// Configured maximum
        max: usize,
        /// Observed size
        actual: usize,
    },
}

impl ValidationError {
    /// Returns a stable snake_case label for the failure
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingRequiredSections => "missing_required_sections",
            Self::UnexpectedSections {
                ..
            } => "unexpected_sections",
            Self::MissingRequiredValues {
                ..
            } => "missing_required_values",
            Self::UnexpectedValues {
                ..
            } => "unexpected_values",
            Self::ValueValidationFailed {
                ..
            } => "value_validation_failed",
            Self::LimitExceeded {
                ..
            } => "limit_exceeded",
        }
    }

    /// Returns the section the failure concerns, if it concerns one
    #[must_use]
    pub fn section(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredValues {
                section,
            }
            | Self::UnexpectedValues {
                section,
                ..
            }
            | Self::ValueValidationFailed {
                section,
                ..
            } => Some(section),
            Self::LimitExceeded {
                section,
                ..
            } => section.as_deref(),
            Self::MissingRequiredSections
            | Self::UnexpectedSections {
                ..
            } => None,
        }
    }

    /// Returns the value key the failure concerns, if any
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::ValueValidationFailed {
                key,
                ..
            } => Some(key),
            _ => None,
        }
    }
}
