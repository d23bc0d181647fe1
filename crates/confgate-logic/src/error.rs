// crates/confgate-logic/src/error.rs
// ============================================================================
// Module: Validator Error Definitions
// Description: Predicate failures and construction-time errors.
// Purpose: Separate "a predicate could not answer" from "the validator tree is malformed".
// Dependencies: regex, thiserror
// ============================================================================

//! ## Overview
//! Two error families live here. [`PredicateError`] is what a predicate
//! returns when it cannot answer for a value; combinators downgrade it to
//! `false`. [`BuildError`] is raised while constructing validators and never
//! reaches a validation pass.

use thiserror::Error;

// ============================================================================
// SECTION: Predicate Errors
// ============================================================================

/// Errors a predicate may report while testing a value
///
/// # Invariants
/// - Never escapes a combinator: `Not`, `Or`, `And`, and `Count` map it to `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredicateError {
    /// A predicate failed to evaluate the value
    #[error("predicate failed: {0}")]
    Failed(String),

    /// The pass state handed to a validator was created for a different tree
    #[error("pass state has {available} counter slots, validator needs {needed}")]
    StateMismatch {
        /// Slots required by the validator
        needed: usize,
        /// Slots present in the supplied state
        available: usize,
    },
}

impl PredicateError {
    /// Creates a predicate failure with a custom message
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

// ============================================================================
// SECTION: Construction Errors
// ============================================================================

/// Errors raised while building validators
///
/// These are programmer errors in schema construction and surface before any
/// document is validated.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The regular expression did not compile
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// Pattern as supplied by the caller
        pattern: String,
        /// Underlying compile error
        source: regex::Error,
    },

    /// Count bounds are inverted
    #[error("invalid count bounds: min {min} exceeds max {max}")]
    InvalidCountBounds {
        /// Lower bound
        min: usize,
        /// Upper bound
        max: usize,
    },
}

/// Convenient Result type for validator construction
pub type BuildResult<T> = Result<T, BuildError>;
