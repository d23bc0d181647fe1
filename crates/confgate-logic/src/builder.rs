// crates/confgate-logic/src/builder.rs
// ============================================================================
// Module: Validator Builders
// Description: Fluent builders over the validator tree.
// Purpose: Provide chained APIs for composing combinator validators.
// Dependencies: crate::{predicate, validator}
// ============================================================================

//! ## Overview
//! Fluent builders simplify composing validator trees by enabling chained calls
//! for `any_of`, `all_of`, negation, and counting while keeping the same
//! invariants as [`Validator`] itself.

use std::ops::Not;

use crate::predicate::CountCheck;
use crate::validator::Validator;

// ============================================================================
// SECTION: Fluent Builder API
// ============================================================================

/// Fluent builder wrapping a validator under construction
pub struct ValidatorBuilder {
    /// Root validator under construction.
    validator: Validator,
}

impl ValidatorBuilder {
    /// Creates a new builder rooted at the given validator
    pub fn new(validator: impl Into<Validator>) -> Self {
        Self {
            validator: validator.into(),
        }
    }

    /// Starts an OR clause
    #[must_use]
    pub const fn any_of() -> AnyOfBuilder {
        AnyOfBuilder::new()
    }

    /// Starts an AND clause
    #[must_use]
    pub const fn all_of() -> AllOfBuilder {
        AllOfBuilder::new()
    }

    /// Combines the current validator with another using AND
    #[must_use]
    pub fn and_also(self, other: impl Into<Validator>) -> Self {
        Self::new(Validator::all_of(vec![self.validator, other.into()]))
    }

    /// Combines the current validator with another using OR
    #[must_use]
    pub fn or_else(self, other: impl Into<Validator>) -> Self {
        Self::new(Validator::any_of(vec![self.validator, other.into()]))
    }

    /// Wraps the current validator in a counting node
    #[must_use]
    pub fn counted(self, check: CountCheck) -> Self {
        Self::new(Validator::count(self.validator, check))
    }

    /// Builds the final validator
    #[must_use]
    pub fn build(self) -> Validator {
        self.validator
    }
}

impl Not for ValidatorBuilder {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::new(Validator::negate(self.validator))
    }
}

// ============================================================================
// SECTION: Any-Of Builder
// ============================================================================

/// Builder for OR validators
#[derive(Default)]
pub struct AnyOfBuilder {
    /// Alternatives collected so far.
    validators: Vec<Validator>,
}

impl AnyOfBuilder {
    /// Creates an empty OR builder
    #[must_use]
    pub const fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Adds an alternative
    #[must_use]
    pub fn with(mut self, validator: impl Into<Validator>) -> Self {
        self.validators.push(validator.into());
        self
    }

    /// Adds several alternatives
    #[must_use]
    pub fn with_all<I>(mut self, validators: I) -> Self
    where
        I: IntoIterator<Item = Validator>,
    {
        self.validators.extend(validators);
        self
    }

    /// Builds the OR validator; an empty OR accepts nothing
    #[must_use]
    pub fn build(self) -> Validator {
        Validator::any_of(self.validators)
    }
}

// ============================================================================
// SECTION: All-Of Builder
// ============================================================================

/// Builder for AND validators
#[derive(Default)]
pub struct AllOfBuilder {
    /// Conjuncts collected so far.
    validators: Vec<Validator>,
}

impl AllOfBuilder {
    /// Creates an empty AND builder
    #[must_use]
    pub const fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Adds a conjunct
    #[must_use]
    pub fn with(mut self, validator: impl Into<Validator>) -> Self {
        self.validators.push(validator.into());
        self
    }

    /// Adds several conjuncts
    #[must_use]
    pub fn with_all<I>(mut self, validators: I) -> Self
    where
        I: IntoIterator<Item = Validator>,
    {
        self.validators.extend(validators);
        self
    }

    /// Builds the AND validator; an empty AND accepts everything
    #[must_use]
    pub fn build(self) -> Validator {
        Validator::all_of(self.validators)
    }
}

// ============================================================================
// SECTION: Convenience Facades
// ============================================================================

/// Convenience functions for creating validators without builders
pub mod convenience {
    use super::CountCheck;
    use super::Validator;
    use crate::error::BuildResult;

    /// Accepts every value
    #[must_use]
    pub const fn any() -> Validator {
        Validator::Any
    }

    /// Matches a fixed string
    pub fn exact(expected: impl Into<String>) -> Validator {
        Validator::exact(expected)
    }

    /// Matches a fixed string ignoring case
    pub fn exact_ignore_case(expected: impl Into<String>) -> Validator {
        Validator::exact_ignore_case(expected)
    }

    /// Fully matches a regular expression
    ///
    /// # Errors
    ///
    /// Returns [`crate::BuildError::InvalidPattern`] for patterns that do not compile.
    pub fn pattern(pattern: impl Into<String>) -> BuildResult<Validator> {
        Validator::pattern(pattern)
    }

    /// Accepts non-negative integer literals
    #[must_use]
    pub const fn non_negative() -> Validator {
        Validator::NonNegative
    }

    /// Inverts a validator
    #[must_use]
    pub fn not(validator: Validator) -> Validator {
        Validator::negate(validator)
    }

    /// Accepts when any validator accepts
    #[must_use]
    pub fn any_of(validators: Vec<Validator>) -> Validator {
        Validator::any_of(validators)
    }

    /// Accepts when all validators accept
    #[must_use]
    pub fn all_of(validators: Vec<Validator>) -> Validator {
        Validator::all_of(validators)
    }

    /// Requires the validator to accept at least `min` values per pass
    #[must_use]
    pub fn at_least(min: usize, validator: Validator) -> Validator {
        Validator::count(validator, CountCheck::at_least(min))
    }

    /// Requires the validator to accept at most `max` values per pass
    #[must_use]
    pub fn at_most(max: usize, validator: Validator) -> Validator {
        Validator::count(validator, CountCheck::at_most(max))
    }
}
