// crates/confgate-logic/src/predicate.rs
// ============================================================================
// Module: Leaf Predicates
// Description: String equality, full-match patterns, numeric checks, custom predicates.
// Purpose: Provide the atomic tests that validator trees are built from.
// Dependencies: caseless, regex, crate::error
// ============================================================================

//! ## Overview
//! Leaf predicates test a single string value. They are stateless: every
//! per-pass counter lives in [`crate::PassState`] and belongs to `Count`
//! nodes only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use caseless::default_case_fold_str;
use regex::Regex;

use crate::error::BuildError;
use crate::error::BuildResult;
use crate::error::PredicateError;

// ============================================================================
// SECTION: Exact Match
// ============================================================================

/// Matches a fixed expected string, optionally ignoring case
///
/// # Invariants
/// - `folded` is the full Unicode case fold of `expected` when `ignore_case` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactMatch {
    /// Expected value as supplied by the caller.
    expected: String,
    /// Case-folded expected value used in case-insensitive mode.
    folded: Option<String>,
}

impl ExactMatch {
    /// Creates a case-sensitive exact matcher
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            folded: None,
        }
    }

    /// Creates a matcher that case-folds both sides before comparing
    ///
    /// Folding is full Unicode default case folding, so `"STRASSE"` matches
    /// `"straße"` and every sigma form compares equal.
    pub fn ignore_case(expected: impl Into<String>) -> Self {
        let expected = expected.into();
        let folded = Some(default_case_fold_str(&expected));
        Self {
            expected,
            folded,
        }
    }

    /// Returns the expected string
    #[must_use]
    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// Returns true when comparison ignores case
    #[must_use]
    pub const fn is_case_insensitive(&self) -> bool {
        self.folded.is_some()
    }

    /// Tests a value against the expected string
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        match &self.folded {
            Some(folded) => default_case_fold_str(value) == *folded,
            None => value == self.expected,
        }
    }
}

impl fmt::Display for ExactMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_case_insensitive() {
            write!(f, "exact_ignore_case(\"{}\")", self.expected)
        } else {
            write!(f, "exact(\"{}\")", self.expected)
        }
    }
}

// ============================================================================
// SECTION: Pattern Match
// ============================================================================

/// Matches values that satisfy a regular expression over their entire length
///
/// # Invariants
/// - `regex` is `source` wrapped in `\A(?:...)\z`, so substring hits never count.
#[derive(Debug, Clone)]
pub struct PatternMatch {
    /// Pattern as supplied by the caller.
    source: String,
    /// Anchored compiled pattern.
    regex: Regex,
}

impl PatternMatch {
    /// Compiles a full-match pattern
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidPattern`] when the pattern does not compile.
    pub fn new(pattern: impl Into<String>) -> BuildResult<Self> {
        let source = pattern.into();
        // The raw pattern must compile on its own; wrapping can rebalance stray parens.
        let compiled = Regex::new(&source).and_then(|_| Regex::new(&format!(r"\A(?:{source})\z")));
        match compiled {
            Ok(regex) => Ok(Self {
                source,
                regex,
            }),
            Err(err) => Err(BuildError::InvalidPattern {
                pattern: source,
                source: err,
            }),
        }
    }

    /// Returns the pattern as supplied by the caller
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.source
    }

    /// Returns true when the whole value matches
    #[must_use]
    pub fn is_full_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl PartialEq for PatternMatch {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for PatternMatch {}

impl fmt::Display for PatternMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pattern({})", self.source)
    }
}

// ============================================================================
// SECTION: Non-Negative Numbers
// ============================================================================

/// Returns true when `value` reads as an integer literal that is zero or greater
///
/// Accepts surrounding whitespace, an optional sign, and single underscores
/// between digits. Digits may come from any Unicode decimal digit block
/// (`"١٢"` reads as 12). Magnitude is unbounded; `-0` counts as zero.
#[must_use]
pub fn is_non_negative_integer(value: &str) -> bool {
    let trimmed = value.trim();
    let (negative, digits) = if let Some(rest) = trimmed.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = trimmed.strip_prefix('+') {
        (false, rest)
    } else {
        (false, trimmed)
    };

    if !is_digit_run(digits) {
        return false;
    }
    !negative || digits.chars().all(|c| c == '_' || decimal_digit_value(c) == Some(0))
}

/// Checks decimal digits with single underscores strictly between digits.
fn is_digit_run(digits: &str) -> bool {
    let mut previous_underscore = true;
    for c in digits.chars() {
        match c {
            '_' if !previous_underscore => previous_underscore = true,
            _ if decimal_digit_value(c).is_some() => previous_underscore = false,
            _ => return false,
        }
    }
    !digits.is_empty() && !previous_underscore
}

/// Zero code points of the Unicode `Nd` (decimal digit) blocks.
///
/// Every `Nd` character belongs to a run of ten consecutive code points
/// starting at one of these.
const DECIMAL_ZEROS: &[u32] = &[
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6,
    0x0C66, 0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0,
    0x1810, 0x1946, 0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620,
    0xA8D0, 0xA900, 0xA9D0, 0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x11066,
    0x110F0, 0x11136, 0x111D0, 0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730,
    0x118E0, 0x11950, 0x11C50, 0x11D50, 0x11DA0, 0x16A60, 0x16AC0, 0x16B50, 0x1D7CE,
    0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6, 0x1E140, 0x1E2F0, 0x1E950, 0x1FBF0,
];

/// Returns the value of a Unicode decimal digit, or `None` for other characters.
fn decimal_digit_value(c: char) -> Option<u32> {
    let code = u32::from(c);
    let index = DECIMAL_ZEROS.partition_point(|zero| *zero <= code).checked_sub(1)?;
    let zero = DECIMAL_ZEROS.get(index)?;
    let value = code - *zero;
    (value < 10).then_some(value)
}

// ============================================================================
// SECTION: Custom Predicates
// ============================================================================

/// Signature of a caller-supplied predicate function.
pub type PredicateFn = dyn Fn(&str) -> Result<bool, PredicateError> + Send + Sync;

/// Named predicate backed by a caller-supplied function
#[derive(Clone)]
pub struct CustomPredicate {
    /// Name used in diagnostics.
    name: Arc<str>,
    /// Predicate body.
    func: Arc<PredicateFn>,
}

impl CustomPredicate {
    /// Creates a predicate that may fail with a [`PredicateError`]
    pub fn new<F>(name: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(&str) -> Result<bool, PredicateError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Creates a predicate from an infallible boolean function
    pub fn from_bool<F>(name: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::new(name, move |value| Ok(func(value)))
    }

    /// Returns the diagnostic name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluates the predicate
    ///
    /// # Errors
    ///
    /// Propagates whatever the wrapped function reports.
    pub fn eval(&self, value: &str) -> Result<bool, PredicateError> {
        (self.func)(value)
    }
}

impl fmt::Debug for CustomPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomPredicate").field("name", &self.name).finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Count Checks
// ============================================================================

/// Signature of a count acceptance function.
pub type CountFn = dyn Fn(usize) -> bool + Send + Sync;

/// Acceptance test applied to a `Count` node's tally at teardown
#[derive(Clone)]
pub struct CountCheck {
    /// Human-readable description, e.g. `>= 2`.
    label: Arc<str>,
    /// Acceptance function.
    func: Arc<CountFn>,
}

impl CountCheck {
    /// Creates a check from an arbitrary function
    pub fn new<F>(label: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(usize) -> bool + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            func: Arc::new(func),
        }
    }

    /// Accepts tallies of at least `min`
    #[must_use]
    pub fn at_least(min: usize) -> Self {
        Self::new(format!(">= {min}"), move |count| count >= min)
    }

    /// Accepts tallies strictly greater than `min`
    #[must_use]
    pub fn more_than(min: usize) -> Self {
        Self::new(format!("> {min}"), move |count| count > min)
    }

    /// Accepts tallies of at most `max`
    #[must_use]
    pub fn at_most(max: usize) -> Self {
        Self::new(format!("<= {max}"), move |count| count <= max)
    }

    /// Accepts tallies exactly equal to `expected`
    #[must_use]
    pub fn exactly(expected: usize) -> Self {
        Self::new(format!("== {expected}"), move |count| count == expected)
    }

    /// Accepts tallies within `min..=max`
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidCountBounds`] when `min > max`.
    pub fn between(min: usize, max: usize) -> BuildResult<Self> {
        if min > max {
            return Err(BuildError::InvalidCountBounds {
                min,
                max,
            });
        }
        Ok(Self::new(format!("{min}..={max}"), move |count| (min ..= max).contains(&count)))
    }

    /// Returns the description
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Applies the check to a tally
    #[must_use]
    pub fn accepts(&self, count: usize) -> bool {
        (self.func)(count)
    }
}

impl fmt::Debug for CountCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountCheck").field("label", &self.label).finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
