// crates/confgate-logic/src/validator.rs
// ============================================================================
// Module: Validator Tree
// Description: Closed validator algebra with externalized per-pass state.
// Purpose: Define `Validator`, `PassState`, and the setup/call/teardown contract.
// Dependencies: smallvec, crate::{error, predicate}
// ============================================================================

//! ## Overview
//! A [`Validator`] is an immutable tree: leaves are predicates, internal nodes
//! are `Not`, `Or`, `And`, and `Count`. The only mutable data in a validation
//! pass is the tally of each `Count` node, which lives in a [`PassState`]
//! created by [`Validator::setup`]. Slots are laid out in pre-order, so one
//! state covers a whole tree and several passes can share one tree.
//!
//! A predicate that reports an error is treated as `false` at every
//! combinator boundary. Only the caller of the root [`Validator::call`] sees
//! the error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use smallvec::SmallVec;
use smallvec::smallvec;

use crate::error::BuildResult;
use crate::error::PredicateError;
use crate::predicate::CountCheck;
use crate::predicate::CustomPredicate;
use crate::predicate::ExactMatch;
use crate::predicate::PatternMatch;
use crate::predicate::is_non_negative_integer;

// ============================================================================
// SECTION: Pass State
// ============================================================================

/// Per-pass counters for the `Count` nodes of one validator tree
///
/// # Invariants
/// - Holds one slot per `Count` node, in pre-order.
/// - Only meaningful for the tree that created it via [`Validator::setup`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassState {
    /// Tallies, one per `Count` node.
    counts: SmallVec<[usize; 4]>,
}

impl PassState {
    /// Returns the tallies in pre-order
    #[must_use]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Returns the number of counter slots
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true when the tree has no `Count` nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

// ============================================================================
// SECTION: Validator Definition
// ============================================================================

/// Validator tree over string values
///
/// The leaf variants test a value directly. The combinators compose child
/// validators, owning them exclusively, so the tree has no sharing and no
/// cycles.
#[derive(Debug, Clone)]
pub enum Validator {
    /// Accepts every value
    Any,

    /// Accepts values equal to a fixed string
    Exact(ExactMatch),

    /// Accepts values that fully match a regular expression
    Pattern(PatternMatch),

    /// Accepts integer literals that are zero or greater
    NonNegative,

    /// Caller-supplied predicate
    Custom(CustomPredicate),

    /// Accepts when the child rejects (or errors); teardown is negated too
    Not(Box<Self>),

    /// Accepts when any child accepts; teardown holds when any child's holds
    Or(SmallVec<[Box<Self>; 4]>),

    /// Accepts when every child accepts; teardown holds when every child's holds
    And(SmallVec<[Box<Self>; 4]>),

    /// Tallies values the child accepts; teardown applies `check` to the tally
    Count {
        /// Validator whose acceptances are counted
        inner: Box<Self>,
        /// Acceptance test for the final tally
        check: CountCheck,
    },
}

// ============================================================================
// SECTION: Pass Protocol
// ============================================================================

impl Validator {
    /// Starts a validation pass, returning zeroed counters for this tree
    #[must_use]
    pub fn setup(&self) -> PassState {
        PassState {
            counts: smallvec![0; self.count_slots()],
        }
    }

    /// Zeroes an existing state in place, resizing it for this tree
    pub fn reset(&self, state: &mut PassState) {
        state.counts.clear();
        state.counts.resize(self.count_slots(), 0);
    }

    /// Tests a value, updating `Count` tallies in `state`
    ///
    /// # Errors
    ///
    /// Returns the error of a root-level predicate. Errors from children of a
    /// combinator are reported as `false` instead. Returns
    /// [`PredicateError::StateMismatch`] when `state` has too few slots.
    pub fn call(&self, state: &mut PassState, value: &str) -> Result<bool, PredicateError> {
        let needed = self.count_slots();
        let available = state.counts.len();
        match state.counts.get_mut(.. needed) {
            Some(slots) => self.call_slots(slots, value),
            None => Err(PredicateError::StateMismatch {
                needed,
                available,
            }),
        }
    }

    /// Finishes a pass, returning whether the accumulated tallies are acceptable
    ///
    /// Stateless validators always finish satisfied. A state with too few
    /// slots never satisfies.
    #[must_use]
    pub fn teardown(&self, state: &PassState) -> bool {
        state.counts.get(.. self.count_slots()).is_some_and(|slots| self.teardown_slots(slots))
    }

    /// Tests a value with a throwaway state, mapping errors to `false`
    ///
    /// Convenient for stateless trees; `Count` tallies are discarded.
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        let mut state = self.setup();
        safe_call(self.call(&mut state, value))
    }

    /// Evaluates against the slots owned by this subtree.
    fn call_slots(&self, slots: &mut [usize], value: &str) -> Result<bool, PredicateError> {
        match self {
            Self::Any => Ok(true),
            Self::Exact(exact) => Ok(exact.matches(value)),
            Self::Pattern(pattern) => Ok(pattern.is_full_match(value)),
            Self::NonNegative => Ok(is_non_negative_integer(value)),
            Self::Custom(custom) => custom.eval(value),
            Self::Not(inner) => Ok(!safe_call(inner.call_slots(slots, value))),

            // Short-circuits: children after the first acceptance are not called or tallied.
            Self::Or(children) => {
                let mut rest = slots;
                for child in children {
                    let (own, tail) = split_slots(std::mem::take(&mut rest), child.count_slots())?;
                    if safe_call(child.call_slots(own, value)) {
                        return Ok(true);
                    }
                    rest = tail;
                }
                Ok(false)
            }

            Self::And(children) => {
                let mut rest = slots;
                for child in children {
                    let (own, tail) = split_slots(std::mem::take(&mut rest), child.count_slots())?;
                    if !safe_call(child.call_slots(own, value)) {
                        return Ok(false);
                    }
                    rest = tail;
                }
                Ok(true)
            }

            Self::Count {
                inner, ..
            } => {
                let Some((tally, rest)) = slots.split_first_mut() else {
                    return Err(PredicateError::StateMismatch {
                        needed: 1,
                        available: 0,
                    });
                };
                if safe_call(inner.call_slots(rest, value)) {
                    *tally = tally.saturating_add(1);
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
        }
    }

    /// Finishes the pass against the slots owned by this subtree.
    fn teardown_slots(&self, slots: &[usize]) -> bool {
        match self {
            Self::Any | Self::Exact(_) | Self::Pattern(_) | Self::NonNegative | Self::Custom(_) => {
                true
            }
            Self::Not(inner) => !inner.teardown_slots(slots),
            Self::Or(children) => {
                child_slot_ranges(children, slots).any(|(child, own)| child.teardown_slots(own))
            }
            Self::And(children) => {
                child_slot_ranges(children, slots).all(|(child, own)| child.teardown_slots(own))
            }
            Self::Count {
                check, ..
            } => slots.first().is_some_and(|tally| check.accepts(*tally)),
        }
    }
}

/// Maps a predicate error to `false`.
#[must_use]
pub fn safe_call(result: Result<bool, PredicateError>) -> bool {
    result.unwrap_or(false)
}

/// Splits off the first `len` slots for one child.
fn split_slots(slots: &mut [usize], len: usize) -> Result<(&mut [usize], &mut [usize]), PredicateError> {
    let available = slots.len();
    slots.split_at_mut_checked(len).ok_or(PredicateError::StateMismatch {
        needed: len,
        available,
    })
}

/// Pairs each child with its slot range; stops early if slots run out.
fn child_slot_ranges<'a>(
    children: &'a [Box<Validator>],
    slots: &'a [usize],
) -> impl Iterator<Item = (&'a Validator, &'a [usize])> {
    let mut rest = slots;
    children.iter().map_while(move |child| {
        let (own, tail) = rest.split_at_checked(child.count_slots())?;
        rest = tail;
        Some((child.as_ref(), own))
    })
}

// ============================================================================
// SECTION: Constructors
// ============================================================================

impl Validator {
    /// Creates a validator that accepts everything
    #[must_use]
    pub const fn any() -> Self {
        Self::Any
    }

    /// Creates a case-sensitive exact-match validator
    pub fn exact(expected: impl Into<String>) -> Self {
        Self::Exact(ExactMatch::new(expected))
    }

    /// Creates a case-insensitive exact-match validator
    pub fn exact_ignore_case(expected: impl Into<String>) -> Self {
        Self::Exact(ExactMatch::ignore_case(expected))
    }

    /// Creates a full-match regular expression validator
    ///
    /// # Errors
    ///
    /// Returns [`crate::BuildError::InvalidPattern`] when the pattern does not compile.
    pub fn pattern(pattern: impl Into<String>) -> BuildResult<Self> {
        PatternMatch::new(pattern).map(Self::Pattern)
    }

    /// Creates a non-negative integer validator
    #[must_use]
    pub const fn non_negative() -> Self {
        Self::NonNegative
    }

    /// Creates a validator from a fallible predicate function
    pub fn custom<F>(name: &str, func: F) -> Self
    where
        F: Fn(&str) -> Result<bool, PredicateError> + Send + Sync + 'static,
    {
        Self::Custom(CustomPredicate::new(name, func))
    }

    /// Creates a validator from a boolean predicate function
    pub fn custom_bool<F>(name: &str, func: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::Custom(CustomPredicate::from_bool(name, func))
    }

    /// Creates a logical NOT of the given validator
    #[must_use]
    pub fn negate(validator: Self) -> Self {
        Self::Not(Box::new(validator))
    }

    /// Creates a logical OR of the given validators
    #[must_use]
    pub fn any_of(validators: Vec<Self>) -> Self {
        Self::Or(validators.into_iter().map(Box::new).collect())
    }

    /// Creates a logical AND of the given validators
    #[must_use]
    pub fn all_of(validators: Vec<Self>) -> Self {
        Self::And(validators.into_iter().map(Box::new).collect())
    }

    /// Wraps a validator in a counting node
    #[must_use]
    pub fn count(validator: Self, check: CountCheck) -> Self {
        Self::Count {
            inner: Box::new(validator),
            check,
        }
    }

    /// Wraps a validator in a counting node with an ad-hoc check function
    pub fn count_with<F>(validator: Self, label: &str, check: F) -> Self
    where
        F: Fn(usize) -> bool + Send + Sync + 'static,
    {
        Self::count(validator, CountCheck::new(label, check))
    }
}

// ============================================================================
// SECTION: Introspection
// ============================================================================

impl Validator {
    /// Returns the number of `Count` nodes in this tree
    #[must_use]
    pub fn count_slots(&self) -> usize {
        match self {
            Self::Any | Self::Exact(_) | Self::Pattern(_) | Self::NonNegative | Self::Custom(_) => 0,
            Self::Not(inner) => inner.count_slots(),
            Self::Or(children) | Self::And(children) => {
                children.iter().map(|child| child.count_slots()).sum()
            }
            Self::Count {
                inner, ..
            } => 1 + inner.count_slots(),
        }
    }

    /// Returns true when a pass carries state through this tree
    #[must_use]
    pub fn is_stateful(&self) -> bool {
        self.count_slots() > 0
    }

    /// Returns the number of nodes in this tree
    #[must_use]
    pub fn complexity(&self) -> usize {
        match self {
            Self::Any | Self::Exact(_) | Self::Pattern(_) | Self::NonNegative | Self::Custom(_) => 1,
            Self::Not(inner)
            | Self::Count {
                inner, ..
            } => 1 + inner.complexity(),
            Self::Or(children) | Self::And(children) => {
                1 + children.iter().map(|child| child.complexity()).sum::<usize>()
            }
        }
    }
}

// ============================================================================
// SECTION: Trait Implementations
// ============================================================================

impl Default for Validator {
    /// Accepts everything
    fn default() -> Self {
        Self::Any
    }
}

impl std::ops::Not for Validator {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::negate(self)
    }
}

impl From<&str> for Validator {
    fn from(expected: &str) -> Self {
        Self::exact(expected)
    }
}

impl From<String> for Validator {
    fn from(expected: String) -> Self {
        Self::exact(expected)
    }
}

impl From<&String> for Validator {
    fn from(expected: &String) -> Self {
        Self::exact(expected.as_str())
    }
}

impl From<ExactMatch> for Validator {
    fn from(exact: ExactMatch) -> Self {
        Self::Exact(exact)
    }
}

impl From<PatternMatch> for Validator {
    fn from(pattern: PatternMatch) -> Self {
        Self::Pattern(pattern)
    }
}

impl From<CustomPredicate> for Validator {
    fn from(custom: CustomPredicate) -> Self {
        Self::Custom(custom)
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Exact(exact) => fmt::Display::fmt(exact, f),
            Self::Pattern(pattern) => fmt::Display::fmt(pattern, f),
            Self::NonNegative => f.write_str("non_negative_number"),
            Self::Custom(custom) => f.write_str(custom.name()),
            Self::Not(inner) => write!(f, "not({inner})"),
            Self::Or(children) => write_list(f, "any_of", children),
            Self::And(children) => write_list(f, "all_of", children),
            Self::Count {
                inner,
                check,
            } => write!(f, "count({inner}, {})", check.label()),
        }
    }
}

/// Writes `name[a, b, ...]`.
fn write_list(f: &mut fmt::Formatter<'_>, name: &str, children: &[Box<Validator>]) -> fmt::Result {
    write!(f, "{name}[")?;
    for (idx, child) in children.iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{child}")?;
    }
    f.write_str("]")
}
