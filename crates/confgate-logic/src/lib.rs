// crates/confgate-logic/src/lib.rs
// ============================================================================
// Module: Validator Logic Root
// Description: Public API surface for the validator algebra.
// Purpose: Wire together predicates, combinators, builders, and the DSL macro.
// Dependencies: crate::{builder, error, predicate, validator}
// ============================================================================

//! ## Overview
//! `confgate-logic` provides string validators that compose: leaf predicates
//! (exact match, full-match regex, non-negative integers, custom functions)
//! and the `Not`/`Or`/`And`/`Count` combinators. A validation pass is bracketed
//! by [`Validator::setup`] and [`Validator::teardown`]; the per-pass counters
//! live in a separate [`PassState`], so a validator tree is never mutated.

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod builder;
pub mod error;
pub mod predicate;
pub mod validator;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use builder::AllOfBuilder;
pub use builder::AnyOfBuilder;
pub use builder::ValidatorBuilder;
pub use builder::convenience;
pub use error::BuildError;
pub use error::BuildResult;
pub use error::PredicateError;
pub use predicate::CountCheck;
pub use predicate::CustomPredicate;
pub use predicate::ExactMatch;
pub use predicate::PatternMatch;
pub use predicate::is_non_negative_integer;
pub use validator::PassState;
pub use validator::Validator;
pub use validator::safe_call;

// ============================================================================
// SECTION: Validator Macro
// ============================================================================

/// Macro for ergonomic validator construction
///
/// Leaves are any expression convertible into a [`Validator`]; nested
/// validators are wrapped in braces:
///
/// ```
/// use confgate_logic::CountCheck;
/// use confgate_logic::Validator;
/// use confgate_logic::validator;
///
/// let v = validator!(all_of [
///     { count { pred(Validator::non_negative()) }, CountCheck::at_most(3) },
///     { not { pred("0") } },
///     { any_of [ { pred("1") }, { pred("2") } ] },
/// ]);
/// assert!(v.accepts("2"));
/// assert!(!v.accepts("0"));
/// ```
#[macro_export]
macro_rules! validator {
    // Leaf: anything convertible into a validator
    (pred($leaf:expr)) => {
        $crate::Validator::from($leaf)
    };

    // Not case
    (not { $($inner:tt)+ }) => {
        $crate::Validator::negate($crate::validator!($($inner)+))
    };

    // Or case
    (any_of [ $({ $($child:tt)+ }),* $(,)? ]) => {
        $crate::Validator::any_of(vec![$($crate::validator!($($child)+)),*])
    };

    // And case
    (all_of [ $({ $($child:tt)+ }),* $(,)? ]) => {
        $crate::Validator::all_of(vec![$($crate::validator!($($child)+)),*])
    };

    // Count case
    (count { $($inner:tt)+ }, $check:expr) => {
        $crate::Validator::count($crate::validator!($($inner)+), $check)
    };
}
