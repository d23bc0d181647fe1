// crates/confgate-logic/tests/combinators.rs
// ============================================================================
// Module: Combinator Tests
// Description: Tests for NOT, OR, AND, and COUNT validators.
// Purpose: Pin error-as-false handling, teardown composition, and per-pass counting.
// ============================================================================
//! ## Overview
//! Integration tests for combinator validators and the pass protocol.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only assertions and helpers are permitted."
)]

#[macro_use]
mod support;

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use confgate_logic::CountCheck;
use confgate_logic::PredicateError;
use confgate_logic::Validator;
use support::TestResult;

/// Validator that always reports an error.
fn erroring() -> Validator {
    Validator::custom("erroring", |_| Err(PredicateError::failed("boom")))
}

// ============================================================================
// SECTION: NOT
// ============================================================================

#[test]
fn test_not_inverts_child() -> TestResult {
    let not = Validator::negate(Validator::exact("wrong"));
    check!(not.accepts("not wrong"));
    check!(not.accepts("ok"));
    check!(!not.accepts("wrong"));
    Ok(())
}

#[test]
fn test_not_of_erroring_child_accepts() -> TestResult {
    let not = !erroring();
    let mut state = not.setup();
    check!(not.call(&mut state, "anything")?);
    Ok(())
}

#[test]
fn test_not_negates_teardown() -> TestResult {
    // A stateless child always finishes satisfied, so its negation never does.
    let not = Validator::negate(Validator::exact("x"));
    check!(!not.teardown(&not.setup()));

    let not_count = Validator::negate(Validator::count(Validator::any(), CountCheck::at_least(1)));
    let state = not_count.setup();
    check!(not_count.teardown(&state));
    Ok(())
}

// ============================================================================
// SECTION: OR / AND
// ============================================================================

#[test]
fn test_or_accepts_any_alternative() -> TestResult {
    let or = Validator::any_of(vec!["ok".into(), "fail".into()]);
    check!(or.accepts("ok"));
    check!(or.accepts("fail"));
    check!(!or.accepts("error"));
    Ok(())
}

#[test]
fn test_or_survives_erroring_child() -> TestResult {
    let or = Validator::any_of(vec![erroring(), Validator::exact("ok")]);
    let mut state = or.setup();
    check!(or.call(&mut state, "ok")?);
    check!(!or.call(&mut state, "nope")?);
    Ok(())
}

#[test]
fn test_and_requires_every_child() -> TestResult {
    let and = Validator::all_of(vec![Validator::pattern(".*a.*")?, Validator::pattern(".*b.*")?]);
    check!(and.accepts("xxabyy"));
    check!(and.accepts("bxxayy"));
    check!(!and.accepts("xxayy"));
    check!(!and.accepts("xxbyy"));
    Ok(())
}

#[test]
fn test_and_treats_error_as_false() -> TestResult {
    let and = Validator::all_of(vec![Validator::any(), erroring()]);
    let mut state = and.setup();
    check!(!and.call(&mut state, "x")?);
    Ok(())
}

#[test]
fn test_empty_combinators() -> TestResult {
    check!(!Validator::any_of(Vec::new()).accepts("x"));
    check!(Validator::all_of(Vec::new()).accepts("x"));
    Ok(())
}

#[test]
fn test_or_stops_at_first_acceptance() -> TestResult {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let or = Validator::any_of(vec![
        Validator::any(),
        Validator::custom_bool("spy", move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
            true
        }),
    ]);
    check!(or.accepts("x"));
    check_eq!(calls.load(Ordering::SeqCst), 0);
    Ok(())
}

// ============================================================================
// SECTION: COUNT
// ============================================================================

#[test]
fn test_count_tallies_per_pass() -> TestResult {
    let count = Validator::count_with(Validator::exact("ok"), "> 1", |n| n > 1);

    let mut state = count.setup();
    check!(count.call(&mut state, "ok")?);
    check!(!count.call(&mut state, "fail")?);
    check!(!count.teardown(&state));

    let mut state = count.setup();
    count.call(&mut state, "ok")?;
    count.call(&mut state, "fail")?;
    count.call(&mut state, "ok")?;
    check!(count.teardown(&state));
    check_eq!(state.counts(), [2_usize].as_slice());
    Ok(())
}

#[test]
fn test_reset_reuses_state() -> TestResult {
    let count = Validator::count(Validator::any(), CountCheck::exactly(1));
    let mut state = count.setup();
    count.call(&mut state, "a")?;
    count.call(&mut state, "b")?;
    check!(!count.teardown(&state));
    count.reset(&mut state);
    count.call(&mut state, "a")?;
    check!(count.teardown(&state));
    Ok(())
}

#[test]
fn test_nested_counts_bound_both_sides() -> TestResult {
    let both = Validator::all_of(vec![
        Validator::count(Validator::exact("ok"), CountCheck::more_than(1)),
        Validator::count(Validator::exact("ok"), CountCheck::at_most(2)),
    ]);
    check_eq!(both.count_slots(), 2);

    for (calls, expected) in [(1, false), (2, true), (3, false)] {
        let mut state = both.setup();
        for _ in 0 .. calls {
            both.call(&mut state, "ok")?;
        }
        check!(both.teardown(&state) == expected, "{calls} calls should finish {expected}");
    }
    Ok(())
}

#[test]
fn test_independent_passes_share_one_tree() -> TestResult {
    let count = Validator::count(Validator::any(), CountCheck::at_least(2));
    let mut first = count.setup();
    let mut second = count.setup();
    count.call(&mut first, "a")?;
    count.call(&mut first, "b")?;
    count.call(&mut second, "a")?;
    check!(count.teardown(&first));
    check!(!count.teardown(&second));
    Ok(())
}

#[test]
fn test_count_inside_or_is_only_tallied_when_reached() -> TestResult {
    let or = Validator::any_of(vec![
        Validator::exact("a"),
        Validator::count(Validator::any(), CountCheck::at_least(1)),
    ]);
    let mut state = or.setup();
    or.call(&mut state, "a")?;
    check_eq!(state.counts(), [0_usize].as_slice());
    or.call(&mut state, "b")?;
    check_eq!(state.counts(), [1_usize].as_slice());
    Ok(())
}

#[test]
fn test_invalid_count_bounds() -> TestResult {
    check!(CountCheck::between(3, 1).is_err());
    let between = CountCheck::between(1, 3)?;
    check!(between.accepts(2));
    check!(!between.accepts(4));
    check_eq!(between.label(), "1..=3");
    Ok(())
}

#[test]
fn test_composite_descriptions() -> TestResult {
    let v = Validator::any_of(vec![
        Validator::negate("a".into()),
        Validator::count(Validator::pattern(r"\d+")?, CountCheck::at_least(2)),
    ]);
    check_eq!(v.to_string(), r#"any_of[not(exact("a")), count(pattern(\d+), >= 2)]"#);
    check_eq!(v.complexity(), 5);
    check!(v.is_stateful());
    Ok(())
}
