// crates/confgate-logic/tests/proptest_validators.rs
// ============================================================================
// Module: Validator Property-Based Tests
// Description: Property tests for predicate and combinator invariants.
// Purpose: Check algebraic laws across wide input ranges.
// ============================================================================

//! Property-based tests for validator invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use confgate_logic::CountCheck;
use confgate_logic::Validator;
use confgate_logic::is_non_negative_integer;
use proptest::prelude::*;

proptest! {
    #[test]
    fn any_accepts_all_strings(s in ".*") {
        prop_assert!(Validator::any().accepts(&s));
    }

    #[test]
    fn exact_matches_equality(s in "[a-cA-C]{0,3}", e in "[a-cA-C]{0,3}") {
        prop_assert_eq!(Validator::exact(e.as_str()).accepts(&s), s == e);
        prop_assert_eq!(
            Validator::exact_ignore_case(e.as_str()).accepts(&s),
            s.to_lowercase() == e.to_lowercase()
        );
    }

    #[test]
    fn ignore_case_equates_folded_spellings(
        parts in prop::collection::vec(
            prop_oneof![
                Just(("ß", "SS")),
                Just(("ς", "Σ")),
                Just(("σ", "Σ")),
                Just(("a", "A")),
                Just(("ǆ", "Ǆ")),
            ],
            0..6,
        ),
    ) {
        let lower: String = parts.iter().map(|(lower, _)| *lower).collect();
        let upper: String = parts.iter().map(|(_, upper)| *upper).collect();
        prop_assert!(Validator::exact_ignore_case(upper.as_str()).accepts(&lower));
        prop_assert!(Validator::exact_ignore_case(lower.as_str()).accepts(&upper));
    }

    #[test]
    fn pattern_never_accepts_padded_values(core in "[a-z]{1,6}", pad in "[0-9 ]{1,3}") {
        let pattern = Validator::pattern("[a-z]+").unwrap();
        prop_assert!(pattern.accepts(&core));
        let prefixed = format!("{pad}{core}");
        let suffixed = format!("{core}{pad}");
        prop_assert!(!pattern.accepts(&prefixed));
        prop_assert!(!pattern.accepts(&suffixed));
    }

    #[test]
    fn non_negative_agrees_with_integer_parse(n in any::<i64>()) {
        prop_assert_eq!(Validator::non_negative().accepts(&n.to_string()), n >= 0);
    }

    #[test]
    fn non_negative_never_fails_on_garbage(s in ".*") {
        let mut state = Validator::non_negative().setup();
        prop_assert!(Validator::non_negative().call(&mut state, &s).is_ok());
        let _ = is_non_negative_integer(&s);
    }

    #[test]
    fn double_negation_is_identity(s in "[a-c]{0,3}", e in "[a-c]{0,3}") {
        let v = Validator::exact(e.as_str());
        let twice = Validator::negate(Validator::negate(v.clone()));
        prop_assert_eq!(twice.accepts(&s), v.accepts(&s));
        prop_assert_eq!(Validator::negate(v.clone()).accepts(&s), !v.accepts(&s));
    }

    #[test]
    fn count_teardown_depends_only_on_accepted(
        inputs in prop::collection::vec(prop_oneof![Just("ok".to_string()), "[a-z]{1,4}"], 0 .. 16),
        threshold in 0_usize .. 8,
    ) {
        let count = Validator::count(Validator::exact("ok"), CountCheck::at_least(threshold));
        let mut state = count.setup();
        for input in &inputs {
            count.call(&mut state, input).unwrap();
        }
        let accepted = inputs.iter().filter(|input| input.as_str() == "ok").count();
        prop_assert_eq!(count.teardown(&state), accepted >= threshold);
    }
}
