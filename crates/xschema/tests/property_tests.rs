//! Property-based tests for xschema.

use proptest::prelude::*;
use serde_json::json;
use xschema::annotation::{ParseMode, parse_number_rules, tokens};
use xschema::prelude::*;

// ============================================================================
// DETERMINISM: validate(x) == validate(x)
// ============================================================================

proptest! {
    #[test]
    fn string_rules_deterministic(s in ".{0,40}") {
        let rules = StringRules::new().required().alphanum().min(3).max(10);
        let r1 = rules.validate(&json!(s));
        let r2 = rules.validate(&json!(s));
        prop_assert_eq!(r1, r2);
    }

    #[test]
    fn number_rules_deterministic(n in any::<i64>()) {
        let rules = NumberRules::new().required().gt(-100).lte(100).multiple_of(7);
        prop_assert_eq!(rules.check(&n), rules.check(&n));
    }

    #[test]
    fn clone_behaves_like_original(s in ".{0,20}") {
        let rules = StringRules::new().lower().max(8);
        let copy = rules.clone();
        prop_assert_eq!(rules.check(&s).is_ok(), copy.check(&s).is_ok());
    }
}

// ============================================================================
// AGGREGATION: one error per failing rule
// ============================================================================

proptest! {
    #[test]
    fn errors_match_failing_rules(n in -1000i64..1000) {
        let rules = NumberRules::new().gte(0).lt(500).multiple_of(3);
        let expected = usize::from(n < 0) + usize::from(n >= 500) + usize::from(n % 3 != 0);
        let found = rules.check(&n).err().map_or(0, |errors| errors.len());
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn empty_rules_accept_any_string(s in ".*") {
        prop_assert!(StringRules::new().validate(&json!(s)).is_ok());
    }

    #[test]
    fn multiple_of_never_panics(n in any::<i64>(), d in any::<i64>()) {
        let _ = NumberRules::new().multiple_of(d).check(&n);
    }

    #[test]
    fn floats_truncate_toward_zero(f in -1.0e6f64..1.0e6) {
        let truncated = f as i64;
        let rules = NumberRules::new().one_of([truncated]);
        prop_assert!(rules.validate(&json!(f)).is_ok());
    }
}

// ============================================================================
// ANNOTATIONS
// ============================================================================

proptest! {
    #[test]
    fn lenient_parse_never_fails(annotation in "[A-Za-z=,0-9\\[\\]]{0,30}") {
        prop_assert!(parse_number_rules(tokens(&annotation), ParseMode::Lenient).is_ok());
    }

    #[test]
    fn parsed_bound_matches_builder(bound in any::<i64>(), n in any::<i64>()) {
        let annotation = format!("Gte={bound}");
        let parsed = parse_number_rules(tokens(&annotation), ParseMode::Strict).unwrap();
        let built = NumberRules::new().gte(bound);
        prop_assert_eq!(parsed.check(&n).is_ok(), built.check(&n).is_ok());
    }
}
