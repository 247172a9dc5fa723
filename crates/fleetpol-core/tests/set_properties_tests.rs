#![allow(clippy::unwrap_used, clippy::expect_used)]

use fleetpol_core::model::policy::{AUTOMATED, IGNORE, LOCKED, LOCKED_MSG, LOCKED_USER, TAG_ALL};
use fleetpol_core::{tag_prefix, Policy, Set};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn arb_policy() -> impl Strategy<Value = Policy> {
    prop_oneof![
        Just(LOCKED),
        Just(AUTOMATED),
        Just(IGNORE),
        Just(LOCKED_USER),
        Just(LOCKED_MSG),
        Just(TAG_ALL),
        "[a-z0-9_-]{0,12}".prop_map(|c| tag_prefix(&c)),
        "[a-z_]{1,12}".prop_map(|t: String| Policy::new(t)),
    ]
}

fn arb_value() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("true".to_string()),
        Just("false".to_string()),
        Just(String::new()),
        "[ -~]{0,16}",
    ]
}

fn arb_set() -> impl Strategy<Value = Set> {
    proptest::collection::vec((arb_policy(), arb_value()), 0..8)
        .prop_map(|pairs| pairs.into_iter().collect())
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn set_then_get_returns_value(s in arb_set(), p in arb_policy(), v in arb_value()) {
        let next = s.set(p.clone(), v.clone());
        prop_assert_eq!(next.get(&p), Some(v.as_str()));
    }

    #[test]
    fn without_then_get_is_absent(s in arb_set(), p in arb_policy()) {
        let without = s.without(&p);
        prop_assert_eq!(without.get(&p), None);
        prop_assert!(!s.without(&p).has(&p));
    }

    #[test]
    fn add_then_has(s in arb_set(), p in arb_policy()) {
        let next = s.add(&[p.clone()]);
        prop_assert!(next.has(&p));
        prop_assert_eq!(next.get(&p), Some("true"));
    }

    #[test]
    fn add_is_idempotent(s in arb_set(), p in arb_policy()) {
        let once = s.add(&[p.clone()]);
        let twice = once.add(&[p.clone()]);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn derivations_never_alias_receiver(s in arb_set(), p in arb_policy(), v in arb_value()) {
        let before = s.clone();
        let _ = s.add(&[p.clone()]);
        let _ = s.set(p.clone(), v);
        let _ = s.without(&p);
        prop_assert_eq!(s.get(&p), before.get(&p));
        prop_assert_eq!(s.has(&p), before.has(&p));
        prop_assert_eq!(s, before);
    }

    #[test]
    fn canonical_json_roundtrips(s in arb_set()) {
        let json = s.to_json().unwrap();
        let back = Set::from_json(&json).unwrap();
        prop_assert_eq!(back, s);
    }

    #[test]
    fn legacy_list_decodes_as_added(ps in proptest::collection::vec(arb_policy(), 0..6)) {
        let json = serde_json::to_string(&ps).unwrap();
        let decoded = Set::from_json(&json).unwrap();
        prop_assert_eq!(decoded, Set::new().add(&ps));
    }

    #[test]
    fn has_matches_kind_rules(s in arb_set(), p in arb_policy()) {
        let expected = match s.get(&p) {
            None => false,
            Some(v) if fleetpol_core::boolean(&p) => v == "true",
            Some(_) => true,
        };
        prop_assert_eq!(s.has(&p), expected);
    }
}
