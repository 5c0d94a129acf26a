//! Property tests: stored and displayed predicates come back unchanged

use permexpr_core::predicate::{from_json, to_json};
use permexpr_core::{compile, deserialize, serialize, Predicate};
use proptest::prelude::*;

fn arb_identifier() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("read".to_string()),
        Just("write".to_string()),
        Just("edit".to_string()),
        Just("view".to_string()),
        Just("admin".to_string()),
        Just("user_1".to_string()),
    ]
}

fn arb_stored_name() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_identifier(),
        Just("it's".to_string()),
        Just("\"quoted\"".to_string()),
        Just("{'type':'HAS'}".to_string()),
        Just(String::new()),
    ]
}

fn arb_predicate(name: BoxedStrategy<String>) -> impl Strategy<Value = Predicate> {
    let leaf = prop_oneof![
        name.clone().prop_map(Predicate::has),
        prop::collection::vec(name.clone(), 0..4).prop_map(Predicate::some),
        prop::collection::vec(name, 0..4).prop_map(Predicate::every),
    ];
    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Predicate::and(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Predicate::or(l, r)),
            inner.prop_map(Predicate::not),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn prop_serialized_form_restores(predicate in arb_predicate(arb_stored_name().boxed())) {
        let stored = serialize(&predicate).unwrap();
        prop_assert!(!stored.contains('"'));
        prop_assert_eq!(deserialize(&stored).unwrap(), predicate);
    }

    #[test]
    fn prop_json_form_restores(predicate in arb_predicate(arb_stored_name().boxed())) {
        let json = to_json(&predicate).unwrap();
        prop_assert_eq!(from_json(&json).unwrap(), predicate);
    }

    #[test]
    fn prop_display_compiles_back(predicate in arb_predicate(arb_identifier().boxed())) {
        prop_assert_eq!(compile(&predicate.to_string()).unwrap(), predicate);
    }
}
