//! Runtime guard decisions for source and pre-lowered bindings

use permexpr_core::{
    rewrite_template, Binding, DecisionKind, Error, Guard, Predicate, RewriteOptions,
};
use std::sync::Arc;
use std::thread;

#[test]
fn test_source_and_predicate_bindings_agree() {
    let guard = Guard::new();
    let source = Binding::Source("Every(read, write) And Not banned".to_string());
    let lowered = Binding::Predicate(Predicate::and(
        Predicate::every(["read", "write"]),
        Predicate::not(Predicate::has("banned")),
    ));

    for granted in [
        vec!["read"],
        vec!["read", "write"],
        vec!["read", "write", "banned"],
    ] {
        assert_eq!(
            guard.decide(&source, &granted).unwrap().kind,
            guard.decide(&lowered, &granted).unwrap().kind,
            "{:?}",
            granted
        );
    }
}

#[test]
fn test_binding_from_rewritten_template() {
    let out = rewrite_template(r#"<a v-permission="'Some(edit, admin)'">"#, &RewriteOptions::default())
        .unwrap();
    let start = out.code.find('{').unwrap();
    let end = out.code.rfind('}').unwrap() + 1;

    let binding = Binding::from_serialized(&out.code[start..end]).unwrap();
    let guard = Guard::new();
    assert_eq!(guard.decide(&binding, &["admin"]).unwrap().kind, DecisionKind::Allow);
    assert_eq!(guard.decide(&binding, &["view"]).unwrap().kind, DecisionKind::Deny);
}

#[test]
fn test_invalid_bindings() {
    let guard = Guard::new();
    let err = guard.is_permitted(&Binding::Source("Has(a, b)".to_string()), &["a"]).unwrap_err();
    assert!(matches!(err, Error::Compile(_)));

    let err = Binding::from_serialized("{'type':'MAYBE'}").unwrap_err();
    assert!(matches!(err, Error::Codec(_)));
}

#[test]
fn test_guard_is_shared_across_threads() {
    let guard = Arc::new(Guard::new());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let guard = Arc::clone(&guard);
            thread::spawn(move || {
                let granted = if i % 2 == 0 { vec!["read"] } else { vec![] };
                let binding = Binding::Source("Has(read)".to_string());
                guard.is_permitted(&binding, &granted).unwrap() == (i % 2 == 0)
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
    assert_eq!(guard.cached(), 1);
}
