//! End-to-end tests: source text through tokens, AST and predicate to a decision

use permexpr_core::{
    check, compile, deserialize, evaluate, parse, serialize, tokenize, Error, Expr, Predicate,
    Token, TokenKind,
};
use serde_json::json;
use std::collections::{BTreeSet, HashSet};

fn perms(names: &[&str]) -> HashSet<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn test_read_and_write_scenario() {
    let source = "Has(read) And Has(write)";

    let tokens = tokenize(source).unwrap();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::LeftParen,
            TokenKind::Identifier,
            TokenKind::RightParen,
            TokenKind::And,
            TokenKind::Identifier,
            TokenKind::LeftParen,
            TokenKind::Identifier,
            TokenKind::RightParen,
            TokenKind::Eof,
        ]
    );

    let ast = parse(tokens).unwrap();
    assert_eq!(
        ast,
        Expr::binary(
            Expr::call(Expr::ident("Has"), vec![Expr::ident("read")]),
            Token::new(TokenKind::And, "And", 10),
            Expr::call(Expr::ident("Has"), vec![Expr::ident("write")]),
        )
    );

    let predicate = compile(source).unwrap();
    assert_eq!(predicate, Predicate::and(Predicate::has("read"), Predicate::has("write")));

    let stored = serialize(&predicate).unwrap();
    assert_eq!(
        stored,
        "{'type':'AND','lhs':{'type':'HAS','val':'read'},'rhs':{'type':'HAS','val':'write'}}"
    );

    let restored = deserialize(&stored).unwrap();
    assert!(!evaluate(&restored, &perms(&["read"])));
    assert!(evaluate(&restored, &perms(&["read", "write"])));
}

#[test]
fn test_call_argument_tokens() {
    let tokens = tokenize("Some(x And y)").unwrap();
    let pairs: Vec<_> = tokens.iter().map(|t| (t.human_kind(), t.text.as_str())).collect();
    assert_eq!(
        pairs,
        vec![
            ("IDENTIFIER", "Some"),
            ("LEFT_PAREN", "("),
            ("IDENTIFIER", "x"),
            ("AND", "And"),
            ("IDENTIFIER", "y"),
            ("RIGHT_PAREN", ")"),
            ("EOF", ""),
        ]
    );
}

#[test]
fn test_operator_spellings_are_equivalent() {
    let expected = compile("Has(a) And Not Has(b) Or c").unwrap();
    for source in [
        "Has(a) && !Has(b) || c",
        "Has(a) AND NOT Has(b) OR c",
        "Has(a) & ! Has(b) | c",
        "has(a)\n\tAnd\r\nNot HAS(b) Or c",
    ] {
        assert_eq!(compile(source).unwrap(), expected, "{}", source);
    }
}

#[test]
fn test_ast_json_shape() {
    let ast = parse(tokenize("Not x").unwrap()).unwrap();
    assert_eq!(
        serde_json::to_value(&ast).unwrap(),
        json!({
            "type": "PrefixExpr",
            "operator": { "kind": "NOT", "text": "Not", "offset": 0 },
            "expr": { "type": "Identifier", "name": "x" }
        })
    );
}

#[test]
fn test_predicate_json_shape() {
    let predicate = compile("Every(a, b) Or Not Some()").unwrap();
    assert_eq!(
        serde_json::to_value(&predicate).unwrap(),
        json!({
            "type": "OR",
            "lhs": { "type": "EVERY", "val": ["a", "b"] },
            "rhs": { "type": "NOT", "expr": { "type": "SOME", "val": [] } }
        })
    );
}

#[test]
fn test_check_with_various_sets() {
    let source = "Some(admin, owner) Or Every(read, write)";
    let tree: BTreeSet<&str> = ["read", "write"].into_iter().collect();

    assert!(check(source, &tree).unwrap());
    assert!(check(source, &vec!["owner".to_string()]).unwrap());
    assert!(!check(source, &["read"]).unwrap());
}

#[test]
fn test_keyword_prefix_splits_identifier() {
    let tokens = tokenize("Android").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::And);
    assert_eq!(tokens[1].text, "roid");
    assert!(matches!(compile("Android"), Err(Error::Parse(_))));
}

#[test]
fn test_error_messages() {
    let cases = [
        ("@invalid", "unexpected input `@invalid` at offset 0"),
        ("read @x", "unexpected input `@x` at offset 5"),
        (")", "unexpected token `RIGHT_PAREN`"),
        ("(a", "expected `RIGHT_PAREN` but found `EOF`"),
        ("Some(x And y)", "expected `RIGHT_PAREN` but found `AND`"),
        ("has(x, y)", "expected 1 argument but received `2`"),
        ("eve()", "`eve` not found, did you want `every`?"),
        ("any(x)", "`any` not implemented yet"),
        ("Some(Has(x))", "argument can only be an identifier, binary expression, or prefix expression"),
        ("(a Or b)(c)", "expected identifier but found `BinaryExpr`"),
    ];
    for (source, message) in cases {
        let err = compile(source).unwrap_err();
        assert_eq!(err.to_string(), message, "{}", source);
    }
}

#[test]
fn test_quoted_names_survive_storage() {
    let predicate = Predicate::some(["it's", "\"quoted\""]);
    let stored = serialize(&predicate).unwrap();
    assert!(!stored.contains('"'));
    assert_eq!(deserialize(&stored).unwrap(), predicate);
}
