//! Test utilities and helper functions for permexpr tests
//!
//! Shared builders for permission sets, tokens and expressions so unit tests
//! across modules stay short.

use crate::ast::Expr;
use crate::parser::{Token, TokenKind};
use crate::predicate::Predicate;
use std::collections::HashSet;

/// Build an owned permission set
pub fn permissions(names: &[&str]) -> HashSet<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Operator token with its canonical keyword spelling
pub fn op(kind: TokenKind) -> Token {
    let text = match kind {
        TokenKind::And => "And",
        TokenKind::Or => "Or",
        TokenKind::Not => "Not",
        other => other.human_name(),
    };
    Token::new(kind, text, 0)
}

pub fn ident(name: &str) -> Expr {
    Expr::ident(name)
}

pub fn call(name: &str, args: Vec<Expr>) -> Expr {
    Expr::call(Expr::ident(name), args)
}

pub fn binary(lhs: Expr, kind: TokenKind, rhs: Expr) -> Expr {
    Expr::binary(lhs, op(kind), rhs)
}

pub fn not(expr: Expr) -> Expr {
    Expr::prefix(op(TokenKind::Not), expr)
}

/// Compile source, panicking with the error message on failure
pub fn compile_ok(source: &str) -> Predicate {
    match crate::compile(source) {
        Ok(predicate) => predicate,
        Err(err) => panic!("`{}` failed to compile: {}", source, err),
    }
}
