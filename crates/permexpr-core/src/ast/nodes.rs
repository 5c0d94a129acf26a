//! AST node definitions

use crate::parser::token::{Token, TokenKind};
use serde::Serialize;
use std::fmt;

/// A bare name: a permission, or a built-in predicate used as a callee
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// An expression in the AST
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Expr {
    /// Permission name or callee name
    Identifier(Identifier),

    /// Unary operator applied to a sub-expression (e.g., `Not read`)
    #[serde(rename = "PrefixExpr")]
    Prefix { operator: Token, expr: Box<Expr> },

    /// Binary operator applied to two sub-expressions (e.g., `read And write`)
    #[serde(rename = "BinaryExpr")]
    Binary { operator: Token, lhs: Box<Expr>, rhs: Box<Expr> },

    /// Built-in predicate invocation (e.g., `Some(read, write)`)
    #[serde(rename = "FnCall")]
    FnCall { name: Box<Expr>, args: Vec<Expr> },
}

impl Expr {
    /// Create an identifier expression
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Identifier(Identifier::new(name))
    }

    /// Create a prefix expression
    pub fn prefix(operator: Token, expr: Expr) -> Self {
        Self::Prefix { operator, expr: Box::new(expr) }
    }

    /// Create a binary expression
    pub fn binary(lhs: Expr, operator: Token, rhs: Expr) -> Self {
        Self::Binary { operator, lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    /// Create a function call expression
    pub fn call(name: Expr, args: Vec<Expr>) -> Self {
        Self::FnCall { name: Box::new(name), args }
    }

    /// Name of the node kind, as used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Identifier(_) => "Identifier",
            Expr::Prefix { .. } => "PrefixExpr",
            Expr::Binary { .. } => "BinaryExpr",
            Expr::FnCall { .. } => "FnCall",
        }
    }

    /// The identifier this node wraps, if it is one
    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Expr::Identifier(id) => Some(id),
            _ => None,
        }
    }
}

/// Renders the expression back to source text, fully parenthesized
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier(id) => write!(f, "{}", id.name),
            Expr::Prefix { operator, expr } => write!(f, "{} {}", spelling(operator), expr),
            Expr::Binary { operator, lhs, rhs } => {
                write!(f, "({} {} {})", lhs, spelling(operator), rhs)
            }
            Expr::FnCall { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

fn spelling(operator: &Token) -> &str {
    if operator.text.is_empty() {
        match operator.kind {
            TokenKind::And => "And",
            TokenKind::Or => "Or",
            TokenKind::Not => "Not",
            other => other.human_name(),
        }
    } else {
        &operator.text
    }
}
