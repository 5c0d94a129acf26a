//! Lowering of parsed expressions into permission predicates
//!
//! The AST keeps the surface syntax (callee expressions, operator tokens);
//! lowering validates it and produces a [`Predicate`] whose leaves are plain
//! permission names.

use crate::ast::nodes::Expr;
use crate::parser::token::{Token, TokenKind};
use crate::predicate::Predicate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("expected identifier but found `{0}`")]
    ExpectedIdentifier(&'static str),

    #[error("`{name}` not found, did you want `{suggestion}`?")]
    UnknownFunctionSuggestion { name: String, suggestion: &'static str },

    #[error("`{0}` not implemented yet")]
    NotImplemented(String),

    #[error("expected 1 argument but received `{0}`")]
    ArgumentCount(usize),

    #[error("argument can only be an identifier, binary expression, or prefix expression")]
    InvalidArgument,

    #[error("operator only supports AND/OR (or their symbolic/keyword spellings)")]
    InvalidBinaryOperator(TokenKind),

    #[error("unknown operator `{0}`")]
    UnknownPrefixOperator(TokenKind),
}

pub type CompileResult<T> = Result<T, CompileError>;

/// Built-in predicates callable from source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Has,
    Some,
    Every,
}

impl Builtin {
    pub const ALL: [Builtin; 3] = [Builtin::Has, Builtin::Some, Builtin::Every];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Has => "has",
            Builtin::Some => "some",
            Builtin::Every => "every",
        }
    }

    /// Case-insensitive lookup
    pub fn lookup(name: &str) -> Option<Builtin> {
        Self::ALL.into_iter().find(|b| b.name().eq_ignore_ascii_case(name))
    }

    /// The built-in `name` abbreviates, if exactly one does
    pub fn suggest(name: &str) -> Option<Builtin> {
        let lowered = name.to_ascii_lowercase();
        let mut matches = Self::ALL.into_iter().filter(|b| b.name().starts_with(&lowered));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }
}

/// Lower an expression into a predicate
pub fn lower(expr: &Expr) -> CompileResult<Predicate> {
    match expr {
        Expr::Identifier(id) => Ok(Predicate::has(id.name.clone())),
        Expr::Binary { operator, lhs, rhs } => lower_binary(operator, lhs, rhs),
        Expr::Prefix { operator, expr } => lower_prefix(operator, expr),
        Expr::FnCall { name, args } => lower_call(name, args),
    }
}

fn lower_binary(operator: &Token, lhs: &Expr, rhs: &Expr) -> CompileResult<Predicate> {
    let combine: fn(Predicate, Predicate) -> Predicate = match operator.kind {
        TokenKind::And => Predicate::and,
        TokenKind::Or => Predicate::or,
        other => return Err(CompileError::InvalidBinaryOperator(other)),
    };
    Ok(combine(lower(lhs)?, lower(rhs)?))
}

fn lower_prefix(operator: &Token, expr: &Expr) -> CompileResult<Predicate> {
    match operator.kind {
        TokenKind::Not => Ok(Predicate::not(lower(expr)?)),
        other => Err(CompileError::UnknownPrefixOperator(other)),
    }
}

fn lower_call(callee: &Expr, args: &[Expr]) -> CompileResult<Predicate> {
    let name = callee
        .as_identifier()
        .ok_or(CompileError::ExpectedIdentifier(callee.kind_name()))?
        .name
        .as_str();

    let builtin = match Builtin::lookup(name) {
        Some(builtin) => builtin,
        None => {
            return Err(match Builtin::suggest(name) {
                Some(suggestion) => CompileError::UnknownFunctionSuggestion {
                    name: name.to_string(),
                    suggestion: suggestion.name(),
                },
                None => CompileError::NotImplemented(name.to_string()),
            })
        }
    };

    if builtin == Builtin::Has && args.len() != 1 {
        return Err(CompileError::ArgumentCount(args.len()));
    }

    if args.iter().any(|arg| matches!(arg, Expr::FnCall { .. })) {
        return Err(CompileError::InvalidArgument);
    }

    let mut names = Vec::new();
    let mut nested = Vec::new();
    for arg in args {
        match arg {
            Expr::Identifier(id) => names.push(id.name.clone()),
            _ => nested.push(lower(arg)?),
        }
    }

    match builtin {
        Builtin::Has => match (names.pop(), nested.pop()) {
            (Some(name), _) => Ok(Predicate::has(name)),
            (None, Some(predicate)) => Ok(predicate),
            (None, None) => Err(CompileError::ArgumentCount(0)),
        },
        Builtin::Some => Ok(combine_leaf(Predicate::some(names), nested, Predicate::or)),
        Builtin::Every => Ok(combine_leaf(Predicate::every(names), nested, Predicate::and)),
    }
}

/// Join a leaf with lowered expression arguments, left to right
///
/// An empty leaf is dropped when there is at least one expression argument.
fn combine_leaf(
    leaf: Predicate,
    nested: Vec<Predicate>,
    combine: fn(Predicate, Predicate) -> Predicate,
) -> Predicate {
    let leaf_is_empty = match &leaf {
        Predicate::Some { val } | Predicate::Every { val } => val.is_empty(),
        _ => false,
    };

    let mut rest = nested.into_iter();
    let first = if leaf_is_empty {
        match rest.next() {
            Some(predicate) => predicate,
            None => return leaf,
        }
    } else {
        leaf
    };
    rest.fold(first, combine)
}
