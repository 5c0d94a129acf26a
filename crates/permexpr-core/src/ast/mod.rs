//! Abstract Syntax Tree (AST) for permission expressions
//!
//! The AST is built once by the parser and consumed once by the compiler,
//! which lowers it into a [`Predicate`](crate::predicate::Predicate).

pub mod nodes;

pub use nodes::{Expr, Identifier};
