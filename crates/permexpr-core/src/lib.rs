pub mod ast;
pub mod compiler;
pub mod engine;
pub mod interpreter;
pub mod parser;
pub mod predicate;
pub mod rewrite;

// Test utilities (available in tests and when built with the `testing` feature)
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use ast::{Expr, Identifier};
pub use compiler::{lower, Builtin, CompileError};
pub use engine::{Binding, Decision, DecisionKind, Guard};
pub use interpreter::{evaluate, PermissionSet};
pub use parser::{parse, tokenize, LexError, ParseError, Token, TokenKind};
pub use predicate::{deserialize, serialize, CodecError, Predicate};
pub use rewrite::{rewrite_file_contents, rewrite_template, OnError, Rewrite, RewriteError, RewriteOptions};

use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Rewrite(#[from] RewriteError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Compile expression source into a predicate
pub fn compile(source: &str) -> Result<Predicate> {
    let tokens = tokenize(source)?;
    let expr = parse(tokens)?;
    let predicate = lower(&expr)?;
    debug!(source, predicate = %predicate, "compiled permission expression");
    Ok(predicate)
}

/// Compile expression source and evaluate it against `permissions`
pub fn check<P: PermissionSet + ?Sized>(source: &str, permissions: &P) -> Result<bool> {
    Ok(evaluate(&compile(source)?, permissions))
}
