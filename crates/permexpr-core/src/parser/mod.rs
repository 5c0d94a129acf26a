//! Permission expression parser
//!
//! This module implements tokenizing and parsing for the permission
//! expression language.

pub mod lexer;
pub mod parse;
pub mod token;

pub use lexer::{tokenize, LexError, LexResult, Lexer};
pub use parse::{parse, BindingPower, ParseError, ParseResult, Parser, MAX_DEPTH};
pub use token::{Token, TokenKind};
