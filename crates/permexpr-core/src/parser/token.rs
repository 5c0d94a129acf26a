//! Token definitions for the permission expression language

use serde::{Deserialize, Serialize};
use std::fmt;

/// A token with the exact source text it was matched from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The source text for this token (empty for EOF)
    pub text: String,
    /// Byte offset of the token in the source
    pub offset: usize,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        Self { kind, text: text.into(), offset }
    }

    /// The end-of-input marker appended after the last real token
    pub fn eof(offset: usize) -> Self {
        Self::new(TokenKind::Eof, String::new(), offset)
    }

    /// Upper-case name of the token kind, as used in diagnostics
    pub fn human_kind(&self) -> &'static str {
        self.kind.human_name()
    }
}

/// The kind of token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Eof,
    Identifier,
    LeftParen,
    RightParen,
    Comma,
    And,
    Or,
    Not,
}

impl TokenKind {
    /// Name of the kind used by error messages
    pub fn human_name(self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::Comma => "COMMA",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.human_name())
    }
}
