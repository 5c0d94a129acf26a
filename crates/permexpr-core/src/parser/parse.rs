//! Operator-precedence (Pratt) parser for permission expressions
//!
//! Each token kind that can start an expression has a null denotation, and
//! each kind that can continue one has a left denotation with a binding power.
//! Both tables are plain `match` expressions over [`TokenKind`].

use super::lexer::{LexResult, Lexer};
use super::token::{Token, TokenKind};
use crate::ast::nodes::Expr;
use thiserror::Error;

/// Maximum nesting depth of a parsed expression
pub const MAX_DEPTH: usize = 100;

/// Parse error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected token `{0}`")]
    UnexpectedToken(TokenKind),

    #[error("expected `{expected}` but found `{found}`")]
    Expected { expected: TokenKind, found: TokenKind },

    #[error("expression nests deeper than {limit} levels")]
    TooDeep { limit: usize },
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Binding powers, lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BindingPower {
    Lowest,
    Comma,
    Logical,
    Unary,
    Call,
}

/// A sub-expression together with the height of its tree
struct Parsed {
    expr: Expr,
    height: usize,
}

impl Parsed {
    fn leaf(expr: Expr) -> Self {
        Self { expr, height: 1 }
    }
}

type NullDenotation = fn(&mut Parser) -> ParseResult<Parsed>;
type LeftDenotation = fn(&mut Parser, Parsed) -> ParseResult<Parsed>;

fn null_denotation(kind: TokenKind) -> Option<NullDenotation> {
    match kind {
        TokenKind::Identifier => Some(Parser::parse_identifier as NullDenotation),
        TokenKind::LeftParen => Some(Parser::parse_group as NullDenotation),
        TokenKind::Not => Some(Parser::parse_prefix as NullDenotation),
        TokenKind::Eof
        | TokenKind::RightParen
        | TokenKind::Comma
        | TokenKind::And
        | TokenKind::Or => None,
    }
}

fn left_denotation(kind: TokenKind) -> Option<(BindingPower, LeftDenotation)> {
    match kind {
        TokenKind::And | TokenKind::Or => Some((BindingPower::Logical, Parser::parse_binary as LeftDenotation)),
        TokenKind::LeftParen => Some((BindingPower::Call, Parser::parse_call as LeftDenotation)),
        TokenKind::Eof
        | TokenKind::Identifier
        | TokenKind::RightParen
        | TokenKind::Comma
        | TokenKind::Not => None,
    }
}

/// Parser over a token stream
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
}

impl Parser {
    /// Create a parser over tokens; a missing trailing EOF is supplied
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let end = tokens.last().map(|t| t.offset + t.text.len()).unwrap_or(0);
            tokens.push(Token::eof(end));
        }
        Self { tokens, position: 0, depth: 0 }
    }

    /// Tokenize source text and create a parser over it
    pub fn from_source(source: &str) -> LexResult<Self> {
        Ok(Self::new(Lexer::new(source).tokenize()?))
    }

    /// Parse a complete expression, requiring the whole stream to be consumed
    pub fn parse(mut self) -> ParseResult<Expr> {
        let expr = self.parse_expression(BindingPower::Lowest)?;
        self.expect(TokenKind::Eof)?;
        Ok(expr)
    }

    /// Parse an expression, extending the left-hand side while the next
    /// operator binds tighter than `bp`
    pub fn parse_expression(&mut self, bp: BindingPower) -> ParseResult<Expr> {
        Ok(self.parse_node(bp)?.expr)
    }

    fn parse_node(&mut self, bp: BindingPower) -> ParseResult<Parsed> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep { limit: MAX_DEPTH });
        }
        self.depth += 1;
        let result = self.extend(bp);
        self.depth -= 1;
        result
    }

    fn extend(&mut self, bp: BindingPower) -> ParseResult<Parsed> {
        let kind = self.current().kind;
        let nud = null_denotation(kind).ok_or(ParseError::UnexpectedToken(kind))?;
        let mut lhs = check_height(nud(self)?)?;

        while let Some((power, led)) = left_denotation(self.current().kind) {
            if power <= bp {
                break;
            }
            lhs = check_height(led(self, lhs)?)?;
        }

        Ok(lhs)
    }

    fn parse_identifier(&mut self) -> ParseResult<Parsed> {
        let token = self.expect(TokenKind::Identifier)?;
        Ok(Parsed::leaf(Expr::ident(token.text)))
    }

    fn parse_group(&mut self) -> ParseResult<Parsed> {
        self.expect(TokenKind::LeftParen)?;
        let inner = self.parse_node(BindingPower::Lowest)?;
        self.expect(TokenKind::RightParen)?;
        Ok(inner)
    }

    fn parse_prefix(&mut self) -> ParseResult<Parsed> {
        let operator = self.advance();
        let operand = self.parse_node(BindingPower::Unary)?;
        Ok(Parsed {
            height: operand.height + 1,
            expr: Expr::prefix(operator, operand.expr),
        })
    }

    fn parse_binary(&mut self, lhs: Parsed) -> ParseResult<Parsed> {
        let operator = self.advance();
        let rhs = self.parse_node(BindingPower::Logical)?;
        Ok(Parsed {
            height: lhs.height.max(rhs.height) + 1,
            expr: Expr::binary(lhs.expr, operator, rhs.expr),
        })
    }

    fn parse_call(&mut self, callee: Parsed) -> ParseResult<Parsed> {
        self.expect(TokenKind::LeftParen)?;
        let mut height = callee.height;
        let mut args = Vec::new();

        if !self.check(TokenKind::RightParen) {
            loop {
                let arg = self.parse_node(BindingPower::Logical)?;
                height = height.max(arg.height);
                args.push(arg.expr);

                if self.check(TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }

        self.expect(TokenKind::RightParen)?;
        Ok(Parsed {
            height: height + 1,
            expr: Expr::call(callee.expr, args),
        })
    }

    // Helper methods

    fn current(&self) -> &Token {
        // `new` guarantees a trailing EOF and `advance` never moves past it.
        &self.tokens[self.position]
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn expect(&mut self, expected: TokenKind) -> ParseResult<Token> {
        if self.check(expected) {
            Ok(self.advance())
        } else {
            Err(ParseError::Expected { expected, found: self.current().kind })
        }
    }
}

fn check_height(parsed: Parsed) -> ParseResult<Parsed> {
    if parsed.height > MAX_DEPTH {
        return Err(ParseError::TooDeep { limit: MAX_DEPTH });
    }
    Ok(parsed)
}

/// Parse a token stream into an expression
pub fn parse(tokens: Vec<Token>) -> ParseResult<Expr> {
    Parser::new(tokens).parse()
}
