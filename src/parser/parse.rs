//! Parser state, errors and entry points
//!
//! [`Parser`] owns the full token buffer, ending in the end-of-input token,
//! and a cursor that only moves forward. Productions read the cursor through
//! `peek`/`look_ahead` and advance it with `consume`/`expect`; lookahead
//! clamps to the end-of-input token, so it never runs off the buffer.
//!
//! The grammar rules themselves live beside this module: `expressions`,
//! `declarations` and `statements`. [`Production`] names each rule that can
//! serve as an entry point, and [`parse`] runs one over a whole source
//! string. A production commits after looking at most two tokens ahead.
//! The first mismatch is returned as a [`ParseError`]; nothing is retried.

use crate::parser::ast::*;
use crate::parser::config::{ParserConfig, DEFAULT_MAX_DEPTH};
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use std::fmt;

/// What a production was looking for when it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Kind(TokenKind),
    OneOf(&'static [TokenKind]),
    Production(&'static str),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Kind(kind) => write!(f, "{}", kind),
            Expected::OneOf(kinds) => {
                for (i, kind) in kinds.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" or ")?;
                    }
                    write!(f, "{}", kind)?;
                }
                Ok(())
            }
            Expected::Production(name) => f.write_str(name),
        }
    }
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Lex(LexError),
    /// A token was requested past the end of the buffer
    UnexpectedEndOfInput { expected: Expected, position: usize },
    /// A fixed-sequence production saw the wrong kind of token
    UnexpectedTokenKind {
        expected: Expected,
        found: TokenKind,
        position: usize,
    },
    /// No alternative of `production` matches the lookahead
    NoMatchingProduction {
        production: &'static str,
        position: usize,
    },
    /// Expression nests deeper than the configured limit
    NestingTooDeep { limit: usize, position: usize },
}

impl ParseError {
    /// Byte offset of the offending token or character
    pub fn position(&self) -> usize {
        match self {
            ParseError::Lex(err) => err.position(),
            ParseError::UnexpectedEndOfInput { position, .. }
            | ParseError::UnexpectedTokenKind { position, .. }
            | ParseError::NoMatchingProduction { position, .. }
            | ParseError::NestingTooDeep { position, .. } => *position,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex(err) => fmt::Display::fmt(err, f),
            ParseError::UnexpectedEndOfInput { expected, position } => write!(
                f,
                "Parse error at offset {}: Expected {}, found end of input",
                position, expected
            ),
            ParseError::UnexpectedTokenKind {
                expected,
                found,
                position,
            } => write!(
                f,
                "Parse error at offset {}: Expected {}, found {}",
                position, expected, found
            ),
            ParseError::NoMatchingProduction { production, position } => write!(
                f,
                "Parse error at offset {}: No {} starts here",
                position, production
            ),
            ParseError::NestingTooDeep { limit, position } => write!(
                f,
                "Parse error at offset {}: Expression nests deeper than {} levels",
                position, limit
            ),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::Lex(err)
    }
}

/// Grammar entry points accepted by [`parse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Production {
    Program,
    Block,
    Statement,
    SymbolDeclaration,
    SymbolAssignment,
    Pragma,
    Expression,
    BinaryExpr,
    ComparisonExpr,
    UnaryExpr,
    LiteralExpr,
    SymbolLiteral,
    NumericLiteral,
    BooleanLiteral,
}

impl Production {
    pub const ALL: [Production; 14] = [
        Production::Program,
        Production::Block,
        Production::Statement,
        Production::SymbolDeclaration,
        Production::SymbolAssignment,
        Production::Pragma,
        Production::Expression,
        Production::BinaryExpr,
        Production::ComparisonExpr,
        Production::UnaryExpr,
        Production::LiteralExpr,
        Production::SymbolLiteral,
        Production::NumericLiteral,
        Production::BooleanLiteral,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Production::Program => "program",
            Production::Block => "block",
            Production::Statement => "statement",
            Production::SymbolDeclaration => "symbol_declaration",
            Production::SymbolAssignment => "symbol_assignment",
            Production::Pragma => "pragma",
            Production::Expression => "expression",
            Production::BinaryExpr => "binary_expr",
            Production::ComparisonExpr => "comparison_expr",
            Production::UnaryExpr => "unary_expr",
            Production::LiteralExpr => "literal_expr",
            Production::SymbolLiteral => "symbol_literal",
            Production::NumericLiteral => "numeric_literal",
            Production::BooleanLiteral => "boolean_literal",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Production::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Recursive descent parser over a fully lexed token buffer
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    depth: usize,
    max_depth: usize,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        Ok(Self::from_tokens(lexer.tokenize()?))
    }

    pub fn with_config(source: &str, config: &ParserConfig) -> Result<Self, ParseError> {
        let mut lexer = Lexer::with_config(source, config);
        let mut parser = Self::from_tokens(lexer.tokenize()?);
        parser.max_depth = config.max_depth();
        Ok(parser)
    }

    /// Build a parser over already-scanned tokens. A missing end-of-input
    /// token is appended after the last one.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let end = tokens.last().map_or(0, |t| t.end);
            tokens.push(Token::eof(end));
        }
        Self {
            tokens,
            position: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Run a single entry-point production
    pub fn parse_production(&mut self, production: Production) -> Result<Node, ParseError> {
        let node = match production {
            Production::Program => Node::Program(self.parse_program()?),
            Production::Block => Node::Block(self.parse_block()?),
            Production::Statement => self.parse_statement()?.into(),
            Production::SymbolDeclaration => {
                Node::SymbolDeclaration(self.parse_symbol_declaration()?)
            }
            Production::SymbolAssignment => Node::SymbolAssignment(self.parse_symbol_assignment()?),
            Production::Pragma => Node::Pragma(self.parse_pragma()?),
            Production::Expression => self.parse_expression()?.into(),
            Production::BinaryExpr => self.parse_binary_expr()?.into(),
            Production::ComparisonExpr => self.parse_comparison_expr()?.into(),
            Production::UnaryExpr => Node::UnaryExpr(self.parse_unary_expr()?),
            Production::LiteralExpr => self.parse_literal_expr()?.into(),
            Production::SymbolLiteral => Node::SymbolLiteral(self.parse_symbol_literal()?),
            Production::NumericLiteral => Node::NumericLiteral(self.parse_numeric_literal()?),
            Production::BooleanLiteral => Node::BooleanLiteral(self.parse_boolean_literal()?),
        };
        Ok(node)
    }

    // ===== Cursor helpers =====

    /// Return the token at the cursor and advance past it.
    pub fn consume(&mut self) -> Result<&Token, ParseError> {
        self.consume_expecting(Expected::Production("token"))
    }

    fn consume_expecting(&mut self, expected: Expected) -> Result<&Token, ParseError> {
        if self.is_at_end() {
            return Err(ParseError::UnexpectedEndOfInput {
                expected,
                position: self.peek().pos,
            });
        }
        self.position += 1;
        Ok(&self.tokens[self.position - 1])
    }

    /// Token at the cursor; the end-of-input token once the buffer is spent
    pub fn peek(&self) -> &Token {
        self.look_ahead(0)
    }

    /// Token `n` places past the cursor, clamped to the end-of-input token
    pub fn look_ahead(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.position + n).min(last)]
    }

    pub fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    /// Consume a token of `kind` or fail without advancing
    pub fn expect(&mut self, kind: TokenKind) -> Result<&Token, ParseError> {
        if self.peek().kind != kind {
            return Err(self.unexpected(Expected::Kind(kind)));
        }
        self.consume_expecting(Expected::Kind(kind))
    }

    /// Error describing the token at the cursor as not being `expected`
    pub(crate) fn unexpected(&self, expected: Expected) -> ParseError {
        let found = self.peek();
        if found.is_eof() {
            ParseError::UnexpectedEndOfInput {
                expected,
                position: found.pos,
            }
        } else {
            ParseError::UnexpectedTokenKind {
                expected,
                found: found.kind,
                position: found.pos,
            }
        }
    }

    /// Consume the `.` that terminates a statement
    pub fn consume_dot(&mut self) -> Result<(), ParseError> {
        self.expect(TokenKind::Dot)?;
        Ok(())
    }

    pub(crate) fn expect_end(&self) -> Result<(), ParseError> {
        let found = self.peek();
        if found.is_eof() {
            Ok(())
        } else {
            Err(ParseError::UnexpectedTokenKind {
                expected: Expected::Kind(TokenKind::Eof),
                found: found.kind,
                position: found.pos,
            })
        }
    }

    /// Run `parse` one nesting level deeper, failing once the limit is
    /// passed. Keeps right-recursive chains from exhausting the stack.
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.max_depth,
                position: self.peek().pos,
            });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Whether the tokens at `n` and `n + 1` form a two-character operator
    /// such as `--` (no whitespace between them)
    pub(crate) fn adjacent_pair(&self, n: usize, kind: TokenKind) -> bool {
        let first = self.look_ahead(n);
        let second = self.look_ahead(n + 1);
        first.kind == kind && second.kind == kind && first.end == second.pos
    }
}

/// Tokenize `source` with no reserved words.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Parse `source` with the given entry point. The whole input must be
/// consumed by the production.
pub fn parse(source: &str, production: Production) -> Result<Node, ParseError> {
    parse_with_config(source, production, &ParserConfig::default())
}

pub fn parse_with_config(
    source: &str,
    production: Production,
    config: &ParserConfig,
) -> Result<Node, ParseError> {
    let mut parser = Parser::with_config(source, config)?;
    let node = parser.parse_production(production)?;
    parser.expect_end()?;
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_and_peek() {
        let mut parser = Parser::new("a b").unwrap();
        assert_eq!(parser.peek().text, "a");
        assert_eq!(parser.look_ahead(1).text, "b");
        assert!(parser.look_ahead(5).is_eof());

        assert_eq!(parser.consume().unwrap().text, "a");
        assert_eq!(parser.consume().unwrap().text, "b");
        let err = parser.consume().unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEndOfInput { position: 3, .. }));
    }

    #[test]
    fn test_consume_dot_mismatch() {
        let mut parser = Parser::new("x").unwrap();
        let err = parser.consume_dot().unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedTokenKind {
                expected: Expected::Kind(TokenKind::Dot),
                found: TokenKind::Symbol,
                position: 0
            }
        );
        // cursor untouched on mismatch
        assert_eq!(parser.peek().text, "x");
    }

    #[test]
    fn test_from_tokens_appends_eof() {
        let mut tokens = tokenize("7").unwrap();
        tokens.pop();
        let parser = Parser::from_tokens(tokens);
        assert_eq!(parser.tokens.len(), 2);
        assert!(parser.tokens[1].is_eof());
        assert_eq!(parser.tokens[1].pos, 1);

        let empty = Parser::from_tokens(Vec::new());
        assert!(empty.is_at_end());
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = parse("20 + 5 7", Production::BinaryExpr).unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedTokenKind {
                expected: Expected::Kind(TokenKind::Eof),
                found: TokenKind::Numeric,
                position: 7
            }
        ));
    }

    #[test]
    fn test_production_names() {
        for production in Production::ALL {
            assert_eq!(Production::from_name(production.name()), Some(production));
        }
        assert_eq!(Production::from_name("nope"), None);
    }

    #[test]
    fn test_error_display() {
        let err = parse("x := 5", Production::Statement).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parse error at offset 6: Expected Dot, found end of input"
        );
        assert_eq!(err.position(), 6);
    }
}
