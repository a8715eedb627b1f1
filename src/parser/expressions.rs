//! Expression parsing implementation
//!
//! # Supported Expressions
//!
//! - Literals: numbers, symbols, `true`/`false`
//! - Unary: `-x`, `--x`, `++x` (operand is a literal)
//! - Binary: `literal op expression` for `+ - * /`, right-recursive with no
//!   precedence between operators
//! - Comparison: `number op number` for `< <= > >= =`
//!
//! Each composite form is chosen only after one token of lookahead past its
//! leading literal; when no operator follows, the literal is returned alone.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Token, TokenKind};
use crate::parser::parse::{Expected, ParseError, Parser};

const LITERAL_START: &[TokenKind] = &[TokenKind::Numeric, TokenKind::Symbol];

impl Parser {
    /// Parse expression (top-level entry point)
    pub fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let first = self.peek();
        let (kind, position) = (first.kind, first.pos);
        let is_boolean = boolean_value(first).is_some();

        match kind {
            TokenKind::Minus => Ok(Expression::Unary(self.parse_unary_expr()?)),
            TokenKind::Plus if self.adjacent_pair(0, TokenKind::Plus) => {
                Ok(Expression::Unary(self.parse_unary_expr()?))
            }
            TokenKind::Numeric if self.look_ahead(1).kind.is_comparison() => {
                self.parse_comparison_expr()
            }
            TokenKind::Numeric | TokenKind::Symbol => self.parse_binary_expr(),
            TokenKind::Keyword if is_boolean => self.parse_binary_expr(),
            TokenKind::Eof => Err(self.unexpected(Expected::Production("expression"))),
            _ => Err(ParseError::NoMatchingProduction {
                production: "expression",
                position,
            }),
        }
    }

    /// Parse `literal (+|-|*|/) expression`, or the literal alone when no
    /// arithmetic operator follows it
    pub fn parse_binary_expr(&mut self) -> Result<Expression, ParseError> {
        let left = Expression::Literal(self.parse_literal_expr()?);

        let Some(op) = bin_op(self.peek().kind) else {
            return Ok(left);
        };
        self.consume()?;

        let right = self.nested(Self::parse_expression)?;
        Ok(Expression::Binary(BinaryExpr {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }))
    }

    /// Parse `number (<|<=|>|>=|=) number`, or the number alone when no
    /// comparison operator follows it
    pub fn parse_comparison_expr(&mut self) -> Result<Expression, ParseError> {
        let left = self.parse_numeric_literal()?;

        let Some(op) = cmp_op(self.peek().kind) else {
            return Ok(Expression::Literal(LiteralExpr::Numeric(left)));
        };
        self.consume()?;

        let right = self.parse_numeric_literal()?;
        Ok(Expression::Comparison(ComparisonExpr { left, op, right }))
    }

    /// Parse `(-|--|++) literal`
    pub fn parse_unary_expr(&mut self) -> Result<UnaryExpr, ParseError> {
        let (op, width) = match self.peek().kind {
            TokenKind::Minus if self.adjacent_pair(0, TokenKind::Minus) => (UnOp::PreDec, 2),
            TokenKind::Minus => (UnOp::Neg, 1),
            TokenKind::Plus if self.adjacent_pair(0, TokenKind::Plus) => (UnOp::PreInc, 2),
            _ => return Err(self.unexpected(Expected::Production("'-', '--' or '++'"))),
        };
        for _ in 0..width {
            self.consume()?;
        }

        let operand = self.parse_literal_expr()?;
        Ok(UnaryExpr {
            op,
            operand: Box::new(Expression::Literal(operand)),
        })
    }

    /// Parse a number, boolean or symbol
    pub fn parse_literal_expr(&mut self) -> Result<LiteralExpr, ParseError> {
        let token = self.peek();
        if boolean_value(token).is_some() {
            return Ok(LiteralExpr::Boolean(self.parse_boolean_literal()?));
        }

        let kind = token.kind;
        match kind {
            TokenKind::Numeric => Ok(LiteralExpr::Numeric(self.parse_numeric_literal()?)),
            TokenKind::Symbol => Ok(LiteralExpr::Symbol(self.parse_symbol_literal()?)),
            _ => Err(self.unexpected(Expected::OneOf(LITERAL_START))),
        }
    }

    pub fn parse_symbol_literal(&mut self) -> Result<SymbolLiteral, ParseError> {
        let token = self.expect(TokenKind::Symbol)?;
        Ok(SymbolLiteral {
            name: token.text.clone(),
        })
    }

    pub fn parse_numeric_literal(&mut self) -> Result<NumericLiteral, ParseError> {
        let token = self.expect(TokenKind::Numeric)?;
        let value = match token.number {
            Some(value) => value,
            // hand-built tokens may carry only text
            None => token.text.parse::<i64>().map_err(|_| LexError::IntegerOverflow {
                text: token.text.clone(),
                position: token.pos,
            })?,
        };
        Ok(NumericLiteral { value })
    }

    pub fn parse_boolean_literal(&mut self) -> Result<BooleanLiteral, ParseError> {
        let Some(value) = boolean_value(self.peek()) else {
            return Err(self.unexpected(Expected::Production("boolean literal")));
        };
        self.consume()?;
        Ok(BooleanLiteral { value })
    }
}

/// `true`/`false`, spelled as a symbol or as a reserved keyword
pub(crate) fn boolean_value(token: &Token) -> Option<bool> {
    if !matches!(token.kind, TokenKind::Symbol | TokenKind::Keyword) {
        return None;
    }
    match token.text.as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn bin_op(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Plus => Some(BinOp::Add),
        TokenKind::Minus => Some(BinOp::Sub),
        TokenKind::Times => Some(BinOp::Mul),
        TokenKind::Division => Some(BinOp::Div),
        _ => None,
    }
}

fn cmp_op(kind: TokenKind) -> Option<CmpOp> {
    match kind {
        TokenKind::Lt => Some(CmpOp::Lt),
        TokenKind::Le => Some(CmpOp::Le),
        TokenKind::Gt => Some(CmpOp::Gt),
        TokenKind::Ge => Some(CmpOp::Ge),
        TokenKind::Equals => Some(CmpOp::Eq),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expression(source: &str) -> Expression {
        let mut parser = Parser::new(source).unwrap();
        parser.parse_expression().unwrap()
    }

    #[test]
    fn test_binary_is_right_recursive() {
        assert_eq!(expression("1 - 2 - 3").to_string(), "(1 - (2 - 3))");
        assert_eq!(expression("1 * 2 + 3").to_string(), "(1 * (2 + 3))");
    }

    #[test]
    fn test_unary_operators() {
        assert_eq!(expression("-5").to_string(), "(-5)");
        assert_eq!(expression("--x").to_string(), "(--x)");
        assert_eq!(expression("++x").to_string(), "(++x)");
        // a lone '+' is not a prefix operator
        let mut parser = Parser::new("+ x").unwrap();
        assert!(matches!(
            parser.parse_expression(),
            Err(ParseError::NoMatchingProduction { position: 0, .. })
        ));
    }

    #[test]
    fn test_separated_minus_is_not_decrement() {
        // "- -x" is negation of a non-literal, which the grammar rejects
        let mut parser = Parser::new("- -x").unwrap();
        assert!(matches!(
            parser.parse_expression(),
            Err(ParseError::UnexpectedTokenKind {
                found: TokenKind::Minus,
                position: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_boolean_literals() {
        assert!(matches!(
            expression("true"),
            Expression::Literal(LiteralExpr::Boolean(BooleanLiteral { value: true }))
        ));
        assert!(matches!(
            expression("false"),
            Expression::Literal(LiteralExpr::Boolean(BooleanLiteral { value: false }))
        ));
        // only the exact spelling is reserved
        assert!(matches!(expression("trueish"), Expression::Literal(LiteralExpr::Symbol(_))));
    }

    #[test]
    fn test_boolean_literal_rejects_symbol() {
        let mut parser = Parser::new("x").unwrap();
        assert_eq!(
            parser.parse_boolean_literal(),
            Err(ParseError::UnexpectedTokenKind {
                expected: Expected::Production("boolean literal"),
                found: TokenKind::Symbol,
                position: 0
            })
        );
    }

    #[test]
    fn test_comparison_requires_number_operands() {
        let mut parser = Parser::new("5 < x").unwrap();
        assert!(matches!(
            parser.parse_comparison_expr(),
            Err(ParseError::UnexpectedTokenKind {
                expected: Expected::Kind(TokenKind::Numeric),
                found: TokenKind::Symbol,
                position: 4
            })
        ));
    }

    #[test]
    fn test_expression_at_end_of_input() {
        let mut parser = Parser::new("   ").unwrap();
        assert!(matches!(
            parser.parse_expression(),
            Err(ParseError::UnexpectedEndOfInput { position: 3, .. })
        ));
    }

    #[test]
    fn test_hand_built_numeric_token() {
        let token = Token {
            kind: TokenKind::Numeric,
            text: "42".to_string(),
            pos: 0,
            end: 2,
            number: None,
        };
        let mut parser = Parser::from_tokens(vec![token]);
        assert_eq!(parser.parse_numeric_literal().unwrap().value, 42);
    }
}
