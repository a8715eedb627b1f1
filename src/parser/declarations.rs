//! Declaration parsing implementation
//!
//! Fixed token sequences, each mismatch reported against the token the
//! sequence expected at that point:
//!
//! - Declaration: `name := expression.`
//! - Assignment: `name = expression.`
//! - Pragma: `` `name[number]` ``

use crate::parser::ast::*;
use crate::parser::expressions::boolean_value;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Expected, ParseError, Parser};

impl Parser {
    /// Parse symbol declaration: name := expression.
    pub fn parse_symbol_declaration(&mut self) -> Result<SymbolDeclaration, ParseError> {
        let identifier = self.parse_target()?;
        self.expect(TokenKind::Colon)?;
        self.expect(TokenKind::Equals)?;

        let init = self.parse_expression()?;
        self.consume_dot()?;

        Ok(SymbolDeclaration { identifier, init })
    }

    /// Parse symbol assignment: name = expression.
    pub fn parse_symbol_assignment(&mut self) -> Result<SymbolAssignment, ParseError> {
        let identifier = self.parse_target()?;
        self.expect(TokenKind::Equals)?;

        let value = self.parse_expression()?;
        self.consume_dot()?;

        Ok(SymbolAssignment { identifier, value })
    }

    /// Parse compiler directive: `name[argument]`
    pub fn parse_pragma(&mut self) -> Result<Pragma, ParseError> {
        self.expect(TokenKind::Backtick)?;
        let name = self.parse_symbol_literal()?.name;

        self.expect(TokenKind::BracketLeft)?;
        let argument = self.parse_numeric_literal()?;
        self.expect(TokenKind::BracketRight)?;

        self.expect(TokenKind::Backtick)?;

        Ok(Pragma { name, argument })
    }

    /// The symbol being declared or assigned; `true`/`false` are literals
    /// everywhere and never name a symbol.
    fn parse_target(&mut self) -> Result<SymbolLiteral, ParseError> {
        if boolean_value(self.peek()).is_some() {
            return Err(self.unexpected(Expected::Production("assignable symbol")));
        }
        self.parse_symbol_literal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pragma() {
        let mut parser = Parser::new("`optimize[3]`").unwrap();
        let pragma = parser.parse_pragma().unwrap();
        assert_eq!(pragma.name, "optimize");
        assert_eq!(pragma.argument.value, 3);
        assert!(parser.is_at_end());
    }

    #[test]
    fn test_pragma_missing_bracket() {
        let mut parser = Parser::new("`optimize 3]`").unwrap();
        assert_eq!(
            parser.parse_pragma().unwrap_err(),
            ParseError::UnexpectedTokenKind {
                expected: Expected::Kind(TokenKind::BracketLeft),
                found: TokenKind::Numeric,
                position: 10
            }
        );
    }

    #[test]
    fn test_declaration_needs_colon_equals() {
        let mut parser = Parser::new("x : 5.").unwrap();
        assert_eq!(
            parser.parse_symbol_declaration().unwrap_err(),
            ParseError::UnexpectedTokenKind {
                expected: Expected::Kind(TokenKind::Equals),
                found: TokenKind::Numeric,
                position: 4
            }
        );
    }

    #[test]
    fn test_boolean_words_are_not_targets() {
        let expected = ParseError::UnexpectedTokenKind {
            expected: Expected::Production("assignable symbol"),
            found: TokenKind::Symbol,
            position: 0,
        };

        let mut parser = Parser::new("true := 5.").unwrap();
        assert_eq!(parser.parse_symbol_declaration().unwrap_err(), expected);

        let mut parser = Parser::new("false = 1.").unwrap();
        assert_eq!(parser.parse_symbol_assignment().unwrap_err(), expected);

        // still readable as a value on the right-hand side
        let mut parser = Parser::new("ok = true.").unwrap();
        assert_eq!(parser.parse_symbol_assignment().unwrap().to_string(), "ok = true.");
    }

    #[test]
    fn test_assignment_missing_dot() {
        let mut parser = Parser::new("x = 7 y").unwrap();
        assert!(matches!(
            parser.parse_symbol_assignment(),
            Err(ParseError::UnexpectedTokenKind {
                expected: Expected::Kind(TokenKind::Dot),
                found: TokenKind::Symbol,
                position: 6
            })
        ));
    }
}
