//! Statement parsing implementation
//!
//! A statement is chosen by the token after its leading symbol: `:` starts a
//! declaration, `=` an assignment. A leading backtick starts a pragma. Blocks
//! repeat statements until end of input; the first error ends the block.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Expected, ParseError, Parser};

impl Parser {
    /// Parse the entire program
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let body = self.parse_block()?;
        Ok(Program { body })
    }

    /// Parse statements until end of input
    pub fn parse_block(&mut self) -> Result<Block, ParseError> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(Block { statements })
    }

    /// Parse a statement
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let first = self.peek();
        let (kind, position) = (first.kind, first.pos);
        let next = self.look_ahead(1).kind;

        match kind {
            TokenKind::Backtick => Ok(Statement::Pragma(self.parse_pragma()?)),
            TokenKind::Symbol => match next {
                TokenKind::Colon => Ok(Statement::Declaration(self.parse_symbol_declaration()?)),
                TokenKind::Equals => Ok(Statement::Assignment(self.parse_symbol_assignment()?)),
                _ => Err(ParseError::NoMatchingProduction {
                    production: "statement",
                    position,
                }),
            },
            TokenKind::Eof => Err(self.unexpected(Expected::Production("statement"))),
            _ => Err(ParseError::NoMatchingProduction {
                production: "statement",
                position,
            }),
        }
    }
}
