//! Clita source code front end
//!
//! This module transforms Clita source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parser state, errors and entry points (tokens → AST)
//! - [`ast`]: AST node definitions
//! - [`config`]: Reserved-word configuration
//!
//! # Grammar
//!
//! ```text
//! block              := statement*
//! statement          := symbol_declaration | symbol_assignment | pragma
//! symbol_declaration := SYMBOL ':' '=' expression '.'
//! symbol_assignment  := SYMBOL '=' expression '.'
//! pragma             := '`' SYMBOL '[' NUMERIC ']' '`'
//! expression         := binary_expr | comparison_expr | unary_expr | literal_expr
//! binary_expr        := literal_expr ('+' | '-' | '*' | '/') expression
//! comparison_expr    := NUMERIC ('<' | '<=' | '>' | '>=' | '=') NUMERIC
//! unary_expr         := ('-' | '--' | '++') literal_expr
//! literal_expr       := NUMERIC | SYMBOL | 'true' | 'false'
//! ```
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with bounded lookahead and no
//! backtracking. No error recovery: the first error is returned to the caller.

pub mod ast;
pub mod config;
pub mod lexer;
pub mod parse;

mod declarations;
mod expressions;
mod statements;
