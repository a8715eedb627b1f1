//! # Introduction
//!
//! Clita is the front end of a small programming language: a tokenizer that
//! turns source text into typed tokens, and a recursive-descent parser that
//! builds an abstract syntax tree from them.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST
//! ```
//!
//! 1. [`parser::lexer`] — scans the source into [`Token`]s with byte spans.
//! 2. [`parser::parse`] — holds the token buffer and cursor, and runs one of
//!    the grammar's [`Production`]s as the entry point.
//! 3. [`parser::ast`] — the closed set of [`Node`] variants.
//!
//! ## Example
//!
//! ```
//! use clita::{parse, Node, Production};
//!
//! let node = parse("x := 20 + 5.", Production::Statement).unwrap();
//! assert!(matches!(node, Node::SymbolDeclaration(_)));
//! assert_eq!(node.to_string(), "x := (20 + 5).");
//! ```

pub mod parser;

pub use parser::ast::{Node, NodeKind, SourceLocation};
pub use parser::config::ParserConfig;
pub use parser::lexer::{LexError, Lexer, Token, TokenKind};
pub use parser::parse::{parse, parse_with_config, tokenize, Expected, ParseError, Parser, Production};
