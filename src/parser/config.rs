//! Front-end configuration
//!
//! The language core reserves no words of its own. Callers that want
//! keyword tokens register them here and hand the config to
//! [`Lexer::with_config`](super::lexer::Lexer::with_config) or
//! [`Parser::with_config`](super::parse::Parser::with_config).

use rustc_hash::FxHashSet;

/// How many binary operators may nest to the right of one another
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone)]
pub struct ParserConfig {
    reserved_words: FxHashSet<String>,
    max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            reserved_words: FxHashSet::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit expression nesting; deeper input fails with `NestingTooDeep`.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Add reserved words; symbols spelled with one of them lex as `Keyword`.
    pub fn with_reserved_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_words.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn is_reserved(&self, word: &str) -> bool {
        self.reserved_words.contains(word)
    }

    pub fn reserved_words(&self) -> impl Iterator<Item = &str> {
        self.reserved_words.iter().map(String::as_str)
    }
}
