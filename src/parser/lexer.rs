//! Lexer (tokenizer) for Clita source code
//!
//! Scans the source left to right, one token per call, and records each
//! token's half-open byte span so diagnostics can point back into the
//! source. Punctuation is resolved through a fixed single-character table;
//! `>=` and `<=` are the only two-character tokens.

use super::config::ParserConfig;
use std::fmt;

/// Token kinds produced by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    Numeric,
    Symbol,
    Keyword,

    // Punctuation
    Colon,        // :
    Dot,          // .
    BracketLeft,  // [
    BracketRight, // ]
    Backtick,     // `
    Underscore,   // _
    Quote,        // '
    DblQuote,     // "

    // Comparison
    Gt, // >
    Lt, // <
    Ge, // >=
    Le, // <=

    // Arithmetic
    Plus,     // +
    Minus,    // -
    Times,    // *
    Division, // /

    Equals, // =
}

impl TokenKind {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            TokenKind::Lt | TokenKind::Le | TokenKind::Gt | TokenKind::Ge | TokenKind::Equals
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Eof => "End of file",
            TokenKind::Numeric => "Numeric",
            TokenKind::Symbol => "Symbol",
            TokenKind::Keyword => "Keyword",
            TokenKind::Colon => "Colon",
            TokenKind::Dot => "Dot",
            TokenKind::BracketLeft => "Bracket left",
            TokenKind::BracketRight => "Bracket right",
            TokenKind::Backtick => "Backtick",
            TokenKind::Underscore => "Underscore",
            TokenKind::Quote => "Quote",
            TokenKind::DblQuote => "Double quote",
            TokenKind::Gt => "Greater than",
            TokenKind::Lt => "Lesser than",
            TokenKind::Ge => "Greater than or Equal",
            TokenKind::Le => "Lesser than or Equal",
            TokenKind::Plus => "Plus",
            TokenKind::Minus => "Minus",
            TokenKind::Times => "Times",
            TokenKind::Division => "Division",
            TokenKind::Equals => "Equals",
        };
        f.write_str(name)
    }
}

/// Single-character punctuation, in lookup order
const PUNCTUATION: [(char, TokenKind); 15] = [
    (':', TokenKind::Colon),
    ('.', TokenKind::Dot),
    ('[', TokenKind::BracketLeft),
    (']', TokenKind::BracketRight),
    ('`', TokenKind::Backtick),
    ('_', TokenKind::Underscore),
    ('>', TokenKind::Gt),
    ('<', TokenKind::Lt),
    ('+', TokenKind::Plus),
    ('-', TokenKind::Minus),
    ('*', TokenKind::Times),
    ('/', TokenKind::Division),
    ('\'', TokenKind::Quote),
    ('"', TokenKind::DblQuote),
    ('=', TokenKind::Equals),
];

/// Look up a character in the punctuation table.
pub fn punctuation_kind(ch: char) -> Option<TokenKind> {
    PUNCTUATION
        .iter()
        .find(|(c, _)| *c == ch)
        .map(|(_, kind)| *kind)
}

/// A scanned token. `text == source[pos..end]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub pos: usize,
    pub end: usize,
    /// Parsed value, present only on `Numeric` tokens
    pub number: Option<i64>,
}

impl Token {
    fn spanning(kind: TokenKind, source: &str, pos: usize, end: usize) -> Self {
        Token {
            kind,
            text: source[pos..end].to_string(),
            pos,
            end,
            number: None,
        }
    }

    pub fn eof(position: usize) -> Self {
        Token {
            kind: TokenKind::Eof,
            text: String::new(),
            pos: position,
            end: position,
            number: None,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = ({})", self.text, self.kind)
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// No token rule starts with this character
    UnknownCharacter { character: char, position: usize },
    /// Digit run does not fit in an `i64`
    IntegerOverflow { text: String, position: usize },
}

impl LexError {
    pub fn position(&self) -> usize {
        match self {
            LexError::UnknownCharacter { position, .. } | LexError::IntegerOverflow { position, .. } => {
                *position
            }
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnknownCharacter { character, position } => write!(
                f,
                "Lexer error at offset {}: Unknown character: {:?}",
                position, character
            ),
            LexError::IntegerOverflow { text, position } => write!(
                f,
                "Lexer error at offset {}: Integer literal {} is out of range",
                position, text
            ),
        }
    }
}

impl std::error::Error for LexError {}

/// Lexer for Clita source code
pub struct Lexer<'a> {
    source: &'a str,
    position: usize,
    config: Option<&'a ParserConfig>,
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer with no reserved words.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            config: None,
            finished: false,
        }
    }

    /// Create a lexer that classifies the config's reserved words as keywords.
    pub fn with_config(source: &'a str, config: &'a ParserConfig) -> Self {
        Self {
            config: Some(config),
            ..Self::new(source)
        }
    }

    /// Current byte offset into the source
    pub fn position(&self) -> usize {
        self.position
    }

    /// Tokenize the entire input, end-of-input token included
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let done = token.is_eof();
            tokens.push(token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }

    /// Scan the next token. Once the input is exhausted every call yields
    /// an end-of-input token at the source length.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let Some(ch) = self.peek() else {
            return Ok(Token::eof(self.position));
        };

        if is_symbol_start(ch) {
            return Ok(self.scan_symbol());
        }

        if ch.is_ascii_punctuation() {
            return self.scan_punctuation(ch);
        }

        if ch.is_ascii_digit() {
            return self.scan_numeric();
        }

        Err(LexError::UnknownCharacter {
            character: ch,
            position: self.position,
        })
    }

    /// Identifier: letter or `_`, then letters, digits and underscores
    fn scan_symbol(&mut self) -> Token {
        let begin = self.position;
        while self.peek().is_some_and(is_symbol_part) {
            self.advance();
        }

        let text = &self.source[begin..self.position];
        let kind = match self.config {
            Some(config) if config.is_reserved(text) => TokenKind::Keyword,
            _ => TokenKind::Symbol,
        };
        Token::spanning(kind, self.source, begin, self.position)
    }

    /// Unsigned decimal integer, bounded to `i64`
    fn scan_numeric(&mut self) -> Result<Token, LexError> {
        let begin = self.position;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        let mut token = Token::spanning(TokenKind::Numeric, self.source, begin, self.position);
        let value = token.text.parse::<i64>().map_err(|_| LexError::IntegerOverflow {
            text: token.text.clone(),
            position: begin,
        })?;
        token.number = Some(value);
        Ok(token)
    }

    fn scan_punctuation(&mut self, ch: char) -> Result<Token, LexError> {
        let begin = self.position;
        let kind = punctuation_kind(ch).ok_or(LexError::UnknownCharacter {
            character: ch,
            position: begin,
        })?;
        self.advance();

        let kind = match kind {
            TokenKind::Gt if self.peek() == Some('=') => {
                self.advance();
                TokenKind::Ge
            }
            TokenKind::Lt if self.peek() == Some('=') => {
                self.advance();
                TokenKind::Le
            }
            other => other,
        };

        Ok(Token::spanning(kind, self.source, begin, self.position))
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c') = self.peek() {
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.source.get(self.position..)?.chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.peek() {
            self.position += ch.len_utf8();
        }
    }
}

/// Yields each token once, ending after the end-of-input token or the
/// first error.
impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        if !matches!(result, Ok(ref token) if !token.is_eof()) {
            self.finished = true;
        }
        Some(result)
    }
}

/// Scan one token of `source` starting at byte offset `position`, returning
/// the token and the offset to resume from. An offset inside a multi-byte
/// character starts from that character.
pub fn next_token(source: &str, position: usize) -> Result<(Token, usize), LexError> {
    let mut start = position.min(source.len());
    while !source.is_char_boundary(start) {
        start -= 1;
    }

    let mut lexer = Lexer::new(source);
    lexer.position = start;
    let token = lexer.next_token()?;
    Ok((token, lexer.position))
}

fn is_symbol_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_symbol_part(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        let mut lexer = Lexer::new("x := 20 + 5.");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0].kind, TokenKind::Symbol) && tokens[0].text == "x");
        assert!(matches!(tokens[1].kind, TokenKind::Colon));
        assert!(matches!(tokens[2].kind, TokenKind::Equals));
        assert_eq!(tokens[3].number, Some(20));
        assert!(matches!(tokens[4].kind, TokenKind::Plus));
        assert_eq!(tokens[5].number, Some(5));
        assert!(matches!(tokens[6].kind, TokenKind::Dot));
        assert!(tokens[7].is_eof());
        assert_eq!(tokens.len(), 8);
    }

    #[test]
    fn test_comparison_operators() {
        assert_eq!(
            kinds(">= <= > < ="),
            vec![
                TokenKind::Ge,
                TokenKind::Le,
                TokenKind::Gt,
                TokenKind::Lt,
                TokenKind::Equals,
                TokenKind::Eof
            ]
        );
        assert_eq!(kinds("> ="), vec![TokenKind::Gt, TokenKind::Equals, TokenKind::Eof]);
        assert_eq!(kinds("=>"), vec![TokenKind::Equals, TokenKind::Gt, TokenKind::Eof]);
    }

    #[test]
    fn test_punctuation_table() {
        assert_eq!(
            kinds("`[]'\"*/-"),
            vec![
                TokenKind::Backtick,
                TokenKind::BracketLeft,
                TokenKind::BracketRight,
                TokenKind::Quote,
                TokenKind::DblQuote,
                TokenKind::Times,
                TokenKind::Division,
                TokenKind::Minus,
                TokenKind::Eof
            ]
        );
        assert_eq!(punctuation_kind('_'), Some(TokenKind::Underscore));
        assert_eq!(punctuation_kind('@'), None);
    }

    #[test]
    fn test_underscore_starts_symbol() {
        let tokens = Lexer::new("_ _tmp1").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Symbol);
        assert_eq!(tokens[0].text, "_");
        assert_eq!(tokens[1].kind, TokenKind::Symbol);
        assert_eq!(tokens[1].text, "_tmp1");
    }

    #[test]
    fn test_unknown_punctuation() {
        let err = Lexer::new("x ( y").tokenize().unwrap_err();
        assert_eq!(
            err,
            LexError::UnknownCharacter {
                character: '(',
                position: 2
            }
        );
    }

    #[test]
    fn test_non_ascii_character() {
        let err = Lexer::new("x é").tokenize().unwrap_err();
        assert!(matches!(err, LexError::UnknownCharacter { character: 'é', position: 2 }));
    }

    #[test]
    fn test_integer_overflow() {
        let err = Lexer::new("99999999999999999999").tokenize().unwrap_err();
        assert!(matches!(err, LexError::IntegerOverflow { position: 0, .. }));

        let max = i64::MAX.to_string();
        let tokens = Lexer::new(&max).tokenize().unwrap();
        assert_eq!(tokens[0].number, Some(i64::MAX));
    }

    #[test]
    fn test_leading_zeros() {
        let tokens = Lexer::new("007").tokenize().unwrap();
        assert_eq!(tokens[0].text, "007");
        assert_eq!(tokens[0].number, Some(7));
    }

    #[test]
    fn test_reserved_words() {
        let config = ParserConfig::new().with_reserved_words(["let"]);
        let tokens = Lexer::with_config("let x", &config).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[1].kind, TokenKind::Symbol);
    }

    #[test]
    fn test_next_token_resumes() {
        let source = "a >= 1";
        let (first, pos) = next_token(source, 0).unwrap();
        assert_eq!(first.text, "a");
        let (second, pos) = next_token(source, pos).unwrap();
        assert_eq!((second.kind, second.pos, second.end), (TokenKind::Ge, 2, 4));
        let (third, pos) = next_token(source, pos).unwrap();
        assert_eq!(third.number, Some(1));
        let (eof, _) = next_token(source, pos).unwrap();
        assert_eq!((eof.kind, eof.pos, eof.end), (TokenKind::Eof, 6, 6));
    }

    #[test]
    fn test_next_token_inside_multibyte_char() {
        let err = next_token("é1", 1).unwrap_err();
        assert_eq!(
            err,
            LexError::UnknownCharacter {
                character: 'é',
                position: 0
            }
        );

        let err = next_token("x é", 3).unwrap_err();
        assert_eq!(err.position(), 2);

        let (token, pos) = next_token("ab", 99).unwrap();
        assert_eq!((token.kind, token.pos, pos), (TokenKind::Eof, 2, 2));
    }

    #[test]
    fn test_iterator_stops_after_eof() {
        let items: Vec<_> = Lexer::new("1 2").collect();
        assert_eq!(items.len(), 3);
        assert!(items[2].as_ref().unwrap().is_eof());

        let items: Vec<_> = Lexer::new("1 @ 2").collect();
        assert_eq!(items.len(), 2);
        assert!(items[1].is_err());
    }

    #[test]
    fn test_token_display() {
        let tokens = Lexer::new("<=").tokenize().unwrap();
        assert_eq!(tokens[0].to_string(), "<= = (Lesser than or Equal)");
    }
}
