//! SQL lexer for tokenizing dump input.
//!
//! The lexer never interprets literals: every token keeps the exact slice of
//! input it was read from, so spans can be written back verbatim.

use alloc::vec::Vec;

use crate::dialect::Dialect;

/// A token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token<'a> {
    /// The kind of token.
    pub kind: TokenKind,
    /// The literal text of the token, borrowed from the input.
    pub text: &'a str,
    /// The byte position in the input where this token starts.
    pub pos: usize,
}

/// The different kinds of tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TokenKind {
    /// A reserved word such as `CREATE` or `PRIMARY`.
    Keyword,
    /// An unquoted identifier.
    Identifier,
    /// An identifier wrapped in backticks, brackets or double quotes.
    QuotedIdentifier,
    /// A string literal, including any `N`/`E`/`X`/`B` prefix.
    String,
    /// A numeric literal.
    Number,
    /// Parentheses, commas, operators and any other symbol.
    Punctuation,
    /// A line or block comment.
    Comment,
    /// A run of whitespace.
    Whitespace,
}

impl TokenKind {
    /// Whether tokens of this kind take part in parsing.
    #[must_use]
    pub fn is_significant(self) -> bool {
        !matches!(self, TokenKind::Comment | TokenKind::Whitespace)
    }

    /// Whether tokens of this kind can name a table, column or constraint.
    #[must_use]
    pub fn is_word(self) -> bool {
        matches!(
            self,
            TokenKind::Keyword | TokenKind::Identifier | TokenKind::QuotedIdentifier
        )
    }
}

impl<'a> Token<'a> {
    /// Whether this token has the given kind and text.
    ///
    /// Keywords compare case-insensitively, everything else exactly.
    #[must_use]
    pub fn matches(&self, kind: TokenKind, text: &str) -> bool {
        if self.kind != kind {
            return false;
        }
        match kind {
            TokenKind::Keyword => self.text.eq_ignore_ascii_case(text),
            _ => self.text == text,
        }
    }

    /// Whether this token is the given keyword.
    #[must_use]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.matches(TokenKind::Keyword, keyword)
    }

    /// Whether this token is the given punctuation.
    #[must_use]
    pub fn is_punct(&self, punct: &str) -> bool {
        self.matches(TokenKind::Punctuation, punct)
    }

    /// Byte position just past the end of the token.
    #[must_use]
    pub fn end(&self) -> usize {
        self.pos + self.text.len()
    }
}

/// Reserved words recognised as [`TokenKind::Keyword`], sorted for binary search.
const KEYWORDS: &[&str] = &[
    "ACTION", "ALTER", "AND", "AS", "ASC", "BEGIN", "BY", "CASCADE", "CHECK", "COLLATE",
    "COMMIT", "CONSTRAINT", "CREATE", "DEFAULT", "DELETE", "DESC", "DROP", "EXISTS", "FOREIGN",
    "FROM", "FULLTEXT", "GRANT", "IF", "IGNORE", "IN", "INDEX", "INSERT", "INTO", "IS", "KEY",
    "LOCK", "NO", "NOT", "NULL", "ON", "OR", "PRECISION", "PRIMARY", "REFERENCES", "REPLACE",
    "RESTRICT", "ROLLBACK", "SELECT", "SET", "SPATIAL", "TABLE", "TEMP", "TEMPORARY", "UNIQUE",
    "UNLOCK", "UPDATE", "USE", "USING", "VALUES", "VARYING", "VIEW", "WHERE", "WITH",
];

fn is_keyword(word: &str) -> bool {
    KEYWORDS
        .binary_search_by(|candidate| {
            candidate
                .bytes()
                .map(|b| b.to_ascii_uppercase())
                .cmp(word.bytes().map(|b| b.to_ascii_uppercase()))
        })
        .is_ok()
}

/// SQL lexer that produces tokens from input.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    dialect: Option<Dialect>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    ///
    /// The dialect enables accommodations such as MySQL `#` comments; `None`
    /// lexes in a dialect-agnostic, best-effort mode.
    #[must_use]
    pub fn new(input: &'a str, dialect: Option<Dialect>) -> Self {
        Self {
            input,
            pos: 0,
            dialect,
        }
    }

    /// Get the current position in the input.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    fn backslash_escapes(&self) -> bool {
        matches!(self.dialect, None | Some(Dialect::MySql))
    }

    fn token(&mut self, kind: TokenKind, start: usize, end: usize) -> Token<'a> {
        self.pos = end;
        Token {
            kind,
            text: &self.input[start..end],
            pos: start,
        }
    }

    /// Consume and return the next token, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns an error on an unterminated string literal or quoted identifier.
    pub fn next_token(&mut self) -> Result<Option<Token<'a>>, LexerError> {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        let Some(&b) = bytes.get(start) else {
            return Ok(None);
        };
        let next = bytes.get(start + 1).copied();

        let token = match b {
            _ if b.is_ascii_whitespace() => {
                let end = scan_while(bytes, start, |c| c.is_ascii_whitespace());
                self.token(TokenKind::Whitespace, start, end)
            }
            b'-' if next == Some(b'-') => self.line_comment(start),
            b'#' if self.dialect == Some(Dialect::MySql) => self.line_comment(start),
            b'/' if next == Some(b'*') => {
                // Unterminated block comments run to the end of input.
                let end = self.input[start + 2..]
                    .find("*/")
                    .map_or(bytes.len(), |offset| start + 2 + offset + 2);
                self.token(TokenKind::Comment, start, end)
            }
            b'\'' => self.read_string(start, start)?,
            b'N' | b'n' | b'E' | b'e' | b'X' | b'x' | b'B' | b'b' if next == Some(b'\'') => {
                self.read_string(start, start + 1)?
            }
            b'`' => self.read_quoted(start, b'`')?,
            b'"' => self.read_quoted(start, b'"')?,
            b'[' => self.read_quoted(start, b']')?,
            b'0' if matches!(next, Some(b'x' | b'X')) => {
                let end = scan_while(bytes, start + 2, |c| c.is_ascii_hexdigit());
                self.token(TokenKind::Number, start, end)
            }
            _ if b.is_ascii_digit() => self.read_number(start),
            b'.' if next.is_some_and(|c| c.is_ascii_digit()) => self.read_number(start),
            _ if is_ident_start(b) => {
                let end = scan_while(bytes, start, is_ident_cont);
                let word = &self.input[start..end];
                let kind = if is_keyword(word) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Identifier
                };
                self.token(kind, start, end)
            }
            _ => {
                let two = &self.input.as_bytes()[start..(start + 2).min(bytes.len())];
                let len = if matches!(two, b"::" | b"<=" | b">=" | b"<>" | b"!=" | b"||") {
                    2
                } else {
                    // Non-ASCII symbols still form a single character token.
                    self.input[start..].chars().next().map_or(1, char::len_utf8)
                };
                self.token(TokenKind::Punctuation, start, start + len)
            }
        };

        Ok(Some(token))
    }

    fn line_comment(&mut self, start: usize) -> Token<'a> {
        let end = scan_while(self.input.as_bytes(), start, |c| c != b'\n');
        self.token(TokenKind::Comment, start, end)
    }

    /// Read a single-quoted string whose opening quote is at `quote`.
    fn read_string(&mut self, start: usize, quote: usize) -> Result<Token<'a>, LexerError> {
        let bytes = self.input.as_bytes();
        let mut i = quote + 1;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' if self.backslash_escapes() => i += 2,
                b'\'' if bytes.get(i + 1) == Some(&b'\'') => i += 2,
                b'\'' => return Ok(self.token(TokenKind::String, start, i + 1)),
                _ => i += 1,
            }
        }
        Err(LexerError::UnterminatedString { pos: start })
    }

    /// Read a quoted identifier; a doubled closing delimiter is an escape.
    fn read_quoted(&mut self, start: usize, close: u8) -> Result<Token<'a>, LexerError> {
        let bytes = self.input.as_bytes();
        let mut i = start + 1;
        while i < bytes.len() {
            if bytes[i] == close {
                if bytes.get(i + 1) == Some(&close) {
                    i += 2;
                    continue;
                }
                return Ok(self.token(TokenKind::QuotedIdentifier, start, i + 1));
            }
            i += 1;
        }
        Err(LexerError::UnterminatedIdentifier { pos: start })
    }

    fn read_number(&mut self, start: usize) -> Token<'a> {
        let bytes = self.input.as_bytes();
        let mut end = scan_while(bytes, start, |c| c.is_ascii_digit());

        if bytes.get(end) == Some(&b'.') {
            end = scan_while(bytes, end + 1, |c| c.is_ascii_digit());
        }

        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp = end + 1;
            if matches!(bytes.get(exp), Some(b'+' | b'-')) {
                exp += 1;
            }
            // Only an exponent when digits follow, otherwise `e` starts a word.
            if bytes.get(exp).is_some_and(u8::is_ascii_digit) {
                end = scan_while(bytes, exp, |c| c.is_ascii_digit());
            }
        }

        self.token(TokenKind::Number, start, end)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, LexerError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

fn scan_while(bytes: &[u8], from: usize, pred: impl Fn(u8) -> bool) -> usize {
    let mut i = from;
    while i < bytes.len() && pred(bytes[i]) {
        i += 1;
    }
    i
}

/// Check if a byte can start an identifier.
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'@' || !b.is_ascii()
}

/// Check if a byte can continue an identifier.
fn is_ident_cont(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b == b'@' || !b.is_ascii()
}

/// Splits input into statements of significant tokens.
///
/// Statements end at a `;` terminator; the terminator, whitespace and
/// comments are not part of the yielded token list. Empty statements are
/// skipped. Lexing is lazy, so a lexer error is only reported once the
/// statement containing it is reached, after which the iterator is exhausted.
pub struct Statements<'a> {
    lexer: Lexer<'a>,
    index: usize,
    failed: bool,
}

impl<'a> Statements<'a> {
    /// Create a statement splitter over the given input.
    #[must_use]
    pub fn new(input: &'a str, dialect: Option<Dialect>) -> Self {
        Self {
            lexer: Lexer::new(input, dialect),
            index: 0,
            failed: false,
        }
    }
}

impl<'a> Iterator for Statements<'a> {
    /// The 1-based statement ordinal and its tokens.
    type Item = (usize, Result<Vec<Token<'a>>, LexerError>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let mut tokens = Vec::new();
        loop {
            match self.lexer.next_token() {
                Ok(Some(token)) if token.is_punct(";") => {
                    if !tokens.is_empty() {
                        break;
                    }
                }
                Ok(Some(token)) => {
                    if token.kind.is_significant() {
                        tokens.push(token);
                    }
                }
                Ok(None) if tokens.is_empty() => return None,
                Ok(None) => break,
                Err(err) => {
                    self.failed = true;
                    self.index += 1;
                    return Some((self.index, Err(err)));
                }
            }
        }
        self.index += 1;
        Some((self.index, Ok(tokens)))
    }
}

/// Convenience: all significant tokens of the input.
///
/// # Errors
///
/// Returns the first lexer error encountered.
pub fn tokenize(input: &str, dialect: Option<Dialect>) -> Result<Vec<Token<'_>>, LexerError> {
    Lexer::new(input, dialect)
        .filter(|token| token.as_ref().map_or(true, |t| t.kind.is_significant()))
        .collect()
}

/// Errors that can occur during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    /// Unterminated string literal.
    #[error("Unterminated string literal starting at position {pos}")]
    UnterminatedString {
        /// Position where the string started.
        pos: usize,
    },
    /// Unterminated quoted identifier.
    #[error("Unterminated quoted identifier starting at position {pos}")]
    UnterminatedIdentifier {
        /// Position where the identifier started.
        pos: usize,
    },
}
