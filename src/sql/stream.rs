//! Primitive matchers over a slice of significant tokens.
//!
//! All helpers take an index into an immutable token slice and never panic on
//! out-of-range indices: a position past the end simply matches nothing.

use alloc::vec::Vec;
use core::fmt::{self, Display};

use super::lexer::{Token, TokenKind};
use super::parser::ParseError;

/// Whether the token at `index` has the given kind and text.
#[must_use]
pub fn matches(tokens: &[Token<'_>], index: usize, kind: TokenKind, text: &str) -> bool {
    tokens
        .get(index)
        .is_some_and(|token| token.matches(kind, text))
}

/// Advance past the token at `index` if it matches, otherwise stay put.
#[must_use]
pub fn consume_if_matches(tokens: &[Token<'_>], index: usize, kind: TokenKind, text: &str) -> usize {
    if matches(tokens, index, kind, text) {
        index + 1
    } else {
        index
    }
}

/// Scan forward from `index` for a matching token.
///
/// Returns the index one past the first match, or `index` itself when the
/// slice is exhausted without a match.
#[must_use]
pub fn advance_until_matches(
    tokens: &[Token<'_>],
    index: usize,
    kind: TokenKind,
    text: &str,
) -> usize {
    tokens
        .iter()
        .enumerate()
        .skip(index)
        .find(|(_, token)| token.matches(kind, text))
        .map_or(index, |(i, _)| i + 1)
}

/// Whether every expected `(kind, text)` pair matches, in order, from `index`.
#[must_use]
pub fn matches_prefix(tokens: &[Token<'_>], index: usize, expected: &[(TokenKind, &str)]) -> bool {
    expected
        .iter()
        .enumerate()
        .all(|(offset, &(kind, text))| matches(tokens, index + offset, kind, text))
}

/// Whether the keywords match, in order, from `index`.
#[must_use]
pub fn matches_keywords(tokens: &[Token<'_>], index: usize, keywords: &[&str]) -> bool {
    keywords
        .iter()
        .enumerate()
        .all(|(offset, keyword)| matches(tokens, index + offset, TokenKind::Keyword, keyword))
}

/// Split the parenthesized list opened at `open` into its comma-separated groups.
///
/// Commas nested in inner parentheses do not split. Returns the groups as
/// sub-slices of `tokens` (possibly empty) and the index just past the
/// closing parenthesis.
///
/// # Errors
///
/// Returns [`ParseError::Syntax`] if `tokens[open]` is not `(`, and
/// [`ParseError::MalformedParentheses`] if the list never closes.
pub fn extract_parenthesized_groups<'s, 'a>(
    tokens: &'s [Token<'a>],
    open: usize,
) -> Result<(Vec<&'s [Token<'a>]>, usize), ParseError> {
    if !matches(tokens, open, TokenKind::Punctuation, "(") {
        return Err(ParseError::syntax(tokens, open, "`(`"));
    }

    let mut groups = Vec::new();
    let mut depth = 1usize;
    let mut group_start = open + 1;

    for (i, token) in tokens.iter().enumerate().skip(open + 1) {
        if token.kind != TokenKind::Punctuation {
            continue;
        }
        match token.text {
            "(" => depth += 1,
            ")" => {
                depth -= 1;
                if depth == 0 {
                    groups.push(&tokens[group_start..i]);
                    return Ok((groups, i + 1));
                }
            }
            "," if depth == 1 => {
                groups.push(&tokens[group_start..i]);
                group_start = i + 1;
            }
            _ => {}
        }
    }

    Err(ParseError::MalformedParentheses {
        pos: tokens[open].pos,
    })
}

/// Index just past the parenthesized list opened at `open`.
///
/// # Errors
///
/// Same conditions as [`extract_parenthesized_groups`].
pub fn skip_parenthesized(tokens: &[Token<'_>], open: usize) -> Result<usize, ParseError> {
    extract_parenthesized_groups(tokens, open).map(|(_, next)| next)
}

/// A contiguous run of tokens kept as an opaque unit, such as an expression.
///
/// Displaying a span writes the tokens' literal text back in order, with a
/// single space wherever the source had whitespace or a comment between them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TokenSpan<'a> {
    tokens: Vec<Token<'a>>,
}

impl<'a> TokenSpan<'a> {
    /// The tokens of the span.
    #[must_use]
    pub fn tokens(&self) -> &[Token<'a>] {
        &self.tokens
    }

    /// Whether the span holds no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of tokens in the span.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Append tokens to the span.
    pub fn extend_from_slice(&mut self, tokens: &[Token<'a>]) {
        self.tokens.extend_from_slice(tokens);
    }
}

impl<'a> From<&[Token<'a>]> for TokenSpan<'a> {
    fn from(tokens: &[Token<'a>]) -> Self {
        Self {
            tokens: tokens.to_vec(),
        }
    }
}

impl Display for TokenSpan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tokens(f, &self.tokens)
    }
}

/// Write tokens back as text, separating them where the source had a gap.
pub(crate) fn write_tokens(f: &mut impl fmt::Write, tokens: &[Token<'_>]) -> fmt::Result {
    let mut previous_end = None;
    for token in tokens {
        if previous_end.is_some_and(|end| token.pos > end) {
            f.write_char(' ')?;
        }
        f.write_str(token.text)?;
        previous_end = Some(token.end());
    }
    Ok(())
}
