//! Statement classification and the helpers shared by the statement parsers.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use super::ast::{InsertStmt, QualifiedName, TableDef};
use super::lexer::{LexerError, Statements, Token, TokenKind};
use super::stream::{
    TokenSpan, extract_parenthesized_groups, matches, matches_keywords, write_tokens,
};
use crate::dialect::Dialect;
use crate::identifier::unquote;

/// The statement shapes the converter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// `CREATE [TEMPORARY] TABLE ...`
    CreateTable,
    /// `INSERT ...`
    Insert,
    /// Anything else; ignored.
    Other,
}

/// A parsed statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Statement<'a> {
    /// `CREATE TABLE` statement.
    CreateTable(TableDef<'a>),
    /// `INSERT` statement.
    Insert(InsertStmt<'a>),
}

/// SQL parser errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Lexer error.
    #[error("Lexer error: {0}")]
    Lexer(#[from] LexerError),
    /// The tokens do not have the shape expected at this step.
    #[error("Syntax error at position {pos}: expected {expected}, found {found}")]
    Syntax {
        /// What was expected.
        expected: &'static str,
        /// The offending tokens, or `end of statement`.
        found: String,
        /// Position in input.
        pos: usize,
    },
    /// A parenthesis is never closed before the statement ends.
    #[error("Parentheses do not match: `(` at position {pos} is never closed")]
    MalformedParentheses {
        /// Position of the unclosed parenthesis.
        pos: usize,
    },
}

impl ParseError {
    /// A syntax error at `tokens[index]`, or at the end of the statement.
    pub(crate) fn syntax(tokens: &[Token<'_>], index: usize, expected: &'static str) -> Self {
        match tokens.get(index) {
            Some(token) => ParseError::Syntax {
                expected,
                found: format!("`{}`", token.text),
                pos: token.pos,
            },
            None => ParseError::Syntax {
                expected,
                found: "end of statement".into(),
                pos: tokens.last().map_or(0, Token::end),
            },
        }
    }

    /// A syntax error covering a whole span, such as an entry of a list.
    pub(crate) fn syntax_span(span: &[Token<'_>], at: usize, expected: &'static str) -> Self {
        if span.is_empty() {
            return ParseError::Syntax {
                expected,
                found: "an empty list element".into(),
                pos: at,
            };
        }
        let mut found = String::from("`");
        // Writing into a String cannot fail.
        let _ = write_tokens(&mut found, span);
        found.push('`');
        ParseError::Syntax {
            expected,
            found,
            pos: span[0].pos,
        }
    }
}

/// Decide which parser, if any, applies to a statement.
#[must_use]
pub fn classify(tokens: &[Token<'_>]) -> StatementKind {
    if matches_keywords(tokens, 0, &["CREATE", "TABLE"])
        || matches_keywords(tokens, 0, &["CREATE", "TEMPORARY", "TABLE"])
        || matches_keywords(tokens, 0, &["CREATE", "TEMP", "TABLE"])
    {
        StatementKind::CreateTable
    } else if matches(tokens, 0, TokenKind::Keyword, "INSERT") {
        StatementKind::Insert
    } else {
        StatementKind::Other
    }
}

/// Parse one statement's significant tokens.
///
/// Returns `Ok(None)` for statements other than `CREATE TABLE` and `INSERT`.
///
/// # Errors
///
/// Returns an error if a recognised statement is malformed.
pub fn parse_statement<'a>(
    tokens: &[Token<'a>],
    dialect: Option<Dialect>,
) -> Result<Option<Statement<'a>>, ParseError> {
    match classify(tokens) {
        StatementKind::CreateTable => {
            super::create_table::parse_create_table(tokens, dialect)
                .map(|table| Some(Statement::CreateTable(table)))
        }
        StatementKind::Insert => {
            super::insert::parse_insert(tokens).map(|insert| Some(Statement::Insert(insert)))
        }
        StatementKind::Other => Ok(None),
    }
}

/// Parse every supported statement of the input, skipping the rest.
///
/// # Errors
///
/// Returns the first lexer or parse error.
pub fn parse_all(input: &str, dialect: Option<Dialect>) -> Result<Vec<Statement<'_>>, ParseError> {
    let mut statements = Vec::new();
    for (_, tokens) in Statements::new(input, dialect) {
        if let Some(statement) = parse_statement(&tokens?, dialect)? {
            statements.push(statement);
        }
    }
    Ok(statements)
}

/// Parse a `.`-separated name starting at `index`.
///
/// Only identifiers and quoted identifiers form names; parsing stops at the
/// first token that is neither.
pub(crate) fn parse_qualified_name<'a>(
    tokens: &[Token<'a>],
    index: usize,
) -> Result<(QualifiedName<'a>, usize), ParseError> {
    let mut parts = Vec::new();
    let mut i = index;
    loop {
        match tokens.get(i) {
            Some(token) if is_name_token(token) => parts.push(token.text),
            _ => return Err(ParseError::syntax(tokens, i, "table name")),
        }
        i += 1;
        if !matches(tokens, i, TokenKind::Punctuation, ".") {
            break;
        }
        i += 1;
    }
    // `parts` holds at least the first segment here.
    QualifiedName::new(parts)
        .map(|name| (name, i))
        .ok_or_else(|| ParseError::syntax(tokens, index, "table name"))
}

fn is_name_token(token: &Token<'_>) -> bool {
    matches!(
        token.kind,
        TokenKind::Identifier | TokenKind::QuotedIdentifier
    )
}

/// Read a column, constraint or index name at `index`.
///
/// Keywords are accepted so that columns such as `key` or `action` parse.
/// Quoted names must not be empty.
pub(crate) fn parse_name<'a>(
    tokens: &[Token<'a>],
    index: usize,
    expected: &'static str,
) -> Result<&'a str, ParseError> {
    match tokens.get(index) {
        Some(token) if token.kind.is_word() && !unquote(token.text).is_empty() => Ok(token.text),
        _ => Err(ParseError::syntax(tokens, index, expected)),
    }
}

/// Turn the groups of a parenthesized list into spans.
///
/// `()` is the empty list; an empty element anywhere else is an error.
pub(crate) fn list_spans<'a>(
    groups: &[&[Token<'a>]],
    open_pos: usize,
    expected: &'static str,
) -> Result<Vec<TokenSpan<'a>>, ParseError> {
    if groups.len() == 1 && groups[0].is_empty() {
        return Ok(Vec::new());
    }
    groups
        .iter()
        .map(|group| {
            if group.is_empty() {
                Err(ParseError::syntax_span(group, open_pos, expected))
            } else {
                Ok(TokenSpan::from(*group))
            }
        })
        .collect()
}

/// Parse a parenthesized list of plain column names at `open`.
pub(crate) fn parse_column_list<'a>(
    tokens: &[Token<'a>],
    open: usize,
) -> Result<(Vec<&'a str>, usize), ParseError> {
    let (groups, next) = extract_parenthesized_groups(tokens, open)?;
    let open_pos = tokens[open].pos;
    let columns = groups
        .iter()
        .map(|group| match group {
            [_] => parse_name(group, 0, "column name"),
            _ => Err(ParseError::syntax_span(group, open_pos, "a single column name")),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok((columns, next))
}
