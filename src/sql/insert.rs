//! `INSERT INTO ... VALUES (...)` parsing.

use alloc::vec::Vec;

use super::ast::InsertStmt;
use super::lexer::{Token, TokenKind};
use super::parser::{ParseError, list_spans, parse_name, parse_qualified_name};
use super::stream::{extract_parenthesized_groups, matches, matches_keywords};

/// Reduce a column-list group such as `t.col` to its final name.
fn column_name<'a>(group: &[Token<'a>], open_pos: usize) -> Result<&'a str, ParseError> {
    let well_formed = group.len() % 2 == 1
        && group.iter().enumerate().all(|(i, token)| {
            if i % 2 == 0 {
                token.kind.is_word()
            } else {
                token.is_punct(".")
            }
        });
    if !well_formed {
        return Err(ParseError::syntax_span(group, open_pos, "column name"));
    }
    parse_name(group, group.len() - 1, "column name")
}

/// Parse an `INSERT INTO` statement with a single value tuple.
///
/// # Errors
///
/// Returns [`ParseError::Syntax`] when `INTO` or `VALUES` is missing, a
/// column-list entry is not a name, or tokens follow the value tuple, and
/// [`ParseError::MalformedParentheses`] when a list never closes.
pub fn parse_insert<'a>(tokens: &[Token<'a>]) -> Result<InsertStmt<'a>, ParseError> {
    if !matches_keywords(tokens, 0, &["INSERT", "INTO"]) {
        let index = usize::from(matches(tokens, 0, TokenKind::Keyword, "INSERT"));
        return Err(ParseError::syntax(tokens, index, "`INSERT INTO`"));
    }

    let (table, mut i) = parse_qualified_name(tokens, 2)?;

    let mut columns = None;
    if matches(tokens, i, TokenKind::Punctuation, "(") {
        let open_pos = tokens[i].pos;
        let (groups, next) = extract_parenthesized_groups(tokens, i)?;
        columns = Some(if groups.len() == 1 && groups[0].is_empty() {
            Vec::new()
        } else {
            groups
                .iter()
                .map(|group| column_name(group, open_pos))
                .collect::<Result<Vec<_>, _>>()?
        });
        i = next;
    }

    if !matches(tokens, i, TokenKind::Keyword, "VALUES") {
        return Err(ParseError::syntax(tokens, i, "`VALUES`"));
    }
    i += 1;

    let Some(open) = tokens.get(i) else {
        return Err(ParseError::syntax(tokens, i, "`(`"));
    };
    let open_pos = open.pos;
    let (groups, next) = extract_parenthesized_groups(tokens, i)?;
    let values = list_spans(&groups, open_pos, "value")?;

    if next != tokens.len() {
        return Err(ParseError::syntax(tokens, next, "end of INSERT statement"));
    }

    Ok(InsertStmt {
        table,
        columns,
        values,
    })
}
