//! `CREATE TABLE` parsing.
//!
//! The body of the table is split into entries with
//! [`extract_parenthesized_groups`]; each entry is then classified by its
//! leading keyword as a constraint, a MySQL inline index or a column.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use super::ast::{ColumnDef, Constraint, IndexDef, IndexKind, ReferentialAction, TableDef};
use super::lexer::{Token, TokenKind};
use super::parser::{
    ParseError, list_spans, parse_column_list, parse_name, parse_qualified_name,
};
use super::stream::{
    TokenSpan, consume_if_matches, extract_parenthesized_groups, matches, matches_keywords,
    skip_parenthesized,
};
use crate::dialect::Dialect;
use crate::identifier::unquote;

/// Keywords that start a constraint entry, with or without `CONSTRAINT <name>`.
const CONSTRAINT_KEYWORDS: &[&str] = &["PRIMARY", "UNIQUE", "CHECK", "FOREIGN"];

/// Keywords that end a `DEFAULT` expression and start a new column modifier.
const MODIFIER_KEYWORDS: &[&str] = &["NOT", "NULL", "DEFAULT", "UNIQUE", "PRIMARY"];

/// Keywords that end a `DEFAULT` expression but have no column-level translation.
const UNTRANSLATED_KEYWORDS: &[&str] = &["CHECK", "REFERENCES", "COLLATE"];

/// Words that continue a multi-word type name.
const TYPE_CONTINUATIONS: &[&str] = &["PRECISION", "VARYING"];

fn is_any_keyword(token: &Token<'_>, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| token.is_keyword(keyword))
}

/// Parse a `CREATE TABLE` statement.
///
/// # Errors
///
/// Returns [`ParseError::Syntax`] when a keyword is missing or an entry is
/// neither a column nor a constraint, and
/// [`ParseError::MalformedParentheses`] when a parenthesis never closes.
pub fn parse_create_table<'a>(
    tokens: &[Token<'a>],
    dialect: Option<Dialect>,
) -> Result<TableDef<'a>, ParseError> {
    if !matches(tokens, 0, TokenKind::Keyword, "CREATE") {
        return Err(ParseError::syntax(tokens, 0, "`CREATE`"));
    }
    let mut i = 1;
    let temporary = tokens
        .get(i)
        .is_some_and(|t| t.is_keyword("TEMPORARY") || t.is_keyword("TEMP"));
    if temporary {
        i += 1;
    }
    if !matches(tokens, i, TokenKind::Keyword, "TABLE") {
        return Err(ParseError::syntax(tokens, i, "`TABLE`"));
    }
    i += 1;

    let if_not_exists = matches_keywords(tokens, i, &["IF", "NOT", "EXISTS"]);
    if if_not_exists {
        i += 3;
    }

    let (name, open) = parse_qualified_name(tokens, i)?;
    let (entries, close) = extract_parenthesized_groups(tokens, open)?;

    let mut table = TableDef {
        name,
        temporary,
        if_not_exists,
        columns: Vec::new(),
        constraints: Vec::new(),
        indexes: Vec::new(),
        options: TokenSpan::from(&tokens[close..]),
        dialect,
    };

    // Each entry is followed by the `,` or `)` that ended it.
    let mut separator = open + 1;
    for entry in entries {
        separator += entry.len();
        let separator_pos = tokens[separator].pos;
        parse_entry(entry, separator_pos, &mut table)?;
        separator += 1;
    }

    Ok(table)
}

fn parse_entry<'a>(
    entry: &[Token<'a>],
    separator_pos: usize,
    table: &mut TableDef<'a>,
) -> Result<(), ParseError> {
    let Some(first) = entry.first() else {
        return Err(ParseError::syntax_span(
            entry,
            separator_pos,
            "column or constraint definition",
        ));
    };

    if first.is_keyword("CONSTRAINT") || is_any_keyword(first, CONSTRAINT_KEYWORDS) {
        table.constraints.push(parse_constraint(entry)?);
    } else if is_index_entry(entry, table.dialect) {
        table.indexes.push(parse_index(entry)?);
    } else {
        table.columns.push(parse_column(entry)?);
    }
    Ok(())
}

/// Whether an entry opens like a MySQL inline index:
/// `[FULLTEXT|SPATIAL] [KEY|INDEX] [name] [USING method] (`.
///
/// Anything else, such as a column named `key` or `index`, is a column.
fn is_index_entry(entry: &[Token<'_>], dialect: Option<Dialect>) -> bool {
    if !matches!(dialect, None | Some(Dialect::MySql)) {
        return false;
    }
    let mut i = 0;
    if entry
        .first()
        .is_some_and(|t| is_any_keyword(t, &["FULLTEXT", "SPATIAL"]))
    {
        i += 1;
        if entry
            .get(i)
            .is_some_and(|t| t.is_keyword("KEY") || t.is_keyword("INDEX"))
        {
            i += 1;
        }
    } else if entry
        .first()
        .is_some_and(|t| t.is_keyword("KEY") || t.is_keyword("INDEX"))
    {
        i += 1;
    } else {
        return false;
    }
    let (_, next) = optional_index_name(entry, i);
    matches(entry, skip_index_method(entry, next), TokenKind::Punctuation, "(")
}

/// Index just past one unit of a column definition: a single token, or a
/// whole parenthesized group when the token at `i` opens one.
fn next_unit(entry: &[Token<'_>], i: usize) -> Result<usize, ParseError> {
    if matches(entry, i, TokenKind::Punctuation, "(") {
        skip_parenthesized(entry, i)
    } else {
        Ok(i + 1)
    }
}

/// Parse a column definition: name, optional type and arguments, modifiers.
fn parse_column<'a>(entry: &[Token<'a>]) -> Result<ColumnDef<'a>, ParseError> {
    let name = parse_name(entry, 0, "column name or constraint definition")?;
    let mut column = ColumnDef::new(name, None);
    let mut i = 1;

    if let Some(type_token) = entry.get(i).filter(|t| {
        t.kind.is_word()
            && !is_any_keyword(t, MODIFIER_KEYWORDS)
            && !is_any_keyword(t, UNTRANSLATED_KEYWORDS)
            && !t.is_keyword("CONSTRAINT")
    }) {
        i += 1;
        let mut type_name = Cow::Borrowed(type_token.text);
        while let Some(word) = entry
            .get(i)
            .filter(|t| is_any_keyword(t, TYPE_CONTINUATIONS))
        {
            let mut joined = String::from(type_name);
            joined.push(' ');
            joined.push_str(word.text);
            type_name = Cow::Owned(joined);
            i += 1;
        }
        column.column_type = Some(type_name);

        if matches(entry, i, TokenKind::Punctuation, "(") {
            let open_pos = entry[i].pos;
            let (groups, next) = extract_parenthesized_groups(entry, i)?;
            column.type_args = list_spans(&groups, open_pos, "type argument")?;
            i = next;
        }
    }

    let mut in_default = false;
    while let Some(token) = entry.get(i) {
        if matches_keywords(entry, i, &["NOT", "NULL"]) {
            column.nullable = false;
            in_default = false;
            i += 2;
        } else if token.is_keyword("NULL") {
            column.nullable = true;
            in_default = false;
            i += 1;
        } else if token.is_keyword("DEFAULT") {
            // The first unit always belongs to the expression, so that
            // `DEFAULT NULL` keeps its `NULL`.
            let start = i + 1;
            if start >= entry.len() {
                return Err(ParseError::syntax(entry, start, "default expression"));
            }
            i = next_unit(entry, start)?;
            column.default = Some(TokenSpan::from(&entry[start..i]));
            in_default = true;
        } else if token.is_keyword("UNIQUE") {
            column.unique = true;
            in_default = false;
            i = consume_if_matches(entry, i + 1, TokenKind::Keyword, "KEY");
        } else if matches_keywords(entry, i, &["PRIMARY", "KEY"]) {
            column.primary_key = true;
            in_default = false;
            i += 2;
        } else if token.is_keyword("CONSTRAINT") {
            // A name only stays attached to clauses kept verbatim in `extra`.
            let name = parse_name(entry, i + 1, "constraint name")?;
            in_default = false;
            if entry
                .get(i + 2)
                .is_some_and(|t| is_any_keyword(t, UNTRANSLATED_KEYWORDS))
            {
                column.extra.extend_from_slice(&entry[i..i + 2]);
            } else {
                column.constraint_names.push(name);
            }
            i += 2;
        } else {
            if is_any_keyword(token, UNTRANSLATED_KEYWORDS) {
                in_default = false;
            }
            let next = next_unit(entry, i)?;
            match column.default.as_mut() {
                Some(default) if in_default => default.extend_from_slice(&entry[i..next]),
                _ => column.extra.extend_from_slice(&entry[i..next]),
            }
            i = next;
        }
    }

    Ok(column)
}

/// Skip a MySQL `USING BTREE` / `USING HASH` index method.
fn skip_index_method(entry: &[Token<'_>], i: usize) -> usize {
    if matches(entry, i, TokenKind::Keyword, "USING")
        && entry.get(i + 1).is_some_and(|t| t.kind.is_word())
    {
        i + 2
    } else {
        i
    }
}

/// Read an optional index name that precedes a column list.
fn optional_index_name<'a>(entry: &[Token<'a>], i: usize) -> (Option<&'a str>, usize) {
    match entry.get(i) {
        Some(token)
            if token.kind.is_word()
                && !token.is_keyword("USING")
                && !unquote(token.text).is_empty() =>
        {
            (Some(token.text), i + 1)
        }
        _ => (None, i),
    }
}

/// Parse `[CONSTRAINT name] PRIMARY KEY | UNIQUE | CHECK | FOREIGN KEY ...`.
fn parse_constraint<'a>(entry: &[Token<'a>]) -> Result<Constraint<'a>, ParseError> {
    let mut i = 0;
    let mut name = None;
    if entry[0].is_keyword("CONSTRAINT") {
        i = 1;
        if entry
            .get(1)
            .is_some_and(|token| !is_any_keyword(token, CONSTRAINT_KEYWORDS))
        {
            name = Some(parse_name(entry, 1, "constraint name")?);
            i = 2;
        }
    }

    let constraint = if matches_keywords(entry, i, &["PRIMARY", "KEY"]) {
        i = skip_index_method(entry, i + 2);
        let (columns, next) = parse_column_list(entry, i)?;
        i = skip_index_method(entry, next);
        Constraint::PrimaryKey { name, columns }
    } else if matches(entry, i, TokenKind::Keyword, "UNIQUE") {
        i += 1;
        if entry
            .get(i)
            .is_some_and(|t| t.is_keyword("KEY") || t.is_keyword("INDEX"))
        {
            i += 1;
        }
        let (index_name, next) = optional_index_name(entry, i);
        let (columns, next) = parse_column_list(entry, skip_index_method(entry, next))?;
        i = skip_index_method(entry, next);
        Constraint::Unique {
            name: name.or(index_name),
            columns,
        }
    } else if matches(entry, i, TokenKind::Keyword, "CHECK") {
        let open = i + 1;
        let close = skip_parenthesized(entry, open)?;
        i = close;
        Constraint::Check {
            name,
            expression: TokenSpan::from(&entry[open + 1..close - 1]),
        }
    } else if matches_keywords(entry, i, &["FOREIGN", "KEY"]) {
        let (index_name, next) = optional_index_name(entry, i + 2);
        let (columns, next) = parse_column_list(entry, next)?;
        if !matches(entry, next, TokenKind::Keyword, "REFERENCES") {
            return Err(ParseError::syntax(entry, next, "`REFERENCES`"));
        }
        let (ref_table, next) = parse_qualified_name(entry, next + 1)?;
        let (ref_columns, next) = parse_column_list(entry, next)?;
        i = next;

        let mut on_delete = None;
        let mut on_update = None;
        while matches(entry, i, TokenKind::Keyword, "ON") {
            let slot = match entry.get(i + 1) {
                Some(t) if t.is_keyword("DELETE") => &mut on_delete,
                Some(t) if t.is_keyword("UPDATE") => &mut on_update,
                _ => return Err(ParseError::syntax(entry, i + 1, "`DELETE` or `UPDATE`")),
            };
            let (action, next) = parse_referential_action(entry, i + 2)?;
            *slot = Some(action);
            i = next;
        }

        Constraint::ForeignKey {
            name: name.or(index_name),
            columns,
            ref_table,
            ref_columns,
            on_delete,
            on_update,
        }
    } else {
        return Err(ParseError::syntax(
            entry,
            i,
            "`PRIMARY KEY`, `UNIQUE`, `CHECK` or `FOREIGN KEY`",
        ));
    };

    if i != entry.len() {
        return Err(ParseError::syntax(entry, i, "end of constraint definition"));
    }
    Ok(constraint)
}

fn parse_referential_action(
    entry: &[Token<'_>],
    i: usize,
) -> Result<(ReferentialAction, usize), ParseError> {
    let action = if matches(entry, i, TokenKind::Keyword, "CASCADE") {
        (ReferentialAction::Cascade, i + 1)
    } else if matches(entry, i, TokenKind::Keyword, "RESTRICT") {
        (ReferentialAction::Restrict, i + 1)
    } else if matches_keywords(entry, i, &["NO", "ACTION"]) {
        (ReferentialAction::NoAction, i + 2)
    } else if matches_keywords(entry, i, &["SET", "NULL"]) {
        (ReferentialAction::SetNull, i + 2)
    } else if matches_keywords(entry, i, &["SET", "DEFAULT"]) {
        (ReferentialAction::SetDefault, i + 2)
    } else {
        return Err(ParseError::syntax(entry, i, "referential action"));
    };
    Ok(action)
}

/// Parse a MySQL inline index: `[FULLTEXT|SPATIAL] KEY|INDEX [name] (columns)`.
fn parse_index<'a>(entry: &[Token<'a>]) -> Result<IndexDef<'a>, ParseError> {
    let mut i = 0;
    let kind = if entry[0].is_keyword("FULLTEXT") {
        i = 1;
        IndexKind::Fulltext
    } else if entry[0].is_keyword("SPATIAL") {
        i = 1;
        IndexKind::Spatial
    } else {
        IndexKind::Plain
    };

    if entry
        .get(i)
        .is_some_and(|t| t.is_keyword("KEY") || t.is_keyword("INDEX"))
    {
        i += 1;
    } else if kind == IndexKind::Plain {
        return Err(ParseError::syntax(entry, i, "`KEY` or `INDEX`"));
    }

    let (name, next) = optional_index_name(entry, i);
    let open = skip_index_method(entry, next);
    if !matches(entry, open, TokenKind::Punctuation, "(") {
        return Err(ParseError::syntax(entry, open, "indexed column list"));
    }
    let open_pos = entry[open].pos;
    let (groups, next) = extract_parenthesized_groups(entry, open)?;
    let columns = list_spans(&groups, open_pos, "indexed column")?;
    if columns.is_empty() {
        return Err(ParseError::syntax_span(&[], open_pos, "indexed column"));
    }

    let end = skip_index_method(entry, next);
    if end != entry.len() {
        return Err(ParseError::syntax(entry, end, "end of index definition"));
    }

    Ok(IndexDef {
        kind,
        name,
        columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::ast::QualifiedName;
    use crate::sql::lexer::tokenize;
    use alloc::string::ToString;
    use alloc::vec;

    fn parse(sql: &str) -> Result<TableDef<'_>, ParseError> {
        parse_create_table(&tokenize(sql, None)?, None)
    }

    fn spans(spans: &[TokenSpan<'_>]) -> Vec<String> {
        spans.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_full_table() {
        let table = parse(
            "
            CREATE TABLE child (
                id INT,
                parent_id INT,
                name VARCHAR(20),
                amount INT NULL DEFAULT 1 (+1) UNIQE,
                weight DECIMAL(10, 2),
                PRIMARY KEY (id),
                UNIQUE KEY (parent_id),
                FOREIGN KEY (parent_id)
                    REFERENCES parent(id)
                    ON DELETE CASCADE
            ) ENGINE=INNODB",
        )
        .unwrap();

        assert_eq!(table.name.last(), "child");
        assert_eq!(table.columns.len(), 5);
        assert_eq!(table.constraints.len(), 3);
        assert_eq!(
            table.column_names(),
            vec!["id", "parent_id", "name", "amount", "weight"]
        );

        let name = &table.columns[2];
        assert_eq!(name.column_type.as_deref(), Some("VARCHAR"));
        assert_eq!(spans(&name.type_args), vec!["20"]);

        let amount = &table.columns[3];
        assert!(amount.nullable);
        assert!(!amount.unique);
        assert_eq!(amount.default.as_ref().unwrap().to_string(), "1 (+1) UNIQE");

        assert_eq!(spans(&table.columns[4].type_args), vec!["10", "2"]);
        assert_eq!(table.options.to_string(), "ENGINE=INNODB");

        assert_eq!(
            table.constraints[0],
            Constraint::PrimaryKey {
                name: None,
                columns: vec!["id"],
            }
        );
        assert_eq!(
            table.constraints[1],
            Constraint::Unique {
                name: None,
                columns: vec!["parent_id"],
            }
        );
        match &table.constraints[2] {
            Constraint::ForeignKey {
                columns,
                ref_table,
                ref_columns,
                on_delete,
                on_update,
                ..
            } => {
                assert_eq!(columns, &vec!["parent_id"]);
                assert_eq!(ref_table.last(), "parent");
                assert_eq!(ref_columns, &vec!["id"]);
                assert_eq!(*on_delete, Some(ReferentialAction::Cascade));
                assert_eq!(*on_update, None);
            }
            other => panic!("Expected ForeignKey, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_named_constraints() {
        let table = parse(
            "
            CREATE TABLE child (
                id INT NOT NULL,
                parent_id INT,
                name VARCHAR(20) DEFAULT 'abc',
                amount INT NULL DEFAULT 1 +1,
                weight DECIMAL(10, 2),
                CONSTRAINT `pk_name` PRIMARY KEY (id),
                CONSTRAINT `uk_aount` UNIQUE KEY (amount),
                CONSTRAINT `fk_name` FOREIGN KEY (parent_id)
                    REFERENCES parent(id)
                    ON DELETE CASCADE
            ) ENGINE=INNODB",
        )
        .unwrap();

        assert_eq!(table.columns.len(), 5);
        assert!(!table.columns[0].nullable);
        assert_eq!(
            table.columns[2].default.as_ref().unwrap().to_string(),
            "'abc'"
        );
        assert_eq!(
            table.columns[3].default.as_ref().unwrap().to_string(),
            "1 +1"
        );
        let names: Vec<_> = table.constraints.iter().map(Constraint::name).collect();
        assert_eq!(
            names,
            vec![Some("`pk_name`"), Some("`uk_aount`"), Some("`fk_name`")]
        );
    }

    #[test]
    fn test_column_modifiers() {
        let table = parse(
            "CREATE TABLE t (
                a INT NOT NULL DEFAULT 0 UNIQUE,
                b INTEGER PRIMARY KEY AUTOINCREMENT,
                c TEXT DEFAULT NULL,
                d TIMESTAMP DEFAULT now() NOT NULL,
                e DOUBLE PRECISION,
                f CHARACTER VARYING(20) COLLATE nocase,
                g
            )",
        )
        .unwrap();

        let a = &table.columns[0];
        assert!(!a.nullable);
        assert!(a.unique);
        assert_eq!(a.default.as_ref().unwrap().to_string(), "0");

        let b = &table.columns[1];
        assert!(b.primary_key);
        assert!(b.default.is_none());
        assert_eq!(b.extra.to_string(), "AUTOINCREMENT");

        assert_eq!(table.columns[2].default.as_ref().unwrap().to_string(), "NULL");
        assert!(table.columns[2].nullable);

        let d = &table.columns[3];
        assert_eq!(d.default.as_ref().unwrap().to_string(), "now()");
        assert!(!d.nullable);

        assert_eq!(table.columns[4].column_type.as_deref(), Some("DOUBLE PRECISION"));

        let f = &table.columns[5];
        assert_eq!(f.column_type.as_deref(), Some("CHARACTER VARYING"));
        assert_eq!(f.extra.to_string(), "COLLATE nocase");

        assert_eq!(table.columns[6].column_type, None);
    }

    #[test]
    fn test_key_and_index_columns() {
        let tokens = tokenize(
            "CREATE TABLE kv (key TEXT NOT NULL, value TEXT, index INTEGER, fulltext TEXT)",
            Some(Dialect::Sqlite),
        )
        .unwrap();
        let table = parse_create_table(&tokens, Some(Dialect::Sqlite)).unwrap();
        assert_eq!(table.column_names(), vec!["key", "value", "index", "fulltext"]);
        assert!(!table.columns[0].nullable);
        assert_eq!(table.columns[2].column_type.as_deref(), Some("INTEGER"));
        assert!(table.indexes.is_empty());

        // Without a column list right after the name, even MySQL input is a column.
        let table = parse("CREATE TABLE t (key TEXT NOT NULL, index INTEGER, KEY k (key))").unwrap();
        assert_eq!(table.column_names(), vec!["key", "index"]);
        assert_eq!(table.indexes.len(), 1);
        assert_eq!(table.indexes[0].name, Some("k"));
    }

    #[test]
    fn test_inline_constraint_names() {
        let table = parse(
            "CREATE TABLE t (
                a INT CONSTRAINT a_nn NOT NULL CONSTRAINT a_pos CHECK (a > 0),
                b INT CONSTRAINT b_def DEFAULT 1,
                c CONSTRAINT c_u UNIQUE
            )",
        )
        .unwrap();
        let a = &table.columns[0];
        assert!(!a.nullable);
        assert_eq!(a.constraint_names, vec!["a_nn"]);
        assert_eq!(a.extra.to_string(), "CONSTRAINT a_pos CHECK (a > 0)");

        let b = &table.columns[1];
        assert_eq!(b.constraint_names, vec!["b_def"]);
        assert_eq!(b.default.as_ref().unwrap().to_string(), "1");
        assert!(b.extra.is_empty());

        let c = &table.columns[2];
        assert_eq!(c.column_type, None);
        assert!(c.unique);
        assert_eq!(c.constraint_names, vec!["c_u"]);
    }

    #[test]
    fn test_extra_tokens_without_default() {
        let table = parse("CREATE TABLE t (id INT(11) UNSIGNED NOT NULL AUTO_INCREMENT)").unwrap();
        let id = &table.columns[0];
        assert_eq!(spans(&id.type_args), vec!["11"]);
        assert!(!id.nullable);
        assert!(id.default.is_none());
        assert_eq!(id.extra.to_string(), "UNSIGNED AUTO_INCREMENT");
    }

    #[test]
    fn test_create_table_prefixes() {
        let table = parse("CREATE TEMPORARY TABLE IF NOT EXISTS `db`.`t` (a INT)").unwrap();
        assert!(table.temporary);
        assert!(table.if_not_exists);
        assert_eq!(table.name.parts(), &["`db`", "`t`"]);
        assert!(table.options.is_empty());
    }

    #[test]
    fn test_foreign_key_actions() {
        let table = parse(
            "CREATE TABLE t (
                a INT,
                b INT,
                FOREIGN KEY fk_ab (a, b) REFERENCES s.p (x, y) ON UPDATE SET NULL ON DELETE NO ACTION
            )",
        )
        .unwrap();
        assert_eq!(
            table.constraints[0],
            Constraint::ForeignKey {
                name: Some("fk_ab"),
                columns: vec!["a", "b"],
                ref_table: QualifiedName::new(vec!["s", "p"]).unwrap(),
                ref_columns: vec!["x", "y"],
                on_delete: Some(ReferentialAction::NoAction),
                on_update: Some(ReferentialAction::SetNull),
            }
        );
    }

    #[test]
    fn test_check_constraint() {
        let table =
            parse("CREATE TABLE t (a INT, CONSTRAINT positive CHECK (a > 0 AND (a < 10)))").unwrap();
        match &table.constraints[0] {
            Constraint::Check { name, expression } => {
                assert_eq!(*name, Some("positive"));
                assert_eq!(expression.to_string(), "a > 0 AND (a < 10)");
            }
            other => panic!("Expected Check, got {other:?}"),
        }
    }

    #[test]
    fn test_mysql_indexes() {
        let table = parse(
            "CREATE TABLE `t` (
                `id` int NOT NULL,
                `name` varchar(64) NOT NULL,
                `body` text,
                PRIMARY KEY (`id`) USING BTREE,
                UNIQUE KEY `uk_name` (`name`),
                KEY `idx_name` (`name`(10), `id`),
                INDEX (`id`),
                FULLTEXT KEY `ft_body` (`body`)
            ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4",
        )
        .unwrap();

        assert_eq!(table.constraints.len(), 2);
        assert_eq!(table.constraints[1].name(), Some("`uk_name`"));
        assert_eq!(table.indexes.len(), 3);
        assert_eq!(table.indexes[0].name, Some("`idx_name`"));
        assert_eq!(spans(&table.indexes[0].columns), vec!["`name`(10)", "`id`"]);
        assert_eq!(table.indexes[1].name, None);
        assert_eq!(table.indexes[2].kind, IndexKind::Fulltext);
        assert_eq!(table.options.to_string(), "ENGINE=InnoDB DEFAULT CHARSET=utf8mb4");
    }

    #[test]
    fn test_counts_preserve_order() {
        let table = parse(
            "CREATE TABLE t (c1 INT, CHECK (c1 > 0), c2 INT, UNIQUE (c2), c3 INT, PRIMARY KEY (c1, c2))",
        )
        .unwrap();
        assert_eq!(table.column_names(), vec!["c1", "c2", "c3"]);
        assert!(matches!(table.constraints[0], Constraint::Check { .. }));
        assert!(matches!(table.constraints[1], Constraint::Unique { .. }));
        assert!(matches!(table.constraints[2], Constraint::PrimaryKey { .. }));
    }

    #[test]
    fn test_syntax_errors() {
        assert!(matches!(
            parse("CREATE t (a INT)"),
            Err(ParseError::Syntax { expected: "`TABLE`", .. })
        ));
        assert!(matches!(
            parse("CREATE TABLE (a INT)"),
            Err(ParseError::Syntax { expected: "table name", .. })
        ));
        assert!(matches!(
            parse("CREATE TABLE t a INT"),
            Err(ParseError::Syntax { expected: "`(`", .. })
        ));
        assert!(matches!(
            parse("CREATE TABLE t (a INT,, b INT)"),
            Err(ParseError::Syntax { expected: "column or constraint definition", .. })
        ));
        assert!(matches!(
            parse("CREATE TABLE t ('a' INT)"),
            Err(ParseError::Syntax { expected: "column name or constraint definition", .. })
        ));
        assert!(matches!(
            parse("CREATE TABLE t (a INT, CONSTRAINT c (a))"),
            Err(ParseError::Syntax { .. })
        ));
        assert!(matches!(
            parse("CREATE TABLE t (a INT, PRIMARY KEY (a) DEFERRABLE)"),
            Err(ParseError::Syntax { expected: "end of constraint definition", .. })
        ));
        assert!(matches!(
            parse("CREATE TABLE t (a INT, FOREIGN KEY (a) REFERENCES p (id) ON DELETE EXPLODE)"),
            Err(ParseError::Syntax { expected: "referential action", .. })
        ));
        assert!(matches!(
            parse("CREATE TABLE t (a INT DEFAULT)"),
            Err(ParseError::Syntax { expected: "default expression", .. })
        ));
    }

    #[test]
    fn test_empty_entry_reports_separator_position() {
        let err = parse("CREATE TABLE t (a INT,)").unwrap_err();
        assert_eq!(
            err,
            ParseError::Syntax {
                expected: "column or constraint definition",
                found: "an empty list element".into(),
                pos: 22,
            }
        );
    }

    #[test]
    fn test_unmatched_parenthesis_in_default() {
        assert_eq!(
            parse("CREATE TABLE t (a INT DEFAULT (1 + 2, b INT)"),
            Err(ParseError::MalformedParentheses { pos: 15 })
        );
    }
}
