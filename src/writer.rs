//! Serialization of parsed statements for a target dialect.
//!
//! Identifiers are mangled into the target's quoting convention; literals and
//! expressions are written back exactly as they were read. Anything with no
//! cross-dialect meaning is reported on a separate diagnostics sink, one
//! `warning: ...` line per construct.

use alloc::format;
use alloc::string::String;
use core::fmt::{self, Display, Write};
use core::mem;

use hashbrown::HashSet;

use crate::dialect::Dialect;
use crate::identifier::{is_quoted, mangle, quote, unquote};
use crate::sql::{
    ColumnDef, Constraint, IndexDef, IndexKind, InsertStmt, Statement, TableDef, Token, TokenKind,
    skip_parenthesized,
};

/// Writes statements as target-dialect SQL.
///
/// `output` receives only SQL, every statement terminated by `;` and a
/// newline; `diagnostics` receives the warnings.
///
/// Targets without inline indexes keep index names in one schema-wide
/// namespace, so the writer remembers every table and index name it has
/// emitted and renames colliding indexes.
#[derive(Debug)]
pub struct SqlWriter<O, D> {
    dialect: Dialect,
    output: O,
    diagnostics: D,
    /// Lowercased table and index names already written.
    schema_names: HashSet<String>,
}

impl<O: Write, D: Write> SqlWriter<O, D> {
    /// Create a writer for the given target dialect.
    #[must_use]
    pub fn new(dialect: Dialect, output: O, diagnostics: D) -> Self {
        Self {
            dialect,
            output,
            diagnostics,
            schema_names: HashSet::new(),
        }
    }

    /// The target dialect.
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// The SQL written so far.
    #[must_use]
    pub fn output(&self) -> &O {
        &self.output
    }

    /// The diagnostics written so far.
    #[must_use]
    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    /// Give back the output and diagnostics sinks.
    #[must_use]
    pub fn into_parts(self) -> (O, D) {
        (self.output, self.diagnostics)
    }

    /// Report a construct that could not be carried over.
    ///
    /// # Errors
    ///
    /// Returns an error if the diagnostics sink fails.
    pub fn warn(&mut self, message: impl Display) -> fmt::Result {
        writeln!(self.diagnostics, "warning: {message}")
    }

    /// Write any supported statement.
    ///
    /// # Errors
    ///
    /// Returns an error if either sink fails.
    pub fn write_statement(&mut self, statement: &Statement<'_>) -> fmt::Result {
        match statement {
            Statement::CreateTable(table) => self.write_create_table(table),
            Statement::Insert(insert) => self.write_insert_stmt(insert),
        }
    }

    /// Write `INSERT INTO <name> [(<columns>)] VALUES (<values>);`.
    ///
    /// Only the final segment of the table name is written.
    ///
    /// # Errors
    ///
    /// Returns an error if the output sink fails.
    pub fn write_insert_stmt(&mut self, insert: &InsertStmt<'_>) -> fmt::Result {
        let dialect = self.dialect;
        let out = &mut self.output;
        write!(out, "INSERT INTO {}", mangle(insert.table.last(), dialect))?;
        if let Some(columns) = &insert.columns {
            out.write_str(" (")?;
            write_names(out, columns, dialect)?;
            out.write_char(')')?;
        }
        out.write_str(" VALUES (")?;
        for (i, value) in insert.values.iter().enumerate() {
            if i > 0 {
                out.write_char(',')?;
            }
            write!(out, "{value}")?;
        }
        out.write_str(");\n")
    }

    /// Write a `CREATE TABLE` statement, followed by one `CREATE INDEX` per
    /// inline index when the target has no inline index syntax.
    ///
    /// # Errors
    ///
    /// Returns an error if either sink fails.
    pub fn write_create_table(&mut self, table: &TableDef<'_>) -> fmt::Result {
        let dialect = self.dialect;
        let table_key = table.name.key();
        let table_name = mangle(table.name.last(), dialect);
        let same_dialect = table.dialect == Some(dialect);

        if !table.options.is_empty() {
            self.warn(format_args!(
                "table {table_key}: dropped table options `{}`",
                table.options
            ))?;
        }

        write!(
            self.output,
            "CREATE {}TABLE {}{table_name} (",
            if table.temporary { "TEMPORARY " } else { "" },
            if table.if_not_exists { "IF NOT EXISTS " } else { "" },
        )?;

        let mut first = true;
        for column in &table.columns {
            begin_entry(&mut self.output, &mut first)?;
            write_column(&mut self.output, column, dialect)?;
            if !column.extra.is_empty() && !same_dialect {
                self.warn(format_args!(
                    "table {table_key}, column {}: kept `{}` verbatim",
                    unquote(column.name),
                    column.extra
                ))?;
            }
            for name in &column.constraint_names {
                self.warn(format_args!(
                    "table {table_key}, column {}: dropped constraint name {}",
                    unquote(column.name),
                    unquote(name)
                ))?;
            }
        }
        for constraint in &table.constraints {
            begin_entry(&mut self.output, &mut first)?;
            write_constraint(&mut self.output, constraint, dialect)?;
        }
        if dialect.has_inline_indexes() {
            for index in &table.indexes {
                begin_entry(&mut self.output, &mut first)?;
                write_inline_index(&mut self.output, index, dialect)?;
            }
        }
        self.output.write_str("\n);\n")?;

        if !dialect.has_inline_indexes() {
            self.claim_name(&table_key);
            for index in &table.indexes {
                match index.kind {
                    IndexKind::Plain => {
                        let name = self.claim_index_name(table, index);
                        write!(self.output, "CREATE INDEX {name} ON {table_name} (")?;
                        write_index_columns(&mut self.output, index, dialect)?;
                        self.output.write_str(");\n")?;
                    }
                    IndexKind::Fulltext | IndexKind::Spatial => {
                        let name = index.name.map_or_else(
                            || generated_index_name(table, index),
                            |name| unquote(name).into_owned(),
                        );
                        self.warn(format_args!(
                            "table {table_key}: dropped {} index {name}",
                            index_keyword(index.kind),
                        ))?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Record a schema name, returning `false` if it was already taken.
    fn claim_name(&mut self, name: &str) -> bool {
        self.schema_names.insert(name.to_lowercase())
    }

    /// Pick the name of a standalone `CREATE INDEX`.
    ///
    /// The source name is kept when it is free. Otherwise the index is named
    /// `<table>_<name>`, or `<table>_<columns>_idx` when unnamed, with a
    /// numeric suffix until the name is unique.
    fn claim_index_name(&mut self, table: &TableDef<'_>, index: &IndexDef<'_>) -> String {
        let dialect = self.dialect;
        let base = match index.name {
            Some(name) => {
                if self.claim_name(&unquote(name)) {
                    return mangle(name, dialect).into_owned();
                }
                format!("{}_{}", table.name.key(), unquote(name))
            }
            None => generated_index_name(table, index),
        };

        let mut candidate = base.clone();
        let mut suffix = 2;
        while !self.claim_name(&candidate) {
            candidate = format!("{base}_{suffix}");
            suffix += 1;
        }

        if index.name.is_some_and(is_quoted) || !is_plain_name(&candidate) {
            quote(&candidate, dialect)
        } else {
            candidate
        }
    }
}

fn begin_entry(out: &mut impl Write, first: &mut bool) -> fmt::Result {
    out.write_str(if mem::replace(first, false) {
        "\n  "
    } else {
        ",\n  "
    })
}

fn write_names(out: &mut impl Write, names: &[&str], dialect: Dialect) -> fmt::Result {
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            out.write_char(',')?;
        }
        out.write_str(&mangle(name, dialect))?;
    }
    Ok(())
}

/// Write tokens like a token span's `Display`, re-quoting quoted identifiers.
fn write_mangled(out: &mut impl Write, tokens: &[Token<'_>], dialect: Dialect) -> fmt::Result {
    let mut previous_end = None;
    for token in tokens {
        if previous_end.is_some_and(|end| token.pos > end) {
            out.write_char(' ')?;
        }
        if token.kind == TokenKind::QuotedIdentifier {
            out.write_str(&mangle(token.text, dialect))?;
        } else {
            out.write_str(token.text)?;
        }
        previous_end = Some(token.end());
    }
    Ok(())
}

fn write_column(out: &mut impl Write, column: &ColumnDef<'_>, dialect: Dialect) -> fmt::Result {
    out.write_str(&mangle(column.name, dialect))?;
    if let Some(column_type) = &column.column_type {
        // Type names are never quoted on output, so `[int]` becomes `int`.
        write!(out, " {}", unquote(column_type))?;
        if !column.type_args.is_empty() {
            out.write_char('(')?;
            for (i, arg) in column.type_args.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write!(out, "{arg}")?;
            }
            out.write_char(')')?;
        }
    }
    if !column.nullable {
        out.write_str(" NOT NULL")?;
    }
    if let Some(default) = &column.default {
        write!(out, " DEFAULT {default}")?;
    }
    if column.unique {
        out.write_str(" UNIQUE")?;
    }
    if column.primary_key {
        out.write_str(" PRIMARY KEY")?;
    }
    if !column.extra.is_empty() {
        out.write_char(' ')?;
        write_mangled(out, column.extra.tokens(), dialect)?;
    }
    Ok(())
}

fn write_constraint(
    out: &mut impl Write,
    constraint: &Constraint<'_>,
    dialect: Dialect,
) -> fmt::Result {
    if let Some(name) = constraint.name() {
        write!(out, "CONSTRAINT {} ", mangle(name, dialect))?;
    }
    match constraint {
        Constraint::PrimaryKey { columns, .. } => {
            out.write_str("PRIMARY KEY (")?;
            write_names(out, columns, dialect)?;
            out.write_char(')')
        }
        Constraint::Unique { columns, .. } => {
            out.write_str("UNIQUE (")?;
            write_names(out, columns, dialect)?;
            out.write_char(')')
        }
        Constraint::Check { expression, .. } => {
            out.write_str("CHECK (")?;
            write_mangled(out, expression.tokens(), dialect)?;
            out.write_char(')')
        }
        Constraint::ForeignKey {
            columns,
            ref_table,
            ref_columns,
            on_delete,
            on_update,
            ..
        } => {
            out.write_str("FOREIGN KEY (")?;
            write_names(out, columns, dialect)?;
            write!(out, ") REFERENCES {} (", mangle(ref_table.last(), dialect))?;
            write_names(out, ref_columns, dialect)?;
            out.write_char(')')?;
            if let Some(action) = on_delete {
                write!(out, " ON DELETE {action}")?;
            }
            if let Some(action) = on_update {
                write!(out, " ON UPDATE {action}")?;
            }
            Ok(())
        }
    }
}

fn index_keyword(kind: IndexKind) -> &'static str {
    match kind {
        IndexKind::Plain => "KEY",
        IndexKind::Fulltext => "FULLTEXT",
        IndexKind::Spatial => "SPATIAL",
    }
}

fn write_inline_index(out: &mut impl Write, index: &IndexDef<'_>, dialect: Dialect) -> fmt::Result {
    match index.kind {
        IndexKind::Plain => out.write_str("KEY ")?,
        kind => write!(out, "{} KEY ", index_keyword(kind))?,
    }
    if let Some(name) = index.name {
        write!(out, "{} ", mangle(name, dialect))?;
    }
    out.write_char('(')?;
    write_index_columns(out, index, dialect)?;
    out.write_char(')')
}

/// Write indexed columns, dropping MySQL prefix lengths such as `name(10)`
/// for targets that do not support them.
fn write_index_columns(out: &mut impl Write, index: &IndexDef<'_>, dialect: Dialect) -> fmt::Result {
    for (i, column) in index.columns.iter().enumerate() {
        if i > 0 {
            out.write_char(',')?;
        }
        let tokens = column.tokens();
        if dialect != Dialect::MySql && tokens.get(1).is_some_and(|t| t.is_punct("(")) {
            let rest = skip_parenthesized(tokens, 1).map_or(1, |next| next);
            write_mangled(out, &tokens[..1], dialect)?;
            if rest < tokens.len() {
                out.write_char(' ')?;
                write_mangled(out, &tokens[rest..], dialect)?;
            }
        } else {
            write_mangled(out, tokens, dialect)?;
        }
    }
    Ok(())
}

/// `<table>_<columns>_idx`, unquoted.
fn generated_index_name(table: &TableDef<'_>, index: &IndexDef<'_>) -> String {
    let mut name = String::from(table.name.key());
    for column in index.columns.iter().filter_map(|c| c.tokens().first()) {
        name.push('_');
        name.push_str(&unquote(column.text));
    }
    name.push_str("_idx");
    name
}

fn is_plain_name(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
