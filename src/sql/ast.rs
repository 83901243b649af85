//! Parsed schema and data statements.
//!
//! Identifiers are kept exactly as written in the source, quotes included;
//! the writer mangles them for the target dialect.

use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::fmt::{self, Display};

use super::stream::TokenSpan;
use crate::dialect::Dialect;
use crate::identifier::unquote;

/// A possibly schema-qualified name such as `` `db`.`users` ``.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QualifiedName<'a> {
    parts: Vec<&'a str>,
}

impl<'a> QualifiedName<'a> {
    /// Build a name from its `.`-separated parts.
    ///
    /// Returns `None` when there are no parts.
    #[must_use]
    pub fn new(parts: Vec<&'a str>) -> Option<Self> {
        if parts.is_empty() {
            None
        } else {
            Some(Self { parts })
        }
    }

    /// All segments, outermost first.
    #[must_use]
    pub fn parts(&self) -> &[&'a str] {
        &self.parts
    }

    /// The final segment, as written in the source.
    #[must_use]
    pub fn last(&self) -> &'a str {
        // `new` rejects empty part lists.
        self.parts[self.parts.len() - 1]
    }

    /// The final segment without quotes, used as the lookup key.
    #[must_use]
    pub fn key(&self) -> Cow<'a, str> {
        unquote(self.last())
    }

    /// Whether the name carries schema or database qualifiers.
    #[must_use]
    pub fn is_qualified(&self) -> bool {
        self.parts.len() > 1
    }
}

impl Display for QualifiedName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(part)?;
        }
        Ok(())
    }
}

/// A column definition in `CREATE TABLE`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnDef<'a> {
    /// Column name, never empty.
    pub name: &'a str,
    /// Type name, absent for SQLite-style untyped columns.
    pub column_type: Option<Cow<'a, str>>,
    /// Arguments of the type: length, precision and scale, or enum values.
    pub type_args: Vec<TokenSpan<'a>>,
    /// `false` when the column is declared `NOT NULL`.
    pub nullable: bool,
    /// Whether the column is declared `UNIQUE`.
    pub unique: bool,
    /// Whether the column is declared `PRIMARY KEY`.
    pub primary_key: bool,
    /// The `DEFAULT` expression, with any unrecognised tokens that follow it.
    pub default: Option<TokenSpan<'a>>,
    /// Dialect-specific tokens with no translation, such as `AUTO_INCREMENT`.
    pub extra: TokenSpan<'a>,
    /// Names given with `CONSTRAINT <name>` to modifiers that are written
    /// without them, such as `NOT NULL`.
    pub constraint_names: Vec<&'a str>,
}

impl<'a> ColumnDef<'a> {
    /// A nullable column with no modifiers.
    #[must_use]
    pub fn new(name: &'a str, column_type: Option<&'a str>) -> Self {
        Self {
            name,
            column_type: column_type.map(Cow::Borrowed),
            type_args: Vec::new(),
            nullable: true,
            unique: false,
            primary_key: false,
            default: None,
            extra: TokenSpan::default(),
            constraint_names: Vec::new(),
        }
    }
}

/// What happens to referencing rows when the referenced row changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ReferentialAction {
    /// `CASCADE`
    Cascade,
    /// `RESTRICT`
    Restrict,
    /// `NO ACTION`
    NoAction,
    /// `SET NULL`
    SetNull,
    /// `SET DEFAULT`
    SetDefault,
}

impl Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::Restrict => "RESTRICT",
            ReferentialAction::NoAction => "NO ACTION",
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::SetDefault => "SET DEFAULT",
        })
    }
}

/// A table-level constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Constraint<'a> {
    /// `PRIMARY KEY (columns)`
    PrimaryKey {
        /// Optional constraint name.
        name: Option<&'a str>,
        /// Key columns, in key order.
        columns: Vec<&'a str>,
    },
    /// `UNIQUE (columns)`
    Unique {
        /// Optional constraint name.
        name: Option<&'a str>,
        /// Columns that are unique together.
        columns: Vec<&'a str>,
    },
    /// `CHECK (expression)`
    Check {
        /// Optional constraint name.
        name: Option<&'a str>,
        /// The check expression, unparsed.
        expression: TokenSpan<'a>,
    },
    /// `FOREIGN KEY (columns) REFERENCES table (columns)`
    ForeignKey {
        /// Optional constraint name.
        name: Option<&'a str>,
        /// Referencing columns.
        columns: Vec<&'a str>,
        /// Referenced table.
        ref_table: QualifiedName<'a>,
        /// Referenced columns.
        ref_columns: Vec<&'a str>,
        /// `ON DELETE` action.
        on_delete: Option<ReferentialAction>,
        /// `ON UPDATE` action.
        on_update: Option<ReferentialAction>,
    },
}

impl<'a> Constraint<'a> {
    /// The constraint name, if one was given.
    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        match self {
            Constraint::PrimaryKey { name, .. }
            | Constraint::Unique { name, .. }
            | Constraint::Check { name, .. }
            | Constraint::ForeignKey { name, .. } => *name,
        }
    }
}

/// The flavour of a MySQL inline index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IndexKind {
    /// `KEY` / `INDEX`
    Plain,
    /// `FULLTEXT KEY`
    Fulltext,
    /// `SPATIAL KEY`
    Spatial,
}

/// A MySQL inline index such as `` KEY `idx_name` (`name`) ``.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IndexDef<'a> {
    /// Index flavour.
    pub kind: IndexKind,
    /// Optional index name.
    pub name: Option<&'a str>,
    /// Indexed columns, each possibly with a prefix length or sort order.
    pub columns: Vec<TokenSpan<'a>>,
}

/// A parsed `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableDef<'a> {
    /// The table name.
    pub name: QualifiedName<'a>,
    /// Whether the table was declared `TEMPORARY`.
    pub temporary: bool,
    /// Whether the statement carried `IF NOT EXISTS`.
    pub if_not_exists: bool,
    /// Columns, in declaration order.
    pub columns: Vec<ColumnDef<'a>>,
    /// Table constraints, in declaration order.
    pub constraints: Vec<Constraint<'a>>,
    /// MySQL inline indexes, in declaration order.
    pub indexes: Vec<IndexDef<'a>>,
    /// Table options after the closing parenthesis, such as `ENGINE=InnoDB`.
    pub options: TokenSpan<'a>,
    /// The dialect the statement was declared in, if known.
    pub dialect: Option<Dialect>,
}

impl<'a> TableDef<'a> {
    /// Find a column by name, ignoring quotes.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnDef<'a>> {
        let wanted = unquote(name);
        self.columns.iter().find(|c| unquote(c.name) == wanted)
    }

    /// The column names, as written.
    #[must_use]
    pub fn column_names(&self) -> Vec<&'a str> {
        self.columns.iter().map(|c| c.name).collect()
    }
}

/// A parsed `INSERT INTO ... VALUES (...)` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InsertStmt<'a> {
    /// Target table.
    pub table: QualifiedName<'a>,
    /// Explicit column list, if one was given.
    pub columns: Option<Vec<&'a str>>,
    /// Values of the single tuple, each kept unparsed.
    pub values: Vec<TokenSpan<'a>>,
}
