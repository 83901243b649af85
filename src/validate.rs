//! Optional consistency checks of inserts against declared tables.
//!
//! None of these checks stop a conversion: the converter reports each issue
//! as a warning and writes the statement anyway.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Display};

use hashbrown::HashSet;

use crate::catalog::Catalog;
use crate::identifier::unquote;
use crate::sql::InsertStmt;

/// A problem found by [`validate_insert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// The target table was never declared.
    UnknownTable {
        /// Table name, unquoted.
        table: String,
    },
    /// The explicit column list and the value tuple differ in length.
    ColumnCountMismatch {
        /// Table name, unquoted.
        table: String,
        /// Number of listed columns.
        columns: usize,
        /// Number of values.
        values: usize,
    },
    /// Without a column list, the value tuple does not cover the table.
    ValueCountMismatch {
        /// Table name, unquoted.
        table: String,
        /// Number of declared columns.
        expected: usize,
        /// Number of values.
        values: usize,
    },
    /// A listed column is not declared in the table.
    UnknownColumn {
        /// Table name, unquoted.
        table: String,
        /// Column name, unquoted.
        column: String,
    },
    /// A column is listed more than once.
    DuplicateColumn {
        /// Table name, unquoted.
        table: String,
        /// Column name, unquoted.
        column: String,
    },
}

impl Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::UnknownTable { table } => {
                write!(f, "insert into undeclared table {table}")
            }
            ValidationIssue::ColumnCountMismatch {
                table,
                columns,
                values,
            } => write!(
                f,
                "insert into {table} lists {columns} columns but {values} values"
            ),
            ValidationIssue::ValueCountMismatch {
                table,
                expected,
                values,
            } => write!(
                f,
                "insert into {table} has {values} values but the table has {expected} columns"
            ),
            ValidationIssue::UnknownColumn { table, column } => {
                write!(f, "insert into {table} names undeclared column {column}")
            }
            ValidationIssue::DuplicateColumn { table, column } => {
                write!(f, "insert into {table} lists column {column} twice")
            }
        }
    }
}

/// Check an insert against the tables declared so far.
///
/// Column and value counts are compared even when the table is unknown.
#[must_use]
pub fn validate_insert(insert: &InsertStmt<'_>, catalog: &Catalog<'_>) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let table_name = insert.table.key().into_owned();
    let table = catalog.get(insert.table.last());
    let values = insert.values.len();

    if table.is_none() {
        issues.push(ValidationIssue::UnknownTable {
            table: table_name.clone(),
        });
    }

    match &insert.columns {
        Some(columns) => {
            if columns.len() != values {
                issues.push(ValidationIssue::ColumnCountMismatch {
                    table: table_name.clone(),
                    columns: columns.len(),
                    values,
                });
            }
            let mut seen: HashSet<Cow<'_, str>> = HashSet::with_capacity(columns.len());
            for column in columns {
                let name = unquote(column);
                if table.is_some_and(|t| t.column(&name).is_none()) {
                    issues.push(ValidationIssue::UnknownColumn {
                        table: table_name.clone(),
                        column: name.clone().into_owned(),
                    });
                }
                if !seen.insert(name.clone()) {
                    issues.push(ValidationIssue::DuplicateColumn {
                        table: table_name.clone(),
                        column: name.into_owned(),
                    });
                }
            }
        }
        None => {
            if let Some(expected) = table.map(|t| t.columns.len()).filter(|&n| n != values) {
                issues.push(ValidationIssue::ValueCountMismatch {
                    table: table_name,
                    expected,
                    values,
                });
            }
        }
    }

    issues
}
