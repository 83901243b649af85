#![doc = include_str!("../README.md")]
#![no_std]
#![deny(clippy::mod_module_files)]

extern crate alloc;

pub mod catalog;
pub mod convert;
pub mod dialect;
pub mod errors;
pub mod identifier;
pub mod preprocess;
pub mod sql;
pub mod validate;
pub mod writer;

pub use catalog::Catalog;
pub use convert::{ConversionStats, Converter, convert};
pub use dialect::{Dialect, DialectParseError};
pub use errors::Error;
pub use identifier::{is_quoted, mangle, quote, unquote};
pub use preprocess::preprocess_mssql;
pub use sql::{
    ColumnDef, Constraint, IndexDef, IndexKind, InsertStmt, ParseError, QualifiedName,
    ReferentialAction, Statement, TableDef, TokenSpan,
};
pub use validate::{ValidationIssue, validate_insert};
pub use writer::SqlWriter;
