//! SQL tokenizer and statement parsers.
//!
//! This is not a general SQL parser: it understands exactly the two statement
//! shapes a dump carries data in, `CREATE TABLE` and `INSERT INTO ... VALUES`,
//! and classifies everything else as ignorable. Expressions (defaults, checks,
//! values) are never interpreted; they are kept as [`TokenSpan`]s and written
//! back verbatim.

mod ast;
mod create_table;
mod insert;
mod lexer;
mod parser;
mod stream;

pub use ast::{
    ColumnDef, Constraint, IndexDef, IndexKind, InsertStmt, QualifiedName, ReferentialAction,
    TableDef,
};
pub use create_table::parse_create_table;
pub use insert::parse_insert;
pub use lexer::{Lexer, LexerError, Statements, Token, TokenKind, tokenize};
pub use parser::{ParseError, Statement, StatementKind, classify, parse_all, parse_statement};
pub use stream::{
    TokenSpan, advance_until_matches, consume_if_matches, extract_parenthesized_groups, matches,
    matches_keywords, matches_prefix, skip_parenthesized,
};
