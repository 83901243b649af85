//! The conversion driver.
//!
//! Statements are processed one at a time in source order: split, classify,
//! parse, write. Table definitions accumulate in a [`Catalog`] owned by the
//! [`Converter`], so later inserts can be validated against them. The first
//! statement that fails to parse aborts the run; whatever was written for
//! earlier statements stays written.

use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt::Write;

use crate::catalog::Catalog;
use crate::dialect::Dialect;
use crate::errors::Error;
use crate::preprocess::preprocess_mssql;
use crate::sql::{ParseError, Statement, Statements, parse_statement};
use crate::validate::validate_insert;
use crate::writer::SqlWriter;

/// Counts of what a run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// `CREATE TABLE` statements written.
    pub tables: usize,
    /// `INSERT` statements written.
    pub inserts: usize,
    /// Statements ignored because they are neither.
    pub skipped: usize,
}

/// Drives a conversion run and owns the tables declared during it.
#[derive(Debug, Clone, Default)]
pub struct Converter<'a> {
    input: Option<Dialect>,
    validate: bool,
    catalog: Catalog<'a>,
}

impl<'a> Converter<'a> {
    /// A converter for input in the given dialect, or dialect-agnostic input.
    #[must_use]
    pub fn new(input: Option<Dialect>) -> Self {
        Self {
            input,
            validate: false,
            catalog: Catalog::new(),
        }
    }

    /// Enable or disable insert validation against declared tables.
    #[must_use]
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// The input dialect.
    #[must_use]
    pub fn input(&self) -> Option<Dialect> {
        self.input
    }

    /// Tables declared so far.
    #[must_use]
    pub fn catalog(&self) -> &Catalog<'a> {
        &self.catalog
    }

    /// Give up the converter, keeping its tables.
    #[must_use]
    pub fn into_catalog(self) -> Catalog<'a> {
        self.catalog
    }

    /// Convert every statement of `src` into `writer`.
    ///
    /// SQL Server input must already have been through
    /// [`preprocess_mssql`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Statement`] for the first statement that does not
    /// tokenize or parse, and [`Error::Write`] if a sink fails.
    pub fn run<O: Write, D: Write>(
        &mut self,
        src: &'a str,
        writer: &mut SqlWriter<O, D>,
    ) -> Result<ConversionStats, Error> {
        let mut stats = ConversionStats::default();

        for (index, tokens) in Statements::new(src, self.input) {
            let parsed = tokens
                .map_err(ParseError::from)
                .and_then(|tokens| parse_statement(&tokens, self.input))
                .map_err(|source| Error::Statement { index, source })?;

            match parsed {
                Some(Statement::CreateTable(table)) => {
                    tracing::trace!(index, table = %table.name, "CREATE TABLE");
                    writer.write_create_table(&table)?;
                    if let Some(previous) = self.catalog.insert(table) {
                        tracing::debug!(index, table = %previous.name, "table redefined");
                    }
                    stats.tables += 1;
                }
                Some(Statement::Insert(insert)) => {
                    tracing::trace!(index, table = %insert.table, "INSERT");
                    if self.validate {
                        for issue in validate_insert(&insert, &self.catalog) {
                            writer.warn(issue)?;
                        }
                    }
                    writer.write_insert_stmt(&insert)?;
                    stats.inserts += 1;
                }
                None => {
                    tracing::debug!(index, "skipping unsupported statement");
                    stats.skipped += 1;
                }
            }
        }

        Ok(stats)
    }
}

/// Convert a whole dump held in memory.
///
/// Returns the converted SQL and the diagnostics. SQL Server input is
/// preprocessed first.
///
/// # Errors
///
/// Returns the first parse error. The SQL converted before the failing
/// statement is discarded with the sinks; drive a [`Converter`] with
/// [`Converter::run`] to keep it.
pub fn convert(src: &str, input: Option<Dialect>, output: Dialect) -> Result<(String, String), Error> {
    let src = if input == Some(Dialect::SqlServer) {
        Cow::Owned(preprocess_mssql(src))
    } else {
        Cow::Borrowed(src)
    };
    let mut writer = SqlWriter::new(output, String::new(), String::new());
    Converter::new(input).run(&src, &mut writer)?;
    Ok(writer.into_parts())
}
