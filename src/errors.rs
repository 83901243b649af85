//! Submodule defining the errors used across the crate.

use core::fmt;

use crate::sql::ParseError;

/// Errors that abort a conversion run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A statement could not be tokenized or parsed.
    #[error("Statement {index}: {source}")]
    Statement {
        /// 1-based ordinal of the statement in the input.
        index: usize,
        /// The underlying parse error.
        source: ParseError,
    },
    /// The output or diagnostics sink failed.
    #[error("Failed to write converted SQL")]
    Write(#[from] fmt::Error),
}
