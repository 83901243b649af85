//! Supported SQL dialects.

use core::fmt::{self, Display};
use core::str::FromStr;

use alloc::string::String;

/// A named SQL variant with its own identifier-quoting convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Dialect {
    /// MySQL and MariaDB.
    MySql,
    /// PostgreSQL.
    PostgreSql,
    /// SQLite 3.
    Sqlite,
    /// Oracle.
    Oracle,
    /// Microsoft SQL Server.
    SqlServer,
}

impl Dialect {
    /// Every supported dialect.
    pub const ALL: [Dialect; 5] = [
        Dialect::MySql,
        Dialect::PostgreSql,
        Dialect::Sqlite,
        Dialect::Oracle,
        Dialect::SqlServer,
    ];

    /// The opening and closing identifier delimiters of this dialect.
    #[must_use]
    pub fn quote_pair(self) -> (char, char) {
        match self {
            Dialect::MySql => ('`', '`'),
            Dialect::PostgreSql | Dialect::Oracle => ('"', '"'),
            Dialect::Sqlite | Dialect::SqlServer => ('[', ']'),
        }
    }

    /// The selector name used on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Dialect::MySql => "mysql",
            Dialect::PostgreSql => "postgresql",
            Dialect::Sqlite => "sqlite3",
            Dialect::Oracle => "oracle",
            Dialect::SqlServer => "mssql",
        }
    }

    /// Whether `KEY name (cols)` may appear inside `CREATE TABLE`.
    #[must_use]
    pub fn has_inline_indexes(self) -> bool {
        self == Dialect::MySql
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = DialectParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "postgresql" | "postgres" | "pg" => Ok(Dialect::PostgreSql),
            "sqlite3" | "sqlite" => Ok(Dialect::Sqlite),
            "oracle" => Ok(Dialect::Oracle),
            "mssql" | "sqlserver" => Ok(Dialect::SqlServer),
            _ => Err(DialectParseError(s.into())),
        }
    }
}

/// Error returned when a dialect selector is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown dialect '{0}', expected one of mysql, postgresql, sqlite3, oracle, mssql")]
pub struct DialectParseError(pub String);

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_names_round_trip() {
        for dialect in Dialect::ALL {
            assert_eq!(dialect.to_string().parse::<Dialect>(), Ok(dialect));
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!("Postgres".parse::<Dialect>(), Ok(Dialect::PostgreSql));
        assert_eq!("sqlite".parse::<Dialect>(), Ok(Dialect::Sqlite));
        assert_eq!("SQLServer".parse::<Dialect>(), Ok(Dialect::SqlServer));
    }

    #[test]
    fn test_unknown_dialect() {
        let err = "db2".parse::<Dialect>().unwrap_err();
        assert_eq!(err, DialectParseError("db2".into()));
        assert!(err.to_string().starts_with("Unknown dialect 'db2'"));
    }
}
