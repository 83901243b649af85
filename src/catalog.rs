//! Tables declared so far in a conversion run.

use indexmap::IndexMap as IndexMapRaw;

use alloc::string::String;

use crate::sql::TableDef;

/// `IndexMap` alias using hashbrown's default hasher for `no_std` compatibility.
type IndexMap<K, V> = IndexMapRaw<K, V, hashbrown::DefaultHashBuilder>;

/// Declaration-ordered map from table name to its definition.
///
/// Tables are keyed by the unquoted final segment of their name, so
/// `` `db`.`users` ``, `[users]` and `users` all refer to the same entry.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Catalog<'a> {
    tables: IndexMap<String, TableDef<'a>>,
}

impl<'a> Catalog<'a> {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a table definition.
    ///
    /// A table with the same name is replaced in place, keeping its original
    /// position; the replaced definition is returned.
    pub fn insert(&mut self, table: TableDef<'a>) -> Option<TableDef<'a>> {
        self.tables.insert(table.name.key().into_owned(), table)
    }

    /// Look a table up by name, quoted or not.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TableDef<'a>> {
        self.tables.get(crate::identifier::unquote(name).as_ref())
    }

    /// Tables in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &TableDef<'a>> {
        self.tables.values()
    }

    /// Number of tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether no table has been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
