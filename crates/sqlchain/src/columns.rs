//! Column capabilities handed to caller callbacks.
//!
//! A [`Columns`] value exposes one [`ColumnRef`] per field key of a table,
//! already bound to the table's position in the statement. A [`Scope`] holds
//! the capabilities of every bound table, primary table first.

use std::ops::Index;

use sqlchain_core::expr::ColumnRef;

use crate::table::TableDef;

/// Field key → column reference, for one positionally bound table.
#[derive(Debug, Clone)]
pub struct Columns {
    table: String,
    index: usize,
    columns: Vec<(String, ColumnRef)>,
}

impl Columns {
    pub(crate) fn new(index: usize, def: &TableDef) -> Self {
        Self {
            table: def.name().to_string(),
            index,
            columns: def
                .mapping()
                .map(|(field, column)| (field.to_string(), ColumnRef::new(index, column)))
                .collect(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&ColumnRef> {
        self.columns
            .iter()
            .find(|(key, _)| key == field)
            .map(|(_, column)| column)
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn table_index(&self) -> usize {
        self.index
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(field, _)| field.as_str())
    }
}

impl Index<&str> for Columns {
    type Output = ColumnRef;

    /// # Panics
    ///
    /// Panics if the table has no field with this key.
    fn index(&self, field: &str) -> &ColumnRef {
        match self.get(field) {
            Some(column) => column,
            None => panic!("no field `{}` on table `{}`", field, self.table),
        }
    }
}

/// Capabilities of every table bound by a query.
///
/// Indexing by `usize` selects a table; indexing by field key reads the
/// primary table, so single-table callbacks read `b["id"]` and joined
/// callbacks read `t[1]["id"]`.
#[derive(Debug, Clone)]
pub struct Scope {
    tables: Vec<Columns>,
}

impl Scope {
    pub(crate) fn new<'a>(defs: impl IntoIterator<Item = &'a TableDef>) -> Self {
        Self {
            tables: defs
                .into_iter()
                .enumerate()
                .map(|(index, def)| Columns::new(index, def))
                .collect(),
        }
    }

    pub fn table(&self, index: usize) -> Option<&Columns> {
        self.tables.get(index)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Index<usize> for Scope {
    type Output = Columns;

    fn index(&self, index: usize) -> &Columns {
        &self.tables[index]
    }
}

impl Index<&str> for Scope {
    type Output = ColumnRef;

    fn index(&self, field: &str) -> &ColumnRef {
        &self.tables[0][field]
    }
}
