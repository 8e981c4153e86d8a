use sqlchain_core::expr::{ColumnRef, Predicate, ProjectionMap};

use super::{FilteredTable, SortedTable, Source, Table};
use crate::{columns::Scope, query::Query};

/// A primary table plus one or more inner joins.
///
/// Callbacks receive a [`Scope`] with one entry per bound table in join
/// order: `t[0]` is the primary table, `t[1]` the first joined table and so on.
#[derive(Debug, Clone)]
pub struct JoinedTables {
    source: Source,
}

impl JoinedTables {
    pub(crate) fn new(source: Source) -> Self {
        Self { source }
    }

    /// Number of bound tables, primary included.
    pub fn table_count(&self) -> usize {
        self.source.joins().len() + 1
    }

    pub fn inner_join<F>(&self, other: &Table, on: F) -> JoinedTables
    where
        F: FnOnce(&Scope) -> Predicate,
    {
        JoinedTables::new(self.source.join(other, on))
    }

    pub fn filter<F>(&self, f: F) -> FilteredTable
    where
        F: FnOnce(&Scope) -> Predicate,
    {
        let predicate = f(&self.source.scope());
        FilteredTable::new(self.source.clone(), predicate)
    }

    pub fn sort_by<F>(&self, f: F) -> SortedTable
    where
        F: for<'a> FnOnce(&'a Scope) -> &'a ColumnRef,
    {
        SortedTable::new(self.source.clone(), None, self.source.sort_key(f, false))
    }

    pub fn sort_descendingly_by<F>(&self, f: F) -> SortedTable
    where
        F: for<'a> FnOnce(&'a Scope) -> &'a ColumnRef,
    {
        SortedTable::new(self.source.clone(), None, self.source.sort_key(f, true))
    }

    pub fn select(&self) -> Query {
        Query::rows(self.source.select_statement())
    }

    pub fn map<F>(&self, f: F) -> Query
    where
        F: FnOnce(&Scope) -> ProjectionMap,
    {
        Query::rows(
            self.source
                .select_statement()
                .select(self.source.projection(f)),
        )
    }

    pub fn get<F>(&self, f: F) -> Query
    where
        F: for<'a> FnOnce(&'a Scope) -> &'a ColumnRef,
    {
        Query::rows(self.source.select_statement().select(self.source.column(f)))
    }

    pub fn count(&self) -> Query {
        Query::count(self.source.select_statement())
    }
}
