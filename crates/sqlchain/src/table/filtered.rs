use sqlchain_core::{
    expr::{ColumnRef, Predicate, ProjectionMap},
    DeleteStatement, SelectStatement, Statement, UpdateStatement, Value,
};
use tracing::debug;

use super::{SortedTable, Source};
use crate::{
    columns::Scope,
    error::{Result, TableError},
    query::Query,
};

/// A table, or joined tables, restricted by a WHERE predicate.
#[derive(Debug, Clone)]
pub struct FilteredTable {
    source: Source,
    predicate: Predicate,
}

impl FilteredTable {
    pub(crate) fn new(source: Source, predicate: Predicate) -> Self {
        Self { source, predicate }
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Narrows the filter; the new predicate is AND-combined with the current one.
    pub fn filter<F>(&self, f: F) -> FilteredTable
    where
        F: FnOnce(&Scope) -> Predicate,
    {
        let predicate = f(&self.source.scope());
        FilteredTable::new(self.source.clone(), self.predicate.clone().and(predicate))
    }

    pub fn sort_by<F>(&self, f: F) -> SortedTable
    where
        F: for<'a> FnOnce(&'a Scope) -> &'a ColumnRef,
    {
        SortedTable::new(
            self.source.clone(),
            Some(self.predicate.clone()),
            self.source.sort_key(f, false),
        )
    }

    pub fn sort_descendingly_by<F>(&self, f: F) -> SortedTable
    where
        F: for<'a> FnOnce(&'a Scope) -> &'a ColumnRef,
    {
        SortedTable::new(
            self.source.clone(),
            Some(self.predicate.clone()),
            self.source.sort_key(f, true),
        )
    }

    fn select_statement(&self) -> SelectStatement {
        self.source
            .select_statement()
            .filter(self.predicate.clone())
    }

    pub fn select(&self) -> Query {
        Query::rows(self.select_statement())
    }

    pub fn map<F>(&self, f: F) -> Query
    where
        F: FnOnce(&Scope) -> ProjectionMap,
    {
        Query::rows(self.select_statement().select(self.source.projection(f)))
    }

    pub fn get<F>(&self, f: F) -> Query
    where
        F: for<'a> FnOnce(&'a Scope) -> &'a ColumnRef,
    {
        Query::rows(self.select_statement().select(self.source.column(f)))
    }

    pub fn count(&self) -> Query {
        Query::count(self.select_statement())
    }

    /// Updates the primary table's matching rows.
    pub fn update<R, K, V>(&self, record: R) -> Result<Statement>
    where
        R: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.update_table(0, record)
    }

    /// Updates the matching rows of the table bound at `index`.
    ///
    /// Record keys are field keys of that table; assignments are emitted in
    /// record order.
    pub fn update_table<R, K, V>(&self, index: usize, record: R) -> Result<Statement>
    where
        R: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let target = self.source.table(index)?;
        let assignments = target.resolve_partial(record)?;
        if assignments.is_empty() {
            return Err(TableError::EmptyUpdate {
                table: target.name().to_string(),
            });
        }
        debug!(
            table = target.name(),
            index = index,
            assignments = assignments.len(),
            "generating update statement"
        );

        let statement = self.source.joins().iter().cloned().fold(
            UpdateStatement::table(self.source.primary().name()),
            UpdateStatement::join,
        );
        let statement = assignments
            .into_iter()
            .fold(statement, |statement, (column, value)| {
                statement.set(ColumnRef::new(index, column), value)
            });

        Ok(statement.filter(self.predicate.clone()).build()?)
    }

    /// Deletes the matching rows. Only valid on a single table.
    pub fn delete(&self) -> Result<Statement> {
        if self.source.is_joined() {
            return Err(TableError::JoinedDelete);
        }
        debug!(table = self.source.primary().name(), "generating delete statement");
        Ok(DeleteStatement::from(self.source.primary().name())
            .filter(self.predicate.clone())
            .build()?)
    }
}
