//! Table handles.
//!
//! Every handle is an immutable value: each chaining call returns a new
//! handle and leaves the receiver untouched, so one base handle can be
//! shared and composed from several places (or threads) at once.
//!
//! - [`Table`]: an unfiltered table; entry point for reads, inserts and joins.
//! - [`FilteredTable`]: a table (or joined tables) with a WHERE predicate.
//! - [`SortedTable`]: a read with one or more ORDER BY keys.
//! - [`JoinedTables`]: a primary table plus inner joins.

mod filtered;
mod joined;
mod sorted;

use std::sync::Arc;

use sqlchain_core::{
    expr::{ColumnRef, Join, Predicate, Projection, ProjectionMap, SortKey, TableRef},
    DeleteStatement, InsertStatement, SelectStatement, Statement, TruncateStatement, Value,
};
use tracing::debug;

pub use filtered::FilteredTable;
pub use joined::JoinedTables;
pub use sorted::SortedTable;

use crate::{
    columns::Scope,
    error::{Result, TableError},
    query::Query,
};

/// A table name plus its ordered field key → storage column mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDef {
    name: String,
    columns: Vec<(String, String)>,
}

impl TableDef {
    pub fn new<I, K, V>(name: impl Into<String>, mapping: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            columns: mapping
                .into_iter()
                .map(|(field, column)| (field.into(), column.into()))
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `(field, column)` pairs in declaration order.
    pub fn mapping(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .map(|(field, column)| (field.as_str(), column.as_str()))
    }

    pub fn column_for(&self, field: &str) -> Option<&str> {
        self.mapping()
            .find(|(key, _)| *key == field)
            .map(|(_, column)| column)
    }

    fn unknown_field(&self, field: &str) -> TableError {
        TableError::UnknownField {
            table: self.name.clone(),
            field: field.to_string(),
        }
    }

    /// Resolves a partial record to `(column, value)` assignments.
    pub(crate) fn resolve_partial<R, K, V>(&self, record: R) -> Result<Vec<(String, Value)>>
    where
        R: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        record
            .into_iter()
            .map(|(field, value)| {
                let field = field.as_ref();
                self.column_for(field)
                    .map(|column| (column.to_string(), value.into()))
                    .ok_or_else(|| self.unknown_field(field))
            })
            .collect()
    }

    /// Resolves a complete record to one value per mapped column, in mapping order.
    pub(crate) fn resolve_row<R, K, V>(&self, record: R) -> Result<Vec<Value>>
    where
        R: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut provided: Vec<(String, Value)> = Vec::new();
        for (field, value) in record {
            let field = field.as_ref();
            if self.column_for(field).is_none() {
                return Err(self.unknown_field(field));
            }
            provided.push((field.to_string(), value.into()));
        }

        self.mapping()
            .map(|(field, _)| {
                provided
                    .iter()
                    .rev()
                    .find(|(key, _)| key == field)
                    .map(|(_, value)| value.clone())
                    .ok_or_else(|| TableError::MissingField {
                        table: self.name.clone(),
                        field: field.to_string(),
                    })
            })
            .collect()
    }
}

/// The ordered tables a query binds, plus the joins that bound them.
#[derive(Debug, Clone)]
pub(crate) struct Source {
    tables: Vec<Arc<TableDef>>,
    joins: Vec<Join>,
}

impl Source {
    fn single(def: Arc<TableDef>) -> Self {
        Self {
            tables: vec![def],
            joins: vec![],
        }
    }

    pub fn scope(&self) -> Scope {
        Scope::new(self.tables.iter().map(AsRef::as_ref))
    }

    pub fn primary(&self) -> &TableDef {
        &self.tables[0]
    }

    pub fn table(&self, index: usize) -> Result<&TableDef> {
        self.tables
            .get(index)
            .map(AsRef::as_ref)
            .ok_or(TableError::TableIndexOutOfRange {
                index,
                tables: self.tables.len(),
            })
    }

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    pub fn is_joined(&self) -> bool {
        !self.joins.is_empty()
    }

    /// Binds `other` at the next table index.
    pub fn join<F>(&self, other: &Table, on: F) -> Self
    where
        F: FnOnce(&Scope) -> Predicate,
    {
        let mut source = self.clone();
        let index = source.tables.len();
        source.tables.push(other.def.clone());
        let predicate = on(&source.scope());
        source
            .joins
            .push(Join::new(TableRef::new(index, other.name()), predicate));
        debug!(table = other.name(), index = index, "joined table");
        source
    }

    pub fn select_statement(&self) -> SelectStatement {
        self.joins.iter().cloned().fold(
            SelectStatement::from(self.primary().name()),
            SelectStatement::join,
        )
    }

    pub fn sort_key<F>(&self, f: F, descending: bool) -> SortKey
    where
        F: for<'a> FnOnce(&'a Scope) -> &'a ColumnRef,
    {
        let scope = self.scope();
        let column = f(&scope);
        if descending {
            column.descending()
        } else {
            column.ascending()
        }
    }

    pub fn projection<F>(&self, f: F) -> ProjectionMap
    where
        F: FnOnce(&Scope) -> ProjectionMap,
    {
        f(&self.scope())
    }

    pub fn column<F>(&self, f: F) -> Projection
    where
        F: for<'a> FnOnce(&'a Scope) -> &'a ColumnRef,
    {
        let scope = self.scope();
        f(&scope).into()
    }
}

/// An unfiltered table.
///
/// # Example
///
/// ```rust
/// use sqlchain::{and, Table, Value};
///
/// let blog = Table::new("blog", [("id", "id"), ("authorId", "author_id"), ("categoryId", "category_id")]);
///
/// let statement = blog
///     .filter(|b| and(b["authorId"].equals(1), b["categoryId"].equals(2)))
///     .select()
///     .generate()
///     .unwrap();
///
/// assert_eq!(
///     statement.sql,
///     "SELECT *\nFROM blog t1\nWHERE t1.author_id = ? AND t1.category_id = ?"
/// );
/// assert_eq!(statement.params, vec![Value::Integer(1), Value::Integer(2)]);
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    def: Arc<TableDef>,
    source: Source,
}

impl Table {
    pub fn new<I, K, V>(name: impl Into<String>, mapping: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::from_def(TableDef::new(name, mapping))
    }

    pub fn from_def(def: TableDef) -> Self {
        let def = Arc::new(def);
        Self {
            source: Source::single(def.clone()),
            def,
        }
    }

    pub fn def(&self) -> &TableDef {
        &self.def
    }

    pub fn name(&self) -> &str {
        self.def.name()
    }

    /// The column capability of this table at position 0.
    pub fn scope(&self) -> Scope {
        self.source.scope()
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

    /// Selects a (possibly nested) mapping of output keys to columns.
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

    /// Selects a single column.
    pub fn get<F>(&self, f: F) -> Query
    where
        F: for<'a> FnOnce(&'a Scope) -> &'a ColumnRef,
    {
        Query::rows(self.source.select_statement().select(self.source.column(f)))
    }

    pub fn count(&self) -> Query {
        Query::count(self.source.select_statement())
    }

    pub fn inner_join<F>(&self, other: &Table, on: F) -> JoinedTables
    where
        F: FnOnce(&Scope) -> Predicate,
    {
        JoinedTables::new(self.source.join(other, on))
    }

    fn insert_statement<I, R, K, V>(&self, records: I) -> Result<InsertStatement>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let columns = self.def.mapping().map(|(_, column)| column.to_string());
        let mut statement = InsertStatement::into(self.name()).columns(columns);
        let mut rows = 0;
        for record in records {
            statement = statement.row(self.def.resolve_row(record)?);
            rows += 1;
        }
        if rows == 0 {
            return Err(TableError::EmptyInsert {
                table: self.name().to_string(),
            });
        }
        Ok(statement)
    }

    pub fn insert<R, K, V>(&self, record: R) -> Result<Statement>
    where
        R: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.insert_batch([record])
    }

    /// Inserts several records as one statement with one value tuple per record.
    pub fn insert_batch<I, R, K, V>(&self, records: I) -> Result<Statement>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        debug!(table = self.name(), "generating insert statement");
        Ok(self.insert_statement(records)?.build()?)
    }

    pub fn replace<R, K, V>(&self, record: R) -> Result<Statement>
    where
        R: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.replace_batch([record])
    }

    pub fn replace_batch<I, R, K, V>(&self, records: I) -> Result<Statement>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        debug!(table = self.name(), "generating replace statement");
        Ok(self.insert_statement(records)?.replace().build()?)
    }

    /// Removes every row without scanning the table.
    pub fn truncate(&self) -> Statement {
        TruncateStatement::table(self.name()).build()
    }

    pub fn delete_all(&self) -> Result<Statement> {
        Ok(DeleteStatement::from(self.name()).build()?)
    }
}
