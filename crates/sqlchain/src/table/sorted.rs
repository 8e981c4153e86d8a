use sqlchain_core::{
    expr::{ColumnRef, Predicate, ProjectionMap, SortKey},
    SelectStatement,
};

use super::Source;
use crate::{columns::Scope, query::Query};

/// A read with one or more ORDER BY keys, applied in the order they were added.
#[derive(Debug, Clone)]
pub struct SortedTable {
    source: Source,
    filter: Option<Predicate>,
    keys: Vec<SortKey>,
}

impl SortedTable {
    pub(crate) fn new(source: Source, filter: Option<Predicate>, key: SortKey) -> Self {
        Self {
            source,
            filter,
            keys: vec![key],
        }
    }

    fn push(&self, key: SortKey) -> SortedTable {
        let mut sorted = self.clone();
        sorted.keys.push(key);
        sorted
    }

    pub fn then_by<F>(&self, f: F) -> SortedTable
    where
        F: for<'a> FnOnce(&'a Scope) -> &'a ColumnRef,
    {
        self.push(self.source.sort_key(f, false))
    }

    pub fn then_descendingly_by<F>(&self, f: F) -> SortedTable
    where
        F: for<'a> FnOnce(&'a Scope) -> &'a ColumnRef,
    {
        self.push(self.source.sort_key(f, true))
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    fn select_statement(&self) -> SelectStatement {
        let statement = self.source.select_statement();
        let statement = match &self.filter {
            Some(predicate) => statement.filter(predicate.clone()),
            None => statement,
        };
        self.keys
            .iter()
            .cloned()
            .fold(statement, SelectStatement::order_by)
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
}

#[cfg(test)]
mod tests {
    use crate::{Table, Value};

    fn blog() -> Table {
        Table::new(
            "blog",
            [("id", "id"), ("title", "title"), ("publishedAt", "published_at")],
        )
    }

    #[test]
    fn test_multiple_keys_keep_order() {
        let statement = blog()
            .sort_descendingly_by(|b| &b["publishedAt"])
            .then_by(|b| &b["title"])
            .select()
            .generate()
            .unwrap();

        assert_eq!(
            statement.sql,
            "SELECT *\nFROM blog t1\nORDER BY t1.published_at DESC, t1.title ASC"
        );
        assert!(statement.params.is_empty());
    }

    #[test]
    fn test_filtered_sorted_get() {
        let statement = blog()
            .filter(|b| b["id"].greater_than(10))
            .sort_by(|b| &b["id"])
            .get(|b| &b["title"])
            .limit(5)
            .generate()
            .unwrap();

        assert_eq!(
            statement.sql,
            "SELECT t1.title\nFROM blog t1\nWHERE t1.id > ?\nORDER BY t1.id ASC\nLIMIT 5"
        );
        assert_eq!(statement.params, vec![Value::Integer(10)]);
    }

    #[test]
    fn test_sorting_leaves_receiver_untouched() {
        let sorted = blog().sort_by(|b| &b["id"]);
        let _ = sorted.then_by(|b| &b["title"]);
        assert_eq!(sorted.keys().len(), 1);
    }
}
