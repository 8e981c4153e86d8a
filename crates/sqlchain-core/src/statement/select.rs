//! `SELECT` statements.

use tracing::trace;

use crate::{
    error::Result,
    expr::{Join, Predicate, Projection, SortKey},
    statement::{
        clause::{check_joins, Clauses},
        Statement,
    },
    traits::SqlContext,
};

/// Description of a read.
///
/// Fragments are optional; absent fragments are skipped when compiling. The
/// primary table is always `t1` and the k-th join binds `t{k + 1}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectStatement {
    pub select: Option<Projection>,
    pub from: Option<String>,
    pub joins: Vec<Join>,
    pub filter: Option<Predicate>,
    pub order_by: Vec<SortKey>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl SelectStatement {
    /// Starts a `SELECT *` on the given table.
    pub fn from(table: impl Into<String>) -> Self {
        Self {
            select: Some(Projection::Wildcard),
            from: Some(table.into()),
            ..Self::default()
        }
    }

    /// Replaces the projection.
    pub fn select(mut self, projection: impl Into<Projection>) -> Self {
        self.select = Some(projection.into());
        self
    }

    /// Appends an `INNER JOIN`.
    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    /// Applies a WHERE condition, AND-combined with any existing one.
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    /// Appends an ORDER BY key.
    pub fn order_by(mut self, key: SortKey) -> Self {
        self.order_by.push(key);
        self
    }

    /// Limit the number of results
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set query offset
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    fn context(&self) -> SqlContext {
        SqlContext::qualified(self.joins.len() + 1)
    }

    /// FROM, joins and WHERE, in that order.
    fn push_source(&self, clauses: &mut Clauses, ctx: &SqlContext) -> Result<()> {
        if let Some(from) = &self.from {
            clauses.push(format!("FROM {} t1", from));
        }
        clauses.push_joins(&self.joins, ctx)?;
        if let Some(filter) = &self.filter {
            clauses.push_expr("WHERE", filter, ctx)?;
        }
        Ok(())
    }

    /// ORDER BY, LIMIT and OFFSET.
    fn push_window(&self, clauses: &mut Clauses, ctx: &SqlContext) -> Result<()> {
        clauses.push_list("ORDER BY", &self.order_by, ctx)?;
        if let Some(limit) = self.limit {
            clauses.push(format!("LIMIT {}", limit));
        }
        if let Some(offset) = self.offset {
            clauses.push(format!("OFFSET {}", offset));
        }
        Ok(())
    }

    pub fn build(&self) -> Result<Statement> {
        check_joins(&self.joins)?;
        let ctx = self.context();
        let mut clauses = Clauses::default();

        if let Some(select) = &self.select {
            clauses.push_expr("SELECT", select, &ctx)?;
        }
        self.push_source(&mut clauses, &ctx)?;
        self.push_window(&mut clauses, &ctx)?;

        let statement = clauses.finish();
        trace!(
            joins = self.joins.len(),
            parameters = statement.params.len(),
            "compiled select statement"
        );
        Ok(statement)
    }

    /// Compiles the `COUNT(*)` form of this read.
    ///
    /// Without LIMIT/OFFSET the projection is replaced by `COUNT(*)` and the
    /// ordering is dropped. Otherwise the windowed read, projecting `1`, is
    /// wrapped in a subquery. Parameters are unchanged either way.
    pub fn build_count(&self) -> Result<Statement> {
        check_joins(&self.joins)?;
        let ctx = self.context();
        let mut clauses = Clauses::default();

        if self.limit.is_none() && self.offset.is_none() {
            clauses.push("SELECT COUNT(*)");
            self.push_source(&mut clauses, &ctx)?;
        } else {
            clauses.push("SELECT COUNT(*) FROM (");
            clauses.push("SELECT 1");
            self.push_source(&mut clauses, &ctx)?;
            self.push_window(&mut clauses, &ctx)?;
            clauses.push(") counted");
        }

        let statement = clauses.finish();
        trace!(
            parameters = statement.params.len(),
            "compiled count statement"
        );
        Ok(statement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::CompileError,
        expr::{and, or, ColumnRef, ProjectionMap, TableRef},
        value::Value,
    };

    fn blog(column: &str) -> ColumnRef {
        ColumnRef::new(0, column)
    }

    fn joined() -> SelectStatement {
        SelectStatement::from("blog")
            .join(Join::new(
                TableRef::new(1, "authors"),
                blog("author_id").equals(&ColumnRef::new(1, "id")),
            ))
            .join(Join::new(
                TableRef::new(2, "categories"),
                blog("category_id").equals(&ColumnRef::new(2, "id")),
            ))
    }

    #[test]
    fn test_select_all() {
        let statement = SelectStatement::from("blog").build().unwrap();
        assert_eq!(statement.sql, "SELECT *\nFROM blog t1");
        assert!(statement.params.is_empty());
    }

    #[test]
    fn test_filtered_select() {
        let statement = SelectStatement::from("blog")
            .filter(and(blog("author_id").equals(1), blog("category_id").equals(2)))
            .build()
            .unwrap();
        assert_eq!(
            statement.sql,
            "SELECT *\nFROM blog t1\nWHERE t1.author_id = ? AND t1.category_id = ?"
        );
        assert_eq!(statement.params, vec![Value::Integer(1), Value::Integer(2)]);
    }

    #[test]
    fn test_repeated_filter_is_and_combined() {
        let statement = SelectStatement::from("blog")
            .filter(blog("id").equals(1))
            .filter(blog("title").is_not_null())
            .build()
            .unwrap();
        assert_eq!(
            statement.sql,
            "SELECT *\nFROM blog t1\nWHERE t1.id = ? AND t1.title IS NOT NULL"
        );
    }

    #[test]
    fn test_joins_precede_where() {
        let statement = joined()
            .select(
                ProjectionMap::new()
                    .column("id", &blog("id"))
                    .nested(
                        "category",
                        ProjectionMap::new().column("name", &ColumnRef::new(2, "name")),
                    ),
            )
            .filter(ColumnRef::new(2, "name").equals("name"))
            .build()
            .unwrap();
        assert_eq!(
            statement.sql,
            "SELECT t1.id AS \"id\", t3.name AS \"name\"\n\
             FROM blog t1\n\
             INNER JOIN authors t2 ON t1.author_id = t2.id\n\
             INNER JOIN categories t3 ON t1.category_id = t3.id\n\
             WHERE t3.name = ?"
        );
        assert_eq!(statement.params, vec![Value::from("name")]);
    }

    #[test]
    fn test_join_parameters_precede_where_parameters() {
        let statement = SelectStatement::from("blog")
            .join(Join::new(
                TableRef::new(1, "authors"),
                and(
                    blog("author_id").equals(&ColumnRef::new(1, "id")),
                    ColumnRef::new(1, "active").equals(true),
                ),
            ))
            .filter(blog("id").equals(7))
            .build()
            .unwrap();
        assert_eq!(statement.params, vec![Value::Bool(true), Value::Integer(7)]);
        assert_eq!(statement.placeholder_count(), statement.params.len());
    }

    #[test]
    fn test_order_limit_offset() {
        let statement = SelectStatement::from("blog")
            .order_by(blog("published").descending())
            .order_by(blog("title").ascending())
            .limit(10)
            .offset(20)
            .build()
            .unwrap();
        assert_eq!(
            statement.sql,
            "SELECT *\nFROM blog t1\nORDER BY t1.published DESC, t1.title ASC\nLIMIT 10\nOFFSET 20"
        );
        assert!(statement.params.is_empty());
    }

    #[test]
    fn test_single_column_get() {
        let statement = SelectStatement::from("blog")
            .select(blog("title"))
            .filter(blog("id").equals("1"))
            .build()
            .unwrap();
        assert_eq!(statement.sql, "SELECT t1.title\nFROM blog t1\nWHERE t1.id = ?");
    }

    #[test]
    fn test_missing_from_passes_through() {
        let statement = SelectStatement {
            select: Some(Projection::Wildcard),
            ..SelectStatement::default()
        }
        .build()
        .unwrap();
        assert_eq!(statement.sql, "SELECT *");
    }

    #[test]
    fn test_count_replaces_projection() {
        let statement = SelectStatement::from("blog")
            .filter(and(
                blog("author_id").equals(1),
                or(blog("category_id").equals(2), blog("category_id").equals(3)),
            ))
            .order_by(blog("id").ascending())
            .build_count()
            .unwrap();
        assert_eq!(
            statement.sql,
            "SELECT COUNT(*)\nFROM blog t1\nWHERE t1.author_id = ? AND (t1.category_id = ? OR t1.category_id = ?)"
        );
        assert_eq!(
            statement.params,
            vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]
        );
    }

    #[test]
    fn test_count_wraps_windowed_read() {
        let statement = SelectStatement::from("blog")
            .filter(blog("category_id").equals(1))
            .limit(5)
            .build_count()
            .unwrap();
        assert_eq!(
            statement.sql,
            "SELECT COUNT(*) FROM (\nSELECT 1\nFROM blog t1\nWHERE t1.category_id = ?\nLIMIT 5\n) counted"
        );
        assert_eq!(statement.params, vec![Value::Integer(1)]);
    }

    #[test]
    fn test_windowed_count_over_joins_selects_constant() {
        let statement = joined()
            .filter(ColumnRef::new(1, "name").equals("ann"))
            .order_by(blog("id").ascending())
            .offset(3)
            .build_count()
            .unwrap();
        assert_eq!(
            statement.sql,
            "SELECT COUNT(*) FROM (\n\
             SELECT 1\n\
             FROM blog t1\n\
             INNER JOIN authors t2 ON t1.author_id = t2.id\n\
             INNER JOIN categories t3 ON t1.category_id = t3.id\n\
             WHERE t2.name = ?\n\
             ORDER BY t1.id ASC\n\
             OFFSET 3\n\
             ) counted"
        );
        assert_eq!(statement.params, vec![Value::from("ann")]);
    }

    #[test]
    fn test_column_of_unjoined_table_is_rejected() {
        let err = SelectStatement::from("blog")
            .filter(ColumnRef::new(1, "name").equals("x"))
            .build()
            .unwrap_err();
        assert_eq!(err, CompileError::UnboundTable { index: 1, bound: 1 });
    }

    #[test]
    fn test_join_order_is_checked() {
        let err = SelectStatement::from("blog")
            .join(Join::new(
                TableRef::new(2, "authors"),
                blog("author_id").equals(&ColumnRef::new(2, "id")),
            ))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            CompileError::JoinOrder {
                position: 0,
                expected: 1,
                found: 2
            }
        );
    }
}
