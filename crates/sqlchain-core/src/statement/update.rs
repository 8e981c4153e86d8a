use tracing::trace;

use crate::{
    error::Result,
    expr::{ColumnRef, Join, Predicate, TableRef},
    statement::{
        clause::{check_joins, Clauses},
        Statement,
    },
    traits::{Expression, SqlContext},
    value::Value,
};

/// `column = ?` inside a SET clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: ColumnRef,
    pub value: Value,
}

impl Expression for Assignment {
    fn to_sql(&self, ctx: &SqlContext, params: &mut Vec<Value>) -> Result<String> {
        let column = self.column.to_sql(ctx, params)?;
        params.push(self.value.clone());
        Ok(format!("{} = ?", column))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub table: String,
    pub joins: Vec<Join>,
    pub set: Vec<Assignment>,
    pub filter: Option<Predicate>,
}

impl UpdateStatement {
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            joins: vec![],
            set: vec![],
            filter: None,
        }
    }

    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    pub fn set<V: Into<Value>>(mut self, column: ColumnRef, value: V) -> Self {
        self.set.push(Assignment {
            column,
            value: value.into(),
        });
        self
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    /// UPDATE, joins, SET, WHERE; parameters follow the same order.
    pub fn build(&self) -> Result<Statement> {
        check_joins(&self.joins)?;
        let ctx = SqlContext::qualified(self.joins.len() + 1);
        let mut clauses = Clauses::default();

        clauses.push(format!("UPDATE {}", TableRef::new(0, &self.table).access()));
        clauses.push_joins(&self.joins, &ctx)?;
        clauses.push_list("SET", &self.set, &ctx)?;
        if let Some(filter) = &self.filter {
            clauses.push_expr("WHERE", filter, &ctx)?;
        }

        let statement = clauses.finish();
        trace!(
            assignments = self.set.len(),
            parameters = statement.params.len(),
            "compiled update statement"
        );
        Ok(statement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filtered_update() {
        let statement = UpdateStatement::table("blog")
            .set(ColumnRef::new(0, "title"), "x")
            .filter(ColumnRef::new(0, "id").equals(1))
            .build()
            .unwrap();
        assert_eq!(statement.sql, "UPDATE blog t1\nSET t1.title = ?\nWHERE t1.id = ?");
        assert_eq!(statement.params, vec![Value::from("x"), Value::Integer(1)]);
    }

    #[test]
    fn test_set_parameters_precede_where_parameters() {
        let statement = UpdateStatement::table("blog")
            .set(ColumnRef::new(0, "title"), "updated title")
            .set(ColumnRef::new(0, "teaser"), "updated teaser")
            .filter(ColumnRef::new(0, "id").equals(1))
            .build()
            .unwrap();
        assert_eq!(
            statement.sql,
            "UPDATE blog t1\nSET t1.title = ?, t1.teaser = ?\nWHERE t1.id = ?"
        );
        assert_eq!(
            statement.params,
            vec![
                Value::from("updated title"),
                Value::from("updated teaser"),
                Value::Integer(1)
            ]
        );
    }

    #[test]
    fn test_joined_update() {
        let statement = UpdateStatement::table("blog")
            .join(Join::new(
                TableRef::new(1, "authors"),
                ColumnRef::new(0, "author_id").equals(&ColumnRef::new(1, "id")),
            ))
            .set(ColumnRef::new(1, "last_name"), "Doe")
            .filter(ColumnRef::new(0, "id").equals(3))
            .build()
            .unwrap();
        assert_eq!(
            statement.sql,
            "UPDATE blog t1\nINNER JOIN authors t2 ON t1.author_id = t2.id\nSET t2.last_name = ?\nWHERE t1.id = ?"
        );
        assert_eq!(statement.params, vec![Value::from("Doe"), Value::Integer(3)]);
    }

    #[test]
    fn test_empty_set_is_skipped() {
        let statement = UpdateStatement::table("blog").build().unwrap();
        assert_eq!(statement.sql, "UPDATE blog t1");
    }
}
