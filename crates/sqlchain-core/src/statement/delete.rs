use tracing::trace;

use crate::{
    error::Result,
    expr::Predicate,
    statement::{clause::Clauses, Statement},
    traits::SqlContext,
};

/// `DELETE FROM table [WHERE ...]`.
///
/// Deletes are single-table statements, so columns compile bare.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    pub from: String,
    pub filter: Option<Predicate>,
}

impl DeleteStatement {
    pub fn from(table: impl Into<String>) -> Self {
        Self {
            from: table.into(),
            filter: None,
        }
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    pub fn build(&self) -> Result<Statement> {
        let ctx = SqlContext::bare();
        let mut clauses = Clauses::default();

        clauses.push(format!("DELETE FROM {}", self.from));
        if let Some(filter) = &self.filter {
            clauses.push_expr("WHERE", filter, &ctx)?;
        }

        let statement = clauses.finish();
        trace!(
            parameters = statement.params.len(),
            "compiled delete statement"
        );
        Ok(statement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::CompileError, expr::ColumnRef, value::Value};

    #[test]
    fn test_delete_all() {
        let statement = DeleteStatement::from("blog").build().unwrap();
        assert_eq!(statement.sql, "DELETE FROM blog");
        assert!(statement.params.is_empty());
    }

    #[test]
    fn test_filtered_delete_is_unaliased() {
        let statement = DeleteStatement::from("blog")
            .filter(ColumnRef::new(0, "id").equals(1))
            .build()
            .unwrap();
        assert_eq!(statement.sql, "DELETE FROM blog\nWHERE id = ?");
        assert_eq!(statement.params, vec![Value::Integer(1)]);
    }

    #[test]
    fn test_delete_rejects_other_tables() {
        let err = DeleteStatement::from("blog")
            .filter(ColumnRef::new(1, "id").equals(1))
            .build()
            .unwrap_err();
        assert_eq!(err, CompileError::UnboundTable { index: 1, bound: 1 });
    }
}
