//! Join specifications.

use crate::{
    error::Result,
    expr::logical::Predicate,
    traits::{table_alias, Expression, SqlContext},
    value::Value,
};

/// A table bound at a fixed position of the statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub index: usize,
    pub name: String,
}

impl TableRef {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }

    /// `name tN`, as used in FROM, UPDATE and JOIN clauses.
    pub fn access(&self) -> String {
        format!("{} {}", self.name, table_alias(self.index))
    }
}

/// `INNER JOIN other ON predicate`.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub other_table: TableRef,
    pub on: Predicate,
}

impl Join {
    pub fn new(other_table: TableRef, on: Predicate) -> Self {
        Self {
            other_table,
            on,
        }
    }
}

impl Expression for Join {
    fn to_sql(&self, ctx: &SqlContext, params: &mut Vec<Value>) -> Result<String> {
        let on = self.on.to_sql(ctx, params)?;
        Ok(format!("INNER JOIN {} ON {}", self.other_table.access(), on))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::ColumnRef;

    #[test]
    fn test_join_sql() {
        let join = Join::new(
            TableRef::new(1, "authors"),
            ColumnRef::new(0, "author_id").equals(&ColumnRef::new(1, "id")),
        );
        let mut params = vec![];
        let sql = join.to_sql(&SqlContext::qualified(2), &mut params).unwrap();
        assert_eq!(sql, "INNER JOIN authors t2 ON t1.author_id = t2.id");
        assert!(params.is_empty());
    }
}
