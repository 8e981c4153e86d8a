//! Sort keys for `ORDER BY`.

use crate::{
    error::Result,
    expr::column::ColumnRef,
    traits::{Expression, SqlContext},
    value::Value,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        }
    }
}

/// A column plus the direction chosen when the key was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column: ColumnRef,
    pub direction: Direction,
}

impl SortKey {
    pub fn new(column: ColumnRef, direction: Direction) -> Self {
        Self {
            column,
            direction,
        }
    }
}

impl Expression for SortKey {
    fn to_sql(&self, ctx: &SqlContext, params: &mut Vec<Value>) -> Result<String> {
        let column = self.column.to_sql(ctx, params)?;
        Ok(format!("{} {}", column, self.direction.as_sql()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_sql() {
        let mut params = vec![];
        let key = ColumnRef::new(1, "last_name").descending();
        assert_eq!(
            key.to_sql(&SqlContext::qualified(2), &mut params).unwrap(),
            "t2.last_name DESC"
        );
        assert!(params.is_empty());
    }
}
