//! Represents a reference to a column of a positionally bound table.
//!
//! `ColumnRef` ties a storage column name to the position of its table in
//! the statement's table sequence. Position 0 is the primary table and each
//! join adds the next index. It implements [`Expression`], and it is the
//! entry point for building comparisons and sort keys.

use crate::{
    error::Result,
    expr::{
        logical::Predicate,
        ops::{CompareOp, Comparison, IntoOperand},
        sort::{Direction, SortKey},
    },
    traits::{table_alias, Expression, SqlContext},
    value::Value,
};

/// A reference to `table[table_index].column_name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub table_index: usize,
    pub column_name: String,
}

impl ColumnRef {
    /// Creates a new column reference.
    ///
    /// # Parameters
    ///
    /// - `table_index`: position of the table in the statement (0 = primary)
    /// - `column_name`: the actual column name in the database (e.g., `"author_id"`)
    pub fn new(table_index: usize, column_name: impl Into<String>) -> Self {
        Self {
            table_index,
            column_name: column_name.into(),
        }
    }

    fn binary(&self, op: CompareOp, right: impl IntoOperand) -> Predicate {
        Predicate::Comparison(Comparison::Binary {
            op,
            left: self.clone().into_operand(),
            right: right.into_operand(),
        })
    }

    /// Creates a SQL `=` condition.
    pub fn equals(&self, right: impl IntoOperand) -> Predicate {
        self.binary(CompareOp::Equals, right)
    }

    /// Creates a SQL `<>` condition.
    pub fn not_equals(&self, right: impl IntoOperand) -> Predicate {
        self.binary(CompareOp::NotEquals, right)
    }

    /// Creates a SQL `<` condition.
    pub fn less_than(&self, right: impl IntoOperand) -> Predicate {
        self.binary(CompareOp::LessThan, right)
    }

    /// Creates a SQL `<=` condition.
    pub fn less_or_equal(&self, right: impl IntoOperand) -> Predicate {
        self.binary(CompareOp::LessOrEqual, right)
    }

    /// Creates a SQL `>` condition.
    pub fn greater_than(&self, right: impl IntoOperand) -> Predicate {
        self.binary(CompareOp::GreaterThan, right)
    }

    /// Creates a SQL `>=` condition.
    pub fn greater_or_equal(&self, right: impl IntoOperand) -> Predicate {
        self.binary(CompareOp::GreaterOrEqual, right)
    }

    /// Creates a SQL `IS NULL` condition.
    pub fn is_null(&self) -> Predicate {
        Predicate::Comparison(Comparison::IsNull(self.clone()))
    }

    /// Creates a SQL `IS NOT NULL` condition.
    pub fn is_not_null(&self) -> Predicate {
        Predicate::Comparison(Comparison::IsNotNull(self.clone()))
    }

    /// Ascending sort key on this column.
    pub fn ascending(&self) -> SortKey {
        SortKey::new(self.clone(), Direction::Ascending)
    }

    /// Descending sort key on this column.
    pub fn descending(&self) -> SortKey {
        SortKey::new(self.clone(), Direction::Descending)
    }
}

impl Expression for ColumnRef {
    fn to_sql(&self, ctx: &SqlContext, _params: &mut Vec<Value>) -> Result<String> {
        ctx.check_bound(self.table_index)?;
        if ctx.qualified {
            Ok(format!("{}.{}", table_alias(self.table_index), self.column_name))
        } else {
            Ok(self.column_name.clone())
        }
    }
}
