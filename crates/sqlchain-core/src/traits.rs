//! Core traits that power the statement compiler.
//!
//! Every node of the expression model implements [`Expression`]. Compiling a
//! node returns its SQL fragment and appends the values it binds to a shared
//! parameter list, so placeholders and parameters are produced in the same
//! left-to-right pass and cannot drift apart.

use crate::{
    error::{CompileError, Result},
    value::Value,
};

/// How column references are rendered while compiling one statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlContext {
    /// Render `t{index + 1}.column` instead of the bare column name.
    pub qualified: bool,
    /// Number of tables bound by the statement (primary table + joins).
    pub bound_tables: usize,
}

impl SqlContext {
    /// Multi-table context with `bound_tables` aliased tables.
    pub const fn qualified(bound_tables: usize) -> Self {
        Self {
            qualified: true,
            bound_tables,
        }
    }

    /// Single-table context rendering bare column names.
    pub const fn bare() -> Self {
        Self {
            qualified: false,
            bound_tables: 1,
        }
    }

    pub(crate) fn check_bound(&self, index: usize) -> Result<()> {
        if index < self.bound_tables {
            Ok(())
        } else {
            Err(CompileError::UnboundTable {
                index,
                bound: self.bound_tables,
            })
        }
    }
}

/// A node that can be lowered to a SQL fragment.
///
/// # Example
///
/// ```rust
/// use sqlchain_core::{expr::ColumnRef, Expression, SqlContext};
///
/// let col = ColumnRef::new(0, "author_id");
/// let pred = col.equals(1);
/// let mut params = vec![];
/// let sql = pred.to_sql(&SqlContext::qualified(1), &mut params).unwrap();
/// assert_eq!(sql, "t1.author_id = ?");
/// assert_eq!(params.len(), 1);
/// ```
pub trait Expression {
    /// Converts this node into a SQL fragment and appends bound parameters.
    ///
    /// Placeholders are `?`; the i-th placeholder of the returned text binds
    /// to the i-th value appended to `params` by this call.
    fn to_sql(&self, ctx: &SqlContext, params: &mut Vec<Value>) -> Result<String>;
}

/// Table alias for a positional table index, 1-based.
pub fn table_alias(index: usize) -> String {
    format!("t{}", index + 1)
}
