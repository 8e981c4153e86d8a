//! The statement compiler.
//!
//! Each statement kind has its own description type with chainable methods.
//! A description is a plain value: building it never mutates shared state,
//! and compiling it is a pure function returning a [`Statement`].
//!
//! - [`SelectStatement`]: `SELECT` with projection, joins, filter, ordering,
//!   limit/offset, and the `COUNT(*)` form.
//! - [`UpdateStatement`]: `UPDATE` with joins, `SET` and `WHERE`.
//! - [`DeleteStatement`]: `DELETE FROM` with an optional filter.
//! - [`InsertStatement`]: `INSERT INTO` / `REPLACE INTO` with one or more rows.
//! - [`TruncateStatement`]: `TRUNCATE`.
//!
//! # Example
//!
//! ```rust
//! use sqlchain_core::{expr::ColumnRef, statement::SelectStatement, Value};
//!
//! let statement = SelectStatement::from("blog")
//!     .filter(ColumnRef::new(0, "id").equals(1))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(statement.sql, "SELECT *\nFROM blog t1\nWHERE t1.id = ?");
//! assert_eq!(statement.params, vec![Value::Integer(1)]);
//! ```

mod clause;
pub mod delete;
pub mod insert;
pub mod select;
pub mod truncate;
pub mod update;

use std::fmt;

use serde::Serialize;

pub use delete::DeleteStatement;
pub use insert::{InsertMode, InsertStatement};
pub use select::SelectStatement;
pub use truncate::TruncateStatement;
pub use update::{Assignment, UpdateStatement};

use crate::value::Value;

/// Compiled statement text plus its bound parameters.
///
/// `params[i]` binds to the i-th `?` of `sql`, counted left to right.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Statement {
    /// A statement that binds nothing.
    pub fn plain(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }

    /// Number of `?` placeholders in the text.
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_statement() {
        let statement = Statement::plain("TRUNCATE blog");
        assert_eq!(statement.placeholder_count(), 0);
        assert_eq!(statement.into_parts(), ("TRUNCATE blog".to_string(), vec![]));
    }
}
