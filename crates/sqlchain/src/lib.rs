//! Declarative SQL statements over named tables.
//!
//! A [`Table`] couples a table name with a mapping from field keys to storage
//! column names. Chaining methods on it (`filter`, `sort_by`, `inner_join`,
//! `map`, ...) describe a statement; nothing is compiled until a terminal
//! method is called. Reads return a lazy [`Query`]; writes return a
//! compiled [`Statement`] directly.
//!
//! ```rust
//! use sqlchain::{or, Table, Value};
//!
//! let blog = Table::new("blog", [("id", "id"), ("authorId", "author_id"), ("draft", "draft")]);
//!
//! let statement = blog
//!     .filter(|b| or(b["authorId"].equals(1), b["draft"].equals(false)))
//!     .sort_descendingly_by(|b| &b["id"])
//!     .select()
//!     .limit(20)
//!     .generate()
//!     .unwrap();
//!
//! assert_eq!(
//!     statement.sql,
//!     "SELECT *\nFROM blog t1\nWHERE t1.author_id = ? OR t1.draft = ?\nORDER BY t1.id DESC\nLIMIT 20"
//! );
//! assert_eq!(statement.params, vec![Value::Integer(1), Value::Bool(false)]);
//! ```

pub mod columns;
pub mod error;
pub mod macros;
pub mod query;
pub mod table;

pub use columns::{Columns, Scope};
pub use error::{Result, TableError};
pub use query::Query;
pub use sqlchain_core::{
    expr::{all, and, any, is_not_null, is_null, or, ColumnRef, Predicate, ProjectionMap},
    CompileError, Statement, Value,
};
pub use table::{FilteredTable, JoinedTables, SortedTable, Table, TableDef};
