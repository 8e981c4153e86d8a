//! Expression model and statement compiler for sqlchain.
//!
//! Callers describe reads and writes as plain values (column references,
//! comparisons, boolean trees, projections, sort keys, joins) and compile
//! them into SQL text plus an ordered list of bound parameters. Nothing here
//! executes SQL: the output is a [`Statement`] ready to hand to a driver.
//!
//! Wire conventions: `?` positional placeholders, double-quoted aliases,
//! positional table aliases `t1`, `t2`, … where `t1` is the primary table.

pub mod error;
pub mod expr;
pub mod statement;
pub mod traits;
pub mod value;

pub use error::{CompileError, Result};
pub use statement::{
    DeleteStatement, InsertMode, InsertStatement, SelectStatement, Statement, TruncateStatement,
    UpdateStatement,
};
pub use traits::{table_alias, Expression, SqlContext};
pub use value::Value;
