//! Expression types for building statements.
//!
//! This module contains the building blocks of every statement: column
//! references, comparisons, boolean trees, projections, sort keys and joins.

pub mod column;
pub mod join;
pub mod logical;
pub mod ops;
pub mod projection;
pub mod sort;

pub use column::ColumnRef;
pub use join::{Join, TableRef};
pub use logical::{all, and, any, is_not_null, is_null, or, Predicate};
pub use ops::{CompareOp, Comparison, IntoOperand, Operand};
pub use projection::{FlatColumn, Projection, ProjectionMap, ProjectionNode};
pub use sort::{Direction, SortKey};
