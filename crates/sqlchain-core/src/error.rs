//! Error types for sqlchain-core.

use miette::Diagnostic;
use thiserror::Error;

/// Raised when an expression tree or statement description is malformed.
///
/// Compilation never emits partially-valid SQL: the first malformed node
/// aborts the whole statement.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("`{kind}` needs at least two operands, found {count}")]
    #[diagnostic(
        code(sqlchain_core::logical_arity),
        help("Combine at least two predicates, or use the single predicate directly")
    )]
    LogicalArity { kind: &'static str, count: usize },

    #[error("Column refers to table index {index}, but only {bound} table(s) are bound")]
    #[diagnostic(
        code(sqlchain_core::unbound_table),
        help("Join the table before referring to its columns")
    )]
    UnboundTable { index: usize, bound: usize },

    #[error("Join #{position} introduces table index {found}, expected {expected}")]
    #[diagnostic(
        code(sqlchain_core::join_order),
        help("Each join must introduce the next table index, starting at 1")
    )]
    JoinOrder {
        position: usize,
        expected: usize,
        found: usize,
    },

    #[error("Row {row} has {found} value(s), expected {expected}")]
    #[diagnostic(
        code(sqlchain_core::row_arity),
        help("Every inserted row must provide one value per column")
    )]
    RowArity {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Output key `{alias}` cannot be used as a column alias")]
    #[diagnostic(
        code(sqlchain_core::invalid_alias),
        help("Projection keys must not be empty or contain `?`")
    )]
    InvalidAlias { alias: String },
}

/// Result type alias for compilation.
pub type Result<T> = std::result::Result<T, CompileError>;
