//! Error types for the table façade.

use miette::Diagnostic;
use sqlchain_core::CompileError;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Unknown field `{field}` on table `{table}`")]
    #[diagnostic(
        code(sqlchain::unknown_field),
        help("Use one of the field keys declared in the table's column mapping")
    )]
    UnknownField { table: String, field: String },

    #[error("Missing value for field `{field}` of table `{table}`")]
    #[diagnostic(
        code(sqlchain::missing_field),
        help("Inserted records must provide a value for every mapped field")
    )]
    MissingField { table: String, field: String },

    #[error("No records to insert into table `{table}`")]
    #[diagnostic(
        code(sqlchain::empty_insert),
        help("Provide at least one record")
    )]
    EmptyInsert { table: String },

    #[error("No assignments given for table `{table}`")]
    #[diagnostic(
        code(sqlchain::empty_update),
        help("Set at least one field")
    )]
    EmptyUpdate { table: String },

    #[error("Table index {index} is out of range for {tables} bound table(s)")]
    #[diagnostic(code(sqlchain::table_index))]
    TableIndexOutOfRange { index: usize, tables: usize },

    #[error("DELETE cannot target joined tables")]
    #[diagnostic(
        code(sqlchain::joined_delete),
        help("Filter the primary table directly before deleting")
    )]
    JoinedDelete,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Compile(#[from] CompileError),
}

pub type Result<T> = std::result::Result<T, TableError>;
