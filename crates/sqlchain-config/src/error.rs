use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("TOML serialization error: {0}")]
    #[diagnostic(
        code(sqlchain_config::toml_serialize),
        help("Check your schema structure for invalid values")
    )]
    TomlSerError(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    #[diagnostic(
        code(sqlchain_config::toml_deserialize),
        help("Check your sqlchain.toml syntax and structure")
    )]
    TomlDeError(#[from] toml::de::Error),

    #[error("Schema file already exists: {}", .0.display())]
    #[diagnostic(
        code(sqlchain_config::already_exists),
        help("Remove the existing schema file or pass a different --schema path")
    )]
    SchemaAlreadyExists(PathBuf),

    #[error("Schema file not found: {}", .0.display())]
    #[diagnostic(
        code(sqlchain_config::not_found),
        help("Run `sqlchain init` to generate one, or set SQLCHAIN_SCHEMA")
    )]
    SchemaNotFound(PathBuf),

    #[error("Duplicate table name: {0}")]
    #[diagnostic(
        code(sqlchain_config::duplicate_table),
        help("Each [[tables]] entry must have a unique name")
    )]
    DuplicateTable(String),

    #[error("Duplicate field `{field}` in table `{table}`")]
    #[diagnostic(
        code(sqlchain_config::duplicate_field),
        help("Field keys must be unique within a table")
    )]
    DuplicateField { table: String, field: String },

    #[error("Table `{0}` declares no columns")]
    #[diagnostic(code(sqlchain_config::empty_table))]
    EmptyTable(String),

    #[error("Empty field key in table `{0}`")]
    #[diagnostic(code(sqlchain_config::empty_field))]
    EmptyField(String),

    #[error("Invalid identifier: `{0}`")]
    #[diagnostic(
        code(sqlchain_config::invalid_identifier),
        help("Table and column names must match ^[A-Za-z_][A-Za-z0-9_]*$")
    )]
    InvalidIdentifier(String),

    #[error("Unknown table: {0}")]
    #[diagnostic(
        code(sqlchain_config::unknown_table),
        help("Run `sqlchain tables` to list the tables declared in the schema")
    )]
    UnknownTable(String),

    #[error("IO error: {0}")]
    #[diagnostic(code(sqlchain_config::io))]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    #[diagnostic(code(sqlchain_config::toml))]
    Toml(#[from] toml_edit::TomlError),

    #[error("Encountered unexpected TOML item: {0}")]
    #[diagnostic(code(sqlchain_config::unexpected_toml_item))]
    UnexpectedTomlItem(String),

    #[error("Failed to annotate first table in array: {0}")]
    #[diagnostic(code(sqlchain_config::annotate_first_table))]
    AnnotateFirstTable(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
