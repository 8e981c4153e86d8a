use miette::Diagnostic;
use sqlchain::TableError;
use sqlchain_config::ConfigError;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Table(#[from] TableError),

    #[error("Invalid assignment `{0}`")]
    #[diagnostic(
        code(sqlchain_cli::invalid_assignment),
        help("Write assignments as FIELD=VALUE, e.g. --where authorId=1")
    )]
    InvalidAssignment(String),

    #[error("Invalid record JSON: {0}")]
    #[diagnostic(
        code(sqlchain_cli::invalid_record),
        help("Pass an object of field keys to scalar values, or an array of such objects")
    )]
    InvalidRecord(#[source] serde_json::Error),

    #[error("Failed to encode output: {0}")]
    #[diagnostic(code(sqlchain_cli::output))]
    Output(#[source] serde_json::Error),

    #[error("`{0}` requires at least one filter")]
    #[diagnostic(
        code(sqlchain_cli::missing_filter),
        help("Pass --where FIELD=VALUE or --null FIELD")
    )]
    MissingFilter(&'static str),
}

pub type Result<T> = std::result::Result<T, CliError>;
