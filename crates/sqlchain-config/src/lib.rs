pub mod annotations;
pub mod error;
pub mod schema;

pub use error::{ConfigError, Result};
pub use schema::{generate_default_schema, ColumnConfig, Schema, TableConfig};
