use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    sync::{LazyLock, PoisonError, RwLock},
};

use documented::{Documented, DocumentedFields};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlchain::{Table, TableDef};
use toml_edit::{Array, DocumentMut, Item, Value};
use tracing::{debug, info};

use crate::{
    annotations::{annotate_toml_array_of_tables, annotate_toml_table},
    error::{ConfigError, Result},
};

pub const DEFAULT_SCHEMA_FILE: &str = "sqlchain.toml";

static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("unable to compile identifier regex")
});

pub static SCHEMA_PATH: LazyLock<RwLock<PathBuf>> = LazyLock::new(|| {
    RwLock::new(match std::env::var("SQLCHAIN_SCHEMA") {
        Ok(path) => PathBuf::from(path),
        Err(_) => PathBuf::from(DEFAULT_SCHEMA_FILE),
    })
});

pub fn schema_path() -> PathBuf {
    SCHEMA_PATH
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Overrides the schema location, e.g. from a `--schema` flag.
pub fn set_schema_path(path: impl Into<PathBuf>) {
    let mut current = SCHEMA_PATH.write().unwrap_or_else(PoisonError::into_inner);
    *current = path.into();
}

/// Tables that statements can be compiled against.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, Documented, DocumentedFields)]
pub struct Schema {
    /// Declared tables, one [[tables]] entry each.
    #[serde(default)]
    pub tables: Vec<TableConfig>,
}

/// A table and the mapping from caller-facing field keys to its columns.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, Documented, DocumentedFields)]
pub struct TableConfig {
    /// Storage name of the table.
    pub name: String,

    /// Field keys and the storage columns they map to.
    /// The order here is the column order of INSERT statements.
    pub columns: Vec<ColumnConfig>,
}

/// One field key → storage column pair.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, Documented, DocumentedFields)]
pub struct ColumnConfig {
    /// Key used by callers to refer to the column.
    pub field: String,

    /// Storage name of the column.
    pub column: String,
}

impl ColumnConfig {
    pub fn new(field: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            column: column.into(),
        }
    }
}

impl TableConfig {
    pub fn to_table_def(&self) -> TableDef {
        TableDef::new(
            self.name.as_str(),
            self.columns
                .iter()
                .map(|c| (c.field.as_str(), c.column.as_str())),
        )
    }

    pub fn to_table(&self) -> Table {
        Table::from_def(self.to_table_def())
    }

    fn resolve(&self) -> Result<()> {
        check_identifier(&self.name)?;
        if self.columns.is_empty() {
            return Err(ConfigError::EmptyTable(self.name.clone()));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if column.field.is_empty() {
                return Err(ConfigError::EmptyField(self.name.clone()));
            }
            check_identifier(&column.field)?;
            check_identifier(&column.column)?;
            if !seen.insert(column.field.as_str()) {
                return Err(ConfigError::DuplicateField {
                    table: self.name.clone(),
                    field: column.field.clone(),
                });
            }
        }
        Ok(())
    }
}

fn check_identifier(name: &str) -> Result<()> {
    if IDENTIFIER_RE.is_match(name) {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier(name.to_string()))
    }
}

impl Schema {
    /// The schema written by `sqlchain init`.
    pub fn example() -> Self {
        let columns = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(field, column)| ColumnConfig::new(*field, *column))
                .collect()
        };

        Self {
            tables: vec![
                TableConfig {
                    name: "blog".into(),
                    columns: columns(&[
                        ("id", "id"),
                        ("title", "title"),
                        ("authorId", "author_id"),
                        ("categoryId", "category_id"),
                        ("publishedAt", "published_at"),
                    ]),
                },
                TableConfig {
                    name: "authors".into(),
                    columns: columns(&[("id", "id"), ("name", "name")]),
                },
            ],
        }
    }

    /// Loads the schema from the configured path.
    pub fn new() -> Result<Self> {
        Self::load(schema_path())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::SchemaNotFound(path.to_path_buf()))
            }
            Err(err) => return Err(ConfigError::IoError(err)),
        };
        let schema = Self::from_toml(&content)?;
        debug!(
            path = %path.display(),
            tables = schema.tables.len(),
            "loaded schema"
        );
        Ok(schema)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let schema: Schema = toml::from_str(content)?;
        schema.resolve()?;
        Ok(schema)
    }

    pub fn resolve(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for table in &self.tables {
            table.resolve()?;
            if !seen.insert(table.name.as_str()) {
                return Err(ConfigError::DuplicateTable(table.name.clone()));
            }
        }
        Ok(())
    }

    pub fn table(&self, name: &str) -> Result<&TableConfig> {
        self.tables
            .iter()
            .find(|table| table.name == name)
            .ok_or_else(|| ConfigError::UnknownTable(name.to_string()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let serialized = self.to_annotated_document()?.to_string();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serialized)?;
        info!("Schema saved to {}", path.display());
        Ok(())
    }

    pub fn to_annotated_document(&self) -> Result<DocumentMut> {
        let toml_string = toml::to_string_pretty(self)?;
        let mut doc = toml_string.parse::<DocumentMut>()?;

        if let Some(tables) = doc
            .get_mut("tables")
            .and_then(Item::as_array_of_tables_mut)
        {
            for table in tables.iter_mut() {
                inline_columns(table);
            }
            annotate_toml_array_of_tables::<TableConfig>(tables)?;
        }
        annotate_toml_table::<Schema>(doc.as_table_mut(), false)?;

        Ok(doc)
    }
}

/// Rewrites `[[tables.columns]]` sections as one inline table per line.
fn inline_columns(table: &mut toml_edit::Table) {
    let columns = match table.remove("columns") {
        Some(Item::ArrayOfTables(array)) => array.into_array(),
        Some(Item::Value(Value::Array(array))) => array,
        Some(other) => {
            table.insert("columns", other);
            return;
        }
        None => return,
    };

    let mut formatted = Array::new();
    for mut column in columns.into_iter() {
        column.decor_mut().set_prefix("\n  ");
        formatted.push_formatted(column);
    }
    formatted.set_trailing("\n");
    formatted.set_trailing_comma(true);
    table.insert("columns", Item::Value(Value::Array(formatted)));
}

pub fn generate_default_schema() -> Result<()> {
    let path = schema_path();
    if path.exists() {
        return Err(ConfigError::SchemaAlreadyExists(path));
    }

    Schema::example().save(&path)?;
    info!(
        "Default schema generated with documentation at: {}",
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOG: &str = r#"
[[tables]]
name = "blog"
columns = [
  { field = "id", column = "id" },
  { field = "authorId", column = "author_id" },
]

[[tables]]
name = "authors"
columns = [{ field = "id", column = "id" }]
"#;

    #[test]
    fn test_parse_keeps_column_order() {
        let schema = Schema::from_toml(BLOG).unwrap();
        assert_eq!(schema.tables.len(), 2);

        let blog = schema.table("blog").unwrap();
        assert_eq!(
            blog.columns,
            vec![
                ColumnConfig::new("id", "id"),
                ColumnConfig::new("authorId", "author_id")
            ]
        );

        let def = blog.to_table_def();
        assert_eq!(def.name(), "blog");
        assert_eq!(def.column_for("authorId"), Some("author_id"));
    }

    #[test]
    fn test_unknown_table() {
        let schema = Schema::from_toml(BLOG).unwrap();
        assert!(matches!(
            schema.table("posts"),
            Err(ConfigError::UnknownTable(name)) if name == "posts"
        ));
    }

    #[test]
    fn test_empty_schema() {
        let schema = Schema::from_toml("").unwrap();
        assert!(schema.tables.is_empty());
    }

    #[test]
    fn test_resolve_duplicate_table() {
        let content = r#"
[[tables]]
name = "blog"
columns = [{ field = "id", column = "id" }]

[[tables]]
name = "blog"
columns = [{ field = "id", column = "id" }]
"#;
        assert!(matches!(
            Schema::from_toml(content),
            Err(ConfigError::DuplicateTable(_))
        ));
    }

    #[test]
    fn test_resolve_duplicate_field() {
        let content = r#"
[[tables]]
name = "blog"
columns = [{ field = "id", column = "id" }, { field = "id", column = "blog_id" }]
"#;
        assert!(matches!(
            Schema::from_toml(content),
            Err(ConfigError::DuplicateField { .. })
        ));
    }

    #[test]
    fn test_resolve_invalid_identifiers() {
        let bad_table = r#"
[[tables]]
name = "blog; DROP TABLE x"
columns = [{ field = "id", column = "id" }]
"#;
        assert!(matches!(
            Schema::from_toml(bad_table),
            Err(ConfigError::InvalidIdentifier(_))
        ));

        let bad_column = r#"
[[tables]]
name = "blog"
columns = [{ field = "id", column = "1id" }]
"#;
        assert!(matches!(
            Schema::from_toml(bad_column),
            Err(ConfigError::InvalidIdentifier(name)) if name == "1id"
        ));
    }

    #[test]
    fn test_resolve_rejects_field_keys_unfit_for_aliases() {
        for field in ["ok?", "a\" FROM x; --", "author.name"] {
            let content = format!(
                "[[tables]]\nname = \"blog\"\ncolumns = [{{ field = {}, column = \"id\" }}]\n",
                toml::Value::String(field.to_string())
            );
            assert!(matches!(
                Schema::from_toml(&content),
                Err(ConfigError::InvalidIdentifier(name)) if name == field
            ));
        }
    }

    #[test]
    fn test_resolve_empty_table() {
        let content = r#"
[[tables]]
name = "blog"
columns = []
"#;
        assert!(matches!(
            Schema::from_toml(content),
            Err(ConfigError::EmptyTable(_))
        ));
    }

    #[test]
    fn test_annotated_document_round_trips() {
        let schema = Schema::example();
        let rendered = schema.to_annotated_document().unwrap().to_string();

        assert!(rendered.contains("[[tables]]"));
        assert!(!rendered.contains("[[tables.columns]]"));
        assert_eq!(Schema::from_toml(&rendered).unwrap(), schema);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("schema.toml");

        Schema::example().save(&path).unwrap();
        let loaded = Schema::load(&path).unwrap();
        assert_eq!(loaded, Schema::example());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(matches!(
            Schema::load(&path),
            Err(ConfigError::SchemaNotFound(p)) if p == path
        ));
    }
}
