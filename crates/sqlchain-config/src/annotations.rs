//! Copies doc comments of the schema structs into a TOML document as comments.

use std::any::type_name;

use documented::{Documented, DocumentedFields};
use toml_edit::{ArrayOfTables, Decor, Item, RawString, Table};
use tracing::warn;

use crate::error::{ConfigError, Result};

/// Appends `docs` to the comment prefix of `decor`, one `#` line per doc line.
///
/// An existing prefix is kept; a bare `#` line separates it from the new
/// comments unless it already ends with a blank line.
pub fn append_docs_as_toml_comments(decor: &mut Decor, docs: &str) {
    let comments: String = docs
        .lines()
        .map(|line| {
            if line.is_empty() {
                "#\n".to_string()
            } else {
                format!("# {line}\n")
            }
        })
        .collect();

    let prefix = match decor.prefix().and_then(RawString::as_str) {
        None | Some("") => comments,
        Some(existing) if existing.lines().last().is_some_and(str::is_empty) => {
            format!("{existing}{comments}")
        }
        Some(existing) => format!("{existing}#\n{comments}"),
    };
    decor.set_prefix(prefix);
}

/// Annotates every key of `table` with the matching field docs of `T`.
///
/// With `with_header` set, the struct-level docs of `T` are placed above
/// the table header as well.
pub fn annotate_toml_table<T>(table: &mut Table, with_header: bool) -> Result<()>
where
    T: Documented + DocumentedFields,
{
    if with_header {
        append_docs_as_toml_comments(table.decor_mut(), T::DOCS);
    }

    for (mut key, item) in table.iter_mut() {
        let name = key.get();
        let Ok(docs) = T::get_field_docs(name) else {
            warn!(
                field = name,
                container = type_name::<T>(),
                "no documentation found for TOML key"
            );
            continue;
        };

        match item {
            Item::None => return Err(ConfigError::UnexpectedTomlItem(name.into())),
            Item::Value(_) => append_docs_as_toml_comments(key.leaf_decor_mut(), docs),
            Item::Table(sub_table) => append_docs_as_toml_comments(sub_table.decor_mut(), docs),
            Item::ArrayOfTables(array) => {
                if let Some(first) = array.iter_mut().next() {
                    append_docs_as_toml_comments(first.decor_mut(), docs);
                }
            }
        }
    }

    Ok(())
}

/// Annotates the first entry of an array of tables; the rest share its shape.
pub fn annotate_toml_array_of_tables<T>(array: &mut ArrayOfTables) -> Result<()>
where
    T: Documented + DocumentedFields,
{
    match array.iter_mut().next() {
        Some(first) => annotate_toml_table::<T>(first, false)
            .map_err(|err| ConfigError::AnnotateFirstTable(err.to_string())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use toml_edit::Decor;

    use super::*;
    use crate::schema::Schema;

    fn prefix(decor: &Decor) -> String {
        decor
            .prefix()
            .and_then(|p| p.as_str())
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_append_docs_as_toml_comments() {
        let mut decor = Decor::new("", "");
        append_docs_as_toml_comments(&mut decor, "Line 1\n\nLine 2");
        assert_eq!(prefix(&decor), "# Line 1\n#\n# Line 2\n");
    }

    #[test]
    fn test_append_docs_keeps_existing_prefix() {
        let mut decor = Decor::new("# existing\n", "");
        append_docs_as_toml_comments(&mut decor, "Added");
        assert_eq!(prefix(&decor), "# existing\n#\n# Added\n");

        let mut decor = Decor::new("\n", "");
        append_docs_as_toml_comments(&mut decor, "Added");
        assert_eq!(prefix(&decor), "\n# Added\n");
    }

    #[test]
    fn test_annotate_schema_document() {
        let doc = Schema::example().to_annotated_document().unwrap();
        let rendered = doc.to_string();
        assert!(rendered.contains("# Storage name of the table"));
        assert!(rendered.contains("# Field keys"));
    }
}
