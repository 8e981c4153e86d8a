//! Projections: what a SELECT returns.
//!
//! A projection is `*`, a single column, or an ordered mapping from output
//! keys to columns and nested mappings. Mappings are flattened depth-first
//! into `column AS "key"` pairs; the alias is the leaf key and the full key
//! path is kept on [`FlatColumn`] for reassembling nested result shapes.

use crate::{
    error::{CompileError, Result},
    expr::column::ColumnRef,
    traits::{Expression, SqlContext},
    value::Value,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Wildcard,
    Column(ColumnRef),
    Map(ProjectionMap),
}

impl From<ColumnRef> for Projection {
    fn from(column: ColumnRef) -> Self {
        Projection::Column(column)
    }
}

impl From<&ColumnRef> for Projection {
    fn from(column: &ColumnRef) -> Self {
        Projection::Column(column.clone())
    }
}

impl From<ProjectionMap> for Projection {
    fn from(map: ProjectionMap) -> Self {
        Projection::Map(map)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionNode {
    Column(ColumnRef),
    Nested(ProjectionMap),
}

/// Insertion-ordered mapping of output keys.
///
/// # Example
///
/// ```rust
/// use sqlchain_core::expr::{ColumnRef, ProjectionMap};
///
/// let map = ProjectionMap::new()
///     .column("title", &ColumnRef::new(0, "title"))
///     .nested(
///         "author",
///         ProjectionMap::new().column("firstName", &ColumnRef::new(1, "first_name")),
///     );
/// assert_eq!(map.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectionMap {
    entries: Vec<(String, ProjectionNode)>,
}

/// A projection leaf after flattening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatColumn {
    pub path: Vec<String>,
    pub column: ColumnRef,
}

impl FlatColumn {
    /// The SQL alias: the leaf key of the path.
    pub fn alias(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }
}

impl ProjectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `key` to a column. Re-inserting a key replaces its node in place.
    pub fn column(self, key: impl Into<String>, column: &ColumnRef) -> Self {
        self.insert(key.into(), ProjectionNode::Column(column.clone()))
    }

    /// Maps `key` to a nested mapping.
    pub fn nested(self, key: impl Into<String>, map: ProjectionMap) -> Self {
        self.insert(key.into(), ProjectionNode::Nested(map))
    }

    fn insert(mut self, key: String, node: ProjectionNode) -> Self {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = node,
            None => self.entries.push((key, node)),
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &ProjectionNode)> {
        self.entries.iter().map(|(k, n)| (k.as_str(), n))
    }

    /// Depth-first list of leaves in declaration order.
    pub fn flatten(&self) -> Vec<FlatColumn> {
        let mut out = Vec::new();
        self.flatten_into(&mut Vec::new(), &mut out);
        out
    }

    fn flatten_into(&self, prefix: &mut Vec<String>, out: &mut Vec<FlatColumn>) {
        for (key, node) in &self.entries {
            prefix.push(key.clone());
            match node {
                ProjectionNode::Column(column) => out.push(FlatColumn {
                    path: prefix.clone(),
                    column: column.clone(),
                }),
                ProjectionNode::Nested(map) => map.flatten_into(prefix, out),
            }
            prefix.pop();
        }
    }
}

impl<K: Into<String>> FromIterator<(K, ColumnRef)> for ProjectionMap {
    fn from_iter<I: IntoIterator<Item = (K, ColumnRef)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ProjectionMap::new(), |map, (key, column)| {
                map.column(key, &column)
            })
    }
}

/// Quotes an output key as a SQL identifier.
///
/// Embedded `"` are doubled. Keys that are empty or contain `?` are rejected,
/// since a `?` in the text would read as a placeholder.
fn quote_alias(alias: &str) -> Result<String> {
    if alias.is_empty() || alias.contains('?') {
        return Err(CompileError::InvalidAlias {
            alias: alias.to_string(),
        });
    }
    Ok(format!("\"{}\"", alias.replace('"', "\"\"")))
}

impl Expression for ProjectionMap {
    fn to_sql(&self, ctx: &SqlContext, params: &mut Vec<Value>) -> Result<String> {
        let mut columns = Vec::new();
        for flat in self.flatten() {
            let column = flat.column.to_sql(ctx, params)?;
            columns.push(format!("{} AS {}", column, quote_alias(flat.alias())?));
        }
        Ok(columns.join(", "))
    }
}

impl Expression for Projection {
    fn to_sql(&self, ctx: &SqlContext, params: &mut Vec<Value>) -> Result<String> {
        match self {
            Projection::Wildcard => Ok("*".to_string()),
            Projection::Column(column) => column.to_sql(ctx, params),
            Projection::Map(map) => map.to_sql(ctx, params),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blog_shape() -> ProjectionMap {
        ProjectionMap::new()
            .column("id", &ColumnRef::new(0, "id"))
            .column("title", &ColumnRef::new(0, "title"))
            .nested(
                "author",
                ProjectionMap::new()
                    .column("firstName", &ColumnRef::new(1, "first_name"))
                    .column("lastName", &ColumnRef::new(1, "last_name")),
            )
            .nested(
                "category",
                ProjectionMap::new().column("name", &ColumnRef::new(2, "name")),
            )
    }

    fn compile(projection: &Projection) -> String {
        let mut params = vec![];
        let sql = projection
            .to_sql(&SqlContext::qualified(3), &mut params)
            .unwrap();
        assert!(params.is_empty());
        sql
    }

    #[test]
    fn test_wildcard_and_single_column() {
        assert_eq!(compile(&Projection::Wildcard), "*");
        assert_eq!(compile(&ColumnRef::new(0, "title").into()), "t1.title");
    }

    #[test]
    fn test_nested_map_flattens_depth_first() {
        let sql = compile(&blog_shape().into());
        assert_eq!(
            sql,
            "t1.id AS \"id\", t1.title AS \"title\", t2.first_name AS \"firstName\", \
             t2.last_name AS \"lastName\", t3.name AS \"name\""
        );
    }

    #[test]
    fn test_flatten_keeps_paths() {
        let flat = blog_shape().flatten();
        let paths: Vec<String> = flat.iter().map(|f| f.path.join(".")).collect();
        assert_eq!(
            paths,
            vec!["id", "title", "author.firstName", "author.lastName", "category.name"]
        );
        assert_eq!(flat[2].alias(), "firstName");
    }

    #[test]
    fn test_flatten_is_deterministic() {
        let projection: Projection = blog_shape().into();
        assert_eq!(compile(&projection), compile(&projection));
    }

    #[test]
    fn test_reinserting_key_replaces_in_place() {
        let map = ProjectionMap::new()
            .column("a", &ColumnRef::new(0, "x"))
            .column("b", &ColumnRef::new(0, "y"))
            .column("a", &ColumnRef::new(0, "z"));
        assert_eq!(compile(&map.into()), "t1.z AS \"a\", t1.y AS \"b\"");
    }

    #[test]
    fn test_empty_map_compiles_to_empty_list() {
        assert_eq!(compile(&ProjectionMap::new().into()), "");
    }

    #[test]
    fn test_alias_quotes_are_doubled() {
        let map = ProjectionMap::new().column("a\" FROM x; --", &ColumnRef::new(0, "id"));
        assert_eq!(compile(&map.into()), "t1.id AS \"a\"\" FROM x; --\"");
    }

    #[test]
    fn test_alias_with_placeholder_is_rejected() {
        let map = ProjectionMap::new()
            .column("id", &ColumnRef::new(0, "id"))
            .column("ok?", &ColumnRef::new(0, "title"));
        let err = Projection::from(map)
            .to_sql(&SqlContext::qualified(1), &mut vec![])
            .unwrap_err();
        assert_eq!(
            err,
            CompileError::InvalidAlias {
                alias: "ok?".into()
            }
        );

        let empty = ProjectionMap::new().column("", &ColumnRef::new(0, "id"));
        assert!(matches!(
            Projection::from(empty).to_sql(&SqlContext::qualified(1), &mut vec![]),
            Err(CompileError::InvalidAlias { .. })
        ));
    }

    #[test]
    fn test_collect_from_pairs() {
        let map: ProjectionMap = vec![("authorId", ColumnRef::new(0, "author_id"))]
            .into_iter()
            .collect();
        assert_eq!(compile(&map.into()), "t1.author_id AS \"authorId\"");
    }
}
