//! Builds statements for the compile commands through the table handles.

use sqlchain::{all, any, ColumnRef, Predicate, ProjectionMap, Scope, Statement, Table, TableError};
use tracing::debug;

use crate::{
    cli::FilterArgs,
    error::{CliError, Result},
    literal::{parse_assignment, parse_records},
};

fn column<'a>(table: &Table, scope: &'a Scope, field: &str) -> Result<&'a ColumnRef> {
    scope[0].get(field).ok_or_else(|| {
        CliError::Table(TableError::UnknownField {
            table: table.name().to_string(),
            field: field.to_string(),
        })
    })
}

/// Combines the filter flags into one predicate; `None` when no flag was given.
pub fn predicate(table: &Table, filter: &FilterArgs) -> Result<Option<Predicate>> {
    if filter.is_empty() {
        return Ok(None);
    }
    let scope = table.scope();
    let mut predicates = Vec::new();

    for condition in &filter.conditions {
        let (field, value) = parse_assignment(condition)?;
        let column = column(table, &scope, &field)?;
        predicates.push(if value.is_null() {
            column.is_null()
        } else {
            column.equals(value)
        });
    }
    for field in &filter.nulls {
        predicates.push(column(table, &scope, field)?.is_null());
    }

    debug!(conditions = predicates.len(), any = filter.any, "built filter");
    Ok(match predicates.len() {
        0 => None,
        1 => predicates.pop(),
        _ if filter.any => Some(any(predicates)),
        _ => Some(all(predicates)),
    })
}

fn projection(table: &Table, fields: &[String]) -> Result<Option<ProjectionMap>> {
    if fields.is_empty() {
        return Ok(None);
    }
    let scope = table.scope();
    let mut map = ProjectionMap::new();
    for field in fields {
        map = map.column(field.as_str(), column(table, &scope, field)?);
    }
    Ok(Some(map))
}

pub struct SelectOptions<'a> {
    pub filter: &'a FilterArgs,
    pub sort: Option<&'a str>,
    pub descending: bool,
    pub columns: &'a [String],
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

pub fn select(table: &Table, options: SelectOptions<'_>) -> Result<Statement> {
    let predicate = predicate(table, options.filter)?;
    let projection = projection(table, options.columns)?;
    if let Some(field) = options.sort {
        column(table, &table.scope(), field)?;
    }

    macro_rules! project {
        ($handle:expr) => {
            match projection {
                Some(map) => $handle.map(move |_| map),
                None => $handle.select(),
            }
        };
    }
    macro_rules! sort {
        ($handle:expr, $field:expr) => {
            if options.descending {
                $handle.sort_descendingly_by(|t| &t[$field])
            } else {
                $handle.sort_by(|t| &t[$field])
            }
        };
    }

    let query = match (predicate, options.sort) {
        (None, None) => project!(table),
        (None, Some(field)) => project!(sort!(table, field)),
        (Some(predicate), None) => project!(table.filter(move |_| predicate)),
        (Some(predicate), Some(field)) => {
            let filtered = table.filter(move |_| predicate);
            project!(sort!(filtered, field))
        }
    };

    let query = match options.limit {
        Some(limit) => query.limit(limit),
        None => query,
    };
    let query = match options.offset {
        Some(offset) => query.offset(offset),
        None => query,
    };
    Ok(query.generate()?)
}

pub fn count(table: &Table, filter: &FilterArgs) -> Result<Statement> {
    let query = match predicate(table, filter)? {
        Some(predicate) => table.filter(move |_| predicate).count(),
        None => table.count(),
    };
    Ok(query.generate()?)
}

pub fn insert(table: &Table, records: &str, replace: bool) -> Result<Statement> {
    let records = parse_records(records)?
        .into_iter()
        .map(|record| record.0);
    let statement = if replace {
        table.replace_batch(records)?
    } else {
        table.insert_batch(records)?
    };
    Ok(statement)
}

pub fn update(table: &Table, assignments: &[String], filter: &FilterArgs) -> Result<Statement> {
    let record = assignments
        .iter()
        .map(|raw| parse_assignment(raw))
        .collect::<Result<Vec<_>>>()?;
    let predicate = predicate(table, filter)?.ok_or(CliError::MissingFilter("update"))?;
    Ok(table.filter(move |_| predicate).update(record)?)
}

pub fn delete(table: &Table, filter: &FilterArgs) -> Result<Statement> {
    let statement = match predicate(table, filter)? {
        Some(predicate) => table.filter(move |_| predicate).delete()?,
        None => table.delete_all()?,
    };
    Ok(statement)
}
