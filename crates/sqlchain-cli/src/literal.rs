//! Parsing of command-line values and JSON records.

use std::fmt;

use serde::{
    de::{MapAccess, Visitor},
    Deserialize, Deserializer,
};
use sqlchain::Value;

use crate::error::{CliError, Result};

/// Parses a bare literal: null, then bool, then integer, then real, else text.
pub fn parse_literal(raw: &str) -> Value {
    match raw {
        "null" | "NULL" => Value::Null,
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => raw
            .parse::<i64>()
            .map(Value::Integer)
            .ok()
            .or_else(|| {
                raw.parse::<f64>()
                    .ok()
                    .filter(|real| real.is_finite())
                    .map(Value::Real)
            })
            .unwrap_or_else(|| Value::Text(raw.to_string())),
    }
}

/// Splits `field=value` at the first `=`.
pub fn parse_assignment(raw: &str) -> Result<(String, Value)> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), parse_literal(value)))
        }
        _ => Err(CliError::InvalidAssignment(raw.to_string())),
    }
}

/// A JSON object, keys kept in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record(pub Vec<(String, Value)>);

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of field keys to scalar values")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Record, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut fields = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Value>()? {
                    fields.push(entry);
                }
                Ok(Record(fields))
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Records {
    One(Record),
    Many(Vec<Record>),
}

/// Parses one JSON object or an array of them.
pub fn parse_records(raw: &str) -> Result<Vec<Record>> {
    match serde_json::from_str(raw).map_err(CliError::InvalidRecord)? {
        Records::One(record) => Ok(vec![record]),
        Records::Many(records) => Ok(records),
    }
}
