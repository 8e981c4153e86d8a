use tracing::trace;

use crate::{
    error::{CompileError, Result},
    statement::{clause::Clauses, Statement},
    value::Value,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InsertMode {
    #[default]
    Insert,
    Replace,
}

impl InsertMode {
    fn keyword(&self) -> &'static str {
        match self {
            InsertMode::Insert => "INSERT INTO",
            InsertMode::Replace => "REPLACE INTO",
        }
    }
}

/// Multi-row `INSERT INTO` sharing one column list.
///
/// Parameters are bound row-major: every value of the first row, then every
/// value of the second row, each row in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub table: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub mode: InsertMode,
}

impl InsertStatement {
    pub fn into(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: vec![],
            rows: vec![],
            mode: InsertMode::Insert,
        }
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn row<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.rows.push(values.into_iter().map(Into::into).collect());
        self
    }

    /// Emit `REPLACE INTO` instead of `INSERT INTO`.
    pub fn replace(mut self) -> Self {
        self.mode = InsertMode::Replace;
        self
    }

    pub fn build(&self) -> Result<Statement> {
        let expected = self.columns.len();
        if let Some((row, values)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != expected)
        {
            return Err(CompileError::RowArity {
                row,
                expected,
                found: values.len(),
            });
        }

        let mut clauses = Clauses::default();
        clauses.push(format!(
            "{} {} ({})",
            self.mode.keyword(),
            self.table,
            self.columns.join(", ")
        ));

        if !self.rows.is_empty() {
            let tuple = format!("({})", vec!["?"; expected].join(", "));
            let tuples = vec![tuple; self.rows.len()].join(", ");
            clauses.extend(Statement {
                sql: format!("VALUES {}", tuples),
                params: self.rows.iter().flatten().cloned().collect(),
            });
        }

        let statement = clauses.finish();
        trace!(
            rows = self.rows.len(),
            parameters = statement.params.len(),
            "compiled insert statement"
        );
        Ok(statement)
    }
}
