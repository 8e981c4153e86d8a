use crate::statement::Statement;

/// Removes every row of a table without a predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncateStatement {
    pub table: String,
}

impl TruncateStatement {
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }

    pub fn build(&self) -> Statement {
        Statement::plain(format!("TRUNCATE {}", self.table))
    }
}
