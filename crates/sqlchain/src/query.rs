//! Lazily compiled reads.

use sqlchain_core::{SelectStatement, Statement};
use tracing::debug;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Rows,
    Count,
}

/// A read description that is compiled only when [`Query::generate`] is called.
#[derive(Debug, Clone)]
pub struct Query {
    statement: SelectStatement,
    mode: Mode,
}

impl Query {
    pub(crate) fn rows(statement: SelectStatement) -> Self {
        Self {
            statement,
            mode: Mode::Rows,
        }
    }

    pub(crate) fn count(statement: SelectStatement) -> Self {
        Self {
            statement,
            mode: Mode::Count,
        }
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.statement = self.statement.limit(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.statement = self.statement.offset(offset);
        self
    }

    /// Whether this query compiles to the `COUNT(*)` form.
    pub fn is_count(&self) -> bool {
        self.mode == Mode::Count
    }

    /// The uncompiled description.
    pub fn statement(&self) -> &SelectStatement {
        &self.statement
    }

    pub fn generate(&self) -> Result<Statement> {
        let statement = match self.mode {
            Mode::Rows => self.statement.build()?,
            Mode::Count => self.statement.build_count()?,
        };
        debug!(
            count = self.is_count(),
            parameters = statement.params.len(),
            "generated select statement"
        );
        Ok(statement)
    }
}
