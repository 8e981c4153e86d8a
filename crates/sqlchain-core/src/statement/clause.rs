//! Internal clause assembly shared by every statement kind.
//!
//! Each clause is compiled into its own line while its parameters are
//! appended to the statement's parameter list in the same call. Clauses a
//! statement does not carry are never pushed, so no empty line appears.

use crate::{
    error::{CompileError, Result},
    expr::Join,
    statement::Statement,
    traits::{Expression, SqlContext},
    value::Value,
};

#[derive(Default)]
pub(crate) struct Clauses {
    lines: Vec<String>,
    params: Vec<Value>,
}

impl Clauses {
    /// Pushes a literal line that binds nothing.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Pushes `keyword expr`.
    pub fn push_expr<E: Expression>(
        &mut self,
        keyword: &str,
        expr: &E,
        ctx: &SqlContext,
    ) -> Result<()> {
        let sql = expr.to_sql(ctx, &mut self.params)?;
        self.lines.push(format!("{keyword} {sql}"));
        Ok(())
    }

    /// Pushes `keyword a, b, c`; skipped when `exprs` is empty.
    pub fn push_list<E: Expression>(
        &mut self,
        keyword: &str,
        exprs: &[E],
        ctx: &SqlContext,
    ) -> Result<()> {
        if exprs.is_empty() {
            return Ok(());
        }
        let mut parts = Vec::with_capacity(exprs.len());
        for expr in exprs {
            parts.push(expr.to_sql(ctx, &mut self.params)?);
        }
        self.lines.push(format!("{} {}", keyword, parts.join(", ")));
        Ok(())
    }

    /// Pushes one `INNER JOIN` line per join, in declaration order.
    pub fn push_joins(&mut self, joins: &[Join], ctx: &SqlContext) -> Result<()> {
        for join in joins {
            let sql = join.to_sql(ctx, &mut self.params)?;
            self.lines.push(sql);
        }
        Ok(())
    }

    /// Appends an already compiled statement's lines and parameters.
    pub fn extend(&mut self, statement: Statement) {
        self.lines.push(statement.sql);
        self.params.extend(statement.params);
    }

    pub fn finish(self) -> Statement {
        Statement {
            sql: self.lines.join("\n"),
            params: self.params,
        }
    }
}

/// Validates that the k-th join introduces table index k + 1.
pub(crate) fn check_joins(joins: &[Join]) -> Result<()> {
    for (position, join) in joins.iter().enumerate() {
        let expected = position + 1;
        if join.other_table.index != expected {
            return Err(CompileError::JoinOrder {
                position,
                expected,
                found: join.other_table.index,
            });
        }
    }
    Ok(())
}
