//! Boolean expression trees.
//!
//! A [`Predicate`] is either a leaf [`Comparison`] or an ordered `AND`/`OR`
//! group of child predicates. Groups nested inside another group are always
//! parenthesized, so the emitted SQL keeps the tree's grouping regardless of
//! operator precedence.

use crate::{
    error::{CompileError, Result},
    expr::{column::ColumnRef, ops::Comparison},
    traits::{Expression, SqlContext},
    value::Value,
};

/// An immutable boolean expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Comparison(Comparison),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

impl Predicate {
    /// Combines with `AND`, extending `self` when it already is an `AND` group.
    pub fn and(self, other: Predicate) -> Predicate {
        match self {
            Predicate::And(mut children) => {
                children.push(other);
                Predicate::And(children)
            }
            this => Predicate::And(vec![this, other]),
        }
    }

    /// Combines with `OR`, extending `self` when it already is an `OR` group.
    pub fn or(self, other: Predicate) -> Predicate {
        match self {
            Predicate::Or(mut children) => {
                children.push(other);
                Predicate::Or(children)
            }
            this => Predicate::Or(vec![this, other]),
        }
    }

    fn is_group(&self) -> bool {
        matches!(self, Predicate::And(_) | Predicate::Or(_))
    }
}

impl From<Comparison> for Predicate {
    fn from(comparison: Comparison) -> Self {
        Predicate::Comparison(comparison)
    }
}

/// `a AND b`.
pub fn and(left: Predicate, right: Predicate) -> Predicate {
    Predicate::And(vec![left, right])
}

/// `a OR b`.
pub fn or(left: Predicate, right: Predicate) -> Predicate {
    Predicate::Or(vec![left, right])
}

/// `AND` over any number of predicates, kept in iteration order.
pub fn all(predicates: impl IntoIterator<Item = Predicate>) -> Predicate {
    Predicate::And(predicates.into_iter().collect())
}

/// `OR` over any number of predicates, kept in iteration order.
pub fn any(predicates: impl IntoIterator<Item = Predicate>) -> Predicate {
    Predicate::Or(predicates.into_iter().collect())
}

/// `column IS NULL`.
pub fn is_null(column: &ColumnRef) -> Predicate {
    column.is_null()
}

/// `column IS NOT NULL`.
pub fn is_not_null(column: &ColumnRef) -> Predicate {
    column.is_not_null()
}

fn group_to_sql(
    kind: &'static str,
    children: &[Predicate],
    ctx: &SqlContext,
    params: &mut Vec<Value>,
) -> Result<String> {
    if children.len() < 2 {
        return Err(CompileError::LogicalArity {
            kind,
            count: children.len(),
        });
    }

    let mut parts = Vec::with_capacity(children.len());
    for child in children {
        let sql = child.to_sql(ctx, params)?;
        if child.is_group() {
            parts.push(format!("({sql})"));
        } else {
            parts.push(sql);
        }
    }

    Ok(parts.join(&format!(" {kind} ")))
}

impl Expression for Predicate {
    fn to_sql(&self, ctx: &SqlContext, params: &mut Vec<Value>) -> Result<String> {
        match self {
            Predicate::Comparison(comparison) => comparison.to_sql(ctx, params),
            Predicate::And(children) => group_to_sql("AND", children, ctx, params),
            Predicate::Or(children) => group_to_sql("OR", children, ctx, params),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(name: &str) -> ColumnRef {
        ColumnRef::new(0, name)
    }

    fn compile(predicate: &Predicate) -> (String, Vec<Value>) {
        let mut params = vec![];
        let sql = predicate
            .to_sql(&SqlContext::qualified(1), &mut params)
            .unwrap();
        (sql, params)
    }

    #[test]
    fn test_flat_and() {
        let (sql, params) = compile(&and(col("author_id").equals(1), col("category_id").equals(2)));
        assert_eq!(sql, "t1.author_id = ? AND t1.category_id = ?");
        assert_eq!(params, vec![Value::Integer(1), Value::Integer(2)]);
    }

    #[test]
    fn test_nested_groups_are_parenthesized() {
        let a = || col("a").equals(1);
        let b = || col("b").equals(2);
        let c = || col("c").equals(3);

        let (left_sql, left_params) = compile(&and(a(), or(b(), c())));
        let (right_sql, right_params) = compile(&or(and(a(), b()), c()));

        assert_eq!(left_sql, "t1.a = ? AND (t1.b = ? OR t1.c = ?)");
        assert_eq!(right_sql, "(t1.a = ? AND t1.b = ?) OR t1.c = ?");
        assert_ne!(left_sql, right_sql);
        assert_eq!(left_params, right_params);
    }

    #[test]
    fn test_same_kind_nesting_keeps_structure() {
        let (sql, _) = compile(&and(col("a").equals(1), and(col("b").equals(2), col("c").equals(3))));
        assert_eq!(sql, "t1.a = ? AND (t1.b = ? AND t1.c = ?)");
    }

    #[test]
    fn test_method_chaining_extends_group() {
        let predicate = col("a")
            .equals(1)
            .and(col("b").equals(2))
            .and(col("c").is_null());
        let (sql, params) = compile(&predicate);
        assert_eq!(sql, "t1.a = ? AND t1.b = ? AND t1.c IS NULL");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_deep_tree_parameter_order() {
        let predicate = any((0..20).map(|i| all([col("x").equals(i), col("y").is_not_null()])));
        let (sql, params) = compile(&predicate);
        assert_eq!(sql.matches('?').count(), params.len());
        assert_eq!(params.first(), Some(&Value::Integer(0)));
        assert_eq!(params.last(), Some(&Value::Integer(19)));
    }

    #[test]
    fn test_group_arity_is_checked() {
        let mut params = vec![];
        let err = all([col("a").equals(1)])
            .to_sql(&SqlContext::qualified(1), &mut params)
            .unwrap_err();
        assert_eq!(
            err,
            CompileError::LogicalArity {
                kind: "AND",
                count: 1
            }
        );

        let err = any(Vec::new())
            .to_sql(&SqlContext::qualified(1), &mut params)
            .unwrap_err();
        assert_eq!(
            err,
            CompileError::LogicalArity {
                kind: "OR",
                count: 0
            }
        );
    }
}
