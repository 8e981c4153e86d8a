//! Comparison operators.
//!
//! A comparison relates two operands (`t1.id = ?`, `t1.author_id = t2.id`)
//! or tests a single column (`t1.published IS NULL`). Each variant compiles
//! its operands left to right so placeholders and parameters stay aligned.

use crate::{
    error::Result,
    expr::column::ColumnRef,
    traits::{Expression, SqlContext},
    value::Value,
};

/// One side of a binary comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Column(ColumnRef),
    Value(Value),
}

impl Expression for Operand {
    fn to_sql(&self, ctx: &SqlContext, params: &mut Vec<Value>) -> Result<String> {
        match self {
            Operand::Column(column) => column.to_sql(ctx, params),
            Operand::Value(value) => {
                params.push(value.clone());
                Ok("?".to_string())
            }
        }
    }
}

/// Conversion into a comparison operand.
///
/// Implemented for column references (compiled as column text) and for
/// scalars (compiled as a placeholder plus one bound parameter).
pub trait IntoOperand {
    fn into_operand(self) -> Operand;
}

impl IntoOperand for Operand {
    fn into_operand(self) -> Operand {
        self
    }
}

impl IntoOperand for ColumnRef {
    fn into_operand(self) -> Operand {
        Operand::Column(self)
    }
}

impl IntoOperand for &ColumnRef {
    fn into_operand(self) -> Operand {
        Operand::Column(self.clone())
    }
}

impl IntoOperand for Value {
    fn into_operand(self) -> Operand {
        Operand::Value(self)
    }
}

macro_rules! impl_value_operand {
    ($($ty:ty),*) => {
        $(
            impl IntoOperand for $ty {
                fn into_operand(self) -> Operand {
                    Operand::Value(Value::from(self))
                }
            }
        )*
    };
}

impl_value_operand!(
    bool, i8, i16, i32, i64, u8, u16, u32, isize, f32, f64, &str, String, &String
);

impl<T: Into<Value>> IntoOperand for Option<T> {
    fn into_operand(self) -> Operand {
        Operand::Value(Value::from(self))
    }
}

/// Binary comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Equals,
    NotEquals,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
}

impl CompareOp {
    pub fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Equals => "=",
            CompareOp::NotEquals => "<>",
            CompareOp::LessThan => "<",
            CompareOp::LessOrEqual => "<=",
            CompareOp::GreaterThan => ">",
            CompareOp::GreaterOrEqual => ">=",
        }
    }
}

/// A leaf predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    Binary {
        op: CompareOp,
        left: Operand,
        right: Operand,
    },
    IsNull(ColumnRef),
    IsNotNull(ColumnRef),
}

impl Comparison {
    /// Shorthand for an `=` comparison between two operands.
    pub fn equals(left: impl IntoOperand, right: impl IntoOperand) -> Self {
        Comparison::Binary {
            op: CompareOp::Equals,
            left: left.into_operand(),
            right: right.into_operand(),
        }
    }
}

impl Expression for Comparison {
    fn to_sql(&self, ctx: &SqlContext, params: &mut Vec<Value>) -> Result<String> {
        match self {
            Comparison::Binary {
                op,
                left,
                right,
            } => {
                let left_sql = left.to_sql(ctx, params)?;
                let right_sql = right.to_sql(ctx, params)?;
                Ok(format!("{} {} {}", left_sql, op.as_sql(), right_sql))
            }
            Comparison::IsNull(column) => Ok(format!("{} IS NULL", column.to_sql(ctx, params)?)),
            Comparison::IsNotNull(column) => {
                Ok(format!("{} IS NOT NULL", column.to_sql(ctx, params)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(comparison: &Comparison) -> (String, Vec<Value>) {
        let mut params = vec![];
        let sql = comparison
            .to_sql(&SqlContext::qualified(2), &mut params)
            .unwrap();
        (sql, params)
    }

    #[test]
    fn test_value_operand_binds_parameter() {
        let (sql, params) = compile(&Comparison::equals(ColumnRef::new(0, "id"), 1));
        assert_eq!(sql, "t1.id = ?");
        assert_eq!(params, vec![Value::Integer(1)]);
    }

    #[test]
    fn test_column_operands_bind_nothing() {
        let (sql, params) = compile(&Comparison::equals(
            ColumnRef::new(0, "author_id"),
            ColumnRef::new(1, "id"),
        ));
        assert_eq!(sql, "t1.author_id = t2.id");
        assert!(params.is_empty());
    }

    #[test]
    fn test_parameters_follow_text_order() {
        let (sql, params) = compile(&Comparison::Binary {
            op: CompareOp::GreaterOrEqual,
            left: Value::from("a").into_operand(),
            right: Value::from("b").into_operand(),
        });
        assert_eq!(sql, "? >= ?");
        assert_eq!(params, vec![Value::from("a"), Value::from("b")]);
    }

    #[test]
    fn test_null_checks() {
        let col = ColumnRef::new(0, "published");
        assert_eq!(compile(&Comparison::IsNull(col.clone())).0, "t1.published IS NULL");
        assert_eq!(compile(&Comparison::IsNotNull(col)).0, "t1.published IS NOT NULL");
    }
}
