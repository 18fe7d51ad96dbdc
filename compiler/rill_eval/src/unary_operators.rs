//! Unary operator implementations for the evaluator.

use rill_ir::UnaryOp;

use crate::errors::{integer_overflow, invalid_unary_op};
use crate::{EvalResult, Value};

/// Evaluate a unary operation.
///
/// Negation gives the same result as multiplying by `-1`, including the
/// overflow on `i64::MIN`. `not` maps zero to `1` and anything else to `0`.
pub fn evaluate_unary(value: Value, op: UnaryOp) -> EvalResult {
    match (&value, op) {
        (Value::Int(n), UnaryOp::Neg) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("negation")),
        (Value::Float(x), UnaryOp::Neg) => Ok(Value::Float(-x)),
        (Value::Int(_) | Value::Float(_), UnaryOp::Not) => {
            Ok(Value::from_bool(!value.is_truthy()))
        }
        _ => Err(invalid_unary_op(value.type_name(), op)),
    }
}
