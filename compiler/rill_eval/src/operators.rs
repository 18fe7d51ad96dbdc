//! Binary operator implementations for the evaluator.
//!
//! Direct enum-based dispatch over the fixed set of value types. Numbers
//! promote to float when either side is a float; comparisons and logical
//! operators answer with `Int(1)` or `Int(0)`.

use rill_ir::BinaryOp;

use crate::errors::{
    binary_type_mismatch, division_by_zero, integer_overflow, invalid_binary_op_for,
};
use crate::{EvalResult, Value};

/// Checked integer arithmetic: the only error case is overflow.
#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> EvalResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op_name))
}

#[expect(
    clippy::cast_precision_loss,
    reason = "int-to-float promotion is the language's numeric rule"
)]
#[inline]
fn promote(n: i64) -> f64 {
    n as f64
}

/// Evaluate a binary operation. Both operands have already been evaluated.
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    if matches!(left, Value::Array(_)) {
        return eval_array_binary(left, right, op);
    }
    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Float(a), Value::Float(b)) => eval_float_binary(*a, *b, op),
        (Value::Int(a), Value::Float(b)) => eval_float_binary(promote(*a), *b, op),
        (Value::Float(a), Value::Int(b)) => eval_float_binary(*a, promote(*b), op),
        (Value::Str(a), Value::Str(b)) => eval_string_binary(a, b, op),
        _ => Err(binary_type_mismatch(
            left.type_name(),
            right.type_name(),
            op,
        )),
    }
}

/// Binary operations on integers.
///
/// `/` is true division and always yields a float. `^` stays integral for
/// non-negative exponents.
fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        BinaryOp::Div => eval_float_binary(promote(a), promote(b), op),
        BinaryOp::Pow => match u32::try_from(b) {
            Ok(exp) => checked_arith(a.checked_pow(exp), "exponentiation"),
            // Exponent beyond u32: only 0, 1 and -1 have representable powers.
            Err(_) if b >= 0 => match a {
                0 | 1 => Ok(Value::Int(a)),
                -1 => Ok(Value::Int(if b % 2 == 0 { 1 } else { -1 })),
                _ => Err(integer_overflow("exponentiation")),
            },
            Err(_) => eval_float_binary(promote(a), promote(b), op),
        },
        BinaryOp::Eq => Ok(Value::from_bool(a == b)),
        BinaryOp::NotEq => Ok(Value::from_bool(a != b)),
        BinaryOp::Lt => Ok(Value::from_bool(a < b)),
        BinaryOp::Gt => Ok(Value::from_bool(a > b)),
        BinaryOp::LtEq => Ok(Value::from_bool(a <= b)),
        BinaryOp::GtEq => Ok(Value::from_bool(a >= b)),
        BinaryOp::And => Ok(Value::from_bool(a != 0 && b != 0)),
        BinaryOp::Or => Ok(Value::from_bool(a != 0 || b != 0)),
        BinaryOp::Append => Err(invalid_binary_op_for("int", op)),
    }
}

/// Binary operations on floats (and promoted integers).
#[expect(
    clippy::float_cmp,
    reason = "language-level `==` on numbers is exact comparison"
)]
fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::Float(a + b)),
        BinaryOp::Sub => Ok(Value::Float(a - b)),
        BinaryOp::Mul => Ok(Value::Float(a * b)),
        BinaryOp::Div => {
            if b == 0.0 {
                Err(division_by_zero())
            } else {
                Ok(Value::Float(a / b))
            }
        }
        BinaryOp::Pow => Ok(Value::Float(a.powf(b))),
        BinaryOp::Eq => Ok(Value::from_bool(a == b)),
        BinaryOp::NotEq => Ok(Value::from_bool(a != b)),
        BinaryOp::Lt => Ok(Value::from_bool(a < b)),
        BinaryOp::Gt => Ok(Value::from_bool(a > b)),
        BinaryOp::LtEq => Ok(Value::from_bool(a <= b)),
        BinaryOp::GtEq => Ok(Value::from_bool(a >= b)),
        BinaryOp::And => Ok(Value::from_bool(a != 0.0 && b != 0.0)),
        BinaryOp::Or => Ok(Value::from_bool(a != 0.0 || b != 0.0)),
        BinaryOp::Append => Err(invalid_binary_op_for("float", op)),
    }
}

/// Binary operations on strings: concatenation and equality.
fn eval_string_binary(a: &str, b: &str, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => {
            let mut result = String::with_capacity(a.len() + b.len());
            result.push_str(a);
            result.push_str(b);
            Ok(Value::string(result))
        }
        BinaryOp::Eq => Ok(Value::from_bool(a == b)),
        BinaryOp::NotEq => Ok(Value::from_bool(a != b)),
        _ => Err(invalid_binary_op_for("string", op)),
    }
}

/// Array append: `list @ item` returns a new array; `list` is untouched.
///
/// Writing through `make_mut` copies the elements when the left operand is
/// still bound elsewhere, which is always the case for a variable operand.
fn eval_array_binary(mut array: Value, value: Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Append => {
            if let Some(items) = array.array_mut() {
                items.push(value);
            }
            Ok(array)
        }
        _ => Err(invalid_binary_op_for("array", op)),
    }
}
