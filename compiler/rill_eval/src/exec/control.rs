//! Control flow evaluation (if/elif/else and `for` ranges).

use rill_ir::{Expr, IfCase};

use crate::errors::loop_bound_not_number;
use crate::{EvalError, EvalResult, Value};

/// Evaluate an if/elif/else chain.
///
/// Cases are tried in order; the first truthy condition selects its body and
/// no later condition is evaluated. With no match and no `else` the result
/// is [`Value::Void`].
pub fn eval_if<'a, F>(
    cases: &'a [IfCase],
    else_branch: Option<&'a Expr>,
    mut eval_fn: F,
) -> EvalResult
where
    F: FnMut(&'a Expr) -> EvalResult,
{
    for case in cases {
        if eval_fn(&case.condition)?.is_truthy() {
            return eval_fn(&case.body);
        }
    }
    match else_branch {
        Some(else_expr) => eval_fn(else_expr),
        None => Ok(Value::Void),
    }
}

/// The sequence of values a `for` loop variable takes.
///
/// Bounds are evaluated once, before the first iteration. The loop runs
/// while `current < end` for a non-negative step and while `current > end`
/// for a negative one. A zero step never terminates on its own; the
/// interpreter's budget and interrupt checks are what stop it.
#[derive(Clone, Debug, PartialEq)]
pub enum ForRange {
    /// All three bounds are integers. `current` is `None` once advancing
    /// would overflow.
    Int {
        current: Option<i64>,
        end: i64,
        step: i64,
    },
    /// At least one bound is a float.
    Float { current: f64, end: f64, step: f64 },
}

impl ForRange {
    /// Build the range from evaluated bounds. `step` defaults to `1`.
    pub fn new(start: &Value, end: &Value, step: Option<&Value>) -> Result<Self, EvalError> {
        let default_step = Value::Int(1);
        let step = step.unwrap_or(&default_step);
        if let (Value::Int(start), Value::Int(end), Value::Int(step)) = (start, end, step) {
            return Ok(ForRange::Int {
                current: Some(*start),
                end: *end,
                step: *step,
            });
        }
        Ok(ForRange::Float {
            current: number_bound("start", start)?,
            end: number_bound("end", end)?,
            step: number_bound("step", step)?,
        })
    }
}

fn number_bound(bound: &str, value: &Value) -> Result<f64, EvalError> {
    value
        .as_f64()
        .ok_or_else(|| loop_bound_not_number(bound, value.type_name()))
}

impl Iterator for ForRange {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        match self {
            ForRange::Int { current, end, step } => {
                let value = (*current)?;
                let in_range = if *step >= 0 { value < *end } else { value > *end };
                if !in_range {
                    return None;
                }
                *current = value.checked_add(*step);
                Some(Value::Int(value))
            }
            ForRange::Float { current, end, step } => {
                let value = *current;
                let in_range = if *step >= 0.0 { value < *end } else { value > *end };
                if !in_range {
                    return None;
                }
                *current += *step;
                Some(Value::Float(value))
            }
        }
    }
}
