//! Function call evaluation helpers.

use crate::errors::wrong_function_args;
use crate::{Context, EvalError, FunctionValue, Value};

/// Check that a call supplies exactly one argument per parameter.
pub fn check_arg_count(func: &FunctionValue, args: &[Value]) -> Result<(), EvalError> {
    if args.len() == func.arity() {
        Ok(())
    } else {
        Err(wrong_function_args(
            func.display_name(),
            func.arity(),
            args.len(),
        ))
    }
}

/// Bind each parameter, in order, to the corresponding argument.
///
/// Assumes the count was validated with [`check_arg_count`].
pub fn bind_parameters(ctx: &mut Context<'_>, func: &FunctionValue, args: Vec<Value>) {
    for (param, value) in func.params.iter().zip(args) {
        ctx.set(param.as_str(), value);
    }
}
