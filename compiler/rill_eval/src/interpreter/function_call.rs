//! Function call evaluation methods for the Interpreter.

use rill_ir::{Expr, Span};

use super::Interpreter;
use crate::errors::{not_callable, recursion_limit_exceeded};
use crate::exec::call::{bind_parameters, check_arg_count};
use crate::{Context, EvalResult, FunctionValue, Value};

impl Interpreter {
    /// Evaluate a call node: callee first, then arguments left to right.
    pub(super) fn eval_call(
        &self,
        callee: &Expr,
        args: &[Expr],
        span: Span,
        ctx: &mut Context<'_>,
    ) -> EvalResult {
        let callee = self.eval(callee, ctx)?;
        let args = args
            .iter()
            .map(|arg| self.eval(arg, ctx))
            .collect::<Result<Vec<_>, _>>()?;
        match &callee {
            Value::Function(func) => self.call_function(func, args, span, ctx),
            other => Err(not_callable(other.type_name())),
        }
    }

    /// Call `func` with already-evaluated arguments as a new evaluation.
    ///
    /// This is how a host invokes a function value it holds. Like
    /// [`Interpreter::evaluate`], the step budget starts from zero.
    pub fn execute(
        &self,
        func: &FunctionValue,
        args: Vec<Value>,
        call_span: Span,
        caller: &Context<'_>,
    ) -> EvalResult {
        caller.reset_steps();
        self.call_function(func, args, call_span, caller)
    }

    /// The body runs in a fresh context whose only bindings are the
    /// parameters. `call_span` is recorded on that context for tracebacks.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(function = func.display_name(), args = args.len())
    )]
    fn call_function(
        &self,
        func: &FunctionValue,
        args: Vec<Value>,
        call_span: Span,
        caller: &Context<'_>,
    ) -> EvalResult {
        self.checkpoint(caller)?;
        let limit = self.mode.max_recursion_depth();
        if caller.depth() >= limit {
            return Err(recursion_limit_exceeded(limit));
        }
        check_arg_count(func, &args)?;

        let mut call_ctx = caller.child(func.display_name(), call_span);
        bind_parameters(&mut call_ctx, func, args);
        self.eval(&func.body, &mut call_ctx)
    }
}
