//! Tree-walking interpreter for Rill expressions.
//!
//! [`Interpreter::evaluate`] starts one evaluation; `eval` is the recursive
//! step under it. Every step runs inside [`ensure_sufficient_stack`], so
//! deeply nested trees grow the native stack instead of overflowing it.
//!
//! The interpreter holds configuration only. All mutable state lives in the
//! [`Context`] passed to `evaluate` and in the values it binds, so one
//! interpreter can evaluate any number of programs.

mod builder;
mod function_call;

use std::rc::Rc;

use rill_ir::{Expr, ExprKind, Name, NumberLit, SharedExpr};
use rill_stack::ensure_sufficient_stack;

pub use builder::InterpreterBuilder;

use crate::errors::{budget_exceeded, interrupted, undefined_variable};
use crate::eval_mode::{EvalMode, InterruptHandle};
use crate::exec::control::{eval_if, ForRange};
use crate::operators::evaluate_binary;
use crate::unary_operators::evaluate_unary;
use crate::{Context, EvalError, EvalResult, FunctionValue, Value};

/// Tree-walking interpreter.
#[derive(Clone, Debug, Default)]
pub struct Interpreter {
    mode: EvalMode,
    interrupt: Option<InterruptHandle>,
}

impl Interpreter {
    /// Create an interpreter in the default `Interpret` mode.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub fn mode(&self) -> &EvalMode {
        &self.mode
    }

    /// Evaluate `expr` in `ctx`.
    ///
    /// Each call is a separate evaluation: the step budget starts from zero,
    /// so a host can evaluate line after line against one global context.
    /// Errors leave this function stamped with the span of the innermost
    /// failing node and the chain of contexts active at that point.
    pub fn evaluate(&self, expr: &Expr, ctx: &mut Context<'_>) -> EvalResult {
        ctx.reset_steps();
        self.eval(expr, ctx)
    }

    fn eval(&self, expr: &Expr, ctx: &mut Context<'_>) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(expr, ctx))
            .map_err(|err| ctx.attach_backtrace(err, expr.span))
    }

    fn eval_inner(&self, expr: &Expr, ctx: &mut Context<'_>) -> EvalResult {
        tracing::trace!(kind = expr.kind.name(), span = %expr.span, "eval");
        match &expr.kind {
            ExprKind::Number(NumberLit::Int(n)) => Ok(Value::Int(*n)),
            ExprKind::Number(NumberLit::Float(x)) => Ok(Value::Float(*x)),
            ExprKind::String(s) => Ok(Value::string(s.as_str())),
            ExprKind::Array(elements) => {
                let items = elements
                    .iter()
                    .map(|element| self.eval(element, ctx))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::array(items))
            }
            ExprKind::VarAccess(name) => ctx
                .get(name)
                .cloned()
                .ok_or_else(|| undefined_variable(name)),
            ExprKind::VarAssign { name, value } => {
                let value = self.eval(value, ctx)?;
                ctx.set(name.as_str(), value.clone());
                Ok(value)
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.eval(left, ctx)?;
                let right = self.eval(right, ctx)?;
                evaluate_binary(left, right, *op)
            }
            ExprKind::Unary { op, operand } => {
                let value = self.eval(operand, ctx)?;
                evaluate_unary(value, *op)
            }
            ExprKind::If { cases, else_branch } => {
                eval_if(cases, else_branch.as_deref(), |e| self.eval(e, ctx))
            }
            ExprKind::For {
                var,
                start,
                end,
                step,
                body,
            } => self.eval_for(var, start, end, step.as_deref(), body, ctx),
            ExprKind::While { condition, body } => self.eval_while(condition, body, ctx),
            ExprKind::FuncDef { name, params, body } => {
                Ok(Self::eval_func_def(name.as_ref(), params, body, ctx))
            }
            ExprKind::Call { callee, args } => self.eval_call(callee, args, expr.span, ctx),
        }
    }

    /// Evaluate a `for` loop, collecting each body value into an array.
    fn eval_for(
        &self,
        var: &Name,
        start: &Expr,
        end: &Expr,
        step: Option<&Expr>,
        body: &Expr,
        ctx: &mut Context<'_>,
    ) -> EvalResult {
        let start = self.eval(start, ctx)?;
        let end = self.eval(end, ctx)?;
        let step = step.map(|step| self.eval(step, ctx)).transpose()?;
        let range = ForRange::new(&start, &end, step.as_ref())?;

        let mut results = Vec::new();
        for current in range {
            self.checkpoint(ctx)?;
            ctx.set(var.as_str(), current);
            results.push(self.eval(body, ctx)?);
        }
        tracing::debug!(var = %var, iterations = results.len(), "for loop finished");
        Ok(Value::array(results))
    }

    /// Evaluate a `while` loop, collecting each body value into an array.
    fn eval_while(&self, condition: &Expr, body: &Expr, ctx: &mut Context<'_>) -> EvalResult {
        let mut results = Vec::new();
        loop {
            self.checkpoint(ctx)?;
            if !self.eval(condition, ctx)?.is_truthy() {
                break;
            }
            results.push(self.eval(body, ctx)?);
        }
        tracing::debug!(iterations = results.len(), "while loop finished");
        Ok(Value::array(results))
    }

    /// Build a function value; a named definition is also bound in `ctx`.
    fn eval_func_def(
        name: Option<&Name>,
        params: &[Name],
        body: &SharedExpr,
        ctx: &mut Context<'_>,
    ) -> Value {
        let func = Value::function(FunctionValue::new(
            name.cloned(),
            params.to_vec(),
            Rc::clone(body),
        ));
        if let Some(name) = name {
            ctx.set(name.as_str(), func.clone());
        }
        func
    }

    /// Cooperative limit check, run once per loop iteration and per call.
    fn checkpoint(&self, ctx: &Context<'_>) -> Result<(), EvalError> {
        if self
            .interrupt
            .as_ref()
            .is_some_and(InterruptHandle::is_interrupted)
        {
            tracing::warn!(steps = ctx.steps(), "evaluation interrupted");
            return Err(interrupted());
        }
        let steps = ctx.tick();
        if let Some(budget) = self.mode.step_budget() {
            if steps > budget {
                tracing::warn!(budget, "evaluation budget exceeded");
                return Err(budget_exceeded(budget));
            }
        }
        Ok(())
    }
}
