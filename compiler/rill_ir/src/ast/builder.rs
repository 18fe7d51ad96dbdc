//! Convenience constructors for building expression trees by hand.
//!
//! Parsers and embedding hosts build nodes with [`Expr::new`]; these helpers
//! cover the common shapes and start every node at [`Span::DUMMY`]. Chain
//! [`Expr::at`] to give a node its real source range.
//!
//! ```
//! use rill_ir::{BinaryOp, Expr};
//!
//! // 1 + 2
//! let sum = Expr::binary(BinaryOp::Add, Expr::int(1).at(0, 1), Expr::int(2).at(4, 5)).at(0, 5);
//! assert_eq!(sum.span.end, 5);
//! ```

use std::rc::Rc;

use super::expr::{Expr, ExprKind, IfCase, Name, NumberLit};
use super::operators::{BinaryOp, UnaryOp};
use crate::Span;

impl Expr {
    /// Replace this node's span.
    #[must_use]
    pub fn at(mut self, start: u32, end: u32) -> Self {
        self.span = Span::new(start, end);
        self
    }

    fn dummy(kind: ExprKind) -> Self {
        Expr::new(kind, Span::DUMMY)
    }

    pub fn int(value: i64) -> Self {
        Self::dummy(ExprKind::Number(NumberLit::Int(value)))
    }

    pub fn float(value: f64) -> Self {
        Self::dummy(ExprKind::Number(NumberLit::Float(value)))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::dummy(ExprKind::String(value.into()))
    }

    pub fn array(elements: Vec<Expr>) -> Self {
        Self::dummy(ExprKind::Array(elements))
    }

    pub fn var(name: impl Into<Name>) -> Self {
        Self::dummy(ExprKind::VarAccess(name.into()))
    }

    pub fn assign(name: impl Into<Name>, value: Expr) -> Self {
        Self::dummy(ExprKind::VarAssign {
            name: name.into(),
            value: Box::new(value),
        })
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Self::dummy(ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Self::dummy(ExprKind::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    /// Build an `if` chain from `(condition, body)` pairs.
    pub fn if_chain(cases: Vec<(Expr, Expr)>, else_branch: Option<Expr>) -> Self {
        Self::dummy(ExprKind::If {
            cases: cases
                .into_iter()
                .map(|(condition, body)| IfCase { condition, body })
                .collect(),
            else_branch: else_branch.map(Box::new),
        })
    }

    pub fn for_loop(
        var: impl Into<Name>,
        start: Expr,
        end: Expr,
        step: Option<Expr>,
        body: Expr,
    ) -> Self {
        Self::dummy(ExprKind::For {
            var: var.into(),
            start: Box::new(start),
            end: Box::new(end),
            step: step.map(Box::new),
            body: Box::new(body),
        })
    }

    pub fn while_loop(condition: Expr, body: Expr) -> Self {
        Self::dummy(ExprKind::While {
            condition: Box::new(condition),
            body: Box::new(body),
        })
    }

    pub fn func_def(name: Option<&str>, params: &[&str], body: Expr) -> Self {
        Self::dummy(ExprKind::FuncDef {
            name: name.map(str::to_string),
            params: params.iter().map(|p| (*p).to_string()).collect(),
            body: Rc::new(body),
        })
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Self::dummy(ExprKind::Call {
            callee: Box::new(callee),
            args,
        })
    }
}
