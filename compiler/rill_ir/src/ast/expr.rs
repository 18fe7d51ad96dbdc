//! Expression Types
//!
//! Core expression nodes and variants. Rill is expression-oriented: loops,
//! conditionals and function definitions all produce values, so there is no
//! separate statement type.
//!
//! Children are owned (`Box`/`Vec`). Function bodies are the exception: they
//! are reference-counted so a function value can keep its body alive after
//! the defining tree has been dropped.

use std::fmt;
use std::rc::Rc;

use super::operators::{BinaryOp, UnaryOp};
use crate::Span;

/// Identifier as written in source.
pub type Name = String;

/// Shared handle to an expression, used for function bodies.
pub type SharedExpr = Rc<Expr>;

/// Expression node.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Numeric literal payload.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumberLit {
    Int(i64),
    Float(f64),
}

/// One `condition => expression` arm of an `if`/`elif` chain.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IfCase {
    pub condition: Expr,
    pub body: Expr,
}

/// Expression variants.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprKind {
    /// Number literal: `42`, `2.5`
    Number(NumberLit),

    /// String literal: `"text"`
    String(String),

    /// Array literal: `[a, b, c]`
    Array(Vec<Expr>),

    /// Variable reference
    VarAccess(Name),

    /// Assignment: `var name = value`
    VarAssign { name: Name, value: Box<Expr> },

    /// Binary operation: `left op right`
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Unary operation: `op operand`
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Conditional chain: `if c1 then e1 elif c2 then e2 else e3`
    If {
        cases: Vec<IfCase>,
        else_branch: Option<Box<Expr>>,
    },

    /// Counting loop: `for var = start to end step s then body`
    For {
        var: Name,
        start: Box<Expr>,
        end: Box<Expr>,
        step: Option<Box<Expr>>,
        body: Box<Expr>,
    },

    /// Conditional loop: `while condition then body`
    While { condition: Box<Expr>, body: Box<Expr> },

    /// Function definition, named or anonymous: `fun name(a, b) -> body`
    FuncDef {
        name: Option<Name>,
        params: Vec<Name>,
        body: SharedExpr,
    },

    /// Call: `callee(args...)`
    Call { callee: Box<Expr>, args: Vec<Expr> },
}

impl ExprKind {
    /// Variant name, used in trace output.
    pub const fn name(&self) -> &'static str {
        match self {
            ExprKind::Number(_) => "Number",
            ExprKind::String(_) => "String",
            ExprKind::Array(_) => "Array",
            ExprKind::VarAccess(_) => "VarAccess",
            ExprKind::VarAssign { .. } => "VarAssign",
            ExprKind::Binary { .. } => "Binary",
            ExprKind::Unary { .. } => "Unary",
            ExprKind::If { .. } => "If",
            ExprKind::For { .. } => "For",
            ExprKind::While { .. } => "While",
            ExprKind::FuncDef { .. } => "FuncDef",
            ExprKind::Call { .. } => "Call",
        }
    }
}
