//! AST node types consumed by the evaluator.
//!
//! The tree is produced by an external parser and is immutable once built.

mod builder;
mod expr;
mod operators;

pub use expr::{Expr, ExprKind, IfCase, Name, NumberLit, SharedExpr};
pub use operators::{BinaryOp, UnaryOp};
