//! Rill IR - syntax tree types shared by the parser and the evaluator.
//!
//! This crate contains:
//! - [`Span`] for source locations
//! - AST nodes ([`Expr`], [`ExprKind`]) and operators
//!
//! With the `serde` feature enabled every type here can be serialized, which
//! lets a parser running out of process hand its tree to the evaluator.

pub mod ast;
mod span;

pub use ast::{BinaryOp, Expr, ExprKind, IfCase, Name, NumberLit, SharedExpr, UnaryOp};
pub use span::Span;
