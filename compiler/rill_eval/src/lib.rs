//! Rill Eval - tree-walking evaluator for the Rill language.
//!
//! The evaluator consumes a syntax tree built by an external parser
//! ([`rill_ir::Expr`]) and a [`Context`], and produces either a [`Value`] or
//! an [`EvalError`].
//!
//! # Architecture
//!
//! - `Value`: runtime values; composites are copy-on-write behind `Heap<T>`
//! - `Context`: per-frame symbol table with a parent link for tracebacks
//! - `evaluate_binary` / `evaluate_unary`: enum-based operator dispatch
//! - `Interpreter`: the recursive dispatcher, configured by `EvalMode`
//! - `render_traceback`: driver-facing error rendering
//!
//! # Example
//!
//! ```
//! use rill_eval::{Context, Interpreter, Value};
//! use rill_ir::{BinaryOp, Expr};
//!
//! let program = Expr::binary(BinaryOp::Add, Expr::int(2), Expr::int(3));
//! let mut ctx = Context::default();
//! let result = Interpreter::new().evaluate(&program, &mut ctx);
//! assert_eq!(result.ok(), Some(Value::Int(5)));
//! ```

mod context;
pub mod diagnostics;
pub mod errors;
mod eval_mode;
pub mod exec;
pub mod interpreter;
mod operators;
mod unary_operators;
mod value;

use std::sync::Once;

pub use context::{Context, PROGRAM};
pub use diagnostics::render_traceback;
pub use errors::{BacktraceFrame, EvalBacktrace, EvalError, EvalErrorKind, EvalResult};
pub use eval_mode::{EvalMode, InterruptHandle};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use operators::evaluate_binary;
pub use unary_operators::evaluate_unary;
pub use value::{FunctionValue, Heap, Value, ANONYMOUS};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for evaluator diagnostics.
///
/// Installs a subscriber filtered by `RUST_LOG` (e.g. `RUST_LOG=rill_eval=debug`
/// for call spans, `=trace` for every node). Does nothing when `RUST_LOG` is
/// unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

#[cfg(test)]
mod tests;
