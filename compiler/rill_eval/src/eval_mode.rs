//! Evaluation modes and cooperative cancellation.
//!
//! `EvalMode` decides how much work one evaluation may do. Limits are
//! checked at the only sites where unbounded work can happen: every loop
//! iteration and every function call.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Evaluation mode, selected through [`InterpreterBuilder::mode`](crate::InterpreterBuilder::mode).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    /// Standard mode: call depth capped at [`EvalMode::DEFAULT_MAX_DEPTH`],
    /// no step budget.
    #[default]
    Interpret,
    /// Sandboxed mode for untrusted programs.
    Bounded {
        /// Maximum number of nested calls.
        max_depth: usize,
        /// Maximum number of steps (loop iterations plus calls).
        budget: u64,
    },
}

impl EvalMode {
    /// Call depth limit in `Interpret` mode.
    pub const DEFAULT_MAX_DEPTH: usize = 1000;

    /// Maximum number of nested calls.
    #[inline]
    pub fn max_recursion_depth(&self) -> usize {
        match self {
            Self::Interpret => Self::DEFAULT_MAX_DEPTH,
            Self::Bounded { max_depth, .. } => *max_depth,
        }
    }

    /// Step budget, or `None` for unlimited.
    #[inline]
    pub fn step_budget(&self) -> Option<u64> {
        match self {
            Self::Interpret => None,
            Self::Bounded { budget, .. } => Some(*budget),
        }
    }
}

/// Shared flag that asks a running evaluation to stop.
///
/// Clone the handle, give one copy to the interpreter and raise the flag
/// from anywhere (another thread, a signal handler). The evaluator stops
/// with an "evaluation interrupted" error at its next loop iteration or call.
#[derive(Clone, Debug, Default)]
pub struct InterruptHandle(Arc<AtomicBool>);

impl InterruptHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that evaluation stop.
    pub fn interrupt(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Clear a previous request so the handle can be reused.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_interrupted(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
