//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use super::Interpreter;
use crate::eval_mode::{EvalMode, InterruptHandle};

/// Builder for creating Interpreter instances.
///
/// The default mode is `Interpret`. Hosts running untrusted programs should
/// pick `EvalMode::Bounded { .. }` and usually attach an [`InterruptHandle`].
#[derive(Clone, Debug, Default)]
pub struct InterpreterBuilder {
    mode: EvalMode,
    interrupt: Option<InterruptHandle>,
}

impl InterpreterBuilder {
    /// Create a new builder with default `Interpret` mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the evaluation mode.
    ///
    /// Controls the call depth limit and the step budget.
    #[must_use]
    pub fn mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Attach a handle that can stop evaluation from outside.
    #[must_use]
    pub fn interrupt(mut self, handle: InterruptHandle) -> Self {
        self.interrupt = Some(handle);
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            mode: self.mode,
            interrupt: self.interrupt,
        }
    }
}
