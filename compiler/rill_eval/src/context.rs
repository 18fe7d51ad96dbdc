//! Execution contexts (symbol tables) for the evaluator.
//!
//! A [`Context`] is the scope of one evaluation frame: the program's root
//! context, or the fresh context a function call creates. Name lookup never
//! leaves the current context. The parent link exists so that errors can
//! report the chain of calls that led to them and so the call depth can be
//! read without a separate counter.

use std::cell::Cell;
use std::rc::Rc;

use rill_ir::{Name, Span};
use rustc_hash::FxHashMap;

use crate::errors::{BacktraceFrame, EvalBacktrace, EvalError};
use crate::Value;

/// Display name of the root context.
pub const PROGRAM: &str = "<program>";

/// Name-to-value bindings for one evaluation frame.
///
/// Contexts live on the Rust stack: a call context borrows its caller and is
/// dropped when the call returns.
#[derive(Debug)]
pub struct Context<'p> {
    display_name: String,
    symbols: FxHashMap<Name, Value>,
    parent: Option<&'p Context<'p>>,
    /// Span of the call that created this context (`None` for the root).
    entry_span: Option<Span>,
    /// Number of call frames above this one.
    depth: usize,
    /// Steps of the current evaluation, shared with child contexts.
    steps: Rc<Cell<u64>>,
}

impl Context<'static> {
    /// Create a root context.
    pub fn new(display_name: impl Into<String>) -> Self {
        Context {
            display_name: display_name.into(),
            symbols: FxHashMap::default(),
            parent: None,
            entry_span: None,
            depth: 0,
            steps: Rc::new(Cell::new(0)),
        }
    }
}

impl Default for Context<'static> {
    /// Creates an empty root context named `<program>`.
    fn default() -> Self {
        Context::new(PROGRAM)
    }
}

impl<'p> Context<'p> {
    /// Create an empty context for a call made from `self`.
    pub fn child<'c>(&'c self, display_name: impl Into<String>, entry_span: Span) -> Context<'c> {
        Context {
            display_name: display_name.into(),
            symbols: FxHashMap::default(),
            parent: Some(self),
            entry_span: Some(entry_span),
            depth: self.depth + 1,
            steps: Rc::clone(&self.steps),
        }
    }

    /// Look up a binding. Absence is not an error here; the caller decides.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.symbols.get(name)
    }

    /// In-place access to a binding.
    ///
    /// Composite payloads are copy-on-write, so writing through the returned
    /// reference never changes another binding that was copied from this one.
    #[inline]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.symbols.get_mut(name)
    }

    /// Insert or overwrite a binding.
    #[inline]
    pub fn set(&mut self, name: impl Into<Name>, value: Value) {
        self.symbols.insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn parent(&self) -> Option<&'p Context<'p>> {
        self.parent
    }

    pub fn entry_span(&self) -> Option<Span> {
        self.entry_span
    }

    /// Call depth: 0 for the root, one more for each nested call.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Steps counted so far in the current evaluation.
    pub fn steps(&self) -> u64 {
        self.steps.get()
    }

    /// Start counting a new evaluation.
    #[inline]
    pub(crate) fn reset_steps(&self) {
        self.steps.set(0);
    }

    /// Count one step and return the new total.
    #[inline]
    pub(crate) fn tick(&self) -> u64 {
        let next = self.steps.get().saturating_add(1);
        self.steps.set(next);
        next
    }

    /// Snapshot the context chain, most recent frame first.
    ///
    /// `span` is the position inside this context; each parent frame gets
    /// the span of the call that entered its child.
    pub fn backtrace(&self, span: Option<Span>) -> EvalBacktrace {
        let mut frames = Vec::with_capacity(self.depth + 1);
        let mut position = span;
        let mut current = Some(self);
        while let Some(ctx) = current {
            frames.push(BacktraceFrame {
                name: ctx.display_name.clone(),
                span: position,
            });
            position = ctx.entry_span;
            current = ctx.parent;
        }
        EvalBacktrace::new(frames)
    }

    /// Stamp an error with its failure site.
    ///
    /// Only the innermost site is recorded: an error that already carries a
    /// backtrace passes through unchanged, and an error that already has a
    /// span keeps it.
    pub fn attach_backtrace(&self, err: EvalError, span: Span) -> EvalError {
        if err.backtrace.is_some() {
            return err;
        }
        let span = err.span.unwrap_or(span);
        let backtrace = self.backtrace(Some(span));
        err.with_span(span).with_backtrace(backtrace)
    }
}
