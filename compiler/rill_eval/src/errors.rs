//! Runtime error types for the evaluator.
//!
//! Every failure the evaluator can report is an [`EvalError`]: a structured
//! [`EvalErrorKind`], the source span of the failing node, and a backtrace of
//! the contexts that were active when it happened.
//!
//! Errors are created through the `#[cold]` factory functions at the bottom
//! of this module. The evaluator fills in span and backtrace at the failure
//! site (see [`Context::attach_backtrace`](crate::Context::attach_backtrace)).

use std::fmt;

use rill_ir::{BinaryOp, Span, UnaryOp};

use crate::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
///
/// `Display` produces the message shown to the user after `Runtime Error:`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    // Arithmetic
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: String },

    // Type/Operator
    #[error("operator `{}` cannot be applied to {type_name}", .op.as_symbol())]
    InvalidBinaryOp { type_name: String, op: BinaryOp },
    #[error("unsupported operand types for `{}`: {left} and {right}", .op.as_symbol())]
    BinaryTypeMismatch {
        left: String,
        right: String,
        op: BinaryOp,
    },
    #[error("operator `{}` cannot be applied to {type_name}", .op.as_symbol())]
    InvalidUnaryOp { type_name: String, op: UnaryOp },
    #[error("for loop {bound} must be a number, got {type_name}")]
    LoopBoundNotNumber { bound: String, type_name: String },

    // Access
    #[error("var '{name}' is not defined")]
    UndefinedVariable { name: String },

    // Function
    #[error("wrong number of arguments passed into '{name}': expected {expected}, got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("{type_name} is not callable")]
    NotCallable { type_name: String },

    // Resource limits
    #[error("maximum recursion depth exceeded (limit: {depth})")]
    StackOverflow { depth: usize },
    #[error("evaluation budget of {budget} steps exceeded")]
    BudgetExceeded { budget: u64 },
    #[error("evaluation interrupted")]
    Interrupted,
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Context display name: `<program>`, a function name, or `<anonymous>`.
    pub name: String,
    /// Position inside this frame: the error site for the innermost frame,
    /// the call that entered the next frame for the others.
    pub span: Option<Span>,
}

/// Immutable snapshot of the context chain at an error site.
///
/// Frames are ordered most recent first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "  {i}: {}", frame.name)?;
            if let Some(span) = frame.span {
                write!(f, " at {span}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message; always `kind.to_string()`.
    pub message: String,
    /// Source range of the node that failed.
    pub span: Option<Span>,
    /// Context chain at the failure site.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    /// Create an error from a structured kind.
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            span: None,
            backtrace: None,
        }
    }

    /// Attach a source span to this error.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach a backtrace to this error.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    /// Whether this error stopped evaluation because of a configured limit
    /// rather than a fault in the program.
    pub fn is_resource_limit(&self) -> bool {
        matches!(
            self.kind,
            EvalErrorKind::StackOverflow { .. }
                | EvalErrorKind::BudgetExceeded { .. }
                | EvalErrorKind::Interrupted
        )
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::from_kind(kind)
    }
}

// Operator Errors

/// Operator not supported by a single operand type.
#[cold]
pub fn invalid_binary_op_for(type_name: &str, op: BinaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidBinaryOp {
        type_name: type_name.to_string(),
        op,
    })
}

/// Operand types that no binary operator combines.
#[cold]
pub fn binary_type_mismatch(left: &str, right: &str, op: BinaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BinaryTypeMismatch {
        left: left.to_string(),
        right: right.to_string(),
        op,
    })
}

#[cold]
pub fn invalid_unary_op(type_name: &str, op: UnaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidUnaryOp {
        type_name: type_name.to_string(),
        op,
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}

/// A `for` loop bound (`start`, `end` or `step`) that is not a number.
#[cold]
pub fn loop_bound_not_number(bound: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::LoopBoundNotNumber {
        bound: bound.to_string(),
        type_name: type_name.to_string(),
    })
}

// Variable and Function Errors

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

/// Wrong number of arguments in function call.
#[cold]
pub fn wrong_function_args(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

// Resource Limit Errors

/// Maximum recursion depth exceeded error.
#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth: limit })
}

#[cold]
pub fn budget_exceeded(budget: u64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BudgetExceeded { budget })
}

#[cold]
pub fn interrupted() -> EvalError {
    EvalError::from_kind(EvalErrorKind::Interrupted)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(division_by_zero().message, "division by zero");
        assert_eq!(
            undefined_variable("count").message,
            "var 'count' is not defined"
        );
        assert_eq!(
            invalid_binary_op_for("string", BinaryOp::Sub).message,
            "operator `-` cannot be applied to string"
        );
        assert_eq!(
            binary_type_mismatch("string", "int", BinaryOp::Add).message,
            "unsupported operand types for `+`: string and int"
        );
        assert_eq!(
            invalid_unary_op("array", UnaryOp::Not).message,
            "operator `not` cannot be applied to array"
        );
        assert_eq!(
            recursion_limit_exceeded(1000).message,
            "maximum recursion depth exceeded (limit: 1000)"
        );
        assert_eq!(
            budget_exceeded(50).message,
            "evaluation budget of 50 steps exceeded"
        );
    }

    #[test]
    fn test_arity_message_mentions_wrong_number_of_arguments() {
        let err = wrong_function_args("add", 2, 3);
        assert!(err.message.contains("wrong number of arguments"));
        assert_eq!(
            err.kind,
            EvalErrorKind::ArityMismatch {
                name: "add".to_string(),
                expected: 2,
                got: 3,
            }
        );
    }

    #[test]
    fn test_error_display_is_message() {
        let err = not_callable("int");
        assert_eq!(err.to_string(), "int is not callable");
    }

    #[test]
    fn test_builders() {
        let frames = vec![BacktraceFrame {
            name: "<program>".to_string(),
            span: Some(Span::new(0, 3)),
        }];
        let err = division_by_zero()
            .with_span(Span::new(0, 3))
            .with_backtrace(EvalBacktrace::new(frames));
        assert_eq!(err.span, Some(Span::new(0, 3)));
        assert_eq!(err.backtrace.as_ref().map(EvalBacktrace::len), Some(1));
    }

    #[test]
    fn test_resource_limit_classification() {
        assert!(interrupted().is_resource_limit());
        assert!(budget_exceeded(1).is_resource_limit());
        assert!(!division_by_zero().is_resource_limit());
    }

    #[test]
    fn test_backtrace_display() {
        let bt = EvalBacktrace::new(vec![
            BacktraceFrame {
                name: "add".to_string(),
                span: Some(Span::new(4, 9)),
            },
            BacktraceFrame {
                name: "<program>".to_string(),
                span: None,
            },
        ]);
        assert_eq!(bt.to_string(), "backtrace:\n  0: add at 4..9\n  1: <program>\n");
    }
}
