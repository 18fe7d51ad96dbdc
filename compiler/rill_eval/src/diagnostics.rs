//! Traceback rendering for runtime errors.
//!
//! Turns an [`EvalError`] plus the program source into the text a driver
//! prints: the call chain oldest first, the error message, and the failing
//! source line with `^` markers.

use std::fmt::Write;

use rill_diagnostic::{underline, LineOffsetTable};

use crate::EvalError;

/// Render `err` as a traceback.
///
/// ```text
/// Traceback (most recent call last):
///   File main.rl, line 3, in <program>
///   File main.rl, line 1, in divide
/// Runtime Error: division by zero
///
/// fun divide(a, b) -> a / b
///                     ^^^^^
/// ```
///
/// Frames without a position are listed without a line number. The snippet
/// is omitted when the error has no span.
pub fn render_traceback(err: &EvalError, source: &str, file_name: &str) -> String {
    let table = LineOffsetTable::build(source);
    let mut out = String::from("Traceback (most recent call last):\n");

    if let Some(backtrace) = &err.backtrace {
        for frame in backtrace.frames().iter().rev() {
            if let Some(span) = frame.span {
                let (line, _) = table.offset_to_line_col(source, span.start);
                let _ = writeln!(out, "  File {file_name}, line {line}, in {}", frame.name);
            } else {
                let _ = writeln!(out, "  File {file_name}, in {}", frame.name);
            }
        }
    }

    let _ = write!(out, "Runtime Error: {}", err.message);

    if let Some(span) = err.span {
        let _ = write!(out, "\n\n{}", underline(source, span));
    }
    out
}
