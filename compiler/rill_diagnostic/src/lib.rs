//! Diagnostic helpers for rendering runtime errors against source text.
//!
//! - [`span_utils`]: byte offset to 1-based line/column lookup
//! - [`snippet`]: the offending source lines with `^` markers under a span
//!
//! Spans are byte offsets; everything here tolerates spans that run past the
//! end of the source or split a multi-byte character.

pub mod snippet;
pub mod span_utils;

pub use snippet::underline;
pub use span_utils::LineOffsetTable;
