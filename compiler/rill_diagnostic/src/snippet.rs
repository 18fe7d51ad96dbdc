//! Source snippets with `^` markers under the reported span.

use rill_ir::Span;

use crate::span_utils::LineOffsetTable;

/// Render every source line touched by `span`, each followed by a marker
/// line of `^` under the covered columns.
///
/// A zero-width span still gets a single marker. Tabs are shown as single
/// spaces so markers stay aligned.
///
/// ```
/// use rill_diagnostic::underline;
/// use rill_ir::Span;
///
/// assert_eq!(underline("x = 10 / 0", Span::new(4, 10)), "x = 10 / 0\n    ^^^^^^");
/// ```
pub fn underline(source: &str, span: Span) -> String {
    let table = LineOffsetTable::build(source);
    let last_byte = span.end.max(span.start.saturating_add(1)) - 1;
    let (first_line, first_col) = table.offset_to_line_col(source, span.start);
    let (last_line, last_col) = table.offset_to_line_col(source, last_byte);

    let mut out = Vec::new();
    for line in first_line..=last_line {
        let Some(text) = table.line_text(source, line) else {
            break;
        };
        let from = if line == first_line {
            first_col.saturating_sub(1) as usize
        } else {
            0
        };
        let to = if line == last_line {
            last_col as usize
        } else {
            text.chars().count()
        };
        out.push(text.replace('\t', " "));
        out.push(format!(
            "{}{}",
            " ".repeat(from),
            "^".repeat(to.saturating_sub(from).max(1))
        ));
    }
    out.join("\n")
}
