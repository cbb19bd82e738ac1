//! Cursor block rendering
//!
//! Draws the located window of query text and a caret under the offending
//! character, in the same layout the server's interactive client uses:
//!
//! ```text
//! LINE 1: SELECT * FORM t
//!                  ^
//! ```

use crate::diagnostics::position::CursorWindow;

const ELLIPSIS: &str = "...";

/// Append the two-line cursor block for `window` to `out`.
///
/// Both lines end with a newline. The caret is indented by the width of the
/// `LINE n: ` prefix, the leading ellipsis when the window was clipped, and
/// the window's caret column.
pub fn render_cursor(out: &mut String, window: &CursorWindow) {
    let prefix = format!("LINE {}: ", window.position.line);
    let mut indent = prefix.len();
    out.push_str(&prefix);

    if window.clipped_start {
        out.push_str(ELLIPSIS);
        indent += ELLIPSIS.len();
    }
    out.push_str(&window.before);
    out.push_str(&window.after);
    if window.clipped_end {
        out.push_str(ELLIPSIS);
    }
    out.push('\n');

    out.push_str(&" ".repeat(indent + window.caret_column));
    out.push_str("^\n");
}
