//! Query position tracking
//!
//! Servers report error positions as 1-based character offsets into the
//! query text. This module turns such an offset into line/column coordinates
//! and a one-line window of the surrounding text for cursor display.

use serde::Serialize;

use super::width::DisplayWidth;

/// Characters of context kept before the target character.
pub const WINDOW_BEFORE: usize = 32;

/// Characters of context kept after the target character.
pub const WINDOW_AFTER: usize = 32;

/// A located position in query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct QueryPosition {
    /// Line number (1-based)
    pub line: usize,
    /// Character column within the line (1-based, not display columns)
    pub column: usize,
    /// Character index from the start of the text (0-based)
    pub index: usize,
}

/// A single-line excerpt around a position, ready to draw a cursor under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorWindow {
    pub position: QueryPosition,
    /// Text up to and including the target character, line breaks escaped.
    pub before: String,
    /// Text following the target character, line breaks escaped.
    pub after: String,
    /// Display columns between the start of `before` and the target.
    pub caret_column: usize,
    /// The window starts after the beginning of the text.
    pub clipped_start: bool,
    /// The window stops before the end of the text.
    pub clipped_end: bool,
}

/// Resolve a 1-based offset to line, column and index.
///
/// Offsets past the end are clamped to the last character. Returns `None`
/// for offsets below 1 and for empty text.
pub fn locate_position(text: &str, offset: i64) -> Option<QueryPosition> {
    let chars: Vec<char> = text.chars().collect();
    position_in(&chars, offset)
}

/// Resolve a 1-based offset and cut the display window around it.
pub fn locate(text: &str, offset: i64, width: &dyn DisplayWidth) -> Option<CursorWindow> {
    let chars: Vec<char> = text.chars().collect();
    let position = position_in(&chars, offset)?;
    let index = position.index;

    let start = index.saturating_sub(WINDOW_BEFORE);
    let end = (index + 1 + WINDOW_AFTER).min(chars.len());

    let mut before = String::with_capacity(index + 1 - start);
    let mut caret_column = 0;
    for &ch in &chars[start..index] {
        caret_column += push_escaped(&mut before, ch, width);
    }
    push_escaped(&mut before, chars[index], width);

    let mut after = String::with_capacity(end - index);
    for &ch in &chars[index + 1..end] {
        push_escaped(&mut after, ch, width);
    }

    Some(CursorWindow {
        position,
        before,
        after,
        caret_column,
        clipped_start: start > 0,
        clipped_end: end < chars.len(),
    })
}

fn position_in(chars: &[char], offset: i64) -> Option<QueryPosition> {
    if offset <= 0 || chars.is_empty() {
        return None;
    }
    let offset = usize::try_from(offset).unwrap_or(usize::MAX).min(chars.len());
    let index = offset - 1;

    let mut line = 1;
    let mut line_start = 0;
    for (idx, &ch) in chars[..index].iter().enumerate() {
        if ch == '\n' {
            line += 1;
            line_start = idx + 1;
        }
    }

    Some(QueryPosition {
        line,
        column: index - line_start + 1,
        index,
    })
}

/// Append `ch` with line breaks and tabs spelled out, returning the columns
/// it takes.
fn push_escaped(out: &mut String, ch: char, width: &dyn DisplayWidth) -> usize {
    match ch {
        '\t' => {
            out.push_str("\\t");
            2
        }
        '\n' => {
            out.push_str("\\n");
            2
        }
        '\r' => {
            out.push_str("\\r");
            2
        }
        _ => {
            out.push(ch);
            width.width(ch)
        }
    }
}
