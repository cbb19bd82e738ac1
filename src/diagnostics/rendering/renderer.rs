//! Message rendering
//!
//! Builds the full text of a server error from its diagnostic fields, section
//! by section, in the order and layout of the server's interactive client:
//!
//! ```text
//! ERROR:  42601:  syntax error at or near "FORM"
//! LINE 1: SELECT * FORM t
//!                  ^
//! LOCATION:  scanner_yyerror, scan.l:1236
//! ```
//!
//! Rendering is total: any missing field just drops its section.

use log::trace;

use crate::diagnostics::position::{CursorWindow, locate};
use crate::diagnostics::types::{ContextVisibility, DiagnosticFields, FieldCode, Verbosity};
use crate::diagnostics::width::{DisplayWidth, UnicodeColumns};

use super::cursor::render_cursor;

/// Sections written after the cursor block when verbosity is not terse.
const DETAIL_SECTIONS: [FieldCode; 3] = [
    FieldCode::MessageDetail,
    FieldCode::MessageHint,
    FieldCode::InternalQuery,
];

/// Object-name sections written only in verbose mode.
const OBJECT_SECTIONS: [FieldCode; 5] = [
    FieldCode::SchemaName,
    FieldCode::TableName,
    FieldCode::ColumnName,
    FieldCode::DatatypeName,
    FieldCode::ConstraintName,
];

/// Renders diagnostic fields into message text.
///
/// # Example
/// ```
/// use pgdiag::{DiagnosticFields, MessageRenderer, Verbosity};
///
/// let fields = DiagnosticFields::builder()
///     .with_severity("ERROR")
///     .with_code("42P01")
///     .with_message("relation \"t\" does not exist")
///     .build();
///
/// let out = MessageRenderer::new()
///     .with_verbosity(Verbosity::Default)
///     .render(Some(&fields), None);
/// assert_eq!(out, "ERROR:  relation \"t\" does not exist\n");
/// ```
#[derive(Debug, Clone)]
pub struct MessageRenderer<W: DisplayWidth = UnicodeColumns> {
    verbosity: Verbosity,
    show_context: ContextVisibility,
    width: W,
}

impl MessageRenderer {
    pub fn new() -> Self {
        Self {
            verbosity: Verbosity::default(),
            show_context: ContextVisibility::default(),
            width: UnicodeColumns,
        }
    }
}

impl Default for MessageRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: DisplayWidth> MessageRenderer<W> {
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_context(mut self, show_context: ContextVisibility) -> Self {
        self.show_context = show_context;
        self
    }

    /// Swap the display-width strategy used to place the caret.
    pub fn with_width<V: DisplayWidth>(self, width: V) -> MessageRenderer<V> {
        MessageRenderer {
            verbosity: self.verbosity,
            show_context: self.show_context,
            width,
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn show_context(&self) -> ContextVisibility {
        self.show_context
    }

    /// Render `fields` against the query that produced them.
    ///
    /// Returns an empty string when there are no fields at all; the caller
    /// is expected to fall back to a generic message. The result is not
    /// trimmed and normally ends with a newline.
    pub fn render(&self, fields: Option<&DiagnosticFields>, query_text: Option<&str>) -> String {
        let Some(fields) = fields else {
            return String::new();
        };

        let mut out = String::new();
        let mut verbosity = self.verbosity;

        if let Some(severity) = fields.severity() {
            out.push_str(&format!("{}:  ", severity));
        }

        if verbosity == Verbosity::Sqlstate {
            if let Some(sqlstate) = fields.sqlstate() {
                out.push_str(sqlstate);
                out.push('\n');
                return out;
            }
            // Without a SQLSTATE there is nothing to show; fall back to terse.
            verbosity = Verbosity::Terse;
        }

        if verbosity == Verbosity::Verbose
            && let Some(sqlstate) = fields.sqlstate()
        {
            out.push_str(&format!("{}:  ", sqlstate));
        }

        if let Some(message) = fields.message() {
            out.push_str(message);
        }

        let cursor = self.resolve_cursor(&mut out, fields, query_text, verbosity);
        out.push('\n');

        if verbosity != Verbosity::Terse {
            if let Some(window) = &cursor {
                render_cursor(&mut out, window);
            }
            for code in DETAIL_SECTIONS {
                render_section(&mut out, fields, code);
            }
            if self.show_context.shows_context() {
                render_section(&mut out, fields, FieldCode::Context);
            }
        }

        if verbosity == Verbosity::Verbose {
            for code in OBJECT_SECTIONS {
                render_section(&mut out, fields, code);
            }
            render_location(&mut out, fields);
        }

        out
    }

    /// Pick the position to display, if any.
    ///
    /// A statement position wins over an internal one. When the position can
    /// not be shown as a cursor (terse output, or no text to point into) it
    /// is appended to the primary message line instead.
    fn resolve_cursor(
        &self,
        out: &mut String,
        fields: &DiagnosticFields,
        query_text: Option<&str>,
        verbosity: Verbosity,
    ) -> Option<CursorWindow> {
        let cursor_allowed = verbosity != Verbosity::Terse;

        let (code, position, text) = if let Some(position) = fields.statement_position() {
            (FieldCode::StatementPosition, position, query_text)
        } else if let Some(position) = fields.internal_position() {
            (
                FieldCode::InternalPosition,
                position,
                fields.get(FieldCode::InternalQuery),
            )
        } else {
            return None;
        };

        match text {
            Some(text) if cursor_allowed => {
                trace!("rendering cursor at character {}", position);
                locate(text, position, &self.width)
            }
            _ => {
                trace!("rendering inline position {}", position);
                // The field text goes out as the server sent it.
                if let Some(raw) = fields.get(code) {
                    out.push_str(&format!(" at character {}", raw));
                }
                None
            }
        }
    }
}

/// Render `fields` with the default width strategy.
pub fn render_message(
    fields: Option<&DiagnosticFields>,
    query_text: Option<&str>,
    verbosity: Verbosity,
    show_context: ContextVisibility,
) -> String {
    MessageRenderer::new()
        .with_verbosity(verbosity)
        .with_context(show_context)
        .render(fields, query_text)
}

fn render_section(out: &mut String, fields: &DiagnosticFields, code: FieldCode) {
    if let (Some(label), Some(value)) = (code.label(), fields.get(code)) {
        out.push_str(&format!("{}:  {}\n", label, value));
    }
}

/// `LOCATION:  routine, file:line`. A file without a line (or the reverse)
/// says little, so the pair is only written when both are known.
fn render_location(out: &mut String, fields: &DiagnosticFields) {
    let routine = fields.get(FieldCode::SourceFunction);
    let file = fields.get(FieldCode::SourceFile);
    let line = fields.get(FieldCode::SourceLine);

    if routine.is_none() && file.is_none() && line.is_none() {
        return;
    }

    let file_line = file.zip(line);
    out.push_str("LOCATION:  ");
    if let Some(routine) = routine {
        out.push_str(routine);
        if file_line.is_some() {
            out.push_str(", ");
        }
    }
    if let Some((file, line)) = file_line {
        out.push_str(&format!("{}:{}", file, line));
    }
    out.push('\n');
}
