//! Diagnostics module.
//!
//! Models the diagnostic fields a database server attaches to an error and
//! renders them the way the server's own client reports them, including a
//! cursor under the offending character of the query.

pub mod aggregator;
pub mod json;
pub mod position;
pub mod rendering;
pub mod types;
pub mod width;

pub use aggregator::{
    DEFAULT_MAX_REPORTS, DiagnosticCounts, DiagnosticReport, DiagnosticsAggregator,
    DiagnosticsReport,
};
pub use json::FieldsError;
pub use position::{CursorWindow, QueryPosition, locate, locate_position};
pub use rendering::{MessageRenderer, render_cursor, render_message};
pub use types::{
    ContextVisibility, DiagnosticFields, DiagnosticFieldsBuilder, FieldCode, ParseLevelError,
    Severity, Verbosity,
};
pub use width::{DisplayWidth, NarrowColumns, UnicodeColumns};
