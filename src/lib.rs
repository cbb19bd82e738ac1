pub mod diagnostics;
pub mod error;
pub mod options;
pub mod query;

pub use diagnostics::{
    ContextVisibility, DiagnosticFields, DiagnosticFieldsBuilder, FieldCode, MessageRenderer,
    QueryPosition, Verbosity, render_message,
};
pub use error::{DatabaseError, compose_message};
pub use options::RenderOptions;
pub use query::SqlQuery;
