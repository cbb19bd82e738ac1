//! Type definitions for the diagnostics system
//!
//! This module contains the field identifiers, the immutable field record and
//! its builder, the verbosity and context levels, and severity classes.

mod field_code;
mod fields;
mod level;
mod severity;

pub use field_code::{FIELD_COUNT, FieldCode};
pub use fields::{DiagnosticFields, DiagnosticFieldsBuilder};
pub use level::{ContextVisibility, ParseLevelError, Verbosity};
pub use severity::Severity;
