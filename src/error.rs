//! Database errors with rendered messages
//!
//! [`DatabaseError`] pairs a server error's diagnostic fields with the query
//! that raised it, and carries the fully composed message as its `Display`.

use serde_json::Value;
use thiserror::Error;

use crate::diagnostics::{
    DiagnosticFields, FieldCode, FieldsError, QueryPosition, locate_position, render_message,
};
use crate::options::RenderOptions;
use crate::query::SqlQuery;

const GENERIC_MESSAGE: &str = "database error";

/// Compose the final message for an error.
///
/// The rendered fields are trimmed; if nothing is left, `fallback` is used
/// instead. Unless hidden by `options`, the query (and its values) is echoed
/// on a trailing `QUERY:` line.
pub fn compose_message(
    fields: Option<&DiagnosticFields>,
    fallback: &str,
    query: &SqlQuery,
    options: &RenderOptions,
) -> String {
    let rendered = render_message(fields, query.text(), options.verbosity, options.show_context);
    let mut message = match rendered.trim_end() {
        "" => fallback.to_string(),
        text => text.to_string(),
    };

    if !options.hide_query
        && let Some(echo) = query.describe(!options.hide_query_values)
    {
        message.push_str("\nQUERY:  ");
        message.push_str(&echo);
    }

    message
}

/// An error reported by the database server.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct DatabaseError {
    fields: DiagnosticFields,
    query: SqlQuery,
    message: String,
}

impl DatabaseError {
    pub fn new(fields: DiagnosticFields, query: impl Into<SqlQuery>, options: &RenderOptions) -> Self {
        let query = query.into();
        let fallback = fields.message().unwrap_or(GENERIC_MESSAGE).to_string();
        let message = compose_message(Some(&fields), &fallback, &query, options);
        Self {
            fields,
            query,
            message,
        }
    }

    /// Build from a driver-style JSON error object and whatever was passed
    /// as the query.
    pub fn from_json(error: &Value, query: &Value, options: &RenderOptions) -> Result<Self, FieldsError> {
        let fields = DiagnosticFields::from_json(error)?;
        Ok(Self::new(fields, SqlQuery::from_json(query), options))
    }

    pub fn fields(&self) -> &DiagnosticFields {
        &self.fields
    }

    pub fn query(&self) -> &SqlQuery {
        &self.query
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Option<&str> {
        self.fields.severity()
    }

    pub fn sqlstate(&self) -> Option<&str> {
        self.fields.sqlstate()
    }

    /// Where the error points, as line/column/index.
    ///
    /// Uses the statement position against the query text, or else the
    /// internal position against the internal query.
    pub fn position(&self) -> Option<QueryPosition> {
        if let Some(offset) = self.fields.statement_position() {
            return locate_position(self.query.text()?, offset);
        }
        let offset = self.fields.internal_position()?;
        locate_position(self.fields.get(FieldCode::InternalQuery)?, offset)
    }
}
