//! Immutable diagnostic field record and its builder

use log::debug;

use super::field_code::{FIELD_COUNT, FieldCode};

/// The diagnostic fields a server attached to one error.
///
/// Every field is optional. The record is read-only once built; use
/// [`DiagnosticFields::builder`] to assemble one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DiagnosticFields {
    values: [Option<String>; FIELD_COUNT],
}

impl DiagnosticFields {
    pub fn builder() -> DiagnosticFieldsBuilder {
        DiagnosticFieldsBuilder::default()
    }

    /// Value of a field, `None` when the server did not send it.
    pub fn get(&self, code: FieldCode) -> Option<&str> {
        self.values[code.slot()].as_deref()
    }

    pub fn contains(&self, code: FieldCode) -> bool {
        self.values[code.slot()].is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Present fields in code order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldCode, &str)> + '_ {
        FieldCode::ALL
            .iter()
            .filter_map(move |&code| self.get(code).map(|value| (code, value)))
    }

    pub fn severity(&self) -> Option<&str> {
        self.get(FieldCode::Severity)
    }

    pub fn sqlstate(&self) -> Option<&str> {
        self.get(FieldCode::SqlState)
    }

    pub fn message(&self) -> Option<&str> {
        self.get(FieldCode::MessagePrimary)
    }

    /// Statement position as a number. Unparsable text counts as absent.
    pub fn statement_position(&self) -> Option<i64> {
        self.parsed_position(FieldCode::StatementPosition)
    }

    /// Internal-query position as a number. Unparsable text counts as absent.
    pub fn internal_position(&self) -> Option<i64> {
        self.parsed_position(FieldCode::InternalPosition)
    }

    fn parsed_position(&self, code: FieldCode) -> Option<i64> {
        let raw = self.get(code)?;
        match raw.trim().parse::<i64>() {
            Ok(value) => Some(value),
            Err(_) => {
                debug!("ignoring unparsable {:?} field {:?}", code, raw);
                None
            }
        }
    }
}

/// Builder for [`DiagnosticFields`].
///
/// Only present, non-empty values are recorded; an empty string is the same
/// as not calling the setter at all.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticFieldsBuilder {
    values: [Option<String>; FIELD_COUNT],
}

impl DiagnosticFieldsBuilder {
    pub fn with_field(mut self, code: FieldCode, value: impl Into<String>) -> Self {
        let value = value.into();
        self.values[code.slot()] = if value.is_empty() { None } else { Some(value) };
        self
    }

    /// Set a field from an optional value; `None` leaves it unset.
    pub fn with_optional(self, code: FieldCode, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.with_field(code, value),
            None => self,
        }
    }

    pub fn with_severity(self, severity: impl Into<String>) -> Self {
        self.with_field(FieldCode::Severity, severity)
    }

    /// Set the SQLSTATE code (e.g. `"42601"`).
    pub fn with_code(self, code: impl Into<String>) -> Self {
        self.with_field(FieldCode::SqlState, code)
    }

    pub fn with_message(self, message: impl Into<String>) -> Self {
        self.with_field(FieldCode::MessagePrimary, message)
    }

    pub fn with_detail(self, detail: impl Into<String>) -> Self {
        self.with_field(FieldCode::MessageDetail, detail)
    }

    pub fn with_hint(self, hint: impl Into<String>) -> Self {
        self.with_field(FieldCode::MessageHint, hint)
    }

    /// Set the 1-based character position in the submitted query.
    pub fn with_position(self, position: impl Into<String>) -> Self {
        self.with_field(FieldCode::StatementPosition, position)
    }

    pub fn with_internal_position(self, position: impl Into<String>) -> Self {
        self.with_field(FieldCode::InternalPosition, position)
    }

    pub fn with_internal_query(self, query: impl Into<String>) -> Self {
        self.with_field(FieldCode::InternalQuery, query)
    }

    /// Set the context trace (the `where` field).
    pub fn with_context(self, context: impl Into<String>) -> Self {
        self.with_field(FieldCode::Context, context)
    }

    pub fn with_schema(self, schema: impl Into<String>) -> Self {
        self.with_field(FieldCode::SchemaName, schema)
    }

    pub fn with_table(self, table: impl Into<String>) -> Self {
        self.with_field(FieldCode::TableName, table)
    }

    pub fn with_column(self, column: impl Into<String>) -> Self {
        self.with_field(FieldCode::ColumnName, column)
    }

    pub fn with_data_type(self, data_type: impl Into<String>) -> Self {
        self.with_field(FieldCode::DatatypeName, data_type)
    }

    pub fn with_constraint(self, constraint: impl Into<String>) -> Self {
        self.with_field(FieldCode::ConstraintName, constraint)
    }

    pub fn with_file(self, file: impl Into<String>) -> Self {
        self.with_field(FieldCode::SourceFile, file)
    }

    pub fn with_line(self, line: impl Into<String>) -> Self {
        self.with_field(FieldCode::SourceLine, line)
    }

    pub fn with_routine(self, routine: impl Into<String>) -> Self {
        self.with_field(FieldCode::SourceFunction, routine)
    }

    pub fn build(self) -> DiagnosticFields {
        DiagnosticFields {
            values: self.values,
        }
    }
}
