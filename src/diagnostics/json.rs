//! Building diagnostic fields from JSON
//!
//! Drivers hand errors around as loosely typed objects: `position` may be a
//! number or a string, missing fields may be `null`. This adapter accepts
//! either driver-style property names (`internalPosition`, `dataType`, ...)
//! or the single-letter protocol codes (`P`, `d`, ...).

use log::debug;
use serde_json::Value;
use thiserror::Error;

use super::types::{DiagnosticFields, FieldCode};

#[derive(Debug, Error)]
pub enum FieldsError {
    #[error("diagnostic fields must be a JSON object, found {0}")]
    NotAnObject(&'static str),
    #[error("invalid diagnostic JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl DiagnosticFields {
    /// Collect fields from a JSON object.
    ///
    /// Strings are kept as-is, numbers and booleans are stringified, `null`
    /// counts as absent. Unknown keys are ignored.
    pub fn from_json(value: &Value) -> Result<Self, FieldsError> {
        let Value::Object(map) = value else {
            return Err(FieldsError::NotAnObject(json_kind(value)));
        };

        let mut builder = DiagnosticFields::builder();
        for code in FieldCode::ALL {
            let protocol_key = char::from(code.as_byte()).to_string();
            let raw = map
                .get(code.driver_key())
                .or_else(|| map.get(protocol_key.as_str()));
            builder = builder.with_optional(code, raw.and_then(|raw| field_text(code, raw)));
        }
        Ok(builder.build())
    }

    pub fn from_json_str(text: &str) -> Result<Self, FieldsError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json(&value)
    }
}

fn field_text(code: FieldCode, value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => {
            debug!("ignoring non-scalar {:?} field", code);
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_driver_style_object() {
        let fields = DiagnosticFields::from_json(&json!({
            "severity": "ERROR",
            "code": "23505",
            "message": "duplicate key value violates unique constraint \"users_pkey\"",
            "detail": "Key (id)=(1) already exists.",
            "position": 17,
            "constraint": "users_pkey",
            "hint": null,
            "length": 210,
        }))
        .expect("object");

        assert_eq!(fields.sqlstate(), Some("23505"));
        assert_eq!(fields.get(FieldCode::StatementPosition), Some("17"));
        assert_eq!(fields.statement_position(), Some(17));
        assert_eq!(fields.get(FieldCode::ConstraintName), Some("users_pkey"));
        assert_eq!(fields.get(FieldCode::MessageHint), None);
    }

    #[test]
    fn reads_protocol_codes() {
        let fields = DiagnosticFields::from_json(&json!({
            "S": "WARNING",
            "M": "there is no transaction in progress",
            "p": "4",
            "q": "SELECT 1",
        }))
        .expect("object");

        assert_eq!(fields.severity(), Some("WARNING"));
        assert_eq!(fields.internal_position(), Some(4));
        assert_eq!(fields.get(FieldCode::InternalQuery), Some("SELECT 1"));
    }

    #[test]
    fn driver_key_wins_over_protocol_code() {
        let fields =
            DiagnosticFields::from_json(&json!({ "message": "driver", "M": "protocol" }))
                .expect("object");
        assert_eq!(fields.message(), Some("driver"));
    }

    #[test]
    fn non_scalar_values_are_ignored() {
        let fields = DiagnosticFields::from_json(&json!({ "where": ["a", "b"], "line": true }))
            .expect("object");
        assert_eq!(fields.get(FieldCode::Context), None);
        assert_eq!(fields.get(FieldCode::SourceLine), Some("true"));
    }

    #[test]
    fn rejects_non_objects() {
        let err = DiagnosticFields::from_json(&json!([1, 2])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "diagnostic fields must be a JSON object, found an array"
        );
        assert!(matches!(
            DiagnosticFields::from_json_str("{"),
            Err(FieldsError::Json(_))
        ));
    }
}
