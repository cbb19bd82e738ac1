//! The query an error was raised for

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query text and bound parameter values, either of which may be unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SqlQuery {
    pub text: Option<String>,
    pub values: Option<Vec<Value>>,
}

impl SqlQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            values: None,
        }
    }

    pub fn with_values(mut self, values: Vec<Value>) -> Self {
        self.values = Some(values);
        self
    }

    /// Normalize whatever a caller passed as "the query": a plain string,
    /// an object with `text`/`values`, or nothing usable.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(text) => Self::new(text.clone()),
            Value::Object(map) => Self {
                text: map.get("text").and_then(scalar_text),
                values: match map.get("values") {
                    Some(Value::Array(values)) => Some(values.clone()),
                    Some(Value::Null) | None => None,
                    Some(other) => Some(vec![other.clone()]),
                },
            },
            _ => Self::default(),
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// One-line echo of the query for appending to an error message, e.g.
    /// `{ text: "SELECT $1", values: [42] }`. `None` when there is no text.
    pub fn describe(&self, include_values: bool) -> Option<String> {
        let text = self.text.as_deref()?;
        let mut out = format!("{{ text: {}", quote(text));
        if include_values && let Some(values) = &self.values {
            let values = serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string());
            out.push_str(&format!(", values: {}", values));
        }
        out.push_str(" }");
        Some(out)
    }
}

impl From<&str> for SqlQuery {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for SqlQuery {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn quote(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}
