//! Diagnostic severity classes

use serde::Serialize;

/// Coarse class of the free-text severity field.
///
/// Rendering always writes the server's own severity text; the class is only
/// used to count and summarize reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    /// `ERROR`, `FATAL` or `PANIC`: the statement or session failed
    Error,
    /// `WARNING`
    Warning,
    /// `NOTICE`, `INFO`, `LOG` or `DEBUG`
    Notice,
    /// Missing or unrecognized severity text
    Unknown,
}

impl Severity {
    pub fn classify(text: Option<&str>) -> Self {
        let Some(text) = text else {
            return Severity::Unknown;
        };
        match text.trim().to_ascii_uppercase().as_str() {
            "ERROR" | "FATAL" | "PANIC" => Severity::Error,
            "WARNING" => Severity::Warning,
            "NOTICE" | "INFO" | "LOG" => Severity::Notice,
            s if s.starts_with("DEBUG") => Severity::Notice,
            _ => Severity::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_server_severities() {
        assert_eq!(Severity::classify(Some("ERROR")), Severity::Error);
        assert_eq!(Severity::classify(Some("FATAL")), Severity::Error);
        assert_eq!(Severity::classify(Some("warning")), Severity::Warning);
        assert_eq!(Severity::classify(Some("DEBUG1")), Severity::Notice);
        assert_eq!(Severity::classify(Some("FEHLER")), Severity::Unknown);
        assert_eq!(Severity::classify(None), Severity::Unknown);
    }
}
