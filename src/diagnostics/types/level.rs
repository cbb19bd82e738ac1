//! Verbosity and context display levels

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How much of a diagnostic ends up in the rendered message.
///
/// Numeric forms follow the client library's `PGVerbosity` ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "LevelRepr", rename_all = "lowercase")]
pub enum Verbosity {
    /// Severity, primary message and an inline position only.
    Terse,
    /// Adds the cursor block, detail, hint, internal query and context.
    Default,
    /// Adds the SQLSTATE, object names and source location.
    #[default]
    Verbose,
    /// Severity and SQLSTATE only.
    Sqlstate,
}

/// When the `CONTEXT` section is shown.
///
/// `Errors` behaves like `Always`: a bare field set does not say whether it
/// came from an error or a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "LevelRepr", rename_all = "lowercase")]
pub enum ContextVisibility {
    #[default]
    Never,
    Errors,
    Always,
}

impl ContextVisibility {
    pub fn shows_context(self) -> bool {
        matches!(self, ContextVisibility::Errors | ContextVisibility::Always)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseLevelError {
    #[error("unknown verbosity level `{0}` (expected terse, default, verbose or sqlstate)")]
    Verbosity(String),
    #[error("unknown context level `{0}` (expected never, errors or always)")]
    Context(String),
}

impl Verbosity {
    pub fn as_str(self) -> &'static str {
        match self {
            Verbosity::Terse => "terse",
            Verbosity::Default => "default",
            Verbosity::Verbose => "verbose",
            Verbosity::Sqlstate => "sqlstate",
        }
    }
}

impl ContextVisibility {
    pub fn as_str(self) -> &'static str {
        match self {
            ContextVisibility::Never => "never",
            ContextVisibility::Errors => "errors",
            ContextVisibility::Always => "always",
        }
    }
}

impl TryFrom<u8> for Verbosity {
    type Error = ParseLevelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Verbosity::Terse),
            1 => Ok(Verbosity::Default),
            2 => Ok(Verbosity::Verbose),
            3 => Ok(Verbosity::Sqlstate),
            other => Err(ParseLevelError::Verbosity(other.to_string())),
        }
    }
}

impl TryFrom<u8> for ContextVisibility {
    type Error = ParseLevelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ContextVisibility::Never),
            1 => Ok(ContextVisibility::Errors),
            2 => Ok(ContextVisibility::Always),
            other => Err(ParseLevelError::Context(other.to_string())),
        }
    }
}

impl FromStr for Verbosity {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "terse" => Ok(Verbosity::Terse),
            "default" => Ok(Verbosity::Default),
            "verbose" => Ok(Verbosity::Verbose),
            "sqlstate" => Ok(Verbosity::Sqlstate),
            _ => match name.parse::<u8>() {
                Ok(n) => Verbosity::try_from(n),
                Err(_) => Err(ParseLevelError::Verbosity(s.to_string())),
            },
        }
    }
}

impl FromStr for ContextVisibility {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "never" => Ok(ContextVisibility::Never),
            "errors" => Ok(ContextVisibility::Errors),
            "always" => Ok(ContextVisibility::Always),
            _ => match name.parse::<u8>() {
                Ok(n) => ContextVisibility::try_from(n),
                Err(_) => Err(ParseLevelError::Context(s.to_string())),
            },
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ContextVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire form of a level in configuration: a number or a name.
#[derive(Deserialize)]
#[serde(untagged)]
enum LevelRepr {
    Number(u8),
    Name(String),
}

impl TryFrom<LevelRepr> for Verbosity {
    type Error = ParseLevelError;

    fn try_from(repr: LevelRepr) -> Result<Self, Self::Error> {
        match repr {
            LevelRepr::Number(n) => Verbosity::try_from(n),
            LevelRepr::Name(name) => name.parse(),
        }
    }
}

impl TryFrom<LevelRepr> for ContextVisibility {
    type Error = ParseLevelError;

    fn try_from(repr: LevelRepr) -> Result<Self, Self::Error> {
        match repr {
            LevelRepr::Number(n) => ContextVisibility::try_from(n),
            LevelRepr::Name(name) => name.parse(),
        }
    }
}
