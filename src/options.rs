//! Render configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::diagnostics::{ContextVisibility, Verbosity};

/// Options controlling how a wrapped database error is rendered.
///
/// Deserializes from the camelCase keys drivers use
/// (`verbosityLevel`, `showContextLevel`, `hideQuery`, `hideQueryValues`);
/// every key is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    #[serde(rename = "verbosityLevel")]
    pub verbosity: Verbosity,
    #[serde(rename = "showContextLevel")]
    pub show_context: ContextVisibility,
    /// Leave the query out of the composed message.
    pub hide_query: bool,
    /// Leave the bound values out of the composed message.
    pub hide_query_values: bool,
}

#[derive(Debug, Error)]
#[error("invalid render options: {0}")]
pub struct OptionsError(#[from] serde_json::Error);

impl RenderOptions {
    pub fn from_json_str(text: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_context(mut self, show_context: ContextVisibility) -> Self {
        self.show_context = show_context;
        self
    }

    pub fn hide_query(mut self, hide: bool) -> Self {
        self.hide_query = hide;
        self
    }

    pub fn hide_query_values(mut self, hide: bool) -> Self {
        self.hide_query_values = hide;
        self
    }
}
