use std::collections::HashSet;

use rayon::prelude::*;
use serde::Serialize;

use super::{DiagnosticFields, Severity};
use crate::error::compose_message;
use crate::options::RenderOptions;
use crate::query::SqlQuery;

/// Default report limit to avoid overwhelming output.
pub const DEFAULT_MAX_REPORTS: usize = 50;

const GENERIC_MESSAGE: &str = "database error";

/// One server error together with the query that raised it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagnosticReport {
    pub fields: DiagnosticFields,
    pub query: SqlQuery,
}

impl DiagnosticReport {
    pub fn new(fields: DiagnosticFields, query: impl Into<SqlQuery>) -> Self {
        Self {
            fields,
            query: query.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::classify(self.fields.severity())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DiagnosticCounts {
    pub errors: usize,
    pub warnings: usize,
    pub notices: usize,
    pub unknown: usize,
}

impl DiagnosticCounts {
    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.notices + self.unknown
    }

    pub fn summary_line(&self) -> Option<String> {
        format_summary(self)
    }
}

#[derive(Debug, Clone)]
pub struct DiagnosticsReport {
    pub counts: DiagnosticCounts,
    pub rendered: String,
}

#[derive(Debug, Hash, PartialEq, Eq)]
struct ReportKey<'a> {
    fields: &'a DiagnosticFields,
    query_text: Option<&'a str>,
}

/// Renders a batch of reports into one block of text.
///
/// Duplicate reports (same fields, same query text) are shown once. Output
/// keeps the input order; rendering itself runs in parallel.
pub struct DiagnosticsAggregator<'a> {
    reports: &'a [DiagnosticReport],
    options: RenderOptions,
    max_reports: Option<usize>,
}

impl<'a> DiagnosticsAggregator<'a> {
    pub fn new(reports: &'a [DiagnosticReport]) -> Self {
        Self {
            reports,
            options: RenderOptions::default(),
            max_reports: None,
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_max_reports(mut self, max_reports: Option<usize>) -> Self {
        self.max_reports = max_reports;
        self
    }

    pub fn report(&self) -> DiagnosticsReport {
        if self.reports.is_empty() {
            return DiagnosticsReport {
                counts: DiagnosticCounts::default(),
                rendered: String::new(),
            };
        }

        let mut seen: HashSet<ReportKey<'_>> = HashSet::new();
        let unique: Vec<&DiagnosticReport> = self
            .reports
            .iter()
            .filter(|report| {
                seen.insert(ReportKey {
                    fields: &report.fields,
                    query_text: report.query.text(),
                })
            })
            .collect();

        let counts = count_severity(&unique);
        let max_reports = self.max_reports.unwrap_or(usize::MAX);
        let shown = unique.len().min(max_reports);

        let options = self.options;
        let messages: Vec<String> = unique[..shown]
            .par_iter()
            .map(|report| {
                let fallback = report.fields.message().unwrap_or(GENERIC_MESSAGE);
                compose_message(Some(&report.fields), fallback, &report.query, &options)
            })
            .collect();

        let mut rendered = String::new();
        if let Some(summary) = format_summary(&counts) {
            rendered.push_str(&summary);
            rendered.push_str("\n\n");
        }
        rendered.push_str(&messages.join("\n\n"));
        rendered.push('\n');

        let truncated = unique.len() - shown;
        if truncated > 0 {
            rendered.push_str(&format!(
                "... and {} more report{} not shown.\n",
                truncated,
                plural(truncated)
            ));
        }

        DiagnosticsReport { counts, rendered }
    }

    pub fn render(&self) -> String {
        self.report().rendered
    }
}

fn count_severity(reports: &[&DiagnosticReport]) -> DiagnosticCounts {
    let mut counts = DiagnosticCounts::default();
    for report in reports {
        match report.severity() {
            Severity::Error => counts.errors += 1,
            Severity::Warning => counts.warnings += 1,
            Severity::Notice => counts.notices += 1,
            Severity::Unknown => counts.unknown += 1,
        }
    }
    counts
}

fn format_summary(counts: &DiagnosticCounts) -> Option<String> {
    if counts.total() <= 1 {
        return None;
    }

    let mut parts = Vec::new();
    if counts.errors > 0 {
        parts.push(format!("{} error{}", counts.errors, plural(counts.errors)));
    }
    if counts.warnings > 0 {
        parts.push(format!("{} warning{}", counts.warnings, plural(counts.warnings)));
    }
    if counts.notices > 0 {
        parts.push(format!("{} notice{}", counts.notices, plural(counts.notices)));
    }
    if counts.unknown > 0 {
        parts.push(format!("{} other{}", counts.unknown, plural(counts.unknown)));
    }

    Some(format!("Found {}.", join_parts(&parts)))
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

fn join_parts(parts: &[String]) -> String {
    match parts {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} and {}", first, second),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}
