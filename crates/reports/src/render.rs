//! Rendering of ledger reports as CSV, JSON or Markdown.
//!
//! JSON is the report itself as serialized by serde, wrapped with its title
//! and totals. CSV flattens it to one record per training or officer.
//! Markdown is laid out by each report, since a per-training section and a
//! per-status officer table read better than one generic grid.

use serde::Serialize;
use std::borrow::Cow;
use std::fmt::{self, Write};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Json,
    Markdown,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
            ReportFormat::Markdown => "md",
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("JSON rendering failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Text rendering failed")]
    Text(#[from] fmt::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// A ledger report that can be rendered in every [`ReportFormat`].
pub trait Report: Serialize {
    fn title(&self) -> &'static str;

    /// CSV header row.
    fn columns(&self) -> &'static [&'static str];

    /// One CSV record per entry, in report order.
    fn records(&self) -> Vec<Vec<String>>;

    /// Headline counts, shown above the Markdown body and in the JSON envelope.
    fn totals(&self) -> Vec<(&'static str, usize)>;

    /// Markdown body below the title and totals.
    fn write_markdown(&self, out: &mut String) -> fmt::Result;
}

#[derive(Serialize)]
struct Envelope<'a, R> {
    title: &'static str,
    totals: serde_json::Map<String, serde_json::Value>,
    report: &'a R,
}

pub fn render<R: Report>(report: &R, format: ReportFormat) -> RenderResult<String> {
    match format {
        ReportFormat::Csv => Ok(render_csv(report)),
        ReportFormat::Json => {
            let envelope = Envelope {
                title: report.title(),
                totals: report
                    .totals()
                    .into_iter()
                    .map(|(name, n)| (name.to_string(), n.into()))
                    .collect(),
                report,
            };
            Ok(serde_json::to_string_pretty(&envelope)?)
        }
        ReportFormat::Markdown => render_markdown(report),
    }
}

fn render_csv<R: Report>(report: &R) -> String {
    let mut out = csv_record(report.columns().iter().copied());
    for record in report.records() {
        out.push_str(&csv_record(record.iter().map(String::as_str)));
    }
    out
}

fn csv_record<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    let mut line = fields.map(csv_field).collect::<Vec<_>>().join(",");
    line.push('\n');
    line
}

fn csv_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn render_markdown<R: Report>(report: &R) -> RenderResult<String> {
    let mut out = String::new();
    writeln!(out, "# {}", report.title())?;
    writeln!(out)?;
    for (name, n) in report.totals() {
        writeln!(out, "- **{}**: {}", name, n)?;
    }
    writeln!(out)?;
    report.write_markdown(&mut out)?;
    Ok(out)
}

/// Keep free text on one line and out of table syntax.
pub(crate) fn md_text(text: &str) -> String {
    text.replace(['\r', '\n'], " ").replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("Naga Farmers Coop"), "Naga Farmers Coop");
        assert_eq!(csv_field("Juan, Maria"), "\"Juan, Maria\"");
        assert_eq!(csv_field("the \"new\" law"), "\"the \"\"new\"\" law\"");
        assert!(matches!(csv_field("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_md_text() {
        assert_eq!(md_text("Audit | Review\nPart 2"), "Audit \\| Review Part 2");
    }

    #[test]
    fn test_extensions() {
        assert_eq!(ReportFormat::Csv.extension(), "csv");
        assert_eq!(ReportFormat::Json.extension(), "json");
        assert_eq!(ReportFormat::Markdown.extension(), "md");
    }
}
