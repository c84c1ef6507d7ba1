//! Report rendering and persistence.
//!
//! Supports a plain-text report, JSON serialization, and CSV append of the
//! per-item table.

use anyhow::Result;
use std::fmt::Write as _;
use tracing::debug;

use crate::analysis::types::{Label, Report, SkipReason, TableRow};
use crate::record::Record;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Characters of item text shown per table row.
pub const MAX_TEXT_CHARS: usize = 200;

/// Display options for [`render_text`].
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Maximum table rows; `None` shows all.
    pub max_rows: Option<usize>,
    /// Record field shown instead of the scored text (e.g. a petition title).
    pub title_field: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_rows: Some(100),
            title_field: None,
        }
    }
}

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &Report) {
    debug!("{:#?}", report);
}

/// Serializes a report (summary and table) as pretty-printed JSON.
pub fn to_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// One-line verdict for the overall label.
pub fn overall_statement(label: Label) -> &'static str {
    match label {
        Label::Positive => "Overall sentiment is positive.",
        Label::Neutral => "Overall sentiment is neutral.",
        Label::Negative => "Overall sentiment is negative.",
    }
}

/// Truncates `text` to `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}

/// Renders the summary block and the per-item table as plain text.
///
/// `records` are the inputs the report was produced from; they are only
/// consulted when `options.title_field` is set.
pub fn render_text(report: &Report, records: &[Record], options: &RenderOptions) -> String {
    let s = &report.summary;
    let mut out = String::new();

    let _ = writeln!(out, "{}", overall_statement(s.overall));
    let _ = writeln!(out, "Average sentiment score: {:.3}", s.mean_compound);
    let _ = writeln!(
        out,
        "Items scored: {} ({} skipped: {} empty, {} scoring errors)",
        s.total_items, s.skipped_items, s.skipped_empty, s.skipped_error
    );
    let counts: Vec<String> = Label::ALL
        .iter()
        .map(|&label| {
            format!(
                "{}: {} ({:.1}%)",
                label,
                s.label_counts.get(label),
                s.label_percentages.get(label)
            )
        })
        .collect();
    let _ = writeln!(out, "{}", counts.join("  "));
    if s.skipped_items > 0 {
        let _ = writeln!(out, "{} items could not be scored.", s.skipped_items);
    }

    let shown = options.max_rows.unwrap_or(report.table.len());
    let _ = writeln!(out);
    let _ = writeln!(out, "{:>5}  {:<8}  {:>6}  Text", "#", "Label", "Score");
    for row in report.table.iter().take(shown) {
        let _ = writeln!(out, "{}", render_row(row, records, options));
    }
    if report.table.len() > shown {
        let _ = writeln!(out, "... {} more rows", report.table.len() - shown);
    }

    out
}

fn render_row(row: &TableRow, records: &[Record], options: &RenderOptions) -> String {
    let label = row.label.map(|l| l.as_str()).unwrap_or("skipped");
    let score = row
        .compound
        .map(|c| format!("{c:.3}"))
        .unwrap_or_else(|| "-".to_string());

    let title = options
        .title_field
        .as_deref()
        .and_then(|field| records.get(row.index)?.get(field));
    let text = match (title, row.skip_reason) {
        (Some(title), _) => truncate(title, MAX_TEXT_CHARS),
        (None, Some(SkipReason::EmptyText)) => "(empty text)".to_string(),
        (None, Some(SkipReason::ScoringError)) => format!(
            "(scoring error: {}) {}",
            row.skip_detail.as_deref().unwrap_or("unknown"),
            truncate(&row.text, MAX_TEXT_CHARS)
        ),
        (None, None) => truncate(&row.text, MAX_TEXT_CHARS),
    };

    format!("{:>5}  {:<8}  {:>6}  {}", row.index, label, score, text)
}

/// Appends the per-item table to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_table(path: &str, rows: &[TableRow]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = rows.len(), "Appending CSV rows");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}
