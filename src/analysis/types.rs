//! Data types produced by the sentiment pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Categorical sentiment derived from a compound score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Positive,
    Neutral,
    Negative,
}

impl Label {
    pub const ALL: [Label; 3] = [Label::Positive, Label::Neutral, Label::Negative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Positive => "positive",
            Label::Neutral => "neutral",
            Label::Negative => "negative",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an item did not reach the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Extraction produced empty or whitespace-only text.
    EmptyText,
    /// The scorer failed on the extracted text.
    ScoringError,
}

/// Text extracted from one record, with its position in the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub index: usize,
    pub text: String,
}

/// An item that was scored and classified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredItem {
    pub item: Item,
    pub compound: f64,
    pub label: Label,
}

/// One row of the ordered per-item table.
///
/// `index` is the position of the originating record in the input, so rows
/// can be correlated with the source dataset. Skipped records keep their row
/// with `compound`/`label` unset and `skip_reason` filled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub index: usize,
    pub text: String,
    pub compound: Option<f64>,
    pub label: Option<Label>,
    pub skip_reason: Option<SkipReason>,
    pub skip_detail: Option<String>,
}

impl TableRow {
    pub fn scored(scored: &ScoredItem) -> Self {
        Self {
            index: scored.item.index,
            text: scored.item.text.clone(),
            compound: Some(scored.compound),
            label: Some(scored.label),
            skip_reason: None,
            skip_detail: None,
        }
    }

    pub fn skipped(index: usize, text: String, reason: SkipReason, detail: Option<String>) -> Self {
        Self {
            index,
            text,
            compound: None,
            label: None,
            skip_reason: Some(reason),
            skip_detail: detail,
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.skip_reason.is_some()
    }
}

/// Count per label. All three labels are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LabelCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl LabelCounts {
    pub fn get(&self, label: Label) -> usize {
        match label {
            Label::Positive => self.positive,
            Label::Neutral => self.neutral,
            Label::Negative => self.negative,
        }
    }

    pub fn increment(&mut self, label: Label) {
        match label {
            Label::Positive => self.positive += 1,
            Label::Neutral => self.neutral += 1,
            Label::Negative => self.negative += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

/// Percentage per label, rounded to one decimal place.
///
/// The three values may sum to 100 ± the rounding unit (e.g. 33.3 × 3).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LabelPercentages {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

impl LabelPercentages {
    pub fn get(&self, label: Label) -> f64 {
        match label {
            Label::Positive => self.positive,
            Label::Neutral => self.neutral,
            Label::Negative => self.negative,
        }
    }
}

/// Aggregate over the scored items of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub mean_compound: f64,
    pub stddev_compound: f64,
    /// Label of `mean_compound` under the run's thresholds.
    pub overall: Label,
    pub label_counts: LabelCounts,
    pub label_percentages: LabelPercentages,
    pub total_items: usize,
    pub skipped_items: usize,
    pub skipped_empty: usize,
    pub skipped_error: usize,
}

/// Result of a successful run: summary plus the per-item table in input order.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub summary: Summary,
    pub table: Vec<TableRow>,
}

impl Report {
    pub fn scored_rows(&self) -> impl Iterator<Item = &TableRow> {
        self.table.iter().filter(|r| !r.is_skipped())
    }

    pub fn skipped_rows(&self) -> impl Iterator<Item = &TableRow> {
        self.table.iter().filter(|r| r.is_skipped())
    }
}
