use chrono::Utc;
use tracing::{debug, info, warn};

use crate::analysis::aggregate::{SkipCounts, aggregate};
use crate::analysis::classify::Thresholds;
use crate::analysis::extract::{FieldSpec, extract_text};
use crate::analysis::scorer::{PolarityScorer, score_checked};
use crate::analysis::types::{Item, Report, ScoredItem, SkipReason, TableRow};
use crate::error::PipelineError;
use crate::record::Record;

/// Extract → score → classify → aggregate, in a single pass over the records.
///
/// Holds no state between runs; the same pipeline can be reused for any
/// number of datasets.
pub struct Pipeline<S> {
    scorer: S,
    thresholds: Thresholds,
}

impl<S: PolarityScorer> Pipeline<S> {
    pub fn new(scorer: S) -> Self {
        Self {
            scorer,
            thresholds: Thresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Runs the pipeline over `records`.
    ///
    /// Records with empty text or a scorer failure are kept in the table as
    /// skipped rows and counted in the summary; they never abort the run.
    /// The table preserves input order.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::EmptyInput`] if `records` is empty.
    /// - [`PipelineError::NoScoreableItems`] if every record was skipped.
    #[tracing::instrument(skip_all, fields(records = records.len(), fields = ?spec.names()))]
    pub fn run(&self, records: &[Record], spec: &FieldSpec) -> Result<Report, PipelineError> {
        if records.is_empty() {
            return Err(PipelineError::EmptyInput);
        }

        let mut scored = Vec::with_capacity(records.len());
        let mut table = Vec::with_capacity(records.len());
        let mut skipped = SkipCounts::default();

        for (index, record) in records.iter().enumerate() {
            let Some(text) = extract_text(record, spec) else {
                debug!(index, "Record has no text to score");
                skipped.record(SkipReason::EmptyText);
                table.push(TableRow::skipped(
                    index,
                    String::new(),
                    SkipReason::EmptyText,
                    None,
                ));
                continue;
            };

            match score_checked(&self.scorer, &text) {
                Ok(compound) => {
                    let item = ScoredItem {
                        item: Item { index, text },
                        compound,
                        label: self.thresholds.classify(compound),
                    };
                    table.push(TableRow::scored(&item));
                    scored.push(item);
                }
                Err(e) => {
                    warn!(index, error = %e, "Scoring failed, skipping record");
                    skipped.record(SkipReason::ScoringError);
                    table.push(TableRow::skipped(
                        index,
                        text,
                        SkipReason::ScoringError,
                        Some(e.to_string()),
                    ));
                }
            }
        }

        let summary = aggregate(&scored, skipped, &self.thresholds)?;

        info!(
            total_items = summary.total_items,
            skipped_items = summary.skipped_items,
            mean_compound = summary.mean_compound,
            overall = %summary.overall,
            "Sentiment run complete"
        );

        Ok(Report {
            generated_at: Utc::now(),
            summary,
            table,
        })
    }
}

/// One-off run with default thresholds.
pub fn run<S: PolarityScorer>(
    records: &[Record],
    spec: &FieldSpec,
    scorer: S,
) -> Result<Report, PipelineError> {
    Pipeline::new(scorer).run(records, spec)
}
