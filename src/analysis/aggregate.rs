use crate::analysis::classify::Thresholds;
use crate::analysis::types::{LabelCounts, LabelPercentages, ScoredItem, SkipReason, Summary};
use crate::analysis::utility::{mean, rounded_pct, stddev};
use crate::error::PipelineError;

/// Decimal places kept in label percentages.
pub const PERCENT_DECIMALS: u32 = 1;

/// Per-reason skip tally fed to the aggregator alongside the scored items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipCounts {
    pub empty_text: usize,
    pub scoring_error: usize,
}

impl SkipCounts {
    pub fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::EmptyText => self.empty_text += 1,
            SkipReason::ScoringError => self.scoring_error += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.empty_text + self.scoring_error
    }
}

/// Aggregates scored items into a [`Summary`].
///
/// Computes the mean and standard deviation of compound scores, label counts
/// and percentages (rounded half away from zero to [`PERCENT_DECIMALS`]), and
/// the overall label of the mean under `thresholds`.
///
/// # Errors
///
/// [`PipelineError::NoScoreableItems`] when `items` is empty; a 0.0 mean
/// would read as a neutral result.
pub fn aggregate(
    items: &[ScoredItem],
    skipped: SkipCounts,
    thresholds: &Thresholds,
) -> Result<Summary, PipelineError> {
    let scores: Vec<f64> = items.iter().map(|s| s.compound).collect();
    let mean_compound = mean(&scores).ok_or(PipelineError::NoScoreableItems {
        empty_text: skipped.empty_text,
        scoring_error: skipped.scoring_error,
    })?;

    let mut label_counts = LabelCounts::default();
    for item in items {
        label_counts.increment(item.label);
    }

    let total_items = items.len();
    let percent = |count: usize| rounded_pct(count, total_items, PERCENT_DECIMALS);
    let label_percentages = LabelPercentages {
        positive: percent(label_counts.positive),
        neutral: percent(label_counts.neutral),
        negative: percent(label_counts.negative),
    };

    Ok(Summary {
        mean_compound,
        stddev_compound: stddev(&scores, mean_compound),
        overall: thresholds.classify(mean_compound),
        label_counts,
        label_percentages,
        total_items,
        skipped_items: skipped.total(),
        skipped_empty: skipped.empty_text,
        skipped_error: skipped.scoring_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::{Item, Label};

    fn scored(index: usize, compound: f64) -> ScoredItem {
        ScoredItem {
            item: Item {
                index,
                text: format!("item {index}"),
            },
            compound,
            label: Thresholds::default().classify(compound),
        }
    }

    #[test]
    fn test_empty_items_signal_no_scoreable_items() {
        let skipped = SkipCounts {
            empty_text: 2,
            scoring_error: 1,
        };
        let err = aggregate(&[], skipped, &Thresholds::default()).unwrap_err();
        assert_eq!(
            err,
            PipelineError::NoScoreableItems {
                empty_text: 2,
                scoring_error: 1
            }
        );
        assert_eq!(
            err.to_string(),
            "no scoreable items (3 skipped: 2 empty, 1 scoring errors)"
        );
    }

    #[test]
    fn test_exact_half_percentages_round_away_from_zero() {
        let mut items: Vec<ScoredItem> = (0..23).map(|i| scored(i, 0.5)).collect();
        items.extend((23..80).map(|i| scored(i, 0.0)));
        let summary = aggregate(&items, SkipCounts::default(), &Thresholds::default()).unwrap();

        assert_eq!(summary.label_counts.positive, 23);
        assert_eq!(summary.label_percentages.positive, 28.8);
        assert_eq!(summary.label_percentages.neutral, 71.3);
        assert_eq!(summary.label_percentages.negative, 0.0);
    }

    #[test]
    fn test_counts_sum_to_total() {
        let items = vec![scored(0, 0.6), scored(1, 0.0), scored(2, -0.4), scored(3, 0.3)];
        let summary = aggregate(&items, SkipCounts::default(), &Thresholds::default()).unwrap();

        assert_eq!(summary.total_items, 4);
        assert_eq!(summary.skipped_items, 0);
        assert_eq!(summary.label_counts.total(), summary.total_items);
        assert_eq!(
            summary.label_counts,
            LabelCounts {
                positive: 2,
                neutral: 1,
                negative: 1
            }
        );
        assert_eq!(summary.label_percentages.positive, 50.0);
        assert_eq!(summary.label_percentages.neutral, 25.0);
        assert_eq!(summary.label_percentages.negative, 25.0);
    }

    #[test]
    fn test_mean_and_overall_label() {
        let items = vec![scored(0, 0.5), scored(1, -0.1)];
        let summary = aggregate(&items, SkipCounts::default(), &Thresholds::default()).unwrap();
        assert!((summary.mean_compound - 0.2).abs() < 1e-12);
        assert_eq!(summary.overall, Label::Positive);
        assert!((summary.stddev_compound - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_percentages_round_to_one_decimal() {
        let items = vec![scored(0, 0.9), scored(1, 0.0), scored(2, -0.9)];
        let summary = aggregate(&items, SkipCounts::default(), &Thresholds::default()).unwrap();
        assert_eq!(
            summary.label_percentages,
            LabelPercentages {
                positive: 33.3,
                neutral: 33.3,
                negative: 33.3
            }
        );
        let sum = summary.label_percentages.positive
            + summary.label_percentages.neutral
            + summary.label_percentages.negative;
        assert!((100.0 - sum).abs() <= 0.1 + 1e-9);
    }

    #[test]
    fn test_skips_reported_by_reason() {
        let mut skipped = SkipCounts::default();
        skipped.record(SkipReason::EmptyText);
        skipped.record(SkipReason::ScoringError);
        skipped.record(SkipReason::EmptyText);

        let summary = aggregate(&[scored(1, 0.2)], skipped, &Thresholds::default()).unwrap();
        assert_eq!(summary.skipped_items, 3);
        assert_eq!(summary.skipped_empty, 2);
        assert_eq!(summary.skipped_error, 1);
    }

    #[test]
    fn test_thresholds_drive_item_labels_and_overall() {
        let strict = Thresholds::new(0.5, -0.5).unwrap();
        let items = vec![ScoredItem {
            item: Item {
                index: 0,
                text: "x".into(),
            },
            compound: 0.3,
            label: strict.classify(0.3),
        }];
        let summary = aggregate(&items, SkipCounts::default(), &strict).unwrap();
        assert_eq!(summary.overall, Label::Neutral);
        assert_eq!(summary.label_counts.neutral, 1);
    }
}
