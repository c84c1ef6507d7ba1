use crate::analysis::types::Label;
use serde::Serialize;

/// Compound scores at or above this are positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;

/// Compound scores at or below this are negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Classification boundaries for compound scores.
///
/// | Range                     | Label    |
/// |---------------------------|----------|
/// | `>= positive`             | positive |
/// | `<= negative`             | negative |
/// | otherwise                 | neutral  |
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub positive: f64,
    pub negative: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            positive: POSITIVE_THRESHOLD,
            negative: NEGATIVE_THRESHOLD,
        }
    }
}

impl Thresholds {
    /// Builds custom thresholds. `None` if `negative > positive` or either
    /// bound is outside [-1.0, 1.0].
    pub fn new(positive: f64, negative: f64) -> Option<Self> {
        let in_range = |v: f64| (-1.0..=1.0).contains(&v);
        if in_range(positive) && in_range(negative) && negative <= positive {
            Some(Self { positive, negative })
        } else {
            None
        }
    }

    pub fn classify(&self, score: f64) -> Label {
        match score {
            s if s >= self.positive => Label::Positive,
            s if s <= self.negative => Label::Negative,
            _ => Label::Neutral,
        }
    }
}

/// Classifies a compound score with the default thresholds.
pub fn classify(score: f64) -> Label {
    Thresholds::default().classify(score)
}
