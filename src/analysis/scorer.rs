//! Scorer adapter: the seam between the pipeline and a polarity engine.

use crate::error::ScoreError;

/// A pure text → compound score capability.
///
/// Implementations must be deterministic for the lifetime of a run and
/// return values in [-1.0, 1.0].
pub trait PolarityScorer: Send + Sync {
    fn compound(&self, text: &str) -> Result<f64, ScoreError>;
}

impl<F> PolarityScorer for F
where
    F: Fn(&str) -> Result<f64, ScoreError> + Send + Sync,
{
    fn compound(&self, text: &str) -> Result<f64, ScoreError> {
        self(text)
    }
}

/// Calls `scorer` and rejects results that are NaN or outside [-1.0, 1.0].
pub fn score_checked<S: PolarityScorer + ?Sized>(scorer: &S, text: &str) -> Result<f64, ScoreError> {
    let score = scorer.compound(text)?;
    if !score.is_finite() || !(-1.0..=1.0).contains(&score) {
        return Err(ScoreError::OutOfRange(score));
    }
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_scorer() {
        let scorer = |text: &str| -> Result<f64, ScoreError> {
            Ok(if text.contains("good") { 0.5 } else { 0.0 })
        };
        assert_eq!(score_checked(&scorer, "good day"), Ok(0.5));
        assert_eq!(score_checked(&scorer, "a day"), Ok(0.0));
    }

    #[test]
    fn test_out_of_range_is_error() {
        let scorer = |_: &str| -> Result<f64, ScoreError> { Ok(1.5) };
        assert_eq!(score_checked(&scorer, "x"), Err(ScoreError::OutOfRange(1.5)));
    }

    #[test]
    fn test_nan_is_error() {
        let scorer = |_: &str| -> Result<f64, ScoreError> { Ok(f64::NAN) };
        assert!(matches!(
            score_checked(&scorer, "x"),
            Err(ScoreError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_scorer_error_passes_through() {
        let scorer = |_: &str| -> Result<f64, ScoreError> { Err(ScoreError::Rejected("bad".into())) };
        assert_eq!(
            score_checked(&scorer, "x"),
            Err(ScoreError::Rejected("bad".into()))
        );
    }
}
