//! Error types for the sentiment pipeline.
//!
//! [`PipelineError`] is fatal for a whole run. [`ScoreError`] is isolated to
//! the item that produced it and never aborts a run.

use thiserror::Error;

/// Run-level failures. No partial summary is produced when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("no records to analyze")]
    EmptyInput,

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("column '{0}' not found")]
    UnknownField(String),

    /// Every record was skipped, so there is nothing to summarize.
    #[error(
        "no scoreable items ({} skipped: {empty_text} empty, {scoring_error} scoring errors)",
        .empty_text + .scoring_error
    )]
    NoScoreableItems {
        empty_text: usize,
        scoring_error: usize,
    },
}

/// Failure reported by a scorer for a single text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoreError {
    #[error("scorer rejected text: {0}")]
    Rejected(String),

    #[error("text too long to score ({len} chars, max {max})")]
    TooLong { len: usize, max: usize },

    #[error("score {0} outside [-1.0, 1.0]")]
    OutOfRange(f64),
}
