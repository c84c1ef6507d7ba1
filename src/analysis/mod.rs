//! Sentiment extraction, scoring, classification and aggregation.
//!
//! Records flow one way: text is extracted per record, scored by a
//! [`PolarityScorer`], labelled by [`Thresholds`], and summarised into a
//! [`Report`] whose table keeps the input order.

pub mod aggregate;
pub mod classify;
pub mod extract;
pub mod lexicon;
pub mod pipeline;
pub mod scorer;
pub mod types;
pub mod utility;

pub use classify::{NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD, Thresholds, classify};
pub use extract::{FieldSpec, extract_text};
pub use lexicon::LexiconScorer;
pub use pipeline::{Pipeline, run};
pub use scorer::PolarityScorer;
pub use types::{Label, LabelCounts, LabelPercentages, Report, SkipReason, Summary, TableRow};
