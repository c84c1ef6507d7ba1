pub mod analysis;
pub mod config;
pub mod error;
pub mod fetch;
pub mod infra;
pub mod output;
pub mod record;
pub mod services;

pub use analysis::{FieldSpec, LexiconScorer, Pipeline, PolarityScorer, Report};
pub use error::{PipelineError, ScoreError};
pub use record::Record;
