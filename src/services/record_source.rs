//! Trait for upstream collaborators that produce records to analyze.

use anyhow::Result;

use crate::analysis::FieldSpec;
use crate::record::Record;

/// A source of already-materialized records (an API, a CSV file, ...).
#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    /// Short human-readable name used in logs and report headers.
    fn name(&self) -> String;

    /// Fetches and parses all records, in source order.
    async fn fetch_records(&self) -> Result<Vec<Record>>;

    /// Fields to analyze when the caller does not choose any.
    fn default_field_spec(&self) -> Option<FieldSpec> {
        None
    }
}
