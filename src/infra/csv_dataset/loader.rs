//! CSV datasets loaded from a local path or a URL.

use std::io::Read;

use anyhow::Result;
use async_trait::async_trait;
use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::analysis::FieldSpec;
use crate::error::PipelineError;
use crate::fetch::{HttpClient, load_source};
use crate::record::Record;
use crate::services::RecordSource;

/// Rows shown in a dataset preview.
pub const PREVIEW_ROWS: usize = 5;

/// A parsed CSV file: header names plus one record per data row.
#[derive(Debug, Clone, Default)]
pub struct CsvDataset {
    headers: Vec<String>,
    records: Vec<Record>,
}

impl CsvDataset {
    /// Parses CSV with a header row.
    ///
    /// Rows shorter than the header are accepted; their missing cells become
    /// absent fields. Cells beyond the last header are ignored.
    ///
    /// # Errors
    ///
    /// [`PipelineError::MalformedInput`] if there is no header row or the
    /// data cannot be parsed (including invalid UTF-8).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PipelineError> {
        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| PipelineError::MalformedInput(format!("CSV header: {e}")))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if headers.iter().all(String::is_empty) {
            return Err(PipelineError::MalformedInput(
                "CSV has no header row".to_string(),
            ));
        }

        let mut records = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let row_data = result
                .map_err(|e| PipelineError::MalformedInput(format!("CSV row {}: {e}", row + 1)))?;
            let record: Record = headers
                .iter()
                .zip(row_data.iter())
                .map(|(h, v)| (h.as_str(), v))
                .collect();
            records.push(record);
        }

        debug!(columns = headers.len(), rows = records.len(), "CSV parsed");
        Ok(Self { headers, records })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PipelineError> {
        Self::from_reader(bytes)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First `n` records, for display before analysis.
    pub fn preview(&self, n: usize) -> &[Record] {
        &self.records[..n.min(self.records.len())]
    }

    /// Checks that every field in `spec` is a column of this dataset.
    ///
    /// # Errors
    ///
    /// [`PipelineError::UnknownField`] naming the first missing column.
    pub fn require_fields(&self, spec: &FieldSpec) -> Result<(), PipelineError> {
        match spec.names().iter().find(|name| !self.headers.contains(*name)) {
            Some(missing) => Err(PipelineError::UnknownField(missing.clone())),
            None => Ok(()),
        }
    }
}

/// A CSV dataset at a path or `http(s)://` URL.
pub struct CsvSource<C> {
    client: C,
    location: String,
}

impl<C: HttpClient> CsvSource<C> {
    pub fn new(client: C, location: impl Into<String>) -> Self {
        Self {
            client,
            location: location.into(),
        }
    }

    /// Loads and parses the whole dataset, keeping the header row.
    #[tracing::instrument(skip(self), fields(location = %self.location))]
    pub async fn load(&self) -> Result<CsvDataset> {
        let bytes = load_source(&self.client, &self.location).await?;
        let dataset = CsvDataset::from_bytes(&bytes)?;
        info!(
            columns = dataset.headers().len(),
            rows = dataset.len(),
            "CSV dataset loaded"
        );
        Ok(dataset)
    }
}

#[async_trait]
impl<C: HttpClient> RecordSource for CsvSource<C> {
    fn name(&self) -> String {
        format!("CSV {}", self.location)
    }

    async fn fetch_records(&self) -> Result<Vec<Record>> {
        Ok(self.load().await?.into_records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &[u8] = include_bytes!("../../../tests/fixtures/feedback.csv");

    #[test]
    fn test_parse_fixture() {
        let dataset = CsvDataset::from_bytes(FIXTURE).unwrap();
        assert_eq!(dataset.headers(), ["id", "service", "comment", "rating"]);
        assert_eq!(dataset.len(), 6);
        assert_eq!(dataset.records()[0].get("comment"), Some("This service is amazing!!"));
        assert_eq!(dataset.records()[1].get("comment"), Some(""));
        assert_eq!(
            dataset.records()[5].get("comment"),
            Some("Bins not collected, again. Really frustrating")
        );
    }

    #[test]
    fn test_preview() {
        let dataset = CsvDataset::from_bytes(FIXTURE).unwrap();
        assert_eq!(dataset.preview(PREVIEW_ROWS).len(), 5);
        assert_eq!(dataset.preview(100).len(), 6);
    }

    #[test]
    fn test_short_rows_have_absent_fields() {
        let dataset = CsvDataset::from_bytes(b"a,b,c\n1,2\n").unwrap();
        let row = &dataset.records()[0];
        assert_eq!(row.get("b"), Some("2"));
        assert_eq!(row.get("c"), None);
    }

    #[test]
    fn test_require_fields() {
        let dataset = CsvDataset::from_bytes(FIXTURE).unwrap();
        assert!(dataset.require_fields(&FieldSpec::single("comment")).is_ok());

        let spec = FieldSpec::fields(["service", "feedback"]).unwrap();
        assert_eq!(
            dataset.require_fields(&spec),
            Err(PipelineError::UnknownField("feedback".to_string()))
        );
    }

    #[test]
    fn test_empty_input_is_malformed() {
        let err = CsvDataset::from_bytes(b"").unwrap_err();
        assert!(matches!(err, PipelineError::MalformedInput(_)));
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let err = CsvDataset::from_bytes(b"text\n\xff\xfe\n").unwrap_err();
        assert!(matches!(err, PipelineError::MalformedInput(_)));
    }

    #[test]
    fn test_header_only_has_no_records() {
        let dataset = CsvDataset::from_bytes(b"comment\n").unwrap();
        assert!(dataset.is_empty());
    }
}
