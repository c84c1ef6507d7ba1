use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::analysis::FieldSpec;
use crate::error::PipelineError;
use crate::fetch::{HttpClient, fetch_bytes};
use crate::record::{Record, json_text};
use crate::services::RecordSource;

pub const DEFAULT_PETITIONS_URL: &str = "https://petition.parliament.uk/petitions.json";
pub const DEFAULT_LIMIT: usize = 50;

/// Petition title.
pub const ACTION_FIELD: &str = "action";
/// Petition summary text.
pub const BACKGROUND_FIELD: &str = "background";

/// Attributes copied from each petition into its record.
const ATTRIBUTES: &[&str] = &[
    ACTION_FIELD,
    BACKGROUND_FIELD,
    "additional_details",
    "state",
    "signature_count",
    "created_at",
];

/// Client for the UK Parliament petitions JSON API.
pub struct PetitionsClient<C> {
    client: C,
    url: String,
    limit: usize,
}

impl<C: HttpClient> PetitionsClient<C> {
    pub fn new(client: C, url: impl Into<String>, limit: usize) -> Self {
        Self {
            client,
            url: url.into(),
            limit,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl<C: HttpClient> RecordSource for PetitionsClient<C> {
    fn name(&self) -> String {
        "UK Parliament petitions".to_string()
    }

    #[tracing::instrument(skip(self), fields(url = %self.url, limit = self.limit))]
    async fn fetch_records(&self) -> Result<Vec<Record>> {
        let body = fetch_bytes(&self.client, &self.url).await?;
        let records = parse_petitions(&body, self.limit)?;
        info!(count = records.len(), "Petitions fetched");
        Ok(records)
    }

    fn default_field_spec(&self) -> Option<FieldSpec> {
        FieldSpec::fields([ACTION_FIELD, BACKGROUND_FIELD]).ok()
    }
}

/// Parses a petitions API response into at most `limit` records.
///
/// A response without `data` yields no records. Each record carries the
/// petition `id` plus the attributes listed in [`ATTRIBUTES`]; `null`
/// attributes are left out.
///
/// # Errors
///
/// [`PipelineError::MalformedInput`] if the body is not JSON, the top level
/// is not an object, `data` is not an array, or an entry is not an object.
pub fn parse_petitions(body: &[u8], limit: usize) -> Result<Vec<Record>, PipelineError> {
    let json: Value = serde_json::from_slice(body)
        .map_err(|e| PipelineError::MalformedInput(format!("petitions response: {e}")))?;

    let root = json.as_object().ok_or_else(|| {
        PipelineError::MalformedInput("petitions response is not a JSON object".to_string())
    })?;

    let Some(data) = root.get("data") else {
        return Ok(Vec::new());
    };
    let entries = data.as_array().ok_or_else(|| {
        PipelineError::MalformedInput("petitions 'data' is not an array".to_string())
    })?;

    entries
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, entry)| {
            let entry = entry.as_object().ok_or_else(|| {
                PipelineError::MalformedInput(format!("petition {i} is not a JSON object"))
            })?;

            let mut record = Record::new();
            if let Some(id) = entry.get("id").and_then(json_text) {
                record.insert("id", id);
            }
            if let Some(attributes) = entry.get("attributes").and_then(Value::as_object) {
                for name in ATTRIBUTES {
                    if let Some(value) = attributes.get(*name).and_then(json_text) {
                        record.insert(*name, value);
                    }
                }
            }
            Ok(record)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../../../tests/fixtures/petitions.json");

    #[test]
    fn test_parse_fixture() {
        let records = parse_petitions(FIXTURE.as_bytes(), DEFAULT_LIMIT).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].get("id"), Some("700001"));
        assert_eq!(
            records[0].get(ACTION_FIELD),
            Some("Protect funding for local libraries")
        );
        assert_eq!(records[0].get("signature_count"), Some("15234"));
    }

    #[test]
    fn test_null_attributes_are_absent() {
        let records = parse_petitions(FIXTURE.as_bytes(), DEFAULT_LIMIT).unwrap();
        assert_eq!(records[2].get(BACKGROUND_FIELD), None);
        assert!(records[2].get(ACTION_FIELD).is_some());
    }

    #[test]
    fn test_missing_attributes_keeps_id_only() {
        let records = parse_petitions(FIXTURE.as_bytes(), DEFAULT_LIMIT).unwrap();
        assert_eq!(records[3].len(), 1);
        assert_eq!(records[3].get("id"), Some("700004"));
    }

    #[test]
    fn test_limit_applies() {
        let records = parse_petitions(FIXTURE.as_bytes(), 2).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_missing_data_yields_no_records() {
        let records = parse_petitions(br#"{"links": {}}"#, 10).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_malformed_responses() {
        let bodies: [&[u8]; 4] = [
            b"not json",
            br#"[1, 2, 3]"#,
            br#"{"data": {"id": 1}}"#,
            br#"{"data": ["oops"]}"#,
        ];
        for body in bodies {
            let err = parse_petitions(body, 10).unwrap_err();
            assert!(matches!(err, PipelineError::MalformedInput(_)), "{err:?}");
        }
    }
}
