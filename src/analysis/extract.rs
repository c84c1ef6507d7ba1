//! Text extraction from raw records.

use serde::Serialize;

use crate::error::PipelineError;
use crate::record::Record;

/// Which fields of a record make up the text to score, and how to join them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    fields: Vec<String>,
    separator: String,
}

impl FieldSpec {
    /// A spec selecting one field.
    pub fn single(field: impl Into<String>) -> Self {
        Self {
            fields: vec![field.into()],
            separator: " ".to_string(),
        }
    }

    /// A spec concatenating several fields in the given order.
    ///
    /// # Errors
    ///
    /// [`PipelineError::MalformedInput`] if no field names are given.
    pub fn fields<I, S>(fields: I) -> Result<Self, PipelineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if fields.is_empty() {
            return Err(PipelineError::MalformedInput(
                "field specification names no fields".to_string(),
            ));
        }
        Ok(Self {
            fields,
            separator: " ".to_string(),
        })
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn names(&self) -> &[String] {
        &self.fields
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }
}

/// Extracts the text to score from `record`.
///
/// Each named field is trimmed; absent fields contribute nothing. Non-empty
/// pieces are joined with the spec's separator in spec order. Returns `None`
/// when the result is empty, meaning the item must be skipped.
pub fn extract_text(record: &Record, spec: &FieldSpec) -> Option<String> {
    let pieces: Vec<&str> = spec
        .fields
        .iter()
        .map(|name| record.get(name).unwrap_or("").trim())
        .filter(|piece| !piece.is_empty())
        .collect();

    let text = pieces.join(&spec.separator);
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
