//! Raw input records: petitions, CSV rows, or any JSON object.

use serde::Serialize;
use serde_json::Value;

use crate::error::PipelineError;

/// One raw unit of input with named string fields.
///
/// Field order is the order in which fields were inserted, so CSV columns
/// keep their header order for previews.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a field, replacing any previous value with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Converts a JSON object into a record.
    ///
    /// Strings are taken as-is, numbers and booleans are stringified, `null`
    /// is treated as an absent field. Nested arrays/objects are kept as their
    /// compact JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MalformedInput`] if `value` is not an object.
    pub fn from_json(value: &Value) -> Result<Self, PipelineError> {
        let obj = value.as_object().ok_or_else(|| {
            PipelineError::MalformedInput(format!("expected a JSON object, got {}", kind(value)))
        })?;

        let mut record = Record::new();
        for (name, v) in obj {
            if let Some(text) = json_text(v) {
                record.insert(name.as_str(), text);
            }
        }
        Ok(record)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// Converts a JSON array of objects into records, preserving order.
///
/// # Errors
///
/// [`PipelineError::MalformedInput`] if `value` is not an array or any
/// element is not an object.
pub fn records_from_json(value: &Value) -> Result<Vec<Record>, PipelineError> {
    let items = value.as_array().ok_or_else(|| {
        PipelineError::MalformedInput(format!("expected a JSON array, got {}", kind(value)))
    })?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            Record::from_json(item).map_err(|e| match e {
                PipelineError::MalformedInput(msg) => {
                    PipelineError::MalformedInput(format!("record {i}: {msg}"))
                }
                other => other,
            })
        })
        .collect()
}

pub(crate) fn json_text(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_replaces_existing_field() {
        let mut r = Record::new().with_field("text", "a");
        r.insert("text", "b");
        assert_eq!(r.get("text"), Some("b"));
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn test_from_json_skips_null_and_stringifies_scalars() {
        let r = Record::from_json(&json!({"text": "hi", "n": 3, "ok": true, "gone": null}))
            .unwrap();
        assert_eq!(r.get("text"), Some("hi"));
        assert_eq!(r.get("n"), Some("3"));
        assert_eq!(r.get("ok"), Some("true"));
        assert_eq!(r.get("gone"), None);
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        let err = Record::from_json(&json!("just text")).unwrap_err();
        assert!(matches!(err, PipelineError::MalformedInput(_)));
    }

    #[test]
    fn test_records_from_json_preserves_order() {
        let records =
            records_from_json(&json!([{"text": "first"}, {"text": "second"}])).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("text"), Some("first"));
        assert_eq!(records[1].get("text"), Some("second"));
    }

    #[test]
    fn test_records_from_json_rejects_non_array() {
        let err = records_from_json(&json!({"text": "x"})).unwrap_err();
        assert!(matches!(err, PipelineError::MalformedInput(_)));
    }

    #[test]
    fn test_records_from_json_names_bad_element() {
        let err = records_from_json(&json!([{"text": "x"}, 42])).unwrap_err();
        assert_eq!(
            err,
            PipelineError::MalformedInput("record 1: expected a JSON object, got a number".into())
        );
    }

    #[test]
    fn test_field_names_keep_insertion_order() {
        let r: Record = [("b", "1"), ("a", "2")].into_iter().collect();
        assert_eq!(r.field_names().collect::<Vec<_>>(), vec!["b", "a"]);
    }
}
