//! # Raw Records
//!
//! The untyped shape every record source produces: a flat map from header
//! to cell value. Cells are either plain text or a list of strings
//! (multi-select fields exported by the tabular API).
//!
//! Headers are tracked separately from the rows because the tabular API
//! omits empty cells, so no single row is guaranteed to carry every
//! column. [`RecordSet::from_rows`] takes the union of keys in first-seen
//! order.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One cell of a raw record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Convert a JSON cell.
    ///
    /// Strings pass through, numbers and booleans are stringified, arrays
    /// become lists (null elements dropped). Nulls and objects carry no
    /// usable value and yield `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null | Value::Object(_) => None,
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Number(n) => Some(Self::Text(n.to_string())),
            Value::Bool(b) => Some(Self::Text(b.to_string())),
            Value::Array(items) => Some(Self::List(
                items.iter().filter_map(scalar_to_string).collect(),
            )),
        }
    }

    /// The cell as one string; list elements are joined with `;`.
    pub fn joined(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s.as_str()),
            Self::List(items) => Cow::Owned(items.join(";")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// One row of source data, keyed by literal header.
pub type RawRecord = BTreeMap<String, FieldValue>;

/// Convert a JSON object into a [`RawRecord`], dropping unusable cells.
pub fn record_from_json(object: &serde_json::Map<String, Value>) -> RawRecord {
    object
        .iter()
        .filter_map(|(k, v)| FieldValue::from_json(v).map(|fv| (k.clone(), fv)))
        .collect()
}

/// A batch of raw records plus the header set used for column resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    headers: Vec<String>,
    rows: Vec<RawRecord>,
}

impl RecordSet {
    /// Build from an explicit header order (CSV files).
    pub fn new(headers: Vec<String>, rows: Vec<RawRecord>) -> Self {
        Self { headers, rows }
    }

    /// Build from rows alone; headers are the union of keys in first-seen order.
    pub fn from_rows(rows: Vec<RawRecord>) -> Self {
        let mut seen = HashSet::new();
        let mut headers = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if seen.insert(key.as_str()) {
                    headers.push(key.clone());
                }
            }
        }
        Self { headers, rows }
    }

    /// Build from a JSON array of objects. Non-object elements are skipped.
    pub fn from_json_array(values: &[Value]) -> Self {
        let rows = values
            .iter()
            .filter_map(Value::as_object)
            .map(record_from_json)
            .collect();
        Self::from_rows(rows)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[RawRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_cells_are_stringified() {
        assert_eq!(FieldValue::from_json(&json!("Yes")), Some(FieldValue::from("Yes")));
        assert_eq!(FieldValue::from_json(&json!(12)), Some(FieldValue::from("12")));
        assert_eq!(FieldValue::from_json(&json!(true)), Some(FieldValue::from("true")));
        assert_eq!(FieldValue::from_json(&json!(null)), None);
        assert_eq!(FieldValue::from_json(&json!({"url": "x"})), None);
    }

    #[test]
    fn json_arrays_drop_nulls() {
        let value = FieldValue::from_json(&json!(["UJ", null, 3])).unwrap();
        assert_eq!(value, FieldValue::List(vec!["UJ".into(), "3".into()]));
        assert_eq!(value.joined(), "UJ;3");
    }

    #[test]
    fn headers_are_union_in_first_seen_order() {
        let set = RecordSet::from_json_array(&[
            json!({"Country": "France", "Region": "Europe"}),
            json!({"Country": "Chad", "Status": "UN Member State"}),
            json!("not an object"),
        ]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.headers(), ["Country", "Region", "Status"]);
    }

    #[test]
    fn empty_set() {
        let set = RecordSet::from_rows(Vec::new());
        assert!(set.is_empty());
        assert!(set.headers().is_empty());
    }
}
