//! Cell values and open row maps
//!
//! Remote rows arrive as JSON objects whose column set is server-defined,
//! so a row is an ordered map of column name to tagged value rather than a
//! static record type. Decoding from JSON happens once, at the RPC boundary.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A single cell value as the remote provider can express it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// NULL value
    Null,
    /// Boolean
    Bool(bool),
    /// Integer value, kept exact. Bigint primary keys exceed f64 precision,
    /// and a lossy id re-targets mutations at a neighboring row.
    Int(i64),
    /// Floating-point value
    Float(f64),
    /// UTF-8 string
    Text(String),
    /// Structured JSON (object or array)
    Json(JsonValue),
}

impl CellValue {
    /// Decode a JSON value into a tagged cell value
    pub fn from_json(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => CellValue::Null,
            JsonValue::Bool(b) => CellValue::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Int(i),
                None => CellValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(s) => CellValue::Text(s),
            other => CellValue::Json(other),
        }
    }

    /// Encode back into the JSON shape the provider expects
    pub fn to_json(&self) -> JsonValue {
        match self {
            CellValue::Null => JsonValue::Null,
            CellValue::Bool(b) => JsonValue::Bool(*b),
            CellValue::Int(i) => JsonValue::Number((*i).into()),
            CellValue::Float(n) => serde_json::Number::from_f64(*n)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            CellValue::Text(s) => JsonValue::String(s.clone()),
            CellValue::Json(v) => v.clone(),
        }
    }

    /// Check if the value is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Try to get as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as i64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(n) => Some(*n),
            CellValue::Text(s) => s.parse::<f64>().ok(),
            _ => None,
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Null => write!(f, "NULL"),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Json(v) => write!(f, "{}", v),
        }
    }
}

/// One remote row: an ordered map of column name to cell value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    values: IndexMap<String, CellValue>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a JSON object into a record. Non-object payloads produce a
    /// single-column record so the caller still has something renderable.
    pub fn from_json(value: JsonValue) -> Self {
        match value {
            JsonValue::Object(map) => {
                let values = map
                    .into_iter()
                    .map(|(k, v)| (k, CellValue::from_json(v)))
                    .collect();
                Self { values }
            }
            other => {
                let mut values = IndexMap::new();
                values.insert("value".to_string(), CellValue::from_json(other));
                Self { values }
            }
        }
    }

    /// Encode into the JSON object shape the provider expects
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }

    /// Get a value by column name
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.values.get(column)
    }

    /// Set a value by column name
    pub fn set(&mut self, column: impl Into<String>, value: CellValue) {
        self.values.insert(column.into(), value);
    }

    /// Column names in arrival order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }

    /// Iterate over (column, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of columns present
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record carries no columns
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, CellValue)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, CellValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_from_json_tags_each_shape() {
        assert_eq!(CellValue::from_json(json!(null)), CellValue::Null);
        assert_eq!(CellValue::from_json(json!(true)), CellValue::Bool(true));
        assert_eq!(CellValue::from_json(json!(42)), CellValue::Int(42));
        assert_eq!(CellValue::from_json(json!(2.5)), CellValue::Float(2.5));
        assert_eq!(
            CellValue::from_json(json!("hi")),
            CellValue::Text("hi".to_string())
        );
        assert_eq!(
            CellValue::from_json(json!({"a": 1})),
            CellValue::Json(json!({"a": 1}))
        );
        assert_eq!(
            CellValue::from_json(json!([1, 2])),
            CellValue::Json(json!([1, 2]))
        );
    }

    #[test]
    fn test_record_preserves_column_order() {
        let record = Record::from_json(json!({"id": 1, "name": "chair", "sold": false}));
        let columns: Vec<&str> = record.columns().collect();
        assert_eq!(columns, vec!["id", "name", "sold"]);
    }

    #[test]
    fn test_record_round_trips_to_json() {
        let payload = json!({"id": 7, "title": "lamp", "meta": {"color": "red"}});
        let record = Record::from_json(payload.clone());
        assert_eq!(record.to_json(), payload);
    }

    #[test]
    fn test_bigint_values_round_trip_exactly() {
        // 2^53 + 1 is not representable as f64
        let payload = json!({"id": 9_007_199_254_740_993i64, "name": "snowflake"});
        let record = Record::from_json(payload.clone());
        assert_eq!(record.get("id"), Some(&CellValue::Int(9_007_199_254_740_993)));
        assert_eq!(record.to_json(), payload);
    }

    #[test]
    fn test_non_object_payload_becomes_single_column() {
        let record = Record::from_json(json!("bare"));
        assert_eq!(record.len(), 1);
        assert_eq!(
            record.get("value"),
            Some(&CellValue::Text("bare".to_string()))
        );
    }
}
