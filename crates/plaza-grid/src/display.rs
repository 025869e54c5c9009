//! Presentation-only cell formatting
//!
//! Converts tagged cell values into display strings for the grid. This
//! never changes the underlying value; the editor and RPC layer only ever
//! see the real tagged values.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use plaza_core::{CellValue, ColumnDescriptor, Record};

/// Whether a declared type names a date or timestamp column
pub fn is_temporal_type(data_type: &str) -> bool {
    let lowered = data_type.to_lowercase();
    lowered.contains("timestamp") || lowered.contains("date")
}

/// Format one cell for display.
///
/// Null renders as the literal "NULL", booleans as "true"/"false",
/// structured values as JSON text, and values in date/timestamp-typed
/// columns as a localized date-time string. Everything else is string
/// coercion of the value.
pub fn format_cell(value: &CellValue, data_type: &str) -> String {
    match value {
        CellValue::Null => "NULL".to_string(),
        CellValue::Bool(b) => b.to_string(),
        CellValue::Json(v) => v.to_string(),
        CellValue::Text(s) if is_temporal_type(data_type) => {
            format_temporal(s).unwrap_or_else(|| s.clone())
        }
        other => other.to_string(),
    }
}

/// Render a record as one display row aligned with the column descriptors
pub fn format_row(record: &Record, columns: &[ColumnDescriptor]) -> Vec<String> {
    columns
        .iter()
        .map(|column| {
            let value = record.get(&column.name).unwrap_or(&CellValue::Null);
            format_cell(value, &column.data_type)
        })
        .collect()
}

fn format_temporal(raw: &str) -> Option<String> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(
            instant
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        );
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.format("%Y-%m-%d %H:%M:%S").to_string());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.format("%Y-%m-%d %H:%M:%S").to_string());
    }
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(day.format("%Y-%m-%d").to_string());
    }
    None
}
