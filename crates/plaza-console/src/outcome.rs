//! Outcome decoding and summary synthesis
//!
//! `exec_sql` answers with whichever shape the statement happened to
//! produce: a row array, an object carrying a command tag plus affected-row
//! count, or nothing meaningful. The shape is decided once, here, at the
//! client boundary; nothing downstream re-sniffs the raw payload.

use plaza_core::Record;
use serde_json::Value as JsonValue;

/// Decoded result of one `exec_sql` round-trip
#[derive(Debug, Clone, PartialEq)]
pub enum SqlOutcome {
    /// The statement produced rows
    RowSet(Vec<Record>),
    /// The statement reported a command tag and an affected-row count
    Command { tag: String, affected: u64 },
    /// Nothing meaningful came back
    Empty,
}

impl SqlOutcome {
    /// Decode the polymorphic payload into a tagged outcome
    pub fn decode(payload: JsonValue) -> Self {
        match payload {
            JsonValue::Array(rows) => {
                SqlOutcome::RowSet(rows.into_iter().map(Record::from_json).collect())
            }
            JsonValue::Object(map) => {
                let tag = map.get("command").and_then(|v| v.as_str());
                match tag {
                    Some(tag) => {
                        let affected = map
                            .get("rowCount")
                            .or_else(|| map.get("row_count"))
                            .and_then(|v| v.as_u64())
                            .unwrap_or(0);
                        SqlOutcome::Command {
                            tag: tag.to_uppercase(),
                            affected,
                        }
                    }
                    None => SqlOutcome::Empty,
                }
            }
            _ => SqlOutcome::Empty,
        }
    }

    /// Human-readable summary, in fixed priority order: rows fetched,
    /// then inserted / updated / deleted counts, then a fixed message for
    /// CREATE, then the generic command confirmation.
    pub fn summary(&self) -> String {
        match self {
            SqlOutcome::RowSet(rows) => format!("{} rows fetched", rows.len()),
            SqlOutcome::Command { tag, affected } => match tag.as_str() {
                "INSERT" => format!("{} rows inserted", affected),
                "UPDATE" => format!("{} rows updated", affected),
                "DELETE" => format!("{} rows deleted", affected),
                "CREATE" => "object created".to_string(),
                _ => "command executed".to_string(),
            },
            SqlOutcome::Empty => "command executed".to_string(),
        }
    }

    /// Row count for history bookkeeping
    pub fn row_count(&self) -> u64 {
        match self {
            SqlOutcome::RowSet(rows) => rows.len() as u64,
            SqlOutcome::Command { affected, .. } => *affected,
            SqlOutcome::Empty => 0,
        }
    }
}
