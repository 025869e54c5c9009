//! Execution history

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use uuid::Uuid;

/// A single executed statement
#[derive(Clone, Debug)]
pub struct ExecutionRecord {
    /// Unique identifier
    pub id: Uuid,

    /// The SQL statement as submitted
    pub sql: String,

    /// When it was executed
    pub executed_at: DateTime<Utc>,

    /// Round-trip duration in milliseconds
    pub duration_ms: u64,

    /// Rows returned/affected, when the outcome carried a count
    pub row_count: Option<u64>,

    /// Error message if failed
    pub error: Option<String>,

    /// Whether execution succeeded
    pub success: bool,
}

impl ExecutionRecord {
    /// Record a successful execution
    pub fn success(sql: String, duration_ms: u64, row_count: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            sql,
            executed_at: Utc::now(),
            duration_ms,
            row_count: Some(row_count),
            error: None,
            success: true,
        }
    }

    /// Record a failed execution
    pub fn failure(sql: String, duration_ms: u64, error: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            sql,
            executed_at: Utc::now(),
            duration_ms,
            row_count: None,
            error: Some(error),
            success: false,
        }
    }
}

/// Bounded in-memory history, most recent first
pub struct ExecutionHistory {
    entries: VecDeque<ExecutionRecord>,
    max_entries: usize,
}

impl ExecutionHistory {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries,
        }
    }

    /// Add an entry, evicting the oldest past the cap
    pub fn add(&mut self, entry: ExecutionRecord) {
        tracing::debug!(
            execution_id = %entry.id,
            success = entry.success,
            duration_ms = entry.duration_ms,
            "adding execution to history"
        );
        self.entries.push_front(entry);
        while self.entries.len() > self.max_entries {
            self.entries.pop_back();
        }
    }

    /// All entries, newest first
    pub fn entries(&self) -> impl Iterator<Item = &ExecutionRecord> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
