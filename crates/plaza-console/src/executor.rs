//! SQL console executor
//!
//! Forwards the statement verbatim, completely unparsed and unvalidated,
//! to the generic `exec_sql` procedure. The only client-side processing is
//! advisory: destructive-statement warnings before the call, outcome
//! decoding and error classification after it. In-flight executions cannot
//! be cancelled; the caller waits for settlement.

use std::sync::Arc;
use std::time::Instant;

use plaza_core::{PlazaError, Result};
use plaza_rpc::{procedures, RpcClient};
use serde_json::json;

use crate::{
    analyze_destructive, ClassifiedError, DestructiveWarning, ExecutionHistory, ExecutionRecord,
    SqlOutcome,
};

/// Console lifecycle: idle, one in-flight execution, then settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleState {
    #[default]
    Idle,
    Submitted,
    Succeeded,
    Failed,
}

/// Result of one settled execution, ready for display
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    pub outcome: SqlOutcome,
    pub summary: String,
    pub warnings: Vec<DestructiveWarning>,
    pub duration_ms: u64,
}

/// The SQL console
pub struct SqlConsole {
    rpc: Arc<dyn RpcClient>,
    state: ConsoleState,
    history: ExecutionHistory,
}

impl SqlConsole {
    pub fn new(rpc: Arc<dyn RpcClient>) -> Self {
        Self {
            rpc,
            state: ConsoleState::Idle,
            history: ExecutionHistory::new(200),
        }
    }

    pub fn state(&self) -> ConsoleState {
        self.state
    }

    pub fn history(&self) -> &ExecutionHistory {
        &self.history
    }

    /// Return to idle after the caller has displayed the settlement
    pub fn acknowledge(&mut self) {
        self.state = ConsoleState::Idle;
    }

    /// Execute one statement and settle into Succeeded or Failed.
    ///
    /// The statement goes over the wire exactly as submitted. On failure
    /// the error is classified for remediation text only; nothing is
    /// retried or corrected.
    #[tracing::instrument(skip(self, sql), fields(sql_preview = %sql.chars().take(100).collect::<String>()))]
    pub async fn execute(&mut self, sql: &str) -> std::result::Result<ExecutionReport, ClassifiedError> {
        self.state = ConsoleState::Submitted;
        let warnings: Vec<DestructiveWarning> = analyze_destructive(sql).into_iter().collect();
        if let Some(warning) = warnings.first() {
            tracing::warn!(kind = warning.kind.display_name(), "destructive statement submitted");
        }

        let started = Instant::now();
        let result = self.invoke(sql).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(payload) => {
                let outcome = SqlOutcome::decode(payload);
                let report = ExecutionReport {
                    summary: outcome.summary(),
                    warnings,
                    duration_ms,
                    outcome,
                };
                tracing::info!(duration_ms, summary = %report.summary, "statement executed");
                self.history.add(ExecutionRecord::success(
                    sql.to_string(),
                    duration_ms,
                    report.outcome.row_count(),
                ));
                self.state = ConsoleState::Succeeded;
                Ok(report)
            }
            Err(err) => {
                let message = match err {
                    PlazaError::Rpc(message) => message,
                    other => other.to_string(),
                };
                tracing::error!(duration_ms, error = %message, "statement failed");
                self.history
                    .add(ExecutionRecord::failure(sql.to_string(), duration_ms, message.clone()));
                self.state = ConsoleState::Failed;
                Err(ClassifiedError::new(message))
            }
        }
    }

    async fn invoke(&self, sql: &str) -> Result<serde_json::Value> {
        self.rpc
            .invoke(procedures::EXEC_SQL, json!({ "query": sql }))
            .await
    }
}
