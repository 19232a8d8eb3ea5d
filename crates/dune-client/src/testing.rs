//! In-memory [`ExecutionApi`] used by poller and workflow tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::StatusCode;
use serde_json::json;
use tokio::time::Instant;

use crate::api::ExecutionApi;
use crate::types::{
    CancelResponse, ExecuteResponse, ExecutionError, ExecutionResult, ExecutionState,
    ExecutionStatus, QueryParameters, ResultData, ResultMetadata, Row,
};
use crate::{Error, Result};

pub const EXECUTION_ID: &str = "01HKZJ2683PHF9Q9PHHQ8FW4Q1";

/// Execution whose state is a function of time since construction
#[derive(Debug)]
pub struct ScriptedApi {
    started: Instant,
    completes_after: Option<Duration>,
    pending_state: ExecutionState,
    terminal_state: ExecutionState,
    error_message: Option<String>,
    declared_rows: u64,
    returned_rows: u64,
    fail_status: bool,
    status_calls: AtomicUsize,
    result_calls: AtomicUsize,
    submitted: Mutex<Vec<(u64, QueryParameters)>>,
}

impl ScriptedApi {
    fn base() -> Self {
        Self {
            started: Instant::now(),
            completes_after: None,
            pending_state: ExecutionState::Executing,
            terminal_state: ExecutionState::Completed,
            error_message: None,
            declared_rows: 0,
            returned_rows: 0,
            fail_status: false,
            status_calls: AtomicUsize::new(0),
            result_calls: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Completes with `rows` rows once `after` has elapsed
    pub fn completing_after(after: Duration, rows: u64) -> Self {
        Self {
            completes_after: Some(after),
            declared_rows: rows,
            returned_rows: rows,
            ..Self::base()
        }
    }

    /// Never leaves the pending state
    pub fn never_finishing() -> Self {
        Self::base()
    }

    /// Immediately reports `state` with the given remote error
    pub fn ending_with(state: ExecutionState, message: &str) -> Self {
        Self {
            completes_after: Some(Duration::ZERO),
            terminal_state: state,
            error_message: Some(message.to_string()),
            ..Self::base()
        }
    }

    /// Every status call fails with HTTP 500
    pub fn failing_status() -> Self {
        Self {
            fail_status: true,
            ..Self::base()
        }
    }

    pub fn with_pending_state(mut self, state: ExecutionState) -> Self {
        self.pending_state = state;
        self
    }

    /// Returns a different number of rows than the metadata declares
    pub const fn with_returned_rows(mut self, rows: u64) -> Self {
        self.returned_rows = rows;
        self
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::Relaxed)
    }

    pub fn result_calls(&self) -> usize {
        self.result_calls.load(Ordering::Relaxed)
    }

    pub fn submitted(&self) -> Vec<(u64, QueryParameters)> {
        self.submitted.lock().clone()
    }

    fn current_state(&self) -> ExecutionState {
        match self.completes_after {
            Some(after) if self.started.elapsed() >= after => self.terminal_state.clone(),
            _ => self.pending_state.clone(),
        }
    }

    fn metadata(&self) -> ResultMetadata {
        ResultMetadata {
            column_names: vec!["n".to_string()],
            total_row_count: Some(self.declared_rows),
            ..ResultMetadata::default()
        }
    }

    fn error(&self) -> Option<ExecutionError> {
        self.error_message.as_ref().map(|message| ExecutionError::Detailed {
            kind: Some("FAILED_TYPE_EXECUTION_FAILED".to_string()),
            message: message.clone(),
        })
    }
}

#[async_trait]
impl ExecutionApi for ScriptedApi {
    async fn execute_query(
        &self,
        query_id: u64,
        params: &QueryParameters,
    ) -> Result<ExecuteResponse> {
        self.submitted.lock().push((query_id, params.clone()));
        Ok(ExecuteResponse {
            execution_id: EXECUTION_ID.to_string(),
            state: ExecutionState::Pending,
        })
    }

    async fn get_execution_status(&self, execution_id: &str) -> Result<ExecutionStatus> {
        self.status_calls.fetch_add(1, Ordering::Relaxed);

        if self.fail_status {
            return Err(Error::Service {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "internal error".to_string(),
            });
        }

        let state = self.current_state();
        let completed = state.is_completed();
        Ok(ExecutionStatus {
            execution_id: execution_id.to_string(),
            query_id: 0,
            state,
            submitted_at: None,
            execution_started_at: None,
            execution_ended_at: None,
            result_metadata: completed.then(|| self.metadata()),
            error: if completed { None } else { self.error() },
        })
    }

    async fn get_execution_result(&self, execution_id: &str) -> Result<ExecutionResult> {
        self.result_calls.fetch_add(1, Ordering::Relaxed);

        let state = self.current_state();
        if state.is_completed() {
            let rows = (0..self.returned_rows)
                .map(|n| {
                    let mut row = Row::new();
                    row.insert("n".to_string(), json!(n));
                    row
                })
                .collect();
            return Ok(ExecutionResult {
                execution_id: execution_id.to_string(),
                query_id: 0,
                state,
                result: Some(ResultData {
                    rows,
                    metadata: self.metadata(),
                }),
                error: None,
            });
        }

        Ok(ExecutionResult {
            execution_id: execution_id.to_string(),
            query_id: 0,
            state,
            result: None,
            error: self.error(),
        })
    }

    async fn cancel_execution(&self, _execution_id: &str) -> Result<CancelResponse> {
        Ok(CancelResponse { success: true })
    }
}
