//! Execution API trait definition

use async_trait::async_trait;

use crate::Result;
use crate::types::{
    CancelResponse, ExecuteResponse, ExecutionResult, ExecutionStatus, QueryParameters,
};
use crate::wait::{WaitOptions, wait_for_execution_end};

/// Remote operations on query executions
///
/// [`crate::DuneClient`] implements this over HTTP. The poller and the
/// workflow only depend on this trait.
#[async_trait]
pub trait ExecutionApi: Send + Sync {
    /// Submit a saved query for execution
    async fn execute_query(
        &self,
        query_id: u64,
        params: &QueryParameters,
    ) -> Result<ExecuteResponse>;

    /// Fetch the current status of an execution
    async fn get_execution_status(&self, execution_id: &str) -> Result<ExecutionStatus>;

    /// Fetch rows and metadata, or the error, of an execution
    async fn get_execution_result(&self, execution_id: &str) -> Result<ExecutionResult>;

    /// Request cancellation of a running execution
    async fn cancel_execution(&self, execution_id: &str) -> Result<CancelResponse>;

    /// Poll until the execution reaches a terminal state or the wait expires
    async fn wait_for_execution_end(
        &self,
        execution_id: &str,
        options: WaitOptions,
    ) -> Result<ExecutionStatus> {
        wait_for_execution_end(self, execution_id, options).await
    }
}
