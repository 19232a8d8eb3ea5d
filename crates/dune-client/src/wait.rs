//! Fixed-interval polling for execution completion

use std::time::Duration;

use tokio::time::Instant;

use crate::api::ExecutionApi;
use crate::constants::{DEFAULT_MAX_WAIT_SECS, DEFAULT_POLL_INTERVAL_SECS};
use crate::types::ExecutionStatus;
use crate::{Error, Result};

/// How often to poll and how long to wait in total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    pub poll_interval: Duration,
    pub max_wait: Duration,
}

impl WaitOptions {
    #[must_use]
    pub const fn new(poll_interval: Duration, max_wait: Duration) -> Self {
        Self {
            poll_interval,
            max_wait,
        }
    }
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            max_wait: Duration::from_secs(DEFAULT_MAX_WAIT_SECS),
        }
    }
}

/// Poll the execution status until it is terminal or `max_wait` elapses
///
/// The status is checked once per `poll_interval` with no backoff. Any error
/// from the status call aborts the wait immediately.
pub async fn wait_for_execution_end<A>(
    api: &A,
    execution_id: &str,
    options: WaitOptions,
) -> Result<ExecutionStatus>
where
    A: ExecutionApi + ?Sized,
{
    // A max_wait too large to represent means no deadline
    let deadline = Instant::now().checked_add(options.max_wait);

    while deadline.is_none_or(|deadline| Instant::now() < deadline) {
        let status = api.get_execution_status(execution_id).await?;

        if status.state.is_terminal() {
            if status.state.is_completed() {
                tracing::info!(
                    execution_id,
                    row_count = ?status.row_count(),
                    "Execution completed"
                );
            } else {
                tracing::warn!(
                    execution_id,
                    state = %status.state,
                    "Execution ended without completing"
                );
            }
            return Ok(status);
        }

        tracing::info!(
            execution_id,
            state = %status.state,
            poll_interval = ?options.poll_interval,
            "Execution not done yet, sleeping"
        );
        tokio::time::sleep(options.poll_interval).await;
    }

    Err(Error::Timeout {
        execution_id: execution_id.to_string(),
        waited: options.max_wait,
    })
}
