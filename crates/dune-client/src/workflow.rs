//! Submit, wait, fetch: the one-shot query workflow

use crate::api::ExecutionApi;
use crate::client::DuneClient;
use crate::types::{QueryParameters, Row};
use crate::wait::WaitOptions;
use crate::{Error, Result};

/// Execute a saved query, wait for it to finish and return its rows
///
/// Fails with [`Error::ExecutionFailed`] carrying the service's error text when
/// the execution ends in any state other than completed.
pub async fn execute_query_and_get_results<A>(
    api: &A,
    query_id: u64,
    params: &QueryParameters,
    options: WaitOptions,
) -> Result<Vec<Row>>
where
    A: ExecutionApi + ?Sized,
{
    let execution_id = api.execute_query(query_id, params).await?.execution_id;
    tracing::info!(query_id, execution_id = %execution_id, "Query submitted");

    let status = api.wait_for_execution_end(&execution_id, options).await?;
    tracing::info!(
        query_id,
        execution_id = %execution_id,
        state = %status.state,
        "Query finished"
    );

    let response = api.get_execution_result(&execution_id).await?;
    if !response.state.is_completed() {
        let message = response
            .error
            .as_ref()
            .or(status.error.as_ref())
            .map_or_else(|| "no error reported".to_string(), ToString::to_string);
        tracing::error!(
            query_id,
            execution_id = %execution_id,
            state = %response.state,
            error = %message,
            "Query did not complete"
        );
        return Err(Error::ExecutionFailed {
            query_id,
            execution_id,
            state: response.state,
            message,
        });
    }

    let data = response.result.ok_or_else(|| {
        Error::Decode(format!(
            "execution {execution_id} completed without a result payload"
        ))
    })?;

    tracing::info!(
        query_id,
        execution_id = %execution_id,
        columns = ?data.metadata.column_names,
        row_count = ?data.metadata.total_row_count,
        execution_time_millis = ?data.metadata.execution_time_millis,
        "Result metadata"
    );

    let declared = data.metadata.total_row_count.or_else(|| status.row_count());
    if let Some(declared) = declared
        && declared != data.rows.len() as u64
    {
        tracing::warn!(
            query_id,
            execution_id = %execution_id,
            declared,
            returned = data.rows.len(),
            "Returned rows do not match declared row count"
        );
    }

    Ok(data.rows)
}

/// Run `query_id` against the public Dune API with default wait settings
pub async fn run_query_and_fetch_rows(query_id: u64, api_key: &str) -> Result<Vec<Row>> {
    let client = DuneClient::new(api_key)?;
    execute_query_and_get_results(
        &client,
        query_id,
        &QueryParameters::new(),
        WaitOptions::default(),
    )
    .await
}
