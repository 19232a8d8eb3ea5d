//! HTTP client for the Dune execution API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::ExecutionApi;
use crate::config::Config;
use crate::constants::{API_KEY_HEADER, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::types::{
    CancelResponse, ExecuteRequest, ExecuteResponse, ExecutionResult, ExecutionStatus,
    QueryParameters,
};
use crate::{Error, Result};

/// Client bound to one base URL and one API key
///
/// Non-success responses fail immediately; nothing is retried.
#[derive(Debug, Clone)]
pub struct DuneClient {
    base_url: Url,
    client: Client,
}

impl DuneClient {
    /// Client for the public Dune API
    pub fn new(api_key: &str) -> Result<Self> {
        let base_url = Url::parse(DEFAULT_BASE_URL)
            .map_err(|e| Error::Config(format!("Invalid base URL: {e}")))?;
        Self::with_base_url(
            api_key,
            base_url,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_base_url(
            &config.api_key,
            config.base_url.clone(),
            config.request_timeout,
        )
    }

    pub fn with_base_url(api_key: &str, base_url: Url, request_timeout: Duration) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "Base URL cannot carry a path: {base_url}"
            )));
        }

        let mut key = HeaderValue::from_str(api_key)
            .map_err(|_| Error::Config("API key contains invalid header characters".into()))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(request_timeout)
            .build()?;

        Ok(Self { base_url, client })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL extended with the given path segments, each percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &'static str,
    ) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!(operation, error = %e, "Failed to read error body");
                    String::new()
                }
            };
            tracing::debug!(operation, %status, "Request rejected by service");
            return Err(Error::Service { status, body });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| Error::Decode(format!("{operation} response: {e}")))
    }
}

#[async_trait]
impl ExecutionApi for DuneClient {
    async fn execute_query(
        &self,
        query_id: u64,
        params: &QueryParameters,
    ) -> Result<ExecuteResponse> {
        let url = self.endpoint(&["v1", "query", &query_id.to_string(), "execute"]);
        tracing::debug!(query_id, params = params.len(), "Submitting query");

        let request = self.client.post(url).json(&ExecuteRequest::new(params));
        self.send(request, "execute").await
    }

    async fn get_execution_status(&self, execution_id: &str) -> Result<ExecutionStatus> {
        let url = self.endpoint(&["v1", "execution", execution_id, "status"]);
        self.send(self.client.get(url), "status").await
    }

    async fn get_execution_result(&self, execution_id: &str) -> Result<ExecutionResult> {
        let url = self.endpoint(&["v1", "execution", execution_id, "result"]);
        self.send(self.client.get(url), "result").await
    }

    async fn cancel_execution(&self, execution_id: &str) -> Result<CancelResponse> {
        let url = self.endpoint(&["v1", "execution", execution_id]);
        tracing::debug!(execution_id, "Cancelling execution");
        self.send(self.client.delete(url), "cancel").await
    }
}
