//! Wire types for the Dune execution API
//!
//! Response shapes use slightly different field names across endpoints
//! (`state` vs `status`, `rows` vs `payload`). Everything is normalized into
//! one representation here so callers never see the difference.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::state;

/// A single result row keyed by column name
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Execution state as reported by the service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExecutionState {
    #[default]
    Pending,
    Executing,
    Completed,
    Failed,
    Cancelled,
    /// State string this client does not know about; treated as non-terminal
    Other(String),
}

impl ExecutionState {
    /// Terminal states are final: no further transitions are expected
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => state::PENDING,
            Self::Executing => state::EXECUTING,
            Self::Completed => state::COMPLETED,
            Self::Failed => state::FAILED,
            Self::Cancelled => state::CANCELLED,
            Self::Other(s) => s,
        }
    }
}

impl From<String> for ExecutionState {
    fn from(s: String) -> Self {
        match s.as_str() {
            state::PENDING => Self::Pending,
            state::EXECUTING => Self::Executing,
            state::COMPLETED => Self::Completed,
            state::FAILED => Self::Failed,
            state::CANCELLED => Self::Cancelled,
            _ => Self::Other(s),
        }
    }
}

impl From<ExecutionState> for String {
    fn from(state: ExecutionState) -> Self {
        match state {
            ExecutionState::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named query parameters sent with an execute request
///
/// Owned by the caller and empty by default. An empty set is omitted from the
/// request body entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParameters(BTreeMap<String, serde_json::Value>);

impl QueryParameters {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add a parameter, replacing any previous value with the same name
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.0.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.0.get(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// A `name=value` parameter assignment as given on the command line
///
/// The value is read as JSON when it parses as JSON, otherwise as a plain
/// string, so `limit=10` is a number and `chain=ethereum` is a string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterAssignment {
    pub name: String,
    pub value: serde_json::Value,
}

impl FromStr for ParameterAssignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, raw) = s
            .split_once('=')
            .ok_or_else(|| format!("expected name=value, got '{s}'"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("missing parameter name in '{s}'"));
        }

        let value = serde_json::from_str(raw)
            .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));

        Ok(Self {
            name: name.to_string(),
            value,
        })
    }
}

impl FromIterator<ParameterAssignment> for QueryParameters {
    fn from_iter<I: IntoIterator<Item = ParameterAssignment>>(iter: I) -> Self {
        Self(iter.into_iter().map(|p| (p.name, p.value)).collect())
    }
}

/// Body of an execute request
#[derive(Debug, Serialize)]
pub(crate) struct ExecuteRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_parameters: Option<&'a QueryParameters>,
}

impl<'a> ExecuteRequest<'a> {
    pub fn new(params: &'a QueryParameters) -> Self {
        Self {
            query_parameters: (!params.is_empty()).then_some(params),
        }
    }
}

/// Response to an execute request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteResponse {
    pub execution_id: String,
    #[serde(default, alias = "status")]
    pub state: ExecutionState,
}

/// Error reported by the service for a failed or cancelled execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExecutionError {
    Detailed {
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
        message: String,
    },
    Message(String),
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detailed {
                kind: Some(kind),
                message,
            } => write!(f, "{kind}: {message}"),
            Self::Detailed {
                kind: None,
                message,
            }
            | Self::Message(message) => f.write_str(message),
        }
    }
}

/// Result set metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultMetadata {
    pub column_names: Vec<String>,
    pub result_set_bytes: Option<u64>,
    pub total_row_count: Option<u64>,
    pub datapoint_count: Option<u64>,
    pub pending_time_millis: Option<u64>,
    pub execution_time_millis: Option<u64>,
}

/// Status snapshot of an execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionStatus {
    #[serde(default)]
    pub execution_id: String,
    #[serde(default)]
    pub query_id: u64,
    #[serde(alias = "status")]
    pub state: ExecutionState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_started_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_ended_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_metadata: Option<ResultMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ExecutionError>,
}

impl ExecutionStatus {
    /// Declared row count, available once the execution completed
    #[must_use]
    pub fn row_count(&self) -> Option<u64> {
        self.result_metadata.as_ref()?.total_row_count
    }
}

/// Rows and metadata of a completed execution
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultData {
    #[serde(default, alias = "payload")]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub metadata: ResultMetadata,
}

/// Result of an execution: rows on completion, an error otherwise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    #[serde(default)]
    pub execution_id: String,
    #[serde(default)]
    pub query_id: u64,
    #[serde(alias = "status")]
    pub state: ExecutionState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ExecutionError>,
}

impl ExecutionResult {
    /// Human-readable description of why the execution produced no rows
    #[must_use]
    pub fn error_message(&self) -> String {
        self.error
            .as_ref()
            .map_or_else(|| "no error reported".to_string(), ToString::to_string)
    }
}

/// Response to a cancel request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelResponse {
    pub success: bool,
}
