use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::ExecutionState;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service returned HTTP {status}: {body}")]
    Service { status: StatusCode, body: String },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Timed out after {waited:?} waiting for execution {execution_id}")]
    Timeout {
        execution_id: String,
        waited: Duration,
    },

    #[error("Query {query_id}, execution {execution_id} ended with {state}: {message}")]
    ExecutionFailed {
        query_id: u64,
        execution_id: String,
        state: ExecutionState,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    #[must_use]
    pub const fn is_service(&self) -> bool {
        matches!(self, Self::Service { .. })
    }

    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    #[must_use]
    pub const fn is_execution_failed(&self) -> bool {
        matches!(self, Self::ExecutionFailed { .. })
    }

    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// HTTP status of a non-success response, if this error carries one
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
