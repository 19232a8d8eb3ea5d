//! Constants for the Dune API client

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.dune.com/";

/// Request header carrying the API key (`X-DUNE-API-KEY`)
pub const API_KEY_HEADER: &str = "x-dune-api-key";

/// Default delay between status checks, in seconds
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Default upper bound on waiting for an execution, in seconds
pub const DEFAULT_MAX_WAIT_SECS: u64 = 1800;

/// Default per-request HTTP timeout, in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default log filter when neither `RUST_LOG` nor configuration sets one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Wire names of execution states
pub mod state {
    pub const PENDING: &str = "QUERY_STATE_PENDING";
    pub const EXECUTING: &str = "QUERY_STATE_EXECUTING";
    pub const COMPLETED: &str = "QUERY_STATE_COMPLETED";
    pub const FAILED: &str = "QUERY_STATE_FAILED";
    pub const CANCELLED: &str = "QUERY_STATE_CANCELLED";
}
