//! Client for executing saved queries on the Dune API
//!
//! Submit a query, poll until its execution reaches a terminal state, then
//! fetch the rows.

mod api;
mod client;
pub mod config;
mod constants;
mod error;
pub mod observability;
#[cfg(test)]
mod testing;
pub mod types;
mod wait;
mod workflow;

pub use api::ExecutionApi;
pub use client::DuneClient;
pub use config::{Config, ConfigBuilder, TelemetryConfig};
pub use constants::{API_KEY_HEADER, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use types::*;
pub use wait::{WaitOptions, wait_for_execution_end};
pub use workflow::{execute_query_and_get_results, run_query_and_fetch_rows};
