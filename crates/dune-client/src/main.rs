use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use dune_client::config::{self, ConfigBuilder};
use dune_client::observability::init_observability;
use dune_client::{
    Config, DuneClient, ExecutionApi, ParameterAssignment, QueryParameters,
    execute_query_and_get_results,
};
use serde::Serialize;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "dune-query")]
#[command(about = "Execute saved Dune queries and fetch their results", long_about = None)]
#[command(version)]
struct Args {
    /// Dune API key
    #[arg(long, env = "DUNE_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Seconds between status checks
    #[arg(long, global = true)]
    poll_interval: Option<u64>,

    /// Maximum seconds to wait for an execution to finish
    #[arg(long, global = true)]
    max_wait: Option<u64>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable JSON logging output
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Execute a query, wait for it to finish and print its rows
    Run {
        query_id: u64,

        /// Query parameter (repeatable)
        #[arg(short, long = "param", value_name = "NAME=VALUE")]
        params: Vec<ParameterAssignment>,
    },
    /// Submit a query and print the execution id
    Execute {
        query_id: u64,

        /// Query parameter (repeatable)
        #[arg(short, long = "param", value_name = "NAME=VALUE")]
        params: Vec<ParameterAssignment>,
    },
    /// Print the status of an execution
    Status { execution_id: String },
    /// Print the result of an execution
    Result { execution_id: String },
    /// Cancel an execution
    Cancel { execution_id: String },
    /// Wait for an execution to reach a terminal state
    Wait { execution_id: String },
}

/// Resolve configuration with precedence: CLI > env > file > defaults
fn build_config(args: &Args) -> anyhow::Result<Config> {
    let mut builder: ConfigBuilder = if let Some(ref path) = args.config {
        config::load_config_from_path(path)?
    } else {
        config::load_config()?
    };

    if let Some(ref key) = args.api_key {
        builder = builder.api_key(key.clone());
    }

    if let Some(ref url_str) = args.base_url {
        let url = Url::parse(url_str).map_err(|e| anyhow::anyhow!("Invalid base URL: {e}"))?;
        builder = builder.base_url(url);
    }

    if let Some(secs) = args.poll_interval {
        builder = builder.poll_interval(Duration::from_secs(secs));
    }

    if let Some(secs) = args.max_wait {
        builder = builder.max_wait(Duration::from_secs(secs));
    }

    if args.verbose {
        builder = builder.log_level("debug".to_string());
    }

    if args.json_logs {
        builder = builder.json_logs(true);
    }

    Ok(builder.build()?)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(command: Command, config: &Config) -> anyhow::Result<()> {
    let client = DuneClient::from_config(config)?;

    match command {
        Command::Run { query_id, params } => {
            let params: QueryParameters = params.into_iter().collect();
            let rows =
                execute_query_and_get_results(&client, query_id, &params, config.wait()).await?;
            print_json(&rows)
        }
        Command::Execute { query_id, params } => {
            let params: QueryParameters = params.into_iter().collect();
            print_json(&client.execute_query(query_id, &params).await?)
        }
        Command::Status { execution_id } => {
            print_json(&client.get_execution_status(&execution_id).await?)
        }
        Command::Result { execution_id } => {
            print_json(&client.get_execution_result(&execution_id).await?)
        }
        Command::Cancel { execution_id } => {
            print_json(&client.cancel_execution(&execution_id).await?)
        }
        Command::Wait { execution_id } => print_json(
            &client
                .wait_for_execution_end(&execution_id, config.wait())
                .await?,
        ),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = build_config(&args)?;

    init_observability(&config.telemetry)?;

    tracing::debug!(
        base_url = %config.base_url,
        poll_interval = ?config.wait.poll_interval,
        max_wait = ?config.wait.max_wait,
        "Starting dune-query"
    );

    run(args.command, &config).await
}
