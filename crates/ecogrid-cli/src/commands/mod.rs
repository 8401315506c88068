mod cache;
mod carbon;
mod certify;
mod energy;
mod refresh;
mod snapshot;
mod weather;

use std::sync::Arc;

use ecogrid_core::{Aggregator, OracleConfig, ReqwestHttpClient};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Outcome of one command invocation.
pub struct CommandResult {
    pub data: Value,
    pub errors: Vec<String>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors.extend(errors);
        self
    }
}

pub async fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    let config = OracleConfig::from_env();
    let aggregator = Aggregator::new(&config, Arc::new(ReqwestHttpClient::new()));

    match &cli.command {
        Command::Weather(args) => weather::run(args, &aggregator).await,
        Command::Energy(args) => energy::run(args, &aggregator).await,
        Command::Carbon(args) => carbon::run(args, &aggregator).await,
        Command::Certify(args) => certify::run(args, &aggregator).await,
        Command::Snapshot(args) => snapshot::run(args, &aggregator).await,
        Command::Refresh(args) => refresh::run(args, &aggregator).await,
        Command::Cache(args) => cache::run(args, &aggregator).await,
    }
}
