use serde_json::json;

use ecogrid_core::Aggregator;

use super::CommandResult;
use crate::cli::{CacheArgs, CacheCommand};
use crate::error::CliError;

pub async fn run(args: &CacheArgs, aggregator: &Aggregator) -> Result<CommandResult, CliError> {
    match args.command {
        CacheCommand::Clear => {
            aggregator.clear_cache().await;
            Ok(CommandResult::ok(json!({ "cleared": true })))
        }
        CacheCommand::Stats => {
            let entries = aggregator.cached_entries().await;
            Ok(CommandResult::ok(json!({ "entries": entries })))
        }
    }
}
