use ecogrid_core::{Aggregator, Region};

use super::CommandResult;
use crate::cli::SnapshotArgs;
use crate::error::CliError;

pub async fn run(args: &SnapshotArgs, aggregator: &Aggregator) -> Result<CommandResult, CliError> {
    let region: Region = args.region.parse()?;

    let snapshot = aggregator.get_market_snapshot(region).await?;
    Ok(CommandResult::ok(serde_json::to_value(snapshot)?))
}
