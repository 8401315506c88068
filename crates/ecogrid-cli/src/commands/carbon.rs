use ecogrid_core::{Aggregator, CarbonMarketType};

use super::CommandResult;
use crate::cli::CarbonArgs;
use crate::error::CliError;

pub async fn run(args: &CarbonArgs, aggregator: &Aggregator) -> Result<CommandResult, CliError> {
    let market: CarbonMarketType = args.market.parse()?;

    let snapshot = aggregator.get_carbon_credits(market).await;
    Ok(CommandResult::ok(serde_json::to_value(snapshot)?))
}
