use ecogrid_core::{Aggregator, CarbonMarketType, EnergyType, Region};

use super::CommandResult;
use crate::cli::RefreshArgs;
use crate::error::CliError;

pub async fn run(args: &RefreshArgs, aggregator: &Aggregator) -> Result<CommandResult, CliError> {
    let region: Region = args.region.parse()?;
    let energy_type: EnergyType = args.energy_type.parse()?;
    let market: CarbonMarketType = args.market.parse()?;

    let report = aggregator
        .refresh_coordinator()
        .with_targets(region, energy_type, market)
        .update_all()
        .await;

    let errors = report.errors.clone();
    Ok(CommandResult::ok(serde_json::to_value(report)?).with_errors(errors))
}
