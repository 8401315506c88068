use ecogrid_core::{Aggregator, EnergyType, Region};

use super::CommandResult;
use crate::cli::EnergyArgs;
use crate::error::CliError;

pub async fn run(args: &EnergyArgs, aggregator: &Aggregator) -> Result<CommandResult, CliError> {
    let region: Region = args.region.parse()?;
    let energy_type: EnergyType = args.energy_type.parse()?;

    let snapshot = aggregator.get_energy_prices(region, energy_type).await;
    Ok(CommandResult::ok(serde_json::to_value(snapshot)?))
}
