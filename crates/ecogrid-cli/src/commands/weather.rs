use ecogrid_core::{Aggregator, Coordinates, OracleConfig};

use super::CommandResult;
use crate::cli::WeatherArgs;
use crate::error::CliError;

pub async fn run(args: &WeatherArgs, aggregator: &Aggregator) -> Result<CommandResult, CliError> {
    let coords = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => Coordinates::new(lat, lon)?,
        (None, None) => OracleConfig::reference_coordinates(),
        (Some(lat), None) => Coordinates::new(lat, OracleConfig::reference_coordinates().longitude)?,
        (None, Some(lon)) => Coordinates::new(OracleConfig::reference_coordinates().latitude, lon)?,
    };

    let snapshot = aggregator.get_weather(coords).await;
    Ok(CommandResult::ok(serde_json::to_value(snapshot)?))
}
