//! Composite market indicators blended from the three market domains.
//!
//! The blend is a fixed-weight scorecard, not a model: each input moves the
//! score by a constant amount and the result is clamped to its band.

use crate::domain::{
    CarbonCreditSnapshot, EnergyPriceSnapshot, MarketIndicators, WeatherCondition, WeatherSnapshot,
};
use crate::OracleError;

/// Blend the three domain snapshots into composite indicators.
///
/// Fails only on non-finite inputs, which indicate an upstream
/// normalization defect rather than a market condition.
pub fn blend(
    weather: &WeatherSnapshot,
    energy: &EnergyPriceSnapshot,
    carbon: &CarbonCreditSnapshot,
) -> Result<MarketIndicators, OracleError> {
    ensure_finite("weather.wind_speed", weather.wind_speed)?;
    ensure_finite("weather.cloud_cover", weather.cloud_cover)?;
    ensure_finite("energy.current_price", energy.current_price)?;
    ensure_finite("energy.price_change_percent", energy.price_change_percent)?;
    ensure_finite("carbon.current_price", carbon.current_price)?;

    let renewable_index = renewable_index(weather, energy);
    let carbon_intensity = carbon_intensity(energy.current_price, carbon.current_price);
    let sustainability_score = sustainability_score(renewable_index, carbon_intensity);

    Ok(MarketIndicators {
        renewable_index,
        carbon_intensity,
        sustainability_score,
    })
}

/// Favourability of current conditions for renewable generation, 0 to 100.
fn renewable_index(weather: &WeatherSnapshot, energy: &EnergyPriceSnapshot) -> f64 {
    let mut index: f64 = 50.0;
    if weather.condition == WeatherCondition::Clear {
        index += 20.0;
    }
    if weather.wind_speed > 5.0 {
        index += 15.0;
    }
    if weather.cloud_cover < 30.0 {
        index += 10.0;
    }
    if energy.current_price < 0.15 {
        index += 15.0;
    }
    if energy.price_change_percent < 0.0 {
        index += 10.0;
    }
    index.clamp(0.0, 100.0)
}

/// Estimated grid carbon intensity in gCO2/kWh, floored at zero.
fn carbon_intensity(energy_price: f64, carbon_price: f64) -> f64 {
    let intensity = 500.0 + (0.15 - energy_price) * 1_000.0 + (carbon_price - 25.0) * 10.0;
    intensity.max(0.0)
}

/// Weighted combination of the renewable index and inverted carbon
/// intensity, 0 to 100.
fn sustainability_score(renewable_index: f64, carbon_intensity: f64) -> f64 {
    let inverted_intensity = (1_000.0 - carbon_intensity) / 1_000.0 * 100.0;
    (renewable_index * 0.6 + inverted_intensity * 0.4).clamp(0.0, 100.0)
}

fn ensure_finite(field: &str, value: f64) -> Result<(), OracleError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(OracleError::aggregation_defect(format!(
            "non-finite indicator input: {field} = {value}"
        )))
    }
}
