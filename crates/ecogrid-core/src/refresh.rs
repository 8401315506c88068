//! Bulk cache refresh across the three market domains.
//!
//! A refresh run fetches weather, energy, and carbon concurrently and
//! tolerates partial failure: each source that succeeds repopulates the
//! cache under its standard key, each source that fails contributes one
//! error message and a `null` field in the report.

use serde::Serialize;

use crate::cache::CacheStore;
use crate::config::OracleConfig;
use crate::domain::{
    CarbonCreditSnapshot, CarbonMarketType, EnergyPriceSnapshot, EnergyType, Region,
    UtcTimestamp, WeatherSnapshot,
};
use crate::sources::{CarbonSourceClient, EnergySourceClient, WeatherSourceClient};

/// Outcome of one [`RefreshCoordinator::update_all`] run.
///
/// Every `None` field has exactly one corresponding entry in `errors`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshReport {
    pub weather: Option<WeatherSnapshot>,
    pub energy: Option<EnergyPriceSnapshot>,
    pub carbon: Option<CarbonCreditSnapshot>,
    pub errors: Vec<String>,
    pub completed_at: UtcTimestamp,
}

impl RefreshReport {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Runs live fetches for the refreshable domains and repopulates the cache.
#[derive(Clone)]
pub struct RefreshCoordinator {
    cache: CacheStore,
    weather: WeatherSourceClient,
    energy: EnergySourceClient,
    carbon: CarbonSourceClient,
    region: Region,
    energy_type: EnergyType,
    market_type: CarbonMarketType,
}

impl RefreshCoordinator {
    pub(crate) fn new(
        cache: CacheStore,
        weather: WeatherSourceClient,
        energy: EnergySourceClient,
        carbon: CarbonSourceClient,
    ) -> Self {
        Self {
            cache,
            weather,
            energy,
            carbon,
            region: Region::SouthAmerica,
            energy_type: EnergyType::Renewable,
            market_type: CarbonMarketType::Voluntary,
        }
    }

    /// Change which region, energy type, and carbon market a refresh covers.
    pub fn with_targets(
        mut self,
        region: Region,
        energy_type: EnergyType,
        market_type: CarbonMarketType,
    ) -> Self {
        self.region = region;
        self.energy_type = energy_type;
        self.market_type = market_type;
        self
    }

    /// Fetch all refreshable domains live and report per-source outcomes.
    ///
    /// Fallback generation is deliberately not used here: a refresh exists
    /// to repopulate the cache with live data, and caching synthetic data
    /// would mask source outages for a full TTL window.
    pub async fn update_all(&self) -> RefreshReport {
        let coords = OracleConfig::reference_coordinates();
        let (weather, energy, carbon) = tokio::join!(
            self.weather.fetch_live(coords),
            self.energy.fetch_live(self.region, self.energy_type),
            self.carbon.fetch_live(self.market_type),
        );

        let mut errors = Vec::new();

        let weather = match weather {
            Ok(snapshot) => {
                self.cache
                    .put_json(crate::aggregator::weather_key(coords), &snapshot, None)
                    .await;
                Some(snapshot)
            }
            Err(error) => {
                errors.push(format!("weather: {error}"));
                None
            }
        };

        let energy = match energy {
            Ok(snapshot) => {
                self.cache
                    .put_json(
                        crate::aggregator::energy_key(self.region, self.energy_type),
                        &snapshot,
                        None,
                    )
                    .await;
                Some(snapshot)
            }
            Err(error) => {
                errors.push(format!("energy: {error}"));
                None
            }
        };

        let carbon = match carbon {
            Ok(snapshot) => {
                self.cache
                    .put_json(crate::aggregator::carbon_key(self.market_type), &snapshot, None)
                    .await;
                Some(snapshot)
            }
            Err(error) => {
                errors.push(format!("carbon: {error}"));
                None
            }
        };

        let report = RefreshReport {
            weather,
            energy,
            carbon,
            errors,
            completed_at: UtcTimestamp::now(),
        };
        let refreshed = report.weather.is_some() as usize
            + report.energy.is_some() as usize
            + report.carbon.is_some() as usize;
        tracing::info!(refreshed, failed = report.errors.len(), "refresh run finished");
        report
    }
}
