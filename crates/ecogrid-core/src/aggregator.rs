//! The aggregation facade: cached, degradation-tolerant reads across all
//! four domains, plus the composite market snapshot.
//!
//! Read path per domain: cache hit, else live fetch, else synthetic
//! fallback. Only live results are written back to the cache, so degraded
//! data never outlives the request that produced it.

use std::sync::Arc;

use crate::cache::CacheStore;
use crate::config::OracleConfig;
use crate::domain::{
    CarbonCreditSnapshot, CarbonMarketType, CarbonSummary, CertificateId, CertificationRecord,
    Coordinates, EnergyPriceSnapshot, EnergySummary, EnergyType, MarketSnapshot, Region,
    UtcTimestamp, WeatherSnapshot, WeatherSummary,
};
use crate::http_client::HttpClient;
use crate::indicators;
use crate::refresh::RefreshCoordinator;
use crate::sources::{
    CarbonSourceClient, CertificationSourceClient, EnergySourceClient, WeatherSourceClient,
};
use crate::OracleError;

pub(crate) fn weather_key(coords: Coordinates) -> String {
    format!("weather:{:.4}:{:.4}", coords.latitude, coords.longitude)
}

pub(crate) fn energy_key(region: Region, energy_type: EnergyType) -> String {
    format!("energy:{region}:{energy_type}")
}

pub(crate) fn carbon_key(market_type: CarbonMarketType) -> String {
    format!("carbon:{market_type}")
}

pub(crate) fn certification_key(certificate_id: &CertificateId, issuer: &str) -> String {
    format!(
        "certification:{}:{}",
        issuer.trim().to_ascii_lowercase(),
        certificate_id.as_str()
    )
}

/// Cached multi-domain data aggregator.
#[derive(Clone)]
pub struct Aggregator {
    cache: CacheStore,
    weather: WeatherSourceClient,
    energy: EnergySourceClient,
    carbon: CarbonSourceClient,
    certification: CertificationSourceClient,
    certification_ttl: std::time::Duration,
}

impl Aggregator {
    pub fn new(config: &OracleConfig, http: Arc<dyn HttpClient>) -> Self {
        let cache = CacheStore::new(config.default_ttl);
        let timeout_ms = config.fetch_timeout_ms;
        Self {
            weather: WeatherSourceClient::new(http.clone(), config.weather.clone(), timeout_ms),
            energy: EnergySourceClient::new(http.clone(), config.energy.clone(), timeout_ms),
            carbon: CarbonSourceClient::new(http.clone(), config.carbon.clone(), timeout_ms),
            certification: CertificationSourceClient::new(
                http,
                config.certification.clone(),
                timeout_ms,
            ),
            certification_ttl: config.certification_ttl,
            cache,
        }
    }

    /// Current weather at `coords`, served from cache when fresh.
    pub async fn get_weather(&self, coords: Coordinates) -> WeatherSnapshot {
        let key = weather_key(coords);
        if let Some(snapshot) = self.cache.get_json::<WeatherSnapshot>(&key).await {
            tracing::debug!(%key, "weather served from cache");
            return snapshot;
        }
        let snapshot = self.weather.fetch(coords).await;
        if snapshot.source_tag.is_live() {
            self.cache.put_json(key, &snapshot, None).await;
        }
        snapshot
    }

    /// Current energy pricing for a region, served from cache when fresh.
    pub async fn get_energy_prices(
        &self,
        region: Region,
        energy_type: EnergyType,
    ) -> EnergyPriceSnapshot {
        let key = energy_key(region, energy_type);
        if let Some(snapshot) = self.cache.get_json::<EnergyPriceSnapshot>(&key).await {
            tracing::debug!(%key, "energy prices served from cache");
            return snapshot;
        }
        let snapshot = self.energy.fetch(region, energy_type).await;
        if snapshot.source_tag.is_live() {
            self.cache.put_json(key, &snapshot, None).await;
        }
        snapshot
    }

    /// Current carbon credit pricing for a market, served from cache when
    /// fresh.
    pub async fn get_carbon_credits(&self, market_type: CarbonMarketType) -> CarbonCreditSnapshot {
        let key = carbon_key(market_type);
        if let Some(snapshot) = self.cache.get_json::<CarbonCreditSnapshot>(&key).await {
            tracing::debug!(%key, "carbon credits served from cache");
            return snapshot;
        }
        let snapshot = self.carbon.fetch(market_type).await;
        if snapshot.source_tag.is_live() {
            self.cache.put_json(key, &snapshot, None).await;
        }
        snapshot
    }

    /// Verification record for one certificate. Registry data changes
    /// rarely, so live records stay cached for the certification TTL.
    pub async fn verify_certification(
        &self,
        certificate_id: &CertificateId,
        issuer: &str,
    ) -> CertificationRecord {
        let key = certification_key(certificate_id, issuer);
        if let Some(record) = self.cache.get_json::<CertificationRecord>(&key).await {
            tracing::debug!(%key, "certification served from cache");
            return record;
        }
        let record = self.certification.fetch(certificate_id, issuer).await;
        if record.source_tag.is_live() {
            self.cache
                .put_json(key, &record, Some(self.certification_ttl))
                .await;
        }
        record
    }

    /// Composite snapshot for one region: weather at the reference
    /// location, renewable energy pricing, voluntary carbon pricing, and
    /// the blended indicators. Each constituent degrades independently.
    pub async fn get_market_snapshot(&self, region: Region) -> Result<MarketSnapshot, OracleError> {
        let coords = OracleConfig::reference_coordinates();
        let (weather, energy, carbon) = tokio::join!(
            self.get_weather(coords),
            self.get_energy_prices(region, EnergyType::Renewable),
            self.get_carbon_credits(CarbonMarketType::Voluntary),
        );

        let indicators = indicators::blend(&weather, &energy, &carbon)?;
        Ok(MarketSnapshot {
            region,
            weather: WeatherSummary::from(&weather),
            energy: EnergySummary::from(&energy),
            carbon: CarbonSummary::from(&carbon),
            indicators,
            timestamp: UtcTimestamp::now(),
        })
    }

    /// Drop every cache entry, expired or not.
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
        tracing::info!("aggregator cache cleared");
    }

    /// Number of entries currently cached, expired entries included.
    pub async fn cached_entries(&self) -> usize {
        self.cache.len().await
    }

    /// A refresh coordinator sharing this aggregator's cache and clients.
    pub fn refresh_coordinator(&self) -> RefreshCoordinator {
        RefreshCoordinator::new(
            self.cache.clone(),
            self.weather.clone(),
            self.energy.clone(),
            self.carbon.clone(),
        )
    }
}
