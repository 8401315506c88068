//! Source configuration resolved from the process environment.
//!
//! Each upstream gets an `ECOGRID_<DOMAIN>_API_KEY` and an optional
//! `ECOGRID_<DOMAIN>_BASE_URL` override. A missing key leaves the source
//! unconfigured; clients then serve fallback data instead of failing.

use std::time::Duration;

use crate::domain::Coordinates;

/// Default cache TTL for live snapshots.
pub const DEFAULT_TTL_SECS: u64 = 300;

/// Certification records change rarely; they stay cached for an hour.
pub const CERTIFICATION_TTL_SECS: u64 = 3_600;

/// Per-request upstream fetch timeout.
pub const FETCH_TIMEOUT_MS: u64 = 10_000;

/// Reference coordinates used for composite market snapshots
/// (São Paulo, a representative renewable-heavy grid region).
pub const REFERENCE_COORDINATES: (f64, f64) = (-23.5505, -46.6333);

pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_ENERGY_BASE_URL: &str = "https://api.gridmarket.io/v1";
pub const DEFAULT_CARBON_BASE_URL: &str = "https://api.carbonregistry.io/v1";
pub const DEFAULT_CERTIFICATION_BASE_URL: &str = "https://api.recregistry.io/v1";

/// Connection settings for one upstream source.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl SourceConfig {
    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
        }
    }

    /// True when the source has an API key and live fetches may be attempted.
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    fn from_env(domain: &str, default_base_url: &str) -> Self {
        let api_key = std::env::var(format!("ECOGRID_{domain}_API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty());
        let base_url = std::env::var(format!("ECOGRID_{domain}_BASE_URL"))
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| default_base_url.to_string());
        Self { api_key, base_url }
    }
}

/// Complete oracle configuration: one [`SourceConfig`] per domain plus
/// cache and timeout knobs.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    pub weather: SourceConfig,
    pub energy: SourceConfig,
    pub carbon: SourceConfig,
    pub certification: SourceConfig,
    pub default_ttl: Duration,
    pub certification_ttl: Duration,
    pub fetch_timeout_ms: u64,
}

impl OracleConfig {
    /// Resolve configuration from `ECOGRID_*` environment variables,
    /// falling back to the public base URLs and default TTLs.
    pub fn from_env() -> Self {
        Self {
            weather: SourceConfig::from_env("WEATHER", DEFAULT_WEATHER_BASE_URL),
            energy: SourceConfig::from_env("ENERGY", DEFAULT_ENERGY_BASE_URL),
            carbon: SourceConfig::from_env("CARBON", DEFAULT_CARBON_BASE_URL),
            certification: SourceConfig::from_env("CERTIFICATION", DEFAULT_CERTIFICATION_BASE_URL),
            default_ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            certification_ttl: Duration::from_secs(CERTIFICATION_TTL_SECS),
            fetch_timeout_ms: FETCH_TIMEOUT_MS,
        }
    }

    /// Reference location used when blending the composite snapshot.
    pub fn reference_coordinates() -> Coordinates {
        let (lat, lon) = REFERENCE_COORDINATES;
        // The constants are in range; fall back to the equator if they are
        // ever edited out of it.
        Coordinates::new(lat, lon).unwrap_or(Coordinates {
            latitude: 0.0,
            longitude: 0.0,
        })
    }
}

impl Default for OracleConfig {
    /// Unconfigured sources with default URLs. Every fetch degrades to
    /// fallback data, which is the posture tests want.
    fn default() -> Self {
        Self {
            weather: SourceConfig::new(None, DEFAULT_WEATHER_BASE_URL),
            energy: SourceConfig::new(None, DEFAULT_ENERGY_BASE_URL),
            carbon: SourceConfig::new(None, DEFAULT_CARBON_BASE_URL),
            certification: SourceConfig::new(None, DEFAULT_CERTIFICATION_BASE_URL),
            default_ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            certification_ttl: Duration::from_secs(CERTIFICATION_TTL_SECS),
            fetch_timeout_ms: FETCH_TIMEOUT_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_unconfigured() {
        let config = OracleConfig::default();
        assert!(!config.weather.is_configured());
        assert!(!config.energy.is_configured());
        assert!(!config.carbon.is_configured());
        assert!(!config.certification.is_configured());
        assert_eq!(config.default_ttl, Duration::from_secs(300));
        assert_eq!(config.certification_ttl, Duration::from_secs(3_600));
    }

    #[test]
    fn blank_api_key_counts_as_unconfigured() {
        let config = SourceConfig::new(Some("   ".to_string()), DEFAULT_WEATHER_BASE_URL);
        assert!(!config.is_configured());
        let config = SourceConfig::new(Some("demo-key".to_string()), DEFAULT_WEATHER_BASE_URL);
        assert!(config.is_configured());
    }

    #[test]
    fn reference_coordinates_are_valid() {
        let coords = OracleConfig::reference_coordinates();
        assert!((coords.latitude - -23.5505).abs() < 1e-9);
        assert!((coords.longitude - -46.6333).abs() < 1e-9);
    }
}
