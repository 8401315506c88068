use std::sync::Arc;

use serde::Deserialize;

use super::SourceError;
use crate::config::SourceConfig;
use crate::domain::{EnergyPriceSnapshot, EnergyType, Region, SourceTag, UtcTimestamp};
use crate::fallback;
use crate::http_client::{HttpClient, HttpRequest};

/// Client for the regional energy-price upstream.
#[derive(Clone)]
pub struct EnergySourceClient {
    http: Arc<dyn HttpClient>,
    config: SourceConfig,
    timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnergyPriceResponse {
    price: f64,
    #[serde(default = "default_currency")]
    currency: String,
    #[serde(default)]
    change_24h: f64,
    #[serde(default)]
    change_percent_24h: f64,
    #[serde(default)]
    market_cap: f64,
    #[serde(default)]
    volume_24h: f64,
    #[serde(default)]
    high_24h: Option<f64>,
    #[serde(default)]
    low_24h: Option<f64>,
    updated_at: i64,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl EnergySourceClient {
    pub fn new(http: Arc<dyn HttpClient>, config: SourceConfig, timeout_ms: u64) -> Self {
        Self {
            http,
            config,
            timeout_ms,
        }
    }

    /// Current pricing for a region and energy type; degrades to a synthetic
    /// snapshot when the live fetch fails.
    pub async fn fetch(&self, region: Region, energy_type: EnergyType) -> EnergyPriceSnapshot {
        match self.fetch_live(region, energy_type).await {
            Ok(snapshot) => snapshot,
            Err(error) => {
                tracing::warn!(code = error.code(), message = error.message(), "energy fetch degraded to fallback");
                fallback::energy_snapshot(region, energy_type)
            }
        }
    }

    pub async fn fetch_live(
        &self,
        region: Region,
        energy_type: EnergyType,
    ) -> Result<EnergyPriceSnapshot, SourceError> {
        let Some(api_key) = self.config.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            return Err(SourceError::unconfigured("energy"));
        };

        let url = format!(
            "{}/prices?region={}&type={}&key={}",
            self.config.base_url,
            urlencoding::encode(region.as_str()),
            urlencoding::encode(energy_type.as_str()),
            urlencoding::encode(api_key)
        );
        let request = HttpRequest::get(url).with_timeout_ms(self.timeout_ms);
        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| SourceError::transport(e.message().to_string()))?;
        if !response.is_success() {
            return Err(SourceError::upstream_status("energy", response.status));
        }

        let parsed: EnergyPriceResponse = serde_json::from_str(&response.body)
            .map_err(|e| SourceError::malformed(format!("energy body: {e}")))?;
        Self::normalize(region, energy_type, parsed)
    }

    fn normalize(
        region: Region,
        energy_type: EnergyType,
        response: EnergyPriceResponse,
    ) -> Result<EnergyPriceSnapshot, SourceError> {
        let timestamp = UtcTimestamp::from_unix_seconds(response.updated_at)
            .map_err(|e| SourceError::malformed(format!("energy timestamp: {e}")))?;
        Ok(EnergyPriceSnapshot {
            region,
            energy_type,
            current_price: response.price,
            currency: response.currency,
            price_change_24h: response.change_24h,
            price_change_percent: response.change_percent_24h,
            market_cap: response.market_cap,
            volume_24h: response.volume_24h,
            high_24h: response.high_24h.unwrap_or(response.price),
            low_24h: response.low_24h.unwrap_or(response.price),
            timestamp,
            source_tag: SourceTag::Live,
        })
    }
}
