use std::sync::Arc;

use serde::Deserialize;

use super::SourceError;
use crate::config::SourceConfig;
use crate::domain::{CarbonCreditSnapshot, CarbonMarketType, SourceTag, UtcTimestamp};
use crate::fallback;
use crate::http_client::{HttpClient, HttpRequest};

/// Client for the carbon-credit registry upstream.
#[derive(Clone)]
pub struct CarbonSourceClient {
    http: Arc<dyn HttpClient>,
    config: SourceConfig,
    timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CarbonCreditResponse {
    price: f64,
    #[serde(default = "default_currency")]
    currency: String,
    #[serde(default)]
    change_24h: f64,
    #[serde(default)]
    volume: f64,
    #[serde(default)]
    market_cap: f64,
    #[serde(default)]
    available_credits: u64,
    #[serde(default)]
    retired_credits: u64,
    #[serde(default = "default_vintage")]
    average_vintage: u16,
    #[serde(default)]
    top_projects: Vec<String>,
    updated_at: i64,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_vintage() -> u16 {
    2020
}

impl CarbonSourceClient {
    pub fn new(http: Arc<dyn HttpClient>, config: SourceConfig, timeout_ms: u64) -> Self {
        Self {
            http,
            config,
            timeout_ms,
        }
    }

    /// Current credit pricing for a market; degrades to a synthetic snapshot
    /// when the live fetch fails.
    pub async fn fetch(&self, market_type: CarbonMarketType) -> CarbonCreditSnapshot {
        match self.fetch_live(market_type).await {
            Ok(snapshot) => snapshot,
            Err(error) => {
                tracing::warn!(code = error.code(), message = error.message(), "carbon fetch degraded to fallback");
                fallback::carbon_snapshot(market_type)
            }
        }
    }

    pub async fn fetch_live(
        &self,
        market_type: CarbonMarketType,
    ) -> Result<CarbonCreditSnapshot, SourceError> {
        let Some(api_key) = self.config.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            return Err(SourceError::unconfigured("carbon"));
        };

        let url = format!(
            "{}/credits?market={}&key={}",
            self.config.base_url,
            urlencoding::encode(market_type.as_str()),
            urlencoding::encode(api_key)
        );
        let request = HttpRequest::get(url).with_timeout_ms(self.timeout_ms);
        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| SourceError::transport(e.message().to_string()))?;
        if !response.is_success() {
            return Err(SourceError::upstream_status("carbon", response.status));
        }

        let parsed: CarbonCreditResponse = serde_json::from_str(&response.body)
            .map_err(|e| SourceError::malformed(format!("carbon body: {e}")))?;
        Self::normalize(market_type, parsed)
    }

    fn normalize(
        market_type: CarbonMarketType,
        response: CarbonCreditResponse,
    ) -> Result<CarbonCreditSnapshot, SourceError> {
        let timestamp = UtcTimestamp::from_unix_seconds(response.updated_at)
            .map_err(|e| SourceError::malformed(format!("carbon timestamp: {e}")))?;
        Ok(CarbonCreditSnapshot {
            market_type,
            current_price: response.price,
            currency: response.currency,
            price_change_24h: response.change_24h,
            volume: response.volume,
            market_cap: response.market_cap,
            available_credits: response.available_credits,
            retired_credits: response.retired_credits,
            average_vintage: response.average_vintage,
            top_projects: response.top_projects,
            timestamp,
            source_tag: SourceTag::Live,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FETCH_TIMEOUT_MS;
    use crate::http_client::{HttpError, HttpResponse};
    use std::future::Future;
    use std::pin::Pin;

    struct CannedHttpClient {
        result: Result<HttpResponse, HttpError>,
    }

    impl HttpClient for CannedHttpClient {
        fn execute<'a>(
            &'a self,
            _request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            let result = self.result.clone();
            Box::pin(async move { result })
        }

        fn is_mock(&self) -> bool {
            true
        }
    }

    const BODY: &str = r#"{
        "price": 27.6,
        "currency": "USD",
        "change24h": 1.2,
        "volume": 480000.0,
        "marketCap": 820000000.0,
        "availableCredits": 2400000,
        "retiredCredits": 310000,
        "averageVintage": 2021,
        "topProjects": ["Rimba Raya REDD+", "Katingan Peatland"],
        "updatedAt": 1700020000
    }"#;

    fn client(result: Result<HttpResponse, HttpError>) -> CarbonSourceClient {
        CarbonSourceClient::new(
            Arc::new(CannedHttpClient { result }),
            SourceConfig::new(Some("demo-key".to_string()), "https://carbon.test"),
            FETCH_TIMEOUT_MS,
        )
    }

    #[tokio::test]
    async fn live_response_normalizes_to_a_live_snapshot() {
        let client = client(Ok(HttpResponse::ok_json(BODY)));
        let snapshot = client
            .fetch_live(CarbonMarketType::Voluntary)
            .await
            .expect("live fetch");
        assert_eq!(snapshot.market_type, CarbonMarketType::Voluntary);
        assert_eq!(snapshot.current_price, 27.6);
        assert_eq!(snapshot.available_credits, 2_400_000);
        assert_eq!(snapshot.average_vintage, 2021);
        assert_eq!(snapshot.top_projects.len(), 2);
        assert_eq!(snapshot.source_tag, SourceTag::Live);
    }

    #[tokio::test]
    async fn sparse_body_fills_defaults() {
        let body = r#"{"price": 84.0, "updatedAt": 1700020000}"#;
        let client = client(Ok(HttpResponse::ok_json(body)));
        let snapshot = client
            .fetch_live(CarbonMarketType::Compliance)
            .await
            .expect("live fetch");
        assert_eq!(snapshot.currency, "USD");
        assert_eq!(snapshot.average_vintage, 2020);
        assert!(snapshot.top_projects.is_empty());
    }

    #[tokio::test]
    async fn upstream_failure_degrades_to_mock_snapshot() {
        let client = client(Err(HttpError::new("connection refused")));
        let snapshot = client.fetch(CarbonMarketType::Offset).await;
        assert_eq!(snapshot.source_tag, SourceTag::Mock);
        assert_eq!(snapshot.market_type, CarbonMarketType::Offset);
    }
}
