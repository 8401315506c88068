use std::sync::Arc;

use serde::Deserialize;

use super::SourceError;
use crate::config::SourceConfig;
use crate::domain::{Coordinates, SourceTag, UtcTimestamp, WeatherCondition, WeatherSnapshot};
use crate::fallback;
use crate::http_client::{HttpClient, HttpRequest};

/// Client for the current-conditions weather upstream.
#[derive(Clone)]
pub struct WeatherSourceClient {
    http: Arc<dyn HttpClient>,
    config: SourceConfig,
    timeout_ms: u64,
}

// ============================================================================
// Upstream response shape
// ============================================================================

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: WeatherMain,
    #[serde(default)]
    wind: WeatherWind,
    #[serde(default)]
    clouds: WeatherClouds,
    #[serde(default)]
    visibility: Option<f64>,
    #[serde(default)]
    weather: Vec<WeatherDescriptor>,
    #[serde(default)]
    sys: WeatherSys,
    dt: i64,
    #[serde(default)]
    uvi: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WeatherMain {
    temp: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Default, Deserialize)]
struct WeatherWind {
    #[serde(default)]
    speed: f64,
    #[serde(default)]
    deg: f64,
}

#[derive(Debug, Default, Deserialize)]
struct WeatherClouds {
    #[serde(default)]
    all: f64,
}

#[derive(Debug, Deserialize)]
struct WeatherDescriptor {
    #[serde(default)]
    main: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Default, Deserialize)]
struct WeatherSys {
    #[serde(default)]
    sunrise: Option<i64>,
    #[serde(default)]
    sunset: Option<i64>,
}

impl WeatherSourceClient {
    pub fn new(http: Arc<dyn HttpClient>, config: SourceConfig, timeout_ms: u64) -> Self {
        Self {
            http,
            config,
            timeout_ms,
        }
    }

    /// Current weather at `coords`; degrades to a synthetic snapshot when
    /// the live fetch fails.
    pub async fn fetch(&self, coords: Coordinates) -> WeatherSnapshot {
        match self.fetch_live(coords).await {
            Ok(snapshot) => snapshot,
            Err(error) => {
                tracing::warn!(code = error.code(), message = error.message(), "weather fetch degraded to fallback");
                fallback::weather_snapshot()
            }
        }
    }

    /// Current weather at `coords`, live only.
    pub async fn fetch_live(&self, coords: Coordinates) -> Result<WeatherSnapshot, SourceError> {
        let Some(api_key) = self.config.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            return Err(SourceError::unconfigured("weather"));
        };

        let url = format!(
            "{}/weather?lat={}&lon={}&units=metric&appid={}",
            self.config.base_url,
            coords.latitude,
            coords.longitude,
            urlencoding::encode(api_key)
        );
        let request = HttpRequest::get(url).with_timeout_ms(self.timeout_ms);
        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| SourceError::transport(e.message().to_string()))?;
        if !response.is_success() {
            return Err(SourceError::upstream_status("weather", response.status));
        }

        let parsed: WeatherResponse = serde_json::from_str(&response.body)
            .map_err(|e| SourceError::malformed(format!("weather body: {e}")))?;
        Self::normalize(parsed)
    }

    /// One normalization point between the upstream shape and the snapshot.
    fn normalize(response: WeatherResponse) -> Result<WeatherSnapshot, SourceError> {
        let timestamp = UtcTimestamp::from_unix_seconds(response.dt)
            .map_err(|e| SourceError::malformed(format!("weather timestamp: {e}")))?;
        let descriptor = response.weather.first();
        let condition = descriptor
            .map(|d| WeatherCondition::normalize(&d.main))
            .unwrap_or(WeatherCondition::Mist);
        let description = descriptor
            .map(|d| d.description.clone())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| condition.as_str().to_ascii_lowercase());

        let mark = |seconds: Option<i64>| match seconds {
            Some(s) => UtcTimestamp::from_unix_seconds(s)
                .map_err(|e| SourceError::malformed(format!("weather sun time: {e}"))),
            None => Ok(timestamp),
        };

        Ok(WeatherSnapshot {
            temperature: response.main.temp,
            humidity: response.main.humidity,
            pressure: response.main.pressure,
            wind_speed: response.wind.speed,
            wind_direction: response.wind.deg,
            cloud_cover: response.clouds.all,
            visibility: response.visibility.unwrap_or(10_000.0),
            uv_index: response.uvi.unwrap_or(0.0),
            condition,
            description,
            sunrise: mark(response.sys.sunrise)?,
            sunset: mark(response.sys.sunset)?,
            timestamp,
            source_tag: SourceTag::Live,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FETCH_TIMEOUT_MS;
    use crate::http_client::{HttpError, HttpResponse, NoopHttpClient};
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
        "main": {"temp": 27.4, "humidity": 62.0, "pressure": 1013.0},
        "wind": {"speed": 6.2, "deg": 140.0},
        "clouds": {"all": 18.0},
        "visibility": 9000,
        "weather": [{"main": "Clear", "description": "clear sky"}],
        "sys": {"sunrise": 1700000000, "sunset": 1700043200},
        "dt": 1700020000,
        "uvi": 7.1
    }"#;

    fn client(result: Result<HttpResponse, HttpError>) -> WeatherSourceClient {
        WeatherSourceClient::new(
            Arc::new(CannedHttpClient { result }),
            SourceConfig::new(Some("demo-key".to_string()), "https://weather.test"),
            FETCH_TIMEOUT_MS,
        )
    }

    fn coords() -> Coordinates {
        Coordinates::new(-23.5505, -46.6333).expect("valid coordinates")
    }

    #[tokio::test]
    async fn live_response_normalizes_to_a_live_snapshot() {
        let client = client(Ok(HttpResponse::ok_json(BODY)));
        let snapshot = client.fetch_live(coords()).await.expect("live fetch");
        assert_eq!(snapshot.temperature, 27.4);
        assert_eq!(snapshot.condition, WeatherCondition::Clear);
        assert_eq!(snapshot.description, "clear sky");
        assert_eq!(snapshot.visibility, 9000.0);
        assert_eq!(snapshot.source_tag, SourceTag::Live);
        assert!(snapshot.sunrise < snapshot.sunset);
    }

    #[tokio::test]
    async fn unknown_condition_token_normalizes_to_mist() {
        let body = BODY.replace("\"Clear\"", "\"Sandstorm\"");
        let client = client(Ok(HttpResponse::ok_json(body)));
        let snapshot = client.fetch_live(coords()).await.expect("live fetch");
        assert_eq!(snapshot.condition, WeatherCondition::Mist);
    }

    #[tokio::test]
    async fn missing_api_key_is_unconfigured() {
        let client = WeatherSourceClient::new(
            Arc::new(NoopHttpClient),
            SourceConfig::new(None, "https://weather.test"),
            FETCH_TIMEOUT_MS,
        );
        let error = client.fetch_live(coords()).await.expect_err("unconfigured");
        assert_eq!(error.code(), "source.unconfigured");
    }

    #[tokio::test]
    async fn transport_failure_degrades_to_mock_snapshot() {
        let client = client(Err(HttpError::timeout("deadline exceeded")));
        let snapshot = client.fetch(coords()).await;
        assert_eq!(snapshot.source_tag, SourceTag::Mock);
    }

    #[tokio::test]
    async fn upstream_error_status_is_reported() {
        let client = client(Ok(HttpResponse {
            status: 502,
            body: "bad gateway".to_string(),
        }));
        let error = client.fetch_live(coords()).await.expect_err("status error");
        assert_eq!(error.code(), "source.upstream_status");
        assert!(error.is_retryable());
    }
}
