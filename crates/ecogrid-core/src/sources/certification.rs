use std::sync::Arc;

use serde::Deserialize;

use super::SourceError;
use crate::config::SourceConfig;
use crate::domain::{
    CertificateId, CertificationRecord, CertificationStatus, SourceTag, UtcTimestamp,
};
use crate::fallback;
use crate::http_client::{HttpClient, HttpRequest};

/// Client for the renewable-certification registry upstream.
#[derive(Clone)]
pub struct CertificationSourceClient {
    http: Arc<dyn HttpClient>,
    config: SourceConfig,
    timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CertificationResponse {
    #[serde(default)]
    status: String,
    issued_at: i64,
    expires_at: i64,
    #[serde(default)]
    energy_source: String,
    #[serde(default)]
    capacity_mw: f64,
    #[serde(default)]
    location: String,
    #[serde(default)]
    owner: String,
    #[serde(default)]
    verification_hash: String,
    updated_at: i64,
}

impl CertificationSourceClient {
    pub fn new(http: Arc<dyn HttpClient>, config: SourceConfig, timeout_ms: u64) -> Self {
        Self {
            http,
            config,
            timeout_ms,
        }
    }

    /// Verification record for one certificate; degrades to a synthetic
    /// record when the live fetch fails.
    pub async fn fetch(&self, certificate_id: &CertificateId, issuer: &str) -> CertificationRecord {
        match self.fetch_live(certificate_id, issuer).await {
            Ok(record) => record,
            Err(error) => {
                tracing::warn!(code = error.code(), message = error.message(), "certification fetch degraded to fallback");
                fallback::certification_record(certificate_id, issuer)
            }
        }
    }

    pub async fn fetch_live(
        &self,
        certificate_id: &CertificateId,
        issuer: &str,
    ) -> Result<CertificationRecord, SourceError> {
        let Some(api_key) = self.config.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            return Err(SourceError::unconfigured("certification"));
        };

        let url = format!(
            "{}/certificates/{}?issuer={}&key={}",
            self.config.base_url,
            urlencoding::encode(certificate_id.as_str()),
            urlencoding::encode(issuer),
            urlencoding::encode(api_key)
        );
        let request = HttpRequest::get(url).with_timeout_ms(self.timeout_ms);
        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| SourceError::transport(e.message().to_string()))?;
        if !response.is_success() {
            return Err(SourceError::upstream_status("certification", response.status));
        }

        let parsed: CertificationResponse = serde_json::from_str(&response.body)
            .map_err(|e| SourceError::malformed(format!("certification body: {e}")))?;
        Self::normalize(certificate_id, issuer, parsed)
    }

    fn normalize(
        certificate_id: &CertificateId,
        issuer: &str,
        response: CertificationResponse,
    ) -> Result<CertificationRecord, SourceError> {
        let issued_date = UtcTimestamp::from_unix_seconds(response.issued_at)
            .map_err(|e| SourceError::malformed(format!("certification issued date: {e}")))?;
        let expiry_date = UtcTimestamp::from_unix_seconds(response.expires_at)
            .map_err(|e| SourceError::malformed(format!("certification expiry date: {e}")))?;
        let last_updated = UtcTimestamp::from_unix_seconds(response.updated_at)
            .map_err(|e| SourceError::malformed(format!("certification update time: {e}")))?;
        let now = UtcTimestamp::now();

        // Validity is derived here, never trusted from the upstream flag:
        // the record must be active and unexpired at observation time.
        let status = CertificationStatus::normalize(&response.status);
        let is_valid = status == CertificationStatus::Active && expiry_date > now;

        Ok(CertificationRecord {
            certificate_id: certificate_id.clone(),
            issuer: issuer.to_string(),
            is_valid,
            status,
            issued_date,
            expiry_date,
            energy_source: response.energy_source,
            capacity_mw: response.capacity_mw,
            location: response.location,
            owner: response.owner,
            verification_hash: response.verification_hash,
            last_updated,
            timestamp: now,
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

    fn body(status: &str, expires_at: i64) -> String {
        format!(
            r#"{{
                "status": "{status}",
                "issuedAt": 1600000000,
                "expiresAt": {expires_at},
                "energySource": "Solar",
                "capacityMw": 120.0,
                "location": "Atacama, Chile",
                "owner": "Andes Renewables",
                "verificationHash": "2f3a9c",
                "updatedAt": 1700020000
            }}"#
        )
    }

    fn client(result: Result<HttpResponse, HttpError>) -> CertificationSourceClient {
        CertificationSourceClient::new(
            Arc::new(CannedHttpClient { result }),
            SourceConfig::new(Some("demo-key".to_string()), "https://certs.test"),
            FETCH_TIMEOUT_MS,
        )
    }

    fn certificate_id() -> CertificateId {
        CertificateId::parse("REC-2024-001").expect("valid id")
    }

    #[tokio::test]
    async fn active_unexpired_record_is_valid() {
        let far_future = UtcTimestamp::now().unix_seconds() + 86_400 * 365;
        let client = client(Ok(HttpResponse::ok_json(body("active", far_future))));
        let record = client
            .fetch_live(&certificate_id(), "I-REC")
            .await
            .expect("live fetch");
        assert!(record.is_valid);
        assert_eq!(record.status, CertificationStatus::Active);
        assert_eq!(record.energy_source, "Solar");
        assert_eq!(record.source_tag, SourceTag::Live);
    }

    #[tokio::test]
    async fn active_but_expired_record_is_invalid() {
        let client = client(Ok(HttpResponse::ok_json(body("active", 1650000000))));
        let record = client
            .fetch_live(&certificate_id(), "I-REC")
            .await
            .expect("live fetch");
        assert!(!record.is_valid);
        assert_eq!(record.status, CertificationStatus::Active);
    }

    #[tokio::test]
    async fn unknown_status_token_normalizes_to_unknown() {
        let far_future = UtcTimestamp::now().unix_seconds() + 86_400;
        let client = client(Ok(HttpResponse::ok_json(body("pending_review", far_future))));
        let record = client
            .fetch_live(&certificate_id(), "I-REC")
            .await
            .expect("live fetch");
        assert_eq!(record.status, CertificationStatus::Unknown);
        assert!(!record.is_valid);
    }

    #[tokio::test]
    async fn registry_failure_degrades_to_mock_record() {
        let client = client(Err(HttpError::timeout("deadline exceeded")));
        let record = client.fetch(&certificate_id(), "I-REC").await;
        assert_eq!(record.source_tag, SourceTag::Mock);
        assert_eq!(record.certificate_id.as_str(), "REC-2024-001");
        assert_eq!(record.issuer, "I-REC");
    }
}
