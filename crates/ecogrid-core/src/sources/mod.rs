//! Per-domain source clients.
//!
//! Each client owns an [`HttpClient`](crate::http_client::HttpClient) handle
//! and a [`SourceConfig`](crate::config::SourceConfig). The public `fetch`
//! entry points are infallible: a live fetch that fails for any reason is
//! logged and replaced with a synthetic snapshot from [`crate::fallback`].
//! The fallible `fetch_live` variants exist so refresh runs can report
//! per-source failures.

use std::fmt::{Display, Formatter};

mod carbon;
mod certification;
mod energy;
mod weather;

pub use carbon::CarbonSourceClient;
pub use certification::CertificationSourceClient;
pub use energy::EnergySourceClient;
pub use weather::WeatherSourceClient;

/// Why a live fetch failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// No API key is configured for the source.
    Unconfigured,
    /// The transport failed: DNS, connect, timeout, TLS.
    Transport,
    /// The upstream answered with a non-success status.
    UpstreamStatus,
    /// The upstream body did not decode into the expected shape.
    Malformed,
}

/// Error from a single live source fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unconfigured(source: &str) -> Self {
        Self {
            kind: SourceErrorKind::Unconfigured,
            message: format!("{source} source has no API key configured"),
            retryable: false,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Transport,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn upstream_status(source: &str, status: u16) -> Self {
        Self {
            kind: SourceErrorKind::UpstreamStatus,
            message: format!("{source} upstream returned status {status}"),
            retryable: status >= 500 || status == 429,
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Malformed,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn is_retryable(&self) -> bool {
        self.retryable
    }

    /// Stable machine-readable code for logs and refresh reports.
    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unconfigured => "source.unconfigured",
            SourceErrorKind::Transport => "source.transport",
            SourceErrorKind::UpstreamStatus => "source.upstream_status",
            SourceErrorKind::Malformed => "source.malformed",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)
    }
}

impl std::error::Error for SourceError {}
