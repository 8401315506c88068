//! # EcoGrid Core
//!
//! Aggregation engine for the EcoGrid renewable-energy data oracle.
//!
//! ## Overview
//!
//! This crate provides the foundational components for EcoGrid:
//!
//! - **Canonical domain models** for weather, energy pricing, carbon
//!   credits, and renewable certifications
//! - **TTL cache** shared across all read paths
//! - **Source clients** with live-fetch and synthetic-fallback degradation
//! - **Composite indicators** blended from the three market domains
//! - **Refresh coordination** with partial-failure reporting
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`aggregator`] | Cached multi-domain read facade |
//! | [`cache`] | TTL cache store |
//! | [`config`] | Environment-driven source configuration |
//! | [`domain`] | Domain models and validated newtypes |
//! | [`error`] | Core error types |
//! | [`fallback`] | Synthetic snapshot generation |
//! | [`http_client`] | HTTP client abstraction |
//! | [`indicators`] | Composite indicator blending |
//! | [`refresh`] | Bulk cache refresh with partial-failure tolerance |
//! | [`sources`] | Per-domain upstream clients |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ecogrid_core::{Aggregator, OracleConfig, Region, ReqwestHttpClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = OracleConfig::from_env();
//!     let aggregator = Aggregator::new(&config, Arc::new(ReqwestHttpClient::new()));
//!
//!     let snapshot = aggregator.get_market_snapshot(Region::SouthAmerica).await?;
//!     println!("renewable index: {:.1}", snapshot.indicators.renewable_index);
//!
//!     Ok(())
//! }
//! ```

pub mod aggregator;
pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod fallback;
pub mod http_client;
pub mod indicators;
pub mod refresh;
pub mod sources;

pub use aggregator::Aggregator;
pub use cache::CacheStore;
pub use config::{OracleConfig, SourceConfig};
pub use domain::{
    CarbonCreditSnapshot, CarbonMarketType, CarbonSummary, CertificateId, CertificationRecord,
    CertificationStatus, Coordinates, EnergyPriceSnapshot, EnergySummary, EnergyType,
    MarketIndicators, MarketSnapshot, Region, SourceTag, UtcTimestamp, WeatherCondition,
    WeatherSnapshot, WeatherSummary,
};
pub use error::{OracleError, ValidationError};
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient};
pub use refresh::{RefreshCoordinator, RefreshReport};
pub use sources::{
    CarbonSourceClient, CertificationSourceClient, EnergySourceClient, SourceError,
    SourceErrorKind, WeatherSourceClient,
};
