//! Canonical domain types for the ecogrid oracle.
//!
//! All snapshots are immutable value objects: they are created fresh by a
//! source client or fallback generator and have no mutation path once
//! returned to a caller. Every snapshot carries a [`SourceTag`] so consumers
//! can tell live upstream data from synthetic fallback data.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`WeatherSnapshot`] | Current conditions for a coordinate |
//! | [`EnergyPriceSnapshot`] | Spot energy price for a region/segment |
//! | [`CarbonCreditSnapshot`] | Carbon-credit market state |
//! | [`CertificationRecord`] | Renewable-certification registry record |
//! | [`MarketSnapshot`] | Derived composite (never cached) |
//! | [`Coordinates`] | Validated lat/lon pair |
//! | [`CertificateId`] | Validated certificate identifier |
//! | [`UtcTimestamp`] | RFC3339 UTC timestamp |

mod snapshots;
mod timestamp;
mod types;

pub use snapshots::{
    CarbonCreditSnapshot, CarbonSummary, CertificationRecord, EnergyPriceSnapshot, EnergySummary,
    MarketIndicators, MarketSnapshot, WeatherSnapshot, WeatherSummary,
};
pub use timestamp::UtcTimestamp;
pub use types::{
    CarbonMarketType, CertificateId, CertificationStatus, Coordinates, EnergyType, Region,
    SourceTag, WeatherCondition,
};
