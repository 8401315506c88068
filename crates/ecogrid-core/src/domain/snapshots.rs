use serde::{Deserialize, Serialize};

use super::timestamp::UtcTimestamp;
use super::types::{
    CarbonMarketType, CertificateId, CertificationStatus, EnergyType, Region, SourceTag,
    WeatherCondition,
};

/// Current-conditions weather snapshot for a coordinate.
///
/// Field names serialize in camelCase for wire compatibility with the
/// backend's existing API consumers; the same applies to every snapshot in
/// this module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    /// Air temperature, degrees Celsius.
    pub temperature: f64,
    /// Relative humidity, percent.
    pub humidity: f64,
    /// Surface pressure, hPa.
    pub pressure: f64,
    /// Wind speed, m/s.
    pub wind_speed: f64,
    /// Wind direction, degrees from north.
    pub wind_direction: f64,
    /// Cloud cover, percent.
    pub cloud_cover: f64,
    /// Visibility, metres.
    pub visibility: f64,
    pub uv_index: f64,
    pub condition: WeatherCondition,
    pub description: String,
    pub sunrise: UtcTimestamp,
    pub sunset: UtcTimestamp,
    pub timestamp: UtcTimestamp,
    pub source_tag: SourceTag,
}

/// Spot energy-price snapshot for a region/segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyPriceSnapshot {
    pub region: Region,
    pub energy_type: EnergyType,
    /// Currency per kWh.
    pub current_price: f64,
    pub currency: String,
    pub price_change_24h: f64,
    pub price_change_percent: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub high_24h: f64,
    pub low_24h: f64,
    pub timestamp: UtcTimestamp,
    pub source_tag: SourceTag,
}

/// Carbon-credit market snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonCreditSnapshot {
    pub market_type: CarbonMarketType,
    /// Currency per tCO2.
    pub current_price: f64,
    pub currency: String,
    pub price_change_24h: f64,
    pub volume: f64,
    pub market_cap: f64,
    pub available_credits: u64,
    pub retired_credits: u64,
    /// Average project vintage year.
    pub average_vintage: u16,
    /// Ordered by traded volume, largest first.
    pub top_projects: Vec<String>,
    pub timestamp: UtcTimestamp,
    pub source_tag: SourceTag,
}

/// Renewable-certification registry record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationRecord {
    pub certificate_id: CertificateId,
    pub issuer: String,
    pub is_valid: bool,
    pub status: CertificationStatus,
    pub issued_date: UtcTimestamp,
    pub expiry_date: UtcTimestamp,
    pub energy_source: String,
    /// Certified generation capacity, MW.
    pub capacity_mw: f64,
    pub location: String,
    pub owner: String,
    pub verification_hash: String,
    pub last_updated: UtcTimestamp,
    pub timestamp: UtcTimestamp,
    pub source_tag: SourceTag,
}

/// Weather subset embedded in the composite snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSummary {
    pub temperature: f64,
    pub condition: WeatherCondition,
    pub wind_speed: f64,
    pub cloud_cover: f64,
    pub source_tag: SourceTag,
}

impl From<&WeatherSnapshot> for WeatherSummary {
    fn from(snapshot: &WeatherSnapshot) -> Self {
        Self {
            temperature: snapshot.temperature,
            condition: snapshot.condition,
            wind_speed: snapshot.wind_speed,
            cloud_cover: snapshot.cloud_cover,
            source_tag: snapshot.source_tag,
        }
    }
}

/// Energy-price subset embedded in the composite snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergySummary {
    pub energy_type: EnergyType,
    pub current_price: f64,
    pub currency: String,
    pub price_change_percent: f64,
    pub source_tag: SourceTag,
}

impl From<&EnergyPriceSnapshot> for EnergySummary {
    fn from(snapshot: &EnergyPriceSnapshot) -> Self {
        Self {
            energy_type: snapshot.energy_type,
            current_price: snapshot.current_price,
            currency: snapshot.currency.clone(),
            price_change_percent: snapshot.price_change_percent,
            source_tag: snapshot.source_tag,
        }
    }
}

/// Carbon-market subset embedded in the composite snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonSummary {
    pub market_type: CarbonMarketType,
    pub current_price: f64,
    pub currency: String,
    pub source_tag: SourceTag,
}

impl From<&CarbonCreditSnapshot> for CarbonSummary {
    fn from(snapshot: &CarbonCreditSnapshot) -> Self {
        Self {
            market_type: snapshot.market_type,
            current_price: snapshot.current_price,
            currency: snapshot.currency.clone(),
            source_tag: snapshot.source_tag,
        }
    }
}

/// Composite indicators blended from three domains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketIndicators {
    /// Renewable-favorability index, 0-100.
    pub renewable_index: f64,
    /// Grid carbon-intensity estimate, gCO2/kWh equivalent, >= 0.
    pub carbon_intensity: f64,
    /// Blended sustainability score, 0-100.
    pub sustainability_score: f64,
}

/// Derived composite snapshot. Never cached or persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub region: Region,
    pub weather: WeatherSummary,
    pub energy: EnergySummary,
    pub carbon: CarbonSummary,
    pub indicators: MarketIndicators,
    pub timestamp: UtcTimestamp,
}
