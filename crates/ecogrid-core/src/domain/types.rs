use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const CERTIFICATE_ID_MIN_LEN: usize = 5;
const CERTIFICATE_ID_MAX_LEN: usize = 50;

/// Provenance tag carried by every snapshot: live upstream data or synthetic
/// fallback data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceTag {
    Live,
    Mock,
}

impl SourceTag {
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Live)
    }
}

/// Normalized weather condition bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherCondition {
    Clear,
    Clouds,
    Rain,
    Snow,
    Mist,
}

impl WeatherCondition {
    pub const ALL: [Self; 5] = [
        Self::Clear,
        Self::Clouds,
        Self::Rain,
        Self::Snow,
        Self::Mist,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Clouds => "Clouds",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Mist => "Mist",
        }
    }

    /// Map an upstream condition token onto the five-value enum. Unknown
    /// tokens normalize to `Mist` rather than failing the fetch.
    pub fn normalize(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "clear" => Self::Clear,
            "clouds" => Self::Clouds,
            "rain" | "drizzle" | "thunderstorm" => Self::Rain,
            "snow" => Self::Snow,
            _ => Self::Mist,
        }
    }
}

impl Display for WeatherCondition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Energy market segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyType {
    Renewable,
    Conventional,
    Mixed,
}

impl EnergyType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Renewable => "renewable",
            Self::Conventional => "conventional",
            Self::Mixed => "mixed",
        }
    }
}

impl Display for EnergyType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnergyType {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "renewable" => Ok(Self::Renewable),
            "conventional" => Ok(Self::Conventional),
            "mixed" => Ok(Self::Mixed),
            other => Err(ValidationError::InvalidEnergyType {
                value: other.to_owned(),
            }),
        }
    }
}

/// Grid region used by the energy-market domain and the composite snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Europe,
    NorthAmerica,
    SouthAmerica,
    AsiaPacific,
    Oceania,
}

impl Region {
    pub const ALL: [Self; 5] = [
        Self::Europe,
        Self::NorthAmerica,
        Self::SouthAmerica,
        Self::AsiaPacific,
        Self::Oceania,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Europe => "europe",
            Self::NorthAmerica => "north_america",
            Self::SouthAmerica => "south_america",
            Self::AsiaPacific => "asia_pacific",
            Self::Oceania => "oceania",
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "europe" => Ok(Self::Europe),
            "north_america" => Ok(Self::NorthAmerica),
            "south_america" => Ok(Self::SouthAmerica),
            "asia_pacific" => Ok(Self::AsiaPacific),
            "oceania" => Ok(Self::Oceania),
            other => Err(ValidationError::InvalidRegion {
                value: other.to_owned(),
            }),
        }
    }
}

/// Carbon-credit market segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarbonMarketType {
    Voluntary,
    Compliance,
    Offset,
}

impl CarbonMarketType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Voluntary => "voluntary",
            Self::Compliance => "compliance",
            Self::Offset => "offset",
        }
    }
}

impl Display for CarbonMarketType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarbonMarketType {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "voluntary" => Ok(Self::Voluntary),
            "compliance" => Ok(Self::Compliance),
            "offset" => Ok(Self::Offset),
            other => Err(ValidationError::InvalidCarbonMarket {
                value: other.to_owned(),
            }),
        }
    }
}

/// Renewable-certification lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificationStatus {
    Active,
    Expired,
    Unknown,
}

impl CertificationStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Unknown => "unknown",
        }
    }

    pub fn normalize(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "active" => Self::Active,
            "expired" => Self::Expired,
            _ => Self::Unknown,
        }
    }
}

impl Display for CertificationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated geographic coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !latitude.is_finite() {
            return Err(ValidationError::NonFiniteCoordinate { field: "latitude" });
        }
        if !longitude.is_finite() {
            return Err(ValidationError::NonFiniteCoordinate {
                field: "longitude",
            });
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::LatitudeOutOfRange { value: latitude });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::LongitudeOutOfRange { value: longitude });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Validated renewable-certificate identifier (5-50 characters, printable
/// ASCII identifier charset).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CertificateId(String);

impl CertificateId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let len = trimmed.chars().count();
        if !(CERTIFICATE_ID_MIN_LEN..=CERTIFICATE_ID_MAX_LEN).contains(&len) {
            return Err(ValidationError::CertificateIdLength {
                len,
                min: CERTIFICATE_ID_MIN_LEN,
                max: CERTIFICATE_ID_MAX_LEN,
            });
        }

        for (index, ch) in trimmed.chars().enumerate() {
            let valid = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == '.';
            if !valid {
                return Err(ValidationError::CertificateIdInvalidChar { ch, index });
            }
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CertificateId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for CertificateId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for CertificateId {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<CertificateId> for String {
    fn from(value: CertificateId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_reject_out_of_range_latitude() {
        let err = Coordinates::new(91.0, 0.0).expect_err("must fail");
        assert!(matches!(err, ValidationError::LatitudeOutOfRange { .. }));
    }

    #[test]
    fn coordinates_reject_non_finite() {
        let err = Coordinates::new(f64::NAN, 0.0).expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::NonFiniteCoordinate { field: "latitude" }
        ));
    }

    #[test]
    fn certificate_id_enforces_length_bounds() {
        assert!(CertificateId::parse("ab").is_err());
        assert!(CertificateId::parse(&"x".repeat(51)).is_err());
        let id = CertificateId::parse(" REC-2025-0042 ").expect("must parse");
        assert_eq!(id.as_str(), "REC-2025-0042");
    }

    #[test]
    fn certificate_id_rejects_invalid_chars() {
        let err = CertificateId::parse("REC 2025").expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::CertificateIdInvalidChar { ch: ' ', .. }
        ));
    }

    #[test]
    fn region_round_trips_via_from_str() {
        for region in Region::ALL {
            assert_eq!(region.as_str().parse::<Region>().expect("parses"), region);
        }
    }

    #[test]
    fn unknown_weather_condition_normalizes_to_mist() {
        assert_eq!(WeatherCondition::normalize("Tornado"), WeatherCondition::Mist);
        assert_eq!(WeatherCondition::normalize("drizzle"), WeatherCondition::Rain);
    }
}
