use thiserror::Error;

/// Validation and contract errors exposed by `ecogrid-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("latitude {value} out of range [-90, 90]")]
    LatitudeOutOfRange { value: f64 },
    #[error("longitude {value} out of range [-180, 180]")]
    LongitudeOutOfRange { value: f64 },
    #[error("coordinate component '{field}' must be finite")]
    NonFiniteCoordinate { field: &'static str },

    #[error("certificate id length {len} outside [{min}, {max}]")]
    CertificateIdLength {
        len: usize,
        min: usize,
        max: usize,
    },
    #[error("certificate id contains invalid character '{ch}' at index {index}")]
    CertificateIdInvalidChar { ch: char, index: usize },

    #[error("invalid region '{value}', expected one of europe, north_america, south_america, asia_pacific, oceania")]
    InvalidRegion { value: String },
    #[error("invalid energy type '{value}', expected one of renewable, conventional, mixed")]
    InvalidEnergyType { value: String },
    #[error("invalid carbon market '{value}', expected one of voluntary, compliance, offset")]
    InvalidCarbonMarket { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },
}

/// Top-level error type for oracle operations.
///
/// Single-domain getters never return this: source failures are absorbed by
/// the fallback path. Only the composite blending step can surface
/// `AggregationDefect`, and only input parsing can surface `Validation`.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("aggregation defect: {detail}")]
    AggregationDefect { detail: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl OracleError {
    pub fn aggregation_defect(detail: impl Into<String>) -> Self {
        Self::AggregationDefect {
            detail: detail.into(),
        }
    }
}
