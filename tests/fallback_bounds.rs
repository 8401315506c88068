//! Bounds and provenance tests for synthetic fallback data, exercised
//! through an aggregator whose sources are entirely unconfigured.

use std::sync::Arc;

use ecogrid_core::{
    Aggregator, CarbonMarketType, CertificateId, EnergyType, NoopHttpClient, OracleConfig, Region,
    SourceTag,
};

fn unconfigured_aggregator() -> Aggregator {
    // Default config has no API keys, so every fetch degrades
    Aggregator::new(&OracleConfig::default(), Arc::new(NoopHttpClient))
}

#[tokio::test]
async fn unconfigured_sources_always_serve_tagged_fallback() {
    let aggregator = unconfigured_aggregator();
    let coords = OracleConfig::reference_coordinates();

    let weather = aggregator.get_weather(coords).await;
    let energy = aggregator
        .get_energy_prices(Region::SouthAmerica, EnergyType::Renewable)
        .await;
    let carbon = aggregator.get_carbon_credits(CarbonMarketType::Voluntary).await;

    assert_eq!(weather.source_tag, SourceTag::Mock);
    assert_eq!(energy.source_tag, SourceTag::Mock);
    assert_eq!(carbon.source_tag, SourceTag::Mock);
}

#[tokio::test]
async fn unconfigured_fallbacks_never_populate_the_cache() {
    let aggregator = unconfigured_aggregator();
    let coords = OracleConfig::reference_coordinates();

    aggregator.get_weather(coords).await;
    aggregator
        .get_energy_prices(Region::Europe, EnergyType::Mixed)
        .await;
    aggregator.get_carbon_credits(CarbonMarketType::Offset).await;

    assert_eq!(aggregator.cached_entries().await, 0);
}

#[tokio::test]
async fn fallback_weather_is_physically_plausible() {
    let aggregator = unconfigured_aggregator();
    let coords = OracleConfig::reference_coordinates();

    for _ in 0..20 {
        aggregator.clear_cache().await;
        let weather = aggregator.get_weather(coords).await;
        assert!((10.0..=40.0).contains(&weather.temperature));
        assert!((30.0..=90.0).contains(&weather.humidity));
        assert!((0.0..=100.0).contains(&weather.cloud_cover));
        assert!((0.0..=15.0).contains(&weather.wind_speed));
        assert!(weather.sunrise < weather.sunset);
    }
}

#[tokio::test]
async fn fallback_energy_prices_differ_by_segment() {
    let aggregator = unconfigured_aggregator();

    for _ in 0..20 {
        let renewable = aggregator
            .get_energy_prices(Region::Oceania, EnergyType::Renewable)
            .await;
        let conventional = aggregator
            .get_energy_prices(Region::Oceania, EnergyType::Conventional)
            .await;
        assert!((0.10..=0.14).contains(&renewable.current_price));
        assert!((0.13..=0.17).contains(&conventional.current_price));
    }
}

#[tokio::test]
async fn fallback_carbon_markets_keep_their_price_bands() {
    let aggregator = unconfigured_aggregator();

    for _ in 0..20 {
        let voluntary = aggregator.get_carbon_credits(CarbonMarketType::Voluntary).await;
        let compliance = aggregator.get_carbon_credits(CarbonMarketType::Compliance).await;
        let offset = aggregator.get_carbon_credits(CarbonMarketType::Offset).await;
        assert!((20.0..=30.0).contains(&voluntary.current_price));
        assert!((75.0..=95.0).contains(&compliance.current_price));
        assert!((9.0..=15.0).contains(&offset.current_price));
    }
}

#[tokio::test]
async fn fallback_certification_echoes_the_request_identity() {
    let aggregator = unconfigured_aggregator();
    let id = CertificateId::parse("REC-2024-077").expect("valid id");

    let record = aggregator.verify_certification(&id, "REGO").await;

    assert_eq!(record.source_tag, SourceTag::Mock);
    assert_eq!(record.certificate_id.as_str(), "REC-2024-077");
    assert_eq!(record.issuer, "REGO");
    assert!(record.is_valid);
    assert!((5.0..=500.0).contains(&record.capacity_mw));
}

#[tokio::test]
async fn fully_degraded_market_snapshot_still_blends() {
    let aggregator = unconfigured_aggregator();

    let snapshot = aggregator
        .get_market_snapshot(Region::NorthAmerica)
        .await
        .expect("fallback inputs are always finite");

    assert_eq!(snapshot.weather.source_tag, SourceTag::Mock);
    assert_eq!(snapshot.energy.source_tag, SourceTag::Mock);
    assert_eq!(snapshot.carbon.source_tag, SourceTag::Mock);
    assert!((0.0..=100.0).contains(&snapshot.indicators.renewable_index));
    assert!(snapshot.indicators.carbon_intensity >= 0.0);
    assert!((0.0..=100.0).contains(&snapshot.indicators.sustainability_score));
}
