//! Mathematical correctness tests for the composite indicators, driven
//! end-to-end through the aggregator with hand-built upstream bodies.

use std::sync::Arc;

use ecogrid_core::Region;
use ecogrid_tests::{
    test_aggregator, Canned, RecordingHttpClient, CARBON_BASE, ENERGY_BASE, WEATHER_BASE,
};

fn weather_body(condition: &str, wind: f64, clouds: f64) -> String {
    format!(
        r#"{{
            "main": {{"temp": 25.0, "humidity": 60.0, "pressure": 1013.0}},
            "wind": {{"speed": {wind}, "deg": 90.0}},
            "clouds": {{"all": {clouds}}},
            "visibility": 10000,
            "weather": [{{"main": "{condition}", "description": "test"}}],
            "sys": {{"sunrise": 1700000000, "sunset": 1700043200}},
            "dt": 1700020000
        }}"#
    )
}

fn energy_body(price: f64, change_percent: f64) -> String {
    format!(r#"{{"price": {price}, "changePercent24h": {change_percent}, "updatedAt": 1700020000}}"#)
}

fn carbon_body(price: f64) -> String {
    format!(r#"{{"price": {price}, "updatedAt": 1700020000}}"#)
}

async fn indicators_for(
    condition: &str,
    wind: f64,
    clouds: f64,
    energy_price: f64,
    change_percent: f64,
    carbon_price: f64,
) -> ecogrid_core::MarketIndicators {
    let http = Arc::new(RecordingHttpClient::new());
    http.route(WEATHER_BASE, Canned::Ok(weather_body(condition, wind, clouds)));
    http.route(ENERGY_BASE, Canned::Ok(energy_body(energy_price, change_percent)));
    http.route(CARBON_BASE, Canned::Ok(carbon_body(carbon_price)));
    let aggregator = test_aggregator(http);

    aggregator
        .get_market_snapshot(Region::SouthAmerica)
        .await
        .expect("blend succeeds")
        .indicators
}

#[tokio::test]
async fn every_renewable_bonus_applied_saturates_at_one_hundred() {
    // 50 + 20 (clear) + 15 (wind) + 10 (clouds) + 15 (price) + 10 (falling)
    let indicators = indicators_for("Clear", 6.0, 20.0, 0.12, -1.0, 25.0).await;
    assert_eq!(indicators.renewable_index, 100.0);
}

#[tokio::test]
async fn no_bonus_leaves_the_renewable_baseline() {
    let indicators = indicators_for("Rain", 2.0, 80.0, 0.20, 3.0, 25.0).await;
    assert_eq!(indicators.renewable_index, 50.0);
}

#[tokio::test]
async fn bonuses_are_independent_and_additive() {
    // Wind bonus only
    let wind_only = indicators_for("Rain", 6.0, 80.0, 0.20, 3.0, 25.0).await;
    assert_eq!(wind_only.renewable_index, 65.0);

    // Wind plus cheap energy
    let wind_and_price = indicators_for("Rain", 6.0, 80.0, 0.12, 3.0, 25.0).await;
    assert_eq!(wind_and_price.renewable_index, 80.0);
}

#[tokio::test]
async fn boundary_values_earn_no_bonus() {
    // wind == 5, clouds == 30, price == 0.15, change == 0 are all exclusive
    let indicators = indicators_for("Clouds", 5.0, 30.0, 0.15, 0.0, 25.0).await;
    assert_eq!(indicators.renewable_index, 50.0);
}

#[tokio::test]
async fn carbon_intensity_combines_both_price_terms() {
    // 500 + (0.15 - 0.118) * 1000 + (27.6 - 25) * 10 = 558
    let indicators = indicators_for("Clear", 6.0, 20.0, 0.118, -1.0, 27.6).await;
    assert!((indicators.carbon_intensity - 558.0).abs() < 1e-9);
}

#[tokio::test]
async fn expensive_energy_lowers_carbon_intensity() {
    // 500 + (0.15 - 0.2) * 1000 + 0 = 450
    let indicators = indicators_for("Rain", 2.0, 80.0, 0.20, 3.0, 25.0).await;
    assert!((indicators.carbon_intensity - 450.0).abs() < 1e-9);
}

#[tokio::test]
async fn carbon_intensity_never_goes_negative() {
    let indicators = indicators_for("Rain", 2.0, 80.0, 2.0, 0.0, 1.0).await;
    assert_eq!(indicators.carbon_intensity, 0.0);
}

#[tokio::test]
async fn sustainability_weights_are_sixty_forty() {
    // renewable 100, intensity 558:
    // 100 * 0.6 + ((1000 - 558) / 1000 * 100) * 0.4 = 77.68
    let indicators = indicators_for("Clear", 6.0, 20.0, 0.118, -1.0, 27.6).await;
    assert!((indicators.sustainability_score - 77.68).abs() < 1e-9);
}

#[tokio::test]
async fn snapshot_serializes_with_camel_case_wire_names() {
    let http = Arc::new(RecordingHttpClient::healthy());
    let aggregator = test_aggregator(http);

    let snapshot = aggregator
        .get_market_snapshot(Region::SouthAmerica)
        .await
        .expect("blend succeeds");
    let value = serde_json::to_value(&snapshot).expect("snapshot serializes");

    assert!(value["indicators"]["renewableIndex"].is_number());
    assert!(value["indicators"]["carbonIntensity"].is_number());
    assert!(value["indicators"]["sustainabilityScore"].is_number());
    assert_eq!(value["weather"]["sourceTag"], "Live");
    assert_eq!(value["region"], "south_america");
}
