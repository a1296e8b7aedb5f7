use std::sync::Arc;
use std::time::Duration;

use aerofare_api::{app, AppState};
use aerofare_catalog::airlines::AirlineCatalog;
use aerofare_catalog::airports::AirportCatalog;
use aerofare_catalog::geo::RoutePolicy;
use aerofare_core::pricing::PricingConfiguration;
use aerofare_offer::generator::FlightOfferAssembler;
use aerofare_store::ConfigResolver;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

fn test_app() -> Router {
    let state = AppState {
        resolver: Arc::new(ConfigResolver::new(Vec::new(), Duration::from_millis(100))),
        airports: Arc::new(AirportCatalog::embedded().unwrap()),
        route_policy: Arc::new(RoutePolicy::default()),
        assembler: Arc::new(FlightOfferAssembler::new(AirlineCatalog::default())),
        redis: None,
        max_offers: 6,
    };
    app(state)
}

async fn send_get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn send_json(app: &Router, method: &str, uri: &str, body: &Value) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn header(response: &Response, name: &str) -> String {
    response
        .headers()
        .get(name)
        .expect(name)
        .to_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = test_app();

    let response = send_get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn pricing_defaults_are_served_with_their_source_named() {
    let app = test_app();

    let response = send_get(&app, "/v1/admin/pricing").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "x-pricing-source"), "default");

    let body = body_json(response).await;
    assert_eq!(body["regionPricing"][0]["region"], "Domestic");
    assert_eq!(
        body["regionPricing"][0]["mediumHaul"][0]["minPrice"],
        json!(1400.0)
    );
    let business = body["serviceClasses"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == "Business")
        .expect("Business class");
    assert_eq!(business["multiplier"], json!(2.1));
    assert!(body["lastUpdated"].is_string());
}

#[tokio::test]
async fn pricing_updates_land_in_cache_and_survive_reads() {
    let app = test_app();

    let mut custom = PricingConfiguration::default();
    custom.region_pricing[0].medium_haul[0].route = "Domestic medium haul v2".to_string();
    let payload = serde_json::to_value(&custom).unwrap();

    let response = send_json(&app, "POST", "/v1/admin/pricing", &payload).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "x-pricing-source"), "cache");
    assert_eq!(header(&response, "x-pricing-durable"), "false");
    let body = body_json(response).await;
    assert!(body["lastUpdated"].is_string());

    let response = send_get(&app, "/v1/admin/pricing").await;
    assert_eq!(header(&response, "x-pricing-source"), "cache");
    let body = body_json(response).await;
    assert_eq!(
        body["regionPricing"][0]["mediumHaul"][0]["route"],
        "Domestic medium haul v2"
    );
}

#[tokio::test]
async fn pricing_rejects_documents_missing_a_table() {
    let app = test_app();

    let payload = json!({ "regionPricing": [] });
    let response = send_json(&app, "POST", "/v1/admin/pricing", &payload).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("invalid pricing document"), "{message}");

    // A rejected write must not disturb the active document.
    let response = send_get(&app, "/v1/admin/pricing").await;
    assert_eq!(header(&response, "x-pricing-source"), "default");
}

#[tokio::test]
async fn pricing_rejects_inverted_bands() {
    let app = test_app();

    let mut custom = PricingConfiguration::default();
    custom.region_pricing[0].medium_haul[0].min_price = 2000.0;
    let payload = serde_json::to_value(&custom).unwrap();

    let response = send_json(&app, "POST", "/v1/admin/pricing", &payload).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Domestic"));
}

#[tokio::test]
async fn pricing_reset_restores_the_builtin_table() {
    let app = test_app();

    let mut custom = PricingConfiguration::default();
    custom.region_pricing[0].medium_haul[0].route = "Domestic medium haul v2".to_string();
    let payload = serde_json::to_value(&custom).unwrap();
    let response = send_json(&app, "POST", "/v1/admin/pricing", &payload).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/v1/admin/pricing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "x-pricing-source"), "cache");

    let response = send_get(&app, "/v1/admin/pricing").await;
    let body = body_json(response).await;
    assert_eq!(
        body["regionPricing"][0]["mediumHaul"][0]["route"],
        "Domestic medium haul"
    );
}

#[tokio::test]
async fn quotes_return_ranked_offers_for_a_domestic_route() {
    let app = test_app();

    let payload = json!({
        "fromCode": "JFK",
        "toCode": "LAX",
        "serviceClass": "Business",
        "tripType": "Round Trip",
        "departureDate": "2026-09-15",
        "passengers": 2
    });
    let response = send_json(&app, "POST", "/v1/quotes", &payload).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body["route"]["fromCode"], "JFK");
    assert_eq!(body["route"]["toCode"], "LAX");
    assert_eq!(body["route"]["region"], "Domestic");
    assert_eq!(body["route"]["category"], "mediumHaul");
    let distance = body["route"]["distanceKm"].as_f64().unwrap();
    assert!((3950.0..4000.0).contains(&distance), "distance {distance}");

    let flights = body["flights"].as_array().unwrap();
    assert_eq!(flights.len(), 6);
    let mut previous = i64::MIN;
    for flight in flights {
        let price = flight["price"].as_i64().unwrap();
        assert!(price >= previous, "offers must be sorted by price");
        previous = price;
        // Domestic medium haul in Business on a round trip stays inside the
        // band envelope scaled by the class and premium multipliers.
        assert!((2000..=5000).contains(&price), "price {price}");
        assert!(flight["totalPrice"].as_i64().unwrap() > price);
        Uuid::parse_str(flight["id"].as_str().unwrap()).expect("offer id is a uuid");
        assert!(flight["duration"].as_str().unwrap().contains('h'));
    }
}

#[tokio::test]
async fn quotes_omit_totals_for_a_single_traveller() {
    let app = test_app();

    let payload = json!({
        "fromCode": "teb",
        "toCode": "mia",
        "serviceClass": "First class",
        "tripType": "One-way",
        "departureDate": "2026-10-01"
    });
    let response = send_json(&app, "POST", "/v1/quotes", &payload).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    for flight in body["flights"].as_array().unwrap() {
        assert!(flight.get("totalPrice").is_none());
    }
}

#[tokio::test]
async fn quotes_reject_unknown_airports() {
    let app = test_app();

    let payload = json!({
        "fromCode": "XX",
        "toCode": "LAX",
        "serviceClass": "Economy",
        "tripType": "Round Trip",
        "departureDate": "2026-09-15"
    });
    let response = send_json(&app, "POST", "/v1/quotes", &payload).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("XX"));
}

#[tokio::test]
async fn quotes_reject_zero_passengers() {
    let app = test_app();

    let payload = json!({
        "fromCode": "JFK",
        "toCode": "LAX",
        "serviceClass": "Economy",
        "tripType": "Round Trip",
        "departureDate": "2026-09-15",
        "passengers": 0
    });
    let response = send_json(&app, "POST", "/v1/quotes", &payload).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn airport_lookup_is_case_insensitive() {
    let app = test_app();

    let response = send_get(&app, "/v1/airports/lhr").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["code"], "LHR");
    assert_eq!(body["country"], "United Kingdom");

    let response = send_get(&app, "/v1/airports/ZZZ").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
