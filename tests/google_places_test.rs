use appinion::adapters::{GooglePlacesSource, PlacesQuery};
use appinion::core::ListingSource;
use appinion::core::price::{PriceEstimator, TierTable};
use appinion::core::value::ValueScorer;
use appinion::{AppinionError, Comparison, RankingEngine};
use httpmock::prelude::*;
use std::time::Duration;

fn source(server: &MockServer, max_results: usize) -> GooglePlacesSource {
    let query = PlacesQuery {
        location: None,
        language: "es".to_string(),
        max_results,
    };
    GooglePlacesSource::new("test-key".to_string(), query)
        .unwrap()
        .with_endpoint(server.url("/textsearch"))
        .with_page_delay(Duration::ZERO)
}

#[tokio::test]
async fn test_fetch_maps_places_to_listings() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/textsearch")
            .query_param("query", "fontanero")
            .query_param("key", "test-key")
            .query_param("language", "es");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "status": "OK",
                "results": [
                    {
                        "name": "Fontanería Rápida",
                        "rating": 4.6,
                        "user_ratings_total": 210,
                        "price_level": 2,
                        "place_id": "place-1",
                        "formatted_address": "Calle Mayor 1, Madrid"
                    },
                    {
                        "name": "Sin Reseñas",
                        "place_id": "place-2"
                    },
                    {
                        "name": "Tuberías García",
                        "rating": 4.3,
                        "user_ratings_total": 95
                    }
                ]
            }));
    });

    let listings = source(&server, 20).fetch("fontanero").await.unwrap();

    api_mock.assert();
    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].provider, "Fontanería Rápida");
    assert_eq!(listings[0].price_level, Some(2));
    assert_eq!(listings[0].price, None);
    assert_eq!(
        listings[0].link.as_deref(),
        Some("https://www.google.com/maps/place/?q=place_id:place-1")
    );
    assert_eq!(listings[1].provider, "Tuberías García");
    assert_eq!(listings[1].price_level, None);
}

#[tokio::test]
async fn test_fetch_follows_next_page_token() {
    let server = MockServer::start();
    let first_page = server.mock(|when, then| {
        when.method(GET)
            .path("/textsearch")
            .query_param("query", "mudanzas");
        then.status(200).json_body(serde_json::json!({
            "status": "OK",
            "next_page_token": "page-2",
            "results": [{"name": "Mudanzas Sol", "rating": 4.4, "user_ratings_total": 180}]
        }));
    });
    let second_page = server.mock(|when, then| {
        when.method(GET)
            .path("/textsearch")
            .query_param("pagetoken", "page-2");
        then.status(200).json_body(serde_json::json!({
            "status": "OK",
            "results": [{"name": "Traslados Luna", "rating": 4.6, "user_ratings_total": 76}]
        }));
    });

    let listings = source(&server, 20).fetch("mudanzas").await.unwrap();

    first_page.assert();
    second_page.assert();
    let names: Vec<&str> = listings.iter().map(|l| l.provider.as_str()).collect();
    assert_eq!(names, vec!["Mudanzas Sol", "Traslados Luna"]);
}

#[tokio::test]
async fn test_fetch_stops_at_max_results() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/textsearch");
        then.status(200).json_body(serde_json::json!({
            "status": "OK",
            "next_page_token": "more",
            "results": [
                {"name": "A", "rating": 4.0},
                {"name": "B", "rating": 4.1},
                {"name": "C", "rating": 4.2}
            ]
        }));
    });

    let listings = source(&server, 2).fetch("limpieza").await.unwrap();

    assert_eq!(api_mock.hits(), 1);
    assert_eq!(listings.len(), 2);
}

#[tokio::test]
async fn test_zero_results_is_empty() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/textsearch");
        then.status(200)
            .json_body(serde_json::json!({"status": "ZERO_RESULTS", "results": []}));
    });

    let listings = source(&server, 20).fetch("astrología").await.unwrap();
    assert!(listings.is_empty());
}

#[tokio::test]
async fn test_denied_request_is_upstream_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/textsearch");
        then.status(200).json_body(serde_json::json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        }));
    });

    let err = source(&server, 20).fetch("limpieza").await.unwrap_err();

    match err {
        AppinionError::UpstreamError { status, message } => {
            assert_eq!(status, "REQUEST_DENIED");
            assert_eq!(message, "The provided API key is invalid.");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_http_failure_is_api_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/textsearch");
        then.status(500);
    });

    let err = source(&server, 20).fetch("limpieza").await.unwrap_err();
    assert!(matches!(err, AppinionError::ApiError(_)));
}

#[tokio::test]
async fn test_places_comparison_uses_tier_estimates() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/textsearch");
        then.status(200).json_body(serde_json::json!({
            "status": "OK",
            "results": [
                {"name": "Caro", "rating": 4.9, "user_ratings_total": 40, "price_level": 4},
                {"name": "Barato", "rating": 4.0, "user_ratings_total": 12, "price_level": 1},
                {"name": "Sin Precio", "rating": 5.0, "user_ratings_total": 3}
            ]
        }));
    });

    let tiers = TierTable::new(&[5.0, 15.0, 30.0, 60.0, 100.0]).unwrap();
    let engine =
        RankingEngine::new(PriceEstimator::new(tiers), ValueScorer::default(), "EUR", 5).unwrap();
    let evaluation = Comparison::new(source(&server, 20), engine)
        .run("limpieza")
        .await
        .unwrap();

    let summary = &evaluation.summary;
    assert_eq!(summary.best_rated.as_ref().unwrap().provider(), "Sin Precio");
    assert_eq!(summary.cheapest.as_ref().unwrap().provider(), "Barato");
    assert_eq!(summary.best_value.as_ref().unwrap().provider(), "Barato");
    assert_eq!(summary.detailed.len(), 2);
    assert!(summary.detailed[0]
        .estimated_price
        .as_ref()
        .unwrap()
        .is_approximate());
}
