//! Integration tests for `PlacesClient` against a wiremock provider.
//!
//! Each test stands up its own local HTTP server so no real network traffic
//! is made. Covers the success statuses, continuation tokens, the details
//! endpoint, and every error variant a request can produce.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bizdir_places::{NearbyQuery, PlacesClient, PlacesError};

const TEST_KEY: &str = "secret-test-key";

fn test_client(server: &MockServer) -> PlacesClient {
    PlacesClient::with_base_url(TEST_KEY, 5, "bizdir-test/0.1", &server.uri())
        .expect("failed to build test PlacesClient")
}

fn restaurant_query() -> NearbyQuery {
    NearbyQuery {
        lat: 5.6037,
        lng: -0.187,
        radius_m: 15_000,
        place_type: "restaurant".to_string(),
    }
}

fn hit(place_id: &str, name: &str) -> serde_json::Value {
    json!({
        "place_id": place_id,
        "name": name,
        "vicinity": "East Legon",
        "geometry": {"location": {"lat": 5.63, "lng": -0.16}},
        "rating": 4.2,
        "photos": [{"photo_reference": format!("photo-{place_id}")}],
        "types": ["restaurant", "food", "point_of_interest"]
    })
}

// ---------------------------------------------------------------------------
// Nearby search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn nearby_search_sends_query_params_and_parses_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(query_param("location", "5.6037,-0.187"))
        .and(query_param("radius", "15000"))
        .and(query_param("type", "restaurant"))
        .and(query_param("key", TEST_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [hit("p1", "Buka Restaurant"), hit("p2", "Chop Bar")],
            "next_page_token": "token-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = test_client(&server)
        .nearby_search(&restaurant_query(), None)
        .await
        .expect("nearby search should succeed");

    assert_eq!(page.status, "OK");
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[0].name, "Buka Restaurant");
    assert_eq!(page.next_page_token.as_deref(), Some("token-2"));
}

#[tokio::test]
async fn nearby_search_forwards_page_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(query_param("pagetoken", "token-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [hit("p3", "Last Page Diner")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = test_client(&server)
        .nearby_search(&restaurant_query(), Some("token-2"))
        .await
        .expect("continuation page should succeed");

    assert_eq!(page.results.len(), 1);
    assert!(page.next_page_token.is_none());
}

#[tokio::test]
async fn zero_results_is_an_empty_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "ZERO_RESULTS", "results": []})),
        )
        .mount(&server)
        .await;

    let page = test_client(&server)
        .nearby_search(&restaurant_query(), None)
        .await
        .expect("ZERO_RESULTS is success");

    assert!(page.results.is_empty());
    assert!(page.next_page_token.is_none());
}

#[tokio::test]
async fn request_denied_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "results": []
        })))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .nearby_search(&restaurant_query(), None)
        .await
        .expect_err("REQUEST_DENIED must be an error");

    match err {
        PlacesError::Api { status, message } => {
            assert_eq!(status, "REQUEST_DENIED");
            assert_eq!(message, "The provided API key is invalid.");
        }
        other => panic!("expected PlacesError::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_maps_to_unexpected_status_without_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .nearby_search(&restaurant_query(), None)
        .await
        .expect_err("503 must be an error");

    assert!(
        matches!(err, PlacesError::UnexpectedStatus { status: 503, .. }),
        "expected UnexpectedStatus 503, got {err:?}"
    );
    assert!(!err.to_string().contains(TEST_KEY));
}

#[tokio::test]
async fn malformed_body_maps_to_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .nearby_search(&restaurant_query(), None)
        .await
        .expect_err("HTML body must be an error");

    assert!(
        matches!(err, PlacesError::Deserialize { .. }),
        "expected Deserialize, got {err:?}"
    );
}

#[tokio::test]
async fn unreachable_provider_maps_to_http_error_without_key() {
    // Nothing listens on port 1.
    let client = PlacesClient::with_base_url(TEST_KEY, 5, "bizdir-test/0.1", "http://127.0.0.1:1")
        .expect("failed to build test PlacesClient");

    let err = client
        .nearby_search(&restaurant_query(), None)
        .await
        .expect_err("closed port must be an error");

    assert!(matches!(err, PlacesError::Http(_)), "got {err:?}");
    assert!(!err.to_string().contains(TEST_KEY));
}

// ---------------------------------------------------------------------------
// Place details
// ---------------------------------------------------------------------------

#[tokio::test]
async fn place_details_requests_contact_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "p1"))
        .and(query_param("fields", "website,formatted_phone_number"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": {
                "website": "https://buka.example.com",
                "formatted_phone_number": "030 123 4567"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let details = test_client(&server)
        .place_details("p1")
        .await
        .expect("details should succeed");

    assert_eq!(details.website.as_deref(), Some("https://buka.example.com"));
    assert_eq!(details.formatted_phone_number.as_deref(), Some("030 123 4567"));
}

#[tokio::test]
async fn place_details_without_contact_fields_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "OK", "result": {}})),
        )
        .mount(&server)
        .await;

    let details = test_client(&server)
        .place_details("p1")
        .await
        .expect("details should succeed");

    assert!(details.website.is_none());
    assert!(details.formatted_phone_number.is_none());
}

#[tokio::test]
async fn place_details_not_found_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "NOT_FOUND"})))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .place_details("gone")
        .await
        .expect_err("NOT_FOUND must be an error");

    assert!(
        matches!(&err, PlacesError::Api { status, .. } if status == "NOT_FOUND"),
        "got {err:?}"
    );
}
