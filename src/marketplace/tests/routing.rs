use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::marketplace::router::marketplace_router;
use crate::marketplace::tests::common::{read_json_body, seeded_service};

fn app() -> Router {
    marketplace_router(Arc::new(seeded_service()))
}

fn get(uri: &str) -> Request<Body> {
    match Request::builder().uri(uri).body(Body::empty()) {
        Ok(request) => request,
        Err(error) => panic!("request build failed: {error}"),
    }
}

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    let body = match serde_json::to_vec(payload) {
        Ok(bytes) => bytes,
        Err(error) => panic!("payload serialization failed: {error}"),
    };
    match Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
    {
        Ok(request) => request,
        Err(error) => panic!("request build failed: {error}"),
    }
}

async fn send(app: Router, request: Request<Body>) -> axum::response::Response {
    match app.oneshot(request).await {
        Ok(response) => response,
        Err(error) => panic!("router call failed: {error}"),
    }
}

#[tokio::test]
async fn listing_index_returns_the_whole_catalog() {
    let response = send(app(), get("/api/v1/listings")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let listings = body
        .get("listings")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    assert_eq!(listings.len(), 10);
}

#[tokio::test]
async fn listing_lookup_by_id_round_trips() {
    let response = send(app(), get("/api/v1/listings/1")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body.get("id").and_then(Value::as_str), Some("1"));
    assert_eq!(
        body.get("title").and_then(Value::as_str),
        Some("Modern Studio in Koreatown")
    );
}

#[tokio::test]
async fn unknown_listing_id_is_a_404() {
    let response = send(app(), get("/api/v1/listings/nope")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert_eq!(body.get("listing_id").and_then(Value::as_str), Some("nope"));
}

#[tokio::test]
async fn creating_a_listing_extracts_requirements_from_the_text() {
    let payload = json!({
        "title": "Sunny 1BR, 3x income, credit 700+, co-signers welcome",
        "rent": 2000,
        "beds": 1,
        "baths": 1.0,
        "neighborhood": "Echo Park"
    });
    let response = send(app(), post_json("/api/v1/listings", &payload)).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    let eligibility = body.get("eligibility").cloned().unwrap_or_default();
    assert_eq!(
        eligibility.get("income_multiplier").and_then(Value::as_f64),
        Some(3.0)
    );
    assert_eq!(
        eligibility.get("min_credit_score").and_then(Value::as_u64),
        Some(700)
    );
    assert_eq!(
        eligibility.get("cosigner_allowed").and_then(Value::as_bool),
        Some(true)
    );
}

#[tokio::test]
async fn creating_a_listing_with_zero_rent_is_rejected() {
    let payload = json!({
        "title": "Free unit",
        "rent": 0,
        "beds": 1,
        "baths": 1.0
    });
    let response = send(app(), post_json("/api/v1/listings", &payload)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn eligibility_endpoint_returns_a_ranked_list() {
    let payload = json!({
        "monthly_income": 7000.0,
        "credit_band": "700–749",
        "has_cosigner": false,
        "max_rent": 3000
    });
    let response = send(app(), post_json("/api/v1/eligibility", &payload)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let results = body.as_array().cloned().unwrap_or_default();
    assert_eq!(results.len(), 10);

    let scores: Vec<u64> = results
        .iter()
        .filter_map(|entry| entry.get("score").and_then(Value::as_u64))
        .collect();
    assert_eq!(scores.len(), 10);
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[tokio::test]
async fn preapproval_endpoint_returns_assessment_without_letter_by_default() {
    let payload = json!({
        "monthly_income": 6250.0,
        "credit_band": "700–749",
        "savings": 10000.0,
        "has_cosigner": false,
        "target_rent": 2500.0
    });
    let response = send(app(), post_json("/api/v1/preapproval", &payload)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(
        body.get("strength").and_then(Value::as_str),
        Some("borderline")
    );
    assert_eq!(
        body.get("max_recommended_rent").and_then(Value::as_u64),
        Some(2100)
    );
    assert!(body.get("letter").is_none());
}

#[tokio::test]
async fn preapproval_endpoint_renders_a_letter_on_request() {
    let payload = json!({
        "monthly_income": 9000.0,
        "credit_band": "750+",
        "savings": 9000.0,
        "has_cosigner": false,
        "target_rent": 2500.0,
        "include_letter": true,
        "renter_name": "Jordan Lee"
    });
    let response = send(app(), post_json("/api/v1/preapproval", &payload)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body.get("strength").and_then(Value::as_str), Some("strong"));
    let letter = body
        .get("letter")
        .and_then(Value::as_str)
        .unwrap_or_default();
    assert!(letter.contains("RENTAL PRE-APPROVAL LETTER"));
    assert!(letter.contains("Jordan Lee"));
}
