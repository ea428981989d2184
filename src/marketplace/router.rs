use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::marketplace::preapproval::{
    calculate_preapproval, letter::render_letter, PreapprovalInput, PreapprovalResult,
};
use crate::marketplace::repository::{ListingRepository, RepositoryError};
use crate::marketplace::service::{
    ListingDraft, ListingService, ListingServiceError, SearchFilters,
};
use crate::marketplace::ListingId;

/// Router builder exposing the marketplace HTTP endpoints.
pub fn marketplace_router<R>(service: Arc<ListingService<R>>) -> Router
where
    R: ListingRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/listings",
            get(list_listings_handler::<R>).post(create_listing_handler::<R>),
        )
        .route("/api/v1/listings/:listing_id", get(get_listing_handler::<R>))
        .route("/api/v1/eligibility", post(eligibility_handler::<R>))
        .route("/api/v1/preapproval", post(preapproval_handler))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct EligibilityRequest {
    pub(crate) monthly_income: f64,
    pub(crate) credit_band: String,
    pub(crate) has_cosigner: bool,
    pub(crate) max_rent: u32,
    #[serde(flatten)]
    pub(crate) filters: SearchFilters,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PreapprovalRequest {
    #[serde(flatten)]
    pub(crate) input: PreapprovalInput,
    #[serde(default)]
    pub(crate) include_letter: bool,
    #[serde(default)]
    pub(crate) renter_name: Option<String>,
    #[serde(default)]
    pub(crate) city: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PreapprovalResponse {
    #[serde(flatten)]
    pub(crate) result: PreapprovalResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) letter: Option<String>,
}

pub(crate) async fn create_listing_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    axum::Json(draft): axum::Json<ListingDraft>,
) -> Response
where
    R: ListingRepository + 'static,
{
    match service.create(draft) {
        Ok(listing) => (StatusCode::CREATED, axum::Json(listing)).into_response(),
        Err(ListingServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({ "error": "listing already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(error @ ListingServiceError::Repository(_)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
        Err(invalid) => {
            let payload = json!({ "error": invalid.to_string() });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn list_listings_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
) -> Response
where
    R: ListingRepository + 'static,
{
    match service.search(&SearchFilters::default()) {
        Ok(listings) => {
            let payload = json!({ "listings": listings });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn get_listing_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    Path(listing_id): Path<String>,
) -> Response
where
    R: ListingRepository + 'static,
{
    let id = ListingId(listing_id);
    match service.get(&id) {
        Ok(listing) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Err(ListingServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({ "error": "listing not found", "listing_id": id.0 });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn eligibility_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    axum::Json(request): axum::Json<EligibilityRequest>,
) -> Response
where
    R: ListingRepository + 'static,
{
    let ranked = service.match_listings(
        &request.filters,
        request.monthly_income,
        &request.credit_band,
        request.has_cosigner,
        request.max_rent,
    );

    match ranked {
        Ok(results) => (StatusCode::OK, axum::Json(results)).into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn preapproval_handler(
    axum::Json(request): axum::Json<PreapprovalRequest>,
) -> Response {
    let result = calculate_preapproval(&request.input);
    let letter = request.include_letter.then(|| {
        render_letter(
            request.renter_name.as_deref().unwrap_or("Applicant"),
            request.city.as_deref().unwrap_or("Los Angeles"),
            &request.input,
            &result,
            Local::now().date_naive(),
        )
    });

    (
        StatusCode::OK,
        axum::Json(PreapprovalResponse { result, letter }),
    )
        .into_response()
}
