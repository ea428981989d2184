use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::marketplace::domain::{EligibilityProfile, Listing, ListingId, RenterProfile};
use crate::marketplace::extraction::RequirementExtractor;
use crate::marketplace::repository::InMemoryListingRepository;
use crate::marketplace::service::ListingService;

pub(super) fn extractor() -> RequirementExtractor {
    RequirementExtractor::new()
}

pub(super) fn listing(id: &str, rent: u32) -> Listing {
    Listing {
        id: ListingId(id.to_string()),
        title: format!("Unit {id}"),
        address: None,
        neighborhood: Some("Koreatown".to_string()),
        city: "Los Angeles".to_string(),
        rent,
        beds: 1,
        baths: 1.0,
        description: None,
        source: "manual".to_string(),
        available_on: None,
        eligibility: EligibilityProfile::default(),
    }
}

pub(super) fn listing_with_rules(
    id: &str,
    rent: u32,
    min_credit_score: Option<u16>,
    cosigner_allowed: bool,
    income_multiplier: Option<f64>,
) -> Listing {
    let mut built = listing(id, rent);
    built.eligibility = EligibilityProfile {
        income_multiplier,
        min_credit_score,
        cosigner_allowed: Some(cosigner_allowed),
        ..EligibilityProfile::default()
    };
    built
}

pub(super) fn renter(
    monthly_income: f64,
    estimated_credit_score: u16,
    has_cosigner: bool,
    max_rent: u32,
) -> RenterProfile {
    RenterProfile {
        monthly_income,
        estimated_credit_score,
        has_cosigner,
        max_rent,
    }
}

pub(super) fn empty_service() -> ListingService<InMemoryListingRepository> {
    ListingService::new(Arc::new(InMemoryListingRepository::new()))
}

pub(super) fn seeded_service() -> ListingService<InMemoryListingRepository> {
    ListingService::new(Arc::new(InMemoryListingRepository::with_seed_catalog()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
