use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::marketplace::credit::estimate_credit_score;
use crate::marketplace::domain::{
    EligibilityProfile, Listing, ListingId, RenterProfile, ScoredListing,
};
use crate::marketplace::extraction::RequirementExtractor;
use crate::marketplace::repository::{ListingRepository, RepositoryError};
use crate::marketplace::scoring::rank_listings;

/// Service composing the listing repository, the requirement extractor, and
/// the match pipeline.
pub struct ListingService<R> {
    repository: Arc<R>,
    extractor: RequirementExtractor,
}

static LISTING_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_listing_id() -> ListingId {
    let id = LISTING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ListingId(format!("lst-{id:06}"))
}

/// Inbound payload for manual listing creation. Structured eligibility
/// fields, when supplied, override whatever the text extractor detects.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    pub rent: u32,
    pub beds: u8,
    pub baths: f32,
    #[serde(default)]
    pub available_on: Option<NaiveDate>,
    #[serde(default)]
    pub income_multiplier: Option<f64>,
    #[serde(default)]
    pub min_credit_score: Option<u16>,
    #[serde(default)]
    pub cosigner_allowed: Option<bool>,
}

/// Property filters applied before scoring, mirroring what renters can
/// narrow by in search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchFilters {
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub min_beds: Option<u8>,
    #[serde(default)]
    pub min_baths: Option<f32>,
    #[serde(default)]
    pub min_rent: Option<u32>,
}

/// Error raised by the listing service.
#[derive(Debug, thiserror::Error)]
pub enum ListingServiceError {
    #[error("rent must be a positive number")]
    NonPositiveRent,
    #[error("income multiplier must be between 2 and 4")]
    MultiplierOutOfRange,
    #[error("minimum credit score must be between 300 and 850")]
    CreditScoreOutOfRange,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl<R> ListingService<R>
where
    R: ListingRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            extractor: RequirementExtractor::new(),
        }
    }

    /// Create a manual listing. The extractor runs over the free text once,
    /// here; explicit structured fields win over extracted ones.
    pub fn create(&self, draft: ListingDraft) -> Result<Listing, ListingServiceError> {
        if draft.rent == 0 {
            return Err(ListingServiceError::NonPositiveRent);
        }
        if let Some(multiplier) = draft.income_multiplier {
            if !(2.0..=4.0).contains(&multiplier) {
                return Err(ListingServiceError::MultiplierOutOfRange);
            }
        }
        if let Some(score) = draft.min_credit_score {
            if !(300..=850).contains(&score) {
                return Err(ListingServiceError::CreditScoreOutOfRange);
            }
        }

        let extracted = self
            .extractor
            .extract(&draft.title, draft.description.as_deref().unwrap_or_default());
        let eligibility = EligibilityProfile {
            income_multiplier: draft.income_multiplier.or(extracted.income_multiplier),
            min_credit_score: draft.min_credit_score.or(extracted.min_credit_score),
            cosigner_allowed: draft.cosigner_allowed.or(extracted.cosigner_allowed),
            ..extracted
        };

        let listing = Listing {
            id: next_listing_id(),
            title: draft.title,
            address: draft.address,
            neighborhood: draft.neighborhood,
            city: draft.city.unwrap_or_else(|| "Los Angeles".to_string()),
            rent: draft.rent,
            beds: draft.beds,
            baths: draft.baths,
            description: draft.description,
            source: "manual".to_string(),
            available_on: draft.available_on,
            eligibility,
        };

        let stored = self.repository.add(listing)?;
        Ok(stored)
    }

    /// Bulk-add pre-built listings (seed catalog or CSV import), returning
    /// how many were stored. Rows whose id is already present are skipped
    /// with a warning, so re-running the same export cannot half-hydrate the
    /// catalog; any other repository failure aborts the batch.
    pub fn ingest(&self, listings: Vec<Listing>) -> Result<usize, ListingServiceError> {
        let mut stored = 0;
        for listing in listings {
            let id = listing.id.clone();
            match self.repository.add(listing) {
                Ok(_) => stored += 1,
                Err(RepositoryError::Conflict) => {
                    tracing::warn!(listing_id = %id.0, "skipping duplicate listing in ingest batch");
                }
                Err(error) => return Err(error.into()),
            }
        }
        Ok(stored)
    }

    pub fn get(&self, id: &ListingId) -> Result<Listing, ListingServiceError> {
        let listing = self.repository.get(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(listing)
    }

    /// All listings passing the property filters, in repository order.
    pub fn search(&self, filters: &SearchFilters) -> Result<Vec<Listing>, ListingServiceError> {
        let mut listings = self.repository.all()?;

        if let Some(area) = &filters.neighborhood {
            let needle = area.to_lowercase();
            listings.retain(|listing| {
                listing
                    .neighborhood
                    .as_deref()
                    .is_some_and(|neighborhood| neighborhood.to_lowercase().contains(&needle))
                    || listing.city.to_lowercase().contains(&needle)
            });
        }
        if let Some(min_beds) = filters.min_beds {
            listings.retain(|listing| listing.beds >= min_beds);
        }
        if let Some(min_baths) = filters.min_baths {
            listings.retain(|listing| listing.baths >= min_baths);
        }
        if let Some(min_rent) = filters.min_rent {
            listings.retain(|listing| listing.rent >= min_rent);
        }

        Ok(listings)
    }

    /// Full match pipeline: filter, band-map the renter's credit, score,
    /// and rank. Unknown band labels fall back to the default score.
    pub fn match_listings(
        &self,
        filters: &SearchFilters,
        monthly_income: f64,
        credit_band: &str,
        has_cosigner: bool,
        max_rent: u32,
    ) -> Result<Vec<ScoredListing>, ListingServiceError> {
        let listings = self.search(filters)?;
        let profile = RenterProfile {
            monthly_income,
            estimated_credit_score: estimate_credit_score(credit_band),
            has_cosigner,
            max_rent,
        };
        Ok(rank_listings(listings, &profile))
    }
}
