//! Listing marketplace core: requirement extraction, approval scoring,
//! ranking, and pre-approval estimation, plus the listing repository and
//! HTTP surface that expose them.

pub mod credit;
pub mod domain;
pub mod extraction;
pub mod import;
pub mod preapproval;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use credit::{estimate_credit_score, CreditBand, DEFAULT_CREDIT_SCORE};
pub use domain::{
    CreditFlexibility, EligibilityProfile, IncomeFlexibility, Listing, ListingId, RenterProfile,
    ScoredListing,
};
pub use extraction::RequirementExtractor;
pub use preapproval::{
    calculate_preapproval, PreapprovalInput, PreapprovalResult, PreapprovalStrength,
};
pub use repository::{InMemoryListingRepository, ListingRepository, RepositoryError};
pub use router::marketplace_router;
pub use scoring::{approval_score, rank_listings, MatchFactor, MatchScore, ScoreComponent};
pub use service::{ListingDraft, ListingService, ListingServiceError, SearchFilters};
