use std::sync::{Mutex, MutexGuard};

use crate::marketplace::domain::{EligibilityProfile, Listing, ListingId};

/// Storage abstraction for listings so the service layer can be exercised
/// against an in-memory store in tests and a real backend in production.
///
/// `all` must return listings in insertion order; ranking ties are resolved
/// by input order, so the repository's ordering is part of the contract.
pub trait ListingRepository: Send + Sync {
    fn all(&self) -> Result<Vec<Listing>, RepositoryError>;
    fn get(&self, id: &ListingId) -> Result<Option<Listing>, RepositoryError>;
    fn add(&self, listing: Listing) -> Result<Listing, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("listing already exists")]
    Conflict,
    #[error("listing not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Order-preserving in-memory listing store.
#[derive(Debug, Default)]
pub struct InMemoryListingRepository {
    listings: Mutex<Vec<Listing>>,
}

impl InMemoryListingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the sample Los Angeles catalog.
    pub fn with_seed_catalog() -> Self {
        Self {
            listings: Mutex::new(seed_catalog()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Listing>>, RepositoryError> {
        self.listings
            .lock()
            .map_err(|_| RepositoryError::Unavailable("listing store lock poisoned".to_string()))
    }
}

impl ListingRepository for InMemoryListingRepository {
    fn all(&self) -> Result<Vec<Listing>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.clone())
    }

    fn get(&self, id: &ListingId) -> Result<Option<Listing>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.iter().find(|listing| &listing.id == id).cloned())
    }

    fn add(&self, listing: Listing) -> Result<Listing, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.iter().any(|existing| existing.id == listing.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(listing.clone());
        Ok(listing)
    }
}

fn seed_listing(
    id: &str,
    title: &str,
    neighborhood: &str,
    rent: u32,
    beds: u8,
    baths: f32,
    income_multiplier: f64,
    min_credit_score: Option<u16>,
    cosigner_allowed: bool,
) -> Listing {
    Listing {
        id: ListingId(id.to_string()),
        title: title.to_string(),
        address: None,
        neighborhood: Some(neighborhood.to_string()),
        city: "Los Angeles".to_string(),
        rent,
        beds,
        baths,
        description: None,
        source: "manual".to_string(),
        available_on: None,
        eligibility: EligibilityProfile {
            income_multiplier: Some(income_multiplier),
            min_credit_score,
            cosigner_allowed: Some(cosigner_allowed),
            ..EligibilityProfile::default()
        },
    }
}

/// Sample Los Angeles catalog used when no imported data is supplied.
pub fn seed_catalog() -> Vec<Listing> {
    vec![
        seed_listing(
            "1",
            "Modern Studio in Koreatown",
            "Koreatown",
            1800,
            0,
            1.0,
            3.0,
            Some(600),
            true,
        ),
        seed_listing(
            "2",
            "Spacious 2BR Near UCLA",
            "Westside",
            3200,
            2,
            2.0,
            3.5,
            Some(700),
            false,
        ),
        seed_listing(
            "3",
            "Cozy 1BR in Hollywood",
            "Hollywood",
            2200,
            1,
            1.0,
            2.5,
            Some(650),
            true,
        ),
        seed_listing(
            "4",
            "Luxury 3BR in Beverly Hills",
            "Beverly Hills",
            5500,
            3,
            2.5,
            3.5,
            Some(750),
            false,
        ),
        seed_listing(
            "5",
            "Affordable 1BR in Valley",
            "San Fernando Valley",
            1900,
            1,
            1.0,
            2.5,
            None,
            true,
        ),
        seed_listing(
            "6",
            "Updated 2BR in Mid-Wilshire",
            "Mid-Wilshire",
            2800,
            2,
            1.5,
            3.0,
            Some(680),
            true,
        ),
        seed_listing(
            "7",
            "Charming Studio in Silver Lake",
            "Silver Lake",
            2100,
            0,
            1.0,
            3.0,
            Some(650),
            true,
        ),
        seed_listing(
            "8",
            "Family-Friendly 3BR in Pasadena",
            "Pasadena",
            3800,
            3,
            2.0,
            3.0,
            Some(700),
            false,
        ),
        seed_listing(
            "9",
            "Budget Studio in Downtown LA",
            "Downtown LA",
            1600,
            0,
            1.0,
            2.5,
            None,
            true,
        ),
        seed_listing(
            "10",
            "Modern 2BR in Santa Monica",
            "Santa Monica",
            4200,
            2,
            2.0,
            3.5,
            Some(720),
            false,
        ),
    ]
}
