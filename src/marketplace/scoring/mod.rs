//! Renter-to-listing approval scoring and ranking.
//!
//! The score is an additive model folded over labeled components so each
//! contribution stays individually auditable; the clamp to [0, 100] and the
//! rounding happen exactly once, at the end.

use serde::{Deserialize, Serialize};

use crate::marketplace::domain::{Listing, RenterProfile, ScoredListing};

/// Multiplier assumed when a listing states no income requirement.
pub const DEFAULT_INCOME_MULTIPLIER: f64 = 3.0;

const BASE_SCORE: f64 = 50.0;

/// Factors permitted to contribute to an approval score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchFactor {
    Budget,
    Base,
    Income,
    Credit,
    CosignerBonus,
}

/// Discrete contribution to an approval score, for transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: MatchFactor,
    pub points: f64,
    pub notes: String,
}

/// Approval score with its component trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub score: u8,
    pub components: Vec<ScoreComponent>,
}

/// Compute the renter-specific approval score for one listing.
///
/// A listing above the renter's budget scores exactly 0 with no partial
/// credit. A renter with a co-signer on a co-signer-friendly listing can
/// collect both the credit-substitution points and the independent co-signer
/// bonus; that stacking is intentional and callers must not normalize it
/// away.
pub fn approval_score(listing: &Listing, profile: &RenterProfile) -> MatchScore {
    if listing.rent > profile.max_rent {
        return MatchScore {
            score: 0,
            components: vec![ScoreComponent {
                factor: MatchFactor::Budget,
                points: 0.0,
                notes: format!(
                    "rent {} exceeds renter budget {}",
                    listing.rent, profile.max_rent
                ),
            }],
        };
    }

    let mut components = Vec::new();
    components.push(ScoreComponent {
        factor: MatchFactor::Base,
        points: BASE_SCORE,
        notes: "base".to_string(),
    });

    let multiplier = listing
        .eligibility
        .income_multiplier
        .unwrap_or(DEFAULT_INCOME_MULTIPLIER);
    let required_income = multiplier * f64::from(listing.rent);

    if profile.monthly_income >= required_income {
        components.push(ScoreComponent {
            factor: MatchFactor::Income,
            points: 25.0,
            notes: format!(
                "income {:.0} meets required {:.0} ({multiplier}x rent)",
                profile.monthly_income, required_income
            ),
        });
    } else {
        // Linear partial credit with a flat 10-point penalty, floored at
        // zero, so ratios under 0.4 contribute nothing.
        let income_ratio = profile.monthly_income / required_income;
        components.push(ScoreComponent {
            factor: MatchFactor::Income,
            points: (income_ratio * 25.0 - 10.0).max(0.0),
            notes: format!(
                "income {:.0} is {:.0}% of required {:.0}",
                profile.monthly_income,
                income_ratio * 100.0,
                required_income
            ),
        });
    }

    let cosigner_friendly = listing.eligibility.cosigner_allowed.unwrap_or(false)
        || listing.eligibility.guarantor_allowed.unwrap_or(false);

    match listing.eligibility.min_credit_score {
        Some(minimum) if profile.estimated_credit_score >= minimum => {
            components.push(ScoreComponent {
                factor: MatchFactor::Credit,
                points: 15.0,
                notes: format!(
                    "credit {} meets minimum {minimum}",
                    profile.estimated_credit_score
                ),
            });
        }
        Some(minimum) if profile.has_cosigner && cosigner_friendly => {
            components.push(ScoreComponent {
                factor: MatchFactor::Credit,
                points: 10.0,
                notes: format!(
                    "credit {} below minimum {minimum}, co-signer substitutes",
                    profile.estimated_credit_score
                ),
            });
        }
        Some(minimum) => {
            components.push(ScoreComponent {
                factor: MatchFactor::Credit,
                points: -20.0,
                notes: format!(
                    "credit {} below minimum {minimum} with no co-signer option",
                    profile.estimated_credit_score
                ),
            });
        }
        None => {
            components.push(ScoreComponent {
                factor: MatchFactor::Credit,
                points: 5.0,
                notes: "no stated credit minimum".to_string(),
            });
        }
    }

    if cosigner_friendly && profile.has_cosigner {
        components.push(ScoreComponent {
            factor: MatchFactor::CosignerBonus,
            points: 10.0,
            notes: "listing accepts co-signer/guarantor and renter has one".to_string(),
        });
    }

    let total: f64 = components.iter().map(|component| component.points).sum();
    MatchScore {
        score: total.clamp(0.0, 100.0).round() as u8,
        components,
    }
}

/// Score every listing against the profile and rank descending.
///
/// Ties keep their input order (stable sort, no secondary key) and
/// zero-score listings are retained; every input appears exactly once.
pub fn rank_listings(listings: Vec<Listing>, profile: &RenterProfile) -> Vec<ScoredListing> {
    let mut results: Vec<ScoredListing> = listings
        .into_iter()
        .map(|listing| {
            let score = approval_score(&listing, profile).score;
            ScoredListing { listing, score }
        })
        .collect();

    results.sort_by(|a, b| b.score.cmp(&a.score));
    results
}
