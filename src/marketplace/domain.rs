use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for marketplace listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingId(pub String);

/// How firmly a listing holds its stated income requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeFlexibility {
    Strict,
    Flexible,
    Negotiable,
}

impl IncomeFlexibility {
    pub const fn label(self) -> &'static str {
        match self {
            IncomeFlexibility::Strict => "strict",
            IncomeFlexibility::Flexible => "flexible",
            IncomeFlexibility::Negotiable => "negotiable",
        }
    }
}

/// How firmly a listing holds its stated credit requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditFlexibility {
    Strict,
    Flexible,
    Negotiable,
    NoMinimum,
}

impl CreditFlexibility {
    pub const fn label(self) -> &'static str {
        match self {
            CreditFlexibility::Strict => "strict",
            CreditFlexibility::Flexible => "flexible",
            CreditFlexibility::Negotiable => "negotiable",
            CreditFlexibility::NoMinimum => "no_minimum",
        }
    }
}

/// Structured eligibility rules attached to a listing. Populated once at
/// ingestion (manual fields or text extraction) and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EligibilityProfile {
    /// Required monthly-income-to-rent ratio; scoring treats absence as 3x.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_flexibility: Option<IncomeFlexibility>,
    /// Minimum credit score in [300, 850]; absence means no stated minimum.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_credit_score: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_flexibility: Option<CreditFlexibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cosigner_allowed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guarantor_allowed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_deposit_allowed: Option<bool>,
    /// Human-readable tags of detected rules, in detection order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    /// Listing-side accessibility score in [0, 100], independent of any renter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prime_candidate_score: Option<u8>,
}

/// An advertised rental unit with its extracted eligibility rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    pub city: String,
    pub rent: u32,
    pub beds: u8,
    pub baths: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ingestion channel, e.g. "manual" or "craigslist_la".
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_on: Option<NaiveDate>,
    #[serde(default)]
    pub eligibility: EligibilityProfile,
}

/// Renter financial snapshot used to score listings. Constructed per request;
/// `estimated_credit_score` is already band-mapped by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenterProfile {
    pub monthly_income: f64,
    pub estimated_credit_score: u16,
    pub has_cosigner: bool,
    /// Hard ceiling; listings above this score zero outright.
    pub max_rent: u32,
}

/// A listing paired with its renter-specific approval score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredListing {
    pub listing: Listing,
    pub score: u8,
}
