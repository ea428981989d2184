//! CSV listing ingestion.
//!
//! Scraped or exported listing batches arrive as CSV; every row runs through
//! the requirement extractor exactly once, at import time, so the stored
//! eligibility fields stay static for all later scoring calls.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::marketplace::domain::{Listing, ListingId};
use crate::marketplace::extraction::RequirementExtractor;

#[derive(Debug, thiserror::Error)]
pub enum ListingImportError {
    #[error("failed to read listing export: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse listing export: {0}")]
    Csv(#[from] csv::Error),
}

/// Reads listing rows from a CSV export and derives their eligibility
/// profiles from the free-text fields.
pub struct ListingCsvImporter;

impl ListingCsvImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        extractor: &RequirementExtractor,
    ) -> Result<Vec<Listing>, ListingImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, extractor)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        extractor: &RequirementExtractor,
    ) -> Result<Vec<Listing>, ListingImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut listings = Vec::new();
        for record in csv_reader.deserialize::<ListingRow>() {
            let row = record?;
            listings.push(row.into_listing(extractor));
        }

        Ok(listings)
    }
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    id: String,
    title: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    address: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    neighborhood: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    city: Option<String>,
    rent: u32,
    beds: u8,
    baths: f32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    source: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    available_on: Option<String>,
}

impl ListingRow {
    fn into_listing(self, extractor: &RequirementExtractor) -> Listing {
        let eligibility =
            extractor.extract(&self.title, self.description.as_deref().unwrap_or_default());

        Listing {
            id: ListingId(self.id),
            title: self.title,
            address: self.address,
            neighborhood: self.neighborhood,
            city: self.city.unwrap_or_else(|| "Los Angeles".to_string()),
            rent: self.rent,
            beds: self.beds,
            baths: self.baths,
            description: self.description,
            source: self.source.unwrap_or_else(|| "import".to_string()),
            available_on: self.available_on.as_deref().and_then(parse_date),
            eligibility,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
