use crate::marketplace::domain::ListingId;
use crate::marketplace::repository::RepositoryError;
use crate::marketplace::service::{ListingDraft, ListingServiceError, SearchFilters};
use crate::marketplace::tests::common::{empty_service, listing, seeded_service};

fn draft(title: &str, rent: u32) -> ListingDraft {
    ListingDraft {
        title: title.to_string(),
        description: None,
        address: None,
        neighborhood: None,
        city: None,
        rent,
        beds: 1,
        baths: 1.0,
        available_on: None,
        income_multiplier: None,
        min_credit_score: None,
        cosigner_allowed: None,
    }
}

#[test]
fn create_runs_the_extractor_over_the_listing_text() {
    let service = empty_service();

    let created = match service.create(draft(
        "Sunny 1BR, 3x income, credit 700+, co-signers welcome",
        2000,
    )) {
        Ok(listing) => listing,
        Err(error) => panic!("create failed: {error}"),
    };

    assert!(created.id.0.starts_with("lst-"));
    assert_eq!(created.source, "manual");
    assert_eq!(created.city, "Los Angeles");
    assert_eq!(created.eligibility.income_multiplier, Some(3.0));
    assert_eq!(created.eligibility.min_credit_score, Some(700));
    assert_eq!(created.eligibility.cosigner_allowed, Some(true));
    assert!(created.eligibility.keywords.is_some());
}

#[test]
fn explicit_fields_override_extracted_ones() {
    let service = empty_service();

    let mut request = draft("Bright 2BR, 3x income required", 2400);
    request.income_multiplier = Some(2.5);

    let created = match service.create(request) {
        Ok(listing) => listing,
        Err(error) => panic!("create failed: {error}"),
    };

    assert_eq!(created.eligibility.income_multiplier, Some(2.5));
}

#[test]
fn create_rejects_invalid_structured_fields() {
    let service = empty_service();

    match service.create(draft("Studio", 0)) {
        Err(ListingServiceError::NonPositiveRent) => {}
        other => panic!("expected rent rejection, got {other:?}"),
    }

    let mut high_multiplier = draft("Studio", 1500);
    high_multiplier.income_multiplier = Some(5.0);
    match service.create(high_multiplier) {
        Err(ListingServiceError::MultiplierOutOfRange) => {}
        other => panic!("expected multiplier rejection, got {other:?}"),
    }

    let mut high_credit = draft("Studio", 1500);
    high_credit.min_credit_score = Some(900);
    match service.create(high_credit) {
        Err(ListingServiceError::CreditScoreOutOfRange) => {}
        other => panic!("expected credit rejection, got {other:?}"),
    }
}

#[test]
fn ingest_skips_duplicates_and_counts_only_stored_rows() {
    let service = empty_service();

    match service.ingest(vec![listing("a", 1500), listing("b", 1700)]) {
        Ok(count) => assert_eq!(count, 2),
        Err(error) => panic!("first ingest failed: {error}"),
    }
    // "b" collides with the stored row; "c" behind it still lands
    match service.ingest(vec![listing("b", 1800), listing("c", 2100)]) {
        Ok(count) => assert_eq!(count, 1),
        Err(error) => panic!("second ingest failed: {error}"),
    }

    let stored = match service.search(&SearchFilters::default()) {
        Ok(listings) => listings,
        Err(error) => panic!("search failed: {error}"),
    };
    let ids: Vec<&str> = stored.iter().map(|entry| entry.id.0.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    // the first stored version of a duplicate id wins
    assert_eq!(stored[1].rent, 1700);
}

#[test]
fn get_unknown_listing_is_not_found() {
    let service = empty_service();

    match service.get(&ListingId("missing".to_string())) {
        Err(ListingServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn search_filters_narrow_the_seed_catalog() {
    let service = seeded_service();

    let hollywood = match service.search(&SearchFilters {
        neighborhood: Some("hollywood".to_string()),
        ..SearchFilters::default()
    }) {
        Ok(listings) => listings,
        Err(error) => panic!("search failed: {error}"),
    };
    assert_eq!(hollywood.len(), 1);
    assert_eq!(hollywood[0].id.0, "3");

    let two_bed_plus = match service.search(&SearchFilters {
        min_beds: Some(2),
        ..SearchFilters::default()
    }) {
        Ok(listings) => listings,
        Err(error) => panic!("search failed: {error}"),
    };
    let ids: Vec<&str> = two_bed_plus
        .iter()
        .map(|listing| listing.id.0.as_str())
        .collect();
    assert_eq!(ids, vec!["2", "4", "6", "8", "10"]);

    let expensive = match service.search(&SearchFilters {
        min_rent: Some(4000),
        ..SearchFilters::default()
    }) {
        Ok(listings) => listings,
        Err(error) => panic!("search failed: {error}"),
    };
    let ids: Vec<&str> = expensive
        .iter()
        .map(|listing| listing.id.0.as_str())
        .collect();
    assert_eq!(ids, vec!["4", "10"]);
}

#[test]
fn match_pipeline_scores_and_ranks_the_whole_catalog() {
    let service = seeded_service();

    let ranked = match service.match_listings(
        &SearchFilters::default(),
        7000.0,
        "700–749",
        false,
        3000,
    ) {
        Ok(results) => results,
        Err(error) => panic!("match failed: {error}"),
    };

    assert_eq!(ranked.len(), 10);
    assert!(ranked.windows(2).all(|pair| pair[0].score >= pair[1].score));
    // everything above the budget is retained at score zero
    assert!(ranked
        .iter()
        .filter(|scored| scored.listing.rent > 3000)
        .all(|scored| scored.score == 0));
    assert!(ranked.iter().any(|scored| scored.score > 0));
}
