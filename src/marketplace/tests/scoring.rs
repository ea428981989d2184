use crate::marketplace::scoring::{approval_score, rank_listings, MatchFactor};
use crate::marketplace::tests::common::{listing, listing_with_rules, renter};

#[test]
fn listing_over_budget_scores_exactly_zero() {
    let unit = listing_with_rules("a", 3001, Some(600), true, Some(3.0));
    let profile = renter(20_000.0, 800, true, 3000);

    let result = approval_score(&unit, &profile);

    assert_eq!(result.score, 0);
    assert_eq!(result.components.len(), 1);
    assert_eq!(result.components[0].factor, MatchFactor::Budget);
}

#[test]
fn listing_at_exact_budget_is_still_scored() {
    let unit = listing("a", 3000);
    let profile = renter(9000.0, 700, false, 3000);

    let result = approval_score(&unit, &profile);

    // base 50 + income met 25 + no stated minimum 5
    assert_eq!(result.score, 80);
}

#[test]
fn cosigner_substitution_and_bonus_stack_to_a_forty_point_gap() {
    let unit = listing_with_rules("a", 2000, Some(700), true, Some(3.0));

    let without_cosigner = approval_score(&unit, &renter(6000.0, 600, false, 3000));
    let with_cosigner = approval_score(&unit, &renter(6000.0, 600, true, 3000));

    // 50 + 25 - 20 against 50 + 25 + 10 + 10
    assert_eq!(without_cosigner.score, 55);
    assert_eq!(with_cosigner.score, 95);
    assert_eq!(with_cosigner.score - without_cosigner.score, 40);
}

#[test]
fn missing_multiplier_defaults_to_three_times_rent() {
    let unit = listing("a", 1000);

    let at_threshold = approval_score(&unit, &renter(3000.0, 700, false, 2000));
    let below_threshold = approval_score(&unit, &renter(2700.0, 700, false, 2000));

    // 50 + 25 + 5 when income reaches 3x rent exactly
    assert_eq!(at_threshold.score, 80);
    // 0.9 * 25 - 10 = 12.5 partial income credit, rounded once at the end
    assert_eq!(below_threshold.score, 68);
}

#[test]
fn income_ratio_under_forty_percent_earns_no_partial_credit() {
    let unit = listing("a", 1000);
    let profile = renter(1200.0, 700, false, 2000);

    let result = approval_score(&unit, &profile);

    // ratio 0.4 bottoms out the income term at zero
    assert_eq!(result.score, 55);
    let income = result
        .components
        .iter()
        .find(|component| component.factor == MatchFactor::Income)
        .cloned();
    match income {
        Some(component) => assert_eq!(component.points, 0.0),
        None => panic!("income component missing"),
    }
}

#[test]
fn best_possible_profile_caps_at_one_hundred() {
    let unit = listing_with_rules("a", 1500, Some(650), true, Some(3.0));
    let profile = renter(10_000.0, 780, true, 3000);

    let result = approval_score(&unit, &profile);

    assert_eq!(result.score, 100);
}

#[test]
fn ranking_is_descending_and_keeps_every_listing() {
    let listings = vec![
        listing_with_rules("cheap", 1000, None, false, Some(3.0)),
        listing_with_rules("pricey", 5000, Some(700), false, Some(3.0)),
        listing_with_rules("strict", 1200, Some(800), false, Some(3.0)),
    ];
    let profile = renter(6000.0, 650, false, 2000);

    let ranked = rank_listings(listings, &profile);

    assert_eq!(ranked.len(), 3);
    assert!(ranked.windows(2).all(|pair| pair[0].score >= pair[1].score));
    // over-budget listing scores zero but is retained
    assert_eq!(ranked[0].listing.id.0, "cheap");
    assert_eq!(ranked[2].listing.id.0, "pricey");
    assert_eq!(ranked[2].score, 0);
}

#[test]
fn tied_scores_preserve_input_order() {
    let listings = vec![
        listing_with_rules("first", 1000, Some(600), false, Some(3.0)),
        listing_with_rules("second", 1000, Some(600), false, Some(3.0)),
        listing_with_rules("third", 1000, Some(600), false, Some(3.0)),
    ];
    let profile = renter(3000.0, 650, false, 1500);

    let ranked = rank_listings(listings, &profile);

    let order: Vec<&str> = ranked
        .iter()
        .map(|scored| scored.listing.id.0.as_str())
        .collect();
    assert_eq!(order, vec!["first", "second", "third"]);
    assert!(ranked.iter().all(|scored| scored.score == ranked[0].score));
}
