//! Free-text requirement extraction.
//!
//! Listing titles and descriptions frequently spell out eligibility rules in
//! prose ("3x income required", "co-signers welcome", "no credit check").
//! The extractor runs an ordered rule table over the lower-cased text blob
//! and emits a structured [`EligibilityProfile`], including a keyword tag per
//! detected rule (in detection order) and a listing-side accessibility score.
//!
//! Extraction happens once, at ingestion; scoring never re-parses text.

mod rules;

use crate::marketplace::domain::{CreditFlexibility, EligibilityProfile, IncomeFlexibility};
use rules::{accessibility_components, PatternSet};

/// Accepted range for a parsed income multiplier. Numbers outside this range
/// are treated as noise (e.g. "5x" is almost always something else).
const MULTIPLIER_RANGE: (f64, f64) = (2.0, 4.0);

/// Accepted range for a parsed minimum credit score.
const CREDIT_SCORE_RANGE: (u16, u16) = (300, 850);

/// Rule engine that parses listing text into structured eligibility fields.
///
/// Compiles its pattern tables once; `extract` is pure and reusable across
/// any number of listings.
pub struct RequirementExtractor {
    patterns: PatternSet,
}

impl Default for RequirementExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RequirementExtractor {
    pub fn new() -> Self {
        Self {
            patterns: PatternSet::compile(),
        }
    }

    /// Parse eligibility requirements out of a listing's title and
    /// description. Absence of a match leaves the corresponding field unset;
    /// this function has no failure mode.
    pub fn extract(&self, title: &str, description: &str) -> EligibilityProfile {
        let text = format!("{title} {description}").to_lowercase();
        let mut profile = EligibilityProfile::default();
        let mut keywords: Vec<String> = Vec::new();

        // Stage order matters: flexibility stages only run when the numeric
        // stage before them found nothing, and keyword order is detection
        // order.
        self.detect_income_multiplier(&text, &mut profile, &mut keywords);
        if profile.income_multiplier.is_none() {
            self.detect_income_flexibility(&text, &mut profile, &mut keywords);
        }
        self.detect_min_credit_score(&text, &mut profile, &mut keywords);
        if profile.min_credit_score.is_none() {
            self.detect_credit_flexibility(&text, &mut profile, &mut keywords);
        }
        self.detect_cosigner_policy(&text, &mut profile, &mut keywords);
        self.detect_guarantor_allowance(&text, &mut profile, &mut keywords);
        self.detect_extra_deposit(&text, &mut profile, &mut keywords);

        let components = accessibility_components(&profile);
        let total: i16 = 50 + components.iter().map(|signal| signal.points).sum::<i16>();
        if !components.is_empty() {
            let labels: Vec<&str> = components.iter().map(|signal| signal.label).collect();
            tracing::debug!(?labels, score = total, "accessibility signals detected");
        }
        profile.prime_candidate_score = Some(total.clamp(0, 100) as u8);

        if !keywords.is_empty() {
            profile.keywords = Some(keywords);
        }

        profile
    }

    fn detect_income_multiplier(
        &self,
        text: &str,
        profile: &mut EligibilityProfile,
        keywords: &mut Vec<String>,
    ) {
        for pattern in &self.patterns.income_multiplier {
            let Some(captures) = pattern.captures(text) else {
                continue;
            };
            let Ok(multiplier) = captures[1].parse::<f64>() else {
                continue;
            };
            if (MULTIPLIER_RANGE.0..=MULTIPLIER_RANGE.1).contains(&multiplier) {
                profile.income_multiplier = Some(multiplier);
                keywords.push(format!("{}x income", format_multiplier(multiplier)));
                return;
            }
        }
    }

    fn detect_income_flexibility(
        &self,
        text: &str,
        profile: &mut EligibilityProfile,
        keywords: &mut Vec<String>,
    ) {
        if self.patterns.flexible_income.is_match(text) {
            profile.income_flexibility = Some(IncomeFlexibility::Flexible);
            keywords.push("flexible income".to_string());
        } else if self.patterns.strict_income.is_match(text) {
            profile.income_flexibility = Some(IncomeFlexibility::Strict);
        }
    }

    fn detect_min_credit_score(
        &self,
        text: &str,
        profile: &mut EligibilityProfile,
        keywords: &mut Vec<String>,
    ) {
        for pattern in &self.patterns.min_credit_score {
            let Some(captures) = pattern.captures(text) else {
                continue;
            };
            let Ok(score) = captures[1].parse::<u16>() else {
                continue;
            };
            if (CREDIT_SCORE_RANGE.0..=CREDIT_SCORE_RANGE.1).contains(&score) {
                profile.min_credit_score = Some(score);
                keywords.push(format!("credit {score}+"));
                return;
            }
        }
    }

    fn detect_credit_flexibility(
        &self,
        text: &str,
        profile: &mut EligibilityProfile,
        keywords: &mut Vec<String>,
    ) {
        if self.patterns.no_credit_check.is_match(text) {
            profile.credit_flexibility = Some(CreditFlexibility::NoMinimum);
            keywords.push("no credit check".to_string());
        } else if self.patterns.flexible_credit.is_match(text) {
            profile.credit_flexibility = Some(CreditFlexibility::Flexible);
            keywords.push("flexible credit".to_string());
        }
    }

    fn detect_cosigner_policy(
        &self,
        text: &str,
        profile: &mut EligibilityProfile,
        keywords: &mut Vec<String>,
    ) {
        if !self.patterns.cosigner_term.is_match(text) {
            return;
        }

        if self.patterns.allow_before_cosigner.is_match(text)
            || self.patterns.cosigner_before_allow.is_match(text)
        {
            profile.cosigner_allowed = Some(true);
            keywords.push("co-signer allowed".to_string());
        } else if self.patterns.negated_cosigner.is_match(text) {
            profile.cosigner_allowed = Some(false);
        }
    }

    fn detect_guarantor_allowance(
        &self,
        text: &str,
        profile: &mut EligibilityProfile,
        keywords: &mut Vec<String>,
    ) {
        // Independent of the co-signer check; both keywords can come out of
        // one description.
        if self.patterns.guarantor_term.is_match(text) && self.patterns.allow_token.is_match(text) {
            profile.guarantor_allowed = Some(true);
            keywords.push("guarantor allowed".to_string());
        }
    }

    fn detect_extra_deposit(
        &self,
        text: &str,
        profile: &mut EligibilityProfile,
        keywords: &mut Vec<String>,
    ) {
        if self.patterns.extra_deposit.is_match(text)
            && self.patterns.deposit_allow_token.is_match(text)
        {
            profile.extra_deposit_allowed = Some(true);
            keywords.push("extra deposit option".to_string());
        }
    }
}

/// Render a multiplier the way listings phrase it: "3x income", "2.5x income".
fn format_multiplier(multiplier: f64) -> String {
    if multiplier.fract() == 0.0 {
        format!("{}", multiplier as i64)
    } else {
        format!("{multiplier}")
    }
}
