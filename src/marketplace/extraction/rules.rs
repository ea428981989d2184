use crate::marketplace::domain::{CreditFlexibility, EligibilityProfile, IncomeFlexibility};
use regex::Regex;

/// Compiled pattern tables for the extractor, in rule-precedence order.
///
/// Patterns run against pre-lowercased text, so they are written lowercase.
/// The co-signer family deliberately omits a trailing word boundary so that
/// plural and inflected forms ("cosigners", "cosigning") still match.
pub(super) struct PatternSet {
    /// "3x income", "income must be 2.5x", "3 times rent". First match wins.
    pub(super) income_multiplier: Vec<Regex>,
    pub(super) flexible_income: Regex,
    pub(super) strict_income: Regex,
    /// "credit score 650+", "minimum credit 700", "680+ fico". First match wins.
    pub(super) min_credit_score: Vec<Regex>,
    pub(super) no_credit_check: Regex,
    pub(super) flexible_credit: Regex,
    pub(super) cosigner_term: Regex,
    pub(super) allow_before_cosigner: Regex,
    pub(super) cosigner_before_allow: Regex,
    pub(super) negated_cosigner: Regex,
    pub(super) guarantor_term: Regex,
    pub(super) allow_token: Regex,
    pub(super) extra_deposit: Regex,
    pub(super) deposit_allow_token: Regex,
}

impl PatternSet {
    pub(super) fn compile() -> Self {
        Self {
            income_multiplier: vec![
                rule(r"(\d+(?:\.\d+)?)\s*x\s*(?:income|rent|salary)"),
                rule(r"income\s*(?:must\s*be|of|at\s*least)\s*(\d+(?:\.\d+)?)\s*x"),
                rule(r"(\d+(?:\.\d+)?)\s*times\s*(?:income|rent)"),
            ],
            flexible_income: rule(r"\b(?:flexible|negotiable|open|willing)\b.*\b(?:income|salary|rent)\b"),
            strict_income: rule(r"\b(?:strict|must|required|minimum)\b.*\b(?:income|salary)\b"),
            min_credit_score: vec![
                rule(r"(?:credit|credit\s*score|fico)\s*(?:score\s*)?(?:of|at\s*least|minimum|min)?\s*(\d{3,4})\+?"),
                rule(r"(\d{3,4})\+?\s*(?:credit|fico)"),
            ],
            no_credit_check: rule(r"\b(?:no\s*credit|credit\s*not\s*required|bad\s*credit\s*ok)\b"),
            flexible_credit: rule(r"\b(?:flexible|negotiable|open)\b.*\bcredit\b"),
            cosigner_term: rule(r"\b(?:co[\s-]?sign|guarantor)"),
            allow_before_cosigner: rule(
                r"\b(?:allow|accept|welcome|ok|yes)\b.*\b(?:co[\s-]?sign|guarantor)",
            ),
            cosigner_before_allow: rule(
                r"\b(?:co[\s-]?sign|guarantor).*\b(?:allow|accept|welcome|ok|yes)\b",
            ),
            negated_cosigner: rule(r"\b(?:no|not|don't|doesn't)\b.*\b(?:co[\s-]?sign|guarantor)"),
            guarantor_term: rule(r"\bguarantor"),
            allow_token: rule(r"\b(?:allow|accept|welcome|ok|yes)\b"),
            extra_deposit: rule(r"\b(?:extra|additional|higher|larger)\s*(?:security\s*)?deposit\b"),
            deposit_allow_token: rule(r"\b(?:allow|accept|welcome|ok|yes|option)\b"),
        }
    }
}

fn rule(pattern: &str) -> Regex {
    Regex::new(pattern).expect("extraction pattern compiles")
}

/// One labeled contribution to the prime-candidate (accessibility) score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AccessSignal {
    pub(crate) label: &'static str,
    pub(crate) points: i16,
}

/// Accessibility contributions for a parsed profile, in evaluation order.
/// The caller folds these onto the base of 50 and clamps once at the end.
pub(crate) fn accessibility_components(profile: &EligibilityProfile) -> Vec<AccessSignal> {
    let mut components = Vec::new();

    if profile.min_credit_score.is_none()
        || profile.credit_flexibility == Some(CreditFlexibility::NoMinimum)
    {
        components.push(AccessSignal {
            label: "no credit minimum",
            points: 20,
        });
    }

    if profile.cosigner_allowed.unwrap_or(false) || profile.guarantor_allowed.unwrap_or(false) {
        components.push(AccessSignal {
            label: "co-signer or guarantor accepted",
            points: 15,
        });
    }

    if profile.extra_deposit_allowed.unwrap_or(false) {
        components.push(AccessSignal {
            label: "extra deposit accepted",
            points: 10,
        });
    }

    if matches!(
        profile.income_flexibility,
        Some(IncomeFlexibility::Flexible) | Some(IncomeFlexibility::Negotiable)
    ) {
        components.push(AccessSignal {
            label: "income flexibility",
            points: 15,
        });
    }

    // A single multiplier can only land in one of these buckets.
    if let Some(multiplier) = profile.income_multiplier {
        if multiplier <= 2.5 {
            components.push(AccessSignal {
                label: "lenient income multiplier",
                points: 10,
            });
        } else if multiplier >= 3.5 {
            components.push(AccessSignal {
                label: "demanding income multiplier",
                points: -10,
            });
        }
    }

    components
}
