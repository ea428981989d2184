//! Pre-approval affordability estimation.
//!
//! Computes a recommended maximum rent and a qualitative strength tier from
//! a renter's standalone financial inputs (no listing data). The arithmetic
//! is heuristic, not a standard underwriting formula; the step order below
//! is part of the contract and must not be re-derived.

pub mod letter;

use serde::{Deserialize, Serialize};

use crate::marketplace::credit::estimate_credit_score;

/// Renter financial inputs for a pre-approval assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreapprovalInput {
    pub monthly_income: f64,
    /// One of the five canonical band labels; anything else maps to the
    /// default score of 650.
    pub credit_band: String,
    pub savings: f64,
    pub has_cosigner: bool,
    pub target_rent: f64,
}

/// Qualitative approval-likelihood tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreapprovalStrength {
    Strong,
    Borderline,
    Weak,
}

impl PreapprovalStrength {
    pub const fn label(self) -> &'static str {
        match self {
            PreapprovalStrength::Strong => "strong",
            PreapprovalStrength::Borderline => "borderline",
            PreapprovalStrength::Weak => "weak",
        }
    }
}

/// Pre-approval assessment output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreapprovalResult {
    pub strength: PreapprovalStrength,
    /// Always a multiple of 50, never below 500.
    pub max_recommended_rent: u32,
    pub explanation: String,
    /// Present only when strictly positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_top_up_deposit: Option<u32>,
}

/// Compute the pre-approval assessment. Pure and deterministic; inputs are
/// assumed pre-validated (positive income and target rent, non-negative
/// savings) by the calling layer.
pub fn calculate_preapproval(input: &PreapprovalInput) -> PreapprovalResult {
    let credit_score = estimate_credit_score(&input.credit_band);

    // Income rule of thumb: rent at most a third of monthly income. Savings
    // should cover roughly two months of move-in costs.
    let max_rent_by_income = input.monthly_income / 3.0;
    let max_rent_by_savings = input.savings / 2.0;

    let mut max_recommended_rent = max_rent_by_income;

    if max_rent_by_savings < max_rent_by_income {
        if input.savings >= max_rent_by_income {
            // Savings covers at least one month at the income rate; treat it
            // as a soft cap with headroom rather than a hard limit.
            max_recommended_rent = max_rent_by_income.min(max_rent_by_savings * 1.5);
        } else {
            // Very low savings: shave the income-based figure instead of
            // letting a small balance dominate a high earner.
            max_recommended_rent = max_rent_by_income * 0.9;
        }
    }

    if credit_score < 600 {
        max_recommended_rent *= 0.85;
    } else if credit_score < 650 {
        max_recommended_rent *= 0.95;
    }

    if input.has_cosigner {
        max_recommended_rent *= 1.1;
    }

    // Nearest $50, floored at $500/month.
    let max_recommended_rent = ((max_recommended_rent / 50.0).round() * 50.0).max(500.0) as u32;

    let income_ratio = input.monthly_income / input.target_rent;
    let savings_months = input.savings / input.target_rent;
    let credit_score_good = credit_score >= 650;

    let rent_display = dollars(i64::from(max_recommended_rent));

    if income_ratio >= 3.0 && credit_score_good && savings_months >= 3.0 {
        return PreapprovalResult {
            strength: PreapprovalStrength::Strong,
            max_recommended_rent,
            explanation: format!(
                "Your financial profile is strong. You meet the standard 3x income \
                 requirement, have good credit ({credit_score}+), and sufficient savings \
                 ({} months of rent). You should have no trouble getting approved for \
                 rentals up to ${rent_display}/month.",
                savings_months.round() as i64
            ),
            suggested_top_up_deposit: None,
        };
    }

    if income_ratio >= 2.5 && (credit_score_good || input.has_cosigner) && savings_months >= 2.0 {
        let needs_deposit = income_ratio < 3.0 || savings_months < 3.0;

        if needs_deposit && input.savings >= input.target_rent * 2.0 {
            let top_up = suggested_top_up(input.target_rent, input.savings);
            if top_up > 0 && top_up as f64 <= input.target_rent * 2.0 {
                return PreapprovalResult {
                    strength: PreapprovalStrength::Borderline,
                    max_recommended_rent,
                    explanation: format!(
                        "Your profile is borderline. While you meet basic requirements, \
                         offering an additional security deposit of ${} (bringing total \
                         to ${}) would significantly strengthen your application. This \
                         shows financial stability and reduces landlord risk.",
                        dollars(top_up),
                        dollars(input.savings.round() as i64 + top_up)
                    ),
                    suggested_top_up_deposit: Some(top_up as u32),
                };
            }

            return PreapprovalResult {
                strength: PreapprovalStrength::Borderline,
                max_recommended_rent,
                explanation: format!(
                    "Your profile is borderline. You're close to meeting all \
                     requirements. Consider properties up to ${rent_display}/month, and \
                     be prepared to provide additional documentation or a larger \
                     security deposit if needed."
                ),
                suggested_top_up_deposit: None,
            };
        }

        return PreapprovalResult {
            strength: PreapprovalStrength::Borderline,
            max_recommended_rent,
            explanation: format!(
                "Your profile is borderline. You meet most requirements but may face \
                 competition from stronger applicants. Focus on properties up to \
                 ${rent_display}/month and consider offering a larger security deposit \
                 or providing additional financial documentation."
            ),
            suggested_top_up_deposit: None,
        };
    }

    let mut issues = Vec::new();
    if income_ratio < 2.5 {
        issues.push("income is below the standard 3x rent requirement");
    }
    if credit_score < 600 && !input.has_cosigner {
        issues.push("credit score may be below landlord requirements");
    }
    if savings_months < 2.0 {
        issues.push("savings may be insufficient for move-in costs");
    }

    let cosigner_hint = if input.has_cosigner {
        ""
    } else {
        "adding a co-signer, "
    };
    let mut explanation = format!(
        "Your profile needs strengthening. {}. We recommend focusing on properties up \
         to ${rent_display}/month. Consider: {cosigner_hint}increasing your savings, or \
         looking for properties with more flexible requirements.",
        issues.join(", ")
    );

    let mut suggested = None;
    if input.savings >= input.target_rent && input.savings < input.target_rent * 3.0 {
        let top_up = suggested_top_up(input.target_rent, input.savings);
        if top_up > 0 {
            explanation.push_str(&format!(
                " Offering an additional ${} security deposit could help.",
                dollars(top_up)
            ));
            suggested = Some(top_up as u32);
        }
    }

    PreapprovalResult {
        strength: PreapprovalStrength::Weak,
        max_recommended_rent,
        explanation,
        suggested_top_up_deposit: suggested,
    }
}

/// Top-up that would bring savings to three months of target rent, rounded
/// to the nearest $100. Can be non-positive; callers decide whether to keep.
fn suggested_top_up(target_rent: f64, savings: f64) -> i64 {
    (((target_rent * 3.0 - savings) / 100.0).round() * 100.0) as i64
}

/// Format a whole-dollar amount with thousands separators ("2,100").
pub(crate) fn dollars(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}
