//! Printable pre-approval letter rendering.

use chrono::NaiveDate;

use super::{dollars, PreapprovalInput, PreapprovalResult, PreapprovalStrength};
use crate::marketplace::credit::CreditBand;

const PLATFORM_NAME: &str = "RentMatch Rental Platform";

/// Render a plain-text pre-approval letter suitable for printing or
/// attaching to an application. Self-reported figures only; the disclaimer
/// is part of the letter contract.
pub fn render_letter(
    renter_name: &str,
    city: &str,
    input: &PreapprovalInput,
    result: &PreapprovalResult,
    issued_on: NaiveDate,
) -> String {
    let date = issued_on.format("%B %-d, %Y");
    let band_label = CreditBand::from_label(&input.credit_band)
        .map(|band| band.label().to_string())
        .unwrap_or_else(|| input.credit_band.clone());
    let cosigner = if input.has_cosigner { "Yes" } else { "No" };

    let mut letter = format!(
        "RENTAL PRE-APPROVAL LETTER\n\
         {PLATFORM_NAME}\n\
         {date}\n\
         \n\
         To Whom It May Concern:\n\
         \n\
         This letter serves to confirm that {renter_name} has been pre-approved for \
         rental properties in the {city} area based on the financial information \
         provided to {PLATFORM_NAME}.\n\
         \n\
         Financial Profile Summary\n\
         - Monthly income: ${}\n\
         - Credit score range: {band_label}\n\
         - Available savings: ${}\n\
         - Co-signer available: {cosigner}\n\
         \n\
         Maximum recommended monthly rent: ${}\n\
         Profile strength: {}\n\
         \n\
         Assessment: {}\n",
        dollars(input.monthly_income.round() as i64),
        dollars(input.savings.round() as i64),
        dollars(i64::from(result.max_recommended_rent)),
        strength_sentence(result.strength),
        result.explanation,
    );

    if let Some(top_up) = result.suggested_top_up_deposit {
        letter.push_str(&format!(
            "\nRecommendation: to strengthen the application, consider offering an \
             additional security deposit of ${}.\n",
            dollars(i64::from(top_up))
        ));
    }

    letter.push_str(&format!(
        "\nDisclaimer: this pre-approval letter is based on the information provided \
         by the applicant and is not a guarantee of rental approval. Final approval is \
         subject to the landlord's verification process, including but not limited to \
         credit checks, income verification, and reference checks. This letter is \
         valid for 30 days from the date of issuance.\n\
         \n\
         {PLATFORM_NAME}\n\
         Automated pre-approval letter generated on {date}\n"
    ));

    letter
}

fn strength_sentence(strength: PreapprovalStrength) -> &'static str {
    match strength {
        PreapprovalStrength::Strong => "Strong",
        PreapprovalStrength::Borderline => "Borderline",
        PreapprovalStrength::Weak => "Needs strengthening",
    }
}
