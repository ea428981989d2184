use serde::{Deserialize, Serialize};

/// Representative score used when a band label is not recognized. Unknown
/// bands deliberately fall back instead of erroring; callers validate
/// upstream where they care.
pub const DEFAULT_CREDIT_SCORE: u16 = 650;

/// Coarse credit-score bucket collected from renters in place of a hard pull.
///
/// The five labels are a UI contract; note the en-dash in the range bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditBand {
    #[serde(rename = "<580")]
    Below580,
    #[serde(rename = "580–649")]
    From580To649,
    #[serde(rename = "650–699")]
    From650To699,
    #[serde(rename = "700–749")]
    From700To749,
    #[serde(rename = "750+")]
    Above750,
}

impl CreditBand {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "<580" => Some(CreditBand::Below580),
            "580–649" => Some(CreditBand::From580To649),
            "650–699" => Some(CreditBand::From650To699),
            "700–749" => Some(CreditBand::From700To749),
            "750+" => Some(CreditBand::Above750),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CreditBand::Below580 => "<580",
            CreditBand::From580To649 => "580–649",
            CreditBand::From650To699 => "650–699",
            CreditBand::From700To749 => "700–749",
            CreditBand::Above750 => "750+",
        }
    }

    /// Representative score for the band (midpoint, except the open ends).
    pub const fn representative_score(self) -> u16 {
        match self {
            CreditBand::Below580 => 550,
            CreditBand::From580To649 => 615,
            CreditBand::From650To699 => 675,
            CreditBand::From700To749 => 725,
            CreditBand::Above750 => 775,
        }
    }
}

/// Map a band label to a numeric score, defaulting for unrecognized input.
pub fn estimate_credit_score(label: &str) -> u16 {
    CreditBand::from_label(label)
        .map(CreditBand::representative_score)
        .unwrap_or(DEFAULT_CREDIT_SCORE)
}
