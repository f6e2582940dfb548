//! Risk tiers over predicted probabilities.
//!
//! The cut points come from the training run this predictor ships with
//! and deliberately sit well below 0.5: readmissions are rare, so even
//! a modest probability is worth a clinician's attention.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Probabilities below this are Low risk.
pub const LOW_RISK_CEILING: f64 = 0.04;

/// Probabilities at or above this are High risk.
pub const HIGH_RISK_FLOOR: f64 = 0.45;

/// Advisory band for one predicted probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    /// One-sentence advisory shown next to the probability.
    pub fn advice(self) -> &'static str {
        match self {
            RiskTier::Low => "Low risk patient.",
            RiskTier::Moderate => "Moderate risk patient.",
            RiskTier::High => "High risk of readmission.",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
        };
        f.write_str(label)
    }
}

/// Map a probability to its advisory tier.
///
/// The boundaries belong to the band above them: exactly
/// [`LOW_RISK_CEILING`] is Moderate and exactly [`HIGH_RISK_FLOOR`] is
/// High.
pub fn classify(probability: f64) -> RiskTier {
    if probability < LOW_RISK_CEILING {
        RiskTier::Low
    } else if probability < HIGH_RISK_FLOOR {
        RiskTier::Moderate
    } else {
        RiskTier::High
    }
}
