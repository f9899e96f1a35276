//! EMI-to-income affordability heuristic.
//!
//! The ratio and the tier are computed by separate functions so a
//! presentation layer can relabel or recolour tiers without touching the
//! arithmetic.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::HomeLoanError;
use crate::types::{Money, Percent};
use crate::HomeLoanResult;

/// Affordability band of an EMI relative to monthly income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AffordabilityTier {
    Excellent,
    Good,
    Moderate,
    HighRisk,
}

impl AffordabilityTier {
    pub fn label(&self) -> &'static str {
        match self {
            AffordabilityTier::Excellent => "Excellent",
            AffordabilityTier::Good => "Good",
            AffordabilityTier::Moderate => "Moderate",
            AffordabilityTier::HighRisk => "High Risk",
        }
    }
}

impl std::fmt::Display for AffordabilityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive ratio ceilings (percent) for each tier below `HighRisk`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityPolicy {
    pub excellent_max: Percent,
    pub good_max: Percent,
    pub moderate_max: Percent,
}

impl Default for AffordabilityPolicy {
    fn default() -> Self {
        Self {
            excellent_max: dec!(30),
            good_max: dec!(40),
            moderate_max: dec!(50),
        }
    }
}

impl AffordabilityPolicy {
    pub fn validate(&self) -> HomeLoanResult<()> {
        if self.excellent_max <= Decimal::ZERO {
            return Err(HomeLoanError::invalid(
                "excellent_max",
                "Tier ceilings must be positive",
            ));
        }
        if self.good_max <= self.excellent_max || self.moderate_max <= self.good_max {
            return Err(HomeLoanError::invalid(
                "affordability_policy",
                "Tier ceilings must be strictly ascending",
            ));
        }
        Ok(())
    }

    /// First tier whose ceiling is at or above `ratio`.
    pub fn classify(&self, ratio: Percent) -> AffordabilityTier {
        if ratio <= self.excellent_max {
            AffordabilityTier::Excellent
        } else if ratio <= self.good_max {
            AffordabilityTier::Good
        } else if ratio <= self.moderate_max {
            AffordabilityTier::Moderate
        } else {
            AffordabilityTier::HighRisk
        }
    }
}

/// Ratio and tier for one EMI / income pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityAssessment {
    pub emi_to_income_ratio_percent: Percent,
    pub tier: AffordabilityTier,
}

/// EMI as a percentage of monthly income.
pub fn emi_to_income_ratio(
    monthly_installment: Money,
    monthly_income: Money,
) -> HomeLoanResult<Percent> {
    if monthly_income <= Decimal::ZERO {
        return Err(HomeLoanError::invalid(
            "monthly_income",
            "Monthly income must be positive",
        ));
    }
    if monthly_installment < Decimal::ZERO {
        return Err(HomeLoanError::invalid(
            "monthly_installment",
            "Monthly installment cannot be negative",
        ));
    }
    monthly_installment
        .checked_div(monthly_income)
        .and_then(|share| share.checked_mul(dec!(100)))
        .ok_or_else(|| {
            HomeLoanError::invalid(
                "monthly_income",
                format!(
                    "EMI of {monthly_installment} against income of {monthly_income} \
                     exceeds the representable range"
                ),
            )
        })
}

/// Tier for a ratio under the standard 30 / 40 / 50 policy.
pub fn classify_ratio(ratio: Percent) -> AffordabilityTier {
    AffordabilityPolicy::default().classify(ratio)
}

pub fn assess_affordability(
    monthly_installment: Money,
    monthly_income: Money,
) -> HomeLoanResult<AffordabilityAssessment> {
    assess_affordability_with(
        &AffordabilityPolicy::default(),
        monthly_installment,
        monthly_income,
    )
}

pub fn assess_affordability_with(
    policy: &AffordabilityPolicy,
    monthly_installment: Money,
    monthly_income: Money,
) -> HomeLoanResult<AffordabilityAssessment> {
    policy.validate()?;
    let ratio = emi_to_income_ratio(monthly_installment, monthly_income)?;
    Ok(AffordabilityAssessment {
        emi_to_income_ratio_percent: ratio,
        tier: policy.classify(ratio),
    })
}
