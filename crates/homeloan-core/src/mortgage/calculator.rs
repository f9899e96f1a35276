use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::mortgage::affordability::{
    assess_affordability_with, AffordabilityAssessment, AffordabilityPolicy, AffordabilityTier,
};
use crate::mortgage::emi::{compute_loan_result, LoanParameters, LoanResult};
use crate::mortgage::schedule::{amortization_schedule, ScheduleYear};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::HomeLoanResult;

/// Loan-to-value above which a warning is raised.
const HIGH_LTV_PERCENT: Decimal = dec!(80);

/// Lowest rate the listing UI offers; anything below is flagged.
const MIN_MARKET_RATE_PERCENT: Decimal = dec!(6);

const MAX_STANDARD_TENURE_YEARS: u32 = 30;

/// Full mortgage calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageInput {
    pub property_price: Money,
    pub down_payment: Money,
    pub annual_interest_rate_percent: Percent,
    pub tenure_years: u32,
    /// Gross monthly income; enables the affordability assessment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<Money>,
    /// Attach a yearly amortization schedule
    #[serde(default)]
    pub include_schedule: bool,
    /// Override the standard 30 / 40 / 50 affordability ceilings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affordability_policy: Option<AffordabilityPolicy>,
}

impl MortgageInput {
    pub fn parameters(&self) -> LoanParameters {
        LoanParameters {
            property_price: self.property_price,
            down_payment: self.down_payment,
            annual_interest_rate_percent: self.annual_interest_rate_percent,
            tenure_years: self.tenure_years,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageOutput {
    #[serde(flatten)]
    pub loan: LoanResult,
    /// loan_amount / property_price * 100
    pub loan_to_value_percent: Percent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affordability: Option<AffordabilityAssessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<ScheduleYear>>,
}

/// EMI, totals and (optionally) affordability and schedule for one purchase.
///
/// EMI = P * r * (1 + r)^n / ((1 + r)^n - 1), r = annual% / 1200, n = years * 12
pub fn calculate_mortgage(
    input: &MortgageInput,
) -> HomeLoanResult<ComputationOutput<MortgageOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let loan = compute_loan_result(&input.parameters())?;
    let loan_to_value_percent = loan.loan_amount / input.property_price * dec!(100);

    let affordability = match input.monthly_income {
        Some(income) => {
            let policy = input.affordability_policy.clone().unwrap_or_default();
            Some(assess_affordability_with(
                &policy,
                loan.monthly_installment,
                income,
            )?)
        }
        None => None,
    };

    let schedule = if input.include_schedule {
        Some(amortization_schedule(
            loan.loan_amount,
            input.annual_interest_rate_percent,
            input.tenure_years,
        )?)
    } else {
        None
    };

    // --- Reasonableness warnings ---
    if loan_to_value_percent > HIGH_LTV_PERCENT {
        warnings.push(format!(
            "Loan-to-value of {}% exceeds {HIGH_LTV_PERCENT}%; most lenders require a larger down payment",
            loan_to_value_percent.round_dp(2)
        ));
    }
    if input.annual_interest_rate_percent < MIN_MARKET_RATE_PERCENT {
        warnings.push(format!(
            "Interest rate of {}% is below the {MIN_MARKET_RATE_PERCENT}% market floor; verify the quote",
            input.annual_interest_rate_percent
        ));
    }
    if input.tenure_years > MAX_STANDARD_TENURE_YEARS {
        warnings.push(format!(
            "Tenure of {} years exceeds the usual {MAX_STANDARD_TENURE_YEARS}-year maximum",
            input.tenure_years
        ));
    }
    if let Some(a) = &affordability {
        if a.tier == AffordabilityTier::HighRisk {
            warnings.push(format!(
                "EMI is {}% of monthly income; lenders typically decline above 50%",
                a.emi_to_income_ratio_percent.round_dp(2)
            ));
        }
    }

    tracing::debug!(
        loan_amount = %loan.loan_amount,
        emi = %loan.monthly_installment,
        warnings = warnings.len(),
        "mortgage calculated"
    );

    let output = MortgageOutput {
        loan,
        loan_to_value_percent,
        affordability,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Fixed-rate amortization (equated monthly installment)",
        input,
        warnings,
        elapsed,
        output,
    ))
}
