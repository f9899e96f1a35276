use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::HomeLoanError;
use crate::types::{Money, Percent};
use crate::HomeLoanResult;

/// Converts an annual percentage into a monthly fractional rate (12 * 100).
const ANNUAL_PERCENT_TO_MONTHLY: Decimal = dec!(1200);

const MONTHS_PER_YEAR: u32 = 12;

/// Longest accepted tenure. Bounds the month loops in the amortization schedule.
pub const MAX_TENURE_YEARS: u32 = 100;

/// Loan parameters as entered by the buyer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Listed price of the property
    pub property_price: Money,
    /// Cash paid up front; the remainder is financed
    pub down_payment: Money,
    /// Nominal annual rate in percent (8.5 = 8.5% p.a.)
    pub annual_interest_rate_percent: Percent,
    /// Loan tenure in whole years
    pub tenure_years: u32,
}

impl LoanParameters {
    /// Principal financed: property price minus down payment.
    pub fn loan_amount(&self) -> Money {
        self.property_price - self.down_payment
    }
}

/// Summary of a fixed-rate loan repaid in equal monthly installments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    /// Principal financed
    pub loan_amount: Money,
    /// Equated monthly installment (unrounded)
    pub monthly_installment: Money,
    /// monthly_installment * number of months
    pub total_payable: Money,
    /// total_payable - loan_amount
    pub total_interest: Money,
}

/// Monthly fractional rate for an annual percentage.
pub fn monthly_rate(annual_rate_percent: Percent) -> Decimal {
    annual_rate_percent / ANNUAL_PERCENT_TO_MONTHLY
}

/// Number of monthly payments over the tenure.
pub fn total_months(tenure_years: u32) -> HomeLoanResult<u32> {
    if tenure_years == 0 {
        return Err(HomeLoanError::invalid(
            "tenure_years",
            "Tenure must be at least one year",
        ));
    }
    if tenure_years > MAX_TENURE_YEARS {
        return Err(HomeLoanError::invalid(
            "tenure_years",
            format!("Tenure cannot exceed {MAX_TENURE_YEARS} years"),
        ));
    }
    Ok(tenure_years * MONTHS_PER_YEAR)
}

/// Equated monthly installment for a fixed-rate loan.
///
/// EMI = P * r * (1 + r)^n / ((1 + r)^n - 1)
///
/// where r = annual_rate_percent / 1200 and n = tenure_years * 12. A zero rate
/// falls back to the algebraic limit P / n. A zero principal yields zero.
pub fn compute_emi(
    principal: Money,
    annual_rate_percent: Percent,
    tenure_years: u32,
) -> HomeLoanResult<Money> {
    if principal < Decimal::ZERO {
        return Err(HomeLoanError::invalid(
            "principal",
            "Principal cannot be negative",
        ));
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(HomeLoanError::invalid(
            "annual_rate_percent",
            "Interest rate cannot be negative",
        ));
    }
    let n = total_months(tenure_years)?;

    if principal.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let periods = Decimal::from(n);
    if annual_rate_percent.is_zero() {
        return Ok(principal / periods);
    }

    let r = monthly_rate(annual_rate_percent);
    let growth = (Decimal::ONE + r)
        .checked_powu(u64::from(n))
        .ok_or_else(|| overflow(annual_rate_percent, tenure_years))?;
    let denom = growth - Decimal::ONE;

    // (1 + r)^n can round to exactly 1 for vanishingly small rates
    if denom.is_zero() {
        return Ok(principal / periods);
    }

    principal
        .checked_mul(r)
        .and_then(|v| v.checked_mul(growth))
        .and_then(|v| v.checked_div(denom))
        .ok_or_else(|| overflow(annual_rate_percent, tenure_years))
}

/// Compute EMI and totals for a property purchase.
pub fn compute_loan_result(params: &LoanParameters) -> HomeLoanResult<LoanResult> {
    validate_parameters(params)?;
    loan_result_for_principal(
        params.loan_amount(),
        params.annual_interest_rate_percent,
        params.tenure_years,
    )
}

/// EMI and totals for an already-known principal.
pub(crate) fn loan_result_for_principal(
    loan_amount: Money,
    annual_rate_percent: Percent,
    tenure_years: u32,
) -> HomeLoanResult<LoanResult> {
    let monthly_installment = compute_emi(loan_amount, annual_rate_percent, tenure_years)?;
    let months = Decimal::from(total_months(tenure_years)?);
    let total_payable = monthly_installment
        .checked_mul(months)
        .ok_or_else(|| overflow(annual_rate_percent, tenure_years))?;

    Ok(LoanResult {
        loan_amount,
        monthly_installment,
        total_payable,
        total_interest: total_payable - loan_amount,
    })
}

fn validate_parameters(params: &LoanParameters) -> HomeLoanResult<()> {
    if params.property_price <= Decimal::ZERO {
        return Err(HomeLoanError::invalid(
            "property_price",
            "Property price must be positive",
        ));
    }
    if params.down_payment < Decimal::ZERO {
        return Err(HomeLoanError::invalid(
            "down_payment",
            "Down payment cannot be negative",
        ));
    }
    if params.down_payment > params.property_price {
        return Err(HomeLoanError::invalid(
            "down_payment",
            format!(
                "Down payment ({}) exceeds property price ({})",
                params.down_payment, params.property_price
            ),
        ));
    }
    Ok(())
}

fn overflow(annual_rate_percent: Percent, tenure_years: u32) -> HomeLoanError {
    HomeLoanError::invalid(
        "annual_rate_percent / tenure_years",
        format!(
            "{annual_rate_percent}% over {tenure_years} years exceeds the representable range"
        ),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
