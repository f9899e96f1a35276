//! Year-by-year amortization breakdown of a fixed-rate loan.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::mortgage::emi::{compute_emi, monthly_rate};
use crate::types::{Money, Percent};
use crate::HomeLoanResult;

/// Residual balance below which the loan is considered fully repaid.
const BALANCE_EPSILON: Decimal = dec!(0.01);

/// Aggregated repayments for one loan year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleYear {
    pub year: u32,
    pub opening_balance: Money,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub closing_balance: Money,
}

/// Amortize `principal` month by month and aggregate per year.
///
/// Each month: interest = balance * r, balance = balance + interest - EMI.
/// The final closing balance is reported as zero when the floating residual
/// is within one minor currency unit.
pub fn amortization_schedule(
    principal: Money,
    annual_rate_percent: Percent,
    tenure_years: u32,
) -> HomeLoanResult<Vec<ScheduleYear>> {
    let emi = compute_emi(principal, annual_rate_percent, tenure_years)?;
    let r = monthly_rate(annual_rate_percent);

    let mut balance = principal;
    let mut years = Vec::with_capacity(tenure_years as usize);

    for year in 1..=tenure_years {
        let opening_balance = balance;
        let mut principal_paid = Decimal::ZERO;
        let mut interest_paid = Decimal::ZERO;

        for _ in 0..12 {
            let interest = balance * r;
            let principal_part = emi - interest;
            interest_paid += interest;
            principal_paid += principal_part;
            balance -= principal_part;
        }

        let mut closing_balance = balance;
        if year == tenure_years && closing_balance.abs() < BALANCE_EPSILON {
            principal_paid += closing_balance;
            closing_balance = Decimal::ZERO;
        }

        years.push(ScheduleYear {
            year,
            opening_balance,
            principal_paid,
            interest_paid,
            closing_balance,
        });
    }

    Ok(years)
}

/// Unclamped balance left after the final scheduled payment.
pub fn residual_balance(
    principal: Money,
    annual_rate_percent: Percent,
    tenure_years: u32,
) -> HomeLoanResult<Money> {
    let emi = compute_emi(principal, annual_rate_percent, tenure_years)?;
    let r = monthly_rate(annual_rate_percent);
    let mut balance = principal;
    for _ in 0..tenure_years * 12 {
        balance = balance * (Decimal::ONE + r) - emi;
    }
    Ok(balance)
}
