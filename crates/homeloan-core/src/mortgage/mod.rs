//! Fixed-rate mortgage calculations: EMI, totals, affordability, lender
//! comparison and amortization schedules. All math in `rust_decimal::Decimal`.

pub mod affordability;
pub mod calculator;
pub mod emi;
pub mod lenders;
pub mod schedule;

pub use affordability::{
    assess_affordability, assess_affordability_with, classify_ratio, emi_to_income_ratio,
    AffordabilityAssessment, AffordabilityPolicy, AffordabilityTier,
};
pub use calculator::{calculate_mortgage, MortgageInput, MortgageOutput};
pub use emi::{
    compute_emi, compute_loan_result, monthly_rate, total_months, LoanParameters, LoanResult,
    MAX_TENURE_YEARS,
};
pub use lenders::{compare_lenders, quote_lenders, standard_offers, LenderOffer, LenderQuote};
pub use schedule::{amortization_schedule, residual_balance, ScheduleYear};
