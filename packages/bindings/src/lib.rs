use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use homeloan_core::mortgage;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Core errors keep their machine-readable code so the UI can branch on it.
fn core_error(e: homeloan_core::HomeLoanError) -> napi::Error {
    napi::Error::from_reason(format!("{}: {}", e.code(), e))
}

#[derive(Deserialize)]
struct EmiArgs {
    principal: Decimal,
    annual_rate_percent: Decimal,
    tenure_years: u32,
}

#[derive(Deserialize)]
struct AffordabilityArgs {
    monthly_installment: Decimal,
    monthly_income: Decimal,
}

#[derive(Deserialize)]
struct CompareArgs {
    loan_amount: Decimal,
    tenure_years: u32,
    #[serde(default)]
    offers: Option<Vec<mortgage::LenderOffer>>,
}

// ---------------------------------------------------------------------------
// Mortgage
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_mortgage(input_json: String) -> NapiResult<String> {
    let input: mortgage::MortgageInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage::calculate_mortgage(&input).map_err(core_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compute_emi(input_json: String) -> NapiResult<String> {
    let args: EmiArgs = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let emi = mortgage::compute_emi(args.principal, args.annual_rate_percent, args.tenure_years)
        .map_err(core_error)?;
    serde_json::to_string(&emi).map_err(to_napi_error)
}

#[napi]
pub fn assess_affordability(input_json: String) -> NapiResult<String> {
    let args: AffordabilityArgs = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let assessment = mortgage::assess_affordability(args.monthly_installment, args.monthly_income)
        .map_err(core_error)?;
    serde_json::to_string(&assessment).map_err(to_napi_error)
}

#[napi]
pub fn compare_lenders(input_json: String) -> NapiResult<String> {
    let args: CompareArgs = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let offers = args.offers.unwrap_or_else(mortgage::standard_offers);
    let quotes =
        mortgage::quote_lenders(args.loan_amount, args.tenure_years, &offers).map_err(core_error)?;
    serde_json::to_string(&quotes).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let args: EmiArgs = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let schedule =
        mortgage::amortization_schedule(args.principal, args.annual_rate_percent, args.tenure_years)
            .map_err(core_error)?;
    serde_json::to_string(&schedule).map_err(to_napi_error)
}
