use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use homeloan_core::mortgage::{
    amortization_schedule, assess_affordability, calculate_mortgage, quote_lenders,
    standard_offers, LenderOffer, LenderQuote, MortgageInput,
};

use crate::input;

/// Arguments for a full mortgage calculation
#[derive(Args)]
pub struct CalculateArgs {
    /// Property price
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Down payment
    #[arg(long, default_value = "0")]
    pub down_payment: Decimal,

    /// Annual interest rate in percent (e.g. 8.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in years
    #[arg(long, default_value = "20")]
    pub tenure: u32,

    /// Monthly income for the affordability assessment
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Attach a yearly amortization schedule
    #[arg(long)]
    pub schedule: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for an affordability check
#[derive(Args)]
pub struct AffordabilityArgs {
    /// Monthly installment
    #[arg(long)]
    pub emi: Decimal,

    /// Monthly income
    #[arg(long)]
    pub income: Decimal,
}

/// Arguments for a lender comparison table
#[derive(Args)]
pub struct CompareArgs {
    /// Loan amount held fixed across lenders
    #[arg(long)]
    pub loan_amount: Decimal,

    /// Tenure in years
    #[arg(long, default_value = "20")]
    pub tenure: u32,

    /// JSON file with an array of lender offers (defaults to the built-in table)
    #[arg(long)]
    pub offers: Option<String>,
}

/// Arguments for an amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Decimal,

    /// Tenure in years
    #[arg(long, default_value = "20")]
    pub tenure: u32,
}

/// Flat comparison row for tabular output.
#[derive(Debug, Serialize, Deserialize)]
struct ComparisonRow {
    lender: String,
    rate_percent: Decimal,
    monthly_installment: Decimal,
    total_interest: Decimal,
    processing_fee: Decimal,
    total_cost: Decimal,
    /// Extra monthly outlay versus the cheapest lender
    emi_vs_best: Decimal,
}

pub fn run_calculate(args: CalculateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mortgage_input: MortgageInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        MortgageInput {
            property_price: args
                .price
                .ok_or("--price is required (or provide --input)")?,
            down_payment: args.down_payment,
            annual_interest_rate_percent: args
                .rate
                .ok_or("--rate is required (or provide --input)")?,
            tenure_years: args.tenure,
            monthly_income: args.income,
            include_schedule: args.schedule,
            affordability_policy: None,
        }
    };

    debug!(
        price = %mortgage_input.property_price,
        rate = %mortgage_input.annual_interest_rate_percent,
        tenure = mortgage_input.tenure_years,
        "running mortgage calculation"
    );
    let result = calculate_mortgage(&mortgage_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_affordability(args: AffordabilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let assessment = assess_affordability(args.emi, args.income)?;
    Ok(json!({
        "emi_to_income_ratio_percent": assessment.emi_to_income_ratio_percent,
        "tier": assessment.tier,
        "label": assessment.tier.label(),
    }))
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let offers: Vec<LenderOffer> = match args.offers {
        Some(ref path) => input::file::read_json(path)?,
        None => standard_offers(),
    };
    if offers.is_empty() {
        return Err("offers file contains no lenders".into());
    }
    debug!(lenders = offers.len(), "comparing lenders");

    let quotes = quote_lenders(args.loan_amount, args.tenure, &offers)?;
    Ok(serde_json::to_value(comparison_rows(&quotes))?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule = amortization_schedule(args.principal, args.rate, args.tenure)?;
    Ok(serde_json::to_value(schedule)?)
}

fn comparison_rows(quotes: &[LenderQuote]) -> Vec<ComparisonRow> {
    let best = quotes
        .iter()
        .map(|q| q.result.monthly_installment)
        .min()
        .unwrap_or(dec!(0));

    quotes
        .iter()
        .map(|q| ComparisonRow {
            lender: q.lender_name.clone(),
            rate_percent: q.annual_rate_percent,
            monthly_installment: q.result.monthly_installment,
            total_interest: q.result.total_interest,
            processing_fee: q.processing_fee,
            total_cost: q.total_cost,
            emi_vs_best: q.result.monthly_installment - best,
        })
        .collect()
}
