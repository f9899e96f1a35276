use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::HomeLoanError;
use crate::mortgage::emi::{loan_result_for_principal, LoanResult};
use crate::types::{Money, Percent};
use crate::HomeLoanResult;

/// A lender's headline terms. Supplied by the caller as static data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LenderOffer {
    pub lender_name: String,
    /// Annual rate in percent
    pub annual_rate_percent: Percent,
    /// One-off processing fee as a percent of the loan amount
    pub processing_fee_percent: Percent,
}

impl LenderOffer {
    pub fn new(
        lender_name: &str,
        annual_rate_percent: Percent,
        processing_fee_percent: Percent,
    ) -> Self {
        Self {
            lender_name: lender_name.to_string(),
            annual_rate_percent,
            processing_fee_percent,
        }
    }
}

/// One row of a lender comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LenderQuote {
    pub lender_name: String,
    pub annual_rate_percent: Percent,
    pub processing_fee: Money,
    pub result: LoanResult,
    /// total_payable plus the processing fee
    pub total_cost: Money,
}

/// Sample lender table used when the caller does not supply one.
pub fn standard_offers() -> Vec<LenderOffer> {
    vec![
        LenderOffer::new("National Savings Bank", dec!(8.40), dec!(0.35)),
        LenderOffer::new("City Housing Finance", dec!(8.55), dec!(0.50)),
        LenderOffer::new("Metro Cooperative Bank", dec!(8.75), dec!(0.25)),
        LenderOffer::new("Union Mortgage Corp", dec!(9.10), Decimal::ZERO),
    ]
}

/// Recompute the loan at each lender's rate, holding principal and tenure
/// fixed. Output order follows `offers`.
pub fn compare_lenders(
    loan_amount: Money,
    tenure_years: u32,
    offers: &[LenderOffer],
) -> HomeLoanResult<Vec<LoanResult>> {
    offers
        .iter()
        .map(|offer| {
            loan_result_for_principal(loan_amount, offer.annual_rate_percent, tenure_years)
                .map_err(|e| with_lender(e, &offer.lender_name))
        })
        .collect()
}

/// `compare_lenders` plus processing fees and fee-inclusive cost.
pub fn quote_lenders(
    loan_amount: Money,
    tenure_years: u32,
    offers: &[LenderOffer],
) -> HomeLoanResult<Vec<LenderQuote>> {
    let results = compare_lenders(loan_amount, tenure_years, offers)?;
    tracing::debug!(lenders = offers.len(), %loan_amount, tenure_years, "quoting lenders");

    offers
        .iter()
        .zip(results)
        .map(|(offer, result)| {
            if offer.processing_fee_percent < Decimal::ZERO {
                return Err(HomeLoanError::invalid(
                    "processing_fee_percent",
                    format!("{}: processing fee cannot be negative", offer.lender_name),
                ));
            }
            let processing_fee = (offer.processing_fee_percent / dec!(100))
                .checked_mul(loan_amount)
                .ok_or_else(|| fee_overflow(&offer.lender_name))?;
            let total_cost = result
                .total_payable
                .checked_add(processing_fee)
                .ok_or_else(|| fee_overflow(&offer.lender_name))?;
            Ok(LenderQuote {
                lender_name: offer.lender_name.clone(),
                annual_rate_percent: offer.annual_rate_percent,
                processing_fee,
                total_cost,
                result,
            })
        })
        .collect()
}

fn fee_overflow(lender_name: &str) -> HomeLoanError {
    HomeLoanError::invalid(
        "processing_fee_percent",
        format!("{lender_name}: fee-inclusive cost exceeds the representable range"),
    )
}

fn with_lender(err: HomeLoanError, lender_name: &str) -> HomeLoanError {
    match err {
        HomeLoanError::InvalidArgument { field, reason } => HomeLoanError::InvalidArgument {
            field,
            reason: format!("{lender_name}: {reason}"),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mortgage::emi::compute_emi;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_results_follow_input_order() {
        let offers = vec![
            LenderOffer::new("C", dec!(9.0), dec!(0.5)),
            LenderOffer::new("A", dec!(8.5), dec!(0.5)),
            LenderOffer::new("B", dec!(8.75), dec!(0.5)),
        ];
        let results = compare_lenders(dec!(4000000), 20, &offers).unwrap();

        assert_eq!(results.len(), 3);
        for (offer, result) in offers.iter().zip(&results) {
            let expected = compute_emi(dec!(4000000), offer.annual_rate_percent, 20).unwrap();
            assert_eq!(result.monthly_installment, expected);
            assert_eq!(result.loan_amount, dec!(4000000));
            assert_eq!(
                result.total_interest,
                result.total_payable - result.loan_amount
            );
        }
        // 9% row stays first even though it is the most expensive
        assert!(results[0].monthly_installment > results[1].monthly_installment);
    }

    #[test]
    fn test_empty_offers() {
        assert!(compare_lenders(dec!(1000000), 10, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_quote_processing_fee() {
        let offers = vec![LenderOffer::new("City Housing Finance", dec!(8.55), dec!(0.5))];
        let quotes = quote_lenders(dec!(4000000), 20, &offers).unwrap();
        assert_eq!(quotes[0].processing_fee, dec!(20000));
        assert_eq!(
            quotes[0].total_cost,
            quotes[0].result.total_payable + dec!(20000)
        );
    }

    #[test]
    fn test_negative_fee_rejected() {
        let offers = vec![LenderOffer::new("Bad", dec!(8.5), dec!(-1))];
        assert!(quote_lenders(dec!(1000000), 10, &offers).is_err());
    }

    #[test]
    fn test_full_fee_on_very_large_loan() {
        let offers = vec![LenderOffer::new("X", dec!(6), dec!(100))];
        let quotes = quote_lenders(dec!(1000000000000000000000000000), 1, &offers).unwrap();
        assert_eq!(quotes[0].processing_fee, dec!(1000000000000000000000000000));
        assert!(quotes[0].total_cost > quotes[0].result.total_payable);
    }

    #[test]
    fn test_fee_inclusive_cost_out_of_range() {
        // 5e28 repaid plus a 100% fee exceeds Decimal::MAX (~7.9e28)
        let offers = vec![LenderOffer::new("Whale Bank", Decimal::ZERO, dec!(100))];
        let err = quote_lenders(dec!(50000000000000000000000000000), 1, &offers).unwrap_err();
        assert_eq!(err.code(), "InvalidArgument");
        assert!(err.to_string().contains("Whale Bank"));
    }

    #[test]
    fn test_error_names_lender() {
        let offers = vec![LenderOffer::new("Odd Lender", dec!(-2), Decimal::ZERO)];
        let err = compare_lenders(dec!(1000000), 10, &offers).unwrap_err();
        assert!(err.to_string().contains("Odd Lender"));
    }

    #[test]
    fn test_standard_offers() {
        let offers = standard_offers();
        assert_eq!(offers.len(), 4);
        assert!(offers.iter().all(|o| o.annual_rate_percent >= dec!(6)));
    }
}
