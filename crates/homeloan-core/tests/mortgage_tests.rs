use homeloan_core::mortgage::{
    assess_affordability, calculate_mortgage, classify_ratio, compare_lenders, compute_emi,
    compute_loan_result, quote_lenders, residual_balance, standard_offers, AffordabilityTier,
    LenderOffer, LoanParameters, MortgageInput,
};
use homeloan_core::HomeLoanError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Reference scenarios
// ===========================================================================

#[test]
fn test_five_million_property_twenty_years() {
    let params = LoanParameters {
        property_price: dec!(5000000),
        down_payment: dec!(1000000),
        annual_interest_rate_percent: dec!(8.5),
        tenure_years: 20,
    };
    let result = compute_loan_result(&params).unwrap();

    assert_eq!(result.loan_amount, dec!(4000000));
    assert!(
        (result.monthly_installment - dec!(34713)).abs() < dec!(1),
        "EMI ~34,713, got {}",
        result.monthly_installment
    );
    // With the EMI rounded to 34,713 the UI shows 8,331,120 / 4,331,120;
    // the unrounded totals sit about 17 below that.
    let displayed_total = result.monthly_installment.round() * dec!(240);
    assert_eq!(displayed_total, dec!(8331120));
    assert!((result.total_payable - dec!(8331120)).abs() < dec!(20));
    assert!((result.total_interest - dec!(4331120)).abs() < dec!(20));
}

#[test]
fn test_fully_paid_property_has_no_loan() {
    let params = LoanParameters {
        property_price: dec!(750000),
        down_payment: dec!(750000),
        annual_interest_rate_percent: dec!(7),
        tenure_years: 10,
    };
    let result = compute_loan_result(&params).unwrap();
    assert_eq!(result.monthly_installment, Decimal::ZERO);
    assert_eq!(result.total_interest, Decimal::ZERO);
}

#[test]
fn test_down_payment_above_price_is_invalid() {
    let params = LoanParameters {
        property_price: dec!(750000),
        down_payment: dec!(800000),
        annual_interest_rate_percent: dec!(7),
        tenure_years: 10,
    };
    match compute_loan_result(&params).unwrap_err() {
        HomeLoanError::InvalidArgument { field, .. } => assert_eq!(field, "down_payment"),
        e => panic!("Expected InvalidArgument, got {e:?}"),
    }
}

// ===========================================================================
// Amortization properties
// ===========================================================================

#[test]
fn test_amortization_identity_across_grid() {
    for principal in [dec!(100000), dec!(2500000), dec!(40000000)] {
        for rate in [dec!(6), dec!(8.5), dec!(10.75)] {
            for years in [1u32, 7, 15, 30] {
                let residual = residual_balance(principal, rate, years).unwrap();
                assert!(
                    residual.abs() < dec!(0.01),
                    "P {principal} r {rate} y {years}: residual {residual}"
                );
            }
        }
    }
}

#[test]
fn test_emi_monotonic_in_rate_and_tenure() {
    let p = dec!(3000000);
    assert!(compute_emi(p, dec!(8.6), 20).unwrap() > compute_emi(p, dec!(8.5), 20).unwrap());
    assert!(compute_emi(p, dec!(8.5), 21).unwrap() < compute_emi(p, dec!(8.5), 20).unwrap());
}

// ===========================================================================
// Affordability
// ===========================================================================

#[test]
fn test_affordability_boundaries() {
    assert_eq!(classify_ratio(dec!(30.0)), AffordabilityTier::Excellent);
    assert_eq!(classify_ratio(dec!(30.01)), AffordabilityTier::Good);
    assert_eq!(classify_ratio(dec!(50.0)), AffordabilityTier::Moderate);
    assert_eq!(classify_ratio(dec!(50.01)), AffordabilityTier::HighRisk);
}

#[test]
fn test_affordability_of_reference_loan() {
    let emi = compute_emi(dec!(4000000), dec!(8.5), 20).unwrap();
    let a = assess_affordability(emi, dec!(150000)).unwrap();
    // ~23.1%
    assert_eq!(a.tier, AffordabilityTier::Excellent);
    assert!((a.emi_to_income_ratio_percent - dec!(23.14)).abs() < dec!(0.01));
}

// ===========================================================================
// Lender comparison
// ===========================================================================

#[test]
fn test_compare_lenders_preserves_order_and_identities() {
    let offers = vec![
        LenderOffer::new("Third", dec!(9.25), dec!(0.4)),
        LenderOffer::new("First", dec!(8.10), dec!(1.0)),
        LenderOffer::new("Second", dec!(8.60), dec!(0.0)),
    ];
    let results = compare_lenders(dec!(4000000), 20, &offers).unwrap();
    assert_eq!(results.len(), offers.len());

    for (offer, r) in offers.iter().zip(&results) {
        assert_eq!(
            r.monthly_installment,
            compute_emi(dec!(4000000), offer.annual_rate_percent, 20).unwrap()
        );
        assert_eq!(r.total_payable, r.monthly_installment * dec!(240));
        assert_eq!(r.total_interest, r.total_payable - r.loan_amount);
    }
}

#[test]
fn test_quote_standard_offers() {
    let quotes = quote_lenders(dec!(4000000), 20, &standard_offers()).unwrap();
    assert_eq!(quotes.len(), 4);
    assert_eq!(quotes[0].lender_name, "National Savings Bank");
    assert!(quotes.iter().all(|q| q.total_cost >= q.result.total_payable));
}

// ===========================================================================
// Request-level entry point
// ===========================================================================

#[test]
fn test_calculate_mortgage_envelope_serializes() {
    let input = MortgageInput {
        property_price: dec!(5000000),
        down_payment: dec!(1000000),
        annual_interest_rate_percent: dec!(8.5),
        tenure_years: 20,
        monthly_income: Some(dec!(100000)),
        include_schedule: false,
        affordability_policy: None,
    };
    let out = calculate_mortgage(&input).unwrap();
    let json = serde_json::to_value(&out).unwrap();

    assert_eq!(json["result"]["loan_amount"], "4000000");
    assert_eq!(json["result"]["affordability"]["tier"], "Good");
    assert!(json["result"].get("schedule").is_none());
    assert_eq!(json["assumptions"]["tenure_years"], 20);
}
