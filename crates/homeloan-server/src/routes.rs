use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

use homeloan_core::mortgage::{
    calculate_mortgage, quote_lenders, standard_offers, AffordabilityTier, LenderOffer,
    LenderQuote, MortgageInput,
};

use crate::error::AppError;

#[derive(Clone, Default)]
pub struct AppState {
    pub readiness: Arc<AtomicBool>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/mortgage/calculate", post(calculate_endpoint))
        .route("/mortgage/compare", post(compare_endpoint))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Wire types (camelCase JSON, plain numbers)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    pub property_price: Decimal,
    pub down_payment: Decimal,
    pub annual_interest_rate_percent: Decimal,
    pub tenure_years: u32,
    #[serde(default)]
    pub monthly_income: Option<Decimal>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub loan_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_installment: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_payable: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_interest: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affordability: Option<AffordabilityBody>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AffordabilityBody {
    #[serde(with = "rust_decimal::serde::float")]
    pub emi_to_income_ratio_percent: Decimal,
    pub tier: AffordabilityTier,
    pub label: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    pub loan_amount: Decimal,
    pub tenure_years: u32,
    #[serde(default)]
    pub offers: Option<Vec<OfferBody>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferBody {
    pub lender_name: String,
    pub annual_rate_percent: Decimal,
    #[serde(default)]
    pub processing_fee_percent: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteBody {
    pub lender_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub annual_rate_percent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_installment: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_payable: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_interest: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub processing_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
}

impl From<LenderQuote> for QuoteBody {
    fn from(q: LenderQuote) -> Self {
        Self {
            lender_name: q.lender_name,
            annual_rate_percent: q.annual_rate_percent,
            monthly_installment: q.result.monthly_installment,
            total_payable: q.result.total_payable,
            total_interest: q.result.total_interest,
            processing_fee: q.processing_fee,
            total_cost: q.total_cost,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    if state.readiness.load(Ordering::Relaxed) {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "initializing" })),
        )
    }
}

pub(crate) async fn calculate_endpoint(
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<Json<CalculateResponse>, AppError> {
    let Json(req) = payload?;
    debug!(?req, "calculate request");

    let input = MortgageInput {
        property_price: req.property_price,
        down_payment: req.down_payment,
        annual_interest_rate_percent: req.annual_interest_rate_percent,
        tenure_years: req.tenure_years,
        monthly_income: req.monthly_income,
        include_schedule: false,
        affordability_policy: None,
    };
    let output = calculate_mortgage(&input)?;
    let result = output.result;

    Ok(Json(CalculateResponse {
        loan_amount: result.loan.loan_amount,
        monthly_installment: result.loan.monthly_installment,
        total_payable: result.loan.total_payable,
        total_interest: result.loan.total_interest,
        affordability: result.affordability.map(|a| AffordabilityBody {
            emi_to_income_ratio_percent: a.emi_to_income_ratio_percent,
            tier: a.tier,
            label: a.tier.label(),
        }),
        warnings: output.warnings,
    }))
}

pub(crate) async fn compare_endpoint(
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> Result<Json<Vec<QuoteBody>>, AppError> {
    let Json(req) = payload?;

    let offers: Vec<LenderOffer> = match req.offers {
        Some(bodies) => bodies
            .into_iter()
            .map(|b| LenderOffer {
                lender_name: b.lender_name,
                annual_rate_percent: b.annual_rate_percent,
                processing_fee_percent: b.processing_fee_percent,
            })
            .collect(),
        None => standard_offers(),
    };

    let quotes = quote_lenders(req.loan_amount, req.tenure_years, &offers)?;
    Ok(Json(quotes.into_iter().map(QuoteBody::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let response = router(AppState::default())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let value = serde_json::from_slice(&bytes).expect("json body");
        (status, value)
    }

    #[tokio::test]
    async fn calculate_returns_loan_summary() {
        let (status, body) = post_json(
            "/mortgage/calculate",
            json!({
                "propertyPrice": 5000000,
                "downPayment": 1000000,
                "annualInterestRatePercent": 8.5,
                "tenureYears": 20,
                "monthlyIncome": 100000
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["loanAmount"].as_f64(), Some(4000000.0));
        let emi = body["monthlyInstallment"].as_f64().expect("numeric EMI");
        assert!((emi - 34712.93).abs() < 0.01, "EMI {emi}");
        assert_eq!(body["affordability"]["tier"], "Good");
        assert!(body.get("warnings").is_none());
    }

    #[tokio::test]
    async fn calculate_rejects_down_payment_above_price() {
        let (status, body) = post_json(
            "/mortgage/calculate",
            json!({
                "propertyPrice": 1000000,
                "downPayment": 1500000,
                "annualInterestRatePercent": 8.5,
                "tenureYears": 20
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "InvalidArgument");
        assert!(body["message"].as_str().unwrap().starts_with("down_payment"));
    }

    #[tokio::test]
    async fn calculate_rejects_malformed_body() {
        let (status, body) = post_json(
            "/mortgage/calculate",
            json!({ "propertyPrice": 1000000, "tenureYears": -3 }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "InvalidArgument");
    }

    #[tokio::test]
    async fn compare_uses_standard_offers_by_default() {
        let (status, body) = post_json(
            "/mortgage/compare",
            json!({ "loanAmount": 4000000, "tenureYears": 20 }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().expect("array of quotes");
        assert_eq!(rows.len(), standard_offers().len());
        assert_eq!(rows[0]["lenderName"], "National Savings Bank");
    }

    #[tokio::test]
    async fn compare_keeps_caller_order() {
        let (status, body) = post_json(
            "/mortgage/compare",
            json!({
                "loanAmount": 1000000,
                "tenureYears": 10,
                "offers": [
                    { "lenderName": "B", "annualRatePercent": 9.5 },
                    { "lenderName": "A", "annualRatePercent": 8.0, "processingFeePercent": 1 }
                ]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["lenderName"], "B");
        assert_eq!(body[1]["processingFee"].as_f64(), Some(10000.0));
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let state = AppState::default();
        let response = readiness_endpoint(State(state.clone())).await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        state.readiness.store(true, Ordering::Release);
        let response = readiness_endpoint(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
