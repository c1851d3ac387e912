//! API Tests - HTTP Surface Against a Mocked Quotation Port
//!
//! Drives the axum router with `tower::ServiceExt::oneshot` and checks
//! status codes and bodies for every outcome class.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use mockall::mock;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tower::ServiceExt;

use portfolio_valuation::adapters::http::{app_router, AppState};
use portfolio_valuation::adapters::metrics::MetricsRegistry;
use portfolio_valuation::domain::{SaleValue, ValuationError};
use portfolio_valuation::ports::QuotationSource;

mock! {
    pub Quotes {}

    #[async_trait::async_trait]
    impl QuotationSource for Quotes {
        async fn quote(
            &self,
            base_asset: &str,
            fiat_currency: &str,
            amount: Decimal,
        ) -> Result<SaleValue, ValuationError>;
    }
}

fn router(quotes: MockQuotes) -> Router {
    app_router(AppState::new(Arc::new(quotes)))
}

/// Quotes that answer from a fixed table; anything else is an unknown market.
fn quotes_with(sales: &[(&str, Decimal)]) -> MockQuotes {
    let sales: Vec<(String, Decimal)> = sales
        .iter()
        .map(|(asset, value)| ((*asset).to_string(), *value))
        .collect();
    let mut quotes = MockQuotes::new();
    quotes.expect_quote().returning(move |asset, fiat, _| {
        sales
            .iter()
            .find(|(known, _)| known == asset)
            .map(|(_, value)| SaleValue::new(asset, *value))
            .ok_or_else(|| ValuationError::MarketNotFound {
                market: format!("{asset}-{fiat}"),
            })
    });
    quotes
}

fn failing_with(error: ValuationError) -> MockQuotes {
    let mut quotes = MockQuotes::new();
    quotes
        .expect_quote()
        .returning(move |_, _, _| Err(error.clone()));
    quotes
}

async fn post_json(app: Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate-portfolio-value")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

// ── Health ──────────────────────────────────────────────────

#[tokio::test]
async fn test_health_check_returns_ok() {
    let response = router(MockQuotes::new())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"message": "ok"}));
}

// ── Valuation ───────────────────────────────────────────────

#[tokio::test]
async fn test_single_currency_portfolio() {
    let app = router(quotes_with(&[("BTC", dec!(50000000.0))]));

    let (status, body) = post_json(
        app,
        json!({"portfolio": {"BTC": 1.0}, "fiat_currency": "CLP"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["portfolio_value"].as_f64(), Some(50000000.0));
    assert_eq!(body["fiat_currency"], "CLP");
}

#[tokio::test]
async fn test_multiple_currencies_portfolio() {
    let app = router(quotes_with(&[
        ("BTC", dec!(50000000.0)),
        ("ETH", dec!(2000000.0)),
        ("USDT", dec!(1000000.0)),
    ]));

    let (status, body) = post_json(
        app,
        json!({
            "portfolio": {"BTC": 1.0, "ETH": 2.0, "USDT": 1000.0},
            "fiat_currency": "CLP"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["portfolio_value"].as_f64(), Some(53000000.0));
}

#[tokio::test]
async fn test_empty_portfolio_returns_zero() {
    let mut quotes = MockQuotes::new();
    quotes.expect_quote().never();

    let (status, body) = post_json(
        router(quotes),
        json!({"portfolio": {}, "fiat_currency": "CLP"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["portfolio_value"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn test_invalid_currency_returns_400() {
    let app = router(quotes_with(&[("BTC", dec!(100.0))]));

    let (status, body) = post_json(
        app,
        json!({"portfolio": {"FAKECOIN": 1.0}, "fiat_currency": "CLP"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("FAKECOIN-CLP"));
}

#[tokio::test]
async fn test_non_positive_amounts_return_400_without_calls() {
    for amount in [json!(-1.0), json!(0.0)] {
        let mut quotes = MockQuotes::new();
        quotes.expect_quote().never();

        let (status, body) = post_json(
            router(quotes),
            json!({"portfolio": {"BTC": amount}, "fiat_currency": "CLP"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("higher than 0"));
    }
}

#[tokio::test]
async fn test_exchange_server_error_returns_502() {
    let app = router(failing_with(ValuationError::UpstreamUnavailable {
        status: 503,
    }));

    let (status, body) = post_json(
        app,
        json!({"portfolio": {"BTC": 1.0}, "fiat_currency": "CLP"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["detail"], "Buda API is unavailable");
}

#[tokio::test]
async fn test_exchange_client_error_returns_400_with_message() {
    let app = router(failing_with(ValuationError::UpstreamRejected {
        market: "BTC-CLP".to_string(),
        message: "Invalid request".to_string(),
        status: 422,
    }));

    let (status, body) = post_json(
        app,
        json!({"portfolio": {"BTC": 1.0}, "fiat_currency": "CLP"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid request");
}

#[tokio::test]
async fn test_unreachable_exchange_returns_502() {
    let app = router(failing_with(ValuationError::UpstreamUnreachable {
        market: "BTC-CLP".to_string(),
        reason: "operation timed out".to_string(),
    }));

    let (status, _) = post_json(
        app,
        json!({"portfolio": {"BTC": 1.0}, "fiat_currency": "CLP"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_overflowing_total_returns_502() {
    let app = router(quotes_with(&[("BTC", Decimal::MAX), ("ETH", Decimal::MAX)]));

    let (status, body) = post_json(
        app,
        json!({"portfolio": {"BTC": 1.0, "ETH": 1.0}, "fiat_currency": "CLP"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["detail"], "Portfolio value is outside the supported range");
}

// ── Shape validation ────────────────────────────────────────

#[tokio::test]
async fn test_unrepresentable_positive_amounts_return_422_without_calls() {
    for amount in [json!(1e-30), json!(1e30)] {
        let mut quotes = MockQuotes::new();
        quotes.expect_quote().never();

        let (status, body) = post_json(
            router(quotes),
            json!({"portfolio": {"SHIB": amount}, "fiat_currency": "CLP"}),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["loc"], json!(["body", "portfolio", "SHIB"]));
        assert_eq!(body["detail"][0]["type"], "amount_out_of_range");
    }
}

#[tokio::test]
async fn test_missing_portfolio_returns_422() {
    let (status, body) = post_json(
        router(MockQuotes::new()),
        json!({"fiat_currency": "CLP"}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["body", "portfolio"]));
    assert_eq!(body["detail"][0]["type"], "missing");
}

#[tokio::test]
async fn test_missing_fiat_currency_returns_422() {
    let (status, body) = post_json(
        router(MockQuotes::new()),
        json!({"portfolio": {"BTC": 1.0}}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["body", "fiat_currency"]));
}

#[tokio::test]
async fn test_malformed_json_returns_422() {
    let response = router(MockQuotes::new())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate-portfolio-value")
                .header("content-type", "application/json")
                .body(Body::from("{\"portfolio\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_missing_content_type_returns_415() {
    let response = router(MockQuotes::new())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate-portfolio-value")
                .body(Body::from(
                    json!({"portfolio": {}, "fiat_currency": "CLP"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

// ── Metrics ─────────────────────────────────────────────────

#[tokio::test]
async fn test_metrics_route_counts_valuations() {
    let metrics = Arc::new(MetricsRegistry::new().unwrap());
    let state = AppState::new(Arc::new(quotes_with(&[("BTC", dec!(10.0))])))
        .with_metrics(Arc::clone(&metrics));
    let app = app_router(state);

    let (status, _) = post_json(
        app.clone(),
        json!({"portfolio": {"BTC": 1.0}, "fiat_currency": "CLP"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("portfolio_valuation_requests_total{outcome=\"ok\"} 1"));
}

#[tokio::test]
async fn test_metrics_route_absent_when_disabled() {
    let response = router(MockQuotes::new())
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
