use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{error, info};

use super::error::ApiResult;
use super::schemas::{HealthResponse, PortfolioValueRequest, PortfolioValueResponse};
use super::state::AppState;
use crate::adapters::metrics::OUTCOME_OK;
use crate::usecases::PortfolioValuator;

/// Liveness: always 200 while the process serves requests.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { message: "ok" })
}

/// Calculate the value of a portfolio in a fiat currency in real time,
/// by quoting the sale of every holding on the exchange.
pub async fn calculate_portfolio_value(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<PortfolioValueResponse>> {
    let Json(body) = payload?;
    let request = PortfolioValueRequest::from_json(body)?;

    let start = Instant::now();
    let valuator = PortfolioValuator::new(Arc::clone(&state.quotations));
    let outcome = valuator
        .aggregate(&request.portfolio, &request.fiat_currency)
        .await;

    if let Some(metrics) = &state.metrics {
        let label = outcome.as_ref().map_or_else(|e| e.kind(), |_| OUTCOME_OK);
        metrics.record_valuation(label, start.elapsed());
    }

    let value = outcome?;
    info!(
        assets = request.portfolio.len(),
        fiat = %value.fiat_currency,
        total = %value.total,
        "Portfolio valuation served"
    );
    Ok(Json(PortfolioValueResponse::from(value)))
}

/// Prometheus text exposition.
pub async fn metrics(State(state): State<AppState>) -> Response {
    let Some(metrics) = &state.metrics else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match metrics.render() {
        Ok(text) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
