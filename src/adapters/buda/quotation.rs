//! Buda Quotation Adapter - Market Sale Quotations
//!
//! Implements the `QuotationSource` port against Buda's
//! `POST /markets/{market}/quotations` endpoint using `ask_given_size`
//! quotations, and maps every HTTP outcome into the valuation taxonomy.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

use super::client::BudaClient;
use super::types::{ApiErrorBody, QuotationRequest, QuotationResponse};
use crate::adapters::metrics::{MetricsRegistry, OUTCOME_OK};
use crate::domain::{market_id, SaleValue, ValuationError};
use crate::ports::QuotationSource;

/// Quotation service over the shared Buda client.
///
/// Holds only cheap handles, so it can be cloned or wrapped per request
/// without touching the connection pool.
#[derive(Clone)]
pub struct BudaQuotationService {
    client: BudaClient,
    metrics: Option<Arc<MetricsRegistry>>,
}

impl BudaQuotationService {
    /// Create a quotation service over an existing client.
    pub fn new(client: BudaClient) -> Self {
        Self {
            client,
            metrics: None,
        }
    }

    /// Count every quotation outcome in `metrics`.
    pub fn with_metrics(mut self, metrics: Arc<MetricsRegistry>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Issue the quotation request and interpret the response.
    async fn request_sale_value(
        &self,
        market: &str,
        amount: Decimal,
    ) -> Result<Decimal, ValuationError> {
        let path = format!("/markets/{market}/quotations");
        let response = self
            .client
            .post_json(&path, &QuotationRequest::ask_given_size(amount))
            .await
            .map_err(|e| ValuationError::UpstreamUnreachable {
                market: market.to_string(),
                reason: e.to_string(),
            })?;

        Self::interpret(market, response).await
    }

    /// Map an HTTP response to a sale value or a valuation error.
    ///
    /// - 2xx: `quotation.quote_exchanged[0]`
    /// - 404: unknown market
    /// - other 4xx: rejected, with Buda's `message` or the raw body
    /// - 5xx and anything else: unavailable
    async fn interpret(market: &str, response: Response) -> Result<Decimal, ValuationError> {
        let status = response.status();

        if status.is_success() {
            let body: QuotationResponse =
                response
                    .json()
                    .await
                    .map_err(|e| ValuationError::MalformedQuotation {
                        market: market.to_string(),
                        reason: e.to_string(),
                    })?;
            return body
                .quotation
                .exchanged_amount()
                .map_err(|reason| ValuationError::MalformedQuotation {
                    market: market.to_string(),
                    reason,
                });
        }

        if status == StatusCode::NOT_FOUND {
            return Err(ValuationError::MarketNotFound {
                market: market.to_string(),
            });
        }

        if status.is_client_error() {
            let raw = response.text().await.unwrap_or_default();
            return Err(ValuationError::UpstreamRejected {
                market: market.to_string(),
                message: ApiErrorBody::message_from(&raw),
                status: status.as_u16(),
            });
        }

        Err(ValuationError::UpstreamUnavailable {
            status: status.as_u16(),
        })
    }

    fn record(&self, outcome: &Result<Decimal, ValuationError>) {
        if let Some(metrics) = &self.metrics {
            match outcome {
                Ok(_) => metrics.record_quotation(OUTCOME_OK),
                Err(e) => metrics.record_quotation(e.kind()),
            }
        }
    }
}

#[async_trait]
impl QuotationSource for BudaQuotationService {
    #[instrument(skip(self))]
    async fn quote(
        &self,
        base_asset: &str,
        fiat_currency: &str,
        amount: Decimal,
    ) -> Result<SaleValue, ValuationError> {
        let market = market_id(base_asset, fiat_currency);
        let start = Instant::now();

        let outcome = self.request_sale_value(&market, amount).await;
        self.record(&outcome);

        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &outcome {
            Ok(value) => debug!(%market, %value, elapsed_ms, "Quotation received"),
            Err(e) => warn!(%market, error = %e, kind = e.kind(), elapsed_ms, "Quotation failed"),
        }

        outcome.map(|value| SaleValue::new(base_asset, value))
    }
}
