//! Portfolio Valuator - Concurrent Fan-out Aggregation
//!
//! Values a whole portfolio in one fiat currency:
//! - Rejects non-positive amounts before touching the network
//! - Quotes every asset concurrently through the `QuotationSource` port
//! - Waits for every quotation to settle, then sums or fails
//!
//! A failed quotation does not cancel the others. Once all have settled,
//! the first failure in portfolio order is reported and no partial total
//! is ever returned.

use std::sync::Arc;
use std::time::Instant;

use futures_util::future::join_all;
use tracing::{debug, instrument, warn};

use crate::domain::{Portfolio, PortfolioValue, SaleValue, ValuationError};
use crate::ports::QuotationSource;

/// Values portfolios against a quotation source.
///
/// Cheap to build: constructed per request around a shared source.
pub struct PortfolioValuator<Q: QuotationSource + ?Sized> {
  /// Quotation port.
  quotations: Arc<Q>,
}

impl<Q: QuotationSource + ?Sized> PortfolioValuator<Q> {
  /// Create a new valuator over the given quotation source.
  pub fn new(quotations: Arc<Q>) -> Self {
    Self { quotations }
  }

  /// Compute the fiat value of `portfolio` in `fiat_currency`.
  ///
  /// # Errors
  /// - `ValuationError::InvalidAmount` if any amount is <= 0 (no calls made)
  /// - the first quotation error, in portfolio order, otherwise
  /// - `ValuationError::TotalOutOfRange` if the sale values overflow on summing
  #[instrument(skip(self, portfolio), fields(assets = portfolio.len()))]
  pub async fn aggregate(
    &self,
    portfolio: &Portfolio,
    fiat_currency: &str,
  ) -> Result<PortfolioValue, ValuationError> {
    portfolio.validate()?;

    let start = Instant::now();
    let outcomes = join_all(
      portfolio
        .holdings()
        .map(|(asset, amount)| self.quotations.quote(asset, fiat_currency, amount)),
    )
    .await;

    let failed = outcomes.iter().filter(|outcome| outcome.is_err()).count();
    if failed > 0 {
      warn!(
        failed,
        settled = outcomes.len(),
        "Quotations failed, discarding portfolio total"
      );
    }

    let sales = outcomes
      .into_iter()
      .collect::<Result<Vec<SaleValue>, ValuationError>>()?;
    let value = PortfolioValue::from_sales(&sales, fiat_currency)?;

    debug!(
      total = %value.total,
      elapsed_ms = start.elapsed().as_millis() as u64,
      "Portfolio valued"
    );

    Ok(value)
  }
}
