//! Quotation Port - Exchange Pricing Interface
//!
//! Defines the trait the valuation use case needs from an exchange:
//! "what fiat amount would I receive selling this much of this asset?"

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{SaleValue, ValuationError};

/// Trait for exchange quotation providers.
///
/// One call maps to exactly one outbound request. Implementors must not
/// retry or cache; the aggregator relies on every call being independent.
#[async_trait]
pub trait QuotationSource: Send + Sync + 'static {
  /// Quote the sale of `amount` units of `base_asset` for `fiat_currency`.
  ///
  /// # Errors
  /// Returns the `ValuationError` matching the exchange's answer
  /// (unknown market, rejection, unavailability).
  async fn quote(
    &self,
    base_asset: &str,
    fiat_currency: &str,
    amount: Decimal,
  ) -> Result<SaleValue, ValuationError>;
}
