//! Portfolio valuation domain types.
//!
//! Defines the held portfolio, the per-asset sale value returned by a
//! quotation, and the aggregated portfolio value.
//!
//! Amounts and values are `Decimal` end to end so that summing sale
//! values is exact; conversion to JSON numbers only happens at the
//! HTTP boundary.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::error::ValuationError;

// ────────────────────────────────────────────
// Type aliases consumed by ports and adapters
// ────────────────────────────────────────────

/// Asset symbol as listed by the exchange (e.g. "BTC").
pub type AssetSymbol = String;

/// Fiat currency code (e.g. "CLP").
pub type FiatCurrency = String;

/// Market identifier in `{base}-{quote}` form (e.g. "BTC-CLP").
pub type MarketId = String;

/// Build the market identifier for selling `base_asset` into `fiat_currency`.
pub fn market_id(base_asset: &str, fiat_currency: &str) -> MarketId {
    format!("{base_asset}-{fiat_currency}")
}

// ────────────────────────────────────────────
// Portfolio
// ────────────────────────────────────────────

/// Held amounts keyed by asset symbol.
///
/// Backed by a `BTreeMap` so iteration order (and therefore which
/// failure is reported first) is deterministic for a given portfolio.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Portfolio(BTreeMap<AssetSymbol, Decimal>);

impl Portfolio {
    /// Creates an empty portfolio.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a holding.
    pub fn insert(&mut self, asset: impl Into<AssetSymbol>, amount: Decimal) {
        self.0.insert(asset.into(), amount);
    }

    /// Iterates over `(asset, amount)` pairs.
    pub fn holdings(&self) -> impl Iterator<Item = (&str, Decimal)> + '_ {
        self.0.iter().map(|(asset, amount)| (asset.as_str(), *amount))
    }

    /// Amount held for `asset`, if any.
    pub fn amount(&self, asset: &str) -> Option<Decimal> {
        self.0.get(asset).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks that every held amount is strictly positive.
    ///
    /// # Errors
    /// Returns `ValuationError::InvalidAmount` if any amount is zero or negative.
    pub fn validate(&self) -> Result<(), ValuationError> {
        if self.0.values().any(|amount| *amount <= Decimal::ZERO) {
            return Err(ValuationError::InvalidAmount);
        }
        Ok(())
    }
}

impl<K: Into<AssetSymbol>> FromIterator<(K, Decimal)> for Portfolio {
    fn from_iter<I: IntoIterator<Item = (K, Decimal)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(asset, amount)| (asset.into(), amount))
                .collect(),
        )
    }
}

// ────────────────────────────────────────────
// Quotation results
// ────────────────────────────────────────────

/// Fiat proceeds from selling the whole held amount of one asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleValue {
    /// Asset that was quoted.
    pub base_asset: AssetSymbol,
    /// Fiat amount received for the sale.
    pub value: Decimal,
}

impl SaleValue {
    pub fn new(base_asset: impl Into<AssetSymbol>, value: Decimal) -> Self {
        Self {
            base_asset: base_asset.into(),
            value,
        }
    }
}

/// Total fiat value of a portfolio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioValue {
    /// Sum of every asset's sale value.
    pub total: Decimal,
    /// Fiat currency the total is expressed in.
    pub fiat_currency: FiatCurrency,
}

impl PortfolioValue {
    /// Sums sale values into a portfolio total. An empty set sums to zero.
    ///
    /// # Errors
    /// Returns `ValuationError::TotalOutOfRange` if the sum overflows `Decimal`.
    pub fn from_sales<'a>(
        sales: impl IntoIterator<Item = &'a SaleValue>,
        fiat_currency: impl Into<FiatCurrency>,
    ) -> Result<Self, ValuationError> {
        let total = sales
            .into_iter()
            .try_fold(Decimal::ZERO, |total, sale| total.checked_add(sale.value))
            .ok_or(ValuationError::TotalOutOfRange)?;
        Ok(Self {
            total,
            fiat_currency: fiat_currency.into(),
        })
    }
}
