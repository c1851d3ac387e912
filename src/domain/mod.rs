//! Domain layer - Core business types.
//!
//! Pure valuation types and the error taxonomy. No I/O happens here
//! (hexagonal architecture inner ring); everything is testable in isolation.

pub mod error;
pub mod portfolio;

// Re-export core types for convenience
pub use error::{ErrorClass, ValuationError};
pub use portfolio::{
    market_id, AssetSymbol, FiatCurrency, MarketId, Portfolio, PortfolioValue, SaleValue,
};
