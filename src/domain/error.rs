//! Valuation error taxonomy.
//!
//! Every failure a portfolio valuation can produce, from amount
//! validation through to the exchange's responses. Each error belongs
//! to an [`ErrorClass`] that the HTTP boundary maps to a status code.

use thiserror::Error;

use super::portfolio::MarketId;

/// Who is responsible for a failed valuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The request itself cannot be valued (bad amount, unknown market,
    /// request refused by the exchange).
    Caller,
    /// The exchange failed or answered outside its contract.
    Upstream,
}

/// Failure of a single quotation or of a whole portfolio valuation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValuationError {
    /// A held amount was zero or negative. Raised before any network call.
    #[error("All amounts must be higher than 0")]
    InvalidAmount,

    /// The exchange answered 404 for the market.
    #[error("Market '{market}' does not exist")]
    MarketNotFound { market: MarketId },

    /// The exchange refused the quotation with a non-404 client error.
    #[error("{message}")]
    UpstreamRejected {
        market: MarketId,
        message: String,
        status: u16,
    },

    /// The exchange answered with a server error.
    #[error("Buda API is unavailable")]
    UpstreamUnavailable { status: u16 },

    /// The request never produced a response (connect error, timeout).
    #[error("Buda API could not be reached")]
    UpstreamUnreachable { market: MarketId, reason: String },

    /// A successful response whose body does not carry a usable quotation.
    #[error("Buda API returned an invalid quotation for market '{market}'")]
    MalformedQuotation { market: MarketId, reason: String },

    /// The quoted sale values sum past the range of `Decimal`.
    #[error("Portfolio value is outside the supported range")]
    TotalOutOfRange,
}

impl ValuationError {
    /// Classify the error for transport-level mapping.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidAmount | Self::MarketNotFound { .. } | Self::UpstreamRejected { .. } => {
                ErrorClass::Caller
            }
            Self::UpstreamUnavailable { .. }
            | Self::UpstreamUnreachable { .. }
            | Self::MalformedQuotation { .. }
            | Self::TotalOutOfRange => ErrorClass::Upstream,
        }
    }

    /// Short stable label, used as a metrics dimension.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidAmount => "invalid_amount",
            Self::MarketNotFound { .. } => "market_not_found",
            Self::UpstreamRejected { .. } => "upstream_rejected",
            Self::UpstreamUnavailable { .. } => "upstream_unavailable",
            Self::UpstreamUnreachable { .. } => "upstream_unreachable",
            Self::MalformedQuotation { .. } => "malformed_quotation",
            Self::TotalOutOfRange => "total_out_of_range",
        }
    }

    /// Market the error refers to, when it came from a specific quotation.
    pub fn market(&self) -> Option<&str> {
        match self {
            Self::MarketNotFound { market }
            | Self::UpstreamRejected { market, .. }
            | Self::UpstreamUnreachable { market, .. }
            | Self::MalformedQuotation { market, .. } => Some(market),
            Self::InvalidAmount | Self::UpstreamUnavailable { .. } | Self::TotalOutOfRange => None,
        }
    }
}
