//! Buda API Request/Response Types
//!
//! Serialization types for the market quotation endpoint.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Quotation mode requested from Buda.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotationType {
    /// Sell a given amount of the base asset, quote the fiat proceeds.
    AskGivenSize,
}

/// Body of `POST /markets/{market}/quotations`.
#[derive(Debug, Clone, Serialize)]
pub struct QuotationRequest {
    #[serde(rename = "type")]
    pub kind: QuotationType,
    /// Base asset amount, sent as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl QuotationRequest {
    pub fn ask_given_size(amount: Decimal) -> Self {
        Self {
            kind: QuotationType::AskGivenSize,
            amount,
        }
    }
}

/// Successful quotation response.
#[derive(Debug, Clone, Deserialize)]
pub struct QuotationResponse {
    pub quotation: Quotation,
}

/// Quotation payload. Only the fields the valuation needs are decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct Quotation {
    /// `[amount, currency]`, amount as a numeric string.
    pub quote_exchanged: Vec<String>,
}

impl Quotation {
    /// Fiat amount received, parsed from `quote_exchanged[0]`.
    ///
    /// # Errors
    /// Returns a description when the array is empty or the amount is not numeric.
    pub fn exchanged_amount(&self) -> Result<Decimal, String> {
        let raw = self
            .quote_exchanged
            .first()
            .ok_or_else(|| "quote_exchanged is empty".to_string())?;
        Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .map_err(|e| format!("quote_exchanged[0] {raw:?} is not a number: {e}"))
    }
}

/// Error body Buda returns on client errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Message to surface for an error response: the `message` field when the
    /// body is JSON carrying one, the raw body text otherwise.
    pub fn message_from(raw: &str) -> String {
        serde_json::from_str::<Self>(raw)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| raw.to_string())
    }
}
