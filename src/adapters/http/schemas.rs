//! Inbound request/response schemas for the valuation API.
//!
//! The request body is decoded field by field so that shape problems
//! come back as structured, per-field errors rather than one opaque
//! deserialization message.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::{FiatCurrency, Portfolio, PortfolioValue};

/// One shape-validation problem in a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Path to the offending value, starting at `"body"`.
    pub loc: Vec<String>,
    /// Human-readable description.
    pub msg: String,
    /// Machine-readable category.
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl FieldError {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: &'static str) -> Self {
        Self {
            loc: loc.iter().map(|segment| (*segment).to_string()).collect(),
            msg: msg.into(),
            kind,
        }
    }

    fn missing(field: &str) -> Self {
        Self::new(&["body", field], "Field required", "missing")
    }
}

/// `POST /calculate-portfolio-value` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioValueRequest {
    pub portfolio: Portfolio,
    pub fiat_currency: FiatCurrency,
}

impl PortfolioValueRequest {
    /// Decode and shape-check a JSON body.
    ///
    /// Amount positivity is not checked here; that is a valuation rule
    /// and surfaces as a 400, not a shape error.
    ///
    /// # Errors
    /// Returns every field problem found, not just the first.
    pub fn from_json(body: Value) -> Result<Self, Vec<FieldError>> {
        let Value::Object(mut fields) = body else {
            return Err(vec![FieldError::new(
                &["body"],
                "Input should be a JSON object",
                "model_type",
            )]);
        };

        let portfolio = decode_portfolio(&mut fields);
        let fiat_currency = decode_fiat_currency(&mut fields);

        match (portfolio, fiat_currency) {
            (Ok(portfolio), Ok(fiat_currency)) => Ok(Self {
                portfolio,
                fiat_currency,
            }),
            (portfolio, fiat_currency) => Err(portfolio
                .err()
                .into_iter()
                .chain(fiat_currency.err())
                .flatten()
                .collect()),
        }
    }
}

fn decode_portfolio(fields: &mut Map<String, Value>) -> Result<Portfolio, Vec<FieldError>> {
    let value = fields
        .remove("portfolio")
        .ok_or_else(|| vec![FieldError::missing("portfolio")])?;

    let Value::Object(holdings) = value else {
        return Err(vec![FieldError::new(
            &["body", "portfolio"],
            "Input should be a valid dictionary",
            "dict_type",
        )]);
    };

    let mut portfolio = Portfolio::new();
    let mut errors = Vec::new();
    for (asset, amount) in holdings {
        if asset.trim().is_empty() {
            errors.push(FieldError::new(
                &["body", "portfolio", asset.as_str()],
                "Asset symbol must not be empty",
                "string_too_short",
            ));
            continue;
        }
        match decode_amount(&amount) {
            Ok(amount) => portfolio.insert(asset, amount),
            Err(AmountError::NotANumber) => errors.push(FieldError::new(
                &["body", "portfolio", asset.as_str()],
                "Input should be a valid number",
                "float_type",
            )),
            Err(AmountError::OutOfRange) => errors.push(FieldError::new(
                &["body", "portfolio", asset.as_str()],
                "Amount is outside the supported range (1e-28 to 7.9e28)",
                "amount_out_of_range",
            )),
        }
    }

    if errors.is_empty() {
        Ok(portfolio)
    } else {
        Err(errors)
    }
}

enum AmountError {
    NotANumber,
    OutOfRange,
}

/// Decode one held amount.
///
/// The sign is taken from the JSON number itself. A positive amount that
/// does not survive conversion to `Decimal` (too large, or so small it
/// rounds to zero) is out of range. A non-positive amount always decodes,
/// saturating at `Decimal::MIN`, so that validation rejects it as an
/// invalid amount.
fn decode_amount(value: &Value) -> Result<Decimal, AmountError> {
    let raw = value.as_f64().ok_or(AmountError::NotANumber)?;
    let converted = serde_json::from_value::<Decimal>(value.clone());

    if raw > 0.0 {
        match converted {
            Ok(amount) if amount > Decimal::ZERO => Ok(amount),
            _ => Err(AmountError::OutOfRange),
        }
    } else {
        Ok(converted.unwrap_or(Decimal::MIN))
    }
}

fn decode_fiat_currency(fields: &mut Map<String, Value>) -> Result<FiatCurrency, Vec<FieldError>> {
    match fields.remove("fiat_currency") {
        Some(Value::String(code)) => Ok(code),
        Some(_) => Err(vec![FieldError::new(
            &["body", "fiat_currency"],
            "Input should be a valid string",
            "string_type",
        )]),
        None => Err(vec![FieldError::missing("fiat_currency")]),
    }
}

/// Successful valuation response.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioValueResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub portfolio_value: Decimal,
    pub fiat_currency: FiatCurrency,
}

impl From<PortfolioValue> for PortfolioValueResponse {
    fn from(value: PortfolioValue) -> Self {
        Self {
            portfolio_value: value.total,
            fiat_currency: value.fiat_currency,
        }
    }
}

/// `GET /health` response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
}
