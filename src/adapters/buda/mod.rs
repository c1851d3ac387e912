//! Buda Exchange API Adapter
//!
//! Implements the quotation port against the Buda REST API
//! (`https://www.buda.com/api/v2`).
//!
//! Sub-modules:
//! - `client`: Shared pooled HTTP client
//! - `quotation`: `QuotationSource` implementation
//! - `types`: API request/response type definitions

pub mod client;
pub mod quotation;
pub mod types;

pub use client::{BudaClient, BudaClientConfig};
pub use quotation::BudaQuotationService;
