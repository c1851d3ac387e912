//! Metrics Adapters
//!
//! Prometheus metrics for quotation and valuation outcomes, served on
//! `/metrics` by the HTTP adapter.

pub mod registry;

pub use registry::{MetricsRegistry, OUTCOME_OK};
