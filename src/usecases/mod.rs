//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces to implement
//! the service's workflows.
//!
//! Use cases:
//! - `PortfolioValuator`: Concurrent per-asset quotation and summation

pub mod portfolio_valuator;

pub use portfolio_valuator::PortfolioValuator;
