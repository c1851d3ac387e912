//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the use case layer requires
//! from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `QuotationSource`: Per-asset sale quotations from an exchange

pub mod quotation;

pub use quotation::QuotationSource;
