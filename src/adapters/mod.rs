//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies, and exposes the use case over HTTP.
//!
//! Adapter categories:
//! - `buda`: Buda exchange REST API client and quotation source
//! - `http`: Inbound axum API (routes, schemas, error mapping)
//! - `metrics`: Prometheus metrics registry

pub mod buda;
pub mod http;
pub mod metrics;
