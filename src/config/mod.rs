//! Configuration Module - TOML-based Service Configuration
//!
//! Loads and validates configuration from `config.toml`, with a small
//! set of environment variable overrides for deployment. The exchange
//! endpoint and timeouts live here, never hardcoded in adapters.

pub mod loader;

use serde::Deserialize;

/// Top-level service configuration.
///
/// Loaded from `config.toml` at startup and validated before the
/// HTTP server binds.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Service identity and HTTP binding.
  pub service: ServiceConfig,
  /// Exchange (Buda) API client settings.
  pub exchange: ExchangeConfig,
  /// Metrics export.
  #[serde(default)]
  pub metrics: MetricsConfig,
}

/// Service identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
  /// Human-readable service name.
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
  /// Address the HTTP server binds to.
  #[serde(default = "default_bind_address")]
  pub bind_address: String,
}

/// Exchange API client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeConfig {
  /// REST API base URL, including the version prefix.
  pub base_url: String,
  /// Per-request timeout in seconds.
  #[serde(default = "default_timeout")]
  pub timeout_seconds: u64,
  /// Idle pooled connections kept per host.
  #[serde(default = "default_pool_idle")]
  pub pool_max_idle_per_host: usize,
}

/// Metrics and monitoring configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
  /// Expose Prometheus metrics on `/metrics`.
  #[serde(default = "default_true")]
  pub enabled: bool,
}

impl Default for MetricsConfig {
  fn default() -> Self {
    Self {
      enabled: default_true(),
    }
  }
}

// Default value functions for serde

fn default_log_level() -> String {
  "info".to_string()
}

fn default_bind_address() -> String {
  "0.0.0.0:8000".to_string()
}

fn default_timeout() -> u64 {
  30
}

fn default_pool_idle() -> usize {
  5
}

fn default_true() -> bool {
  true
}
