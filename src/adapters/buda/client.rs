//! Buda HTTP Client - Shared REST API Client
//!
//! Wraps a single pooled reqwest client for all Buda REST API calls.
//! Built once at startup and cloned into every request; clones share
//! the same connection pool.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde::Serialize;

use crate::config::ExchangeConfig;

/// Configuration for the Buda HTTP client.
#[derive(Debug, Clone)]
pub struct BudaClientConfig {
  /// Base URL for the Buda API, including `/api/v2`.
  pub base_url: String,
  /// Request timeout.
  pub timeout: Duration,
  /// Idle connections kept per host.
  pub pool_max_idle_per_host: usize,
}

impl Default for BudaClientConfig {
  fn default() -> Self {
    Self {
      base_url: "https://www.buda.com/api/v2".to_string(),
      timeout: Duration::from_secs(30),
      pool_max_idle_per_host: 5,
    }
  }
}

impl From<&ExchangeConfig> for BudaClientConfig {
  fn from(config: &ExchangeConfig) -> Self {
    Self {
      base_url: config.base_url.clone(),
      timeout: Duration::from_secs(config.timeout_seconds),
      pool_max_idle_per_host: config.pool_max_idle_per_host,
    }
  }
}

/// Pooled HTTP client for the Buda API.
#[derive(Debug, Clone)]
pub struct BudaClient {
  /// Underlying HTTP client (reference-counted pool).
  http: Client,
  /// Base URL without trailing slash.
  base_url: Arc<str>,
}

impl BudaClient {
  /// Create a new Buda client.
  pub fn new(config: BudaClientConfig) -> Result<Self> {
    let http = Client::builder()
      .timeout(config.timeout)
      .pool_max_idle_per_host(config.pool_max_idle_per_host)
      .build()
      .context("Failed to build HTTP client")?;

    Ok(Self {
      http,
      base_url: Arc::from(config.base_url.trim_end_matches('/')),
    })
  }

  /// Execute a single POST with a JSON body. No retries.
  pub async fn post_json<T: Serialize + ?Sized>(
    &self,
    path: &str,
    body: &T,
  ) -> reqwest::Result<Response> {
    let url = format!("{}{}", self.base_url, path);
    self.http.post(&url).json(body).send().await
  }

  /// Base URL requests are issued against.
  pub fn base_url(&self) -> &str {
    &self.base_url
  }
}
