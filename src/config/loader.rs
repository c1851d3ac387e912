//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, applying environment overrides,
//! validating all parameters, and providing clear error messages
//! for misconfiguration.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Overrides `service.bind_address` when set.
pub const BIND_ADDRESS_ENV: &str = "PORTFOLIO_BIND_ADDRESS";

/// Overrides `exchange.base_url` when set.
pub const EXCHANGE_URL_ENV: &str = "PORTFOLIO_EXCHANGE_URL";

/// Load and validate configuration from a TOML file.
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let mut config = parse_config(&content)?;
  apply_env_overrides(&mut config, |key| std::env::var(key).ok());
  validate_config(&config)?;

  info!(
    name = %config.service.name,
    exchange = %config.exchange.base_url,
    timeout_s = config.exchange.timeout_seconds,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse configuration from TOML text without validating it.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  toml::from_str(content).with_context(|| "Failed to parse config.toml")
}

/// Replace file values with any overrides `lookup` provides.
fn apply_env_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
  if let Some(bind) = lookup(BIND_ADDRESS_ENV) {
    config.service.bind_address = bind;
  }
  if let Some(url) = lookup(EXCHANGE_URL_ENV) {
    config.exchange.base_url = url;
  }
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Non-empty service name and exchange URL
/// - An http(s) exchange URL
/// - A positive request timeout
/// - A parseable bind address
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.service.name.is_empty(),
    "Service name must not be empty"
  );

  config
    .service
    .bind_address
    .parse::<SocketAddr>()
    .with_context(|| format!("Invalid bind_address: {}", config.service.bind_address))?;

  let url = &config.exchange.base_url;
  anyhow::ensure!(!url.is_empty(), "Exchange base_url must not be empty");
  anyhow::ensure!(
    url.starts_with("http://") || url.starts_with("https://"),
    "Exchange base_url must be an http(s) URL, got {url}"
  );
  anyhow::ensure!(
    config.exchange.timeout_seconds > 0,
    "Exchange timeout_seconds must be positive"
  );

  Ok(())
}
