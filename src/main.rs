//! Portfolio Valuation Service — Entry Point
//!
//! Initializes configuration, logging, and the shared exchange client,
//! then serves the valuation API until SIGINT.
//!
//! Wiring sequence:
//! 1. Load config.toml (path from PORTFOLIO_CONFIG) + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Create MetricsRegistry (when enabled)
//! 4. Create BudaClient (one pooled HTTP client for the process)
//! 5. Wrap it in BudaQuotationService (implements QuotationSource port)
//! 6. Serve the HTTP API with graceful shutdown
//! 7. Drop the client once the server has drained

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{info, warn};

use portfolio_valuation::adapters::buda::{BudaClient, BudaClientConfig, BudaQuotationService};
use portfolio_valuation::adapters::http::{AppState, HttpServer};
use portfolio_valuation::adapters::metrics::MetricsRegistry;
use portfolio_valuation::config;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration ───────────────────────────────
    let config_path =
        std::env::var("PORTFOLIO_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = config::loader::load_config(&config_path)
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(&config.service.log_level)
                }),
        )
        .json()
        .init();

    info!(
        name = %config.service.name,
        version = env!("CARGO_PKG_VERSION"),
        exchange = %config.exchange.base_url,
        "Starting portfolio valuation service"
    );

    // ── 3. Metrics ──────────────────────────────────────────
    let metrics = if config.metrics.enabled {
        Some(Arc::new(
            MetricsRegistry::new().context("Failed to create metrics registry")?,
        ))
    } else {
        None
    };

    // ── 4. Shared exchange client ───────────────────────────
    let client = BudaClient::new(BudaClientConfig::from(&config.exchange))
        .context("Failed to create Buda client")?;

    // ── 5. Quotation source (QuotationSource port) ──────────
    let mut quotations = BudaQuotationService::new(client);
    if let Some(metrics) = &metrics {
        quotations = quotations.with_metrics(Arc::clone(metrics));
    }

    let mut state = AppState::new(Arc::new(quotations));
    if let Some(metrics) = metrics {
        state = state.with_metrics(metrics);
    }

    // ── 6. Serve until SIGINT ───────────────────────────────
    HttpServer::new(state, config.service.bind_address.clone())
        .run(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("SIGINT received, initiating graceful shutdown"),
        Err(e) => warn!(error = %e, "Failed to listen for SIGINT, shutting down"),
    }
}
