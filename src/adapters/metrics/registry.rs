//! Prometheus Metrics Registry - Valuation Observability
//!
//! Registers the service's Prometheus metrics and renders them in the
//! text exposition format for the `/metrics` route. Covers quotation
//! outcomes, valuation outcomes, and valuation latency.

use std::time::Duration;

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

/// Label value recorded for successful calls.
pub const OUTCOME_OK: &str = "ok";

/// Centralized Prometheus metrics for the valuation service.
///
/// All metrics follow the naming convention `portfolio_valuation_*` and
/// carry an `outcome` label (`ok` or a `ValuationError::kind`).
pub struct MetricsRegistry {
    /// Prometheus registry.
    registry: Registry,
    /// Outbound quotation calls by outcome.
    pub quotations: IntCounterVec,
    /// Portfolio valuation requests by outcome.
    pub valuations: IntCounterVec,
    /// End-to-end valuation latency in seconds.
    pub valuation_latency: HistogramVec,
}

impl MetricsRegistry {
    /// Create and register all Prometheus metrics.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let quotations = IntCounterVec::new(
            Opts::new(
                "portfolio_valuation_quotations_total",
                "Outbound quotation calls to the exchange",
            ),
            &["outcome"],
        )?;

        let valuations = IntCounterVec::new(
            Opts::new(
                "portfolio_valuation_requests_total",
                "Portfolio valuation requests",
            ),
            &["outcome"],
        )?;

        let valuation_latency = HistogramVec::new(
            HistogramOpts::new(
                "portfolio_valuation_latency_seconds",
                "Portfolio valuation latency in seconds",
            )
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
            &["outcome"],
        )?;

        registry.register(Box::new(quotations.clone()))?;
        registry.register(Box::new(valuations.clone()))?;
        registry.register(Box::new(valuation_latency.clone()))?;

        Ok(Self {
            registry,
            quotations,
            valuations,
            valuation_latency,
        })
    }

    /// Count one outbound quotation.
    pub fn record_quotation(&self, outcome: &str) {
        self.quotations.with_label_values(&[outcome]).inc();
    }

    /// Count one valuation and observe its latency.
    pub fn record_valuation(&self, outcome: &str, elapsed: Duration) {
        self.valuations.with_label_values(&[outcome]).inc();
        self.valuation_latency
            .with_label_values(&[outcome])
            .observe(elapsed.as_secs_f64());
    }

    /// Render every registered metric in the text exposition format.
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
