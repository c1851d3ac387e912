use std::sync::Arc;

use crate::adapters::metrics::MetricsRegistry;
use crate::ports::QuotationSource;

/// Process-wide handles shared read-only by every request.
#[derive(Clone)]
pub struct AppState {
    /// Quotation source wrapping the shared exchange client.
    pub quotations: Arc<dyn QuotationSource>,
    /// Metrics registry, when metrics are enabled.
    pub metrics: Option<Arc<MetricsRegistry>>,
}

impl AppState {
    pub fn new(quotations: Arc<dyn QuotationSource>) -> Self {
        Self {
            quotations,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<MetricsRegistry>) -> Self {
        self.metrics = Some(metrics);
        self
    }
}
