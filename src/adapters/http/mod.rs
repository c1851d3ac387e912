//! HTTP Adapter - Inbound Valuation API
//!
//! Thin axum shell over the valuation use case:
//! - `GET /health`: liveness
//! - `POST /calculate-portfolio-value`: portfolio valuation
//! - `GET /metrics`: Prometheus exposition (when enabled)

pub mod error;
pub mod handlers;
pub mod schemas;
pub mod state;

use std::future::Future;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Build the service router.
pub fn app_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/calculate-portfolio-value",
            post(handlers::calculate_portfolio_value),
        );

    if state.metrics.is_some() {
        router = router.route("/metrics", get(handlers::metrics));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Axum-based valuation HTTP server.
pub struct HttpServer {
    /// State shared with every request.
    state: AppState,
    /// Bind address (from `service.bind_address`).
    bind_address: String,
}

impl HttpServer {
    /// Create a new server.
    pub fn new(state: AppState, bind_address: impl Into<String>) -> Self {
        Self {
            state,
            bind_address: bind_address.into(),
        }
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests.
    #[instrument(skip(self, shutdown), fields(address = %self.bind_address))]
    pub async fn run(self, shutdown: impl Future<Output = ()> + Send + 'static) -> anyhow::Result<()> {
        let app = app_router(self.state);
        let listener = tokio::net::TcpListener::bind(&self.bind_address).await?;

        info!(address = %self.bind_address, "Valuation server started");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
