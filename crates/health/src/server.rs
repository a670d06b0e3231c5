use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};
use tower_http::trace::TraceLayer;

/// Body returned by every health route
pub const ALIVE_TEXT: &str = "Bot is alive!";

/// Minimal HTTP server answering liveness probes
#[derive(Debug, Clone)]
pub struct HealthServer {
    host: String,
    port: u16,
}

impl HealthServer {
    /// # Arguments
    /// * `host` - Host to bind to (e.g., "0.0.0.0")
    /// * `port` - Port to bind to (e.g., 10000)
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Create the axum router with all routes configured
    pub fn router() -> Router {
        Router::new()
            .route("/", get(health_check))
            .route("/health", get(health_check))
            .layer(TraceLayer::new_for_http())
    }

    /// Bind and serve until the process exits
    pub async fn serve(self) -> crate::Result<()> {
        let addr = format!("{}:{}", self.host, self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        tracing::info!("Health server listening on {}", addr);

        axum::serve(listener, Self::router()).await?;

        Ok(())
    }
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, ALIVE_TEXT)
}
