//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Serve until the shutdown signal fires

use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::http::handlers::{self, AppState};
use crate::http::request::{propagate_request_id, set_request_id};
use crate::lifecycle::Shutdown;

/// HTTP server exposing the drawing surface and route layer.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over the given state.
    pub fn new(config: &ServerConfig, state: AppState) -> Self {
        Self {
            router: Self::build_router(config, state),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route(
                "/features",
                get(handlers::list_features).post(handlers::create_feature),
            )
            .route(
                "/features/{id}",
                axum::routing::put(handlers::update_feature).delete(handlers::delete_feature),
            )
            .route("/route", get(handlers::get_route))
            .route("/map", get(handlers::get_map))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id())
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
                    .layer(propagate_request_id()),
            )
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.signalled())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }
}
