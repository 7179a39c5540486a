//! Startup orchestration.
//!
//! # Responsibilities
//! - Build every subsystem from a validated configuration
//! - Wire the drawing surface to the coordinator and the map to the server
//! - Run the coordinator loop and the HTTP server until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Configuration is passed in, never read from globals
//! - The listener is bound by the caller so tests can use port 0

use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::drawing::{DrawEvent, SketchPad};
use crate::http::{AppState, HttpServer};
use crate::lifecycle::Shutdown;
use crate::matching::{MapboxMatcher, MatchError};
use crate::pipeline::RouteCoordinator;
use crate::render::{InMemoryMap, RouteRenderer};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to create matcher: {0}")]
    Matcher(#[from] MatchError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ServiceCoordinator = RouteCoordinator<SketchPad, MapboxMatcher, InMemoryMap>;

/// The assembled route capture service.
pub struct RouteService {
    config: AppConfig,
    state: AppState,
    coordinator: ServiceCoordinator,
    events: mpsc::UnboundedReceiver<DrawEvent>,
}

impl RouteService {
    /// Build all subsystems in dependency order.
    pub fn build(config: AppConfig) -> Result<Self, StartupError> {
        let (pad, events) = SketchPad::new();
        let surface = Arc::new(pad);
        let map = Arc::new(Mutex::new(InMemoryMap::new()));

        let matcher = Arc::new(MapboxMatcher::new(config.matching.clone())?);
        let renderer = RouteRenderer::new(map.clone(), config.render.clone());
        let coordinator = RouteCoordinator::new(
            surface.clone(),
            matcher,
            renderer,
            config.matching.search_radius_m,
            config.matching.apply_policy,
        );

        let state = AppState {
            surface,
            map,
            map_config: Arc::new(config.map.clone()),
        };

        tracing::debug!(
            render_policy = ?config.render.policy,
            apply_policy = ?config.matching.apply_policy,
            "Subsystems initialized"
        );

        Ok(Self {
            config,
            state,
            coordinator,
            events,
        })
    }

    /// Shared handles used by the HTTP surface.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn coordinator(&self) -> &ServiceCoordinator {
        &self.coordinator
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), StartupError> {
        let coordinator = tokio::spawn(self.coordinator.run(self.events, shutdown.subscribe()));

        let server = HttpServer::new(&self.config.server, self.state);
        let result = server.run(listener, shutdown.clone()).await;

        // Stop the coordinator even if the server failed on its own.
        shutdown.trigger();
        if let Err(e) = coordinator.await {
            tracing::error!(error = %e, "Route coordinator task failed");
        }

        result.map_err(StartupError::from)
    }
}
