//! Draw-event coordinator.
//!
//! # Responsibilities
//! - React to create/update notifications from the drawing surface
//! - Pull the feature collection and take the last feature's line
//! - Build one search radius per point from configuration
//! - Hand the path to the matcher and any result to the renderer
//!
//! # Design Decisions
//! - Path extraction happens synchronously when the event is handled, so the
//!   path reflects the surface at that moment
//! - Each event spawns its own match task; in-flight tasks are never
//!   cancelled or merged
//! - With `ApplyPolicy::LastResolved` whichever match resolves last decides
//!   the final map state, regardless of drawing order
//! - With `ApplyPolicy::LatestDrawn` a result is dropped if a newer event
//!   arrived while it was in flight
//! - Delete notifications are ignored; the route stays as it is

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::drawing::{DrawEvent, DrawingSurface};
use crate::geo::{Path, SearchRadius};
use crate::matching::RouteMatcher;
use crate::observability::metrics;
use crate::render::{MapError, MapSurface, RenderOutcome, RouteRenderer};

// Re-export from config module to avoid duplication
pub use crate::config::schema::ApplyPolicy;

/// How a single draw event was resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// The event kind does not trigger matching.
    Ignored,
    /// The surface held no features.
    NoFeature,
    /// The last feature is not a LineString.
    NotALine(&'static str),
    /// The matcher produced nothing; the map was left untouched.
    NoMatch,
    /// A newer draw event superseded this one before the match resolved.
    Stale { generation: u64, current: u64 },
    /// The renderer applied the geometry.
    Rendered(RenderOutcome),
    /// The map refused the layer update.
    RenderFailed(MapError),
}

impl PipelineOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineOutcome::Ignored => "ignored",
            PipelineOutcome::NoFeature => "no_feature",
            PipelineOutcome::NotALine(_) => "not_a_line",
            PipelineOutcome::NoMatch => "no_match",
            PipelineOutcome::Stale { .. } => "stale",
            PipelineOutcome::Rendered(_) => "rendered",
            PipelineOutcome::RenderFailed(_) => "render_failed",
        }
    }
}

/// A path ready to be matched, tagged with the event generation it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMatch {
    pub generation: u64,
    pub feature_id: String,
    pub path: Path,
    pub radii: SearchRadius,
}

/// Wires the drawing surface, matcher and renderer together.
pub struct RouteCoordinator<S, M, Map> {
    surface: Arc<S>,
    matcher: Arc<M>,
    renderer: RouteRenderer<Map>,
    search_radius_m: f64,
    policy: ApplyPolicy,
    generation: Arc<AtomicU64>,
}

impl<S, M, Map> Clone for RouteCoordinator<S, M, Map> {
    fn clone(&self) -> Self {
        Self {
            surface: self.surface.clone(),
            matcher: self.matcher.clone(),
            renderer: self.renderer.clone(),
            search_radius_m: self.search_radius_m,
            policy: self.policy,
            generation: self.generation.clone(),
        }
    }
}

impl<S, M, Map> RouteCoordinator<S, M, Map>
where
    S: DrawingSurface,
    M: RouteMatcher,
    Map: MapSurface,
{
    pub fn new(
        surface: Arc<S>,
        matcher: Arc<M>,
        renderer: RouteRenderer<Map>,
        search_radius_m: f64,
        policy: ApplyPolicy,
    ) -> Self {
        Self {
            surface,
            matcher,
            renderer,
            search_radius_m,
            policy,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn policy(&self) -> ApplyPolicy {
        self.policy
    }

    /// Generation of the most recent create/update event.
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Consume draw events until the channel closes or shutdown fires.
    pub async fn run(
        self,
        mut events: mpsc::UnboundedReceiver<DrawEvent>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        tracing::info!(
            policy = ?self.policy,
            search_radius_m = self.search_radius_m,
            "Route coordinator starting"
        );

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => {
                        // Detached on purpose: in-flight matches run to completion.
                        let _ = self.handle_event(event);
                    }
                    None => {
                        tracing::info!("Draw event channel closed, exiting loop");
                        break;
                    }
                },
                _ = shutdown.recv() => {
                    tracing::info!("Route coordinator received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Handle one notification, spawning a match task when one is needed.
    pub fn handle_event(&self, event: DrawEvent) -> Option<JoinHandle<PipelineOutcome>> {
        match self.prepare(event) {
            Ok(pending) => {
                let this = self.clone();
                Some(tokio::spawn(async move { this.complete(pending).await }))
            }
            Err(outcome) => {
                metrics::record_pipeline(outcome.as_str());
                None
            }
        }
    }

    /// Handle one notification and wait for its result.
    pub async fn process(&self, event: DrawEvent) -> PipelineOutcome {
        match self.prepare(event) {
            Ok(pending) => self.complete(pending).await,
            Err(outcome) => {
                metrics::record_pipeline(outcome.as_str());
                outcome
            }
        }
    }

    /// Synchronous half: bump the generation and extract the path.
    pub fn prepare(&self, event: DrawEvent) -> Result<PendingMatch, PipelineOutcome> {
        if event == DrawEvent::Deleted {
            tracing::debug!("Ignoring delete notification");
            return Err(PipelineOutcome::Ignored);
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let collection = self.surface.feature_collection();
        let Some(feature) = collection.last() else {
            tracing::warn!(event = event.as_str(), "Draw event with no features");
            return Err(PipelineOutcome::NoFeature);
        };

        let Some(path) = feature.geometry.as_path() else {
            tracing::warn!(
                feature_id = %feature.id,
                kind = feature.geometry.kind(),
                "Last feature is not a line, skipping match"
            );
            return Err(PipelineOutcome::NotALine(feature.geometry.kind()));
        };

        let radii = SearchRadius::uniform(self.search_radius_m, path.len());
        tracing::debug!(
            generation,
            feature_id = %feature.id,
            points = path.len(),
            ignored_features = collection.features.len() - 1,
            "Prepared route match"
        );

        Ok(PendingMatch {
            generation,
            feature_id: feature.id.clone(),
            path,
            radii,
        })
    }

    /// Asynchronous half: match, then render unless the result is stale.
    pub async fn complete(&self, pending: PendingMatch) -> PipelineOutcome {
        let outcome = self.complete_inner(pending).await;
        metrics::record_pipeline(outcome.as_str());
        outcome
    }

    async fn complete_inner(&self, pending: PendingMatch) -> PipelineOutcome {
        let PendingMatch {
            generation,
            feature_id,
            path,
            radii,
        } = pending;

        let Some(geometry) = self.matcher.match_route(path, radii).await else {
            tracing::debug!(generation, feature_id = %feature_id, "No geometry, route left unchanged");
            return PipelineOutcome::NoMatch;
        };

        if self.policy == ApplyPolicy::LatestDrawn {
            let current = self.current_generation();
            if current != generation {
                tracing::info!(generation, current, "Discarding stale route match");
                return PipelineOutcome::Stale {
                    generation,
                    current,
                };
            }
        }

        match self.renderer.render(geometry) {
            Ok(outcome) => PipelineOutcome::Rendered(outcome),
            Err(e) => {
                tracing::error!(generation, error = %e, "Failed to update route layer");
                PipelineOutcome::RenderFailed(e)
            }
        }
    }
}
