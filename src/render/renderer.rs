//! Route layer renderer.
//!
//! # States
//! - NoRoute: no "route" source on the map
//! - RouteShown: a "route" layer and source exist
//!
//! # State Transitions
//! ```text
//! NoRoute    → RouteShown: any render call
//! RouteShown → NoRoute:    render call under RenderPolicy::Toggle
//! RouteShown → RouteShown: render call under RenderPolicy::Replace
//! ```
//!
//! Toggle drops the geometry it was called with. That is the observed
//! behaviour and stays the default.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::geo::{Geometry, MatchedGeometry};
use crate::observability::metrics;
use crate::render::map::{
    LayerSpec, LineCap, LineJoin, LineLayout, LinePaint, MapError, MapSurface, SourceSpec,
};

// Re-export from config module to avoid duplication
pub use crate::config::schema::{RenderConfig, RenderPolicy};

/// Fixed id of the route layer and its source.
pub const ROUTE_ID: &str = "route";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteState {
    NoRoute,
    RouteShown,
}

/// What a render call did to the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// A route layer was added where none existed.
    Shown,
    /// The existing route was swapped for the new geometry.
    Replaced,
    /// The existing route was removed and nothing was added.
    Cleared,
}

impl RenderOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderOutcome::Shown => "shown",
            RenderOutcome::Replaced => "replaced",
            RenderOutcome::Cleared => "cleared",
        }
    }
}

/// Keeps at most one route layer on a shared map.
pub struct RouteRenderer<M> {
    map: Arc<Mutex<M>>,
    config: RenderConfig,
}

impl<M> Clone for RouteRenderer<M> {
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
            config: self.config.clone(),
        }
    }
}

impl<M: MapSurface> RouteRenderer<M> {
    pub fn new(map: Arc<Mutex<M>>, config: RenderConfig) -> Self {
        Self { map, config }
    }

    pub fn policy(&self) -> RenderPolicy {
        self.config.policy
    }

    pub fn state(&self) -> RouteState {
        if self.lock().has_source(ROUTE_ID) {
            RouteState::RouteShown
        } else {
            RouteState::NoRoute
        }
    }

    /// Apply a matched geometry to the map.
    ///
    /// The whole check-then-update runs under one lock, so concurrent calls
    /// can never leave two route layers behind.
    pub fn render(&self, geometry: MatchedGeometry) -> Result<RenderOutcome, MapError> {
        let mut map = self.lock();

        let outcome = if map.has_source(ROUTE_ID) {
            map.remove_layer(ROUTE_ID);
            map.remove_source(ROUTE_ID);
            match self.config.policy {
                RenderPolicy::Toggle => RenderOutcome::Cleared,
                RenderPolicy::Replace => {
                    self.add_route(&mut *map, geometry)?;
                    RenderOutcome::Replaced
                }
            }
        } else {
            self.add_route(&mut *map, geometry)?;
            RenderOutcome::Shown
        };

        tracing::info!(
            outcome = outcome.as_str(),
            policy = ?self.config.policy,
            "Route layer updated"
        );
        metrics::record_render(outcome.as_str());
        Ok(outcome)
    }

    fn add_route(&self, map: &mut M, geometry: MatchedGeometry) -> Result<(), MapError> {
        let layer = LayerSpec {
            id: ROUTE_ID.to_string(),
            source: ROUTE_ID.to_string(),
            layout: LineLayout {
                cap: LineCap::Round,
                join: LineJoin::Round,
            },
            paint: LinePaint {
                color: self.config.line_color.clone(),
                width: self.config.line_width,
                opacity: self.config.line_opacity,
            },
        };
        let source = SourceSpec {
            id: ROUTE_ID.to_string(),
            data: Geometry::from(geometry),
        };
        map.add_layer(layer, source)
    }

    fn lock(&self) -> MutexGuard<'_, M> {
        self.map.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;
    use crate::render::map::InMemoryMap;

    fn geometry(offset: f64) -> MatchedGeometry {
        MatchedGeometry::new(vec![
            Coordinate::new(69.24 + offset, 41.31),
            Coordinate::new(69.26 + offset, 41.33),
        ])
    }

    fn renderer(policy: RenderPolicy) -> (RouteRenderer<InMemoryMap>, Arc<Mutex<InMemoryMap>>) {
        let map = Arc::new(Mutex::new(InMemoryMap::new()));
        let config = RenderConfig {
            policy,
            ..RenderConfig::default()
        };
        (RouteRenderer::new(map.clone(), config), map)
    }

    #[test]
    fn test_first_render_creates_route_layer() {
        let (renderer, map) = renderer(RenderPolicy::Toggle);
        assert_eq!(renderer.state(), RouteState::NoRoute);

        let g = geometry(0.0);
        assert_eq!(renderer.render(g.clone()).unwrap(), RenderOutcome::Shown);

        let map = map.lock().unwrap();
        assert_eq!(map.layer_ids(), vec![ROUTE_ID]);
        assert_eq!(map.source(ROUTE_ID).unwrap().data, Geometry::from(g));
        assert_eq!(map.layer(ROUTE_ID).unwrap().paint.color, "#03AA46");
    }

    #[test]
    fn test_second_render_toggles_route_off() {
        let (renderer, map) = renderer(RenderPolicy::Toggle);
        renderer.render(geometry(0.0)).unwrap();

        // The new geometry is dropped, not shown.
        assert_eq!(renderer.render(geometry(0.01)).unwrap(), RenderOutcome::Cleared);
        assert_eq!(renderer.state(), RouteState::NoRoute);
        assert_eq!(map.lock().unwrap().layer_count(), 0);

        // A third call shows the route again.
        assert_eq!(renderer.render(geometry(0.02)).unwrap(), RenderOutcome::Shown);
    }

    #[test]
    fn test_replace_policy_swaps_geometry() {
        let (renderer, map) = renderer(RenderPolicy::Replace);
        renderer.render(geometry(0.0)).unwrap();

        let newer = geometry(0.01);
        assert_eq!(renderer.render(newer.clone()).unwrap(), RenderOutcome::Replaced);

        let map = map.lock().unwrap();
        assert_eq!(map.layer_count(), 1);
        assert_eq!(map.source(ROUTE_ID).unwrap().data, Geometry::from(newer));
    }
}
