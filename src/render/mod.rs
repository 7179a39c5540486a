//! Route rendering subsystem.
//!
//! # Data Flow
//! ```text
//! MatchedGeometry
//!     → renderer.rs (has_source("route")? decide by RenderPolicy)
//!     → map.rs (remove-layer / remove-source / add-layer)
//!     → at most one "route" layer on the map
//! ```

pub mod map;
pub mod renderer;

pub use map::{InMemoryMap, LayerSpec, MapError, MapSurface, SourceSpec};
pub use renderer::{RenderOutcome, RenderPolicy, RouteRenderer, RouteState, ROUTE_ID};
