//! Route capture pipeline.
//!
//! # Data Flow
//! ```text
//! DrawEvent::{Created, Updated}
//!     → coordinator.rs (last feature → Path, uniform SearchRadius)
//!     → matching (one request, Option<MatchedGeometry>)
//!     → ApplyPolicy check (generation counter when LatestDrawn)
//!     → render (toggle or replace the "route" layer)
//! ```
//!
//! # Concurrency
//! Every event spawns an independent task. Nothing serializes the tasks
//! except the renderer's map lock, which only guarantees that at most one
//! route layer exists. Which result ends up on the map is decided by the
//! apply policy.

pub mod coordinator;

pub use coordinator::{ApplyPolicy, PendingMatch, PipelineOutcome, RouteCoordinator};
