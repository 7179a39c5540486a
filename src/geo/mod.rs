//! Geographic data model.
//!
//! # Data Flow
//! ```text
//! Drawing surface (FeatureCollection)
//!     → last Feature's LineString
//!     → Path + SearchRadius
//!     → matching service
//!     → MatchedGeometry
//!     → route layer source data
//! ```
//!
//! # Design Decisions
//! - Coordinates serialize as GeoJSON positions (`[lon, lat]` or `[lon, lat, ele]`)
//! - Coordinates are `Copy` and never mutated after construction
//! - A matched geometry is always a LineString; anything else fails to decode

pub mod geojson;
pub mod types;

pub use geojson::{Feature, FeatureCollection, Geometry};
pub use types::{Coordinate, CoordinateError, MatchedGeometry, Path, SearchRadius};
