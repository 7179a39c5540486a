//! Coordinates, paths and per-point search radii.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::geo::geojson::Geometry;

/// Errors produced when decoding a GeoJSON position.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    /// A position must carry 2 or 3 numbers.
    #[error("position must have 2 or 3 values, got {0}")]
    Arity(usize),

    /// Matched geometries must be LineStrings.
    #[error("expected a LineString geometry, got {0}")]
    NotALine(&'static str),
}

/// A single geographic position: longitude, latitude and optional elevation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
    pub elevation: Option<f64>,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            lon,
            lat,
            elevation: None,
        }
    }

    pub fn with_elevation(lon: f64, lat: f64, elevation: f64) -> Self {
        Self {
            lon,
            lat,
            elevation: Some(elevation),
        }
    }
}

impl TryFrom<Vec<f64>> for Coordinate {
    type Error = CoordinateError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        match values.as_slice() {
            [lon, lat] => Ok(Self::new(*lon, *lat)),
            [lon, lat, ele] => Ok(Self::with_elevation(*lon, *lat, *ele)),
            other => Err(CoordinateError::Arity(other.len())),
        }
    }
}

impl From<Coordinate> for Vec<f64> {
    fn from(c: Coordinate) -> Self {
        match c.elevation {
            Some(ele) => vec![c.lon, c.lat, ele],
            None => vec![c.lon, c.lat],
        }
    }
}

/// Formats as `lon,lat`, the form the matching service expects.
/// Elevation is not part of the query.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lon, self.lat)
    }
}

/// An ordered sequence of coordinates in drawing order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<Coordinate>);

impl Path {
    pub fn new(coordinates: Vec<Coordinate>) -> Self {
        Self(coordinates)
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Coordinate>> for Path {
    fn from(coordinates: Vec<Coordinate>) -> Self {
        Self(coordinates)
    }
}

/// Matching tolerance in meters, one entry per path coordinate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchRadius(Vec<f64>);

impl SearchRadius {
    /// The same radius for each of `len` points.
    pub fn uniform(radius_m: f64, len: usize) -> Self {
        Self(vec![radius_m; len])
    }

    pub fn new(radii: Vec<f64>) -> Self {
        Self(radii)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Road-snapped LineString returned by the matching service.
///
/// Each accepted geometry replaces the previous one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Geometry", into = "Geometry")]
pub struct MatchedGeometry {
    coordinates: Vec<Coordinate>,
}

impl MatchedGeometry {
    pub fn new(coordinates: Vec<Coordinate>) -> Self {
        Self { coordinates }
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }
}

impl TryFrom<Geometry> for MatchedGeometry {
    type Error = CoordinateError;

    fn try_from(geometry: Geometry) -> Result<Self, Self::Error> {
        match geometry {
            Geometry::LineString { coordinates } => Ok(Self { coordinates }),
            other => Err(CoordinateError::NotALine(other.kind())),
        }
    }
}

impl From<MatchedGeometry> for Geometry {
    fn from(g: MatchedGeometry) -> Self {
        Geometry::LineString {
            coordinates: g.coordinates,
        }
    }
}
