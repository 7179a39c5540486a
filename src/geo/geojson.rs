//! Minimal GeoJSON types used by the drawing surface and the map.

use serde::{Deserialize, Serialize};

use crate::geo::types::{Coordinate, Path};

/// GeoJSON geometry, tagged by its `type` member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Coordinate },
    LineString { coordinates: Vec<Coordinate> },
    Polygon { coordinates: Vec<Vec<Coordinate>> },
}

impl Geometry {
    /// GeoJSON type name.
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point { .. } => "Point",
            Geometry::LineString { .. } => "LineString",
            Geometry::Polygon { .. } => "Polygon",
        }
    }

    /// The path of a LineString, `None` for any other geometry.
    pub fn as_path(&self) -> Option<Path> {
        match self {
            Geometry::LineString { coordinates } => Some(Path::new(coordinates.clone())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeatureTag {
    #[default]
    Feature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollectionTag {
    #[default]
    FeatureCollection,
}

/// A single drawn object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default)]
    pub tag: FeatureTag,
    pub id: String,
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
    pub geometry: Geometry,
}

impl Feature {
    pub fn new(id: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            tag: FeatureTag::Feature,
            id: id.into(),
            properties: serde_json::Map::new(),
            geometry,
        }
    }

    pub fn line(id: impl Into<String>, coordinates: Vec<Coordinate>) -> Self {
        Self::new(id, Geometry::LineString { coordinates })
    }
}

/// All features currently held by a drawing surface, in insertion order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default)]
    pub tag: CollectionTag,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            tag: CollectionTag::FeatureCollection,
            features,
        }
    }

    /// The most recently added or updated feature.
    pub fn last(&self) -> Option<&Feature> {
        self.features.last()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
