//! Map layer management.
//!
//! # Responsibilities
//! - Describe line layers and their GeoJSON sources
//! - Define the layer-management calls the renderer relies on
//! - Provide an in-memory map that records layer state
//!
//! # Design Decisions
//! - Layer and source share one id namespace each, as on a real map
//! - Adding an id that already exists is an error, never a silent overwrite
//! - Layers are kept in insertion order (draw order)

use serde::Serialize;
use thiserror::Error;

use crate::geo::Geometry;

/// Errors raised by layer-management calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("layer '{0}' already exists")]
    LayerExists(String),

    #[error("source '{0}' already exists")]
    SourceExists(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    Bevel,
    Round,
    Miter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineLayout {
    #[serde(rename = "line-cap")]
    pub cap: LineCap,
    #[serde(rename = "line-join")]
    pub join: LineJoin,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePaint {
    #[serde(rename = "line-color")]
    pub color: String,
    #[serde(rename = "line-width")]
    pub width: f64,
    #[serde(rename = "line-opacity")]
    pub opacity: f64,
}

/// A line layer drawn from a single source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSpec {
    pub id: String,
    pub source: String,
    pub layout: LineLayout,
    pub paint: LinePaint,
}

/// GeoJSON source backing a layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceSpec {
    pub id: String,
    pub data: Geometry,
}

/// Layer-management calls exposed by a map.
pub trait MapSurface: Send + 'static {
    /// Add a layer together with its backing source.
    fn add_layer(&mut self, layer: LayerSpec, source: SourceSpec) -> Result<(), MapError>;

    /// Remove a layer. Returns whether it existed.
    fn remove_layer(&mut self, id: &str) -> bool;

    /// Remove a source. Returns whether it existed.
    fn remove_source(&mut self, id: &str) -> bool;

    fn has_source(&self, id: &str) -> bool;
}

/// Map that keeps layers and sources in memory.
#[derive(Debug, Default)]
pub struct InMemoryMap {
    layers: Vec<LayerSpec>,
    sources: Vec<SourceSpec>,
}

impl InMemoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer(&self, id: &str) -> Option<&LayerSpec> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn source(&self, id: &str) -> Option<&SourceSpec> {
        self.sources.iter().find(|s| s.id == id)
    }

    /// Layer ids in draw order.
    pub fn layer_ids(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.id.as_str()).collect()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

impl MapSurface for InMemoryMap {
    fn add_layer(&mut self, layer: LayerSpec, source: SourceSpec) -> Result<(), MapError> {
        if self.layer(&layer.id).is_some() {
            return Err(MapError::LayerExists(layer.id));
        }
        if self.has_source(&source.id) {
            return Err(MapError::SourceExists(source.id));
        }
        self.sources.push(source);
        self.layers.push(layer);
        Ok(())
    }

    fn remove_layer(&mut self, id: &str) -> bool {
        let before = self.layers.len();
        self.layers.retain(|l| l.id != id);
        self.layers.len() != before
    }

    fn remove_source(&mut self, id: &str) -> bool {
        let before = self.sources.len();
        self.sources.retain(|s| s.id != id);
        self.sources.len() != before
    }

    fn has_source(&self, id: &str) -> bool {
        self.source(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;

    fn line(id: &str) -> (LayerSpec, SourceSpec) {
        (
            LayerSpec {
                id: id.to_string(),
                source: id.to_string(),
                layout: LineLayout {
                    cap: LineCap::Round,
                    join: LineJoin::Round,
                },
                paint: LinePaint {
                    color: "#000000".to_string(),
                    width: 1.0,
                    opacity: 1.0,
                },
            },
            SourceSpec {
                id: id.to_string(),
                data: Geometry::LineString {
                    coordinates: vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)],
                },
            },
        )
    }

    #[test]
    fn test_add_and_remove() {
        let mut map = InMemoryMap::new();
        let (layer, source) = line("route");
        map.add_layer(layer, source).unwrap();
        assert!(map.has_source("route"));
        assert_eq!(map.layer_ids(), vec!["route"]);

        assert!(map.remove_layer("route"));
        assert!(map.remove_source("route"));
        assert!(!map.remove_layer("route"));
        assert!(!map.has_source("route"));
        assert_eq!(map.layer_count(), 0);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut map = InMemoryMap::new();
        let (layer, source) = line("route");
        map.add_layer(layer.clone(), source.clone()).unwrap();
        assert_eq!(
            map.add_layer(layer, source),
            Err(MapError::LayerExists("route".to_string()))
        );
        assert_eq!(map.layer_count(), 1);
    }

    #[test]
    fn test_paint_serializes_with_style_keys() {
        let (layer, _) = line("route");
        let json = serde_json::to_value(&layer).unwrap();
        assert_eq!(json["layout"]["line-cap"], "round");
        assert_eq!(json["paint"]["line-width"], 1.0);
    }
}
