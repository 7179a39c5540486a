//! In-memory drawing surface.

use std::sync::{Mutex, MutexGuard};

use thiserror::Error;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::geo::{Coordinate, Feature, FeatureCollection};
use crate::observability::metrics;

/// Notification emitted after the feature set changes.
///
/// Carries no payload; listeners pull the collection themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawEvent {
    Created,
    Updated,
    Deleted,
}

impl DrawEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrawEvent::Created => "created",
            DrawEvent::Updated => "updated",
            DrawEvent::Deleted => "deleted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    #[error("a line needs at least one coordinate")]
    Empty,

    #[error("feature '{0}' not found")]
    NotFound(String),
}

/// Source of the current feature collection.
pub trait DrawingSurface: Send + Sync + 'static {
    fn feature_collection(&self) -> FeatureCollection;
}

/// Drawing surface that keeps features in memory.
///
/// Features are ordered by last modification: creating or updating a
/// feature moves it to the end of the collection.
#[derive(Debug)]
pub struct SketchPad {
    features: Mutex<Vec<Feature>>,
    events: mpsc::UnboundedSender<DrawEvent>,
}

impl SketchPad {
    /// Create a new SketchPad.
    ///
    /// Returns the surface and a receiver for its notifications.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DrawEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        (
            Self {
                features: Mutex::new(Vec::new()),
                events,
            },
            rx,
        )
    }

    /// Add a new line feature.
    pub fn create_line(&self, coordinates: Vec<Coordinate>) -> Result<Feature, DrawError> {
        if coordinates.is_empty() {
            return Err(DrawError::Empty);
        }
        let feature = Feature::line(Uuid::new_v4().to_string(), coordinates);
        self.lock().push(feature.clone());

        tracing::debug!(feature_id = %feature.id, "Feature created");
        self.notify(DrawEvent::Created);
        Ok(feature)
    }

    /// Replace a feature's geometry with a new line.
    pub fn update_line(&self, id: &str, coordinates: Vec<Coordinate>) -> Result<Feature, DrawError> {
        if coordinates.is_empty() {
            return Err(DrawError::Empty);
        }
        let feature = {
            let mut features = self.lock();
            let idx = features
                .iter()
                .position(|f| f.id == id)
                .ok_or_else(|| DrawError::NotFound(id.to_string()))?;
            let mut feature = features.remove(idx);
            feature.geometry = Feature::line(id, coordinates).geometry;
            features.push(feature.clone());
            feature
        };

        tracing::debug!(feature_id = %id, "Feature updated");
        self.notify(DrawEvent::Updated);
        Ok(feature)
    }

    /// Remove a feature.
    pub fn delete(&self, id: &str) -> Result<(), DrawError> {
        {
            let mut features = self.lock();
            let before = features.len();
            features.retain(|f| f.id != id);
            if features.len() == before {
                return Err(DrawError::NotFound(id.to_string()));
            }
        }

        tracing::debug!(feature_id = %id, "Feature deleted");
        self.notify(DrawEvent::Deleted);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn notify(&self, event: DrawEvent) {
        metrics::record_draw_event(event.as_str());
        if self.events.send(event).is_err() {
            tracing::debug!(event = event.as_str(), "No listener for draw event");
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Feature>> {
        self.features.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DrawingSurface for SketchPad {
    fn feature_collection(&self) -> FeatureCollection {
        FeatureCollection::new(self.lock().clone())
    }
}
