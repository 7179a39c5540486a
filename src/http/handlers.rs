//! Request handlers for the drawing surface and route layer.

use std::sync::{Arc, Mutex};

use axum::extract::{Path as UrlPath, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::config::MapConfig;
use crate::drawing::{DrawingSurface, SketchPad};
use crate::geo::{Coordinate, Feature, FeatureCollection, Geometry};
use crate::http::request::request_id;
use crate::http::response::ApiError;
use crate::render::{InMemoryMap, ROUTE_ID};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub surface: Arc<SketchPad>,
    pub map: Arc<Mutex<InMemoryMap>>,
    pub map_config: Arc<MapConfig>,
}

/// Body of create and update requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DrawRequest {
    pub coordinates: Vec<Coordinate>,
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn list_features(State(state): State<AppState>) -> Json<FeatureCollection> {
    Json(state.surface.feature_collection())
}

pub async fn create_feature(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<DrawRequest>,
) -> Result<(StatusCode, Json<Feature>), ApiError> {
    let feature = state.surface.create_line(body.coordinates)?;
    tracing::info!(
        request_id = %request_id(&headers),
        feature_id = %feature.id,
        "Line drawn"
    );
    Ok((StatusCode::CREATED, Json(feature)))
}

pub async fn update_feature(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
    headers: HeaderMap,
    Json(body): Json<DrawRequest>,
) -> Result<Json<Feature>, ApiError> {
    let feature = state.surface.update_line(&id, body.coordinates)?;
    tracing::info!(
        request_id = %request_id(&headers),
        feature_id = %feature.id,
        "Line edited"
    );
    Ok(Json(feature))
}

pub async fn delete_feature(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    state.surface.delete(&id)?;
    tracing::info!(request_id = %request_id(&headers), feature_id = %id, "Line trashed");
    Ok(StatusCode::NO_CONTENT)
}

/// Geometry of the current route layer.
pub async fn get_route(State(state): State<AppState>) -> Result<Json<Geometry>, ApiError> {
    let map = state.map.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    map.source(ROUTE_ID)
        .map(|source| Json(source.data.clone()))
        .ok_or(ApiError::NoRoute)
}

pub async fn get_map(State(state): State<AppState>) -> Json<MapConfig> {
    Json(state.map_config.as_ref().clone())
}
