//! Error responses.
//!
//! Errors are returned as `{"error": "..."}` with a status code matching the
//! failure: 400 for unusable input, 404 for unknown features or no route.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::drawing::DrawError;

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Draw(#[from] DrawError),

    #[error("no route is currently shown")]
    NoRoute,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Draw(DrawError::Empty) => StatusCode::BAD_REQUEST,
            ApiError::Draw(DrawError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::NoRoute => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
