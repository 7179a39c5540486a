//! Matching service response types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::MatchedGeometry;

// Re-export MatchingConfig from config module to avoid duplication
pub use crate::config::schema::MatchingConfig;

/// Errors that can occur while matching a path.
///
/// Callers of [`crate::matching::RouteMatcher`] never see these; they are
/// logged and collapsed into "no geometry".
#[derive(Debug, Error)]
pub enum MatchError {
    /// Request could not be built or sent, or the body could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with something other than 200.
    #[error("matching service returned HTTP {status}")]
    Status { status: u16, body: String },

    /// The body was not a valid match response.
    #[error("invalid match response: {0}")]
    Decode(String),

    /// The response was well-formed but carried no candidate.
    #[error("no matchings returned (code: {code})")]
    NoMatchings { code: String },

    /// The configured base URL and path did not form a valid URL.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
}

impl MatchError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            MatchError::Transport(_) => "transport",
            MatchError::Status { .. } => "status",
            MatchError::Decode(_) => "decode",
            MatchError::NoMatchings { .. } => "no_matchings",
            MatchError::InvalidUrl(_) => "invalid_url",
        }
    }
}

/// Result type for matching operations.
pub type MatchResult<T> = Result<T, MatchError>;

/// Top-level body of a map-matching response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchResponse {
    /// Service status code, "Ok" on success.
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    /// Candidates, best first.
    #[serde(default)]
    pub matchings: Vec<Matching>,
}

/// One candidate route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Matching {
    pub geometry: MatchedGeometry,

    #[serde(default)]
    pub confidence: Option<f64>,

    #[serde(default)]
    pub distance: Option<f64>,

    #[serde(default)]
    pub duration: Option<f64>,

    #[serde(default)]
    pub legs: Vec<Leg>,
}

/// A leg between two waypoints. Only used for diagnostics.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Leg {
    #[serde(default)]
    pub distance: f64,

    #[serde(default)]
    pub duration: f64,

    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub steps: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_response() {
        let body = r#"{
            "code": "Ok",
            "matchings": [{
                "confidence": 0.92,
                "distance": 311.4,
                "duration": 41.2,
                "geometry": {"type": "LineString", "coordinates": [[69.2401, 41.3102], [69.2598, 41.3297]]},
                "legs": [{"distance": 311.4, "duration": 41.2, "summary": "", "steps": [{}, {}]}]
            }],
            "tracepoints": []
        }"#;
        let resp: MatchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.matchings.len(), 1);
        assert_eq!(resp.matchings[0].legs[0].steps.len(), 2);
        assert_eq!(resp.matchings[0].geometry.coordinates().len(), 2);
    }

    #[test]
    fn test_decode_error_body_without_matchings() {
        let body = r#"{"code": "NoMatch", "message": "Could not match the trace."}"#;
        let resp: MatchResponse = serde_json::from_str(body).unwrap();
        assert!(resp.matchings.is_empty());
        assert_eq!(resp.code.as_deref(), Some("NoMatch"));
    }

    #[test]
    fn test_error_display() {
        let err = MatchError::Status {
            status: 404,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "matching service returned HTTP 404");
        assert_eq!(err.kind(), "status");
    }
}
