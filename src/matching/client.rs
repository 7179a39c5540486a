//! Map-matching client.
//!
//! # Responsibilities
//! - Serialize the drawn path and radii into a matching request
//! - Issue exactly one GET per invocation (no retry, no backoff)
//! - Accept only HTTP 200 with at least one candidate
//! - Log every failure and collapse it into "no geometry"

use std::future::Future;
use std::time::{Duration, Instant};

use reqwest::StatusCode;

use crate::geo::{MatchedGeometry, Path, SearchRadius};
use crate::matching::query::build_url;
use crate::matching::types::{MatchError, MatchResponse, MatchResult, Matching, MatchingConfig};
use crate::observability::metrics;

/// Snaps a drawn path to the road network.
///
/// Implementations never fail loudly: any problem yields `None`.
pub trait RouteMatcher: Send + Sync + 'static {
    fn match_route(
        &self,
        path: Path,
        radii: SearchRadius,
    ) -> impl Future<Output = Option<MatchedGeometry>> + Send;
}

/// Matcher backed by the Mapbox Map Matching API.
#[derive(Clone)]
pub struct MapboxMatcher {
    client: reqwest::Client,
    config: MatchingConfig,
}

impl MapboxMatcher {
    /// Create a matcher from configuration.
    pub fn new(config: MatchingConfig) -> MatchResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| MatchError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Run one match attempt and return the best candidate.
    ///
    /// Candidates are already ranked by the service; the first one wins.
    pub async fn try_match(&self, path: &Path, radii: &SearchRadius) -> MatchResult<Matching> {
        let url = build_url(&self.config, path, radii)?;

        tracing::debug!(
            points = path.len(),
            profile = %self.config.profile,
            "Requesting route match"
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MatchError::Transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MatchError::Transport(format!("Failed to read response: {}", e)))?;

        if status != StatusCode::OK {
            return Err(MatchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: MatchResponse =
            serde_json::from_str(&body).map_err(|e| MatchError::Decode(e.to_string()))?;

        parsed
            .matchings
            .into_iter()
            .next()
            .ok_or_else(|| MatchError::NoMatchings {
                code: parsed.code.unwrap_or_else(|| "unknown".to_string()),
            })
    }
}

impl RouteMatcher for MapboxMatcher {
    async fn match_route(&self, path: Path, radii: SearchRadius) -> Option<MatchedGeometry> {
        let start = Instant::now();
        match self.try_match(&path, &radii).await {
            Ok(best) => {
                let leg = best.legs.first();
                tracing::info!(
                    points = path.len(),
                    matched_points = best.geometry.coordinates().len(),
                    distance_m = leg.map(|l| l.distance),
                    steps = leg.map(|l| l.steps.len()),
                    confidence = best.confidence,
                    "Route matched"
                );
                metrics::record_match("matched", start);
                Some(best.geometry)
            }
            Err(e) => {
                if let MatchError::Status { status, body } = &e {
                    tracing::debug!(status = *status, body = %body, "Matching service error body");
                }
                tracing::warn!(points = path.len(), error = %e, "Route match failed");
                metrics::record_match(e.kind(), start);
                None
            }
        }
    }
}

impl std::fmt::Debug for MapboxMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapboxMatcher")
            .field("base_url", &self.config.base_url)
            .field("profile", &self.config.profile)
            .field("search_radius_m", &self.config.search_radius_m)
            .finish()
    }
}
