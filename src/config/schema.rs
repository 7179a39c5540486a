//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the route service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,

    /// Matching service settings.
    pub matching: MatchingConfig,

    /// Route layer styling and replacement policy.
    pub render: RenderConfig,

    /// Static map viewport, served to clients as-is.
    pub map: MapConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Per-request timeout for the HTTP surface in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Which match result is allowed to reach the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApplyPolicy {
    /// Every successful match is rendered; the last response to resolve wins.
    #[default]
    LastResolved,
    /// A match is rendered only if no newer draw event arrived meanwhile.
    LatestDrawn,
}

/// Matching service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Service origin, e.g. "https://api.mapbox.com".
    pub base_url: String,

    /// Routing profile appended to `/matching/v5/`.
    pub profile: String,

    /// Access token sent as the `access_token` query parameter.
    pub access_token: String,

    /// Search radius in meters applied to every drawn point.
    pub search_radius_m: f64,

    /// Request turn-by-turn steps.
    pub steps: bool,

    /// Optional request timeout. Unset means the request may wait indefinitely.
    pub request_timeout_secs: Option<u64>,

    /// Policy for overlapping matches.
    pub apply_policy: ApplyPolicy,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.mapbox.com".to_string(),
            profile: "mapbox/driving".to_string(),
            access_token: String::new(),
            search_radius_m: 25.0,
            steps: true,
            request_timeout_secs: None,
            apply_policy: ApplyPolicy::default(),
        }
    }
}

/// What the renderer does when a route is already shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RenderPolicy {
    /// Remove the existing route and show nothing until the next render.
    #[default]
    Toggle,
    /// Remove the existing route and show the new geometry.
    Replace,
}

/// Route layer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    pub policy: RenderPolicy,
    pub line_color: String,
    pub line_width: f64,
    pub line_opacity: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            policy: RenderPolicy::default(),
            line_color: "#03AA46".to_string(),
            line_width: 8.0,
            line_opacity: 0.8,
        }
    }
}

/// Initial map viewport.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MapConfig {
    /// Style URL.
    pub style: String,

    /// `[lon, lat]`.
    pub center: [f64; 2],

    pub zoom: f64,
    pub min_zoom: f64,
    pub bearing: f64,
    pub pitch: f64,

    /// Custom attribution text shown in the compact attribution control.
    pub attribution: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            style: "mapbox://styles/mapbox/streets-v12".to_string(),
            center: [69.248387, 41.316971],
            zoom: 16.0,
            min_zoom: 16.0,
            bearing: -174.65,
            pitch: 74.08,
            attribution: "© Metashkent".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
