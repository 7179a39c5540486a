//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (radius > 0, zoom/pitch bounds, opacity)
//! - Check that addresses and URLs parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::AppConfig;

const MAX_ZOOM: f64 = 24.0;
const MAX_PITCH: f64 = 85.0;

/// A single semantic problem with a configuration value.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `matching.base_url`.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "server.bind_address",
            format!("'{}' is not a socket address", config.server.bind_address),
        ));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "server.request_timeout_secs",
            "must be greater than zero",
        ));
    }

    let matching = &config.matching;
    if matching.access_token.trim().is_empty() {
        errors.push(ValidationError::new(
            "matching.access_token",
            "is required (set it in the file or via MAPBOX_ACCESS_TOKEN)",
        ));
    }
    match url::Url::parse(&matching.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::new(
            "matching.base_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            "matching.base_url",
            format!("'{}' is not a URL: {}", matching.base_url, e),
        )),
    }
    if matching.profile.trim().is_empty() {
        errors.push(ValidationError::new("matching.profile", "must not be empty"));
    }
    if !matching.search_radius_m.is_finite() || matching.search_radius_m <= 0.0 {
        errors.push(ValidationError::new(
            "matching.search_radius_m",
            format!("must be a positive number, got {}", matching.search_radius_m),
        ));
    }
    if matching.request_timeout_secs == Some(0) {
        errors.push(ValidationError::new(
            "matching.request_timeout_secs",
            "must be greater than zero when set",
        ));
    }

    let render = &config.render;
    if render.line_width.is_nan() || render.line_width <= 0.0 {
        errors.push(ValidationError::new("render.line_width", "must be positive"));
    }
    if !(0.0..=1.0).contains(&render.line_opacity) {
        errors.push(ValidationError::new(
            "render.line_opacity",
            "must be between 0 and 1",
        ));
    }

    let map = &config.map;
    if !(0.0..=MAX_ZOOM).contains(&map.zoom) {
        errors.push(ValidationError::new("map.zoom", "must be between 0 and 24"));
    }
    if !(0.0..=MAX_ZOOM).contains(&map.min_zoom) {
        errors.push(ValidationError::new("map.min_zoom", "must be between 0 and 24"));
    } else if map.min_zoom > map.zoom {
        errors.push(ValidationError::new(
            "map.min_zoom",
            "must not exceed the initial zoom",
        ));
    }
    if !(0.0..=MAX_PITCH).contains(&map.pitch) {
        errors.push(ValidationError::new("map.pitch", "must be between 0 and 85"));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "'{}' is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
