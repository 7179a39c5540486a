//! Request serialization for the map-matching endpoint.
//!
//! ```text
//! GET {base_url}/matching/v5/{profile}/{lon,lat;lon,lat;...}
//!     ?geometries=geojson&radiuses={r;r;...}&steps=true&access_token={token}
//! ```

use url::Url;

use crate::geo::{Path, SearchRadius};
use crate::matching::types::{MatchError, MatchResult, MatchingConfig};

/// Semicolon-joined `lon,lat` pairs.
pub fn coordinates_param(path: &Path) -> String {
    join(path.coordinates().iter())
}

/// Semicolon-joined radii in meters.
pub fn radiuses_param(radii: &SearchRadius) -> String {
    join(radii.values().iter())
}

fn join<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
    items
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(";")
}

/// Build the full request URL.
///
/// Path and radii lengths are not compared here; keeping them equal is the
/// caller's job.
pub fn build_url(config: &MatchingConfig, path: &Path, radii: &SearchRadius) -> MatchResult<Url> {
    let raw = format!(
        "{}/matching/v5/{}/{}?geometries=geojson&radiuses={}&steps={}&access_token={}",
        config.base_url.trim_end_matches('/'),
        config.profile.trim_matches('/'),
        coordinates_param(path),
        radiuses_param(radii),
        config.steps,
        config.access_token,
    );
    Url::parse(&raw).map_err(|e| MatchError::InvalidUrl(e.to_string()))
}
