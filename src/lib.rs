//! Route capture and map-matching service library.

pub mod config;
pub mod drawing;
pub mod geo;
pub mod http;
pub mod lifecycle;
pub mod matching;
pub mod observability;
pub mod pipeline;
pub mod render;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::{RouteService, Shutdown};
pub use matching::{MapboxMatcher, RouteMatcher};
pub use pipeline::RouteCoordinator;
pub use render::RouteRenderer;
