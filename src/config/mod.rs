//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (MAPBOX_ACCESS_TOKEN, MAPBOX_MAP_STYLE)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → handed to the matcher, renderer and coordinator at construction
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup and never reloaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::AppConfig;
pub use schema::ApplyPolicy;
pub use schema::MapConfig;
pub use schema::MatchingConfig;
pub use schema::ObservabilityConfig;
pub use schema::RenderConfig;
pub use schema::RenderPolicy;
pub use schema::ServerConfig;
