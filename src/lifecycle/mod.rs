//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     AppConfig → SketchPad, InMemoryMap, MapboxMatcher
//!              → RouteRenderer → RouteCoordinator
//!              → spawn coordinator loop → serve HTTP
//!
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast → coordinator loop and HTTP server stop
//!
//! Signals (signals.rs):
//!     SIGINT (Ctrl+C) → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - In-flight match tasks are not cancelled; they finish or fail on their own
//! - Config is read once, so there is no reload signal

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{RouteService, StartupError};
