//! HTTP surface subsystem.
//!
//! # Data Flow
//! ```text
//! Client request
//!     → server.rs (Axum router, request ID, trace, timeout)
//!     → handlers.rs
//!         POST/PUT/DELETE /features → drawing surface → DrawEvent
//!         GET /route               → current "route" source
//!         GET /map                 → static viewport
//!     → response.rs (error mapping)
//! ```
//!
//! The HTTP layer never calls the matcher; matching is driven solely by
//! draw events consumed by the pipeline coordinator.

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use handlers::{AppState, DrawRequest};
pub use request::X_REQUEST_ID;
pub use server::HttpServer;
