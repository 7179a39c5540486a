//! Route matching subsystem.
//!
//! # Data Flow
//! ```text
//! Path + SearchRadius
//!     → query.rs (semicolon-joined coordinate and radius strings)
//!     → client.rs (single GET to the matching endpoint)
//!     → types.rs (decode `matchings`)
//!     → Return: geometry of matchings[0], or None
//! ```
//!
//! # Design Decisions
//! - One attempt per call: no retry, no backoff, no timeout unless configured
//! - Transport errors, non-200 statuses and empty results are indistinguishable
//!   to callers; the distinction only survives in logs and metrics
//! - Concurrent calls are independent; nothing is coalesced or cancelled

pub mod client;
pub mod query;
pub mod types;

pub use client::{MapboxMatcher, RouteMatcher};
pub use types::{MatchError, MatchResponse, Matching};
