//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (scan route table in registration order)
//!     → pattern.rs (match compiled segments, capture params)
//!     → Return: handler + params, or None (HTTP layer answers 404)
//!
//! Route Compilation (at startup):
//!     "/tasks/:id"
//!     → split into segments
//!     → literal segments matched verbatim, `:name` segments capture
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Templates compiled once at registration, never per request
//! - No regex; plain segment comparison keeps matching O(segments)
//! - First match wins (registration order)
//! - Explicit no-match rather than a default handler

pub mod pattern;
pub mod router;

pub use pattern::{PathParams, PathPattern};
pub use router::{Handler, RequestContext, RouteTable};
