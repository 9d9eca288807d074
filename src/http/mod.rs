//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, middleware layers)
//!     → catch-all route feeds the custom RouteTable
//!     → matched handler runs against the store
//!     → response to client (404 on no match)
//! ```

pub mod server;

pub use server::{AppState, HttpServer};
