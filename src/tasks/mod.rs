//! Task lifecycle subsystem.
//!
//! # Data Flow
//! ```text
//! RouteTable dispatch
//!     → handlers.rs (parse body, call store, build response)
//!     → types.rs (Task model, error → status mapping)
//!
//! POST   /tasks              → create
//! GET    /tasks              → list
//! PUT    /tasks/:id          → replace
//! DELETE /tasks/:id          → remove
//! PATCH  /tasks/:id/complete → toggle_complete
//! ```
//!
//! # Design Decisions
//! - Handlers receive the store through `RequestContext`; no globals
//! - Completion is a toggle: the same endpoint flips both ways

pub mod handlers;
pub mod types;

pub use types::{ApiError, Task, TaskDraft};

use axum::http::Method;

use crate::routing::RouteTable;

/// Build the full route table for the task API.
pub fn routes() -> RouteTable {
    let mut table = RouteTable::new();
    table.register(Method::POST, "/tasks", handlers::create);
    table.register(Method::GET, "/tasks", handlers::list);
    table.register(Method::PUT, "/tasks/:id", handlers::replace);
    table.register(Method::DELETE, "/tasks/:id", handlers::remove);
    table.register(Method::PATCH, "/tasks/:id/complete", handlers::toggle_complete);
    table
}
