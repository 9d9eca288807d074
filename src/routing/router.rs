//! Route table and dispatch.
//!
//! # Responsibilities
//! - Hold compiled (method, pattern, handler) entries
//! - Find the first matching entry for an incoming request
//!
//! # Design Decisions
//! - Immutable after construction; shared via Arc without locks
//! - O(n) scan in registration order (n is five here)

use std::future::Future;
use std::sync::Arc;

use axum::body::Bytes;
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;

use crate::routing::pattern::{PathParams, PathPattern};
use crate::store::Store;

/// Everything a handler needs for one request.
///
/// The store handle is injected here rather than held globally so tests can
/// run handlers against isolated store instances.
pub struct RequestContext {
    pub store: Arc<Store>,
    pub params: PathParams,
    pub body: Bytes,
}

/// A registered request handler.
pub type Handler = Arc<dyn Fn(RequestContext) -> BoxFuture<'static, Response> + Send + Sync>;

struct RouteEntry {
    method: Method,
    pattern: PathPattern,
    handler: Handler,
}

/// Ordered list of route entries.
#[derive(Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route. The template is compiled here, once.
    pub fn register<F, Fut, R>(&mut self, method: Method, template: &str, handler: F)
    where
        F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse + 'static,
    {
        let pattern = PathPattern::compile(template);
        let handler: Handler = Arc::new(move |ctx| {
            let fut = handler(ctx);
            Box::pin(async move { fut.await.into_response() })
        });

        tracing::debug!(method = %method, template = pattern.template(), "Route registered");
        self.entries.push(RouteEntry {
            method,
            pattern,
            handler,
        });
    }

    /// Find the first entry whose method and pattern match.
    pub fn dispatch(&self, method: &Method, path: &str) -> Option<(Handler, PathParams)> {
        self.entries.iter().find_map(|entry| {
            if entry.method != *method {
                return None;
            }
            entry
                .pattern
                .matches(path)
                .map(|params| (entry.handler.clone(), params))
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
