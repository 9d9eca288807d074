//! HTTP server setup and dispatch.
//!
//! # Responsibilities
//! - Create the axum Router with a catch-all route
//! - Wire up middleware (tracing, timeout, request ID)
//! - Hand matched requests to the RouteTable's handlers
//! - Answer 404 when no route entry matches

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::routing::{RequestContext, RouteTable};
use crate::store::Store;
use crate::tasks;

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub store: Arc<Store>,
    pub max_body_size: usize,
}

/// HTTP server for the task API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and store.
    pub fn new(config: &ServiceConfig, store: Arc<Store>) -> Self {
        let routes = Arc::new(tasks::routes());
        tracing::info!(route_count = routes.len(), "Route table compiled");

        let state = AppState {
            routes,
            store,
            max_body_size: config.listener.max_body_size,
        };

        Self {
            router: Self::build_router(config, state),
        }
    }

    /// Build the axum router with all middleware layers.
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch_request))
            .route("/", any(dispatch_request))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until `shutdown` resolves.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler feeding the custom route table.
async fn dispatch_request(State(state): State<AppState>, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();
    let method = parts.method;
    let path = parts.uri.path().to_string();

    let Some((handler, params)) = state.routes.dispatch(&method, &path) else {
        tracing::debug!(method = %method, path = %path, "No route matched");
        return StatusCode::NOT_FOUND.into_response();
    };

    let body = match axum::body::to_bytes(body, state.max_body_size).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(method = %method, path = %path, error = %err, "Failed to read request body");
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };

    tracing::debug!(method = %method, path = %path, "Dispatching request");
    handler(RequestContext {
        store: state.store.clone(),
        params,
        body,
    })
    .await
}
