//! Task model and error definitions.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;

/// Table name for task records in the store.
pub const TASKS_TABLE: &str = "tasks";

/// A task record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Immutable unique identifier (UUID v4).
    pub id: String,
    pub title: String,
    pub description: String,
    /// Null while the task is incomplete; set when toggled complete.
    pub completed_at: Option<DateTime<Utc>>,
    /// Never changes after creation.
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a fresh task from a draft, stamping id and timestamps.
    pub fn new(draft: TaskDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            description: draft.description,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request body for create and replace. Missing fields default to empty
/// strings; replace rejects empties, create does not.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
}

/// Errors a handler can answer with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or empty required field. Answered as 400 with a message body.
    #[error("{0}")]
    Validation(String),

    /// Unknown task id. Answered as 404 with an empty body.
    #[error("not found")]
    NotFound,

    /// Store failure (disk or serialization). Answered as 500.
    #[error(transparent)]
    Storage(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound,
            other => ApiError::Storage(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "message": message })),
            )
                .into_response(),
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Storage(err) => {
                tracing::error!(error = %err, "Store operation failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
