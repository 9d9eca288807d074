//! Request handlers for the task lifecycle.
//!
//! Behavior notes:
//! - Create does not validate field presence; missing fields are stored as
//!   empty strings.
//! - Replace requires non-empty title and description, preserves
//!   `created_at`, refreshes `updated_at`, and reopens the task
//!   (`completed_at` back to null).
//! - Toggle-complete flips `completed_at` between null and now without
//!   touching `updated_at`; applying it twice restores the original state.

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use crate::routing::RequestContext;
use crate::store::{Store, StoreError};
use crate::tasks::types::{ApiError, Task, TaskDraft, TASKS_TABLE};

/// `POST /tasks` — insert a new task, 201 with empty body.
pub async fn create(ctx: RequestContext) -> Result<StatusCode, ApiError> {
    let draft: TaskDraft = parse_body(&ctx.body)?;
    let task = Task::new(draft);
    let record = serde_json::to_value(&task).map_err(StoreError::Serialize)?;

    ctx.store.insert(TASKS_TABLE, record)?;
    tracing::info!(id = %task.id, "Task created");
    Ok(StatusCode::CREATED)
}

/// `GET /tasks` — all tasks in insertion order.
pub async fn list(ctx: RequestContext) -> Result<Json<Vec<Value>>, ApiError> {
    Ok(Json(ctx.store.select(TASKS_TABLE, None)))
}

/// `PUT /tasks/:id` — replace title and description.
pub async fn replace(ctx: RequestContext) -> Result<StatusCode, ApiError> {
    let id = param(&ctx, "id")?;
    let draft: TaskDraft = parse_body(&ctx.body)?;

    if draft.title.is_empty() || draft.description.is_empty() {
        return Err(ApiError::Validation(
            "title or description are required".to_string(),
        ));
    }

    let existing = find_task(&ctx.store, id)?;

    let mut fields = Map::new();
    fields.insert("title".to_string(), Value::String(draft.title));
    fields.insert("description".to_string(), Value::String(draft.description));
    // replacing a task reopens it
    fields.insert("completed_at".to_string(), Value::Null);
    fields.insert("created_at".to_string(), json!(existing.created_at));
    fields.insert("updated_at".to_string(), json!(Utc::now()));

    ctx.store.update(TASKS_TABLE, id, fields)?;
    tracing::info!(id = %id, "Task replaced");
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /tasks/:id`.
pub async fn remove(ctx: RequestContext) -> Result<StatusCode, ApiError> {
    let id = param(&ctx, "id")?;
    ctx.store.delete(TASKS_TABLE, id)?;
    tracing::info!(id = %id, "Task deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /tasks/:id/complete` — flip completion both ways.
pub async fn toggle_complete(ctx: RequestContext) -> Result<StatusCode, ApiError> {
    let id = param(&ctx, "id")?;
    let task = find_task(&ctx.store, id)?;

    let completed_at = match task.completed_at {
        Some(_) => None,
        None => Some(Utc::now()),
    };

    let mut fields = Map::new();
    fields.insert("title".to_string(), Value::String(task.title));
    fields.insert("description".to_string(), Value::String(task.description));
    fields.insert("completed_at".to_string(), json!(completed_at));
    fields.insert("created_at".to_string(), json!(task.created_at));
    // completion is not an edit; updated_at stays put
    fields.insert("updated_at".to_string(), json!(task.updated_at));

    ctx.store.update(TASKS_TABLE, id, fields)?;
    tracing::info!(id = %id, completed = completed_at.is_some(), "Task completion toggled");
    Ok(StatusCode::NO_CONTENT)
}

/// Look up a path parameter. Missing only if a route template and its
/// handler disagree, which dispatch guarantees against.
fn param<'a>(ctx: &'a RequestContext, name: &str) -> Result<&'a str, ApiError> {
    ctx.params
        .get(name)
        .map(String::as_str)
        .ok_or(ApiError::NotFound)
}

fn parse_body<T>(body: &Bytes) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    if body.is_empty() {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|err| ApiError::Validation(format!("invalid JSON body: {err}")))
}

fn find_task(store: &Store, id: &str) -> Result<Task, ApiError> {
    let mut filter = Map::new();
    filter.insert("id".to_string(), Value::String(id.to_string()));

    let record = store
        .select(TASKS_TABLE, Some(&filter))
        .into_iter()
        .next()
        .ok_or(ApiError::NotFound)?;

    serde_json::from_value(record).map_err(|err| ApiError::Storage(StoreError::Serialize(err)))
}
