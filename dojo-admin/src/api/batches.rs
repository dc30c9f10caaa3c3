//! Batch endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;

use crate::db;
use crate::{ApiError, ApiResult, AppState};
use dojo_common::db::models::Batch;

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub timing: Option<String>,
    pub centre: Option<String>,
}

/// GET /api/batches
pub async fn list_batches(State(state): State<AppState>) -> ApiResult<Json<Vec<Batch>>> {
    let rows = db::batches::list(&state.db).await?;
    Ok(Json(rows))
}

/// POST /api/batches
pub async fn create_batch(
    State(state): State<AppState>,
    Json(payload): Json<BatchRequest>,
) -> ApiResult<(StatusCode, Json<Batch>)> {
    let name = payload.name.as_deref().unwrap_or("").trim().to_string();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Name is required".to_string()));
    }

    let batch = db::batches::insert(
        &state.db,
        &name,
        payload.description.as_deref().unwrap_or(""),
        payload.timing.as_deref().unwrap_or(""),
        payload.centre.as_deref().unwrap_or(""),
    )
    .await
    .map_err(|e| {
        if e.is_unique_violation() {
            ApiError::Conflict("A batch with this name already exists".to_string())
        } else {
            ApiError::from(e)
        }
    })?;

    state.cache.invalidate("dashboard:admin*").await;

    Ok((StatusCode::CREATED, Json(batch)))
}

/// PUT /api/batches/:id
pub async fn update_batch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<BatchRequest>,
) -> ApiResult<Json<Batch>> {
    let updated = db::batches::update(
        &state.db,
        id,
        payload.name.as_deref().unwrap_or(""),
        payload.description.as_deref().unwrap_or(""),
        payload.timing.as_deref().unwrap_or(""),
        payload.centre.as_deref().unwrap_or(""),
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Batch not found".to_string()))?;

    state.cache.invalidate("dashboard:admin*").await;

    Ok(Json(updated))
}

/// DELETE /api/batches/:id
pub async fn delete_batch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let removed = db::batches::delete(&state.db, id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Batch not found".to_string()));
    }

    state.cache.invalidate("dashboard:admin*").await;

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Build batch routes
pub fn batch_routes() -> Router<AppState> {
    Router::new()
        .route("/api/batches", get(list_batches))
        .route("/api/batches", post(create_batch))
        .route("/api/batches/:id", put(update_batch))
        .route("/api/batches/:id", delete(delete_batch))
}
