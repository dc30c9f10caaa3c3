//! Instructor endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;

use crate::db;
use crate::{ApiError, ApiResult, AppState};
use dojo_common::db::models::Instructor;

#[derive(Debug, Deserialize)]
pub struct InstructorRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub rank: Option<String>,
    pub photo_url: Option<String>,
}

/// GET /api/instructors
pub async fn list_instructors(State(state): State<AppState>) -> ApiResult<Json<Vec<Instructor>>> {
    let rows = db::instructors::list(&state.db).await?;
    Ok(Json(rows))
}

/// POST /api/instructors
pub async fn create_instructor(
    State(state): State<AppState>,
    Json(payload): Json<InstructorRequest>,
) -> ApiResult<(StatusCode, Json<Instructor>)> {
    let name = payload.name.as_deref().unwrap_or("").trim().to_string();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Name is required".to_string()));
    }

    let instructor = db::instructors::insert(
        &state.db,
        &name,
        payload.description.as_deref().unwrap_or(""),
        payload.rank.as_deref().unwrap_or(""),
        payload.photo_url.as_deref().unwrap_or(""),
    )
    .await?;

    state.cache.invalidate("dashboard:admin*").await;

    Ok((StatusCode::CREATED, Json(instructor)))
}

/// PUT /api/instructors/:id
pub async fn update_instructor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<InstructorRequest>,
) -> ApiResult<Json<Instructor>> {
    let updated = db::instructors::update(
        &state.db,
        id,
        payload.name.as_deref().unwrap_or(""),
        payload.description.as_deref().unwrap_or(""),
        payload.rank.as_deref().unwrap_or(""),
        payload.photo_url.as_deref().unwrap_or(""),
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Instructor not found".to_string()))?;

    state.cache.invalidate("dashboard:admin*").await;

    Ok(Json(updated))
}

/// DELETE /api/instructors/:id
pub async fn delete_instructor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let removed = db::instructors::delete(&state.db, id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Instructor not found".to_string()));
    }

    state.cache.invalidate("dashboard:admin*").await;

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Build instructor routes
pub fn instructor_routes() -> Router<AppState> {
    Router::new()
        .route("/api/instructors", get(list_instructors))
        .route("/api/instructors", post(create_instructor))
        .route("/api/instructors/:id", put(update_instructor))
        .route("/api/instructors/:id", delete(delete_instructor))
}
