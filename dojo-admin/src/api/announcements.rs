//! Announcement endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::db;
use crate::{ApiError, ApiResult, AppState};
use dojo_common::db::models::Announcement;

#[derive(Debug, Deserialize)]
pub struct AnnouncementRequest {
    pub text: Option<String>,
}

/// GET /api/announcements
pub async fn list_announcements(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Announcement>>> {
    let rows = db::announcements::list(&state.db).await?;
    Ok(Json(rows))
}

/// POST /api/announcements
pub async fn create_announcement(
    State(state): State<AppState>,
    Json(payload): Json<AnnouncementRequest>,
) -> ApiResult<(StatusCode, Json<Announcement>)> {
    let text = payload.text.as_deref().unwrap_or("").trim().to_string();
    if text.is_empty() {
        return Err(ApiError::BadRequest("Text is required".to_string()));
    }

    let announcement = db::announcements::insert(&state.db, &text).await?;

    state.cache.invalidate("dashboard:*").await;

    Ok((StatusCode::CREATED, Json(announcement)))
}

/// DELETE /api/announcements/:id
pub async fn delete_announcement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let removed = db::announcements::delete(&state.db, id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Announcement not found".to_string()));
    }

    state.cache.invalidate("dashboard:*").await;

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Build announcement routes
pub fn announcement_routes() -> Router<AppState> {
    Router::new()
        .route("/api/announcements", get(list_announcements))
        .route("/api/announcements", post(create_announcement))
        .route("/api/announcements/:id", delete(delete_announcement))
}
