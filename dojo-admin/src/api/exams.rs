//! Belt exam endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;

use crate::db;
use crate::{ApiError, ApiResult, AppState};
use dojo_common::db::models::Exam;

#[derive(Debug, Deserialize)]
pub struct ExamRequest {
    pub title: Option<String>,
    pub grade_info: Option<String>,
    pub date: Option<String>,
    pub belt: Option<String>,
}

fn normalize_date(raw: &str) -> String {
    match raw.split_once('T') {
        Some((date, _)) => date.to_string(),
        None => raw.to_string(),
    }
}

/// GET /api/exams
pub async fn list_exams(State(state): State<AppState>) -> ApiResult<Json<Vec<Exam>>> {
    let rows = db::exams::list(&state.db).await?;
    Ok(Json(rows))
}

/// POST /api/exams
pub async fn create_exam(
    State(state): State<AppState>,
    Json(payload): Json<ExamRequest>,
) -> ApiResult<(StatusCode, Json<Exam>)> {
    let title = payload.title.as_deref().unwrap_or("").trim().to_string();
    let date = payload.date.as_deref().unwrap_or("").trim().to_string();
    let belt = payload.belt.as_deref().unwrap_or("").trim().to_string();
    if title.is_empty() || date.is_empty() || belt.is_empty() {
        return Err(ApiError::BadRequest(
            "Title, date, and belt are required".to_string(),
        ));
    }

    let exam = db::exams::insert(
        &state.db,
        &title,
        payload.grade_info.as_deref().unwrap_or(""),
        &normalize_date(&date),
        &belt,
    )
    .await?;

    state.cache.invalidate("dashboard:*").await;

    Ok((StatusCode::CREATED, Json(exam)))
}

/// PUT /api/exams/:id
pub async fn update_exam(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ExamRequest>,
) -> ApiResult<Json<Exam>> {
    let updated = db::exams::update(
        &state.db,
        id,
        payload.title.as_deref().unwrap_or(""),
        payload.grade_info.as_deref().unwrap_or(""),
        &normalize_date(payload.date.as_deref().unwrap_or("")),
        payload.belt.as_deref().unwrap_or(""),
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Exam not found".to_string()))?;

    state.cache.invalidate("dashboard:*").await;

    Ok(Json(updated))
}

/// DELETE /api/exams/:id
pub async fn delete_exam(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let removed = db::exams::delete(&state.db, id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Exam not found".to_string()));
    }

    state.cache.invalidate("dashboard:*").await;

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Build exam routes
pub fn exam_routes() -> Router<AppState> {
    Router::new()
        .route("/api/exams", get(list_exams))
        .route("/api/exams", post(create_exam))
        .route("/api/exams/:id", put(update_exam))
        .route("/api/exams/:id", delete(delete_exam))
}
