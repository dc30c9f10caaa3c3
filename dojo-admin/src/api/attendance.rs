//! Attendance endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;

use crate::db;
use crate::{ApiError, ApiResult, AppState};
use dojo_common::db::models::AttendanceRecord;

#[derive(Debug, Deserialize)]
pub struct AttendanceRequest {
    pub student_name: Option<String>,
    pub date: Option<String>,
    pub status: Option<String>,
}

fn normalize_date(raw: &str) -> String {
    match raw.split_once('T') {
        Some((date, _)) => date.to_string(),
        None => raw.to_string(),
    }
}

/// GET /api/attendance
pub async fn list_attendance(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<AttendanceRecord>>> {
    let rows = db::attendance::list(&state.db).await?;
    Ok(Json(rows))
}

/// POST /api/attendance
pub async fn create_attendance(
    State(state): State<AppState>,
    Json(payload): Json<AttendanceRequest>,
) -> ApiResult<(StatusCode, Json<AttendanceRecord>)> {
    let student_name = payload.student_name.as_deref().unwrap_or("").trim().to_string();
    let date = payload.date.as_deref().unwrap_or("").trim().to_string();
    let status = payload.status.as_deref().unwrap_or("").trim().to_string();
    if student_name.is_empty() || date.is_empty() || status.is_empty() {
        return Err(ApiError::BadRequest(
            "Student, date and status are required".to_string(),
        ));
    }

    let record =
        db::attendance::insert(&state.db, &student_name, &normalize_date(&date), &status).await?;

    state.cache.invalidate("dashboard:admin*").await;

    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/attendance/:id
pub async fn update_attendance(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<AttendanceRequest>,
) -> ApiResult<Json<AttendanceRecord>> {
    let updated = db::attendance::update(
        &state.db,
        id,
        payload.student_name.as_deref().unwrap_or(""),
        &normalize_date(payload.date.as_deref().unwrap_or("")),
        payload.status.as_deref().unwrap_or(""),
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Attendance record not found".to_string()))?;

    state.cache.invalidate("dashboard:admin*").await;

    Ok(Json(updated))
}

/// DELETE /api/attendance/:id
pub async fn delete_attendance(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let removed = db::attendance::delete(&state.db, id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Attendance record not found".to_string()));
    }

    state.cache.invalidate("dashboard:admin*").await;

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Build attendance routes
pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/api/attendance", get(list_attendance))
        .route("/api/attendance", post(create_attendance))
        .route("/api/attendance/:id", put(update_attendance))
        .route("/api/attendance/:id", delete(delete_attendance))
}
