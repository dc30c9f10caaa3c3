//! Tournament and exam sign-up endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::db;
use crate::{ApiError, ApiResult, AppState};
use dojo_common::db::models::{ExamRegistration, TournamentRegistration};

#[derive(Debug, Deserialize)]
pub struct TournamentRegistrationRequest {
    pub tournament_id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub centre: Option<String>,
    pub batch: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExamRegistrationRequest {
    pub exam_id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub centre: Option<String>,
    pub batch: Option<String>,
}

fn require(value: Option<&str>) -> Option<String> {
    let trimmed = value.unwrap_or("").trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// POST /api/tournament-registrations
pub async fn create_tournament_registration(
    State(state): State<AppState>,
    Json(payload): Json<TournamentRegistrationRequest>,
) -> ApiResult<(StatusCode, Json<TournamentRegistration>)> {
    let (Some(tournament_id), Some(name), Some(email), Some(phone), Some(centre), Some(batch)) = (
        payload.tournament_id,
        require(payload.name.as_deref()),
        require(payload.email.as_deref()),
        require(payload.phone.as_deref()),
        require(payload.centre.as_deref()),
        require(payload.batch.as_deref()),
    ) else {
        return Err(ApiError::BadRequest("All fields are required".to_string()));
    };

    if db::tournaments::get(&state.db, tournament_id).await?.is_none() {
        return Err(ApiError::NotFound("Tournament not found".to_string()));
    }

    let registration = db::registrations::insert_tournament_registration(
        &state.db,
        tournament_id,
        &name,
        &email,
        &phone,
        &centre,
        &batch,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(registration)))
}

/// GET /api/tournament-registrations
pub async fn list_tournament_registrations(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<TournamentRegistration>>> {
    let rows = db::registrations::list_tournament_registrations(&state.db).await?;
    Ok(Json(rows))
}

/// DELETE /api/tournament-registrations/:id
pub async fn delete_tournament_registration(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let removed = db::registrations::delete_tournament_registration(&state.db, id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Registration not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "success": true })))
}

/// POST /api/exam-registrations
pub async fn create_exam_registration(
    State(state): State<AppState>,
    Json(payload): Json<ExamRegistrationRequest>,
) -> ApiResult<(StatusCode, Json<ExamRegistration>)> {
    let (Some(exam_id), Some(name), Some(email), Some(phone), Some(centre), Some(batch)) = (
        payload.exam_id,
        require(payload.name.as_deref()),
        require(payload.email.as_deref()),
        require(payload.phone.as_deref()),
        require(payload.centre.as_deref()),
        require(payload.batch.as_deref()),
    ) else {
        return Err(ApiError::BadRequest("All fields are required".to_string()));
    };

    if db::exams::get(&state.db, exam_id).await?.is_none() {
        return Err(ApiError::NotFound("Exam not found".to_string()));
    }

    let registration = db::registrations::insert_exam_registration(
        &state.db, exam_id, &name, &email, &phone, &centre, &batch,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(registration)))
}

/// GET /api/exam-registrations
pub async fn list_exam_registrations(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ExamRegistration>>> {
    let rows = db::registrations::list_exam_registrations(&state.db).await?;
    Ok(Json(rows))
}

/// DELETE /api/exam-registrations/:id
pub async fn delete_exam_registration(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let removed = db::registrations::delete_exam_registration(&state.db, id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Registration not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Build sign-up routes
pub fn registration_routes() -> Router<AppState> {
    Router::new()
        .route("/api/tournament-registrations", get(list_tournament_registrations))
        .route("/api/tournament-registrations", post(create_tournament_registration))
        .route("/api/tournament-registrations/:id", delete(delete_tournament_registration))
        .route("/api/exam-registrations", get(list_exam_registrations))
        .route("/api/exam-registrations", post(create_exam_registration))
        .route("/api/exam-registrations/:id", delete(delete_exam_registration))
}
