//! Tournament endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;

use crate::db;
use crate::{ApiError, ApiResult, AppState};
use dojo_common::db::models::Tournament;

#[derive(Debug, Deserialize)]
pub struct TournamentRequest {
    pub title: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

fn normalize_date(raw: &str) -> String {
    match raw.split_once('T') {
        Some((date, _)) => date.to_string(),
        None => raw.to_string(),
    }
}

/// GET /api/tournaments
pub async fn list_tournaments(State(state): State<AppState>) -> ApiResult<Json<Vec<Tournament>>> {
    let rows = db::tournaments::list(&state.db).await?;
    Ok(Json(rows))
}

/// POST /api/tournaments
pub async fn create_tournament(
    State(state): State<AppState>,
    Json(payload): Json<TournamentRequest>,
) -> ApiResult<(StatusCode, Json<Tournament>)> {
    let title = payload.title.as_deref().unwrap_or("").trim().to_string();
    let date = payload.date.as_deref().unwrap_or("").trim().to_string();
    if title.is_empty() || date.is_empty() {
        return Err(ApiError::BadRequest("Title and date are required".to_string()));
    }

    let tournament = db::tournaments::insert(
        &state.db,
        &title,
        payload.location.as_deref().unwrap_or(""),
        &normalize_date(&date),
        payload.description.as_deref().unwrap_or(""),
    )
    .await?;

    state.cache.invalidate("dashboard:*").await;

    Ok((StatusCode::CREATED, Json(tournament)))
}

/// PUT /api/tournaments/:id
pub async fn update_tournament(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<TournamentRequest>,
) -> ApiResult<Json<Tournament>> {
    let updated = db::tournaments::update(
        &state.db,
        id,
        payload.title.as_deref().unwrap_or(""),
        payload.location.as_deref().unwrap_or(""),
        &normalize_date(payload.date.as_deref().unwrap_or("")),
        payload.description.as_deref().unwrap_or(""),
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Tournament not found".to_string()))?;

    state.cache.invalidate("dashboard:*").await;

    Ok(Json(updated))
}

/// DELETE /api/tournaments/:id
pub async fn delete_tournament(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let removed = db::tournaments::delete(&state.db, id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Tournament not found".to_string()));
    }

    state.cache.invalidate("dashboard:*").await;

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Build tournament routes
pub fn tournament_routes() -> Router<AppState> {
    Router::new()
        .route("/api/tournaments", get(list_tournaments))
        .route("/api/tournaments", post(create_tournament))
        .route("/api/tournaments/:id", put(update_tournament))
        .route("/api/tournaments/:id", delete(delete_tournament))
}
