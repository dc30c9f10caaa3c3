//! Admin payment ledger endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;

use crate::db;
use crate::{ApiError, ApiResult, AppState};
use dojo_common::db::models::Payment;

#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    pub student_name: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<String>,
    pub status: Option<String>,
}

/// Reduce an ISO datetime to its date part for the ledger column.
fn normalize_date(raw: &str) -> String {
    match raw.split_once('T') {
        Some((date, _)) => date.to_string(),
        None => raw.to_string(),
    }
}

/// GET /api/payments
pub async fn list_payments(State(state): State<AppState>) -> ApiResult<Json<Vec<Payment>>> {
    let rows = db::payments::list(&state.db).await?;
    Ok(Json(rows))
}

/// POST /api/payments
pub async fn create_payment(
    State(state): State<AppState>,
    Json(payload): Json<PaymentRequest>,
) -> ApiResult<(StatusCode, Json<Payment>)> {
    let student_name = payload.student_name.as_deref().unwrap_or("").trim().to_string();
    let date = payload.date.as_deref().unwrap_or("").trim().to_string();
    let Some(amount) = payload.amount else {
        return Err(ApiError::BadRequest("Missing required fields".to_string()));
    };
    if student_name.is_empty() || date.is_empty() {
        return Err(ApiError::BadRequest("Missing required fields".to_string()));
    }

    let payment = db::payments::insert(
        &state.db,
        &student_name,
        amount,
        &normalize_date(&date),
        payload.status.as_deref().unwrap_or("Pending"),
    )
    .await?;

    state.cache.invalidate("dashboard:admin*").await;

    Ok((StatusCode::CREATED, Json(payment)))
}

/// PUT /api/payments/:id
pub async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<PaymentRequest>,
) -> ApiResult<Json<Payment>> {
    let updated = db::payments::update(
        &state.db,
        id,
        payload.student_name.as_deref().unwrap_or(""),
        payload.amount.unwrap_or_default(),
        &normalize_date(payload.date.as_deref().unwrap_or("")),
        payload.status.as_deref().unwrap_or("Pending"),
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Payment not found".to_string()))?;

    state.cache.invalidate("dashboard:admin*").await;

    Ok(Json(updated))
}

/// DELETE /api/payments/:id
pub async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let removed = db::payments::delete(&state.db, id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Payment not found".to_string()));
    }

    state.cache.invalidate("dashboard:admin*").await;

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Build payment routes
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/api/payments", get(list_payments))
        .route("/api/payments", post(create_payment))
        .route("/api/payments/:id", put(update_payment))
        .route("/api/payments/:id", delete(delete_payment))
}
