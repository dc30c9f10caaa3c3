//! Fees payment endpoints
//!
//! Submissions dedup on transaction id and screenshot hash when present;
//! either collision rejects the whole payment.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::info;

use crate::dedup::{self, DedupKey};
use crate::db;
use crate::{ApiError, ApiResult, AppState};
use dojo_common::db::models::FeesPayment;

#[derive(Debug, Deserialize)]
pub struct CreateFeesPaymentRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub batch_name: Option<String>,
    pub centre: Option<String>,
    pub payment_datetime: Option<String>,
    pub status: Option<String>,
    pub txn_id: Option<String>,
    pub amount: Option<f64>,
    pub img_hash: Option<String>,
    pub screenshot_base64: Option<String>,
    pub validation: Option<serde_json::Value>,
}

/// Accept RFC 3339 or a bare `YYYY-MM-DDTHH:MM[:SS]` local stamp.
fn parse_payment_datetime(raw: &str) -> Option<String> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.to_rfc3339());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.format("%Y-%m-%dT%H:%M:%S").to_string());
        }
    }
    None
}

/// GET /api/fees-payments
pub async fn list_fees_payments(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<FeesPayment>>> {
    let rows = db::fees::list(&state.db).await?;
    Ok(Json(rows))
}

/// POST /api/fees-payments
pub async fn create_fees_payment(
    State(state): State<AppState>,
    Json(payload): Json<CreateFeesPaymentRequest>,
) -> ApiResult<(StatusCode, Json<FeesPayment>)> {
    let full_name = payload.full_name.as_deref().unwrap_or("").trim().to_string();
    let phone = payload.phone.as_deref().unwrap_or("").trim().to_string();
    let batch_name = payload.batch_name.as_deref().unwrap_or("").trim().to_string();
    let centre = payload.centre.as_deref().unwrap_or("").trim().to_string();

    if full_name.is_empty() || phone.is_empty() || batch_name.is_empty() || centre.is_empty() {
        return Err(ApiError::BadRequest("Missing required fields".to_string()));
    }

    let payment_datetime = match payload.payment_datetime.as_deref() {
        Some(raw) => parse_payment_datetime(raw)
            .ok_or_else(|| ApiError::BadRequest("Invalid payment_datetime".to_string()))?,
        None => Utc::now().to_rfc3339(),
    };

    let txn_id = payload.txn_id.filter(|v| !v.trim().is_empty());
    let img_hash = payload.img_hash.filter(|v| !v.trim().is_empty());

    let mut keys = Vec::new();
    if let Some(txn_id) = txn_id.as_deref() {
        keys.push(DedupKey::PaymentTxnId(txn_id));
    }
    if let Some(img_hash) = img_hash.as_deref() {
        keys.push(DedupKey::PaymentImageHash(img_hash));
    }
    dedup::ensure_unique(&state.db, &keys).await?;

    let validation_json = payload
        .validation
        .as_ref()
        .map(|v| serde_json::to_string(v))
        .transpose()
        .map_err(|e| ApiError::BadRequest(format!("Invalid validation payload: {}", e)))?;

    let payment = db::fees::insert(
        &state.db,
        &db::fees::NewFeesPayment {
            full_name,
            phone,
            batch_name,
            centre,
            payment_datetime,
            status: payload
                .status
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "Pending Verification".to_string()),
            txn_id,
            amount: payload.amount,
            img_hash,
            screenshot_base64: payload.screenshot_base64,
            validation_json,
        },
    )
    .await
    .map_err(|e| dedup::conflict_on_unique(e, "Duplicate transaction ID or screenshot"))?;

    info!("Fees payment {} recorded for {}", payment.id, payment.full_name);

    state.cache.invalidate("dashboard:admin*").await;

    Ok((StatusCode::CREATED, Json(payment)))
}

/// Build fees payment routes
pub fn fees_routes() -> Router<AppState> {
    Router::new()
        .route("/api/fees-payments", get(list_fees_payments))
        .route("/api/fees-payments", post(create_fees_payment))
}
