//! Admission enquiry endpoints
//!
//! Submission runs the full registration workflow: normalize, validate,
//! dedup-check email and phone, mint a verification token, persist the
//! pending row, and queue the verification email.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use crate::api::{normalize_email, normalize_phone, verification_link, CreatedResponse};
use crate::dedup::{self, DedupKey};
use crate::notify::templates;
use crate::{db, token};
use crate::{ApiError, ApiResult, AppState};
use dojo_common::db::models::Admission;

#[derive(Debug, Deserialize)]
pub struct CreateAdmissionRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Accepted as a number or a numeric string
    pub age: Option<serde_json::Value>,
    pub belt_level: Option<String>,
    pub address: Option<String>,
    pub centre: Option<String>,
    pub batch_timing: Option<String>,
    pub photo_url: Option<String>,
}

fn parse_age(value: &Option<serde_json::Value>) -> Option<i64> {
    match value {
        Some(serde_json::Value::Number(n)) => n.as_i64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

/// GET /api/admissions
pub async fn list_admissions(State(state): State<AppState>) -> ApiResult<Json<Vec<Admission>>> {
    let rows = db::admissions::list(&state.db).await?;
    Ok(Json(rows))
}

/// POST /api/admissions
pub async fn create_admission(
    State(state): State<AppState>,
    Json(payload): Json<CreateAdmissionRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse<Admission>>)> {
    let first_name = payload.first_name.as_deref().unwrap_or("").trim().to_string();
    let last_name = payload.last_name.as_deref().unwrap_or("").trim().to_string();
    let email = normalize_email(payload.email.as_deref().unwrap_or(""));
    let phone = normalize_phone(payload.phone.as_deref().unwrap_or(""));
    let age = parse_age(&payload.age);
    let belt_level = payload.belt_level.as_deref().unwrap_or("").trim().to_string();
    let address = payload.address.as_deref().unwrap_or("").trim().to_string();
    let centre = payload.centre.as_deref().unwrap_or("").trim().to_string();
    let batch_timing = payload.batch_timing.as_deref().unwrap_or("").trim().to_string();
    let photo_url = payload.photo_url.unwrap_or_default();

    let required = [
        ("First Name", !first_name.is_empty()),
        ("Last Name", !last_name.is_empty()),
        ("Email", !email.is_empty()),
        ("Phone", !phone.is_empty()),
        ("Age", age.is_some()),
        ("Belt Level", !belt_level.is_empty()),
        ("Address", !address.is_empty()),
        ("Centre", !centre.is_empty()),
        ("Batch Timing", !batch_timing.is_empty()),
    ];
    let missing: Vec<&str> = required
        .iter()
        .filter(|(_, present)| !present)
        .map(|(field, _)| *field)
        .collect();
    if !missing.is_empty() {
        return Err(ApiError::BadRequest(format!(
            "All fields are required (missing: {})",
            missing.join(", ")
        )));
    }

    dedup::ensure_unique(
        &state.db,
        &[DedupKey::AdmissionEmail(&email), DedupKey::AdmissionPhone(&phone)],
    )
    .await?;

    let verification_token = token::issue();

    let new_admission = db::admissions::NewAdmission {
        first_name: first_name.clone(),
        last_name,
        email: email.clone(),
        phone,
        age: age.unwrap_or_default(),
        belt_level,
        address,
        centre,
        batch_timing,
        photo_url,
        verification_token: verification_token.clone(),
    };

    let admission = db::admissions::insert(&state.db, &new_admission)
        .await
        .map_err(|e| {
            dedup::conflict_on_unique(e, "This email or phone number is already registered")
        })?;

    info!("Admission {} created for {}", admission.id, email);

    let link = verification_link(
        &state.config.public_base_url,
        "/verify-email",
        &verification_token,
        &email,
    );
    state
        .notifier
        .queue(email, templates::admission_verification(&first_name, &link));

    state.cache.invalidate("dashboard:admin*").await;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            record: admission,
            message: "Registration successful! Please check your email to verify your account."
                .to_string(),
        }),
    ))
}

/// DELETE /api/admissions/:id
pub async fn delete_admission(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let removed = db::admissions::delete(&state.db, id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Admission not found".to_string()));
    }

    state.cache.invalidate("dashboard:admin*").await;

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Build admission routes
pub fn admission_routes() -> Router<AppState> {
    Router::new()
        .route("/api/admissions", get(list_admissions))
        .route("/api/admissions", post(create_admission))
        .route("/api/admissions/:id", delete(delete_admission))
}
