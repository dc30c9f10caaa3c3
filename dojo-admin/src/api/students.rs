//! Student registration endpoint

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::api::{normalize_email, normalize_phone, verification_link, CreatedResponse};
use crate::dedup::{self, DedupKey};
use crate::notify::templates;
use crate::{db, token};
use crate::{ApiError, ApiResult, AppState};
use dojo_common::db::models::StudentRegistration;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRegisterRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub batch: Option<String>,
}

/// POST /api/student-register
pub async fn student_register(
    State(state): State<AppState>,
    Json(payload): Json<StudentRegisterRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse<StudentRegistration>>)> {
    let first_name = payload.first_name.as_deref().unwrap_or("").trim().to_string();
    let last_name = payload.last_name.as_deref().unwrap_or("").trim().to_string();
    let email = normalize_email(payload.email.as_deref().unwrap_or(""));
    let phone = normalize_phone(payload.phone.as_deref().unwrap_or(""));
    let batch = payload.batch.as_deref().unwrap_or("").trim().to_string();

    if first_name.is_empty()
        || last_name.is_empty()
        || email.is_empty()
        || phone.is_empty()
        || batch.is_empty()
    {
        return Err(ApiError::BadRequest("All fields are required".to_string()));
    }

    dedup::ensure_unique(&state.db, &[DedupKey::RegistrationEmail(&email)]).await?;

    let verification_token = token::issue();

    let registration = db::students::insert(
        &state.db,
        &db::students::NewStudentRegistration {
            first_name: first_name.clone(),
            last_name: last_name.clone(),
            email: email.clone(),
            phone,
            batch: batch.clone(),
            verification_token: verification_token.clone(),
        },
    )
    .await
    .map_err(|e| {
        dedup::conflict_on_unique(e, DedupKey::RegistrationEmail(&email).conflict_message())
    })?;

    info!("Student registration {} created for {}", registration.id, email);

    let link = verification_link(
        &state.config.public_base_url,
        "/verify-student-email",
        &verification_token,
        &email,
    );
    state.notifier.queue(
        email,
        templates::student_verification(&first_name, &last_name, &batch, &link),
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            record: registration,
            message: "Registration successful! Please check your email to verify your account."
                .to_string(),
        }),
    ))
}

/// Build student registration routes
pub fn student_routes() -> Router<AppState> {
    Router::new().route("/api/student-register", post(student_register))
}
