//! Login and session authorization
//!
//! Admin logins check the seeded users row; student logins require a
//! verified registration and the batch password convention. Both mint an
//! opaque bearer token stored in the sessions table.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::normalize_email;
use crate::db;
use crate::{ApiError, ApiResult, AppState};
use dojo_common::db::models::Session;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginUser {
    pub email: String,
    pub role: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub user: LoginUser,
    pub message: String,
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let email = normalize_email(payload.email.as_deref().unwrap_or(""));
    let password = payload.password.unwrap_or_default();
    let role = payload.role.unwrap_or_default();

    if email.is_empty() || password.is_empty() || role.is_empty() {
        return Err(ApiError::BadRequest(
            "Email, password, and role are required".to_string(),
        ));
    }

    let ttl = state.config.session_ttl_seconds;

    match role.as_str() {
        "admin" => {
            let user = db::users::find_admin_by_email(&state.db, &email).await?;
            let Some(user) = user.filter(|u| db::users::verify_password(u, &password)) else {
                return Err(ApiError::Unauthorized(
                    "Invalid admin credentials".to_string(),
                ));
            };

            let session = db::sessions::create(&state.db, "admin", &user.email, None, None, ttl)
                .await?;
            info!("Admin login: {}", user.email);

            Ok(Json(LoginResponse {
                success: true,
                token: session.token,
                user: LoginUser {
                    email: user.email,
                    role: "admin".to_string(),
                    name: "Admin".to_string(),
                    student_id: None,
                    batch: None,
                },
                message: "Admin login successful".to_string(),
            }))
        }
        "student" => {
            let Some(student) = db::students::find_verified_by_email(&state.db, &email).await?
            else {
                return Err(ApiError::Unauthorized(
                    "Student not found or email not verified. Please register first.".to_string(),
                ));
            };

            let expected_password = format!("karate@{}", student.batch);
            if password != expected_password {
                return Err(ApiError::Unauthorized(format!(
                    "Invalid password. Use: karate@{}",
                    student.batch
                )));
            }

            let session = db::sessions::create(
                &state.db,
                "student",
                &student.email,
                Some(student.id),
                Some(&student.batch),
                ttl,
            )
            .await?;
            info!("Student login: {} (batch {})", student.email, student.batch);

            Ok(Json(LoginResponse {
                success: true,
                token: session.token,
                user: LoginUser {
                    email: student.email,
                    role: "student".to_string(),
                    name: format!("{} {}", student.first_name, student.last_name),
                    student_id: Some(student.id),
                    batch: Some(student.batch),
                },
                message: "Student login successful".to_string(),
            }))
        }
        _ => Err(ApiError::BadRequest("Invalid role specified".to_string())),
    }
}

/// Resolve the bearer token into an unexpired session with the given role.
pub async fn authorize(
    state: &AppState,
    headers: &HeaderMap,
    required_role: &str,
) -> ApiResult<Session> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::Unauthorized("No token provided".to_string()))?;

    let session = db::sessions::find_valid(&state.db, token)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid token".to_string()))?;

    if session.role != required_role {
        return Err(ApiError::Forbidden(format!(
            "{} access required",
            required_role
        )));
    }

    Ok(session)
}

/// Build authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/api/login", post(login))
}
