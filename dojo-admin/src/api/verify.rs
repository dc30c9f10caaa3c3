//! Email verification link endpoints
//!
//! These render HTML for the person clicking the link, with four distinct
//! outcomes: malformed link, invalid/expired link, already verified, and
//! fresh success.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::{error, info};

use crate::notify::templates;
use crate::verification::{self, VerifyTarget};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    pub token: Option<String>,
    pub email: Option<String>,
}

/// GET /verify-email
pub async fn verify_admission_email(
    State(state): State<AppState>,
    Query(query): Query<VerifyQuery>,
) -> Response {
    handle(state, query, VerifyTarget::Admission).await
}

/// GET /verify-student-email
pub async fn verify_student_email(
    State(state): State<AppState>,
    Query(query): Query<VerifyQuery>,
) -> Response {
    handle(state, query, VerifyTarget::StudentRegistration).await
}

async fn handle(state: AppState, query: VerifyQuery, target: VerifyTarget) -> Response {
    let token = query.token.unwrap_or_default();
    let email = query.email.unwrap_or_default();

    // Malformed link: reject before any lookup
    if token.is_empty() || email.is_empty() {
        return page(
            StatusCode::BAD_REQUEST,
            "Invalid Verification Link",
            "The verification link is invalid or missing required parameters.",
        );
    }

    match verification::verify_email(&state.db, target, &token, &email).await {
        Ok(outcome) if outcome.already_verified => page(
            StatusCode::OK,
            "Already Verified",
            "Your email has already been verified.",
        ),
        Ok(outcome) => {
            info!("Email verified for {} (record {})", outcome.email, outcome.record_id);

            match target {
                VerifyTarget::Admission => {
                    state
                        .notifier
                        .queue(outcome.email.clone(), templates::admission_welcome(&outcome.first_name));

                    page(
                        StatusCode::OK,
                        "Email Verified Successfully!",
                        &format!(
                            "Welcome, {}! Your registration is now complete. Our team \
                             will contact you within 24-48 hours to schedule your first \
                             trial class.",
                            outcome.first_name
                        ),
                    )
                }
                VerifyTarget::StudentRegistration => {
                    let batch = outcome.batch.as_deref().unwrap_or("");
                    page(
                        StatusCode::OK,
                        "Student Account Verified Successfully!",
                        &format!(
                            "Welcome, {}! Your student account is now active. Log in \
                             with your email and password karate@{}.",
                            outcome.first_name, batch
                        ),
                    )
                }
            }
        }
        Err(dojo_common::Error::NotFound(_)) => page(
            StatusCode::BAD_REQUEST,
            "Verification Failed",
            "Invalid or expired verification link.",
        ),
        Err(e) => {
            error!("Email verification error: {}", e);
            page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Verification Error",
                "An error occurred during email verification. Please try again or contact support.",
            )
        }
    }
}

fn page(status: StatusCode, heading: &str, body: &str) -> Response {
    let html = format!(
        "<!DOCTYPE html>\n<html>\n<body>\n<h2>{}</h2>\n<p>{}</p>\n<a href=\"/\">Return to Home</a>\n</body>\n</html>\n",
        heading, body
    );
    (status, Html(html)).into_response()
}

/// Build verification link routes
pub fn verify_routes() -> Router<AppState> {
    Router::new()
        .route("/verify-email", get(verify_admission_email))
        .route("/verify-student-email", get(verify_student_email))
}
