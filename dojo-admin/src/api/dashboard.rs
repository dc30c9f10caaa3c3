//! Dashboard endpoints
//!
//! Aggregate counts go through the read-through cache; a cache outage only
//! means the counts are computed on every request.

use axum::{
    extract::State,
    http::HeaderMap,
    routing::get,
    Json, Router,
};

use crate::api::auth::authorize;
use crate::db::dashboard::{self, AdminDashboard, StudentDashboard};
use crate::{ApiResult, AppState};

const ADMIN_DASHBOARD_TTL: u64 = 600;
const STUDENT_DASHBOARD_TTL: u64 = 300;

/// GET /api/dashboard/admin
pub async fn admin_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<AdminDashboard>> {
    authorize(&state, &headers, "admin").await?;

    let db = state.db.clone();
    let stats = state
        .cache
        .get_or_compute("dashboard:admin", ADMIN_DASHBOARD_TTL, || async move {
            dashboard::admin_counts(&db).await
        })
        .await?;

    Ok(Json(stats))
}

/// GET /api/dashboard/student
pub async fn student_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<StudentDashboard>> {
    let session = authorize(&state, &headers, "student").await?;

    let key = format!("dashboard:student:{}", session.student_id.unwrap_or_default());
    let db = state.db.clone();
    let stats = state
        .cache
        .get_or_compute(&key, STUDENT_DASHBOARD_TTL, || async move {
            dashboard::student_counts(&db).await
        })
        .await?;

    Ok(Json(stats))
}

/// Build dashboard routes
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/api/dashboard/admin", get(admin_dashboard))
        .route("/api/dashboard/student", get(student_dashboard))
}
