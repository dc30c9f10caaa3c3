//! dojo-admin - Martial-arts school administration backend
//!
//! CRUD endpoints over the school schema plus the email-verification +
//! deduplicated-registration workflow and a cached dashboard.
//!
//! Exposed as a library so integration tests can drive the components
//! directly.

pub mod api;
pub mod cache;
pub mod db;
pub mod dedup;
pub mod error;
pub mod notify;
pub mod token;
pub mod verification;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use cache::Cache;
use chrono::{DateTime, Utc};
use dojo_common::config::Config;
use notify::Notifier;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across handlers
///
/// Every collaborator is constructed once at startup and injected here; no
/// component reaches for ambient globals.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Read-through cache for dashboard aggregates
    pub cache: Cache,
    /// Outbound notification collaborator
    pub notifier: Notifier,
    pub config: Arc<Config>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, cache: Cache, notifier: Notifier, config: Arc<Config>) -> Self {
        Self {
            db,
            cache,
            notifier,
            config,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health::health_routes())
        .merge(api::auth::auth_routes())
        .merge(api::admissions::admission_routes())
        .merge(api::students::student_routes())
        .merge(api::verify::verify_routes())
        .merge(api::fees::fees_routes())
        .merge(api::instructors::instructor_routes())
        .merge(api::batches::batch_routes())
        .merge(api::payments::payment_routes())
        .merge(api::tournaments::tournament_routes())
        .merge(api::exams::exam_routes())
        .merge(api::store::store_routes())
        .merge(api::attendance::attendance_routes())
        .merge(api::announcements::announcement_routes())
        .merge(api::registrations::registration_routes())
        .merge(api::dashboard::dashboard_routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
