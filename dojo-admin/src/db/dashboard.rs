//! Dashboard aggregate queries
//!
//! Cheap COUNT queries behind the read-through cache. The structs are the
//! cache values, so they round-trip through serde.

use dojo_common::Result;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Admin dashboard counters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub total_instructors: i64,
    pub total_batches: i64,
    pub total_admissions: i64,
    pub total_payments: i64,
    pub total_tournaments: i64,
    pub total_store_items: i64,
    pub total_exams: i64,
    pub total_announcements: i64,
    pub total_attendance: i64,
}

/// Student dashboard counters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDashboard {
    pub upcoming_tournaments: i64,
    pub upcoming_exams: i64,
    pub new_announcements: i64,
    pub store_items: i64,
}

async fn count(pool: &SqlitePool, sql: &str) -> Result<i64> {
    let value: i64 = sqlx::query_scalar(sql).fetch_one(pool).await?;
    Ok(value)
}

pub async fn admin_counts(pool: &SqlitePool) -> Result<AdminDashboard> {
    Ok(AdminDashboard {
        total_instructors: count(pool, "SELECT COUNT(*) FROM instructors").await?,
        total_batches: count(pool, "SELECT COUNT(*) FROM batches").await?,
        total_admissions: count(pool, "SELECT COUNT(*) FROM admissions").await?,
        total_payments: count(pool, "SELECT COUNT(*) FROM payments").await?,
        total_tournaments: count(pool, "SELECT COUNT(*) FROM tournaments").await?,
        total_store_items: count(pool, "SELECT COUNT(*) FROM store_items").await?,
        total_exams: count(pool, "SELECT COUNT(*) FROM exams").await?,
        total_announcements: count(pool, "SELECT COUNT(*) FROM announcements").await?,
        total_attendance: count(pool, "SELECT COUNT(*) FROM attendance").await?,
    })
}

pub async fn student_counts(pool: &SqlitePool) -> Result<StudentDashboard> {
    Ok(StudentDashboard {
        upcoming_tournaments: count(
            pool,
            "SELECT COUNT(*) FROM tournaments WHERE date > date('now')",
        )
        .await?,
        upcoming_exams: count(pool, "SELECT COUNT(*) FROM exams WHERE date > date('now')").await?,
        new_announcements: count(
            pool,
            "SELECT COUNT(*) FROM announcements WHERE created_at > datetime('now', '-7 days')",
        )
        .await?,
        store_items: count(pool, "SELECT COUNT(*) FROM store_items").await?,
    })
}
