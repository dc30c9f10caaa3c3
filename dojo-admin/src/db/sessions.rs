//! Login session persistence
//!
//! Sessions are opaque uuid tokens with a database-side expiry; lookup
//! filters expired rows so a stale token reads as absent.

use chrono::{Duration, Utc};
use dojo_common::db::models::Session;
use dojo_common::Result;
use sqlx::SqlitePool;
use uuid::Uuid;

pub async fn create(
    pool: &SqlitePool,
    role: &str,
    subject: &str,
    student_id: Option<i64>,
    student_batch: Option<&str>,
    ttl_seconds: i64,
) -> Result<Session> {
    let now = Utc::now();
    let session = Session {
        token: Uuid::new_v4().to_string(),
        role: role.to_string(),
        subject: subject.to_string(),
        student_id,
        student_batch: student_batch.map(str::to_string),
        created_at: now.to_rfc3339(),
        expires_at: (now + Duration::seconds(ttl_seconds)).to_rfc3339(),
    };

    sqlx::query(
        r#"
        INSERT INTO sessions (token, role, subject, student_id, student_batch, created_at, expires_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&session.token)
    .bind(&session.role)
    .bind(&session.subject)
    .bind(session.student_id)
    .bind(&session.student_batch)
    .bind(&session.created_at)
    .bind(&session.expires_at)
    .execute(pool)
    .await?;

    Ok(session)
}

/// Look up an unexpired session by token.
pub async fn find_valid(pool: &SqlitePool, token: &str) -> Result<Option<Session>> {
    let row = sqlx::query_as::<_, Session>(
        "SELECT * FROM sessions WHERE token = ? AND expires_at > ?",
    )
    .bind(token)
    .bind(Utc::now().to_rfc3339())
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Drop expired rows; called opportunistically, failure is harmless.
pub async fn purge_expired(pool: &SqlitePool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
        .bind(Utc::now().to_rfc3339())
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
