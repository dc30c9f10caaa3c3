//! Student registration operations

use chrono::Utc;
use dojo_common::db::models::StudentRegistration;
use dojo_common::{Error, Result};
use sqlx::SqlitePool;

/// Fields of a new pending student registration
#[derive(Debug, Clone)]
pub struct NewStudentRegistration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub batch: String,
    pub verification_token: String,
}

pub async fn insert(
    pool: &SqlitePool,
    registration: &NewStudentRegistration,
) -> Result<StudentRegistration> {
    let result = sqlx::query(
        r#"
        INSERT INTO student_registrations (
            first_name, last_name, email, phone, batch,
            email_verified, verification_token, verification_sent_at
        ) VALUES (?, ?, ?, ?, ?, 0, ?, ?)
        "#,
    )
    .bind(&registration.first_name)
    .bind(&registration.last_name)
    .bind(&registration.email)
    .bind(&registration.phone)
    .bind(&registration.batch)
    .bind(&registration.verification_token)
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    get(pool, id)
        .await?
        .ok_or_else(|| Error::Internal(format!("Inserted registration {} not found", id)))
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<StudentRegistration>> {
    let row =
        sqlx::query_as::<_, StudentRegistration>("SELECT * FROM student_registrations WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(row)
}

/// Look up a registration that has completed email verification.
///
/// Used by student login: an unverified account cannot sign in.
pub async fn find_verified_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<StudentRegistration>> {
    let row = sqlx::query_as::<_, StudentRegistration>(
        "SELECT * FROM student_registrations WHERE email = ? AND email_verified = 1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
