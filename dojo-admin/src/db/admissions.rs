//! Admission record operations

use chrono::Utc;
use dojo_common::db::models::Admission;
use dojo_common::{Error, Result};
use sqlx::SqlitePool;

/// Fields of a new pending admission
#[derive(Debug, Clone)]
pub struct NewAdmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub age: i64,
    pub belt_level: String,
    pub address: String,
    pub centre: String,
    pub batch_timing: String,
    pub photo_url: String,
    pub verification_token: String,
}

/// Insert a pending admission and return the stored row.
///
/// The row starts unverified with its token set; the verification workflow
/// performs the only mutation this record ever sees.
pub async fn insert(pool: &SqlitePool, admission: &NewAdmission) -> Result<Admission> {
    let result = sqlx::query(
        r#"
        INSERT INTO admissions (
            first_name, last_name, email, phone, age, belt_level,
            address, centre, batch_timing, photo_url,
            email_verified, verification_token, verification_sent_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?)
        "#,
    )
    .bind(&admission.first_name)
    .bind(&admission.last_name)
    .bind(&admission.email)
    .bind(&admission.phone)
    .bind(admission.age)
    .bind(&admission.belt_level)
    .bind(&admission.address)
    .bind(&admission.centre)
    .bind(&admission.batch_timing)
    .bind(&admission.photo_url)
    .bind(&admission.verification_token)
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    get(pool, id)
        .await?
        .ok_or_else(|| Error::Internal(format!("Inserted admission {} not found", id)))
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<Admission>> {
    let row = sqlx::query_as::<_, Admission>("SELECT * FROM admissions WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<Admission>> {
    let rows = sqlx::query_as::<_, Admission>("SELECT * FROM admissions ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Administrative deletion; returns the number of rows removed.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM admissions WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
