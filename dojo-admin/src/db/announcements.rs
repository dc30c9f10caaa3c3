//! Announcement operations

use dojo_common::db::models::Announcement;
use dojo_common::{Error, Result};
use sqlx::SqlitePool;

pub async fn list(pool: &SqlitePool) -> Result<Vec<Announcement>> {
    let rows =
        sqlx::query_as::<_, Announcement>("SELECT * FROM announcements ORDER BY created_at DESC")
            .fetch_all(pool)
            .await?;

    Ok(rows)
}

pub async fn insert(pool: &SqlitePool, text: &str) -> Result<Announcement> {
    let result = sqlx::query("INSERT INTO announcements (text) VALUES (?)")
        .bind(text)
        .execute(pool)
        .await?;

    let id = result.last_insert_rowid();
    let row = sqlx::query_as::<_, Announcement>("SELECT * FROM announcements WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.ok_or_else(|| Error::Internal(format!("Inserted announcement {} not found", id)))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM announcements WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
