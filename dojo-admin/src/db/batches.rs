//! Batch operations

use dojo_common::db::models::Batch;
use dojo_common::{Error, Result};
use sqlx::SqlitePool;

pub async fn list(pool: &SqlitePool) -> Result<Vec<Batch>> {
    let rows = sqlx::query_as::<_, Batch>("SELECT * FROM batches ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

pub async fn insert(
    pool: &SqlitePool,
    name: &str,
    description: &str,
    timing: &str,
    centre: &str,
) -> Result<Batch> {
    let result = sqlx::query(
        "INSERT INTO batches (name, description, timing, centre) VALUES (?, ?, ?, ?)",
    )
    .bind(name)
    .bind(description)
    .bind(timing)
    .bind(centre)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    get(pool, id)
        .await?
        .ok_or_else(|| Error::Internal(format!("Inserted batch {} not found", id)))
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<Batch>> {
    let row = sqlx::query_as::<_, Batch>("SELECT * FROM batches WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    description: &str,
    timing: &str,
    centre: &str,
) -> Result<Option<Batch>> {
    let result = sqlx::query(
        r#"
        UPDATE batches
        SET name = ?, description = ?, timing = ?, centre = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(timing)
    .bind(centre)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get(pool, id).await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM batches WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
