//! Instructor operations

use dojo_common::db::models::Instructor;
use dojo_common::{Error, Result};
use sqlx::SqlitePool;

pub async fn list(pool: &SqlitePool) -> Result<Vec<Instructor>> {
    let rows =
        sqlx::query_as::<_, Instructor>("SELECT * FROM instructors ORDER BY created_at DESC")
            .fetch_all(pool)
            .await?;

    Ok(rows)
}

pub async fn insert(
    pool: &SqlitePool,
    name: &str,
    description: &str,
    rank: &str,
    photo_url: &str,
) -> Result<Instructor> {
    let result = sqlx::query(
        r#"INSERT INTO instructors (name, description, "rank", photo_url) VALUES (?, ?, ?, ?)"#,
    )
    .bind(name)
    .bind(description)
    .bind(rank)
    .bind(photo_url)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    get(pool, id)
        .await?
        .ok_or_else(|| Error::Internal(format!("Inserted instructor {} not found", id)))
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<Instructor>> {
    let row = sqlx::query_as::<_, Instructor>("SELECT * FROM instructors WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Update an instructor; `None` when no row has that id.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    description: &str,
    rank: &str,
    photo_url: &str,
) -> Result<Option<Instructor>> {
    let result = sqlx::query(
        r#"
        UPDATE instructors
        SET name = ?, description = ?, "rank" = ?, photo_url = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(rank)
    .bind(photo_url)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get(pool, id).await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM instructors WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
