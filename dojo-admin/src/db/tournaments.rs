//! Tournament operations

use dojo_common::db::models::Tournament;
use dojo_common::{Error, Result};
use sqlx::SqlitePool;

pub async fn list(pool: &SqlitePool) -> Result<Vec<Tournament>> {
    let rows = sqlx::query_as::<_, Tournament>("SELECT * FROM tournaments ORDER BY date DESC")
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

pub async fn insert(
    pool: &SqlitePool,
    title: &str,
    location: &str,
    date: &str,
    description: &str,
) -> Result<Tournament> {
    let result = sqlx::query(
        "INSERT INTO tournaments (title, location, date, description) VALUES (?, ?, ?, ?)",
    )
    .bind(title)
    .bind(location)
    .bind(date)
    .bind(description)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    get(pool, id)
        .await?
        .ok_or_else(|| Error::Internal(format!("Inserted tournament {} not found", id)))
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<Tournament>> {
    let row = sqlx::query_as::<_, Tournament>("SELECT * FROM tournaments WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    title: &str,
    location: &str,
    date: &str,
    description: &str,
) -> Result<Option<Tournament>> {
    let result = sqlx::query(
        "UPDATE tournaments SET title = ?, location = ?, date = ?, description = ? WHERE id = ?",
    )
    .bind(title)
    .bind(location)
    .bind(date)
    .bind(description)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get(pool, id).await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM tournaments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
