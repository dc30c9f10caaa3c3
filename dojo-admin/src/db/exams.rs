//! Belt exam operations

use dojo_common::db::models::Exam;
use dojo_common::{Error, Result};
use sqlx::SqlitePool;

pub async fn list(pool: &SqlitePool) -> Result<Vec<Exam>> {
    let rows = sqlx::query_as::<_, Exam>("SELECT * FROM exams ORDER BY date DESC")
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

pub async fn insert(
    pool: &SqlitePool,
    title: &str,
    grade_info: &str,
    date: &str,
    belt: &str,
) -> Result<Exam> {
    let result =
        sqlx::query("INSERT INTO exams (title, grade_info, date, belt) VALUES (?, ?, ?, ?)")
            .bind(title)
            .bind(grade_info)
            .bind(date)
            .bind(belt)
            .execute(pool)
            .await?;

    let id = result.last_insert_rowid();
    get(pool, id)
        .await?
        .ok_or_else(|| Error::Internal(format!("Inserted exam {} not found", id)))
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<Exam>> {
    let row = sqlx::query_as::<_, Exam>("SELECT * FROM exams WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    title: &str,
    grade_info: &str,
    date: &str,
    belt: &str,
) -> Result<Option<Exam>> {
    let result = sqlx::query(
        "UPDATE exams SET title = ?, grade_info = ?, date = ?, belt = ? WHERE id = ?",
    )
    .bind(title)
    .bind(grade_info)
    .bind(date)
    .bind(belt)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get(pool, id).await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM exams WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
