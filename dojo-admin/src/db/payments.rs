//! Admin payment ledger operations

use dojo_common::db::models::Payment;
use dojo_common::{Error, Result};
use sqlx::SqlitePool;

pub async fn list(pool: &SqlitePool) -> Result<Vec<Payment>> {
    let rows = sqlx::query_as::<_, Payment>("SELECT * FROM payments ORDER BY date DESC")
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

pub async fn insert(
    pool: &SqlitePool,
    student_name: &str,
    amount: f64,
    date: &str,
    status: &str,
) -> Result<Payment> {
    let result = sqlx::query(
        "INSERT INTO payments (student_name, amount, date, status) VALUES (?, ?, ?, ?)",
    )
    .bind(student_name)
    .bind(amount)
    .bind(date)
    .bind(status)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    get(pool, id)
        .await?
        .ok_or_else(|| Error::Internal(format!("Inserted payment {} not found", id)))
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<Payment>> {
    let row = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    student_name: &str,
    amount: f64,
    date: &str,
    status: &str,
) -> Result<Option<Payment>> {
    let result = sqlx::query(
        "UPDATE payments SET student_name = ?, amount = ?, date = ?, status = ? WHERE id = ?",
    )
    .bind(student_name)
    .bind(amount)
    .bind(date)
    .bind(status)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get(pool, id).await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM payments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
