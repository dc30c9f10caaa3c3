//! Fees payment ledger operations
//!
//! Rows are append-only from this service's point of view; status edits are
//! an administrative action outside the core workflow.

use dojo_common::db::models::FeesPayment;
use dojo_common::{Error, Result};
use sqlx::SqlitePool;

/// Fields of a new fees payment submission
#[derive(Debug, Clone)]
pub struct NewFeesPayment {
    pub full_name: String,
    pub phone: String,
    pub batch_name: String,
    pub centre: String,
    pub payment_datetime: String,
    pub status: String,
    pub txn_id: Option<String>,
    pub amount: Option<f64>,
    pub img_hash: Option<String>,
    pub screenshot_base64: Option<String>,
    pub validation_json: Option<String>,
}

pub async fn insert(pool: &SqlitePool, payment: &NewFeesPayment) -> Result<FeesPayment> {
    let result = sqlx::query(
        r#"
        INSERT INTO fees_payments (
            full_name, phone, batch_name, centre, payment_datetime, status,
            txn_id, amount, img_hash, screenshot_base64, validation_json
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&payment.full_name)
    .bind(&payment.phone)
    .bind(&payment.batch_name)
    .bind(&payment.centre)
    .bind(&payment.payment_datetime)
    .bind(&payment.status)
    .bind(&payment.txn_id)
    .bind(payment.amount)
    .bind(&payment.img_hash)
    .bind(&payment.screenshot_base64)
    .bind(&payment.validation_json)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    let row = sqlx::query_as::<_, FeesPayment>("SELECT * FROM fees_payments WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.ok_or_else(|| Error::Internal(format!("Inserted fees payment {} not found", id)))
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<FeesPayment>> {
    let rows = sqlx::query_as::<_, FeesPayment>(
        "SELECT * FROM fees_payments ORDER BY payment_datetime DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
