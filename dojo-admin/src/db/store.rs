//! Store item and order operations

use dojo_common::db::models::{StoreItem, StoreOrderDetail};
use dojo_common::{Error, Result};
use sqlx::SqlitePool;

const ORDER_SELECT: &str = r#"
    SELECT so.id, so.store_item_id, so.name, so.email, so.phone, so.centre,
           so.batch, so.quantity, so.status, so.created_at,
           si.name AS item_name, si.price AS item_price,
           (so.quantity * si.price) AS total_price
    FROM store_orders so
    JOIN store_items si ON so.store_item_id = si.id
"#;

pub async fn list_items(pool: &SqlitePool) -> Result<Vec<StoreItem>> {
    let rows = sqlx::query_as::<_, StoreItem>("SELECT * FROM store_items ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

pub async fn insert_item(
    pool: &SqlitePool,
    name: &str,
    price: f64,
    description: &str,
) -> Result<StoreItem> {
    let result = sqlx::query("INSERT INTO store_items (name, price, description) VALUES (?, ?, ?)")
        .bind(name)
        .bind(price)
        .bind(description)
        .execute(pool)
        .await?;

    let id = result.last_insert_rowid();
    get_item(pool, id)
        .await?
        .ok_or_else(|| Error::Internal(format!("Inserted store item {} not found", id)))
}

pub async fn get_item(pool: &SqlitePool, id: i64) -> Result<Option<StoreItem>> {
    let row = sqlx::query_as::<_, StoreItem>("SELECT * FROM store_items WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn update_item(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    price: f64,
    description: &str,
) -> Result<Option<StoreItem>> {
    let result =
        sqlx::query("UPDATE store_items SET name = ?, price = ?, description = ? WHERE id = ?")
            .bind(name)
            .bind(price)
            .bind(description)
            .bind(id)
            .execute(pool)
            .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_item(pool, id).await
}

pub async fn delete_item(pool: &SqlitePool, id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM store_items WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn insert_order(
    pool: &SqlitePool,
    store_item_id: i64,
    name: &str,
    email: &str,
    phone: &str,
    centre: &str,
    batch: &str,
    quantity: i64,
) -> Result<StoreOrderDetail> {
    let result = sqlx::query(
        r#"
        INSERT INTO store_orders (store_item_id, name, email, phone, centre, batch, quantity)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(store_item_id)
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(centre)
    .bind(batch)
    .bind(quantity)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    get_order(pool, id)
        .await?
        .ok_or_else(|| Error::Internal(format!("Inserted store order {} not found", id)))
}

pub async fn get_order(pool: &SqlitePool, id: i64) -> Result<Option<StoreOrderDetail>> {
    let sql = format!("{} WHERE so.id = ?", ORDER_SELECT);
    let row = sqlx::query_as::<_, StoreOrderDetail>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn list_orders(pool: &SqlitePool) -> Result<Vec<StoreOrderDetail>> {
    let sql = format!("{} ORDER BY so.created_at DESC", ORDER_SELECT);
    let rows = sqlx::query_as::<_, StoreOrderDetail>(&sql)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

pub async fn update_order_status(
    pool: &SqlitePool,
    id: i64,
    status: &str,
) -> Result<Option<StoreOrderDetail>> {
    let result = sqlx::query("UPDATE store_orders SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_order(pool, id).await
}

pub async fn delete_order(pool: &SqlitePool, id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM store_orders WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
