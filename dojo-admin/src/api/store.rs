//! Store item and order endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;

use crate::db;
use crate::{ApiError, ApiResult, AppState};
use dojo_common::db::models::{StoreItem, StoreOrderDetail};

const ORDER_STATUSES: [&str; 3] = ["Pending", "Confirmed", "Delivered"];

#[derive(Debug, Deserialize)]
pub struct StoreItemRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StoreOrderRequest {
    pub store_item_id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub centre: Option<String>,
    pub batch: Option<String>,
    pub quantity: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct OrderStatusRequest {
    pub status: Option<String>,
}

/// GET /api/store-items
pub async fn list_items(State(state): State<AppState>) -> ApiResult<Json<Vec<StoreItem>>> {
    let rows = db::store::list_items(&state.db).await?;
    Ok(Json(rows))
}

/// POST /api/store-items
pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<StoreItemRequest>,
) -> ApiResult<(StatusCode, Json<StoreItem>)> {
    let name = payload.name.as_deref().unwrap_or("").trim().to_string();
    let Some(price) = payload.price else {
        return Err(ApiError::BadRequest("Name and price are required".to_string()));
    };
    if name.is_empty() {
        return Err(ApiError::BadRequest("Name and price are required".to_string()));
    }

    let item = db::store::insert_item(
        &state.db,
        &name,
        price,
        payload.description.as_deref().unwrap_or(""),
    )
    .await?;

    state.cache.invalidate("dashboard:*").await;

    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/store-items/:id
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<StoreItemRequest>,
) -> ApiResult<Json<StoreItem>> {
    let updated = db::store::update_item(
        &state.db,
        id,
        payload.name.as_deref().unwrap_or(""),
        payload.price.unwrap_or_default(),
        payload.description.as_deref().unwrap_or(""),
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Store item not found".to_string()))?;

    state.cache.invalidate("dashboard:*").await;

    Ok(Json(updated))
}

/// DELETE /api/store-items/:id
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let removed = db::store::delete_item(&state.db, id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Store item not found".to_string()));
    }

    state.cache.invalidate("dashboard:*").await;

    Ok(Json(serde_json::json!({ "success": true })))
}

/// POST /api/store-orders
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<StoreOrderRequest>,
) -> ApiResult<(StatusCode, Json<StoreOrderDetail>)> {
    let name = payload.name.as_deref().unwrap_or("").trim().to_string();
    let email = payload.email.as_deref().unwrap_or("").trim().to_string();
    let phone = payload.phone.as_deref().unwrap_or("").trim().to_string();
    let centre = payload.centre.as_deref().unwrap_or("").trim().to_string();
    let batch = payload.batch.as_deref().unwrap_or("").trim().to_string();

    let Some(store_item_id) = payload.store_item_id else {
        return Err(ApiError::BadRequest("All fields are required".to_string()));
    };
    if name.is_empty() || email.is_empty() || phone.is_empty() || centre.is_empty() || batch.is_empty()
    {
        return Err(ApiError::BadRequest("All fields are required".to_string()));
    }

    if db::store::get_item(&state.db, store_item_id).await?.is_none() {
        return Err(ApiError::NotFound("Store item not found".to_string()));
    }

    let order = db::store::insert_order(
        &state.db,
        store_item_id,
        &name,
        &email,
        &phone,
        &centre,
        &batch,
        payload.quantity.unwrap_or(1),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/store-orders
pub async fn list_orders(State(state): State<AppState>) -> ApiResult<Json<Vec<StoreOrderDetail>>> {
    let rows = db::store::list_orders(&state.db).await?;
    Ok(Json(rows))
}

/// PUT /api/store-orders/:id
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusRequest>,
) -> ApiResult<Json<StoreOrderDetail>> {
    let status = payload.status.as_deref().unwrap_or("");
    if !ORDER_STATUSES.contains(&status) {
        return Err(ApiError::BadRequest("Invalid status".to_string()));
    }

    let updated = db::store::update_order_status(&state.db, id, status)
        .await?
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;

    Ok(Json(updated))
}

/// DELETE /api/store-orders/:id
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let removed = db::store::delete_order(&state.db, id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Order not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Build store routes
pub fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/api/store-items", get(list_items))
        .route("/api/store-items", post(create_item))
        .route("/api/store-items/:id", put(update_item))
        .route("/api/store-items/:id", delete(delete_item))
        .route("/api/store-orders", get(list_orders))
        .route("/api/store-orders", post(create_order))
        .route("/api/store-orders/:id", put(update_order_status))
        .route("/api/store-orders/:id", delete(delete_order))
}
