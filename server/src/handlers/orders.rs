// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use crate::database;
use crate::error::AppError;
use crate::extract::{Json, Query};
use crate::ids;
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use common::orders::ORDER_STATUSES;
use common::{CreateOrderPayload, UpdateOrderStatusPayload};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::{debug, error, info};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 500;

#[derive(Deserialize, Debug)]
pub struct OrderListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
}

fn validate_status(status: &str) -> Result<(), AppError> {
    if !ORDER_STATUSES.contains(&status) {
        error!("Validation failed: unknown order status '{}'.", status);
        return Err(AppError::validation(&format!(
            "Status must be one of: {}.",
            ORDER_STATUSES.join(", ")
        )));
    }
    Ok(())
}

/// Handler for placing a new order.
pub async fn create_order(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    debug!("Received request to create order with {} items.", payload.items.len());

    if payload.items.is_empty() {
        error!("Validation failed: order has no items.");
        return Err(AppError::validation("Order must contain at least one item."));
    }
    for item in &payload.items {
        if item.id.trim().is_empty() || item.name.trim().is_empty() {
            error!("Validation failed: order item is missing id or name.");
            return Err(AppError::validation(
                "Every order item must have an id and a name.",
            ));
        }
        if item.price < 0.0 || item.quantity < 1 {
            error!(
                "Validation failed: bad price/quantity for item '{}'.",
                item.name
            );
            return Err(AppError::validation(
                "Every order item must have a non-negative price and a quantity of at least 1.",
            ));
        }
    }
    if payload.total <= 0.0 {
        error!("Validation failed: order total must be positive.");
        return Err(AppError::validation("Order total must be positive."));
    }

    let order_id = ids::next_order_id();
    match database::orders::create_order_in_db(&pool, order_id, payload).await? {
        Some(order) => {
            info!("Order created successfully: {}", order.order_id);
            Ok((
                StatusCode::CREATED,
                Json(json!({ "success": true, "order": order })),
            ))
        }
        None => Err(AppError::conflict("An order with this ID already exists.")),
    }
}

/// Handler for the paginated order listing.
/// Defaults: page 1, 50 records per page, newest first.
pub async fn list_orders(
    State(pool): State<SqlitePool>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    if let Some(status) = query.status.as_deref() {
        validate_status(status)?;
    }

    let page = query.page.unwrap_or(DEFAULT_PAGE).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    // Saturating: an out-of-range page is a request for an empty page,
    // never an arithmetic panic.
    let offset = (page - 1).saturating_mul(limit);

    let status = query.status.as_deref();
    let total = database::orders::count_orders_in_db(&pool, status).await?;
    let orders = database::orders::list_orders_from_db(&pool, status, limit, offset).await?;

    // Ceiling division; an empty store has zero pages.
    let total_pages = (total + limit - 1) / limit;

    info!(
        "Successfully retrieved {} orders (page {} of {}).",
        orders.len(),
        page,
        total_pages
    );

    Ok(Json(json!({
        "success": true,
        "orders": orders,
        "pagination": {
            "total": total,
            "page": page,
            "limit": limit,
            "totalPages": total_pages,
            "hasNext": page < total_pages,
            "hasPrev": page > 1,
        },
    })))
}

/// Handler for fetching a single order by its public identifier.
pub async fn get_order(
    State(pool): State<SqlitePool>,
    Path(order_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    match database::orders::get_order_from_db(&pool, &order_id).await? {
        Some(order) => Ok(Json(json!({ "success": true, "order": order }))),
        None => Err(AppError::not_found(&format!(
            "Order {} not found.",
            order_id
        ))),
    }
}

/// Handler for writing a new status onto an order. Membership in the
/// fixed status set is validated; transition legality is not.
pub async fn update_order_status(
    State(pool): State<SqlitePool>,
    Path(order_id): Path<String>,
    Json(payload): Json<UpdateOrderStatusPayload>,
) -> Result<Json<serde_json::Value>, AppError> {
    debug!("Received request to set order {} to {}.", order_id, payload.status);
    validate_status(&payload.status)?;

    match database::orders::update_order_status_in_db(&pool, &order_id, &payload.status).await? {
        Some(order) => Ok(Json(json!({ "success": true, "order": order }))),
        None => Err(AppError::not_found(&format!(
            "Order {} not found.",
            order_id
        ))),
    }
}

/// Handler for deleting an order (physical removal).
pub async fn delete_order(
    State(pool): State<SqlitePool>,
    Path(order_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = database::orders::delete_order_from_db(&pool, &order_id).await?;

    if deleted {
        info!("Order {} deleted successfully.", order_id);
        Ok(Json(json!({ "success": true, "message": "Order deleted." })))
    } else {
        Err(AppError::not_found(&format!(
            "Order {} not found for deletion.",
            order_id
        )))
    }
}

/// Handler for order statistics.
pub async fn order_stats(
    State(pool): State<SqlitePool>,
) -> Result<Json<serde_json::Value>, AppError> {
    let stats = database::orders::order_stats_from_db(&pool).await?;
    Ok(Json(json!({ "success": true, "stats": stats })))
}
