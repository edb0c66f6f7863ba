// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use anyhow::{Context, Result};
use chrono::Utc;
use common::{CreateOrderPayload, Order};
use sqlx::types::Json;
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Inserts a new order under the given public identifier.
/// Returns `None` when the identifier collides with an existing order
/// (the UNIQUE constraint on `order_id` fires).
pub async fn create_order_in_db(
    pool: &SqlitePool,
    order_id: String,
    payload: CreateOrderPayload,
) -> Result<Option<Order>> {
    let delivery_fee = payload.delivery_fee.unwrap_or(0.0);
    let final_total = payload.final_total.unwrap_or(payload.total + delivery_fee);
    let items = Json(payload.items);
    let customer_info = payload.customer_info.map(Json);
    let now = Utc::now();

    debug!(
        "Insert values: order_id={}, items={}, total={}, final_total={}",
        order_id,
        items.0.len(),
        payload.total,
        final_total
    );

    let result = sqlx::query(
        "INSERT INTO orders (order_id, items, total, delivery_fee, final_total, status, customer_info, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, 'pending', ?, ?, ?)",
    )
    .bind(&order_id)
    .bind(&items)
    .bind(payload.total)
    .bind(delivery_fee)
    .bind(final_total)
    .bind(&customer_info)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await;

    let id = match result {
        Ok(done) => done.last_insert_rowid(),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            info!("Duplicate order identifier rejected: {}", order_id);
            return Ok(None);
        }
        Err(e) => return Err(e).context("Failed to insert order into DB"),
    };

    Ok(Some(Order {
        id,
        order_id,
        items,
        total: payload.total,
        delivery_fee,
        final_total,
        status: "pending".to_string(),
        customer_info,
        created_at: now,
        updated_at: now,
    }))
}

/// Retrieves one page of orders, newest first, optionally narrowed to a
/// single status.
pub async fn list_orders_from_db(
    pool: &SqlitePool,
    status: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Order>> {
    let orders = match status {
        Some(status) => {
            sqlx::query_as::<_, Order>(
                "SELECT * FROM orders WHERE status = ? ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
            )
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, Order>(
                "SELECT * FROM orders ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
        }
    }
    .context("Failed to retrieve orders from DB")?;

    Ok(orders)
}

/// Counts orders matching the optional status filter, for pagination.
pub async fn count_orders_in_db(pool: &SqlitePool, status: Option<&str>) -> Result<i64> {
    let count: (i64,) = match status {
        Some(status) => {
            sqlx::query_as("SELECT COUNT(*) FROM orders WHERE status = ?")
                .bind(status)
                .fetch_one(pool)
                .await
        }
        None => sqlx::query_as("SELECT COUNT(*) FROM orders").fetch_one(pool).await,
    }
    .context("Failed to count orders in DB")?;

    Ok(count.0)
}

pub async fn get_order_from_db(pool: &SqlitePool, order_id: &str) -> Result<Option<Order>> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE order_id = ?")
        .bind(order_id)
        .fetch_optional(pool)
        .await
        .context("Failed to retrieve order from DB")?;

    Ok(order)
}

/// Writes a new status onto the order. Any member of the fixed status set
/// may be written at any time; legality of the transition is not checked
/// (matching the mobile client's expectations).
pub async fn update_order_status_in_db(
    pool: &SqlitePool,
    order_id: &str,
    status: &str,
) -> Result<Option<Order>> {
    let now = Utc::now();
    let result = sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE order_id = ?")
        .bind(status)
        .bind(now)
        .bind(order_id)
        .execute(pool)
        .await
        .context(format!("Failed to update status for order: {}", order_id))?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    info!("Order {} status set to {}.", order_id, status);
    get_order_from_db(pool, order_id).await
}

pub async fn delete_order_from_db(pool: &SqlitePool, order_id: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM orders WHERE order_id = ?")
        .bind(order_id)
        .execute(pool)
        .await
        .context(format!("Failed to delete order: {}", order_id))?;

    Ok(result.rows_affected() > 0)
}

/// Aggregates order counts by status plus total revenue over
/// non-cancelled orders.
pub async fn order_stats_from_db(pool: &SqlitePool) -> Result<serde_json::Value> {
    let (total, revenue): (i64, f64) = sqlx::query_as(
        "SELECT COUNT(*), COALESCE(SUM(CASE WHEN status != 'cancelled' THEN final_total ELSE 0 END), 0) FROM orders",
    )
    .fetch_one(pool)
    .await
    .context("Failed to aggregate order totals")?;

    let by_status: Vec<(String, i64)> =
        sqlx::query_as("SELECT status, COUNT(*) FROM orders GROUP BY status")
            .fetch_all(pool)
            .await
            .context("Failed to aggregate orders by status")?;

    let mut status_map = serde_json::Map::new();
    for (status, count) in by_status {
        status_map.insert(status, count.into());
    }

    Ok(serde_json::json!({
        "total": total,
        "byStatus": status_map,
        "totalRevenue": revenue,
    }))
}
