// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

/// The fixed set of order statuses. Membership is validated; transition
/// legality is deliberately NOT (any status may be written at any time,
/// matching the mobile client's expectations).
pub const ORDER_STATUSES: [&str; 6] = [
    "pending",
    "confirmed",
    "preparing",
    "out_for_delivery",
    "delivered",
    "cancelled",
];

/// One line of an order's shopping cart.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

/// A grocery order. `items` and `customer_info` are stored as JSON text
/// columns; `sqlx::types::Json` handles the (de)serialization on both sides.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[sqlx(rename = "id")]
    pub id: i64,

    // Public identifier ("ORD-..."); unique across the table.
    #[sqlx(rename = "order_id")]
    pub order_id: String,

    #[sqlx(rename = "items")]
    pub items: Json<Vec<OrderItem>>,

    #[sqlx(rename = "total")]
    pub total: f64,

    #[sqlx(rename = "delivery_fee")]
    pub delivery_fee: f64,

    #[sqlx(rename = "final_total")]
    pub final_total: f64,

    #[sqlx(rename = "status")]
    pub status: String,

    #[sqlx(rename = "customer_info")]
    pub customer_info: Option<Json<serde_json::Value>>,

    #[sqlx(rename = "created_at")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub delivery_fee: Option<f64>,
    pub final_total: Option<f64>,
    pub customer_info: Option<serde_json::Value>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateOrderStatusPayload {
    pub status: String,
}
