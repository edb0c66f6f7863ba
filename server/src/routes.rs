// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use crate::handlers::{auth, donations, gratitude, orders, pomodoro, tasks};
use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::SqlitePool;

/// Creates and configures the application router: one route group per
/// entity, plus the stub auth surface.
pub fn create_router(pool: SqlitePool) -> Router {
    Router::new()
        // Auth stub
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/verify", get(auth::verify))
        // Tasks
        .route("/api/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route("/api/tasks/stats", get(tasks::task_stats))
        .route(
            "/api/tasks/{id}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        // Donations (DELETE is a soft delete; the permanent variant is explicit)
        .route(
            "/api/donations",
            get(donations::list_donations).post(donations::create_donation),
        )
        .route("/api/donations/stats", get(donations::donation_stats))
        .route(
            "/api/donations/{id}",
            get(donations::get_donation)
                .put(donations::update_donation)
                .delete(donations::soft_delete_donation),
        )
        .route("/api/donations/{id}/restore", patch(donations::restore_donation))
        .route(
            "/api/donations/{id}/permanent",
            delete(donations::permanent_delete_donation),
        )
        // Orders
        .route("/api/orders", get(orders::list_orders).post(orders::create_order))
        .route("/api/orders/stats", get(orders::order_stats))
        .route(
            "/api/orders/{order_id}",
            get(orders::get_order).delete(orders::delete_order),
        )
        .route("/api/orders/{order_id}/status", put(orders::update_order_status))
        // Gratitude notes
        .route(
            "/api/gratitude",
            get(gratitude::list_notes).post(gratitude::create_note),
        )
        .route(
            "/api/gratitude/{id}",
            get(gratitude::get_note)
                .put(gratitude::update_note)
                .delete(gratitude::delete_note),
        )
        // Pomodoro sessions
        .route(
            "/api/pomodoro",
            get(pomodoro::list_sessions).post(pomodoro::create_session),
        )
        .route("/api/pomodoro/stats", get(pomodoro::session_stats))
        .route("/api/pomodoro/{id}", delete(pomodoro::delete_session))
        // Adds the database pool to the application state
        .with_state(pool)
}
