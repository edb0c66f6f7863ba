// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use crate::database;
use crate::error::AppError;
use crate::extract::Json;
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use common::pomodoro::SESSION_TYPES;
use common::CreateSessionPayload;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::{debug, error, info};

/// Handler for recording a completed pomodoro session.
pub async fn create_session(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateSessionPayload>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    debug!(
        "Received request to record a {} session of {} minutes.",
        payload.session_type, payload.duration
    );

    if !SESSION_TYPES.contains(&payload.session_type.as_str()) {
        error!(
            "Validation failed: unknown session type '{}'.",
            payload.session_type
        );
        return Err(AppError::validation(&format!(
            "Session type must be one of: {}.",
            SESSION_TYPES.join(", ")
        )));
    }
    if payload.duration <= 0 {
        error!("Validation failed: session duration must be positive.");
        return Err(AppError::validation("Duration must be positive."));
    }

    let session = database::pomodoro::create_session_in_db(&pool, payload).await?;

    info!("Pomodoro session recorded with ID: {}", session.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "session": session })),
    ))
}

/// Handler for listing recorded sessions, most recent first.
pub async fn list_sessions(
    State(pool): State<SqlitePool>,
) -> Result<Json<serde_json::Value>, AppError> {
    let sessions = database::pomodoro::list_sessions_from_db(&pool).await?;
    info!("Successfully retrieved {} pomodoro sessions.", sessions.len());
    Ok(Json(json!({ "success": true, "sessions": sessions })))
}

/// Handler for deleting a recorded session.
pub async fn delete_session(
    State(pool): State<SqlitePool>,
    Path(session_id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = database::pomodoro::delete_session_from_db(&pool, session_id).await?;

    if deleted {
        info!("Pomodoro session with ID {} deleted.", session_id);
        Ok(Json(json!({ "success": true, "message": "Session deleted." })))
    } else {
        Err(AppError::not_found(&format!(
            "Pomodoro session with ID {} not found.",
            session_id
        )))
    }
}

/// Handler for pomodoro statistics.
pub async fn session_stats(
    State(pool): State<SqlitePool>,
) -> Result<Json<serde_json::Value>, AppError> {
    let stats = database::pomodoro::session_stats_from_db(&pool).await?;
    Ok(Json(json!({ "success": true, "stats": stats })))
}
