// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use anyhow::{Context, Result};
use chrono::Utc;
use common::{CreateSessionPayload, PomodoroSession};
use sqlx::SqlitePool;

/// Records a completed pomodoro session. `completed_at` defaults to now.
pub async fn create_session_in_db(
    pool: &SqlitePool,
    payload: CreateSessionPayload,
) -> Result<PomodoroSession> {
    let now = Utc::now();
    let completed_at = payload.completed_at.unwrap_or(now);

    let id = sqlx::query(
        "INSERT INTO pomodoro_sessions (session_type, duration, completed_at, created_at) \
         VALUES (?, ?, ?, ?)",
    )
    .bind(&payload.session_type)
    .bind(payload.duration)
    .bind(completed_at)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to insert pomodoro session into DB")?
    .last_insert_rowid();

    Ok(PomodoroSession {
        id,
        session_type: payload.session_type,
        duration: payload.duration,
        completed_at,
        created_at: now,
    })
}

/// Lists sessions, most recently completed first.
pub async fn list_sessions_from_db(pool: &SqlitePool) -> Result<Vec<PomodoroSession>> {
    let sessions = sqlx::query_as::<_, PomodoroSession>(
        "SELECT * FROM pomodoro_sessions ORDER BY completed_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await
    .context("Failed to retrieve pomodoro sessions from DB")?;

    Ok(sessions)
}

pub async fn delete_session_from_db(pool: &SqlitePool, session_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM pomodoro_sessions WHERE id = ?")
        .bind(session_id)
        .execute(pool)
        .await
        .context(format!("Failed to delete pomodoro session with ID: {}", session_id))?;

    Ok(result.rows_affected() > 0)
}

/// Aggregates session counts and total focused minutes in one query.
pub async fn session_stats_from_db(pool: &SqlitePool) -> Result<serde_json::Value> {
    let (total, focus, breaks, focus_minutes): (i64, i64, i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), \
                COALESCE(SUM(CASE WHEN session_type = 'focus' THEN 1 ELSE 0 END), 0), \
                COALESCE(SUM(CASE WHEN session_type = 'break' THEN 1 ELSE 0 END), 0), \
                COALESCE(SUM(CASE WHEN session_type = 'focus' THEN duration ELSE 0 END), 0) \
         FROM pomodoro_sessions",
    )
    .fetch_one(pool)
    .await
    .context("Failed to aggregate pomodoro sessions")?;

    Ok(serde_json::json!({
        "totalSessions": total,
        "focusSessions": focus,
        "breakSessions": breaks,
        "totalFocusMinutes": focus_minutes,
    }))
}
