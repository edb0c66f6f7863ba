// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kinds of pomodoro session the timer records.
pub const SESSION_TYPES: [&str; 2] = ["focus", "break"];

/// A completed pomodoro session. Sessions are append-only; the app only
/// ever creates, lists and deletes them.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSession {
    #[sqlx(rename = "id")]
    pub id: i64,

    #[sqlx(rename = "session_type")]
    #[serde(rename = "type")]
    pub session_type: String,

    // Duration in minutes.
    #[sqlx(rename = "duration")]
    pub duration: i64,

    #[sqlx(rename = "completed_at")]
    pub completed_at: DateTime<Utc>,

    #[sqlx(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionPayload {
    #[serde(rename = "type")]
    pub session_type: String,
    pub duration: i64,
    pub completed_at: Option<DateTime<Utc>>,
}
