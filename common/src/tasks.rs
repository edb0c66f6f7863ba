// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Priorities accepted for a task. Anything else is a validation error.
pub const TASK_PRIORITIES: [&str; 3] = ["low", "medium", "high"];

/// Represents a to-do task within the system.
///
/// Derivation attributes (derive):
/// - `Serialize`, `Deserialize`: Allows conversion to/from JSON.
/// - `Debug`: Enables displaying the structure for debugging.
/// - `Clone`: Allows creating copies of the object.
/// - `sqlx::FromRow`: Allows `sqlx` to create a `Task` instance directly
///   from a database result row.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[sqlx(rename = "id")]
    pub id: i64,

    #[sqlx(rename = "title")]
    pub title: String,

    // Time of day as "HH:MM"; kept as text so the mobile client's format
    // round-trips untouched.
    #[sqlx(rename = "time")]
    pub time: String,

    // We use NaiveDate because we are only interested in the day,
    // without a timezone.
    #[sqlx(rename = "task_date")]
    pub date: NaiveDate,

    #[sqlx(rename = "completed")]
    pub completed: bool,

    #[sqlx(rename = "priority")]
    pub priority: String,

    #[sqlx(rename = "category")]
    pub category: String,

    #[sqlx(rename = "reminder_set")]
    pub reminder_set: bool,

    #[sqlx(rename = "created_at")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

/// Structure used to receive task creation data from the API.
/// It's a good practice to separate database models (`Task`)
/// from API models (`CreateTaskPayload`), as they may have different fields.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskPayload {
    pub title: String,
    pub time: String,
    pub date: NaiveDate,
    // Optional; the server fills in "medium" / "personal" / false.
    pub priority: Option<String>,
    pub category: Option<String>,
    pub reminder_set: Option<bool>,
}

/// Partial update: every field is optional, absent fields keep their
/// current value (COALESCE semantics in the database layer).
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskPayload {
    pub title: Option<String>,
    pub time: Option<String>,
    pub date: Option<NaiveDate>,
    pub completed: Option<bool>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub reminder_set: Option<bool>,
}
