// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A gratitude journal entry.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GratitudeNote {
    #[sqlx(rename = "id")]
    pub id: i64,

    #[sqlx(rename = "content")]
    pub content: String,

    // Free-form mood label picked in the app ("grateful", "calm", ...).
    #[sqlx(rename = "mood")]
    pub mood: Option<String>,

    #[sqlx(rename = "note_date")]
    pub date: NaiveDate,

    #[sqlx(rename = "note_time")]
    pub time: String,

    #[sqlx(rename = "created_at")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotePayload {
    pub content: String,
    pub mood: Option<String>,
    // Default to the server's current day/time when absent.
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNotePayload {
    pub content: Option<String>,
    pub mood: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
}
