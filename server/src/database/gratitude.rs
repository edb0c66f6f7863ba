// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use common::{CreateNotePayload, GratitudeNote, UpdateNotePayload};
use sqlx::SqlitePool;
use tracing::debug;

/// Inserts a new gratitude note. Date and time-of-day default to the
/// server's current moment when the client omits them.
pub async fn create_note_in_db(
    pool: &SqlitePool,
    payload: CreateNotePayload,
) -> Result<GratitudeNote> {
    let now = Utc::now();
    let date = payload.date.unwrap_or_else(|| now.date_naive());
    let time = payload
        .time
        .unwrap_or_else(|| now.format("%H:%M").to_string());

    debug!("Insert values: date={}, time={}, mood={:?}", date, time, payload.mood);

    let id = sqlx::query(
        "INSERT INTO gratitude_notes (content, mood, note_date, note_time, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&payload.content)
    .bind(&payload.mood)
    .bind(date)
    .bind(&time)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to insert gratitude note into DB")?
    .last_insert_rowid();

    Ok(GratitudeNote {
        id,
        content: payload.content,
        mood: payload.mood,
        date,
        time,
        created_at: now,
        updated_at: now,
    })
}

/// Lists notes, most recent first, optionally narrowed to one day.
pub async fn list_notes_from_db(
    pool: &SqlitePool,
    date: Option<NaiveDate>,
) -> Result<Vec<GratitudeNote>> {
    let notes = match date {
        Some(day) => {
            sqlx::query_as::<_, GratitudeNote>(
                "SELECT * FROM gratitude_notes WHERE note_date = ? ORDER BY created_at DESC, id DESC",
            )
            .bind(day)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, GratitudeNote>(
                "SELECT * FROM gratitude_notes ORDER BY created_at DESC, id DESC",
            )
            .fetch_all(pool)
            .await
        }
    }
    .context("Failed to retrieve gratitude notes from DB")?;

    Ok(notes)
}

pub async fn get_note_from_db(pool: &SqlitePool, note_id: i64) -> Result<Option<GratitudeNote>> {
    let note = sqlx::query_as::<_, GratitudeNote>("SELECT * FROM gratitude_notes WHERE id = ?")
        .bind(note_id)
        .fetch_optional(pool)
        .await
        .context("Failed to retrieve gratitude note from DB")?;

    Ok(note)
}

/// Merges the partial payload into an existing note (COALESCE).
pub async fn update_note_in_db(
    pool: &SqlitePool,
    note_id: i64,
    payload: UpdateNotePayload,
) -> Result<Option<GratitudeNote>> {
    let now = Utc::now();
    let result = sqlx::query(
        "UPDATE gratitude_notes SET \
           content = COALESCE(?, content), \
           mood = COALESCE(?, mood), \
           note_date = COALESCE(?, note_date), \
           note_time = COALESCE(?, note_time), \
           updated_at = ? \
         WHERE id = ?",
    )
    .bind(payload.content)
    .bind(payload.mood)
    .bind(payload.date)
    .bind(payload.time)
    .bind(now)
    .bind(note_id)
    .execute(pool)
    .await
    .context(format!("Failed to update gratitude note with ID: {}", note_id))?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_note_from_db(pool, note_id).await
}

pub async fn delete_note_from_db(pool: &SqlitePool, note_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM gratitude_notes WHERE id = ?")
        .bind(note_id)
        .execute(pool)
        .await
        .context(format!("Failed to delete gratitude note with ID: {}", note_id))?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::init_schema;

    async fn setup_test_db() -> Result<SqlitePool> {
        let pool = SqlitePool::connect("sqlite::memory:").await?;
        init_schema(&pool).await?;
        Ok(pool)
    }

    #[tokio::test]
    async fn test_create_fills_in_date_and_time() {
        let pool = setup_test_db().await.unwrap();
        let note = create_note_in_db(
            &pool,
            CreateNotePayload {
                content: "Morning coffee on the balcony".to_string(),
                mood: Some("calm".to_string()),
                date: None,
                time: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(note.date, Utc::now().date_naive());
        assert_eq!(note.time.len(), 5); // "HH:MM"
        assert_eq!(note.mood.as_deref(), Some("calm"));
    }

    #[tokio::test]
    async fn test_update_keeps_omitted_fields() {
        let pool = setup_test_db().await.unwrap();
        let note = create_note_in_db(
            &pool,
            CreateNotePayload {
                content: "Original".to_string(),
                mood: Some("grateful".to_string()),
                date: None,
                time: Some("08:00".to_string()),
            },
        )
        .await
        .unwrap();

        let updated = update_note_in_db(
            &pool,
            note.id,
            UpdateNotePayload {
                content: Some("Edited".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(updated.content, "Edited");
        assert_eq!(updated.mood.as_deref(), Some("grateful"));
        assert_eq!(updated.time, "08:00");
    }

    #[tokio::test]
    async fn test_list_filters_by_date() {
        let pool = setup_test_db().await.unwrap();
        let yesterday = Utc::now().date_naive().pred_opt().unwrap();
        create_note_in_db(
            &pool,
            CreateNotePayload {
                content: "Today".to_string(),
                mood: None,
                date: None,
                time: None,
            },
        )
        .await
        .unwrap();
        create_note_in_db(
            &pool,
            CreateNotePayload {
                content: "Yesterday".to_string(),
                mood: None,
                date: Some(yesterday),
                time: None,
            },
        )
        .await
        .unwrap();

        let notes = list_notes_from_db(&pool, Some(yesterday)).await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content, "Yesterday");
    }

    #[tokio::test]
    async fn test_delete_unknown_note() {
        let pool = setup_test_db().await.unwrap();
        assert!(!delete_note_from_db(&pool, 1234).await.unwrap());
    }
}
