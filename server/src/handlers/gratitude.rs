// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use crate::database;
use crate::error::AppError;
use crate::extract::{Json, Query};
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use common::{CreateNotePayload, UpdateNotePayload};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::{debug, error, info};

#[derive(Deserialize, Debug)]
pub struct NoteListQuery {
    pub date: Option<NaiveDate>,
}

/// Handler for writing a new gratitude note.
pub async fn create_note(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateNotePayload>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    debug!("Received request to create gratitude note.");

    if payload.content.trim().is_empty() {
        error!("Validation failed: note content is empty.");
        return Err(AppError::validation("Content cannot be empty."));
    }

    let note = database::gratitude::create_note_in_db(&pool, payload).await?;

    info!("Gratitude note created successfully with ID: {}", note.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "note": note })),
    ))
}

/// Handler for listing notes, optionally filtered to one day.
pub async fn list_notes(
    State(pool): State<SqlitePool>,
    Query(query): Query<NoteListQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let notes = database::gratitude::list_notes_from_db(&pool, query.date).await?;
    info!("Successfully retrieved {} gratitude notes.", notes.len());
    Ok(Json(json!({ "success": true, "notes": notes })))
}

/// Handler for fetching a single note by ID.
pub async fn get_note(
    State(pool): State<SqlitePool>,
    Path(note_id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    match database::gratitude::get_note_from_db(&pool, note_id).await? {
        Some(note) => Ok(Json(json!({ "success": true, "note": note }))),
        None => Err(AppError::not_found(&format!(
            "Gratitude note with ID {} not found.",
            note_id
        ))),
    }
}

/// Handler for partially updating a note.
pub async fn update_note(
    State(pool): State<SqlitePool>,
    Path(note_id): Path<i64>,
    Json(payload): Json<UpdateNotePayload>,
) -> Result<Json<serde_json::Value>, AppError> {
    match database::gratitude::update_note_in_db(&pool, note_id, payload).await? {
        Some(note) => {
            info!("Gratitude note with ID {} updated successfully.", note_id);
            Ok(Json(json!({ "success": true, "note": note })))
        }
        None => Err(AppError::not_found(&format!(
            "Gratitude note with ID {} not found.",
            note_id
        ))),
    }
}

/// Handler for deleting a note (physical removal).
pub async fn delete_note(
    State(pool): State<SqlitePool>,
    Path(note_id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = database::gratitude::delete_note_from_db(&pool, note_id).await?;

    if deleted {
        info!("Gratitude note with ID {} deleted successfully.", note_id);
        Ok(Json(json!({ "success": true, "message": "Note deleted." })))
    } else {
        Err(AppError::not_found(&format!(
            "Gratitude note with ID {} not found for deletion.",
            note_id
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_note_validation_empty_content() {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let payload = Json(CreateNotePayload {
            content: "".to_string(),
            mood: None,
            date: None,
            time: None,
        });

        let result = create_note(State(pool), payload).await;

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Content cannot be empty.");
    }
}
