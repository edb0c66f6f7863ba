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
use common::tasks::TASK_PRIORITIES;
use common::{CreateTaskPayload, UpdateTaskPayload};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::{debug, error, info};

#[derive(Deserialize, Debug)]
pub struct TaskListQuery {
    pub date: Option<NaiveDate>,
}

fn validate_priority(priority: Option<&str>) -> Result<(), AppError> {
    if let Some(p) = priority {
        if !TASK_PRIORITIES.contains(&p) {
            error!("Validation failed: unknown priority '{}'.", p);
            return Err(AppError::validation(&format!(
                "Priority must be one of: {}.",
                TASK_PRIORITIES.join(", ")
            )));
        }
    }
    Ok(())
}

/// Handler for creating a new task.
pub async fn create_task(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateTaskPayload>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    debug!("Received request to create task: {}", payload.title);

    if payload.title.trim().is_empty() || payload.time.trim().is_empty() {
        error!("Validation failed: task title or time is empty.");
        return Err(AppError::validation("Title and time cannot be empty."));
    }
    validate_priority(payload.priority.as_deref())?;

    let task = database::tasks::create_task_in_db(&pool, payload).await?;

    info!("Task created successfully with ID: {}", task.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "task": task })),
    ))
}

/// Handler for listing tasks, optionally filtered to a single day.
pub async fn list_tasks(
    State(pool): State<SqlitePool>,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let tasks = database::tasks::list_tasks_from_db(&pool, query.date).await?;
    info!("Successfully retrieved {} tasks.", tasks.len());
    Ok(Json(json!({ "success": true, "tasks": tasks })))
}

/// Handler for fetching a single task by ID.
pub async fn get_task(
    State(pool): State<SqlitePool>,
    Path(task_id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    match database::tasks::get_task_from_db(&pool, task_id).await? {
        Some(task) => Ok(Json(json!({ "success": true, "task": task }))),
        None => Err(AppError::not_found(&format!(
            "Task with ID {} not found.",
            task_id
        ))),
    }
}

/// Handler for partially updating a task. Absent fields keep their values.
pub async fn update_task(
    State(pool): State<SqlitePool>,
    Path(task_id): Path<i64>,
    Json(payload): Json<UpdateTaskPayload>,
) -> Result<Json<serde_json::Value>, AppError> {
    debug!("Received request to update task with ID: {}", task_id);
    validate_priority(payload.priority.as_deref())?;

    match database::tasks::update_task_in_db(&pool, task_id, payload).await? {
        Some(task) => {
            info!("Task with ID {} updated successfully.", task_id);
            Ok(Json(json!({ "success": true, "task": task })))
        }
        None => Err(AppError::not_found(&format!(
            "Task with ID {} not found.",
            task_id
        ))),
    }
}

/// Handler for deleting a task by ID (physical removal).
pub async fn delete_task(
    State(pool): State<SqlitePool>,
    Path(task_id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    debug!("Attempting to delete task with ID: {}", task_id);

    let deleted = database::tasks::delete_task_from_db(&pool, task_id).await?;

    if deleted {
        info!("Task with ID {} deleted successfully.", task_id);
        Ok(Json(json!({ "success": true, "message": "Task deleted." })))
    } else {
        error!("Task with ID {} not found for deletion.", task_id);
        Err(AppError::not_found(&format!(
            "Task with ID {} not found for deletion.",
            task_id
        )))
    }
}

/// Handler for task statistics (totals, completion rate, breakdowns).
pub async fn task_stats(
    State(pool): State<SqlitePool>,
) -> Result<Json<serde_json::Value>, AppError> {
    let stats = database::tasks::task_stats_from_db(&pool).await?;
    Ok(Json(json!({ "success": true, "stats": stats })))
}
