// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use common::{CreateTaskPayload, Task, UpdateTaskPayload};
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Inserts a new task into the database, filling in the server-side
/// defaults (not completed, medium priority, personal category).
pub async fn create_task_in_db(pool: &SqlitePool, payload: CreateTaskPayload) -> Result<Task> {
    let priority = payload.priority.unwrap_or_else(|| "medium".to_string());
    let category = payload.category.unwrap_or_else(|| "personal".to_string());
    let reminder_set = payload.reminder_set.unwrap_or(false);
    let now = Utc::now();

    debug!(
        "Insert values: title={}, time={}, task_date={}, priority={}, category={}",
        payload.title, payload.time, payload.date, priority, category
    );

    let id = sqlx::query(
        "INSERT INTO tasks (title, time, task_date, completed, priority, category, reminder_set, created_at, updated_at) \
         VALUES (?, ?, ?, 0, ?, ?, ?, ?, ?)",
    )
    .bind(&payload.title)
    .bind(&payload.time)
    .bind(payload.date)
    .bind(&priority)
    .bind(&category)
    .bind(reminder_set)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to insert task into DB")?
    .last_insert_rowid();

    Ok(Task {
        id,
        title: payload.title,
        time: payload.time,
        date: payload.date,
        completed: false,
        priority,
        category,
        reminder_set,
        created_at: now,
        updated_at: now,
    })
}

/// Retrieves tasks, optionally narrowed to a single day.
/// Ordering: date ascending, then time-of-day ascending within a date.
pub async fn list_tasks_from_db(pool: &SqlitePool, date: Option<NaiveDate>) -> Result<Vec<Task>> {
    let tasks = match date {
        Some(day) => {
            sqlx::query_as::<_, Task>(
                "SELECT * FROM tasks WHERE task_date = ? ORDER BY time ASC, id ASC",
            )
            .bind(day)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, Task>("SELECT * FROM tasks ORDER BY task_date ASC, time ASC, id ASC")
                .fetch_all(pool)
                .await
        }
    }
    .context("Failed to retrieve tasks from DB")?;

    Ok(tasks)
}

pub async fn get_task_from_db(pool: &SqlitePool, task_id: i64) -> Result<Option<Task>> {
    let task = sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = ?")
        .bind(task_id)
        .fetch_optional(pool)
        .await
        .context("Failed to retrieve task from DB")?;

    Ok(task)
}

/// Merges the partial payload into the existing task. Absent fields keep
/// their current value (COALESCE), and `updated_at` is refreshed.
/// Returns `None` when no task with the given ID exists.
pub async fn update_task_in_db(
    pool: &SqlitePool,
    task_id: i64,
    payload: UpdateTaskPayload,
) -> Result<Option<Task>> {
    let now = Utc::now();
    let result = sqlx::query(
        "UPDATE tasks SET \
           title = COALESCE(?, title), \
           time = COALESCE(?, time), \
           task_date = COALESCE(?, task_date), \
           completed = COALESCE(?, completed), \
           priority = COALESCE(?, priority), \
           category = COALESCE(?, category), \
           reminder_set = COALESCE(?, reminder_set), \
           updated_at = ? \
         WHERE id = ?",
    )
    .bind(payload.title)
    .bind(payload.time)
    .bind(payload.date)
    .bind(payload.completed)
    .bind(payload.priority)
    .bind(payload.category)
    .bind(payload.reminder_set)
    .bind(now)
    .bind(task_id)
    .execute(pool)
    .await
    .context(format!("Failed to update task with ID: {}", task_id))?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_task_from_db(pool, task_id).await
}

/// Physically removes a task.
/// Returns true if a task was removed, false if the ID was unknown.
pub async fn delete_task_from_db(pool: &SqlitePool, task_id: i64) -> Result<bool> {
    debug!("Attempting to delete task with ID: {}", task_id);
    let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
        .bind(task_id)
        .execute(pool)
        .await
        .context(format!("Failed to delete task with ID: {}", task_id))?;

    let rows_affected = result.rows_affected();
    info!("Deleted {} rows for task ID: {}", rows_affected, task_id);

    Ok(rows_affected > 0)
}

/// Aggregates summary counts over the whole task table.
/// An empty table yields all-zero counts and a 0% completion rate.
pub async fn task_stats_from_db(pool: &SqlitePool) -> Result<serde_json::Value> {
    let (total, completed): (i64, i64) =
        sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(completed), 0) FROM tasks")
            .fetch_one(pool)
            .await
            .context("Failed to aggregate task totals")?;

    let by_priority: Vec<(String, i64)> =
        sqlx::query_as("SELECT priority, COUNT(*) FROM tasks GROUP BY priority")
            .fetch_all(pool)
            .await
            .context("Failed to aggregate tasks by priority")?;

    let by_category: Vec<(String, i64)> =
        sqlx::query_as("SELECT category, COUNT(*) FROM tasks GROUP BY category")
            .fetch_all(pool)
            .await
            .context("Failed to aggregate tasks by category")?;

    // Rounded to the nearest integer percent; 0 when the table is empty.
    let completion_rate = if total == 0 {
        0
    } else {
        ((completed as f64 / total as f64) * 100.0).round() as i64
    };

    let mut priority_map = serde_json::Map::new();
    for (priority, count) in by_priority {
        priority_map.insert(priority, count.into());
    }
    let mut category_map = serde_json::Map::new();
    for (category, count) in by_category {
        category_map.insert(category, count.into());
    }

    Ok(serde_json::json!({
        "total": total,
        "completed": completed,
        "pending": total - completed,
        "completionRate": completion_rate,
        "byPriority": priority_map,
        "byCategory": category_map,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::init_schema;
    use chrono::NaiveDate;

    /// Helper function to set up an in-memory SQLite database for testing.
    /// This creates a fresh, empty database for each test, ensuring they are isolated.
    async fn setup_test_db() -> Result<SqlitePool> {
        let pool = SqlitePool::connect("sqlite::memory:").await?;
        init_schema(&pool).await?;
        Ok(pool)
    }

    fn payload(title: &str, time: &str, date: NaiveDate) -> CreateTaskPayload {
        CreateTaskPayload {
            title: title.to_string(),
            time: time.to_string(),
            date,
            priority: None,
            category: None,
            reminder_set: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_task() {
        let pool = setup_test_db().await.unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let created = create_task_in_db(&pool, payload("Pay bills", "09:00", date))
            .await
            .unwrap();

        // Server-side defaults
        assert!(created.id > 0);
        assert!(!created.completed);
        assert_eq!(created.priority, "medium");
        assert_eq!(created.category, "personal");
        assert!(!created.reminder_set);

        let fetched = get_task_from_db(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Pay bills");
        assert_eq!(fetched.date, date);
    }

    #[tokio::test]
    async fn test_list_tasks_orders_by_time_within_date() {
        let pool = setup_test_db().await.unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        create_task_in_db(&pool, payload("Lunch", "12:30", date))
            .await
            .unwrap();
        create_task_in_db(&pool, payload("Standup", "09:15", date))
            .await
            .unwrap();
        create_task_in_db(&pool, payload("Review", "16:00", date))
            .await
            .unwrap();

        let tasks = list_tasks_from_db(&pool, Some(date)).await.unwrap();
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].title, "Standup");
        assert_eq!(tasks[1].title, "Lunch");
        assert_eq!(tasks[2].title, "Review");
    }

    #[tokio::test]
    async fn test_list_tasks_filters_by_date() {
        let pool = setup_test_db().await.unwrap();
        let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        create_task_in_db(&pool, payload("Monday task", "09:00", monday))
            .await
            .unwrap();
        create_task_in_db(&pool, payload("Tuesday task", "09:00", tuesday))
            .await
            .unwrap();

        let tasks = list_tasks_from_db(&pool, Some(monday)).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Monday task");

        let all = list_tasks_from_db(&pool, None).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_update_task_partial_merge() {
        let pool = setup_test_db().await.unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let created = create_task_in_db(&pool, payload("Pay bills", "09:00", date))
            .await
            .unwrap();

        // Only `completed` is supplied; everything else must survive.
        let patch = UpdateTaskPayload {
            completed: Some(true),
            ..Default::default()
        };
        let updated = update_task_in_db(&pool, created.id, patch)
            .await
            .unwrap()
            .unwrap();

        assert!(updated.completed);
        assert_eq!(updated.title, "Pay bills");
        assert_eq!(updated.time, "09:00");
        assert_eq!(updated.priority, "medium");
        assert_eq!(updated.date, date);
    }

    #[tokio::test]
    async fn test_update_unknown_task_returns_none() {
        let pool = setup_test_db().await.unwrap();
        let patch = UpdateTaskPayload {
            title: Some("Ghost".to_string()),
            ..Default::default()
        };
        let updated = update_task_in_db(&pool, 9999, patch).await.unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_delete_unknown_task_leaves_store_unchanged() {
        let pool = setup_test_db().await.unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        create_task_in_db(&pool, payload("Keep me", "09:00", date))
            .await
            .unwrap();

        let deleted = delete_task_from_db(&pool, 9999).await.unwrap();
        assert!(!deleted);

        let tasks = list_tasks_from_db(&pool, None).await.unwrap();
        assert_eq!(tasks.len(), 1);
    }

    #[tokio::test]
    async fn test_stats_on_empty_store() {
        let pool = setup_test_db().await.unwrap();
        let stats = task_stats_from_db(&pool).await.unwrap();

        assert_eq!(stats["total"], 0);
        assert_eq!(stats["completed"], 0);
        assert_eq!(stats["completionRate"], 0);
    }

    #[tokio::test]
    async fn test_stats_completion_rate_rounds() {
        let pool = setup_test_db().await.unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let a = create_task_in_db(&pool, payload("A", "09:00", date))
            .await
            .unwrap();
        create_task_in_db(&pool, payload("B", "10:00", date))
            .await
            .unwrap();
        create_task_in_db(&pool, payload("C", "11:00", date))
            .await
            .unwrap();

        let patch = UpdateTaskPayload {
            completed: Some(true),
            ..Default::default()
        };
        update_task_in_db(&pool, a.id, patch).await.unwrap();

        let stats = task_stats_from_db(&pool).await.unwrap();
        assert_eq!(stats["total"], 3);
        assert_eq!(stats["completed"], 1);
        assert_eq!(stats["pending"], 2);
        // 1/3 = 33.33..% -> 33
        assert_eq!(stats["completionRate"], 33);
        assert_eq!(stats["byPriority"]["medium"], 3);
    }
}
