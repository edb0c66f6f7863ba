// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use anyhow::{Context, Result};
use chrono::Utc;
use common::{CreateDonationPayload, Donation, UpdateDonationPayload};
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Outcome of a guarded soft-delete or restore.
/// The flag flip only applies when the record is in the opposite state.
#[derive(Debug)]
pub enum FlipOutcome {
    Applied(Donation),
    PreconditionFailed,
    NotFound,
}

pub async fn create_donation_in_db(
    pool: &SqlitePool,
    payload: CreateDonationPayload,
) -> Result<Donation> {
    let condition = payload.condition.unwrap_or_else(|| "good".to_string());
    let now = Utc::now();

    debug!(
        "Insert values: name={}, category={}, condition={}",
        payload.name, payload.category, condition
    );

    let id = sqlx::query(
        "INSERT INTO donations (name, category, description, condition, image, is_deleted, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, 0, ?, ?)",
    )
    .bind(&payload.name)
    .bind(&payload.category)
    .bind(&payload.description)
    .bind(&condition)
    .bind(&payload.image)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to insert donation into DB")?
    .last_insert_rowid();

    Ok(Donation {
        id,
        name: payload.name,
        category: payload.category,
        description: payload.description,
        condition,
        image: payload.image,
        is_deleted: false,
        created_at: now,
        updated_at: now,
    })
}

/// Lists donations, most recent first. Soft-deleted records are excluded
/// unless the caller explicitly asks for them.
pub async fn list_donations_from_db(
    pool: &SqlitePool,
    include_deleted: bool,
) -> Result<Vec<Donation>> {
    let query = if include_deleted {
        "SELECT * FROM donations ORDER BY created_at DESC, id DESC"
    } else {
        "SELECT * FROM donations WHERE is_deleted = 0 ORDER BY created_at DESC, id DESC"
    };

    let donations = sqlx::query_as::<_, Donation>(query)
        .fetch_all(pool)
        .await
        .context("Failed to retrieve donations from DB")?;

    Ok(donations)
}

pub async fn get_donation_from_db(pool: &SqlitePool, donation_id: i64) -> Result<Option<Donation>> {
    let donation = sqlx::query_as::<_, Donation>("SELECT * FROM donations WHERE id = ?")
        .bind(donation_id)
        .fetch_optional(pool)
        .await
        .context("Failed to retrieve donation from DB")?;

    Ok(donation)
}

/// Merges the partial payload into an existing donation (COALESCE).
/// Returns `None` when no donation with the given ID exists.
pub async fn update_donation_in_db(
    pool: &SqlitePool,
    donation_id: i64,
    payload: UpdateDonationPayload,
) -> Result<Option<Donation>> {
    let now = Utc::now();
    let result = sqlx::query(
        "UPDATE donations SET \
           name = COALESCE(?, name), \
           category = COALESCE(?, category), \
           description = COALESCE(?, description), \
           condition = COALESCE(?, condition), \
           image = COALESCE(?, image), \
           updated_at = ? \
         WHERE id = ?",
    )
    .bind(payload.name)
    .bind(payload.category)
    .bind(payload.description)
    .bind(payload.condition)
    .bind(payload.image)
    .bind(now)
    .bind(donation_id)
    .execute(pool)
    .await
    .context(format!("Failed to update donation with ID: {}", donation_id))?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_donation_from_db(pool, donation_id).await
}

/// Soft deletes a donation by flipping its `is_deleted` flag.
/// Only applies when the record is not already deleted.
pub async fn soft_delete_donation_in_db(pool: &SqlitePool, donation_id: i64) -> Result<FlipOutcome> {
    debug!("Attempting to soft delete donation with ID: {}", donation_id);
    flip_deleted_flag(pool, donation_id, true).await
}

/// Restores a soft-deleted donation. Only applies when the record is
/// currently deleted.
pub async fn restore_donation_in_db(pool: &SqlitePool, donation_id: i64) -> Result<FlipOutcome> {
    debug!("Attempting to restore donation with ID: {}", donation_id);
    flip_deleted_flag(pool, donation_id, false).await
}

async fn flip_deleted_flag(
    pool: &SqlitePool,
    donation_id: i64,
    deleted: bool,
) -> Result<FlipOutcome> {
    let now = Utc::now();
    // Guarded update: only flips when the flag is in the opposite state.
    // RETURNING makes the flip and the returned row a single round trip,
    // so a concurrent writer cannot slip in between them.
    let flipped = sqlx::query_as::<_, Donation>(
        "UPDATE donations SET is_deleted = ?, updated_at = ? WHERE id = ? AND is_deleted = ? RETURNING *",
    )
    .bind(deleted)
    .bind(now)
    .bind(donation_id)
    .bind(!deleted)
    .fetch_optional(pool)
    .await
    .context(format!("Failed to flip deleted flag for donation ID: {}", donation_id))?;

    if let Some(donation) = flipped {
        info!(
            "Donation ID {} is now {}.",
            donation_id,
            if deleted { "deleted" } else { "restored" }
        );
        return Ok(FlipOutcome::Applied(donation));
    }

    // Nothing flipped: either the record does not exist, or it was already
    // in the requested state.
    match get_donation_from_db(pool, donation_id).await? {
        Some(_) => Ok(FlipOutcome::PreconditionFailed),
        None => Ok(FlipOutcome::NotFound),
    }
}

/// Physically removes a donation, regardless of its soft-delete state.
pub async fn delete_donation_from_db(pool: &SqlitePool, donation_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM donations WHERE id = ?")
        .bind(donation_id)
        .execute(pool)
        .await
        .context(format!(
            "Failed to permanently delete donation with ID: {}",
            donation_id
        ))?;

    Ok(result.rows_affected() > 0)
}

/// Aggregates donation counts. The per-category and per-condition
/// breakdowns count active (not soft-deleted) records only.
pub async fn donation_stats_from_db(pool: &SqlitePool) -> Result<serde_json::Value> {
    let (total, deleted): (i64, i64) =
        sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(is_deleted), 0) FROM donations")
            .fetch_one(pool)
            .await
            .context("Failed to aggregate donation totals")?;

    let by_category: Vec<(String, i64)> = sqlx::query_as(
        "SELECT category, COUNT(*) FROM donations WHERE is_deleted = 0 GROUP BY category",
    )
    .fetch_all(pool)
    .await
    .context("Failed to aggregate donations by category")?;

    let by_condition: Vec<(String, i64)> = sqlx::query_as(
        "SELECT condition, COUNT(*) FROM donations WHERE is_deleted = 0 GROUP BY condition",
    )
    .fetch_all(pool)
    .await
    .context("Failed to aggregate donations by condition")?;

    let mut category_map = serde_json::Map::new();
    for (category, count) in by_category {
        category_map.insert(category, count.into());
    }
    let mut condition_map = serde_json::Map::new();
    for (condition, count) in by_condition {
        condition_map.insert(condition, count.into());
    }

    Ok(serde_json::json!({
        "total": total,
        "active": total - deleted,
        "deleted": deleted,
        "byCategory": category_map,
        "byCondition": condition_map,
    }))
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

    fn payload(name: &str, category: &str) -> CreateDonationPayload {
        CreateDonationPayload {
            name: name.to_string(),
            category: category.to_string(),
            description: None,
            condition: None,
            image: None,
        }
    }

    #[tokio::test]
    async fn test_soft_delete_then_restore_is_symmetric() {
        let pool = setup_test_db().await.unwrap();
        let donation = create_donation_in_db(&pool, payload("Winter coat", "clothes"))
            .await
            .unwrap();

        let outcome = soft_delete_donation_in_db(&pool, donation.id).await.unwrap();
        let deleted = match outcome {
            FlipOutcome::Applied(d) => d,
            other => panic!("expected Applied, got {:?}", other),
        };
        assert!(deleted.is_deleted);

        let outcome = restore_donation_in_db(&pool, donation.id).await.unwrap();
        let restored = match outcome {
            FlipOutcome::Applied(d) => d,
            other => panic!("expected Applied, got {:?}", other),
        };
        assert!(!restored.is_deleted);
        // Nothing but the flag (and updated_at) changed.
        assert_eq!(restored.name, donation.name);
        assert_eq!(restored.category, donation.category);
        assert_eq!(restored.condition, donation.condition);
    }

    #[tokio::test]
    async fn test_double_soft_delete_is_rejected() {
        let pool = setup_test_db().await.unwrap();
        let donation = create_donation_in_db(&pool, payload("Old boots", "shoes"))
            .await
            .unwrap();

        soft_delete_donation_in_db(&pool, donation.id).await.unwrap();
        let second = soft_delete_donation_in_db(&pool, donation.id).await.unwrap();
        assert!(matches!(second, FlipOutcome::PreconditionFailed));
    }

    #[tokio::test]
    async fn test_restore_non_deleted_is_rejected() {
        let pool = setup_test_db().await.unwrap();
        let donation = create_donation_in_db(&pool, payload("Scarf", "clothes"))
            .await
            .unwrap();

        let outcome = restore_donation_in_db(&pool, donation.id).await.unwrap();
        assert!(matches!(outcome, FlipOutcome::PreconditionFailed));
    }

    #[tokio::test]
    async fn test_flip_on_unknown_id_is_not_found() {
        let pool = setup_test_db().await.unwrap();
        let outcome = soft_delete_donation_in_db(&pool, 404).await.unwrap();
        assert!(matches!(outcome, FlipOutcome::NotFound));
    }

    #[tokio::test]
    async fn test_listing_excludes_soft_deleted_by_default() {
        let pool = setup_test_db().await.unwrap();
        let kept = create_donation_in_db(&pool, payload("Kept", "clothes"))
            .await
            .unwrap();
        let gone = create_donation_in_db(&pool, payload("Gone", "shoes"))
            .await
            .unwrap();
        soft_delete_donation_in_db(&pool, gone.id).await.unwrap();

        let active = list_donations_from_db(&pool, false).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, kept.id);

        let all = list_donations_from_db(&pool, true).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_stats_count_active_only_in_breakdowns() {
        let pool = setup_test_db().await.unwrap();
        create_donation_in_db(&pool, payload("Coat", "clothes"))
            .await
            .unwrap();
        let second_clothes = create_donation_in_db(&pool, payload("Shirt", "clothes"))
            .await
            .unwrap();
        create_donation_in_db(&pool, payload("Sneakers", "shoes"))
            .await
            .unwrap();
        soft_delete_donation_in_db(&pool, second_clothes.id)
            .await
            .unwrap();

        let stats = donation_stats_from_db(&pool).await.unwrap();
        assert_eq!(stats["total"], 3);
        assert_eq!(stats["active"], 2);
        assert_eq!(stats["deleted"], 1);
        assert_eq!(stats["byCategory"]["clothes"], 1);
        assert_eq!(stats["byCategory"]["shoes"], 1);
    }

    #[tokio::test]
    async fn test_stats_on_empty_store() {
        let pool = setup_test_db().await.unwrap();
        let stats = donation_stats_from_db(&pool).await.unwrap();
        assert_eq!(stats["total"], 0);
        assert_eq!(stats["active"], 0);
        assert_eq!(stats["deleted"], 0);
    }
}
