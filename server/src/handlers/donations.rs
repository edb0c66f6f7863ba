// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use crate::database;
use crate::database::donations::FlipOutcome;
use crate::error::AppError;
use crate::extract::{Json, Query};
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use common::donations::{DONATION_CATEGORIES, DONATION_CONDITIONS};
use common::{CreateDonationPayload, UpdateDonationPayload};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::{debug, error, info};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DonationListQuery {
    pub include_deleted: Option<bool>,
}

fn validate_category(category: &str) -> Result<(), AppError> {
    if !DONATION_CATEGORIES.contains(&category) {
        error!("Validation failed: unknown donation category '{}'.", category);
        return Err(AppError::validation(&format!(
            "Category must be one of: {}.",
            DONATION_CATEGORIES.join(", ")
        )));
    }
    Ok(())
}

fn validate_condition(condition: Option<&str>) -> Result<(), AppError> {
    if let Some(c) = condition {
        if !DONATION_CONDITIONS.contains(&c) {
            error!("Validation failed: unknown donation condition '{}'.", c);
            return Err(AppError::validation(&format!(
                "Condition must be one of: {}.",
                DONATION_CONDITIONS.join(", ")
            )));
        }
    }
    Ok(())
}

/// Handler for registering a new donation.
pub async fn create_donation(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateDonationPayload>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    debug!("Received request to create donation: {}", payload.name);

    if payload.name.trim().is_empty() {
        error!("Validation failed: donation name is empty.");
        return Err(AppError::validation("Name cannot be empty."));
    }
    validate_category(&payload.category)?;
    validate_condition(payload.condition.as_deref())?;

    let donation = database::donations::create_donation_in_db(&pool, payload).await?;

    info!("Donation created successfully with ID: {}", donation.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "donation": donation })),
    ))
}

/// Handler for listing donations. Soft-deleted records are excluded
/// unless `?includeDeleted=true` is given.
pub async fn list_donations(
    State(pool): State<SqlitePool>,
    Query(query): Query<DonationListQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let include_deleted = query.include_deleted.unwrap_or(false);
    let donations = database::donations::list_donations_from_db(&pool, include_deleted).await?;
    info!("Successfully retrieved {} donations.", donations.len());
    Ok(Json(json!({ "success": true, "donations": donations })))
}

/// Handler for fetching a single donation by ID.
pub async fn get_donation(
    State(pool): State<SqlitePool>,
    Path(donation_id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    match database::donations::get_donation_from_db(&pool, donation_id).await? {
        Some(donation) => Ok(Json(json!({ "success": true, "donation": donation }))),
        None => Err(AppError::not_found(&format!(
            "Donation with ID {} not found.",
            donation_id
        ))),
    }
}

/// Handler for partially updating a donation.
pub async fn update_donation(
    State(pool): State<SqlitePool>,
    Path(donation_id): Path<i64>,
    Json(payload): Json<UpdateDonationPayload>,
) -> Result<Json<serde_json::Value>, AppError> {
    if let Some(category) = payload.category.as_deref() {
        validate_category(category)?;
    }
    validate_condition(payload.condition.as_deref())?;

    match database::donations::update_donation_in_db(&pool, donation_id, payload).await? {
        Some(donation) => {
            info!("Donation with ID {} updated successfully.", donation_id);
            Ok(Json(json!({ "success": true, "donation": donation })))
        }
        None => Err(AppError::not_found(&format!(
            "Donation with ID {} not found.",
            donation_id
        ))),
    }
}

/// Handler for soft-deleting a donation. The record stays in the store
/// with its flag flipped; a second soft delete is rejected.
pub async fn soft_delete_donation(
    State(pool): State<SqlitePool>,
    Path(donation_id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    debug!("Attempting to soft delete donation with ID: {}", donation_id);

    match database::donations::soft_delete_donation_in_db(&pool, donation_id).await? {
        FlipOutcome::Applied(donation) => {
            info!("Donation with ID {} soft-deleted.", donation_id);
            Ok(Json(json!({ "success": true, "donation": donation })))
        }
        FlipOutcome::PreconditionFailed => Err(AppError::validation(&format!(
            "Donation with ID {} is already deleted.",
            donation_id
        ))),
        FlipOutcome::NotFound => Err(AppError::not_found(&format!(
            "Donation with ID {} not found.",
            donation_id
        ))),
    }
}

/// Handler for restoring a soft-deleted donation.
pub async fn restore_donation(
    State(pool): State<SqlitePool>,
    Path(donation_id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    debug!("Attempting to restore donation with ID: {}", donation_id);

    match database::donations::restore_donation_in_db(&pool, donation_id).await? {
        FlipOutcome::Applied(donation) => {
            info!("Donation with ID {} restored.", donation_id);
            Ok(Json(json!({ "success": true, "donation": donation })))
        }
        FlipOutcome::PreconditionFailed => Err(AppError::validation(&format!(
            "Donation with ID {} is not deleted.",
            donation_id
        ))),
        FlipOutcome::NotFound => Err(AppError::not_found(&format!(
            "Donation with ID {} not found.",
            donation_id
        ))),
    }
}

/// Handler for permanently deleting a donation (physical removal).
pub async fn permanent_delete_donation(
    State(pool): State<SqlitePool>,
    Path(donation_id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = database::donations::delete_donation_from_db(&pool, donation_id).await?;

    if deleted {
        info!("Donation with ID {} permanently deleted.", donation_id);
        Ok(Json(
            json!({ "success": true, "message": "Donation permanently deleted." }),
        ))
    } else {
        Err(AppError::not_found(&format!(
            "Donation with ID {} not found.",
            donation_id
        )))
    }
}

/// Handler for donation statistics.
pub async fn donation_stats(
    State(pool): State<SqlitePool>,
) -> Result<Json<serde_json::Value>, AppError> {
    let stats = database::donations::donation_stats_from_db(&pool).await?;
    Ok(Json(json!({ "success": true, "stats": stats })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_donation_validation_unknown_category() {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let payload = Json(CreateDonationPayload {
            name: "Bookshelf".to_string(),
            category: "furniture".to_string(),
            description: None,
            condition: None,
            image: None,
        });

        let result = create_donation(State(pool), payload).await;

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Category must be one of: clothes, shoes.");
    }

    #[tokio::test]
    async fn test_create_donation_validation_empty_name() {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let payload = Json(CreateDonationPayload {
            name: "  ".to_string(),
            category: "clothes".to_string(),
            description: None,
            condition: None,
            image: None,
        });

        let result = create_donation(State(pool), payload).await;

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_donation_validation_unknown_condition() {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let payload = Json(CreateDonationPayload {
            name: "Sandals".to_string(),
            category: "shoes".to_string(),
            description: None,
            condition: Some("broken".to_string()),
            image: None,
        });

        let result = create_donation(State(pool), payload).await;

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.code(), StatusCode::BAD_REQUEST);
        assert!(err.message().contains("Condition must be one of"));
    }
}
