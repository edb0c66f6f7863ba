// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Categories the donation drop-off accepts.
pub const DONATION_CATEGORIES: [&str; 2] = ["clothes", "shoes"];

/// Conditions a donated item can be declared in.
pub const DONATION_CONDITIONS: [&str; 3] = ["excellent", "good", "fair"];

/// A donated item. Deletion is a soft flag: the record stays in the table
/// with `is_deleted = true` until an explicit permanent delete.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    #[sqlx(rename = "id")]
    pub id: i64,

    #[sqlx(rename = "name")]
    pub name: String,

    #[sqlx(rename = "category")]
    pub category: String,

    #[sqlx(rename = "description")]
    pub description: Option<String>,

    #[sqlx(rename = "condition")]
    pub condition: String,

    // URL or data-URI supplied by the mobile client; opaque to the server.
    #[sqlx(rename = "image")]
    pub image: Option<String>,

    #[sqlx(rename = "is_deleted")]
    pub is_deleted: bool,

    #[sqlx(rename = "created_at")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonationPayload {
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub condition: Option<String>,
    pub image: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDonationPayload {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub condition: Option<String>,
    pub image: Option<String>,
}
