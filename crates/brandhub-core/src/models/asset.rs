//! Stored asset records.
//!
//! Logos have dedicated records in `gym_logos`; every other asset type is a
//! generic typed element in `gym_elements`. A `gym_id` of `None` marks an
//! admin/unassigned resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classify::AssetCategory;

/// A committed logo record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GymLogo {
    pub id: Uuid,
    pub gym_id: Option<Uuid>,
    pub filename: String,
    pub storage_key: String,
    pub url: String,
    pub content_type: String,
    pub file_size: i64,
    pub category: AssetCategory,
    pub variant: i32,
    pub uploaded_at: DateTime<Utc>,
}

/// Fields for inserting a new logo record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGymLogo {
    pub gym_id: Option<Uuid>,
    pub filename: String,
    pub storage_key: String,
    pub url: String,
    pub content_type: String,
    pub file_size: i64,
    pub category: AssetCategory,
    pub variant: i32,
}

/// A committed generic element record (hero images, icons, banners, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GymElement {
    pub id: Uuid,
    pub gym_id: Option<Uuid>,
    pub filename: String,
    pub storage_key: String,
    pub url: String,
    pub content_type: String,
    pub file_size: i64,
    pub category: AssetCategory,
    /// Asset type token from the naming convention (`hero`, `icon`, ...).
    pub asset_type: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Fields for inserting a new element record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGymElement {
    pub gym_id: Option<Uuid>,
    pub filename: String,
    pub storage_key: String,
    pub url: String,
    pub content_type: String,
    pub file_size: i64,
    pub category: AssetCategory,
    pub asset_type: String,
}
