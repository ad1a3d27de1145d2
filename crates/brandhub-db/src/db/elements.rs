//! Element repository: CRUD for the `gym_elements` table.
//!
//! Elements are every non-logo asset type (hero, icon, banner, ...) stored
//! as generic typed records.

use brandhub_core::classify::AssetCategory;
use brandhub_core::models::{GymElement, NewGymElement};
use brandhub_core::AppError;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Row type for the gym_elements table (for FromRow).
#[derive(Debug, sqlx::FromRow)]
pub struct GymElementRow {
    pub id: Uuid,
    pub gym_id: Option<Uuid>,
    pub filename: String,
    pub storage_key: String,
    pub url: String,
    pub content_type: String,
    pub file_size: i64,
    pub category: AssetCategory,
    pub asset_type: String,
    pub uploaded_at: DateTime<Utc>,
}

impl GymElementRow {
    pub fn to_gym_element(self) -> GymElement {
        GymElement {
            id: self.id,
            gym_id: self.gym_id,
            filename: self.filename,
            storage_key: self.storage_key,
            url: self.url,
            content_type: self.content_type,
            file_size: self.file_size,
            category: self.category,
            asset_type: self.asset_type,
            uploaded_at: self.uploaded_at,
        }
    }
}

/// Repository for the gym_elements table.
#[derive(Clone)]
pub struct GymElementRepository {
    pool: PgPool,
}

impl GymElementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, element), fields(db.table = "gym_elements"))]
    pub async fn insert(&self, element: NewGymElement) -> Result<GymElement, AppError> {
        let row: GymElementRow = sqlx::query_as::<Postgres, GymElementRow>(
            r#"
            INSERT INTO gym_elements
                (gym_id, filename, storage_key, url, content_type, file_size, category, asset_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, gym_id, filename, storage_key, url, content_type, file_size,
                      category, asset_type, uploaded_at
            "#,
        )
        .bind(element.gym_id)
        .bind(&element.filename)
        .bind(&element.storage_key)
        .bind(&element.url)
        .bind(&element.content_type)
        .bind(element.file_size)
        .bind(element.category)
        .bind(&element.asset_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.to_gym_element())
    }

    #[tracing::instrument(skip(self), fields(db.table = "gym_elements"))]
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM gym_elements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Element not found: {}", id)));
        }

        Ok(())
    }

    /// Elements owned by `gym_id`; `None` lists the admin/unassigned bucket.
    #[tracing::instrument(skip(self), fields(db.table = "gym_elements"))]
    pub async fn list_by_gym(&self, gym_id: Option<Uuid>) -> Result<Vec<GymElement>, AppError> {
        let rows: Vec<GymElementRow> = sqlx::query_as::<Postgres, GymElementRow>(
            r#"
            SELECT id, gym_id, filename, storage_key, url, content_type, file_size,
                   category, asset_type, uploaded_at
            FROM gym_elements
            WHERE gym_id IS NOT DISTINCT FROM $1
            ORDER BY uploaded_at DESC
            "#,
        )
        .bind(gym_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(GymElementRow::to_gym_element).collect())
    }
}
