//! Logo repository: CRUD for the `gym_logos` table.

use brandhub_core::classify::AssetCategory;
use brandhub_core::models::{GymLogo, NewGymLogo};
use brandhub_core::AppError;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Row type for the gym_logos table (for FromRow).
#[derive(Debug, sqlx::FromRow)]
pub struct GymLogoRow {
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

impl GymLogoRow {
    pub fn to_gym_logo(self) -> GymLogo {
        GymLogo {
            id: self.id,
            gym_id: self.gym_id,
            filename: self.filename,
            storage_key: self.storage_key,
            url: self.url,
            content_type: self.content_type,
            file_size: self.file_size,
            category: self.category,
            variant: self.variant,
            uploaded_at: self.uploaded_at,
        }
    }
}

/// Repository for the gym_logos table.
#[derive(Clone)]
pub struct GymLogoRepository {
    pool: PgPool,
}

impl GymLogoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, logo), fields(db.table = "gym_logos"))]
    pub async fn insert(&self, logo: NewGymLogo) -> Result<GymLogo, AppError> {
        let row: GymLogoRow = sqlx::query_as::<Postgres, GymLogoRow>(
            r#"
            INSERT INTO gym_logos
                (gym_id, filename, storage_key, url, content_type, file_size, category, variant)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, gym_id, filename, storage_key, url, content_type, file_size,
                      category, variant, uploaded_at
            "#,
        )
        .bind(logo.gym_id)
        .bind(&logo.filename)
        .bind(&logo.storage_key)
        .bind(&logo.url)
        .bind(&logo.content_type)
        .bind(logo.file_size)
        .bind(logo.category)
        .bind(logo.variant)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.to_gym_logo())
    }

    #[tracing::instrument(skip(self), fields(db.table = "gym_logos"))]
    pub async fn update_filename(&self, id: Uuid, filename: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE gym_logos SET filename = $2 WHERE id = $1")
            .bind(id)
            .bind(filename)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Logo not found: {}", id)));
        }

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(db.table = "gym_logos"))]
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM gym_logos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Logo not found: {}", id)));
        }

        Ok(())
    }

    /// Logos owned by `gym_id`; `None` lists the admin/unassigned bucket.
    #[tracing::instrument(skip(self), fields(db.table = "gym_logos"))]
    pub async fn list_by_gym(&self, gym_id: Option<Uuid>) -> Result<Vec<GymLogo>, AppError> {
        let rows: Vec<GymLogoRow> = sqlx::query_as::<Postgres, GymLogoRow>(
            r#"
            SELECT id, gym_id, filename, storage_key, url, content_type, file_size,
                   category, variant, uploaded_at
            FROM gym_logos
            WHERE gym_id IS NOT DISTINCT FROM $1
            ORDER BY uploaded_at DESC
            "#,
        )
        .bind(gym_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(GymLogoRow::to_gym_logo).collect())
    }

    /// Filenames only, for variant numbering.
    #[tracing::instrument(skip(self), fields(db.table = "gym_logos"))]
    pub async fn list_filenames(&self, gym_id: Option<Uuid>) -> Result<Vec<String>, AppError> {
        let rows: Vec<(String,)> = sqlx::query_as::<Postgres, (String,)>(
            r#"
            SELECT filename
            FROM gym_logos
            WHERE gym_id IS NOT DISTINCT FROM $1
            ORDER BY filename
            "#,
        )
        .bind(gym_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }
}
