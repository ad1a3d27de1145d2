//! Gym registry repository: CRUD for the `gyms` table.

use brandhub_core::models::GymRecord;
use brandhub_core::AppError;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Row type for the gyms table (for FromRow).
#[derive(Debug, sqlx::FromRow)]
pub struct GymRow {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl GymRow {
    pub fn to_gym_record(self) -> GymRecord {
        GymRecord {
            id: self.id,
            code: self.code,
            name: self.name,
        }
    }
}

/// Repository for the gyms table.
///
/// `list` is the registry-snapshot source for the gym-code resolver.
#[derive(Clone)]
pub struct GymRepository {
    pool: PgPool,
}

impl GymRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the full registry, ordered by code.
    ///
    /// Codes are expected to be unique; with duplicates the resolver's
    /// first-match behavior follows this ordering.
    #[tracing::instrument(skip(self), fields(db.table = "gyms"))]
    pub async fn list(&self) -> Result<Vec<GymRecord>, AppError> {
        let rows: Vec<GymRow> = sqlx::query_as::<Postgres, GymRow>(
            r#"
            SELECT id, code, name, created_at
            FROM gyms
            ORDER BY code
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(GymRow::to_gym_record).collect())
    }

    #[tracing::instrument(skip(self), fields(db.table = "gyms"))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<GymRecord>, AppError> {
        let row: Option<GymRow> = sqlx::query_as::<Postgres, GymRow>(
            r#"
            SELECT id, code, name, created_at
            FROM gyms
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(GymRow::to_gym_record))
    }

    /// Insert a new gym. The code is stored uppercase.
    #[tracing::instrument(skip(self), fields(db.table = "gyms"))]
    pub async fn create(&self, code: &str, name: &str) -> Result<GymRecord, AppError> {
        let row: GymRow = sqlx::query_as::<Postgres, GymRow>(
            r#"
            INSERT INTO gyms (code, name)
            VALUES (UPPER($1), $2)
            RETURNING id, code, name, created_at
            "#,
        )
        .bind(code)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.to_gym_record())
    }

    #[tracing::instrument(skip(self), fields(db.table = "gyms"))]
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM gyms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Gym not found: {}", id)));
        }

        Ok(())
    }
}
