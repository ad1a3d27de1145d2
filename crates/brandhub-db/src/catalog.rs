//! Postgres-backed [`AssetCatalog`] implementation.

use async_trait::async_trait;
use brandhub_core::catalog::AssetCatalog;
use brandhub_core::models::{NewGymElement, NewGymLogo};
use brandhub_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{GymElementRepository, GymLogoRepository};

/// Asset catalog over the `gym_logos`/`gym_elements` table pair.
#[derive(Clone)]
pub struct SqlxAssetCatalog {
    logos: GymLogoRepository,
    elements: GymElementRepository,
}

impl SqlxAssetCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self {
            logos: GymLogoRepository::new(pool.clone()),
            elements: GymElementRepository::new(pool),
        }
    }
}

#[async_trait]
impl AssetCatalog for SqlxAssetCatalog {
    async fn insert_logo(&self, logo: NewGymLogo) -> Result<Uuid, AppError> {
        let inserted = self.logos.insert(logo).await?;
        Ok(inserted.id)
    }

    async fn insert_element(&self, element: NewGymElement) -> Result<Uuid, AppError> {
        let inserted = self.elements.insert(element).await?;
        Ok(inserted.id)
    }

    async fn list_logo_filenames(&self, gym_id: Option<Uuid>) -> Result<Vec<String>, AppError> {
        self.logos.list_filenames(gym_id).await
    }
}
