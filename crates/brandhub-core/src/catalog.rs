//! Metadata-store collaborator trait
//!
//! The ingestion pipeline persists committed assets through this interface
//! without depending on a concrete database. The db crate provides the
//! Postgres implementation; tests provide in-memory fakes.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewGymElement, NewGymLogo};

/// Write/read surface of the asset metadata store used during ingestion.
#[async_trait]
pub trait AssetCatalog: Send + Sync {
    /// Insert a logo record, returning its generated id.
    async fn insert_logo(&self, logo: NewGymLogo) -> Result<Uuid, AppError>;

    /// Insert a generic element record, returning its generated id.
    async fn insert_element(&self, element: NewGymElement) -> Result<Uuid, AppError>;

    /// Filenames of logos owned by `gym_id` (admin bucket when `None`).
    /// Used for variant numbering.
    async fn list_logo_filenames(&self, gym_id: Option<Uuid>) -> Result<Vec<String>, AppError>;
}
