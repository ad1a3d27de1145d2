use crate::{LocalStorage, Storage, StorageResult};
use brandhub_core::AppConfig;
use std::sync::Arc;

/// Create a storage backend based on configuration.
///
/// Brandhub serves asset bytes from the local filesystem; cloud object
/// stores are consumed through the same [`Storage`] trait by deployments
/// that provide their own implementation.
pub async fn create_storage(config: &AppConfig) -> StorageResult<Arc<dyn Storage>> {
    let storage = LocalStorage::new(
        config.storage_path.clone(),
        config.storage_base_url.clone(),
    )
    .await?;
    Ok(Arc::new(storage))
}
