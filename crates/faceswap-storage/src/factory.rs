use crate::{LocalStorage, Storage, StorageResult};
use faceswap_core::Config;
use std::sync::Arc;

/// Create the storage backend for the configured static root
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let storage = LocalStorage::new(config.static_root.clone()).await?;

    tracing::info!(
        root = %config.static_root.display(),
        "Local storage initialized"
    );

    Ok(Arc::new(storage))
}
